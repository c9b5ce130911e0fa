//! Discover vendored extensions.
//!
//! Extensions are the sub-directories of `<vendor_dir>/extensions`. Each one
//! may ship SASS sources (compiled into every theme), a pre-built script and
//! a pre-built stylesheet (both published verbatim).

use std::path::{Path, PathBuf};

use crate::{
    config::Config,
    error::Error,
    util::{path::PathExt, walk::DirWalker},
};

/// Searches for SASS sources, as (relative directory, glob) pairs.
///
/// The first search yielding any file wins.
const SASS_SEARCHES: [(&str, &str); 6] = [
    ("src/sass", "_all.s[ac]ss"),
    ("src/sass", "index.s[ac]ss"),
    ("src/sass", "*.s[ac]ss"),
    ("src", "*.s[ac]ss"),
    ("dist", "*.s[ac]ss"),
    ("", "*.s[ac]ss"),
];

/// A vendored extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    /// Extension name (its directory name).
    pub name: String,

    /// SASS sources to import into themes.
    pub sass: Vec<PathBuf>,

    /// Pre-built script, minified if available.
    pub script: Option<PathBuf>,

    /// Pre-built stylesheet, minified if available.
    pub stylesheet: Option<PathBuf>,
}

impl Extension {
    /// Read an extension directory.
    pub fn load(dir: &Path) -> Result<Self, Error> {
        let name = dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let dist = dir.join("dist");

        Ok(Self {
            sass: find_sass(dir)?,
            script: find_first(&dist, &["*.min.js"])?.or(find_first(&dist, &["*.js"])?),
            stylesheet: find_first(&dist, &["*.min.css"])?.or(find_first(&dist, &["*.css"])?),
            name,
        })
    }

    /// Return the pre-built files to publish.
    pub fn assets(&self) -> impl Iterator<Item = &Path> {
        self.script
            .iter()
            .chain(self.stylesheet.iter())
            .map(PathBuf::as_path)
    }

    /// Return the pre-built stylesheet if the extension has no SASS sources.
    ///
    /// Extensions with SASS sources are styled by the theme stylesheets.
    pub fn linked_stylesheet(&self) -> Option<&Path> {
        self.sass
            .is_empty()
            .then_some(self.stylesheet.as_deref())
            .flatten()
    }
}

/// Discover enabled extensions, in name order.
///
/// Enabled names without a matching directory are skipped.
pub fn discover(config: &Config) -> Result<Vec<Extension>, Error> {
    let extensions_dir = config.extensions_dir();

    if !extensions_dir.is_dir() {
        tracing::debug!("No extension directory at {:?}", extensions_dir);
        return Ok(Vec::new());
    }

    let dirs: Vec<PathBuf> = DirWalker::new(&extensions_dir)
        .sub_dirs()?
        .into_iter()
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| config.bulma.extensions.is_enabled(name))
        })
        .collect();

    dirs.iter()
        .map(|dir| {
            let extension = Extension::load(dir)?;
            tracing::debug!("Found extension {:?}", extension.name);
            Ok::<_, Error>(extension)
        })
        .collect()
}

/// Return the logical static path of a vendored file.
pub(crate) fn logical_path(config: &Config, path: &Path) -> String {
    path.strip_prefix(&config.vendor_dir)
        .unwrap_or(path)
        .to_slash()
}

/// Find the SASS sources of an extension.
fn find_sass(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    for (relative_dir, glob) in SASS_SEARCHES {
        let search_dir = dir.join(relative_dir);

        if !search_dir.is_dir() {
            continue;
        }

        let files: Vec<PathBuf> = DirWalker::new(&search_dir)
            .globs(&[glob])?
            .walk()
            .map(|entry| entry.into_path())
            .collect();

        if !files.is_empty() {
            return Ok(files);
        }
    }

    Ok(Vec::new())
}

/// Find the first file matching a glob below a directory.
fn find_first(dir: &Path, globs: &[&str]) -> Result<Option<PathBuf>, Error> {
    if !dir.is_dir() {
        return Ok(None);
    }

    Ok(DirWalker::new(dir).globs(globs)?.first())
}

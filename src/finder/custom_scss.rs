//! Resolve custom SCSS files.
//!
//! A custom SCSS path is looked up, in order:
//!
//! 1. through the other static file finders, as a logical static path;
//! 2. as a file inside one of the static directories;
//! 3. as a file whose path contains a `static/` segment.
//!
//! The first hit wins. The compiled stylesheet keeps the logical directory of
//! the source, with a `.css` extension.

use std::path::{Path, PathBuf};

use super::{find_first, AssetSource, Finder};
use crate::{
    config::Config,
    error::Error,
    util::path::{after_static_segment, PathExt},
};

/// Names of the lookup strategies, in order.
const STRATEGIES: [&str; 3] = [
    "static file finders",
    "static directories",
    "`static/` path segment",
];

/// A resolved custom SCSS file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CustomScss {
    /// Source file.
    pub(crate) source: PathBuf,

    /// Logical path of the source, relative to its static root.
    pub(crate) logical_path: String,
}

impl CustomScss {
    /// Return the logical path of the compiled stylesheet.
    pub(crate) fn output_path(&self) -> String {
        Path::new(&self.logical_path).with_extension("css").to_slash()
    }
}

/// Resolve a custom SCSS path.
pub(crate) fn resolve(
    config: &Config,
    finders: &[Box<dyn Finder>],
    path: &str,
) -> Result<CustomScss, Error> {
    if let Some(AssetSource::File(source)) = find_first(finders, path)? {
        return Ok(CustomScss {
            logical_path: Path::new(path).normalize().to_slash(),
            source,
        });
    }

    let candidate = config.base_dir.join(path).normalize();

    if candidate.is_file() {
        let in_static_dir = config
            .static_dirs
            .iter()
            .find_map(|dir| candidate.strip_prefix(dir).ok());

        if let Some(relative) = in_static_dir {
            return Ok(CustomScss {
                logical_path: relative.to_slash(),
                source: candidate,
            });
        }

        if let Some(relative) = after_static_segment(&Path::new(path).to_slash()) {
            return Ok(CustomScss {
                logical_path: Path::new(relative).normalize().to_slash(),
                source: candidate,
            });
        }
    }

    Err(Error::ResolveScss {
        path: path.to_owned(),
        strategies: STRATEGIES.iter().map(|strategy| strategy.to_string()).collect(),
    })
}

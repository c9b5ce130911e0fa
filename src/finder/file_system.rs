//! Find static files in static directories.

use std::path::{Component, Path, PathBuf};

use super::{AssetMap, AssetSource, Finder};
use crate::{
    error::Error,
    util::{path::PathExt, walk::DirWalker},
};

/// Finder over a list of static directories.
///
/// When several directories hold the same logical path, the first one wins.
#[derive(Debug, Clone, Default)]
pub struct FileSystemFinder {
    dirs: Vec<PathBuf>,
}

impl FileSystemFinder {
    /// Create a finder over static directories.
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }
}

impl Finder for FileSystemFinder {
    fn list(&self) -> Result<AssetMap, Error> {
        let mut assets = AssetMap::new();

        for dir in self.dirs.iter().filter(|dir| dir.is_dir()) {
            for entry in DirWalker::new(dir).walk() {
                let path = entry.into_path();
                let logical_path = path.strip_prefix(dir).unwrap_or(&path).to_slash();

                assets
                    .entry(logical_path)
                    .or_insert(AssetSource::File(path));
            }
        }

        Ok(assets)
    }

    fn find(&self, path: &str) -> Result<Option<AssetSource>, Error> {
        let relative = Path::new(path);

        let is_relative = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_) | Component::CurDir));

        if !is_relative {
            return Ok(None);
        }

        Ok(self
            .dirs
            .iter()
            .map(|dir| dir.join(relative))
            .find(|path| path.is_file())
            .map(AssetSource::File))
    }
}

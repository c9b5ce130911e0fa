//! Walk directories recursively.
//!
//! This module uses [`ignore`] under the hood.

use std::path::{Path, PathBuf};

pub use ignore::DirEntry;
use ignore::{overrides::OverrideBuilder, WalkBuilder};

use crate::error::Error;

/// A directory walker.
///
/// This walker creates a recursive directory iterator that skips hidden files
/// and yields files in file name order, so that repeated walks over the same
/// tree produce the same sequence.
pub(crate) struct DirWalker {
    /// Walked directory.
    dir: PathBuf,

    /// Builds a recursive directory iterator.
    builder: WalkBuilder,
}

impl DirWalker {
    /// Create a directory walker.
    pub(crate) fn new<P>(dir: P) -> Self
    where
        P: AsRef<Path>,
    {
        let dir = dir.as_ref();
        let mut builder = WalkBuilder::new(dir);

        builder
            .hidden(true)
            .git_ignore(false)
            .ignore(false)
            .parents(false)
            .git_global(false)
            .git_exclude(false)
            .require_git(false)
            .sort_by_file_name(|a, b| a.cmp(b));

        Self {
            dir: dir.to_owned(),
            builder,
        }
    }

    /// Only yield files whose name matches one of the gitignore-style globs.
    pub(crate) fn globs(mut self, globs: &[&str]) -> Result<Self, Error> {
        let to_error = |source| Error::Walk {
            path: self.dir.clone(),
            source,
        };

        let mut overrides = OverrideBuilder::new(&self.dir);

        for glob in globs {
            overrides.add(glob).map_err(to_error)?;
        }

        let overrides = overrides.build().map_err(to_error)?;

        self.builder.overrides(overrides);

        Ok(self)
    }

    /// Return an iterator that yields only (valid) files.
    pub(crate) fn walk(&self) -> impl Iterator<Item = DirEntry> {
        self.builder
            .build()
            .filter_map(|result| result.ok())
            .filter(|entry| {
                entry
                    .file_type()
                    .is_some_and(|file_type| file_type.is_file())
            })
    }

    /// Return the immediate sub-directories, in name order.
    ///
    /// Hidden directories are skipped. Fails if the directory or one of its
    /// entries cannot be read.
    pub(crate) fn sub_dirs(&self) -> Result<Vec<PathBuf>, Error> {
        let mut builder = self.builder.clone();
        builder.max_depth(Some(1));

        builder
            .build()
            .filter_map(|result| match result {
                Ok(entry) => (entry.depth() == 1
                    && entry
                        .file_type()
                        .is_some_and(|file_type| file_type.is_dir()))
                .then(|| Ok(entry.into_path())),
                Err(source) => Some(Err(Error::Walk {
                    path: self.dir.clone(),
                    source,
                })),
            })
            .collect()
    }

    /// Return the first file yielded by the walk, if any.
    pub(crate) fn first(&self) -> Option<PathBuf> {
        self.walk().next().map(DirEntry::into_path)
    }
}

//! Utility functions for paths.

use std::path::{Component, Path, PathBuf};

/// Extend [`std::path::Path`] with utility methods.
pub(crate) trait PathExt {
    /// Normalize the path by removing unnecessary separators and `.` and `..`
    /// components.
    ///
    /// This method calls [`normalize_path`] under the hood.
    fn normalize(&self) -> PathBuf;

    /// Join components with forward slashes.
    ///
    /// Logical static paths and SASS `@import` URLs both want `/`.
    fn to_slash(&self) -> String;
}

impl<T> PathExt for T
where
    T: AsRef<Path>,
{
    fn normalize(&self) -> PathBuf {
        self::normalize_path(self)
    }

    fn to_slash(&self) -> String {
        let path = self.as_ref();
        let mut result = String::new();

        for component in path.components() {
            match component {
                Component::RootDir => result.push('/'),
                Component::Prefix(prefix) => {
                    result.push_str(&prefix.as_os_str().to_string_lossy())
                },
                _ => {
                    if !result.is_empty() && !result.ends_with('/') {
                        result.push('/');
                    }
                    result.push_str(&component.as_os_str().to_string_lossy());
                },
            }
        }

        result
    }
}

/// Normalize a path by removing unnecessary separators and `.` and `..`
/// components.
///
/// Unlike [`std::fs::canonicalize`], symbolic links are not resolved and the
/// path does not need to exist.
pub(crate) fn normalize_path<P>(path: P) -> PathBuf
where
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if path.as_os_str().is_empty() {
        return PathBuf::from(Component::CurDir.as_os_str());
    }

    let has_root = path.has_root();
    let mut result: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::Prefix(..) | Component::RootDir | Component::Normal(_) => {
                result.push(component);
            },
            Component::ParentDir => {
                let can_pop = matches!(result.last(), Some(Component::Normal(_)));
                if can_pop {
                    result.pop();
                } else if !has_root {
                    result.push(component);
                }
            },
            Component::CurDir => {},
        }
    }

    let result: PathBuf = result.into_iter().collect();

    if result.as_os_str().is_empty() {
        return PathBuf::from(Component::CurDir.as_os_str());
    }

    result
}

/// Return what follows the first `static/` segment of a path.
///
/// Returns `None` if the path has no `static` directory component.
pub(crate) fn after_static_segment(path: &str) -> Option<&str> {
    let path = path.trim_start_matches("./");

    if let Some(rest) = path.strip_prefix("static/") {
        return Some(rest);
    }

    path.split_once("/static/").map(|(_, rest)| rest)
}

//! Static file finders.
//!
//! A finder answers two questions asked by the collection step: which static
//! files can it provide ([`Finder::list`]), and where are the bytes of a given
//! one ([`Finder::find`]). Finders are chained; the first one providing a path
//! wins.

pub mod bulma;
pub(crate) mod css_variables;
pub(crate) mod custom_scss;
pub mod extension;
pub mod file_system;
pub(crate) mod framework;
pub(crate) mod scss;
pub(crate) mod theme;

use std::{collections::BTreeMap, path::PathBuf};

pub use self::{bulma::BulmaFinder, extension::Extension, file_system::FileSystemFinder};
use crate::error::Error;

/// Map from logical static path to its source.
pub type AssetMap = BTreeMap<String, AssetSource>;

/// Source of a static file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    /// An existing file, by absolute path.
    File(PathBuf),
    /// Compiled content held in memory.
    Buffer(String),
}

impl AssetSource {
    /// Return the file path, if this is a file.
    pub fn as_path(&self) -> Option<&std::path::Path> {
        match self {
            Self::File(path) => Some(path),
            Self::Buffer(_) => None,
        }
    }
}

/// A static file finder.
pub trait Finder {
    /// List every static file this finder provides.
    fn list(&self) -> Result<AssetMap, Error>;

    /// Resolve a logical static path.
    ///
    /// Returns `Ok(None)` if this finder does not provide the path.
    fn find(&self, path: &str) -> Result<Option<AssetSource>, Error>;
}

/// List every static file of a chain of finders.
///
/// When several finders provide the same path, the first one wins.
pub fn list_all(finders: &[Box<dyn Finder>]) -> Result<AssetMap, Error> {
    let mut assets = AssetMap::new();

    for finder in finders {
        for (path, source) in finder.list()? {
            assets.entry(path).or_insert(source);
        }
    }

    Ok(assets)
}

/// Resolve a logical static path against a chain of finders.
pub fn find_first(finders: &[Box<dyn Finder>], path: &str) -> Result<Option<AssetSource>, Error> {
    for finder in finders {
        if let Some(source) = finder.find(path)? {
            return Ok(Some(source));
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::{AssetMap, AssetSource, Finder};
    use crate::error::Error;

    struct Fixed(AssetMap);

    impl Finder for Fixed {
        fn list(&self) -> Result<AssetMap, Error> {
            Ok(self.0.clone())
        }

        fn find(&self, path: &str) -> Result<Option<AssetSource>, Error> {
            Ok(self.0.get(path).cloned())
        }
    }

    fn fixed(entries: &[(&str, &str)]) -> Box<dyn Finder> {
        Box::new(Fixed(
            entries
                .iter()
                .map(|(path, content)| (path.to_string(), AssetSource::Buffer(content.to_string())))
                .collect(),
        ))
    }

    #[test]
    fn first_finder_wins() {
        let finders = vec![
            fixed(&[("css/bulma.css", "first")]),
            fixed(&[("css/bulma.css", "second"), ("js/app.js", "app")]),
        ];

        let assets = super::list_all(&finders).unwrap();

        assert_eq!(assets.len(), 2);
        assert_eq!(
            assets["css/bulma.css"],
            AssetSource::Buffer("first".to_owned())
        );

        let found = super::find_first(&finders, "js/app.js").unwrap();
        assert_eq!(found, Some(AssetSource::Buffer("app".to_owned())));

        let missing = super::find_first(&finders, "js/missing.js").unwrap();
        assert_eq!(missing, None);
    }
}

//! Find compiled Bulma stylesheets and extension assets.

use std::{
    collections::{btree_map::Entry, BTreeMap},
    sync::{Mutex, MutexGuard, PoisonError},
};

use super::{
    custom_scss,
    extension,
    framework::Framework,
    scss::ScssCompiler,
    theme, AssetMap, AssetSource, FileSystemFinder, Finder,
};
use crate::{config::Config, error::Error};

/// Finder compiling Bulma themes and custom SCSS, and publishing the
/// pre-built assets of enabled extensions.
///
/// Stylesheets are compiled by [`Finder::list`]. The last listing is cached
/// and answers [`Finder::find`].
pub struct BulmaFinder {
    config: Config,

    /// Finders resolving custom SCSS paths.
    other_finders: Vec<Box<dyn Finder>>,

    listing: Mutex<Option<AssetMap>>,
}

impl BulmaFinder {
    /// Create a finder resolving custom SCSS through the static directories.
    pub fn new(config: &Config) -> Self {
        let other_finders: Vec<Box<dyn Finder>> = vec![Box::new(FileSystemFinder::new(
            config.static_dirs.clone(),
        ))];

        Self::with_finders(config, other_finders)
    }

    /// Create a finder resolving custom SCSS through the given finders.
    pub fn with_finders(config: &Config, other_finders: Vec<Box<dyn Finder>>) -> Self {
        Self {
            config: config.clone(),
            other_finders,
            listing: Mutex::new(None),
        }
    }

    fn cache(&self) -> MutexGuard<'_, Option<AssetMap>> {
        self.listing.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Compile every stylesheet and gather every asset.
    fn compile(&self) -> Result<AssetMap, Error> {
        let settings = &self.config.bulma;

        let framework = Framework::load(&self.config)?;
        let extensions = extension::discover(&self.config)?;
        let compiler = ScssCompiler::new(settings.output_style);

        let mut listing = Listing::default();

        for (name, variables) in settings.themes() {
            let output_path = theme::output_path(name);
            tracing::info!("Compile {:?}", output_path);

            let css = theme::compile(&compiler, name, variables, &framework, &extensions)?;
            let origin = if name.is_empty() {
                String::from("the default theme")
            } else {
                format!("theme {name:?}")
            };
            listing.insert(output_path, AssetSource::Buffer(css), origin)?;
        }

        for path in &settings.custom_scss {
            let custom = custom_scss::resolve(&self.config, &self.other_finders, path)?;
            let output_path = custom.output_path();
            tracing::info!("Compile {:?} to {:?}", custom.source, output_path);

            let css = compiler.compile_file(&custom.source)?;
            listing.insert(
                output_path,
                AssetSource::Buffer(css),
                format!("custom SCSS {path:?}"),
            )?;
        }

        for extension in &extensions {
            for asset in extension.assets() {
                listing.insert(
                    extension::logical_path(&self.config, asset),
                    AssetSource::File(asset.to_owned()),
                    format!("extension {:?}", extension.name),
                )?;
            }
        }

        Ok(listing.assets)
    }
}

/// Assets being listed, with what provides each of them.
#[derive(Default)]
struct Listing {
    assets: AssetMap,
    origins: BTreeMap<String, String>,
}

impl Listing {
    /// Add an asset, failing if its logical path is already provided.
    fn insert(
        &mut self,
        logical_path: String,
        source: AssetSource,
        origin: String,
    ) -> Result<(), Error> {
        match self.assets.entry(logical_path) {
            Entry::Vacant(entry) => {
                self.origins.insert(entry.key().clone(), origin);
                entry.insert(source);
                Ok(())
            },
            Entry::Occupied(entry) => {
                let first = self
                    .origins
                    .get(entry.key())
                    .map(String::as_str)
                    .unwrap_or("another source");
                Err(Error::config(
                    "custom_scss",
                    format!(
                        "{:?} is provided by both {first} and {origin}",
                        entry.key()
                    ),
                ))
            },
        }
    }
}

impl Finder for BulmaFinder {
    fn list(&self) -> Result<AssetMap, Error> {
        let assets = self.compile()?;
        *self.cache() = Some(assets.clone());
        Ok(assets)
    }

    fn find(&self, path: &str) -> Result<Option<AssetSource>, Error> {
        let mut cache = self.cache();

        if cache.is_none() {
            *cache = Some(self.compile()?);
        }

        Ok(cache.as_ref().and_then(|assets| assets.get(path)).cloned())
    }
}

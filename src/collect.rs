//! Collect static files into the static root.

use std::path::Path;

use crate::{
    config::Config,
    error::Error,
    finder::{list_all, AssetSource, BulmaFinder, FileSystemFinder, Finder},
};

/// Return the finder chain of a configuration.
///
/// Static directories come first, so that a project file shadows a generated
/// one with the same logical path.
pub fn finders(config: &Config) -> Vec<Box<dyn Finder>> {
    vec![
        Box::new(FileSystemFinder::new(config.static_dirs.clone())),
        Box::new(BulmaFinder::new(config)),
    ]
}

/// Collect every static file of a configuration into its static root.
///
/// Returns the number of files written.
pub fn collect(config: &Config) -> Result<usize, Error> {
    collect_into(&finders(config), &config.static_root)
}

/// Collect every static file of a finder chain into a directory.
///
/// Every finder is listed before anything is written, so a failing finder
/// leaves the directory untouched.
pub fn collect_into(finders: &[Box<dyn Finder>], static_root: &Path) -> Result<usize, Error> {
    let assets = list_all(finders)?;

    for (logical_path, source) in &assets {
        let output_path = static_root.join(logical_path);

        if let Some(output_dir) = output_path.parent() {
            std::fs::create_dir_all(output_dir).map_err(|source| Error::Write {
                path: output_dir.to_owned(),
                source,
            })?;
        }

        match source {
            AssetSource::File(input_path) => {
                tracing::info!("Copy {:?} to {:?}", input_path, output_path);
                std::fs::copy(input_path, &output_path).map_err(|source| Error::Write {
                    path: output_path.to_owned(),
                    source,
                })?;
            },
            AssetSource::Buffer(content) => {
                tracing::info!("Write {:?}", output_path);
                std::fs::write(&output_path, content).map_err(|source| Error::Write {
                    path: output_path.to_owned(),
                    source,
                })?;
            },
        }
    }

    Ok(assets.len())
}

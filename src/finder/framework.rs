//! Locate the vendored framework sources.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{config::Config, error::Error, util::walk::DirWalker};

/// The vendored framework.
#[derive(Debug)]
pub(crate) struct Framework {
    /// SASS module directories, `utilities` first, then in name order.
    ///
    /// Each entry is the path to import: the `_all` file of the directory
    /// when it has one, the directory itself (its index) otherwise.
    pub(crate) modules: Vec<PathBuf>,

    /// Major version declared by `package.json`, if any.
    pub(crate) major_version: Option<u64>,
}

#[derive(Deserialize)]
struct PackageJson {
    version: String,
}

impl Framework {
    /// Read the framework layout from the vendor directory.
    pub(crate) fn load(config: &Config) -> Result<Self, Error> {
        let sass_dir = config.bulma_sass_dir();

        let mut dirs = DirWalker::new(&sass_dir).sub_dirs()?;

        dirs.sort_by(|a, b| {
            let is_utilities =
                |path: &Path| path.file_name().is_some_and(|name| name == "utilities");
            is_utilities(b.as_path())
                .cmp(&is_utilities(a.as_path()))
                .then_with(|| a.cmp(b))
        });

        let modules = dirs.into_iter().map(module_import).collect();

        let major_version = read_major_version(&config.vendor_dir.join("bulma").join("package.json"));

        Ok(Self {
            modules,
            major_version,
        })
    }

    /// Return whether the framework configures itself with CSS custom
    /// properties (version 1 and later).
    pub(crate) fn uses_css_variables(&self) -> bool {
        self.major_version.is_some_and(|major| major >= 1)
    }
}

/// Return the path to `@import` for a module directory.
fn module_import(dir: PathBuf) -> PathBuf {
    let all = dir.join("_all");

    if ["sass", "scss"]
        .iter()
        .any(|extension| all.with_extension(extension).is_file())
    {
        all
    } else {
        dir
    }
}

/// Read the major version of a `package.json` file.
fn read_major_version(path: &Path) -> Option<u64> {
    let content = std::fs::read_to_string(path).ok()?;

    let package: PackageJson = match serde_json::from_str(&content) {
        Ok(package) => package,
        Err(error) => {
            tracing::warn!("Ignoring {:?}: {}", path, error);
            return None;
        },
    };

    package
        .version
        .trim_start_matches('v')
        .split('.')
        .next()?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use assert_fs::prelude::*;

    use super::Framework;
    use crate::config::Config;

    fn config(dir: &assert_fs::TempDir) -> Config {
        Config {
            vendor_dir: dir.path().to_owned(),
            ..Default::default()
        }
    }

    #[test]
    fn modules_utilities_first() {
        let dir = assert_fs::TempDir::new().unwrap();
        dir.child("bulma/sass/base/_all.sass").touch().unwrap();
        dir.child("bulma/sass/utilities/_all.sass").touch().unwrap();
        dir.child("bulma/sass/elements/_all.scss").touch().unwrap();
        dir.child("bulma/sass/themes/_index.scss").touch().unwrap();
        dir.child("bulma/sass/_loose.scss").touch().unwrap();
        dir.child("bulma/sass/.cache/_all.scss").touch().unwrap();

        let framework = Framework::load(&config(&dir)).unwrap();
        let sass_dir = dir.path().join("bulma/sass");

        assert_eq!(
            framework.modules,
            vec![
                sass_dir.join("utilities/_all"),
                sass_dir.join("base/_all"),
                sass_dir.join("elements/_all"),
                sass_dir.join("themes"),
            ]
        );
        assert_eq!(framework.major_version, None);
        assert!(!framework.uses_css_variables());
    }

    #[test]
    fn major_version() {
        const CASES: [(&str, Option<u64>); 4] = [
            (r#"{"name": "bulma", "version": "1.0.4"}"#, Some(1)),
            (r#"{"name": "bulma", "version": "0.9.4"}"#, Some(0)),
            (r#"{"name": "bulma", "version": "v2.1.0"}"#, Some(2)),
            (r#"{"name": "bulma"}"#, None),
        ];

        for (input, expected) in CASES {
            let dir = assert_fs::TempDir::new().unwrap();
            dir.child("bulma/sass/utilities/_all.sass").touch().unwrap();
            dir.child("bulma/package.json").write_str(input).unwrap();

            let result = Framework::load(&config(&dir)).unwrap().major_version;
            assert_eq!(
                result, expected,
                "\nmajor_version({input:?}) expected {expected:?} but received {result:?}"
            );
        }
    }

    #[test]
    fn missing_sources() {
        let dir = assert_fs::TempDir::new().unwrap();

        let error = Framework::load(&config(&dir)).unwrap_err();

        assert!(error.to_string().contains("sass"));
    }
}

//! Configure the Bulma finder.
//!
//! Configuration is an explicit [`Config`] value passed to every entry point.
//! It can be built in code or loaded from a TOML, YAML or JSON file.

pub(crate) mod json;
pub(crate) mod toml;
pub(crate) mod yaml;

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::{cli::Opts, error::Error, util::path::PathExt};

/// Name of the default theme.
pub const DEFAULT_THEME: &str = "";

/// Configuration file names looked up when none is given.
const CONFIG_FILE_NAMES: [&str; 4] = ["bulma.toml", "bulma.yaml", "bulma.yml", "bulma.json"];

/// Captures the theme name before `_variables`.
static THEME_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<name>\w+)_variables$").expect("valid regex"));

/// SASS variable overrides, in declaration order.
pub type Variables = IndexMap<String, String>;

/// Host-level configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory against which relative paths are resolved.
    pub base_dir: PathBuf,

    /// Directory of vendored sources (`bulma/sass` and `extensions`).
    pub vendor_dir: PathBuf,

    /// Static directories searched for custom SCSS and collected as-is.
    pub static_dirs: Vec<PathBuf>,

    /// Directory receiving collected static files.
    pub static_root: PathBuf,

    /// URL prefix of static files.
    pub static_url: String,

    /// Bulma settings.
    pub bulma: Settings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            vendor_dir: PathBuf::from("vendor"),
            static_dirs: Vec::new(),
            static_root: PathBuf::from("static"),
            static_url: String::from("/static/"),
            bulma: Settings::default(),
        }
    }
}

/// Bulma settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Enabled extensions.
    pub extensions: Extensions,

    /// Themes, keyed by name. The default theme is [`DEFAULT_THEME`].
    pub themes: IndexMap<String, Variables>,

    /// Output style of compiled stylesheets.
    pub output_style: OutputStyle,

    /// Font Awesome kit token.
    pub fontawesome_token: Option<String>,

    /// Custom SCSS files to compile.
    pub custom_scss: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            extensions: Extensions::None,
            themes: IndexMap::from([(DEFAULT_THEME.to_owned(), Variables::new())]),
            output_style: OutputStyle::default(),
            fontawesome_token: None,
            custom_scss: Vec::new(),
        }
    }
}

impl Settings {
    /// Iterate over themes, the default one first.
    pub fn themes(&self) -> impl Iterator<Item = (&str, &Variables)> {
        self.themes
            .iter()
            .map(|(name, variables)| (name.as_str(), variables))
    }

    /// Return whether a theme is defined.
    pub fn has_theme(&self, name: &str) -> bool {
        self.themes.contains_key(name)
    }
}

/// Set of enabled extensions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Extensions {
    /// No extension.
    #[default]
    None,
    /// Every extension found in the vendor directory.
    All,
    /// Named extensions.
    Explicit(BTreeSet<String>),
}

impl Extensions {
    /// Return whether an extension is enabled.
    pub fn is_enabled(&self, name: &str) -> bool {
        match self {
            Self::None => false,
            Self::All => true,
            Self::Explicit(names) => names.contains(name),
        }
    }
}

/// Output style of compiled stylesheets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    /// Nested (rendered expanded).
    #[default]
    Nested,
    /// Expanded.
    Expanded,
    /// Compact (rendered expanded).
    Compact,
    /// Compressed.
    Compressed,
}

/// Configuration as written in a file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct PartialConfig {
    pub(crate) vendor_dir: Option<PathBuf>,
    pub(crate) static_dirs: Option<Vec<PathBuf>>,
    pub(crate) static_root: Option<PathBuf>,
    pub(crate) static_url: Option<String>,
    pub(crate) bulma: Option<PartialSettings>,
}

/// Bulma settings as written in a file.
///
/// Theme keys are open-ended, so they are collected in `rest` and validated
/// by [`Settings::try_from`].
#[derive(Debug, Default, Deserialize)]
pub(crate) struct PartialSettings {
    #[serde(default)]
    pub(crate) extensions: Option<ExtensionsValue>,
    #[serde(default)]
    pub(crate) output_style: Option<OutputStyle>,
    #[serde(default)]
    pub(crate) fontawesome_token: Option<String>,
    #[serde(default)]
    pub(crate) custom_scss: Vec<String>,
    #[serde(flatten)]
    pub(crate) rest: IndexMap<String, RawValue>,
}

/// Wire form of [`Extensions`].
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ExtensionsValue {
    List(Vec<String>),
    Name(String),
}

/// Any other settings value.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawValue {
    Table(IndexMap<String, serde_json::Value>),
    Other(serde_json::Value),
}

impl TryFrom<ExtensionsValue> for Extensions {
    type Error = Error;

    fn try_from(value: ExtensionsValue) -> Result<Self, Self::Error> {
        match value {
            ExtensionsValue::Name(name) if name == "all" => Ok(Self::All),
            ExtensionsValue::Name(name) => Err(Error::config(
                "extensions",
                format!("expected \"all\" or a list of names, found {name:?}"),
            )),
            ExtensionsValue::List(names) => Ok(Self::Explicit(names.into_iter().collect())),
        }
    }
}

impl TryFrom<PartialSettings> for Settings {
    type Error = Error;

    fn try_from(partial: PartialSettings) -> Result<Self, Self::Error> {
        let mut themes = IndexMap::from([(DEFAULT_THEME.to_owned(), Variables::new())]);

        for (key, value) in partial.rest {
            let name = if key == "variables" {
                DEFAULT_THEME.to_owned()
            } else if let Some(captures) = THEME_KEY_RE.captures(&key) {
                captures["name"].to_owned()
            } else {
                tracing::warn!("Ignoring unknown setting {:?}", key);
                continue;
            };

            let table = match value {
                RawValue::Table(table) => table,
                RawValue::Other(value) => {
                    return Err(Error::config(
                        key,
                        format!("expected a table of SASS variables, found {value}"),
                    ))
                },
            };

            let variables = table
                .into_iter()
                .map(|(variable, value)| {
                    let value = match value {
                        serde_json::Value::String(value) => value,
                        serde_json::Value::Number(value) => value.to_string(),
                        serde_json::Value::Bool(value) => value.to_string(),
                        _ => {
                            return Err(Error::config(
                                format!("{key}.{variable}"),
                                "expected a string, number or boolean",
                            ))
                        },
                    };
                    Ok((variable, value))
                })
                .collect::<Result<Variables, _>>()?;

            themes.insert(name, variables);
        }

        Ok(Self {
            extensions: partial
                .extensions
                .map(Extensions::try_from)
                .transpose()?
                .unwrap_or_default(),
            themes,
            output_style: partial.output_style.unwrap_or_default(),
            fontawesome_token: partial.fontawesome_token.filter(|token| !token.is_empty()),
            custom_scss: partial.custom_scss,
        })
    }
}

impl Config {
    /// Create a configuration from command line options.
    ///
    /// Reads the configuration file given by `--config`, or the first of
    /// `bulma.toml`, `bulma.yaml`, `bulma.yml`, `bulma.json` found in the
    /// current directory. Command line options take precedence.
    pub fn from_opts(opts: &Opts) -> Result<Self, Error> {
        let config_path = opts.config.clone().or_else(|| {
            CONFIG_FILE_NAMES
                .into_iter()
                .map(PathBuf::from)
                .find(|path| path.exists())
        });

        let config = match config_path {
            Some(path) => {
                tracing::info!("Loading configuration from {:?}", path);
                Self::from_path(path)?
            },
            None => Self::default(),
        };

        let config = Self {
            vendor_dir: opts.vendor_dir.clone().unwrap_or(config.vendor_dir),
            static_root: opts.static_root.clone().unwrap_or(config.static_root),
            ..config
        };

        let config = config.normalize()?;

        config.check()?;

        Ok(config)
    }

    /// Load a configuration file.
    ///
    /// The format is chosen by file extension. Relative paths are resolved
    /// against the directory of the file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();

        let partial = match path.extension().and_then(|extension| extension.to_str()) {
            Some("toml") => self::toml::load_config(path),
            Some("yaml" | "yml") => self::yaml::load_config(path),
            Some("json") => self::json::load_config(path),
            _ => Err(anyhow::anyhow!("unsupported configuration format")),
        }
        .map_err(|source| Error::LoadConfig {
            config_path: path.to_owned(),
            source,
        })?;

        let base_dir = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Self::from_partial(partial, base_dir)
    }

    /// Create a configuration from file contents.
    pub(crate) fn from_partial(partial: PartialConfig, base_dir: PathBuf) -> Result<Self, Error> {
        let default = Self::default();

        Ok(Self {
            base_dir,
            vendor_dir: partial.vendor_dir.unwrap_or(default.vendor_dir),
            static_dirs: partial.static_dirs.unwrap_or(default.static_dirs),
            static_root: partial.static_root.unwrap_or(default.static_root),
            static_url: partial.static_url.unwrap_or(default.static_url),
            bulma: partial
                .bulma
                .map(Settings::try_from)
                .transpose()?
                .unwrap_or_default(),
        })
    }

    /// Normalize configuration.
    ///
    /// Make all paths absolute.
    pub fn normalize(self) -> Result<Self, Error> {
        let current_dir = std::env::current_dir().map_err(|source| Error::Read {
            path: PathBuf::from("."),
            source,
        })?;

        let base_dir = current_dir.join(&self.base_dir).normalize();

        Ok(Self {
            vendor_dir: base_dir.join(&self.vendor_dir).normalize(),
            static_dirs: self
                .static_dirs
                .iter()
                .map(|dir| base_dir.join(dir).normalize())
                .collect(),
            static_root: base_dir.join(&self.static_root).normalize(),
            base_dir,
            ..self
        })
    }

    /// Check if configuration is valid.
    pub fn check(&self) -> Result<(), Error> {
        debug_assert!(self.base_dir.is_absolute());
        debug_assert!(self.static_root.is_absolute());

        // Prevent overwriting vendored sources
        if self.vendor_dir.starts_with(&self.static_root) {
            return Err(Error::config(
                "static_root",
                "must not contain `vendor_dir`",
            ));
        }

        // Prevent overwriting collected sources
        if let Some(dir) = self
            .static_dirs
            .iter()
            .find(|dir| dir.starts_with(&self.static_root))
        {
            return Err(Error::config(
                "static_root",
                format!("must not contain static directory {dir:?}"),
            ));
        }

        Ok(())
    }

    /// Return the directory of the framework's SASS sources.
    pub fn bulma_sass_dir(&self) -> PathBuf {
        self.vendor_dir.join("bulma").join("sass")
    }

    /// Return the directory of vendored extensions.
    pub fn extensions_dir(&self) -> PathBuf {
        self.vendor_dir.join("extensions")
    }
}

#[cfg(test)]
mod tests {
    use super::{Extensions, OutputStyle, Settings, DEFAULT_THEME};

    fn settings(content: &str) -> Settings {
        let partial: super::PartialSettings = ::toml::from_str(content).unwrap();
        Settings::try_from(partial).unwrap()
    }

    #[test]
    fn defaults() {
        let settings = settings("");

        assert_eq!(settings.extensions, Extensions::None);
        assert_eq!(settings.output_style, OutputStyle::Nested);
        assert_eq!(settings.fontawesome_token, None);
        assert!(settings.custom_scss.is_empty());
        assert_eq!(settings.themes().count(), 1);
        assert!(settings.has_theme(DEFAULT_THEME));
    }

    #[test]
    fn themes() {
        let settings = settings(
            r##"
            [variables]
            primary = "#000000"
            size-1 = "6rem"

            [dark_variables]
            primary = "#333"

            [alt_variables]
            primary = "#fff"
            "##,
        );

        let names: Vec<_> = settings.themes().map(|(name, _)| name).collect();
        assert_eq!(names, ["", "dark", "alt"]);
        assert_eq!(settings.themes[DEFAULT_THEME]["primary"], "#000000");
        assert_eq!(settings.themes[DEFAULT_THEME]["size-1"], "6rem");
        assert_eq!(settings.themes["dark"]["primary"], "#333");
        assert!(settings.has_theme("alt"));
        assert!(!settings.has_theme("light"));
    }

    #[test]
    fn variables_keep_declaration_order() {
        let settings = settings(
            r##"
            [variables]
            turquoise = "#00d1b2"
            primary = "$turquoise"
            link = "$primary"
            "##,
        );

        let names: Vec<_> = settings.themes[DEFAULT_THEME].keys().collect();
        assert_eq!(names, ["turquoise", "primary", "link"]);
    }

    #[test]
    fn non_string_variables() {
        let settings = settings(
            r#"
            [variables]
            columns = 12
            rtl = true
            "#,
        );

        assert_eq!(settings.themes[DEFAULT_THEME]["columns"], "12");
        assert_eq!(settings.themes[DEFAULT_THEME]["rtl"], "true");
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let settings = settings(
            r#"
            variables_dark = { primary = "red" }
            debug = true
            "#,
        );

        assert_eq!(settings.themes().count(), 1);
    }

    #[test]
    fn invalid_theme_value() {
        let partial: super::PartialSettings =
            ::toml::from_str(r#"dark_variables = "red""#).unwrap();
        let error = Settings::try_from(partial).unwrap_err();

        let message = error.to_string();
        assert!(message.contains("dark_variables"));
        assert!(message.contains("found \"red\""));
    }

    #[test]
    fn extensions() {
        const CASES: [(&str, &str, bool); 6] = [
            (r#"extensions = "all""#, "bulma-tooltip", true),
            (r#"extensions = "all""#, "anything", true),
            (r#"extensions = ["bulma-tooltip"]"#, "bulma-tooltip", true),
            (r#"extensions = ["bulma-tooltip"]"#, "bulma-slider", false),
            (r#"extensions = []"#, "bulma-tooltip", false),
            ("", "bulma-tooltip", false),
        ];

        for (input, name, expected) in CASES {
            let result = settings(input).extensions.is_enabled(name);
            assert_eq!(
                result, expected,
                "\n{input:?}.is_enabled({name:?}) expected {expected:?} but received {result:?}"
            );
        }
    }

    #[test]
    fn extensions_sentinel_is_case_sensitive() {
        let partial: super::PartialSettings =
            ::toml::from_str(r#"extensions = "All""#).unwrap();
        let error = Settings::try_from(partial).unwrap_err();

        assert!(error.to_string().contains("\"All\""));
    }

    #[test]
    fn output_style_and_token() {
        let settings = settings(
            r#"
            output_style = "compressed"
            fontawesome_token = ""
            custom_scss = ["css/a.scss", "css/b.scss"]
            "#,
        );

        assert_eq!(settings.output_style, OutputStyle::Compressed);
        assert_eq!(settings.fontawesome_token, None);
        assert_eq!(settings.custom_scss, ["css/a.scss", "css/b.scss"]);
    }

    #[test]
    fn check_rejects_overlapping_static_root() {
        let config = super::Config {
            base_dir: "/project".into(),
            vendor_dir: "/project/static/vendor".into(),
            static_root: "/project/static".into(),
            ..Default::default()
        };

        assert!(config.check().is_err());
    }
}

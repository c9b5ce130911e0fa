//! Template directives.
//!
//! [`Tags`] renders the HTML that loads compiled themes, extension assets and
//! Font Awesome. [`register`] installs the directives in a [`minijinja`]
//! environment:
//!
//! ```jinja
//! {{ bulma() }}
//! {{ bulma("dark", include_js=false) }}
//! {{ font_awesome() }}
//! ```

use std::sync::Arc;

use minijinja::{context, value::Kwargs, Environment, Value};

use crate::{
    config::{Config, Settings, DEFAULT_THEME},
    error::Error,
    finder::{
        extension::{self, Extension},
        theme,
    },
};

/// Font Awesome release loaded when no kit token is configured.
const FONT_AWESOME_FALLBACK_URL: &str =
    "https://use.fontawesome.com/releases/v5.14.0/css/all.css";

/// Subresource integrity hash of [`FONT_AWESOME_FALLBACK_URL`].
const FONT_AWESOME_FALLBACK_INTEGRITY: &str =
    "sha384-HzLeBuhoNPvSl5KYnjx0BT+WB0QEEqLprO+NBkkk5gbc67FTaL7XIGa2w1L0Xbgc";

/// Renders template directives.
#[derive(Debug, Clone)]
pub struct Tags {
    static_url: String,
    settings: Settings,

    /// Logical paths of extension scripts.
    scripts: Vec<String>,

    /// Logical paths of extension stylesheets not compiled into themes.
    stylesheets: Vec<String>,
}

impl Tags {
    /// Create template directives for a configuration.
    pub fn new(config: &Config) -> Result<Self, Error> {
        let extensions = extension::discover(config)?;

        let logical_paths = |select: fn(&Extension) -> Option<&std::path::Path>| {
            extensions
                .iter()
                .filter_map(select)
                .map(|path| extension::logical_path(config, path))
                .collect::<Vec<_>>()
        };

        Ok(Self {
            static_url: config.static_url.clone(),
            settings: config.bulma.clone(),
            scripts: logical_paths(|extension| extension.script.as_deref()),
            stylesheets: logical_paths(Extension::linked_stylesheet),
        })
    }

    /// Render the tags loading a theme and extension assets.
    ///
    /// `None` selects the default theme. Scripts are left out unless
    /// `include_js` is set, so that a page loading several themes runs them
    /// once.
    pub fn bulma(&self, theme: Option<&str>, include_js: bool) -> String {
        let theme = match theme.unwrap_or(DEFAULT_THEME) {
            name if self.settings.has_theme(name) => name,
            name => {
                tracing::warn!("Unknown theme {:?}, using the default theme", name);
                DEFAULT_THEME
            },
        };

        let url = self.static_url(&theme::output_path(theme));
        let id = if theme.is_empty() {
            String::from("bulma-css")
        } else {
            format!("bulma-css-{theme}")
        };

        let mut html = vec![
            format!(r#"<link rel="preload" href="{url}" as="style">"#),
            format!(r#"<link rel="stylesheet" href="{url}" id="{id}">"#),
        ];

        for stylesheet in &self.stylesheets {
            let url = self.static_url(stylesheet);
            html.push(format!(r#"<link rel="stylesheet" href="{url}">"#));
        }

        if include_js {
            for script in &self.scripts {
                let url = self.static_url(script);
                html.push(format!(
                    r#"<script defer type="text/javascript" src="{url}"></script>"#
                ));
            }
        }

        html.join("\n")
    }

    /// Render the tags loading Font Awesome.
    ///
    /// Loads the configured kit, or a pinned release of version 5.
    pub fn font_awesome(&self) -> String {
        match &self.settings.fontawesome_token {
            Some(token) => {
                let url = format!("https://kit.fontawesome.com/{token}.js");
                [
                    format!(r#"<link rel="preload" href="{url}" as="script">"#),
                    format!(r#"<script defer src="{url}" crossorigin="anonymous"></script>"#),
                ]
                .join("\n")
            },
            None => [
                format!(r#"<link rel="preload" href="{FONT_AWESOME_FALLBACK_URL}" as="style">"#),
                format!(
                    r#"<link rel="stylesheet" href="{FONT_AWESOME_FALLBACK_URL}" integrity="{FONT_AWESOME_FALLBACK_INTEGRITY}" crossorigin="anonymous">"#
                ),
            ]
            .join("\n"),
        }
    }

    /// Return the URL of a static file.
    fn static_url(&self, path: &str) -> String {
        format!("{}/{}", self.static_url.trim_end_matches('/'), path)
    }
}

/// Install `bulma` and `font_awesome` functions in a template environment.
pub fn register(env: &mut Environment<'_>, tags: Tags) {
    let tags = Arc::new(tags);

    let bulma_tags = Arc::clone(&tags);
    env.add_function(
        "bulma",
        move |theme: Option<String>, kwargs: Kwargs| -> Result<Value, minijinja::Error> {
            let include_js = kwargs.get::<Option<bool>>("include_js")?.unwrap_or(true);
            kwargs.assert_all_used()?;

            Ok(Value::from_safe_string(
                bulma_tags.bulma(theme.as_deref(), include_js),
            ))
        },
    );

    env.add_function("font_awesome", move || -> Value {
        Value::from_safe_string(tags.font_awesome())
    });
}

/// Render a template string with the directives installed.
pub fn render(config: &Config, source: &str) -> Result<String, Error> {
    let mut env = Environment::new();
    register(&mut env, Tags::new(config)?);

    Ok(env.render_str(source, context! {})?)
}

#[cfg(test)]
mod tests {
    use assert_fs::prelude::*;

    use super::Tags;
    use crate::config::{Config, Extensions, Variables};

    fn config(dir: &assert_fs::TempDir) -> Config {
        dir.child("extensions/bulma-calendar/dist/js/bulma-calendar.min.js")
            .touch()
            .unwrap();
        dir.child("extensions/bulma-tooltip/dist/css/bulma-tooltip.min.css")
            .touch()
            .unwrap();
        dir.child("extensions/bulma-slider/dist/css/bulma-slider.min.css")
            .touch()
            .unwrap();
        dir.child("extensions/bulma-slider/src/sass/index.sass")
            .touch()
            .unwrap();

        let mut config = Config {
            vendor_dir: dir.path().to_owned(),
            ..Default::default()
        };
        config.bulma.extensions = Extensions::All;
        config
            .bulma
            .themes
            .insert("dark".to_owned(), Variables::new());
        config
    }

    #[test]
    fn bulma() {
        let dir = assert_fs::TempDir::new().unwrap();
        let tags = Tags::new(&config(&dir)).unwrap();

        assert_eq!(
            tags.bulma(None, true),
            concat!(
                r#"<link rel="preload" href="/static/css/bulma.css" as="style">"#,
                "\n",
                r#"<link rel="stylesheet" href="/static/css/bulma.css" id="bulma-css">"#,
                "\n",
                r#"<link rel="stylesheet" href="/static/extensions/bulma-tooltip/dist/css/bulma-tooltip.min.css">"#,
                "\n",
                r#"<script defer type="text/javascript" src="/static/extensions/bulma-calendar/dist/js/bulma-calendar.min.js"></script>"#,
            )
        );
    }

    #[test]
    fn bulma_theme_without_js() {
        let dir = assert_fs::TempDir::new().unwrap();
        let tags = Tags::new(&config(&dir)).unwrap();

        let html = tags.bulma(Some("dark"), false);

        assert!(html.contains(r#"href="/static/css/bulma_dark.css" id="bulma-css-dark""#));
        assert!(html.contains("bulma-tooltip.min.css"));
        assert!(!html.contains("<script"));
    }

    #[test]
    fn bulma_unknown_theme() {
        let dir = assert_fs::TempDir::new().unwrap();
        let tags = Tags::new(&config(&dir)).unwrap();

        assert_eq!(tags.bulma(Some("missing"), true), tags.bulma(None, true));
    }

    #[test]
    fn font_awesome() {
        let dir = assert_fs::TempDir::new().unwrap();
        let mut config = config(&dir);

        let fallback = Tags::new(&config).unwrap().font_awesome();
        assert!(fallback.contains("v5.14.0/css/all.css"));
        assert!(fallback.contains(r#"integrity="sha384-"#));

        config.bulma.fontawesome_token = Some("abc123".to_owned());
        let kit = Tags::new(&config).unwrap().font_awesome();
        assert_eq!(
            kit,
            concat!(
                r#"<link rel="preload" href="https://kit.fontawesome.com/abc123.js" as="script">"#,
                "\n",
                r#"<script defer src="https://kit.fontawesome.com/abc123.js" crossorigin="anonymous"></script>"#,
            )
        );
    }

    #[test]
    fn render() {
        let dir = assert_fs::TempDir::new().unwrap();
        let config = config(&dir);

        let html = super::render(
            &config,
            r#"<head>{{ bulma("dark", include_js=false) }}{{ font_awesome() }}</head>"#,
        )
        .unwrap();

        assert!(html.contains(r#"<link rel="stylesheet" href="/static/css/bulma_dark.css""#));
        assert!(html.contains("use.fontawesome.com"));
        assert!(!html.contains("&lt;"));
        assert!(!html.contains("<script"));
    }

    #[test]
    fn render_rejects_unknown_arguments() {
        let dir = assert_fs::TempDir::new().unwrap();

        assert!(super::render(&config(&dir), r#"{{ bulma("dark", js=false) }}"#).is_err());
    }
}

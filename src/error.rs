//! Library errors.

use std::path::PathBuf;

/// Enumerates library errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A configuration value is malformed.
    #[error("invalid configuration value for `{key}`: {message}")]
    Config {
        /// Offending configuration key.
        key: String,
        /// What is wrong with it.
        message: String,
    },

    /// A configuration file could not be read or parsed.
    #[error("while loading configuration from {config_path:?}")]
    LoadConfig {
        /// Path of the configuration file.
        config_path: PathBuf,
        /// Underlying error.
        source: anyhow::Error,
    },

    /// A custom SCSS path could not be located.
    #[error(
        "Unable to locate the SCSS file \"{path}\" (tried: {})",
        strategies.join(", ")
    )]
    ResolveScss {
        /// Path as written in the configuration.
        path: String,
        /// Lookup strategies that were attempted.
        strategies: Vec<String>,
    },

    /// The SASS compiler rejected its input.
    ///
    /// The compiler diagnostic is kept verbatim in the message.
    #[error("failed to compile {input}\n{diagnostic}")]
    Compile {
        /// Stylesheet being compiled (theme or file).
        input: String,
        /// Compiler diagnostic.
        diagnostic: Box<grass::Error>,
    },

    /// A file could not be read.
    #[error("while reading {path:?}")]
    Read {
        /// File or directory path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// A file could not be written.
    #[error("while writing {path:?}")]
    Write {
        /// File or directory path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// A directory walk failed.
    #[error("while walking {path:?}")]
    Walk {
        /// Walked directory.
        path: PathBuf,
        /// Underlying error.
        source: ignore::Error,
    },

    /// A template could not be rendered.
    #[error("failed to render template")]
    Template(#[from] minijinja::Error),
}

impl Error {
    /// Shorthand for [`Error::Config`].
    pub(crate) fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Result type of this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

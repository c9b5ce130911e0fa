//! Command line utilities.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
pub use clap::Parser;
use clap::{Args, Subcommand};

use crate::{
    finder::{BulmaFinder, Finder},
    Config,
};

/// Command line usage description.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Subcommand.
    #[command(subcommand)]
    pub command: Command,

    /// Command line options.
    #[command(flatten)]
    pub opts: Opts,
}

/// List of commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compile themes and collect static files into the static root
    Collect,

    /// List the static files provided by the Bulma finder
    List,

    /// Print the source of a static file
    Find {
        /// Logical static path
        path: String,
    },

    /// Render a template with the `bulma` and `font_awesome` functions
    Render {
        /// Template file
        template: PathBuf,
    },
}

/// Command line options.
#[derive(Debug, Args, Clone, Default)]
pub struct Opts {
    /// Configuration file [default: "bulma.toml", "bulma.yaml", "bulma.yml" or "bulma.json"]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Vendor directory [default: "vendor"]
    #[arg(long, global = true)]
    pub vendor_dir: Option<PathBuf>,

    /// Static root directory [default: "static"]
    #[arg(long, global = true)]
    pub static_root: Option<PathBuf>,
}

/// Run the `collect` command.
pub fn collect(opts: &Opts) -> Result<()> {
    let config = Config::from_opts(opts).context("loading configuration")?;

    tracing::info!("Collecting into {:?}", config.static_root);

    let count = crate::collect(&config)?;

    println!("{count} static files collected into {:?}", config.static_root);

    Ok(())
}

/// Run the `list` command.
pub fn list(opts: &Opts) -> Result<()> {
    let config = Config::from_opts(opts).context("loading configuration")?;

    for path in BulmaFinder::new(&config).list()?.keys() {
        println!("{path}");
    }

    Ok(())
}

/// Run the `find` command.
pub fn find(opts: &Opts, path: &str) -> Result<()> {
    let config = Config::from_opts(opts).context("loading configuration")?;

    let source = BulmaFinder::new(&config)
        .find(path)?
        .with_context(|| format!("static file {path:?} not found"))?;

    match source.as_path() {
        Some(file) => println!("{}", file.display()),
        None => println!("<compiled>"),
    }

    Ok(())
}

/// Run the `render` command.
pub fn render(opts: &Opts, template: &Path) -> Result<()> {
    let config = Config::from_opts(opts).context("loading configuration")?;

    let source = std::fs::read_to_string(template)
        .with_context(|| format!("reading template {template:?}"))?;

    let html = crate::tags::render(&config, &source)
        .with_context(|| format!("rendering template {template:?}"))?;

    println!("{html}");

    Ok(())
}

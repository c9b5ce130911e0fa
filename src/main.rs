//! Compile Bulma themes and collect its extensions as static files.

use anyhow::Result;
use simple_bulma::cli::{Cli, Command, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("simple_bulma=info")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Collect => simple_bulma::cli::collect(&cli.opts)?,
        Command::List => simple_bulma::cli::list(&cli.opts)?,
        Command::Find { path } => simple_bulma::cli::find(&cli.opts, &path)?,
        Command::Render { template } => simple_bulma::cli::render(&cli.opts, &template)?,
    }

    Ok(())
}

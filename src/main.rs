mod cli;
mod error;
mod resolve;

use crate::cli::Cli;
use crate::error::ErrorKind;
use capfetch_config::Config;
use capfetch_download::HttpSource;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Logging setup; diagnostics go to stderr so stdout stays clean for
    // whatever automation invoked us.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(cli).await.map_err(|err| miette::miette!("{err:?}"))
}

async fn run(cli: Cli) -> crate::error::Result<()> {
    let config = Config::load(cli.config.as_deref()).map_err(ErrorKind::config)?;
    tracing::info!(version = %cli.version, "installing Capella");

    let source = HttpSource::new();
    resolve::run(&source, &config, &cli.version).await
}

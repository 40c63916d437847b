use anyhow::Result;
use clap::Parser;
use nutriplan::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = nutriplan::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    nutriplan::observability::init_observability(
        "nutriplan",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    nutriplan::cli::run(cli.command, config, cli.json).await
}

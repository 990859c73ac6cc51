use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};

use trellis_config::ConfigLoader;
use trellis_demo::{cli::Cli, driver::Driver};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ConfigLoader::load_or_default(cli.config.as_deref())?;

    // RUST_LOG wins over both the flags and the config file
    let level = cli.level_filter(&config.logging.level);
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        format!("trellis_core={level},trellis_config={level},trellis_demo={level},trellis={level}")
    });
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(env_filter))
        .with_writer(std::io::stderr)
        .init();

    debug!(?config, "configuration loaded");
    info!(strategy = ?config.render.strategy, "starting");

    let driver = Driver::new(&config, cli.renders, cli.print_html)
        .run(&config)
        .await?;
    info!(renders = driver.renders(), "stopped");
    Ok(())
}

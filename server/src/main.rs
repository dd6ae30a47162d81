use anyhow::Result;
use brook::validatable::Validatable;
use clap::Parser;
use server::args::Args;
use server::configs::config_provider::FileConfigProvider;
use server::log::logger::Logging;
use server::server::BrookServer;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config_provider = match args.config {
        Some(path) => FileConfigProvider::new(path),
        None => FileConfigProvider::from_env(),
    };
    let mut config = config_provider.load_config()?;
    if let Some(address) = args.address {
        config.tcp.address = address;
    }

    let mut logging = Logging::new();
    logging.init(&config.system.logging)?;
    config.validate()?;
    info!("Starting Brook server, config: {config}");

    let mut server = BrookServer::new(config);
    let address = server.start().await?;
    info!("Brook server is listening on: {address}, press Ctrl+C to stop.");

    tokio::signal::ctrl_c().await?;
    info!("Received Ctrl+C, shutting down...");
    server.shutdown().await;
    Ok(())
}

//! rent-a-game server binary.

use clap::Parser;
use rent_a_game::config::{Config, ServerArgs};
use rent_a_game::server::Server;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = ServerArgs::parse();

    // Load configuration before opening any socket; config errors are fatal.
    let config = Config::load(&args)?;

    // Initialize logging: environment filter first, config value as fallback.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!(
        port = %config.port,
        protocol = ?args.protocol,
        "Starting rent-a-game server"
    );

    let server = Server::bind(&config)?;
    info!(address = %server.local_addr()?, "Server listening");

    server.run().await?;
    Ok(())
}

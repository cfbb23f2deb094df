//! # Chat Server
//!
//! Binary entry point. Initializes:
//! - Tracing/logging subsystem
//! - Configuration loading
//! - Storage backend and crypto services
//! - The connection acceptor

use anyhow::Result;
use tracing::info;

use chat_server::config::Settings;
use chat_server::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for structured logging
    chat_server::telemetry::init_tracing();

    info!("Starting Chat Server...");

    // Load configuration from environment and config files
    let settings = Settings::load()?;
    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        max_connections = settings.server.max_connections,
        storage = ?settings.storage.backend,
        environment = %settings.environment,
        "Configuration loaded"
    );

    let application = Application::build(settings).await?;

    info!(addr = %application.local_addr(), "Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}

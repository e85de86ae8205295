//! door-simulator entry point.
//!
//! Connects to the configured door resource, runs the operator console
//! loop, and always closes the connection on the way out.

use tracing_subscriber::EnvFilter;

use door_simulator::config::SimulatorConfig;
use door_simulator::console;
use door_simulator::ws::DoorConnection;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = SimulatorConfig::from_env()?;
    tracing::info!(url = %config.ws_url(), "starting door-simulator");

    // Connect; no retry on failure, exit cleanly after logging
    let connection = match DoorConnection::connect(&config).await {
        Ok(connection) => connection,
        Err(e) => {
            tracing::error!(error = %e, "failed to connect");
            return Ok(());
        }
    };

    // Operator loop runs until exit, interrupt, or stdin EOF
    if let Err(e) = console::run(&connection, config.menu_interval()).await {
        tracing::error!(error = %e, "console loop failed");
    }

    // Teardown: close exactly once on every exit path
    connection.close().await;
    tracing::info!("door-simulator stopped");

    Ok(())
}

//! Letter Counter MCP server entry point.
//!
//! Initializes logging, loads configuration, and serves the `letter_counter`
//! tool over the configured transport (stdio by default).

use anyhow::Result;
use tracing::info;

use letter_counter::core::{Config, McpServer, TransportService};
use letter_counter::logging;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    logging::init(&config.logging.level);

    config.validate()?;

    info!("Starting {} v{}", config.server.name, config.server.version);

    let transport = TransportService::new(config.transport.clone());
    let server = McpServer::new(config);

    info!(
        "Server initialized with tools: {:?}",
        server.registry().tool_names()
    );

    transport.run(server).await?;

    info!("Server shutting down");

    Ok(())
}

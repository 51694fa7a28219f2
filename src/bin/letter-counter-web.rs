//! Web UI entry point.
//!
//! Serves the counter form; every submission spawns (or attaches to) the
//! server configured for the client.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use letter_counter::client::ClientConfig;
use letter_counter::logging;
use letter_counter::web::{self, WebConfig, WebState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let level = std::env::var("MCP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    logging::init(&level);

    // A missing server location is reported before the UI starts.
    let client_config = ClientConfig::from_env()?;
    info!("Counting through {}", client_config.location.describe());

    let web_config = WebConfig::from_env();
    let state = WebState::new(Arc::new(client_config));
    web::serve(&web_config, state).await?;

    Ok(())
}

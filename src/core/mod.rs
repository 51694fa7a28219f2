//! Core module containing shared server infrastructure.
//!
//! This module provides error handling, configuration, the MCP server handler
//! and the transport layer.

pub mod config;
pub mod error;
pub mod server;
pub mod transport;

pub use config::Config;
pub use error::{Error, Result};
pub use server::McpServer;
pub use transport::{TransportConfig, TransportService};

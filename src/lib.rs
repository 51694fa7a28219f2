//! Letter Counter MCP
//!
//! An MCP server exposing a single `letter_counter` tool, plus the client and
//! web UI that invoke it.
//!
//! # Architecture
//!
//! - **core**: server configuration, error handling, the MCP handler and its
//!   transports (stdio, tcp, http)
//! - **domains**: the tools themselves, one file per tool
//! - **client**: one connect → list → call → disconnect session against the
//!   server, spawned as a child process or reached over TCP
//! - **web** (feature `http`): an HTML form wrapping the client
//! - **logging**: tracing subscriber setup shared by all binaries
//!
//! # Example
//!
//! ```rust,no_run
//! use letter_counter::client::{ClientConfig, run_session};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ClientConfig::from_env()?;
//!     let outcome = run_session(&config, "Strawberry", "r").await?;
//!     println!("{}", outcome.count);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod core;
pub mod domains;
pub mod logging;

#[cfg(feature = "http")]
pub mod web;

pub use core::{Config, Error, McpServer, Result};

//! Client configuration: where the server lives and how long to wait.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use super::error::{ClientError, ClientResult};

/// Program to spawn as the server, speaking MCP over its stdio.
pub const SERVER_PATH_VAR: &str = "SERVER_PATH";

/// Extra whitespace-separated arguments for the spawned server.
pub const SERVER_ARGS_VAR: &str = "SERVER_ARGS";

/// `host:port` of a server already listening on TCP.
pub const SERVER_ADDR_VAR: &str = "SERVER_ADDR";

/// Optional per-call limit in seconds.
pub const TIMEOUT_VAR: &str = "LETTER_COUNTER_TIMEOUT_SECS";

/// How the client reaches the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceLocation {
    /// Spawn `program` and talk to it over stdin/stdout.
    Spawn { program: PathBuf, args: Vec<String> },

    /// Attach to a server listening on this address.
    Tcp(String),
}

impl ServiceLocation {
    /// Short description for logs and error messages.
    pub fn describe(&self) -> String {
        match self {
            Self::Spawn { program, .. } => format!("child process {}", program.display()),
            Self::Tcp(addr) => format!("tcp://{}", addr),
        }
    }
}

/// Everything a session needs to know before it starts.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Where the server is.
    pub location: ServiceLocation,

    /// Abort the call after this long. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a config for the given location without a timeout.
    pub fn new(location: ServiceLocation) -> Self {
        Self {
            location,
            timeout: None,
        }
    }

    /// Set the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Load the client configuration from `.env` and the environment.
    pub fn from_env() -> ClientResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load the client configuration through `lookup`.
    ///
    /// `SERVER_PATH` wins over `SERVER_ADDR` when both are set. A missing or
    /// unusable location is a configuration error.
    pub fn from_lookup<F>(lookup: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let location = if let Some(path) = lookup(SERVER_PATH_VAR) {
            let args = lookup(SERVER_ARGS_VAR)
                .map(|raw| raw.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default();
            spawn_location(&path, args)?
        } else if let Some(addr) = lookup(SERVER_ADDR_VAR) {
            tcp_location(&addr)?
        } else {
            return Err(ClientError::config(format!(
                "no server configured: set {} (program to spawn) or {} (host:port)",
                SERVER_PATH_VAR, SERVER_ADDR_VAR
            )));
        };

        let timeout = lookup(TIMEOUT_VAR).map(|raw| parse_timeout(&raw)).transpose()?;

        debug!("Client configured for {}", location.describe());
        Ok(Self { location, timeout })
    }
}

fn spawn_location(raw: &str, args: Vec<String>) -> ClientResult<ServiceLocation> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ClientError::config(format!("{} is empty", SERVER_PATH_VAR)));
    }

    let program = PathBuf::from(raw);
    // Bare names are resolved through PATH at spawn time.
    if looks_like_path(&program) && !program.is_file() {
        return Err(ClientError::config(format!(
            "{} does not point to a file: {}",
            SERVER_PATH_VAR,
            program.display()
        )));
    }

    Ok(ServiceLocation::Spawn { program, args })
}

fn looks_like_path(program: &Path) -> bool {
    program.is_absolute() || program.components().count() > 1
}

fn tcp_location(raw: &str) -> ClientResult<ServiceLocation> {
    let addr = raw.trim();
    let valid_port = addr
        .rsplit_once(':')
        .is_some_and(|(host, port)| !host.is_empty() && port.parse::<u16>().is_ok());
    if !valid_port {
        return Err(ClientError::config(format!(
            "{} must be host:port, got '{}'",
            SERVER_ADDR_VAR, raw
        )));
    }

    if cfg!(feature = "tcp") {
        Ok(ServiceLocation::Tcp(addr.to_string()))
    } else {
        Err(ClientError::config(format!(
            "{} requires the `tcp` feature",
            SERVER_ADDR_VAR
        )))
    }
}

fn parse_timeout(raw: &str) -> ClientResult<Duration> {
    match raw.trim().parse::<f64>() {
        Ok(secs) if secs.is_finite() && secs > 0.0 => Ok(Duration::from_secs_f64(secs)),
        _ => Err(ClientError::config(format!(
            "{} must be a positive number of seconds, got '{}'",
            TIMEOUT_VAR, raw
        ))),
    }
}

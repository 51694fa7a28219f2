//! One invocation session: connect, list tools, call, disconnect.

use std::time::{Duration, Instant};

use rmcp::{
    RoleClient, ServiceExt,
    model::{CallToolRequestParam, CallToolResult, RawContent, Tool},
    service::RunningService,
    transport::{IntoTransport, TokioChildProcess},
};
use serde::Serialize;
use serde_json::{Map, Value};
use tokio::process::Command;
use tracing::level_filters::LevelFilter;
use tracing::{debug, info, instrument, warn};

use super::config::{ClientConfig, ServiceLocation};
use super::error::{ClientError, ClientResult};
use crate::domains::tools::definitions::LetterCounterTool;

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    Connected,
    Calling,
}

/// What one successful session produced.
#[derive(Debug, Clone, Serialize)]
pub struct CountOutcome {
    pub word: String,
    pub letter: String,
    pub count: usize,
    /// Tools the server advertised, for display only.
    pub tools: Vec<Tool>,
}

type ClientService = RunningService<RoleClient, ()>;

/// An MCP client connection to the server.
///
/// Dropping a session tears the connection down; a spawned server process is
/// killed with it. [`close`](Self::close) does the same but waits for the
/// shutdown to finish and leaves the session `Disconnected`.
pub struct InvocationSession {
    service: Option<ClientService>,
    state: SessionState,
}

impl InvocationSession {
    /// Connect to the server at `location`.
    #[instrument(skip_all, fields(location = %location.describe()))]
    pub async fn connect(location: &ServiceLocation) -> ClientResult<Self> {
        match location {
            ServiceLocation::Spawn { program, args } => {
                let mut command = Command::new(program);
                command.args(args).env("MCP_TRANSPORT", "stdio");
                if std::env::var_os("MCP_LOG_LEVEL").is_none() {
                    command.env("MCP_LOG_LEVEL", child_log_level(LevelFilter::current()));
                }

                let transport = TokioChildProcess::new(command).map_err(|e| {
                    ClientError::connection(format!(
                        "failed to spawn {}: {}",
                        program.display(),
                        e
                    ))
                })?;
                Self::from_transport(transport).await
            }
            #[cfg(feature = "tcp")]
            ServiceLocation::Tcp(addr) => {
                let stream = tokio::net::TcpStream::connect(addr.as_str())
                    .await
                    .map_err(|e| {
                        ClientError::connection(format!("failed to connect to {}: {}", addr, e))
                    })?;
                Self::from_transport(stream).await
            }
            #[cfg(not(feature = "tcp"))]
            ServiceLocation::Tcp(_) => Err(ClientError::config(
                "TCP server addresses require the `tcp` feature",
            )),
        }
    }

    /// Run the MCP handshake over an already-open transport.
    pub async fn from_transport<T, E, A>(transport: T) -> ClientResult<Self>
    where
        T: IntoTransport<RoleClient, E, A>,
        E: std::error::Error + Send + Sync + 'static,
    {
        let service = ()
            .serve(transport)
            .await
            .map_err(|e| ClientError::connection(format!("handshake failed: {}", e)))?;

        if let Some(info) = service.peer_info() {
            info!(
                "Connected to {} v{}",
                info.server_info.name, info.server_info.version
            );
        }

        Ok(Self {
            service: Some(service),
            state: SessionState::Connected,
        })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// List the tools the server offers.
    pub async fn list_tools(&mut self) -> ClientResult<Vec<Tool>> {
        let tools = open(&self.service)?.list_all_tools().await?;
        debug!("Server offers {} tool(s)", tools.len());
        Ok(tools)
    }

    /// Call a tool by name and wait for its result.
    #[instrument(skip(self, arguments))]
    pub async fn call_tool(
        &mut self,
        name: &str,
        arguments: Map<String, Value>,
    ) -> ClientResult<CallToolResult> {
        let params = CallToolRequestParam {
            name: name.to_string().into(),
            arguments: Some(arguments),
        };

        let service = open(&self.service)?;
        self.state = SessionState::Calling;
        let result = service.call_tool(params).await;
        self.state = SessionState::Connected;

        let result = result?;
        if result.is_error.unwrap_or(false) {
            return Err(ClientError::invocation(text_content(&result).join("\n")));
        }
        Ok(result)
    }

    /// Call `letter_counter` and decode the count.
    pub async fn count_letters(&mut self, word: &str, letter: &str) -> ClientResult<usize> {
        let mut arguments = Map::new();
        arguments.insert("word".into(), Value::from(word));
        arguments.insert("letter".into(), Value::from(letter));

        let result = self.call_tool(LetterCounterTool::NAME, arguments).await?;
        decode_count(&result)
    }

    /// List tools, then count. The connection stays open.
    pub async fn exchange(&mut self, word: &str, letter: &str) -> ClientResult<CountOutcome> {
        let tools = self.list_tools().await?;
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_ref()).collect();
        info!("Available tools: {:?}", names);

        let count = self.count_letters(word, letter).await?;
        info!("'{}' contains '{}' {} time(s)", word, letter, count);

        Ok(CountOutcome {
            word: word.to_string(),
            letter: letter.to_string(),
            count,
            tools,
        })
    }

    /// Run [`exchange`](Self::exchange) under an optional deadline, then
    /// close the connection whatever the outcome.
    pub async fn run(
        mut self,
        word: &str,
        letter: &str,
        timeout: Option<Duration>,
    ) -> ClientResult<CountOutcome> {
        let exchange = self.exchange(word, letter);
        let result = match timeout {
            Some(limit) => tokio::time::timeout(limit, exchange)
                .await
                .unwrap_or(Err(ClientError::Timeout(limit))),
            None => exchange.await,
        };

        if let Err(e) = self.close().await {
            warn!("Error while closing session: {}", e);
        }
        result
    }

    /// Shut the connection down and wait for it to finish. Closing twice
    /// is a no-op.
    pub async fn close(&mut self) -> ClientResult<()> {
        let Some(service) = self.service.take() else {
            return Ok(());
        };
        self.state = SessionState::Disconnected;

        let reason = service
            .cancel()
            .await
            .map_err(|e| ClientError::connection(e.to_string()))?;
        debug!("Session closed: {:?}", reason);
        Ok(())
    }
}

fn open(service: &Option<ClientService>) -> ClientResult<&ClientService> {
    service
        .as_ref()
        .ok_or_else(|| ClientError::connection("session is closed"))
}

/// Connect using `config`, count, and disconnect.
///
/// The configured timeout covers the whole session, handshake included.
pub async fn run_session(
    config: &ClientConfig,
    word: &str,
    letter: &str,
) -> ClientResult<CountOutcome> {
    let Some(limit) = config.timeout else {
        let session = InvocationSession::connect(&config.location).await?;
        return session.run(word, letter, None).await;
    };

    let started = Instant::now();
    // Dropping a half-open session kills the spawned server.
    let session = tokio::time::timeout(limit, InvocationSession::connect(&config.location))
        .await
        .map_err(|_| ClientError::Timeout(limit))??;

    let remaining = limit.saturating_sub(started.elapsed());
    session
        .run(word, letter, Some(remaining))
        .await
        .map_err(|e| match e {
            ClientError::Timeout(_) => ClientError::Timeout(limit),
            e => e,
        })
}

/// Log level handed to a spawned server so it is no chattier than the client.
fn child_log_level(client: LevelFilter) -> &'static str {
    match client.into_level() {
        Some(tracing::Level::TRACE) => "trace",
        Some(tracing::Level::DEBUG) => "debug",
        Some(tracing::Level::INFO) => "info",
        Some(tracing::Level::WARN) => "warn",
        _ => "error",
    }
}

fn text_content(result: &CallToolResult) -> Vec<String> {
    result
        .content
        .iter()
        .filter_map(|c| match &c.raw {
            RawContent::Text(text) => Some(text.text.clone()),
            _ => None,
        })
        .collect()
}

/// Read the count from structured content, falling back to the text entry.
fn decode_count(result: &CallToolResult) -> ClientResult<usize> {
    if let Some(count) = result
        .structured_content
        .as_ref()
        .and_then(|v| v.get("count"))
        .and_then(Value::as_u64)
    {
        return Ok(count as usize);
    }

    let texts = text_content(result);
    texts
        .first()
        .and_then(|t| t.trim().parse().ok())
        .ok_or_else(|| ClientError::unexpected(format!("no count in result: {:?}", texts)))
}

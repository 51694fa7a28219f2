//! Seam between the presentation layers and the session runner.

use async_trait::async_trait;

use super::config::ClientConfig;
use super::error::ClientResult;
use super::request::CountRequest;
use super::session::{CountOutcome, run_session};

/// Something that can answer a count request.
///
/// The web UI holds one of these; production uses [`ClientConfig`], which
/// runs a fresh session per request.
#[async_trait]
pub trait CountBackend: Send + Sync {
    /// Perform one count.
    async fn count(&self, request: &CountRequest) -> ClientResult<CountOutcome>;
}

#[async_trait]
impl CountBackend for ClientConfig {
    async fn count(&self, request: &CountRequest) -> ClientResult<CountOutcome> {
        run_session(self, &request.word, &request.letter).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ClientError, ServiceLocation};

    #[test]
    fn test_config_backend_reports_spawn_failure() {
        let backend = ClientConfig::new(ServiceLocation::Spawn {
            program: "/definitely/not/here/letter-counter".into(),
            args: Vec::new(),
        });
        let request =
            CountRequest::from_parts(Some("Strawberry".into()), Some("r".into())).unwrap();

        let result = tokio_test::block_on(backend.count(&request));
        assert!(matches!(result, Err(ClientError::Connection(_))));
    }
}

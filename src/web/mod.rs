//! Web UI wrapping the invocation client.
//!
//! A single HTML form; each submission runs one client session through a
//! [`CountBackend`]. Submissions are served one at a time.

pub mod page;

use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tracing::{error, info, instrument, warn};

use crate::client::{ClientError, CountBackend, CountRequest};
use page::{Banner, DEFAULT_LETTER, DEFAULT_WORD};

/// Address the web UI binds when `LETTER_COUNTER_WEB_ADDR` is unset.
pub const DEFAULT_WEB_ADDR: &str = "127.0.0.1:8501";

/// Web UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    /// `host:port` to listen on.
    pub addr: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_WEB_ADDR.to_string(),
        }
    }
}

impl WebConfig {
    /// Load from `LETTER_COUNTER_WEB_ADDR`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        match std::env::var("LETTER_COUNTER_WEB_ADDR") {
            Ok(addr) if !addr.trim().is_empty() => Self {
                addr: addr.trim().to_string(),
            },
            _ => Self::default(),
        }
    }
}

/// State shared by the web handlers.
#[derive(Clone)]
pub struct WebState {
    backend: Arc<dyn CountBackend>,
    /// Held for the duration of a count so only one call is in flight.
    in_flight: Arc<Mutex<()>>,
}

impl WebState {
    /// Create state around a backend.
    pub fn new(backend: Arc<dyn CountBackend>) -> Self {
        Self {
            backend,
            in_flight: Arc::new(Mutex::new(())),
        }
    }
}

/// Form fields as submitted by the browser.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CountForm {
    #[serde(default)]
    pub word: String,
    #[serde(default)]
    pub letter: String,
}

/// Build the web UI router.
pub fn build_router(state: WebState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/count", post(count))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the web UI until the listener fails.
pub async fn serve(config: &WebConfig, state: WebState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(&config.addr).await?;
    info!("Web UI ready on http://{}", config.addr);
    axum::serve(listener, build_router(state)).await
}

async fn index() -> Response {
    render_page(DEFAULT_WORD, DEFAULT_LETTER, None)
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[instrument(skip_all)]
async fn count(State(state): State<WebState>, Form(form): Form<CountForm>) -> Response {
    info!("Count requested: word={:?} letter={:?}", form.word, form.letter);
    let banner = match CountRequest::from_parts(Some(form.word.clone()), Some(form.letter.clone()))
    {
        Err(_) => Banner::Warning("Enter both a word and a letter.".to_string()),
        Ok(request) => {
            let _guard = state.in_flight.lock().await;
            outcome_banner(state.backend.count(&request).await)
        }
    };

    render_page(&form.word, &form.letter, Some(&banner))
}

fn render_page(word: &str, letter: &str, banner: Option<&Banner>) -> Response {
    match page::render(word, letter, banner) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("Failed to render page: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
        }
    }
}

fn outcome_banner(result: Result<crate::client::CountOutcome, ClientError>) -> Banner {
    match result {
        Ok(outcome) => Banner::Success(format!(
            "'{}' contains '{}' {} time(s).",
            outcome.word, outcome.letter, outcome.count
        )),
        Err(e) => {
            warn!("Count failed: {}", e);
            Banner::Error(format!("An error occurred: {}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ClientResult, CountOutcome};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    /// Counts locally and records how often it was asked.
    #[derive(Default)]
    struct LocalBackend {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CountBackend for LocalBackend {
        async fn count(&self, request: &CountRequest) -> ClientResult<CountOutcome> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(CountOutcome {
                word: request.word.clone(),
                letter: request.letter.clone(),
                count: crate::domains::tools::definitions::count_occurrences(
                    &request.word,
                    &request.letter,
                ),
                tools: Vec::new(),
            })
        }
    }

    struct DownBackend;

    #[async_trait]
    impl CountBackend for DownBackend {
        async fn count(&self, _request: &CountRequest) -> ClientResult<CountOutcome> {
            Err(ClientError::connection("server exited"))
        }
    }

    async fn body_text(resp: axum::response::Response) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn post_form(fields: &[(&str, &str)]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/count")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(serde_urlencoded::to_string(fields).unwrap()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_index_has_defaults() {
        let app = build_router(WebState::new(Arc::new(LocalBackend::default())));
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let html = body_text(resp).await;
        assert!(html.contains(r#"value="Strawberry""#));
        assert!(html.contains(r#"value="r""#));
    }

    #[tokio::test]
    async fn test_count_success() {
        let backend = Arc::new(LocalBackend::default());
        let app = build_router(WebState::new(backend.clone()));

        let resp = app
            .oneshot(post_form(&[("word", "Strawberry"), ("letter", "r")]))
            .await
            .unwrap();
        let html = body_text(resp).await;
        assert!(html.contains("banner success"));
        assert!(html.contains("3 time(s)"));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_count_missing_field_warns_without_calling() {
        let backend = Arc::new(LocalBackend::default());
        let app = build_router(WebState::new(backend.clone()));

        let resp = app
            .oneshot(post_form(&[("word", "Strawberry"), ("letter", "")]))
            .await
            .unwrap();
        let html = body_text(resp).await;
        assert!(html.contains("banner warning"));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_count_error_banner() {
        let app = build_router(WebState::new(Arc::new(DownBackend)));

        let resp = app
            .oneshot(post_form(&[("word", "Strawberry"), ("letter", "r")]))
            .await
            .unwrap();
        let html = body_text(resp).await;
        assert!(html.contains("banner error"));
        assert!(html.contains("server exited"));
    }

    #[tokio::test]
    async fn test_input_is_escaped() {
        let app = build_router(WebState::new(Arc::new(LocalBackend::default())));

        let resp = app
            .oneshot(post_form(&[("word", "<b>bob</b>"), ("letter", "b")]))
            .await
            .unwrap();
        let html = body_text(resp).await;
        assert!(!html.contains("<b>bob</b>"));
        assert!(html.contains("&lt;b&gt;bob&lt;&#x2F;b&gt;"));
    }
}

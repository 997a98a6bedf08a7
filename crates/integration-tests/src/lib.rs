//! Integration tests for Studylamp.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p studylamp-integration-tests
//! ```
//!
//! Each test boots the real router on an ephemeral port together with a
//! stub chat-completion upstream, so no network access or credentials
//! are required.
//!
//! # Test Categories
//!
//! - `classify_api` - URL classification endpoint
//! - `suggestions_api` - Focus scoring and suggestion generation
//! - `study_plan_api` - Study plan generation
//! - `timer_api` - Pomodoro countdown endpoints

use std::net::{IpAddr, Ipv4Addr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing::post};
use secrecy::SecretString;
use studylamp_core::DomainList;
use studylamp_server::config::{CompletionConfig, ServerConfig};
use studylamp_server::state::AppState;

/// API key the stub-backed app is configured with.
pub const TEST_API_KEY: &str = "gsk_integration_test_key";

/// Model ID the stub-backed app is configured with.
pub const TEST_MODEL: &str = "llama-test-model";

/// Text returned by the stub upstream on success.
pub const STUB_COMPLETION_TEXT: &str =
    "1. Block distracting sites. 2. Work in shorter intervals. 3. Keep the phone away.";

// ============================================================================
// Stub completion upstream
// ============================================================================

/// How the stub chat-completion upstream answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StubBehavior {
    /// 200 with one choice containing [`STUB_COMPLETION_TEXT`].
    Success,
    /// 200 with an empty choices array.
    EmptyChoices,
    /// 500 with an OpenAI-style error body.
    InternalError,
    /// 200 with a body that is not valid JSON.
    Malformed,
}

#[derive(Clone)]
struct StubState {
    behavior: StubBehavior,
    calls: Arc<AtomicUsize>,
    last_request: Arc<Mutex<Option<serde_json::Value>>>,
    last_authorization: Arc<Mutex<Option<String>>>,
}

/// A running stub upstream and its recorded traffic.
pub struct CompletionStub {
    /// Base URL the app's completion config should point at.
    pub base_url: String,
    calls: Arc<AtomicUsize>,
    last_request: Arc<Mutex<Option<serde_json::Value>>>,
    last_authorization: Arc<Mutex<Option<String>>>,
}

impl CompletionStub {
    /// Number of completion requests the stub has served.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The JSON body of the most recent completion request.
    ///
    /// # Panics
    ///
    /// Panics if the recording lock is poisoned.
    #[must_use]
    pub fn last_request(&self) -> Option<serde_json::Value> {
        self.last_request
            .lock()
            .expect("stub request lock poisoned")
            .clone()
    }

    /// The Authorization header of the most recent completion request.
    ///
    /// # Panics
    ///
    /// Panics if the recording lock is poisoned.
    #[must_use]
    pub fn last_authorization(&self) -> Option<String> {
        self.last_authorization
            .lock()
            .expect("stub authorization lock poisoned")
            .clone()
    }
}

async fn serve_completion(
    State(stub): State<StubState>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Response {
    stub.calls.fetch_add(1, Ordering::SeqCst);

    if let Ok(mut slot) = stub.last_request.lock() {
        *slot = Some(body);
    }
    if let Ok(mut slot) = stub.last_authorization.lock() {
        *slot = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(String::from);
    }

    match stub.behavior {
        StubBehavior::Success => Json(serde_json::json!({
            "id": "chatcmpl-stub",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": STUB_COMPLETION_TEXT },
                "finish_reason": "stop"
            }]
        }))
        .into_response(),
        StubBehavior::EmptyChoices => Json(serde_json::json!({ "choices": [] })).into_response(),
        StubBehavior::InternalError => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({
                "error": { "message": "The model is overloaded", "type": "server_error" }
            })),
        )
            .into_response(),
        StubBehavior::Malformed => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            "upstream proxy error",
        )
            .into_response(),
    }
}

/// Spawn a stub chat-completion upstream on an ephemeral port.
///
/// # Panics
///
/// Panics if the stub cannot bind a local port.
pub async fn spawn_completion_stub(behavior: StubBehavior) -> CompletionStub {
    let calls = Arc::new(AtomicUsize::new(0));
    let last_request = Arc::new(Mutex::new(None));
    let last_authorization = Arc::new(Mutex::new(None));

    let state = StubState {
        behavior,
        calls: Arc::clone(&calls),
        last_request: Arc::clone(&last_request),
        last_authorization: Arc::clone(&last_authorization),
    };

    let app = Router::new()
        .route("/chat/completions", post(serve_completion))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub listener");
    let addr = listener
        .local_addr()
        .expect("Failed to read stub listener address");

    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Stub upstream error");
    });

    CompletionStub {
        base_url: format!("http://{addr}"),
        calls,
        last_request,
        last_authorization,
    }
}

// ============================================================================
// Application harness
// ============================================================================

/// A Studylamp server running on an ephemeral port.
pub struct TestApp {
    /// Base URL of the running server, e.g. `http://127.0.0.1:54321`.
    pub address: String,
    pub client: reqwest::Client,
}

/// Completion config pointing at a stub upstream.
#[must_use]
pub fn stub_completion_config(base_url: &str) -> CompletionConfig {
    CompletionConfig {
        api_key: Some(SecretString::from(TEST_API_KEY)),
        base_url: base_url.trim_end_matches('/').to_string(),
        model: TEST_MODEL.to_string(),
    }
}

/// Completion config with no API key configured.
///
/// The base URL points at a port nothing listens on, so an attempt to
/// call upstream fails loudly instead of leaking onto the network.
#[must_use]
pub fn keyless_completion_config() -> CompletionConfig {
    CompletionConfig {
        api_key: None,
        base_url: "http://127.0.0.1:9".to_string(),
        model: TEST_MODEL.to_string(),
    }
}

/// Completion config with an API key but an upstream nothing listens on.
///
/// Calls get past the credential check and die at connect time.
#[must_use]
pub fn unreachable_completion_config() -> CompletionConfig {
    CompletionConfig {
        api_key: Some(SecretString::from(TEST_API_KEY)),
        base_url: "http://127.0.0.1:9".to_string(),
        model: TEST_MODEL.to_string(),
    }
}

/// Boot the real application with the given completion config.
///
/// # Panics
///
/// Panics if the server cannot bind a local port.
pub async fn spawn_app(completion: CompletionConfig) -> TestApp {
    let config = ServerConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        completion,
        distracting_domains: DomainList::default(),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 1.0,
    };

    let app = studylamp_server::app(AppState::new(config));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener
        .local_addr()
        .expect("Failed to read test listener address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server error");
    });

    TestApp {
        address: format!("http://{addr}"),
        client: reqwest::Client::new(),
    }
}

/// Boot the app together with a stub upstream in one call.
pub async fn spawn_app_with_stub(behavior: StubBehavior) -> (TestApp, CompletionStub) {
    let stub = spawn_completion_stub(behavior).await;
    let app = spawn_app(stub_completion_config(&stub.base_url)).await;
    (app, stub)
}

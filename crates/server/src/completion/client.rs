//! HTTP client for the chat-completions service.
//!
//! One request in, one plain-text answer out. The client never retries: a
//! failed call surfaces as an error and the caller decides what the user
//! sees. Dropping the returned future (client disconnect) aborts the
//! in-flight upstream request.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use crate::config::CompletionConfig;

use super::error::{ApiErrorResponse, CompletionError};
use super::types::{ChatMessage, ChatRequest, ChatResponse, CompletionPrompt};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Canned suggestion returned when the upstream answers 200 with an empty
/// choice list. This is a success from the caller's point of view.
pub const FALLBACK_SUGGESTION: &str =
    "Try breaking study sessions into Pomodoro intervals and reducing distractions.";

/// Chat-completions client.
///
/// Cheap to clone; the connection pool and configuration live behind an
/// `Arc`. A client built without an API key still constructs (the rest of
/// the server keeps working) and refuses calls with
/// [`CompletionError::MissingCredential`].
#[derive(Clone)]
pub struct CompletionClient {
    inner: Arc<CompletionClientInner>,
}

struct CompletionClientInner {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<SecretString>,
}

impl CompletionClient {
    /// Create a new completion client.
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be constructed (TLS
    /// backend initialization).
    #[must_use]
    pub fn new(config: &CompletionConfig) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            inner: Arc::new(CompletionClientInner {
                client,
                base_url: config.base_url.clone(),
                model: config.model.clone(),
                api_key: config.api_key.clone(),
            }),
        }
    }

    /// Send a rendered prompt and return the generated text.
    ///
    /// Exactly one attempt is made, bounded by a 30-second timeout. A 200
    /// response with an empty choice list resolves to
    /// [`FALLBACK_SUGGESTION`]; every other anomaly is an error.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError::MissingCredential`] when no API key is
    /// configured (checked before any network I/O), `Http` for transport
    /// failures, `Upstream` for non-success statuses and `Parse` when the
    /// body does not match the expected shape.
    #[instrument(skip(self, prompt), fields(model = %self.inner.model))]
    pub async fn complete(&self, prompt: &CompletionPrompt) -> Result<String, CompletionError> {
        let api_key = self
            .inner
            .api_key
            .as_ref()
            .ok_or(CompletionError::MissingCredential)?;

        let request = ChatRequest {
            model: self.inner.model.clone(),
            messages: vec![
                ChatMessage::system(prompt.system.as_str()),
                ChatMessage::user(prompt.user.as_str()),
            ],
            max_tokens: prompt.max_tokens,
            temperature: prompt.temperature,
        };

        let response = self
            .inner
            .client
            .post(format!("{}/chat/completions", self.inner.base_url))
            .bearer_auth(api_key.expose_secret())
            .json(&request)
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Handle a response, splitting success decoding from error statuses.
    async fn handle_response(response: reqwest::Response) -> Result<String, CompletionError> {
        let status = response.status();

        if !status.is_success() {
            return Err(Self::handle_error_status(status, response).await);
        }

        let body = response.text().await?;
        let decoded: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| CompletionError::Parse(format!("Failed to parse response: {e}")))?;

        Ok(decoded.choices.into_iter().next().map_or_else(
            || FALLBACK_SUGGESTION.to_string(),
            |choice| choice.message.content,
        ))
    }

    /// Turn a non-success status into a typed error.
    ///
    /// The body is kept for server-side diagnostics; callers never echo it
    /// to clients.
    async fn handle_error_status(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> CompletionError {
        match response.text().await {
            Ok(body) => {
                let message = serde_json::from_str::<ApiErrorResponse>(&body)
                    .map_or(body, |api_error| api_error.error.message);
                CompletionError::Upstream {
                    status: status.as_u16(),
                    message,
                }
            }
            Err(e) => CompletionError::Http(e),
        }
    }
}

impl std::fmt::Debug for CompletionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionClient")
            .field("base_url", &self.inner.base_url)
            .field("model", &self.inner.model)
            .field("api_key", &self.inner.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}

//! Chat-completion client for the Groq OpenAI-compatible API.
//!
//! The server talks to a single upstream completion endpoint
//! (`POST {base_url}/chat/completions`) with bearer authentication.
//! [`CompletionClient`] owns the connection pool and credential;
//! callers describe what they want with a [`CompletionPrompt`] and
//! get back the assistant's text.
//!
//! Requests are never retried. Upstream failures surface as
//! [`CompletionError`] values, which the HTTP layer maps onto
//! client-safe status codes.

mod client;
mod error;
mod types;

pub use client::{CompletionClient, FALLBACK_SUGGESTION};
pub use error::CompletionError;
pub use types::{ChatMessage, ChatRequest, ChatResponse, CompletionPrompt, Role};

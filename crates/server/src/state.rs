//! Application state shared across handlers.

use std::sync::{Arc, RwLock};

use studylamp_core::{DomainList, TimerSession};

use crate::completion::CompletionClient;
use crate::config::ServerConfig;
use crate::error::AppError;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the completion client and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    completion: CompletionClient,
    // Single countdown slot. Starting a new session replaces the old one.
    timer: RwLock<Option<TimerSession>>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        let completion = CompletionClient::new(config.completion());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                completion,
                timer: RwLock::new(None),
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the completion API client.
    #[must_use]
    pub fn completion(&self) -> &CompletionClient {
        &self.inner.completion
    }

    /// Get a reference to the distracting-domain list.
    #[must_use]
    pub fn distracting_domains(&self) -> &DomainList {
        self.inner.config.distracting_domains()
    }

    /// Replace the active countdown session.
    ///
    /// # Errors
    ///
    /// Returns an error if the timer lock is poisoned.
    pub fn start_timer(&self, session: TimerSession) -> Result<(), AppError> {
        let mut slot = self
            .inner
            .timer
            .write()
            .map_err(|_| AppError::Internal("timer lock poisoned".to_string()))?;
        *slot = Some(session);
        Ok(())
    }

    /// Get the active countdown session, if any.
    #[must_use]
    pub fn current_timer(&self) -> Option<TimerSession> {
        self.inner.timer.read().map(|slot| *slot).unwrap_or(None)
    }
}

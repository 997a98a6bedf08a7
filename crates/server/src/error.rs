//! Unified error handling for the API server.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use studylamp_core::{ClassifyError, PlanError, ScoreError, TimerError};

use crate::completion::CompletionError;

/// Application-level error type for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// URL classification failed.
    #[error("Classification error: {0}")]
    Classify(#[from] ClassifyError),

    /// Focus score computation failed.
    #[error("Score error: {0}")]
    Score(#[from] ScoreError),

    /// Study plan input failed validation.
    #[error("Study plan error: {0}")]
    Plan(#[from] PlanError),

    /// Timer configuration failed validation.
    #[error("Timer error: {0}")]
    Timer(#[from] TimerError),

    /// Completion API operation failed.
    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error body returned to clients.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server errors with Sentry
        if matches!(self, Self::Completion(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "API request error"
            );
        }

        let status = match &self {
            Self::Completion(CompletionError::MissingCredential) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Completion(_) => StatusCode::BAD_GATEWAY,
            Self::Classify(_) | Self::Score(_) | Self::Plan(_) | Self::Timer(_) => {
                StatusCode::BAD_REQUEST
            }
        };

        // Don't expose upstream error details to clients
        let message = match &self {
            Self::Completion(CompletionError::MissingCredential) | Self::Internal(_) => {
                "Internal server error".to_string()
            }
            Self::Completion(_) => "External service error".to_string(),
            _ => self.to_string(),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use studylamp_core::ScoreError;

    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    async fn get_body(err: AppError) -> String {
        let response = err.into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::Score(ScoreError::ZeroStudyTime);
        assert_eq!(
            err.to_string(),
            "Score error: total study time must be greater than zero"
        );

        let err = AppError::Completion(CompletionError::MissingCredential);
        assert_eq!(
            err.to_string(),
            "Completion error: completion API key is not configured"
        );
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::Score(ScoreError::ZeroStudyTime)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Completion(CompletionError::MissingCredential)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::Completion(CompletionError::Upstream {
                status: 500,
                message: "model overloaded".to_string(),
            })),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            get_status(AppError::Completion(CompletionError::Parse(
                "missing field `choices`".to_string()
            ))),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            get_status(AppError::Internal("timer lock poisoned".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_upstream_detail_is_not_exposed_to_clients() {
        let body = get_body(AppError::Completion(CompletionError::Upstream {
            status: 401,
            message: "invalid api key sk-12345".to_string(),
        }))
        .await;

        assert!(!body.contains("sk-12345"), "body leaked upstream detail");
        assert_eq!(body, r#"{"error":"External service error"}"#);
    }

    #[tokio::test]
    async fn test_validation_detail_is_exposed_to_clients() {
        let body = get_body(AppError::Score(ScoreError::ZeroStudyTime)).await;
        assert_eq!(
            body,
            r#"{"error":"Score error: total study time must be greater than zero"}"#
        );
    }
}

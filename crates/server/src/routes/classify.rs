//! URL classification route handler.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use studylamp_core::Classification;
use tracing::instrument;

use crate::error::AppError;
use crate::state::AppState;

/// Request to classify a URL.
#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    /// The URL the user is currently visiting.
    pub url: String,
}

/// Response with the classification result.
#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    /// The original input URL, echoed back.
    pub url: String,
    pub classification: Classification,
}

/// Classify a URL as helpful or distracting.
///
/// POST /classify
///
/// # Errors
///
/// Returns `AppError` if the URL cannot be parsed or has no hostname.
#[instrument(skip(state))]
pub async fn classify(
    State(state): State<AppState>,
    Json(req): Json<ClassifyRequest>,
) -> Result<Json<ClassifyResponse>, AppError> {
    let classification = studylamp_core::classify(&req.url, state.distracting_domains())?;

    Ok(Json(ClassifyResponse {
        url: req.url,
        classification,
    }))
}

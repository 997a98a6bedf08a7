//! Study-suggestion route handler.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use studylamp_core::{SessionTelemetry, SiteTimeMap};
use tracing::instrument;

use crate::error::AppError;
use crate::services::CoachService;
use crate::state::AppState;

/// Distraction telemetry reported by the tracking extension.
#[derive(Debug, Deserialize)]
pub struct SuggestionsRequest {
    /// Seconds spent per website during the session.
    pub websites: SiteTimeMap,
    /// Total session length in seconds.
    pub study_time: u64,
}

/// Response with the generated study tips.
#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub suggestions: String,
}

/// Score the reported session and generate study tips.
///
/// POST /suggestions
///
/// Telemetry is scored locally first; nothing is sent upstream for
/// invalid input.
///
/// # Errors
///
/// Returns `AppError` if the telemetry is invalid or the completion
/// call fails.
#[instrument(skip(state, req), fields(study_time = req.study_time))]
pub async fn suggestions(
    State(state): State<AppState>,
    Json(req): Json<SuggestionsRequest>,
) -> Result<Json<SuggestionsResponse>, AppError> {
    let telemetry = SessionTelemetry::new(req.study_time, req.websites);

    let coach = CoachService::new(state.completion());
    let (score, suggestions) = coach.suggestions(&telemetry).await?;

    tracing::info!(score = score.value(), "Generated study suggestions");

    Ok(Json(SuggestionsResponse { suggestions }))
}

//! Pomodoro countdown route handlers.
//!
//! Starting a session stores an immutable [`TimerSession`] in the shared
//! state; status is derived from wall-clock time on every read, so there
//! is no background ticking task to manage.

use axum::{Json, extract::State};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use studylamp_core::{TimerConfig, TimerSession, TimerStatus};
use tracing::instrument;

use crate::error::AppError;
use crate::state::AppState;

/// Request to start a countdown session, all durations in minutes.
#[derive(Debug, Deserialize)]
pub struct StartTimerRequest {
    pub work_duration: u32,
    pub break_duration: u32,
    pub long_break_duration: u32,
}

/// Countdown status payload.
#[derive(Debug, Serialize)]
pub struct TimerStatusResponse {
    /// Current phase, or "idle" when no session has been started.
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_seconds: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round: Option<u32>,
}

impl TimerStatusResponse {
    fn idle() -> Self {
        Self {
            state: "idle".to_string(),
            remaining_seconds: None,
            round: None,
        }
    }
}

impl From<TimerStatus> for TimerStatusResponse {
    fn from(status: TimerStatus) -> Self {
        Self {
            state: status.phase.to_string(),
            remaining_seconds: Some(status.remaining_seconds),
            round: Some(status.round),
        }
    }
}

/// Start a countdown session, replacing any active one.
///
/// POST /pomodoro
///
/// # Errors
///
/// Returns `AppError` if the configuration is invalid.
#[instrument(skip(state))]
pub async fn start(
    State(state): State<AppState>,
    Json(req): Json<StartTimerRequest>,
) -> Result<Json<TimerStatusResponse>, AppError> {
    let config = TimerConfig::new(
        req.work_duration,
        req.break_duration,
        req.long_break_duration,
    );

    let now = Utc::now();
    let session = TimerSession::start(config, now)?;
    state.start_timer(session)?;

    tracing::info!(session_id = %session.id, "Started countdown session");

    Ok(Json(session.status(now).into()))
}

/// Report the current countdown status.
///
/// GET /pomodoro
#[instrument(skip(state))]
pub async fn status(State(state): State<AppState>) -> Json<TimerStatusResponse> {
    let response = state
        .current_timer()
        .map_or_else(TimerStatusResponse::idle, |session| {
            session.status(Utc::now()).into()
        });

    Json(response)
}

//! Study-plan route handler.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use studylamp_core::StudyPlanInput;
use tracing::instrument;

use crate::error::AppError;
use crate::services::CoachService;
use crate::state::AppState;

/// Request for a personalized study plan.
#[derive(Debug, Deserialize)]
pub struct StudyPlanRequest {
    /// Hours available for studying each day.
    pub study_time_per_day: u32,
    /// Tasks to fit into the plan.
    pub tasks: Vec<String>,
    #[serde(default)]
    pub preferences: Option<StudyPreferences>,
}

/// Optional scheduling preferences.
#[derive(Debug, Deserialize)]
pub struct StudyPreferences {
    /// Preferred time of day (e.g., "morning", "evening").
    #[serde(default)]
    pub study_time: Option<String>,
}

/// Response with the generated plan.
#[derive(Debug, Serialize)]
pub struct StudyPlanResponse {
    pub plan: String,
}

/// Generate a day-by-day study plan.
///
/// POST /study-plan
///
/// # Errors
///
/// Returns `AppError` if the input is invalid or the completion call
/// fails.
#[instrument(skip(state, req), fields(task_count = req.tasks.len()))]
pub async fn study_plan(
    State(state): State<AppState>,
    Json(req): Json<StudyPlanRequest>,
) -> Result<Json<StudyPlanResponse>, AppError> {
    let input = StudyPlanInput {
        study_hours_per_day: req.study_time_per_day,
        tasks: req.tasks,
        preferred_study_time: req.preferences.and_then(|p| p.study_time),
    };

    let coach = CoachService::new(state.completion());
    let plan = coach.study_plan(&input).await?;

    Ok(Json(StudyPlanResponse { plan }))
}

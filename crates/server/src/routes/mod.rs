//! HTTP route handlers for the API server.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health       - Health check
//!
//! # Classification
//! POST /classify     - Classify a URL as helpful or distracting
//!
//! # Coaching
//! POST /suggestions  - Score a session and generate study tips
//! POST /study-plan   - Generate a day-by-day study plan
//!
//! # Pomodoro
//! POST /pomodoro     - Start a countdown session
//! GET  /pomodoro     - Report the current countdown status
//! ```

pub mod classify;
pub mod study_plan;
pub mod suggestions;
pub mod timer;

use axum::{Router, routing::post};

use crate::state::AppState;

/// Create the API routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/classify", post(classify::classify))
        .route("/suggestions", post(suggestions::suggestions))
        .route("/study-plan", post(study_plan::study_plan))
        .route("/pomodoro", post(timer::start).get(timer::status))
}

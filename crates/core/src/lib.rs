//! Studylamp Core - domain logic for the focus-coaching pipeline.
//!
//! This crate provides the pure building blocks used by the server:
//! - [`classify`] - URL classification against a distracting-domain list
//! - [`score`] - focus-score computation over session telemetry
//! - [`prompt`] - prompt templates for the coaching pipelines
//! - [`timer`] - wall-clock Pomodoro sessions
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, and no clock of its own (callers pass `DateTime<Utc>` values in).
//! This keeps it lightweight and allows it to be used anywhere.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod classify;
pub mod prompt;
pub mod score;
pub mod timer;

pub use classify::{Classification, ClassifyError, DomainList, classify};
pub use prompt::{
    PlanError, STUDY_PLAN_SYSTEM_PROMPT, SUGGESTION_SYSTEM_PROMPT, StudyPlanInput,
    study_plan_prompt, suggestion_prompt,
};
pub use score::{FocusScore, ScoreError, SessionTelemetry, SiteTimeMap, compute_score};
pub use timer::{TimerConfig, TimerError, TimerPhase, TimerSession, TimerStatus};

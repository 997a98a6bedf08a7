//! Prompt templates for the coaching pipelines.
//!
//! Templates are deterministic string renderers; model selection, token
//! budgets and transport all live with the caller.

use serde::{Deserialize, Serialize};

use crate::score::{FocusScore, SiteTimeMap};

/// System prompt for the focus-suggestion pipeline.
pub const SUGGESTION_SYSTEM_PROMPT: &str = "You are a helpful AI study coach.";

/// System prompt for the study-plan pipeline.
pub const STUDY_PLAN_SYSTEM_PROMPT: &str =
    "You are a helpful AI tutor that creates study plans.";

/// Errors that can occur when building a study-plan prompt.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// The task list was empty.
    #[error("no tasks provided")]
    NoTasks,
    /// The daily study budget was zero hours.
    #[error("study time per day must be greater than zero")]
    ZeroStudyHours,
}

/// Inputs for a personalized study plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyPlanInput {
    /// Hours available for studying each day.
    pub study_hours_per_day: u32,
    /// Tasks the plan must cover.
    pub tasks: Vec<String>,
    /// Preferred time of day to study, when the user stated one.
    pub preferred_study_time: Option<String>,
}

/// Render the coaching prompt for a scored session.
///
/// The prompt embeds the numeric score and a "site: N seconds" rendering of
/// every entry in the map. Map iteration order is unspecified and nothing in
/// the template depends on it.
#[must_use]
pub fn suggestion_prompt(score: FocusScore, site_times: &SiteTimeMap) -> String {
    let site_details: Vec<String> = site_times
        .iter()
        .map(|(site, secs)| format!("{site}: {secs} seconds"))
        .collect();

    format!(
        "The user's focus score is {score} out of 100 (lower scores mean they were more distracted). \
         They spent time on the following websites: {}. These websites represent their main distractions \
         during the session. Provide study tips based on the user's tendency to visit these websites. \
         Praise them for good scores but generate three short study tips for those with a lower score, \
         helping them avoid distractions like these. Each tip should be concise and numbered 1, 2, and 3.",
        site_details.join(", "),
    )
}

/// Render the study-plan prompt.
///
/// Hours per task use whole-number division, so a 7-hour day across 3 tasks
/// allocates 2 hours each.
///
/// # Errors
///
/// Returns an error when the task list is empty or the daily budget is zero.
pub fn study_plan_prompt(input: &StudyPlanInput) -> Result<String, PlanError> {
    if input.tasks.is_empty() {
        return Err(PlanError::NoTasks);
    }
    if input.study_hours_per_day == 0 {
        return Err(PlanError::ZeroStudyHours);
    }

    let hours_per_task = u64::from(input.study_hours_per_day) / input.tasks.len() as u64;

    let mut prompt = format!(
        "Create a personalized study plan for the following tasks: {}. \
         The user has {} hours per day to study. \
         Allocate {hours_per_task} hours per task accordingly to ensure all tasks are completed.",
        input.tasks.join(", "),
        input.study_hours_per_day,
    );

    if let Some(preferred) = input
        .preferred_study_time
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
    {
        prompt.push_str(&format!(" The user prefers to study in the {preferred}."));
    }

    Ok(prompt)
}

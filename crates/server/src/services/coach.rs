//! Focus coaching built on the completion API.
//!
//! The coach turns session telemetry into a focus score, renders the
//! matching prompt, and asks the configured model for advice. Routes
//! construct a [`CoachService`] per request from the shared state.

use studylamp_core::{
    FocusScore, STUDY_PLAN_SYSTEM_PROMPT, SUGGESTION_SYSTEM_PROMPT, SessionTelemetry,
    StudyPlanInput, compute_score, study_plan_prompt, suggestion_prompt,
};

use crate::completion::{CompletionClient, CompletionPrompt};
use crate::error::AppError;

/// Token ceiling for coaching completions.
const MAX_COMPLETION_TOKENS: u32 = 500;

/// Coaching workflows on top of the completion client.
pub struct CoachService<'a> {
    completion: &'a CompletionClient,
}

impl<'a> CoachService<'a> {
    /// Create a new coach service borrowing the shared completion client.
    #[must_use]
    pub const fn new(completion: &'a CompletionClient) -> Self {
        Self { completion }
    }

    /// Score a study session and ask the model for improvement suggestions.
    ///
    /// Telemetry is validated and scored before anything is sent upstream,
    /// so invalid input never costs a completion call.
    ///
    /// # Errors
    ///
    /// Returns an error if the telemetry is invalid or the completion call
    /// fails.
    pub async fn suggestions(
        &self,
        telemetry: &SessionTelemetry,
    ) -> Result<(FocusScore, String), AppError> {
        let score = compute_score(telemetry)?;
        let prompt = CompletionPrompt::new(
            SUGGESTION_SYSTEM_PROMPT,
            suggestion_prompt(score, &telemetry.site_times),
            MAX_COMPLETION_TOKENS,
        );

        let text = self.completion.complete(&prompt).await?;
        Ok((score, text))
    }

    /// Ask the model for a day-by-day study plan.
    ///
    /// # Errors
    ///
    /// Returns an error if the plan input is invalid or the completion call
    /// fails.
    pub async fn study_plan(&self, input: &StudyPlanInput) -> Result<String, AppError> {
        let prompt = CompletionPrompt::new(
            STUDY_PLAN_SYSTEM_PROMPT,
            study_plan_prompt(input)?,
            MAX_COMPLETION_TOKENS,
        );

        let text = self.completion.complete(&prompt).await?;
        Ok(text)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use studylamp_core::{ScoreError, SiteTimeMap};

    use super::*;
    use crate::completion::CompletionError;
    use crate::config::test_config;

    fn keyless_client() -> CompletionClient {
        let mut config = test_config();
        config.completion.api_key = None;
        CompletionClient::new(config.completion())
    }

    #[tokio::test]
    async fn test_suggestions_rejects_zero_study_time_before_any_call() {
        let client = keyless_client();
        let coach = CoachService::new(&client);
        let telemetry = SessionTelemetry::new(0, SiteTimeMap::new());

        // A keyless client would answer MissingCredential if the coach got
        // as far as the completion call. Validation must win.
        let err = coach.suggestions(&telemetry).await.unwrap_err();
        assert!(matches!(err, AppError::Score(ScoreError::ZeroStudyTime)));
    }

    #[tokio::test]
    async fn test_suggestions_reports_missing_credential() {
        let client = keyless_client();
        let coach = CoachService::new(&client);
        let telemetry = SessionTelemetry::new(3600, SiteTimeMap::new());

        let err = coach.suggestions(&telemetry).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Completion(CompletionError::MissingCredential)
        ));
    }

    #[tokio::test]
    async fn test_study_plan_rejects_empty_tasks_before_any_call() {
        let client = keyless_client();
        let coach = CoachService::new(&client);
        let input = StudyPlanInput {
            study_hours_per_day: 4,
            tasks: Vec::new(),
            preferred_study_time: None,
        };

        let err = coach.study_plan(&input).await.unwrap_err();
        assert!(matches!(err, AppError::Plan(_)));
    }
}

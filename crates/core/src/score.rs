//! Focus-score computation over session telemetry.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Seconds spent per domain during one study session.
pub type SiteTimeMap = HashMap<String, u64>;

/// Errors that can occur when computing a focus score.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoreError {
    /// Total study time was zero, leaving the distraction share undefined.
    #[error("total study time must be greater than zero")]
    ZeroStudyTime,
}

/// Telemetry for one completed study session.
///
/// `site_times` holds the seconds spent on each tracked site; keys are unique
/// domain names and insertion order carries no meaning. Telemetry is built
/// fresh per request and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTelemetry {
    /// Total length of the study session, in seconds.
    pub total_study_seconds: u64,
    /// Seconds spent on each visited site.
    pub site_times: SiteTimeMap,
}

impl SessionTelemetry {
    #[must_use]
    pub const fn new(total_study_seconds: u64, site_times: SiteTimeMap) -> Self {
        Self {
            total_study_seconds,
            site_times,
        }
    }

    /// Total seconds spent on tracked sites.
    #[must_use]
    pub fn distraction_seconds(&self) -> u64 {
        self.site_times
            .values()
            .fold(0, |acc, secs| acc.saturating_add(*secs))
    }
}

/// A focus score in `[0, 100]`; lower scores mean more distraction.
///
/// Scores are derived from telemetry via [`compute_score`] and are never
/// mutated independently.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct FocusScore(u8);

impl FocusScore {
    /// The fully focused score.
    pub const MAX: Self = Self(100);
    /// The fully distracted score.
    pub const MIN: Self = Self(0);

    /// Create a score, clamping values above 100.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        if value > 100 { Self(100) } else { Self(value) }
    }

    /// Get the underlying value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for FocusScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Compute the focus score for a session.
///
/// The distraction share is `100 * distraction_seconds / total_study_seconds`
/// in integer arithmetic, so the percentage floors; the score is 100 minus
/// that share, clamped to `[0, 100]`. Sessions where tracked time exceeds the
/// total (overlapping tabs, clock skew in the collector) clamp to 0 rather
/// than going negative.
///
/// # Errors
///
/// Returns [`ScoreError::ZeroStudyTime`] when `total_study_seconds` is zero.
pub fn compute_score(telemetry: &SessionTelemetry) -> Result<FocusScore, ScoreError> {
    if telemetry.total_study_seconds == 0 {
        return Err(ScoreError::ZeroStudyTime);
    }

    let distraction = telemetry.distraction_seconds();
    let share = distraction.saturating_mul(100) / telemetry.total_study_seconds;
    let share = u8::try_from(share.min(100)).unwrap_or(100);

    Ok(FocusScore(100 - share))
}

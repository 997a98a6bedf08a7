//! Wall-clock Pomodoro sessions.
//!
//! A session is an immutable value fixed at start time; the current phase and
//! remaining seconds are derived from elapsed wall-clock time on demand.
//! Nothing ticks in the background and nothing sleeps.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Work rounds in one full Pomodoro cycle; the long break follows the last.
pub const ROUNDS_PER_CYCLE: u32 = 4;

/// Errors that can occur when starting a timer session.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// The work phase was configured with zero minutes.
    #[error("work duration must be greater than zero")]
    ZeroWorkDuration,
}

/// Phase lengths for one Pomodoro cycle, in minutes.
///
/// Break lengths may be zero; zero-length phases are skipped when deriving
/// status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    pub work_minutes: u32,
    pub short_break_minutes: u32,
    pub long_break_minutes: u32,
}

impl TimerConfig {
    #[must_use]
    pub const fn new(work_minutes: u32, short_break_minutes: u32, long_break_minutes: u32) -> Self {
        Self {
            work_minutes,
            short_break_minutes,
            long_break_minutes,
        }
    }

    /// Check the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns [`TimerError::ZeroWorkDuration`] when the work phase is zero
    /// minutes long.
    pub const fn validate(&self) -> Result<(), TimerError> {
        if self.work_minutes == 0 {
            Err(TimerError::ZeroWorkDuration)
        } else {
            Ok(())
        }
    }
}

impl Default for TimerConfig {
    /// The classic 25/5/15 split.
    fn default() -> Self {
        Self::new(25, 5, 15)
    }
}

/// Where in the cycle a session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    Work,
    ShortBreak,
    LongBreak,
    Finished,
}

impl fmt::Display for TimerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Work => "work",
            Self::ShortBreak => "short_break",
            Self::LongBreak => "long_break",
            Self::Finished => "finished",
        };
        write!(f, "{name}")
    }
}

/// Point-in-time view of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerStatus {
    pub phase: TimerPhase,
    pub remaining_seconds: u64,
    /// Work round the status falls in, 1-based.
    pub round: u32,
}

/// One Pomodoro session.
///
/// The session never mutates after [`TimerSession::start`]; callers derive
/// the live view with [`TimerSession::status`] and their own clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSession {
    pub id: Uuid,
    pub config: TimerConfig,
    pub started_at: DateTime<Utc>,
}

impl TimerSession {
    /// Start a session at `now`.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration fails validation.
    pub fn start(config: TimerConfig, now: DateTime<Utc>) -> Result<Self, TimerError> {
        config.validate()?;
        Ok(Self {
            id: Uuid::new_v4(),
            config,
            started_at: now,
        })
    }

    /// Derive the phase, remaining seconds and round at `now`.
    ///
    /// The cycle is [`ROUNDS_PER_CYCLE`] work rounds with short breaks
    /// between them and the long break after the last; once the cycle is
    /// exhausted the session reports [`TimerPhase::Finished`]. A `now` before
    /// the start time clamps to the beginning of the first work round.
    #[must_use]
    pub fn status(&self, now: DateTime<Utc>) -> TimerStatus {
        let elapsed = u64::try_from((now - self.started_at).num_seconds()).unwrap_or(0);

        let mut left = elapsed;
        for round in 1..=ROUNDS_PER_CYCLE {
            let work = u64::from(self.config.work_minutes) * 60;
            if left < work {
                return TimerStatus {
                    phase: TimerPhase::Work,
                    remaining_seconds: work - left,
                    round,
                };
            }
            left -= work;

            let (phase, minutes) = if round < ROUNDS_PER_CYCLE {
                (TimerPhase::ShortBreak, self.config.short_break_minutes)
            } else {
                (TimerPhase::LongBreak, self.config.long_break_minutes)
            };
            let brk = u64::from(minutes) * 60;
            if left < brk {
                return TimerStatus {
                    phase,
                    remaining_seconds: brk - left,
                    round,
                };
            }
            left -= brk;
        }

        TimerStatus {
            phase: TimerPhase::Finished,
            remaining_seconds: 0,
            round: ROUNDS_PER_CYCLE,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn base_time() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_start_rejects_zero_work_duration() {
        let config = TimerConfig::new(0, 5, 15);
        assert_eq!(
            TimerSession::start(config, base_time()),
            Err(TimerError::ZeroWorkDuration)
        );
    }

    #[test]
    fn test_status_at_start_is_full_work_round() {
        let session = TimerSession::start(TimerConfig::default(), base_time()).unwrap();
        let status = session.status(base_time());

        assert_eq!(status.phase, TimerPhase::Work);
        assert_eq!(status.remaining_seconds, 25 * 60);
        assert_eq!(status.round, 1);
    }

    #[test]
    fn test_status_mid_work_round_counts_down() {
        let session = TimerSession::start(TimerConfig::default(), base_time()).unwrap();
        let status = session.status(base_time() + Duration::minutes(10));

        assert_eq!(status.phase, TimerPhase::Work);
        assert_eq!(status.remaining_seconds, 15 * 60);
        assert_eq!(status.round, 1);
    }

    #[test]
    fn test_status_enters_short_break_after_work() {
        let session = TimerSession::start(TimerConfig::default(), base_time()).unwrap();
        let status = session.status(base_time() + Duration::minutes(25));

        assert_eq!(status.phase, TimerPhase::ShortBreak);
        assert_eq!(status.remaining_seconds, 5 * 60);
        assert_eq!(status.round, 1);
    }

    #[test]
    fn test_status_advances_rounds() {
        let session = TimerSession::start(TimerConfig::default(), base_time()).unwrap();
        // One work round plus its break is 30 minutes.
        let status = session.status(base_time() + Duration::minutes(31));

        assert_eq!(status.phase, TimerPhase::Work);
        assert_eq!(status.round, 2);
    }

    #[test]
    fn test_status_long_break_after_final_round() {
        let session = TimerSession::start(TimerConfig::default(), base_time()).unwrap();
        // Three full 30-minute rounds, then the 25-minute fourth work round.
        let status = session.status(base_time() + Duration::minutes(115));

        assert_eq!(status.phase, TimerPhase::LongBreak);
        assert_eq!(status.remaining_seconds, 15 * 60);
        assert_eq!(status.round, 4);
    }

    #[test]
    fn test_status_finished_after_whole_cycle() {
        let session = TimerSession::start(TimerConfig::default(), base_time()).unwrap();
        let status = session.status(base_time() + Duration::minutes(130));

        assert_eq!(status.phase, TimerPhase::Finished);
        assert_eq!(status.remaining_seconds, 0);
    }

    #[test]
    fn test_status_clamps_when_now_precedes_start() {
        let session = TimerSession::start(TimerConfig::default(), base_time()).unwrap();
        let status = session.status(base_time() - Duration::minutes(5));

        assert_eq!(status.phase, TimerPhase::Work);
        assert_eq!(status.remaining_seconds, 25 * 60);
    }

    #[test]
    fn test_status_skips_zero_length_breaks() {
        let config = TimerConfig::new(25, 0, 0);
        let session = TimerSession::start(config, base_time()).unwrap();
        let status = session.status(base_time() + Duration::minutes(25));

        assert_eq!(status.phase, TimerPhase::Work);
        assert_eq!(status.round, 2);
    }

    #[test]
    fn test_phase_serde_representation() {
        assert_eq!(
            serde_json::to_string(&TimerPhase::ShortBreak).unwrap(),
            "\"short_break\""
        );
        assert_eq!(serde_json::to_string(&TimerPhase::Work).unwrap(), "\"work\"");
    }

    #[test]
    fn test_phase_display_matches_serde_names() {
        assert_eq!(TimerPhase::Work.to_string(), "work");
        assert_eq!(TimerPhase::ShortBreak.to_string(), "short_break");
        assert_eq!(TimerPhase::LongBreak.to_string(), "long_break");
        assert_eq!(TimerPhase::Finished.to_string(), "finished");
    }
}

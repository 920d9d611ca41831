use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Which phase the session machine is in. Exactly one is active at any time;
/// the process starts in `Stopped` and nothing is persisted across restarts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Stopped,
    Working,
    Paused,
}

impl SessionState {
    pub fn is_working(&self) -> bool {
        *self == SessionState::Working
    }

    pub fn is_paused(&self) -> bool {
        *self == SessionState::Paused
    }

    /// A session (work or pause) is in progress.
    pub fn is_running(&self) -> bool {
        self.is_working() || self.is_paused()
    }
}

/// The four intervals that drive the session machine, fixed at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Durations {
    /// Length of a work session.
    pub work: Duration,
    /// Length of a break.
    pub pause: Duration,
    /// Granularity of countdown updates.
    pub tick: Duration,
    /// How far before expiry the pre-expiry announcement fires.
    pub announce: Duration,
}

impl Durations {
    /// Check the interval invariants.
    ///
    /// The announcement lead must be strictly shorter than both session
    /// lengths -- a lead at or above the interval length would fire the
    /// announcement on the very first tick.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.work.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "timer.work_minutes".into(),
                message: "work duration must be non-zero".into(),
            });
        }
        if self.pause.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "timer.pause_minutes".into(),
                message: "pause duration must be non-zero".into(),
            });
        }
        if self.tick.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "timer.tick_seconds".into(),
                message: "tick interval must be non-zero".into(),
            });
        }
        if self.announce >= self.work {
            return Err(ConfigError::InvalidValue {
                key: "timer.announce_minutes".into(),
                message: "announcement lead must be shorter than the work duration".into(),
            });
        }
        if self.announce >= self.pause {
            return Err(ConfigError::InvalidValue {
                key: "timer.announce_minutes".into(),
                message: "announcement lead must be shorter than the pause duration".into(),
            });
        }
        Ok(())
    }
}

impl Default for Durations {
    /// 50 minutes of work, 10 minutes of pause, second-granularity ticks,
    /// announcement 5 minutes before expiry.
    fn default() -> Self {
        Self {
            work: Duration::from_secs(50 * 60),
            pause: Duration::from_secs(10 * 60),
            tick: Duration::from_secs(1),
            announce: Duration::from_secs(5 * 60),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_durations_are_valid() {
        assert!(Durations::default().validate().is_ok());
    }

    #[test]
    fn announce_must_be_below_work() {
        let d = Durations {
            work: Duration::from_secs(60),
            announce: Duration::from_secs(60),
            ..Durations::default()
        };
        assert!(d.validate().is_err());
    }

    #[test]
    fn announce_must_be_below_pause() {
        let d = Durations {
            pause: Duration::from_secs(120),
            announce: Duration::from_secs(300),
            ..Durations::default()
        };
        assert!(d.validate().is_err());
    }

    #[test]
    fn zero_tick_rejected() {
        let d = Durations {
            tick: Duration::ZERO,
            ..Durations::default()
        };
        assert!(d.validate().is_err());
    }

    #[test]
    fn state_predicates() {
        assert!(SessionState::Working.is_running());
        assert!(SessionState::Paused.is_running());
        assert!(!SessionState::Stopped.is_running());
        assert!(SessionState::Working.is_working());
        assert!(!SessionState::Working.is_paused());
    }
}

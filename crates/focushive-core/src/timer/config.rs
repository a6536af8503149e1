use serde::{Deserialize, Serialize};

use crate::error::TimerError;

/// Delay before an auto-resuming timer starts the next phase.
pub const AUTO_RESUME_DELAY_SECS: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Work,
    Break,
}

impl Phase {
    /// The phase that follows this one.
    pub fn next(self) -> Self {
        match self {
            Phase::Work => Phase::Break,
            Phase::Break => Phase::Work,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Work => "Focus Time",
            Phase::Break => "Break Time",
        }
    }
}

/// Durations and completion behaviour for one timer instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    pub work_duration_secs: u32,
    pub break_duration_secs: u32,
    /// Restart automatically after a phase completes.
    #[serde(default)]
    pub auto_resume: bool,
}

impl TimerConfig {
    /// Build a config from second values, rejecting anything that is not a
    /// positive `u32`.
    pub fn new(work_secs: i64, break_secs: i64, auto_resume: bool) -> Result<Self, TimerError> {
        let invalid = || TimerError::InvalidConfiguration {
            work_secs,
            break_secs,
        };
        let work = positive_u32(work_secs).ok_or_else(invalid)?;
        let brk = positive_u32(break_secs).ok_or_else(invalid)?;
        Ok(Self {
            work_duration_secs: work,
            break_duration_secs: brk,
            auto_resume,
        })
    }

    /// Build a config from minute values as typed into a form.
    pub fn from_minutes(
        work_min: i64,
        break_min: i64,
        auto_resume: bool,
    ) -> Result<Self, TimerError> {
        if work_min <= 0 || break_min <= 0 {
            return Err(TimerError::InvalidConfiguration {
                work_secs: work_min.saturating_mul(60),
                break_secs: break_min.saturating_mul(60),
            });
        }
        Self::new(
            work_min.saturating_mul(60),
            break_min.saturating_mul(60),
            auto_resume,
        )
    }

    pub fn duration_secs(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Work => self.work_duration_secs,
            Phase::Break => self.break_duration_secs,
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        TimerPreset::Page.config()
    }
}

fn positive_u32(value: i64) -> Option<u32> {
    if value > 0 {
        u32::try_from(value).ok()
    } else {
        None
    }
}

/// The two timer surfaces of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPreset {
    /// Dashboard widget: 25/5, waits for the user after each phase.
    Page,
    /// Study room overlay: 50/10, restarts on its own.
    Room,
}

impl TimerPreset {
    pub fn config(self) -> TimerConfig {
        match self {
            TimerPreset::Page => TimerConfig {
                work_duration_secs: 25 * 60,
                break_duration_secs: 5 * 60,
                auto_resume: false,
            },
            TimerPreset::Room => TimerConfig {
                work_duration_secs: 50 * 60,
                break_duration_secs: 10 * 60,
                auto_resume: true,
            },
        }
    }
}

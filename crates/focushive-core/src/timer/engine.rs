//! Timer engine implementation.
//!
//! The timer engine is a tick-driven state machine. It does not use internal
//! threads or clocks: whoever owns it calls [`TimerEngine::advance`] once per
//! elapsed second while [`TimerEngine::schedule`] is not idle. The async
//! [`TimerDriver`](super::TimerDriver) does exactly that on a tokio interval.
//!
//! ## State Transitions
//!
//! ```text
//! Work --(work countdown hits 0)--> Break --(break countdown hits 0)--> Work
//! ```
//!
//! Each transition pauses the countdown. With `auto_resume` set, the next
//! phase starts on its own after a short delay.
//!
//! ## Usage
//!
//! ```
//! use focushive_core::timer::{Phase, TimerEngine, TimerPreset};
//!
//! let mut engine = TimerEngine::new(TimerPreset::Page.config());
//! engine.start();
//! for _ in 0..1500 {
//!     engine.advance();
//! }
//! assert_eq!(engine.phase(), Phase::Break);
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::config::{Phase, TimerConfig, AUTO_RESUME_DELAY_SECS};
use crate::error::TimerError;
use crate::events::{Event, Notification};

/// What the engine wants its owner to schedule next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "secs")]
pub enum Schedule {
    /// Nothing scheduled.
    Idle,
    /// A one-second countdown tick.
    Ticking,
    /// Start again once this many seconds have passed.
    ResumeIn(u32),
}

/// Read-only view of the engine for a display layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub label: String,
    pub remaining_secs: u32,
    /// `remaining_secs` as `MM:SS`.
    pub remaining_formatted: String,
    pub running: bool,
    pub completed_work_sessions: u32,
    pub total_focus_minutes: u64,
    /// 0.0 .. 100.0 elapsed share of the current phase.
    pub progress_pct: f64,
}

/// Core countdown engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEngine {
    config: TimerConfig,
    phase: Phase,
    remaining_secs: u32,
    schedule: Schedule,
    completed_work_sessions: u32,
    /// Seconds of finished work phases; reported in whole minutes.
    total_focus_secs: u64,
}

impl TimerEngine {
    /// Create an idle engine at the start of a Work phase.
    pub fn new(config: TimerConfig) -> Self {
        Self {
            remaining_secs: config.work_duration_secs,
            config,
            phase: Phase::Work,
            schedule: Schedule::Idle,
            completed_work_sessions: 0,
            total_focus_secs: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.schedule == Schedule::Ticking
    }

    pub fn schedule(&self) -> Schedule {
        self.schedule
    }

    pub fn completed_work_sessions(&self) -> u32 {
        self.completed_work_sessions
    }

    pub fn total_focus_minutes(&self) -> u64 {
        self.total_focus_secs / 60
    }

    pub fn total_secs(&self) -> u32 {
        self.config.duration_secs(self.phase)
    }

    /// 0.0 .. 100.0 progress within the current phase.
    pub fn progress_pct(&self) -> f64 {
        let total = self.total_secs();
        if total == 0 {
            return 0.0;
        }
        let elapsed = total.saturating_sub(self.remaining_secs);
        f64::from(elapsed) / f64::from(total) * 100.0
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            label: self.phase.label().to_string(),
            remaining_secs: self.remaining_secs,
            remaining_formatted: format_mm_ss(self.remaining_secs),
            running: self.is_running(),
            completed_work_sessions: self.completed_work_sessions,
            total_focus_minutes: self.total_focus_minutes(),
            progress_pct: self.progress_pct(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        if self.is_running() {
            return None;
        }
        debug!(phase = ?self.phase, remaining = self.remaining_secs, "timer started");
        self.schedule = Schedule::Ticking;
        Some(Event::TimerStarted {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Stop the countdown. Also drops a pending auto-resume, so nothing
    /// restarts the timer behind the user's back.
    pub fn pause(&mut self) -> Option<Event> {
        match self.schedule {
            Schedule::Idle => None,
            Schedule::Ticking | Schedule::ResumeIn(_) => {
                debug!(remaining = self.remaining_secs, "timer paused");
                self.schedule = Schedule::Idle;
                Some(Event::TimerPaused {
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
        }
    }

    pub fn toggle(&mut self) -> Option<Event> {
        if self.is_running() {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Stop and rewind the current phase. The phase itself is kept.
    pub fn reset(&mut self) -> Option<Event> {
        self.schedule = Schedule::Idle;
        self.remaining_secs = self.config.duration_secs(self.phase);
        debug!(phase = ?self.phase, remaining = self.remaining_secs, "timer reset");
        Some(Event::TimerReset {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Replace both durations and reset. Invalid input leaves every piece of
    /// state as it was.
    pub fn update_config(&mut self, work_secs: i64, break_secs: i64) -> Result<Vec<Event>, TimerError> {
        let config = TimerConfig::new(work_secs, break_secs, self.config.auto_resume)
            .inspect_err(|err| warn!(%err, "rejected timer configuration"))?;
        info!(
            work_secs = config.work_duration_secs,
            break_secs = config.break_duration_secs,
            "timer configuration updated"
        );
        self.config = config;
        let mut events = vec![Event::ConfigUpdated {
            work_duration_secs: config.work_duration_secs,
            break_duration_secs: config.break_duration_secs,
            at: Utc::now(),
        }];
        events.extend(self.reset());
        Ok(events)
    }

    /// Call once per elapsed second while the schedule is not idle.
    pub fn advance(&mut self) -> Vec<Event> {
        match self.schedule {
            Schedule::Idle => Vec::new(),
            Schedule::Ticking => self.tick(),
            Schedule::ResumeIn(secs) => {
                let left = secs.saturating_sub(1);
                if left == 0 {
                    self.schedule = Schedule::Idle;
                    self.start().into_iter().collect()
                } else {
                    self.schedule = Schedule::ResumeIn(left);
                    Vec::new()
                }
            }
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn tick(&mut self) -> Vec<Event> {
        if !self.is_running() {
            return Vec::new();
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        let mut events = vec![Event::TimerTicked {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        }];
        if self.remaining_secs == 0 {
            events.extend(self.complete_phase());
        }
        events
    }

    fn complete_phase(&mut self) -> Vec<Event> {
        self.schedule = Schedule::Idle;
        let from = self.phase;
        if from == Phase::Work {
            self.completed_work_sessions = self.completed_work_sessions.saturating_add(1);
            self.total_focus_secs = self
                .total_focus_secs
                .saturating_add(u64::from(self.config.work_duration_secs));
        }
        self.phase = from.next();
        self.remaining_secs = self.config.duration_secs(self.phase);
        info!(
            ?from,
            to = ?self.phase,
            sessions = self.completed_work_sessions,
            "phase completed"
        );

        let now = Utc::now();
        let mut events = vec![Event::PhaseCompleted {
            from,
            to: self.phase,
            completed_work_sessions: self.completed_work_sessions,
            total_focus_minutes: self.total_focus_minutes(),
            notification: Notification::for_completed(from),
            at: now,
        }];
        if self.config.auto_resume {
            self.schedule = Schedule::ResumeIn(AUTO_RESUME_DELAY_SECS);
            events.push(Event::AutoResumeScheduled {
                delay_secs: AUTO_RESUME_DELAY_SECS,
                at: now,
            });
        }
        events
    }
}

/// Format seconds as `MM:SS`. Minutes are not wrapped into hours.
pub fn format_mm_ss(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

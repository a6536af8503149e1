//! Local user presence derived from activity timestamps.
//!
//! Online until two minutes without activity, then Idle, then Away after a
//! further five minutes. A hidden window is always Away.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

const IDLE_AFTER_MINUTES: i64 = 2;
const AWAY_AFTER_IDLE_MINUTES: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceStatus {
    Online,
    Idle,
    Away,
}

impl PresenceStatus {
    pub fn text(self) -> &'static str {
        match self {
            PresenceStatus::Online => "Online",
            PresenceStatus::Idle => "Idle",
            PresenceStatus::Away => "Away",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceTracker {
    last_activity: DateTime<Utc>,
    hidden: bool,
}

impl PresenceTracker {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            last_activity: now,
            hidden: false,
        }
    }

    pub fn record_activity(&mut self, now: DateTime<Utc>) {
        self.last_activity = self.last_activity.max(now);
    }

    /// The window was hidden or shown again. Showing counts as activity.
    pub fn set_hidden(&mut self, hidden: bool, now: DateTime<Utc>) {
        self.hidden = hidden;
        if !hidden {
            self.record_activity(now);
        }
    }

    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_activity
    }

    pub fn observe(&self, now: DateTime<Utc>) -> PresenceStatus {
        if self.hidden {
            return PresenceStatus::Away;
        }
        let quiet = now - self.last_activity;
        let idle_after = Duration::minutes(IDLE_AFTER_MINUTES);
        if quiet < idle_after {
            PresenceStatus::Online
        } else if quiet < idle_after + Duration::minutes(AWAY_AFTER_IDLE_MINUTES) {
            PresenceStatus::Idle
        } else {
            PresenceStatus::Away
        }
    }
}

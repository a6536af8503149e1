use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::timer::Phase;

/// Every state change in the timer produces an Event.
/// Presentation layers render from snapshots; events tell them what happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        phase: Phase,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        phase: Phase,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerTicked {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    PhaseCompleted {
        from: Phase,
        to: Phase,
        completed_work_sessions: u32,
        total_focus_minutes: u64,
        notification: Notification,
        at: DateTime<Utc>,
    },
    /// The finished phase will restart on its own after `delay_secs`.
    AutoResumeScheduled {
        delay_secs: u32,
        at: DateTime<Utc>,
    },
    ConfigUpdated {
        work_duration_secs: u32,
        break_duration_secs: u32,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// The user-facing notification carried by this event, if any.
    pub fn notification(&self) -> Option<&Notification> {
        match self {
            Event::PhaseCompleted { notification, .. } => Some(notification),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

/// A toast-style message for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Info,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Error,
        }
    }

    /// Error toast for input the user has to correct.
    pub fn for_rejected(err: &ValidationError) -> Self {
        match err {
            ValidationError::UnsupportedImageType(_) => {
                Self::error("Please select a valid image file (JPEG, PNG, GIF, or WEBP)")
            }
            ValidationError::ImageTooLarge { .. } => Self::error("Image size must be less than 2MB"),
            other => Self::error(other.to_string()),
        }
    }

    /// Message shown when `from` finishes.
    pub fn for_completed(from: Phase) -> Self {
        match from {
            Phase::Work => Self::success("Work session completed! Time for a break."),
            Phase::Break => Self::info("Break time over! Back to work."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_type_tag() {
        let event = Event::TimerPaused {
            remaining_secs: 42,
            at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "TimerPaused");
        assert_eq!(json["remaining_secs"], 42);
    }

    #[test]
    fn completion_messages_match_phase() {
        let work = Notification::for_completed(Phase::Work);
        assert_eq!(work.kind, NotificationKind::Success);
        assert!(work.message.contains("Time for a break"));

        let brk = Notification::for_completed(Phase::Break);
        assert_eq!(brk.kind, NotificationKind::Info);
        assert!(brk.message.contains("Back to work"));
    }

    #[test]
    fn rejected_input_becomes_error_toast() {
        let note = Notification::for_rejected(&ValidationError::ImageTooLarge { size: 3_000_000 });
        assert_eq!(note.kind, NotificationKind::Error);
        assert_eq!(note.message, "Image size must be less than 2MB");

        let note = Notification::for_rejected(&ValidationError::UnsupportedImageType(
            "image/svg+xml".into(),
        ));
        assert_eq!(
            note.message,
            "Please select a valid image file (JPEG, PNG, GIF, or WEBP)"
        );

        let note = Notification::for_rejected(&ValidationError::EmptyTodo);
        assert_eq!(note.kind, NotificationKind::Error);
        assert_eq!(note.message, "Todo text cannot be empty");
    }
}

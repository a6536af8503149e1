//! Output seams between the timer and whatever presents it.

use super::engine::Snapshot;
use crate::events::Notification;

/// Receives a fresh snapshot after every state change.
pub trait DisplaySink: Send {
    fn render(&mut self, snapshot: &Snapshot);
}

/// Receives user-facing messages, e.g. on phase completion.
pub trait NotificationSink: Send {
    fn notify(&mut self, notification: &Notification);
}

impl<F> DisplaySink for F
where
    F: FnMut(&Snapshot) + Send,
{
    fn render(&mut self, snapshot: &Snapshot) {
        self(snapshot)
    }
}

impl<F> NotificationSink for F
where
    F: FnMut(&Notification) + Send,
{
    fn notify(&mut self, notification: &Notification) {
        self(notification)
    }
}

/// Sink that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct Discard;

impl DisplaySink for Discard {
    fn render(&mut self, _snapshot: &Snapshot) {}
}

impl NotificationSink for Discard {
    fn notify(&mut self, _notification: &Notification) {}
}

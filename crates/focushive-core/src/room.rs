//! Study room lobby: which room the user is sitting in.
//!
//! Rooms are cosmetic; there is no other participant to talk to. The lobby
//! only tracks the local user's membership and produces the notifications
//! shown on join and leave.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, ValidationError};
use crate::events::Notification;
use crate::storage::{load_json, save_json, KeyValueStore};
use crate::timer::{TimerConfig, TimerPreset};

/// Storage key for the serialized lobby state.
pub const ROOM_KEY: &str = "focushive.room";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    /// Host whose room was joined.
    pub host: String,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lobby {
    current: Option<Membership>,
}

impl Lobby {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Result<Self> {
        Ok(load_json(store, ROOM_KEY)?.unwrap_or_default())
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<()> {
        save_json(store, ROOM_KEY, self)?;
        Ok(())
    }

    pub fn current(&self) -> Option<&Membership> {
        self.current.as_ref()
    }

    /// Enter `host`'s room, leaving any room the user is already in.
    pub fn join(&mut self, host: &str, now: DateTime<Utc>) -> Result<Vec<Notification>> {
        let host = host.trim();
        if host.is_empty() {
            return Err(ValidationError::EmptyRoomName.into());
        }
        let mut notes: Vec<Notification> = self.leave().into_iter().collect();
        info!(host, "joined study room");
        self.current = Some(Membership {
            host: host.to_string(),
            joined_at: now,
        });
        notes.push(Notification::success(format!(
            "You've joined {host}'s study room!"
        )));
        Ok(notes)
    }

    /// Leave the current room, if any.
    pub fn leave(&mut self) -> Option<Notification> {
        let left = self.current.take()?;
        info!(host = %left.host, "left study room");
        Some(Notification::info(format!(
            "You've left {}'s study room",
            left.host
        )))
    }

    /// Timer settings for the in-room focus overlay.
    pub fn overlay_config(&self) -> TimerConfig {
        TimerPreset::Room.config()
    }
}

//! # FocusHive Core Library
//!
//! Core logic behind the FocusHive study tracker. Presentation layers (the
//! `focushive` CLI today) render snapshots and notifications produced here
//! and never own timer or profile state themselves.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a tick-driven Work/Break countdown state machine
//! - **Timer Driver**: a tokio task feeding the engine one tick per second
//! - **Profile / Todo / Room**: explicit state objects with load/save against
//!   an injected key-value store
//! - **Storage**: SQLite key-value store and TOML configuration
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`TimerDriver`]: One-second scheduling with deterministic cancellation
//! - [`KeyValueStore`]: Storage seam shared by every persisted object
//! - [`Config`]: Application configuration management

pub mod error;
pub mod events;
pub mod presence;
pub mod profile;
pub mod quotes;
pub mod room;
pub mod storage;
pub mod timer;
pub mod todo;

pub use error::{ConfigError, CoreError, StorageError, TimerError, ValidationError};
pub use events::{Event, Notification, NotificationKind};
pub use presence::{PresenceStatus, PresenceTracker};
pub use profile::{AvatarUpload, ProfileEditor, ProfileForm, UserProfile};
pub use room::Lobby;
pub use storage::{Config, KeyValueStore, MemoryStore, SqliteStore};
pub use timer::{
    DisplaySink, NotificationSink, Phase, Snapshot, TimerConfig, TimerDriver, TimerEngine,
    TimerPreset,
};
pub use todo::{Priority, Todo, TodoList, TodoStats};

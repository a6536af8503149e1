//! Core error types for focushive-core.
//!
//! Every fallible operation in the library reports one of the enums below,
//! wrapped by [`CoreError`] when it crosses module boundaries.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for focushive-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Timer engine errors
    #[error("Timer error: {0}")]
    Timer(#[from] TimerError),

    /// Key-value storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Timer engine errors.
///
/// The engine has a single failure mode: a configuration update with a
/// non-positive (or out of range) duration. The previous configuration and
/// the running session are left untouched when it is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    #[error(
        "Invalid timer configuration: work ({work_secs}s) and break ({break_secs}s) durations must be positive"
    )]
    InvalidConfiguration { work_secs: i64, break_secs: i64 },
}

/// Key-value storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the backing database
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Store is locked")]
    Locked,

    /// Stored value could not be decoded
    #[error("Corrupt value under key '{key}': {message}")]
    Corrupt { key: String, message: String },

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// A single form field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation errors for user input reaching the core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more profile form fields are invalid
    #[error("{}", join_fields(.0))]
    Form(Vec<FieldError>),

    /// Avatar image has an unsupported type
    #[error("Please select a valid image file (JPEG, PNG, GIF, or WEBP), got '{0}'")]
    UnsupportedImageType(String),

    /// Avatar image is too large
    #[error("Image size must be less than 2MB ({size} bytes given)")]
    ImageTooLarge { size: u64 },

    /// Todo text was blank
    #[error("Todo text cannot be empty")]
    EmptyTodo,

    /// No todo with the given id
    #[error("No todo with id {0}")]
    UnknownTodo(u64),

    /// Room host name was blank
    #[error("Room name cannot be empty")]
    EmptyRoomName,

    /// Value could not be parsed
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(inner, _msg)
                if inner.code == rusqlite::ErrorCode::DatabaseLocked =>
            {
                StorageError::Locked
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

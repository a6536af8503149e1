//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Dashboard timer durations
//! - Study room overlay timer durations
//! - Notification preferences
//! - Log level
//!
//! Configuration is stored at `~/.config/focushive/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{ConfigError, TimerError};
use crate::timer::{TimerConfig, TimerPreset};

/// Durations for one timer surface, in minutes as the user types them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSection {
    pub work_minutes: i64,
    pub break_minutes: i64,
    #[serde(default)]
    pub auto_resume: bool,
}

impl TimerSection {
    fn from_preset(preset: TimerPreset) -> Self {
        let cfg = preset.config();
        Self {
            work_minutes: i64::from(cfg.work_duration_secs / 60),
            break_minutes: i64::from(cfg.break_duration_secs / 60),
            auto_resume: cfg.auto_resume,
        }
    }

    /// Validate into an engine configuration.
    pub fn to_timer_config(&self) -> Result<TimerConfig, TimerError> {
        TimerConfig::from_minutes(self.work_minutes, self.break_minutes, self.auto_resume)
    }
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Logging configuration. `RUST_LOG` overrides it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/focushive/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_page_timer")]
    pub timer: TimerSection,
    #[serde(default = "default_room_timer")]
    pub room: TimerSection,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub log: LogConfig,
}

fn default_page_timer() -> TimerSection {
    TimerSection::from_preset(TimerPreset::Page)
}
fn default_room_timer() -> TimerSection {
    TimerSection::from_preset(TimerPreset::Room)
}
fn default_true() -> bool {
    true
}
fn default_log_level() -> String {
    "info".into()
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timer: default_page_timer(),
            room: default_room_timer(),
            notifications: NotificationsConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(format!("expected true or false: {e}")))?,
                    ),
                    serde_json::Value::Number(_) => serde_json::Value::Number(
                        value
                            .parse::<i64>()
                            .map_err(|e| invalid(format!("cannot parse '{value}' as integer: {e}")))?
                            .into(),
                    ),
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(invalid("cannot overwrite a whole section".into()));
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("config.toml"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from the data directory, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the data directory.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value has the wrong type,
    /// or the resulting timer durations are not positive.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let mut json = serde_json::to_value(&*self).map_err(|e| invalid(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| invalid(e.to_string()))?;
        updated
            .timer
            .to_timer_config()
            .and(updated.room.to_timer_config())
            .map_err(|e| invalid(e.to_string()))?;
        *self = updated;
        Ok(())
    }

    pub fn timer_config(&self) -> Result<TimerConfig, TimerError> {
        self.timer.to_timer_config()
    }

    pub fn room_config(&self) -> Result<TimerConfig, TimerError> {
        self.room.to_timer_config()
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.timer, cfg.timer);
        assert_eq!(parsed.room, cfg.room);
        assert_eq!(parsed.log.level, "info");
    }

    #[test]
    fn defaults_match_presets() {
        let cfg = Config::default();
        assert_eq!(cfg.timer_config().unwrap(), TimerPreset::Page.config());
        assert_eq!(cfg.room_config().unwrap(), TimerPreset::Room.config());
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let parsed: Config = toml::from_str("[timer]\nwork_minutes = 30\nbreak_minutes = 6\n").unwrap();
        assert_eq!(parsed.timer.work_minutes, 30);
        assert!(!parsed.timer.auto_resume);
        assert_eq!(parsed.room.work_minutes, 50);
        assert!(parsed.notifications.enabled);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("timer.work_minutes").as_deref(), Some("25"));
        assert_eq!(cfg.get("room.auto_resume").as_deref(), Some("true"));
        assert_eq!(cfg.get("log.level").as_deref(), Some("info"));
        assert!(cfg.get("timer.missing_key").is_none());
    }

    #[test]
    fn set_updates_nested_values() {
        let mut cfg = Config::default();
        cfg.set("timer.work_minutes", "45").unwrap();
        cfg.set("notifications.enabled", "false").unwrap();
        cfg.set("log.level", "debug").unwrap();
        assert_eq!(cfg.timer.work_minutes, 45);
        assert!(!cfg.notifications.enabled);
        assert_eq!(cfg.log.level, "debug");
    }

    #[test]
    fn set_rejects_unknown_key_and_bad_types() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("timer.nonexistent", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(cfg.set("notifications.enabled", "sometimes").is_err());
        assert!(cfg.set("timer", "5").is_err());
    }

    #[test]
    fn set_rejects_non_positive_durations() {
        let mut cfg = Config::default();
        assert!(cfg.set("timer.break_minutes", "0").is_err());
        assert!(cfg.set("room.work_minutes", "-5").is_err());
        assert_eq!(cfg.timer.break_minutes, 5);
        assert_eq!(cfg.room.work_minutes, 50);
    }

    #[test]
    fn load_from_writes_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.timer.work_minutes, 25);

        let mut cfg = cfg;
        cfg.set("room.break_minutes", "15").unwrap();
        cfg.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().room.break_minutes, 15);
    }
}

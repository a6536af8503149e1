//! `focushive config`: inspect and edit `config.toml`.
//!
//! Duration edits are checked the way the timer will read them before
//! anything is written.

use clap::Subcommand;
use focushive_core::storage::TimerSection;
use focushive_core::{Config, TimerConfig, TimerPreset};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one value
    Get {
        /// Dot-separated key (e.g. "timer.work_minutes", "room.auto_resume")
        key: String,
    },
    /// Change one value and save
    Set {
        /// Dot-separated key
        key: String,
        /// New value
        value: String,
    },
    /// Show both timer surfaces and the remaining settings
    List {
        /// Print the raw config as JSON
        #[arg(long)]
        json: bool,
    },
    /// Restore the default presets
    Reset,
}

/// e.g. `25 min work / 5 min break, auto-resume off`
fn describe(timer: &TimerConfig) -> String {
    format!(
        "{} min work / {} min break, auto-resume {}",
        timer.work_duration_secs / 60,
        timer.break_duration_secs / 60,
        if timer.auto_resume { "on" } else { "off" }
    )
}

/// Timer section a dotted key belongs to, with its name.
fn section_of<'a>(config: &'a Config, key: &str) -> Option<(&'static str, &'a TimerSection)> {
    match key.split_once('.')?.0 {
        "timer" => Some(("timer", &config.timer)),
        "room" => Some(("room", &config.room)),
        _ => None,
    }
}

fn check_duration(config: &Config, key: &str, value: &str) -> Result<(), String> {
    let Some((_, section)) = section_of(config, key) else {
        return Ok(());
    };
    let field = key.split_once('.').map_or("", |(_, field)| field);
    if field != "work_minutes" && field != "break_minutes" {
        return Ok(());
    }
    let minutes: i64 = value
        .trim()
        .parse()
        .map_err(|_| format!("{key} takes whole minutes, got '{value}'"))?;
    let (work, brk) = if field == "work_minutes" {
        (minutes, section.break_minutes)
    } else {
        (section.work_minutes, minutes)
    };
    TimerConfig::from_minutes(work, brk, section.auto_resume)
        .map(drop)
        .map_err(|_| format!("{key} must be at least 1 minute, got {minutes}"))
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => {
                    eprintln!("unknown key: {key}");
                    std::process::exit(1);
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            check_duration(&config, &key, &value)?;
            config.set(&key, &value)?;
            config.save()?;
            match section_of(&config, &key) {
                Some((name, section)) => {
                    println!("{name}: {}", describe(&section.to_timer_config()?))
                }
                None => println!("ok"),
            }
        }
        ConfigAction::List { json } => {
            let config = Config::load()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
                return Ok(());
            }
            println!("[timer]          {}", describe(&config.timer_config()?));
            println!("[room]           {}", describe(&config.room_config()?));
            println!("[notifications]  enabled = {}", config.notifications.enabled);
            println!("[log]            level = {}", config.log.level);
        }
        ConfigAction::Reset => {
            Config::default().save()?;
            println!("config reset to defaults");
            println!("  timer: {}", describe(&TimerPreset::Page.config()));
            println!("  room:  {}", describe(&TimerPreset::Room.config()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_reads_in_minutes() {
        assert_eq!(
            describe(&TimerPreset::Room.config()),
            "50 min work / 10 min break, auto-resume on"
        );
    }

    #[test]
    fn duration_keys_are_checked() {
        let cfg = Config::default();
        assert!(check_duration(&cfg, "timer.work_minutes", "40").is_ok());
        assert_eq!(
            check_duration(&cfg, "room.break_minutes", "0").unwrap_err(),
            "room.break_minutes must be at least 1 minute, got 0"
        );
        assert!(check_duration(&cfg, "timer.work_minutes", "ten")
            .unwrap_err()
            .contains("whole minutes"));
    }

    #[test]
    fn other_keys_pass_through() {
        let cfg = Config::default();
        assert!(check_duration(&cfg, "timer.auto_resume", "true").is_ok());
        assert!(check_duration(&cfg, "log.level", "debug").is_ok());
        assert!(section_of(&cfg, "notifications.enabled").is_none());
        assert_eq!(section_of(&cfg, "room.work_minutes").map(|(n, _)| n), Some("room"));
    }
}

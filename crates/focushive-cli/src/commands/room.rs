use chrono::Utc;
use clap::Subcommand;
use focushive_core::quotes::random_quote;
use focushive_core::storage::{load_json, save_json};
use focushive_core::{Config, Lobby, PresenceTracker, SqliteStore};

use super::{print_notification, toast_rejection};
use super::timer::run_foreground;

const PRESENCE_KEY: &str = "focushive.presence";

#[derive(Subcommand)]
pub enum RoomAction {
    /// Join a host's study room
    Join { host: String },
    /// Leave the current room
    Leave,
    /// Show the current room and your presence
    Status,
    /// Start the in-room focus timer (50 min work, 10 min break by default)
    Focus,
}

/// Mark the user active; returns the tracker as it was before this command.
fn touch_presence(store: &mut SqliteStore) -> Result<PresenceTracker, Box<dyn std::error::Error>> {
    let now = Utc::now();
    let previous: PresenceTracker =
        load_json(&*store, PRESENCE_KEY)?.unwrap_or_else(|| PresenceTracker::new(now));
    let mut current = previous.clone();
    current.record_activity(now);
    save_json(store, PRESENCE_KEY, &current)?;
    Ok(previous)
}

pub fn run(action: RoomAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = SqliteStore::open()?;
    let mut lobby = Lobby::load(&store)?;
    let previous = touch_presence(&mut store)?;

    match action {
        RoomAction::Join { host } => {
            for note in toast_rejection(lobby.join(&host, Utc::now()))? {
                print_notification(&note);
            }
            lobby.save(&mut store)?;
        }
        RoomAction::Leave => match lobby.leave() {
            Some(note) => {
                print_notification(&note);
                lobby.save(&mut store)?;
            }
            None => println!("not in a study room"),
        },
        RoomAction::Status => {
            let now = Utc::now();
            match lobby.current() {
                Some(room) => println!(
                    "In {}'s study room for {} min",
                    room.host,
                    (now - room.joined_at).num_minutes()
                ),
                None => println!("Not in a study room"),
            }
            println!(
                "Presence: {} (last active {} min ago)",
                previous.observe(now).text(),
                (now - previous.last_activity()).num_minutes()
            );
        }
        RoomAction::Focus => {
            let config = Config::load()?;
            let timer = config.room_config()?;
            match lobby.current() {
                Some(room) => println!("Focus session in {}'s study room", room.host),
                None => println!("Solo focus session"),
            }
            println!(
                "{} min work / {} min break",
                timer.work_duration_secs / 60,
                timer.break_duration_secs / 60
            );
            println!("  {}", random_quote());
            // Release the store before blocking on the timer.
            drop(store);
            run_foreground(timer, true, &config)?;
        }
    }
    Ok(())
}


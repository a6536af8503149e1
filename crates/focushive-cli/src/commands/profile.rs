//! Profile commands: show the header stats, edit personal information,
//! and manage the avatar.

use std::path::PathBuf;

use clap::Subcommand;
use focushive_core::{AvatarUpload, CoreError, ProfileEditor, SqliteStore};

use super::{print_notification, toast_rejection};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the saved profile
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Edit personal information; omitted fields keep their saved value
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        bio: Option<String>,
    },
    /// Set the profile picture (JPEG, PNG, GIF or WEBP, at most 2MB)
    Avatar {
        /// Image file
        path: PathBuf,
    },
    /// Remove the profile picture
    DeleteAvatar,
}

pub fn run(action: ProfileAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = SqliteStore::open()?;
    let mut editor = ProfileEditor::open(&mut store)?;

    match action {
        ProfileAction::Show { json } => {
            let profile = editor.profile();
            if json {
                println!("{}", serde_json::to_string_pretty(profile)?);
                return Ok(());
            }
            println!("{} ({})", profile.display_name(), profile.initial());
            println!("  Email:   {}", profile.email);
            println!("  Phone:   {}", profile.phone);
            println!("  Bio:     {}", profile.bio);
            println!(
                "  Avatar:  {}",
                if profile.profile_image.is_some() { "set" } else { "none" }
            );
            println!(
                "  Study hours: {}  Day streak: {}  Weekly goal: {}%",
                profile.study_hours, profile.day_streak, profile.weekly_goal
            );
        }
        ProfileAction::Update {
            name,
            email,
            phone,
            bio,
        } => {
            let mut form = editor.profile().form();
            if let Some(name) = name {
                form.full_name = name;
            }
            if let Some(email) = email {
                form.email = email;
            }
            if let Some(phone) = phone {
                form.phone = phone;
            }
            if let Some(bio) = bio {
                form.bio = bio;
            }
            print_notification(&toast_rejection(editor.submit(&form))?);
        }
        ProfileAction::Avatar { path } => {
            let mime = path
                .extension()
                .and_then(|e| e.to_str())
                .map(AvatarUpload::mime_for_extension)
                .unwrap_or("application/octet-stream");
            let size = std::fs::metadata(&path)?.len();
            toast_rejection(AvatarUpload::check_size(size).map_err(CoreError::from))?;
            let upload = AvatarUpload::new(mime, std::fs::read(&path)?);
            print_notification(&toast_rejection(editor.set_avatar(&upload))?);
        }
        ProfileAction::DeleteAvatar => match editor.delete_avatar()? {
            Some(note) => print_notification(&note),
            None => println!("no profile picture to delete"),
        },
    }
    Ok(())
}

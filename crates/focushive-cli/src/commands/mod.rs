pub mod config;
pub mod profile;
pub mod room;
pub mod timer;
pub mod todo;

use focushive_core::{CoreError, Notification, NotificationKind};

/// Print a notification as a one-line `[kind] message` toast.
pub fn print_notification(note: &Notification) {
    let tag = match note.kind {
        NotificationKind::Info => "info",
        NotificationKind::Success => "ok",
        NotificationKind::Error => "error",
    };
    println!("[{tag}] {}", note.message);
}

/// Show input the core rejected as an error toast, then pass the error on.
pub fn toast_rejection<T>(
    result: focushive_core::error::Result<T>,
) -> Result<T, Box<dyn std::error::Error>> {
    result.map_err(|err| {
        if let CoreError::Validation(rejected) = &err {
            print_notification(&Notification::for_rejected(rejected));
        }
        err.into()
    })
}

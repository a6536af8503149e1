//! Integration tests for state objects persisted in the SQLite store.

use chrono::Utc;
use focushive_core::profile::PROFILE_KEY;
use focushive_core::{
    AvatarUpload, Config, KeyValueStore, Lobby, Priority, ProfileEditor, ProfileForm,
    SqliteStore, TodoList,
};

fn form() -> ProfileForm {
    ProfileForm {
        full_name: "Noor Haddad".into(),
        email: "noor@example.org".into(),
        phone: String::new(),
        bio: "Organic chemistry, mostly.".into(),
    }
}

#[test]
fn test_state_survives_reopening_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("focushive.db");

    {
        let mut store = SqliteStore::open_at(&path).unwrap();

        let mut editor = ProfileEditor::new(&mut store);
        editor.submit(&form()).unwrap();
        editor
            .set_avatar(&AvatarUpload::new("image/webp", b"RIFF".to_vec()))
            .unwrap();

        let mut todos = TodoList::load(&store).unwrap();
        todos.add("Flashcards: reaction types", Priority::High).unwrap();
        todos.add("Lab report", Priority::Low).unwrap();
        todos.save(&mut store).unwrap();

        let mut lobby = Lobby::load(&store).unwrap();
        lobby.join("Maya", Utc::now()).unwrap();
        lobby.save(&mut store).unwrap();
    }

    let mut store = SqliteStore::open_at(&path).unwrap();
    let editor = ProfileEditor::open(&mut store).unwrap();
    assert_eq!(editor.profile().full_name, "Noor Haddad");
    assert!(editor
        .profile()
        .profile_image
        .as_deref()
        .unwrap()
        .starts_with("data:image/webp;base64,"));

    let todos = TodoList::load(&store).unwrap();
    assert_eq!(todos.stats().total, 2);
    assert_eq!(todos.stats().pending, 2);

    let lobby = Lobby::load(&store).unwrap();
    assert_eq!(lobby.current().unwrap().host, "Maya");
}

#[test]
fn test_profile_json_uses_page_field_names() {
    let mut store = SqliteStore::open_memory().unwrap();
    ProfileEditor::new(&mut store).submit(&form()).unwrap();

    let raw = store.get(PROFILE_KEY).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["fullName"], "Noor Haddad");
    assert_eq!(json["weeklyGoal"], 89);
    assert!(json["profileImage"].is_null());
}

#[test]
fn test_corrupt_todo_list_is_reported() {
    let mut store = SqliteStore::open_memory().unwrap();
    store.set(focushive_core::todo::TODOS_KEY, "[1, 2").unwrap();
    assert!(TodoList::load(&store).is_err());
}

#[test]
fn test_config_file_drives_timer_configs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[timer]\nwork_minutes = 40\nbreak_minutes = 8\n\n[room]\nwork_minutes = 50\nbreak_minutes = 10\nauto_resume = true\n",
    )
    .unwrap();

    let cfg = Config::load_from(&path).unwrap();
    let timer = cfg.timer_config().unwrap();
    assert_eq!(timer.work_duration_secs, 2400);
    assert_eq!(timer.break_duration_secs, 480);
    assert!(!timer.auto_resume);
    assert!(cfg.room_config().unwrap().auto_resume);
}

#[test]
fn test_invalid_config_file_durations_surface_as_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[timer]\nwork_minutes = 0\nbreak_minutes = 5\n").unwrap();
    let cfg = Config::load_from(&path).unwrap();
    assert!(cfg.timer_config().is_err());
}

//! Integration tests for the countdown engine and its driver.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use focushive_core::timer::{Discard, Schedule};
use focushive_core::{
    Event, Notification, NotificationKind, Phase, Snapshot, TimerConfig, TimerDriver,
    TimerEngine, TimerError, TimerPreset,
};
use proptest::prelude::*;

fn run(engine: &mut TimerEngine, secs: u32) -> Vec<Event> {
    (0..secs).flat_map(|_| engine.advance()).collect()
}

#[test]
fn test_full_work_break_cycle() {
    let mut engine = TimerEngine::new(TimerConfig::new(1500, 300, false).unwrap());
    engine.start();
    run(&mut engine, 1500);

    let snap = engine.snapshot();
    assert_eq!(snap.phase, Phase::Break);
    assert_eq!(snap.remaining_secs, 300);
    assert_eq!(snap.completed_work_sessions, 1);
    assert_eq!(snap.total_focus_minutes, 25);

    engine.start();
    run(&mut engine, 300);

    let snap = engine.snapshot();
    assert_eq!(snap.phase, Phase::Work);
    assert_eq!(snap.remaining_secs, 1500);
    assert_eq!(snap.completed_work_sessions, 1);
    assert_eq!(snap.total_focus_minutes, 25);
}

#[test]
fn test_reset_from_any_state() {
    let config = TimerConfig::new(10, 4, false).unwrap();

    // idle
    let mut engine = TimerEngine::new(config);
    engine.reset();
    assert_eq!(engine.remaining_secs(), 10);
    assert!(!engine.is_running());

    // mid-work, running
    engine.start();
    run(&mut engine, 7);
    engine.reset();
    assert_eq!(engine.remaining_secs(), 10);
    assert!(!engine.is_running());

    // mid-break, paused
    engine.start();
    run(&mut engine, 10);
    engine.start();
    run(&mut engine, 1);
    engine.pause();
    engine.reset();
    assert_eq!(engine.phase(), Phase::Break);
    assert_eq!(engine.remaining_secs(), 4);
    assert!(!engine.is_running());
}

#[test]
fn test_invalid_updates_leave_state_untouched() {
    let mut engine = TimerEngine::new(TimerPreset::Page.config());
    engine.start();
    run(&mut engine, 30);
    let before = engine.snapshot();

    for (work, brk) in [(0, 5), (25, -1), (-10, -10), (i64::MAX, 5)] {
        let err = engine.update_config(work, brk).unwrap_err();
        assert!(matches!(err, TimerError::InvalidConfiguration { .. }));
    }

    assert_eq!(engine.snapshot(), before);
    assert_eq!(engine.config(), &TimerPreset::Page.config());
}

#[test]
fn test_room_overlay_auto_resumes() {
    let mut engine = TimerEngine::new(TimerPreset::Room.config());
    engine.start();
    let events = run(&mut engine, 3000);
    assert!(events
        .iter()
        .any(|e| matches!(e, Event::AutoResumeScheduled { delay_secs: 2, .. })));
    assert!(matches!(engine.schedule(), Schedule::ResumeIn(2)));

    run(&mut engine, 2);
    assert!(engine.is_running());
    assert_eq!(engine.phase(), Phase::Break);
    assert_eq!(engine.remaining_secs(), 600);
}

#[test]
fn test_notifications_for_both_transitions() {
    let mut engine = TimerEngine::new(TimerConfig::new(1, 1, true).unwrap());
    engine.start();
    let notes: Vec<Notification> = run(&mut engine, 5)
        .iter()
        .filter_map(Event::notification)
        .cloned()
        .collect();
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].kind, NotificationKind::Success);
    assert_eq!(notes[1].kind, NotificationKind::Info);
}

proptest! {
    #[test]
    fn prop_work_completes_exactly_once(work in 1u32..5000, brk in 1u32..5000) {
        let mut engine = TimerEngine::new(
            TimerConfig::new(i64::from(work), i64::from(brk), false).unwrap(),
        );
        engine.start();
        let events = run(&mut engine, work);
        let completions = events
            .iter()
            .filter(|e| matches!(e, Event::PhaseCompleted { from: Phase::Work, to: Phase::Break, .. }))
            .count();
        prop_assert_eq!(completions, 1);
        prop_assert_eq!(engine.phase(), Phase::Break);
        prop_assert_eq!(engine.completed_work_sessions(), 1);
        prop_assert_eq!(engine.total_focus_minutes(), u64::from(work / 60));
    }

    #[test]
    fn prop_pause_freezes_remaining(elapsed in 0u32..100, idle in 0u32..1000) {
        let mut engine = TimerEngine::new(TimerConfig::default());
        engine.start();
        run(&mut engine, elapsed);
        engine.pause();
        let frozen = engine.remaining_secs();
        run(&mut engine, idle);
        prop_assert_eq!(engine.remaining_secs(), frozen);
    }

    #[test]
    fn prop_remaining_never_exceeds_phase_duration(work in 1u32..200, brk in 1u32..200, steps in 0u32..1000) {
        let mut engine = TimerEngine::new(
            TimerConfig::new(i64::from(work), i64::from(brk), true).unwrap(),
        );
        engine.start();
        for _ in 0..steps {
            engine.advance();
            prop_assert!(engine.remaining_secs() <= engine.total_secs());
            prop_assert!(engine.remaining_secs() > 0);
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_driver_renders_every_second() {
    let frames: Arc<Mutex<Vec<Snapshot>>> = Arc::default();
    let sink = Arc::clone(&frames);
    let driver = TimerDriver::new(
        TimerConfig::new(5, 3, false).unwrap(),
        move |snap: &Snapshot| sink.lock().unwrap().push(snap.clone()),
        Discard,
    );

    driver.start();
    tokio::time::sleep(Duration::from_millis(5_500)).await;

    let frames = frames.lock().unwrap();
    let shown: Vec<&str> = frames.iter().map(|s| s.remaining_formatted.as_str()).collect();
    // the last frame is rendered after the phase flips to Break
    assert_eq!(shown, vec!["00:05", "00:04", "00:03", "00:02", "00:01", "00:03"]);
    assert_eq!(frames.last().unwrap().phase, Phase::Break);
}

#[tokio::test(start_paused = true)]
async fn test_dropping_driver_stops_ticks() {
    let frames: Arc<Mutex<Vec<Snapshot>>> = Arc::default();
    let sink = Arc::clone(&frames);
    let driver = TimerDriver::new(
        TimerConfig::default(),
        move |snap: &Snapshot| sink.lock().unwrap().push(snap.clone()),
        Discard,
    );
    driver.start();
    tokio::time::sleep(Duration::from_millis(2_500)).await;
    drop(driver);
    let seen = frames.lock().unwrap().len();
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(frames.lock().unwrap().len(), seen);
}

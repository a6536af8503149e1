//! Async driver that feeds a [`TimerEngine`] one second at a time.
//!
//! At most one tick task exists per driver. Every task is tagged with the
//! generation it was armed under; cancelling bumps the generation while the
//! lock is held, so a task that wakes after `pause()` or `reset()` returned
//! sees the mismatch and exits without touching the engine.
//!
//! Must be used from within a tokio runtime.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, trace};

use super::engine::{Schedule, Snapshot, TimerEngine};
use super::sink::{DisplaySink, NotificationSink};
use super::TimerConfig;
use crate::error::TimerError;
use crate::events::Event;

const TICK: Duration = Duration::from_secs(1);

struct Shared {
    engine: TimerEngine,
    display: Box<dyn DisplaySink>,
    notifications: Box<dyn NotificationSink>,
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl Shared {
    fn dispatch(&mut self, events: &[Event]) {
        if events.is_empty() {
            return;
        }
        for notification in events.iter().filter_map(Event::notification) {
            self.notifications.notify(notification);
        }
        let snapshot = self.engine.snapshot();
        self.display.render(&snapshot);
    }

    fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if let Some(task) = self.task.take() {
            debug!(generation = self.generation, "tick task cancelled");
            task.abort();
        }
    }
}

/// Owns one timer engine and its one-second schedule.
pub struct TimerDriver {
    shared: Arc<Mutex<Shared>>,
}

impl TimerDriver {
    pub fn new<D, N>(config: TimerConfig, display: D, notifications: N) -> Self
    where
        D: DisplaySink + 'static,
        N: NotificationSink + 'static,
    {
        Self {
            shared: Arc::new(Mutex::new(Shared {
                engine: TimerEngine::new(config),
                display: Box::new(display),
                notifications: Box::new(notifications),
                generation: 0,
                task: None,
            })),
        }
    }

    pub fn start(&self) -> Option<Event> {
        self.apply(TimerEngine::start)
    }

    pub fn pause(&self) -> Option<Event> {
        self.apply(TimerEngine::pause)
    }

    pub fn toggle(&self) -> Option<Event> {
        self.apply(TimerEngine::toggle)
    }

    pub fn reset(&self) -> Option<Event> {
        self.apply(TimerEngine::reset)
    }

    pub fn update_config(&self, work_secs: i64, break_secs: i64) -> Result<Vec<Event>, TimerError> {
        let mut shared = lock(&self.shared);
        let before = shared.engine.schedule();
        let events = shared.engine.update_config(work_secs, break_secs)?;
        shared.dispatch(&events);
        self.rearm(&mut shared, before);
        Ok(events)
    }

    pub fn snapshot(&self) -> Snapshot {
        lock(&self.shared).engine.snapshot()
    }

    /// Whether a tick task is currently armed.
    pub fn is_scheduled(&self) -> bool {
        lock(&self.shared).task.is_some()
    }

    fn apply(&self, command: impl FnOnce(&mut TimerEngine) -> Option<Event>) -> Option<Event> {
        let mut shared = lock(&self.shared);
        let before = shared.engine.schedule();
        let event = command(&mut shared.engine);
        if let Some(event) = &event {
            shared.dispatch(std::slice::from_ref(event));
        }
        self.rearm(&mut shared, before);
        event
    }

    fn rearm(&self, shared: &mut Shared, before: Schedule) {
        let after = shared.engine.schedule();
        // Starting by hand during an auto-resume delay begins a full second
        // from now, not on the delay's next tick.
        if matches!(before, Schedule::ResumeIn(_)) && after == Schedule::Ticking {
            shared.cancel();
        }
        match after {
            Schedule::Idle => shared.cancel(),
            Schedule::Ticking | Schedule::ResumeIn(_) if shared.task.is_none() => {
                shared.generation = shared.generation.wrapping_add(1);
                let generation = shared.generation;
                debug!(generation, "tick task armed");
                shared.task = Some(tokio::spawn(run_ticks(
                    Arc::downgrade(&self.shared),
                    generation,
                )));
            }
            Schedule::Ticking | Schedule::ResumeIn(_) => {}
        }
    }
}

impl Drop for TimerDriver {
    fn drop(&mut self) {
        lock(&self.shared).cancel();
    }
}

async fn run_ticks(shared: Weak<Mutex<Shared>>, generation: u64) {
    let mut interval = time::interval_at(Instant::now() + TICK, TICK);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        interval.tick().await;
        let Some(shared) = shared.upgrade() else {
            return;
        };
        let mut guard = lock(&shared);
        if guard.generation != generation {
            trace!(generation, "stale tick task exiting");
            return;
        }
        let events = guard.engine.advance();
        guard.dispatch(&events);
        if guard.engine.schedule() == Schedule::Idle {
            guard.task = None;
            return;
        }
    }
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

mod config;
mod driver;
mod engine;
mod sink;

pub use config::{Phase, TimerConfig, TimerPreset, AUTO_RESUME_DELAY_SECS};
pub use driver::TimerDriver;
pub use engine::{format_mm_ss, Schedule, Snapshot, TimerEngine};
pub use sink::{Discard, DisplaySink, NotificationSink};

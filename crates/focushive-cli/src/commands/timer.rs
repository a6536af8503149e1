use std::io::Write;

use clap::{Subcommand, ValueEnum};
use focushive_core::quotes::random_quote;
use focushive_core::timer::Discard;
use focushive_core::{
    Config, Notification, NotificationSink, Snapshot, TimerConfig, TimerDriver, TimerEngine,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use super::print_notification;

#[derive(Clone, Copy, ValueEnum)]
pub enum PresetArg {
    /// Dashboard timer (config section [timer])
    Page,
    /// Study room overlay (config section [room])
    Room,
}

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run the countdown in the foreground (p = pause/resume, r = reset, s = status, q = quit)
    Run {
        #[arg(long, value_enum, default_value = "page")]
        preset: PresetArg,
        /// Work duration in minutes
        #[arg(long, allow_negative_numbers = true)]
        work: Option<i64>,
        /// Break duration in minutes
        #[arg(long = "break", allow_negative_numbers = true)]
        break_minutes: Option<i64>,
        /// Start the next phase automatically
        #[arg(long)]
        auto_resume: bool,
    },
    /// Print the initial timer state as JSON
    Snapshot {
        #[arg(long, value_enum, default_value = "page")]
        preset: PresetArg,
    },
}

/// Resolve the timer settings from the config file plus overrides.
fn resolve_config(
    config: &Config,
    preset: PresetArg,
    work: Option<i64>,
    break_minutes: Option<i64>,
    auto_resume: bool,
) -> Result<TimerConfig, Box<dyn std::error::Error>> {
    let section = match preset {
        PresetArg::Page => &config.timer,
        PresetArg::Room => &config.room,
    };
    let timer = TimerConfig::from_minutes(
        work.unwrap_or(section.work_minutes),
        break_minutes.unwrap_or(section.break_minutes),
        section.auto_resume || auto_resume,
    )?;
    Ok(timer)
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    match action {
        TimerAction::Run {
            preset,
            work,
            break_minutes,
            auto_resume,
        } => {
            let timer = resolve_config(&config, preset, work, break_minutes, auto_resume)?;
            run_foreground(timer, matches!(preset, PresetArg::Room), &config)
        }
        TimerAction::Snapshot { preset } => {
            let timer = resolve_config(&config, preset, None, None, false)?;
            let snapshot = TimerEngine::new(timer).snapshot();
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
            Ok(())
        }
    }
}

/// Run a timer until the user quits. Blocks the calling thread.
pub fn run_foreground(
    timer: TimerConfig,
    with_quotes: bool,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let notify_enabled = config.notifications.enabled;
    let result = runtime.block_on(async move {
        if notify_enabled {
            drive(timer, ToastSink { with_quotes }).await
        } else {
            drive(timer, Discard).await
        }
    });
    // A pending stdin read sits on a blocking thread that cannot be
    // interrupted; dropping the runtime normally would wait for it.
    runtime.shutdown_background();
    result
}

struct ToastSink {
    with_quotes: bool,
}

impl NotificationSink for ToastSink {
    fn notify(&mut self, notification: &Notification) {
        println!();
        print_notification(notification);
        if self.with_quotes {
            println!("  {}", random_quote());
        }
    }
}

fn render(snapshot: &Snapshot) {
    let state = if snapshot.running { "running" } else { "paused" };
    print!(
        "\r{:<10} {}  [{state}]  sessions: {}  focus: {}m   ",
        snapshot.label,
        snapshot.remaining_formatted,
        snapshot.completed_work_sessions,
        snapshot.total_focus_minutes,
    );
    // Progress line only; a failed flush just delays the frame.
    let _ = std::io::stdout().flush();
}

async fn drive<N>(timer: TimerConfig, notifications: N) -> Result<(), Box<dyn std::error::Error>>
where
    N: NotificationSink + 'static,
{
    let driver = TimerDriver::new(timer, render, notifications);
    driver.start();
    debug!(?timer, "foreground timer started");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    loop {
        tokio::select! {
            line = lines.next_line(), if stdin_open => match line? {
                Some(cmd) => match cmd.trim() {
                    "p" | "" => {
                        driver.toggle();
                    }
                    "r" => {
                        driver.reset();
                    }
                    "s" => {
                        println!();
                        println!("{}", serde_json::to_string_pretty(&driver.snapshot())?);
                    }
                    "q" => break,
                    other => {
                        println!();
                        println!("unknown command '{other}' (p = pause/resume, r = reset, s = status, q = quit)");
                    }
                },
                None => stdin_open = false,
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    let summary = driver.snapshot();
    println!();
    println!(
        "Sessions completed: {}, focus time: {}m",
        summary.completed_work_sessions, summary.total_focus_minutes
    );
    Ok(())
}

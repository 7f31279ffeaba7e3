//! Interactive workout in the terminal.
//!
//! A current-thread runtime multiplexes the one-second interval with
//! line commands on stdin:
//!
//! ```text
//! p  pause / resume
//! e  end the workout
//! v  window visible again (re-syncs the wake lock)
//! q  end without the summary
//! ```

use std::io::Write;

use clap::Args;
use setloop_core::storage::is_supported_duration;
use setloop_core::{format, share, Event, SegmentKind, SharedConfig, Workout};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{self, Duration, Instant, MissedTickBehavior};

use super::open_config;
use crate::terminal;

const PERIOD: Duration = Duration::from_secs(1);
const BAR_WIDTH: usize = 20;

#[derive(Args)]
pub struct RunArgs {
    /// Exercise length in seconds (saved for next time)
    #[arg(long)]
    exercise_time: Option<u32>,
    /// Rest length in seconds (saved for next time)
    #[arg(long)]
    rest_time: Option<u32>,
    /// Comma-separated exercise list (saved for next time)
    #[arg(long, value_delimiter = ',')]
    exercises: Option<Vec<String>>,
    /// Share link or query string to load the workout from
    #[arg(long)]
    share: Option<String>,
    /// End automatically after this many sets
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    sets: Option<u32>,
    /// No terminal bell
    #[arg(long)]
    mute: bool,
    /// Print events as JSON lines
    #[arg(long)]
    json: bool,
}

impl RunArgs {
    /// Share link first, explicit flags on top.
    fn overlay(&self) -> Result<SharedConfig, Box<dyn std::error::Error>> {
        let mut shared = self.share.as_deref().map(share::decode).unwrap_or_default();

        for (flag, value) in [
            ("--exercise-time", self.exercise_time),
            ("--rest-time", self.rest_time),
        ] {
            if let Some(secs) = value.filter(|s| !is_supported_duration(*s)) {
                return Err(format!("{flag} {secs} is not one of the allowed durations").into());
            }
        }
        if let Some(secs) = self.exercise_time {
            shared.exercise_duration = Some(secs);
        }
        if let Some(secs) = self.rest_time {
            shared.rest_duration = Some(secs);
        }
        if let Some(exercises) = &self.exercises {
            shared.exercises = Some(exercises.iter().map(|e| e.trim().to_string()).collect());
        }
        Ok(shared)
    }
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let overlay = args.overlay()?;
    let mut persisted = open_config();
    let mut config = persisted.config().clone();
    overlay.apply_to(&mut config);
    // Only a workout that can actually start replaces the stored one.
    config.validate()?;
    persisted.replace(config.clone());

    let mut workout = Workout::new(config, terminal::peripherals(args.mute));
    let started = workout.start_workout()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .enable_io()
        .build()?;
    let quit = runtime.block_on(drive(&mut workout, &args, started));
    // A pending stdin read cannot be cancelled; don't wait for it.
    runtime.shutdown_background();
    let quit = quit?;

    if !args.json && !quit {
        print_summary(&workout);
    }
    Ok(())
}

/// Runs until the workout leaves the active screens. Returns `true` when
/// the user quit.
async fn drive(
    workout: &mut Workout,
    args: &RunArgs,
    started: Vec<Event>,
) -> std::io::Result<bool> {
    let mut display = Display::new(args.json);
    display.show(&started)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut quit = false;

    let mut interval = time::interval_at(Instant::now() + PERIOD, PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    while workout.engine().screen().is_active() {
        tokio::select! {
            _ = interval.tick() => {
                let events = workout.tick();
                display.show(&events)?;

                let limit_reached = args.sets.is_some_and(|limit| {
                    events
                        .iter()
                        .any(|e| matches!(e, Event::SetCompleted { set, .. } if *set >= limit))
                });
                if limit_reached {
                    let ended = workout.end_workout();
                    display.show(ended.as_slice())?;
                }
            }
            line = lines.next_line(), if stdin_open => {
                let Some(line) = line? else {
                    stdin_open = false;
                    continue;
                };
                let event = match line.trim() {
                    "p" => {
                        let event = workout.toggle_pause();
                        if matches!(event, Some(Event::TimerResumed { .. })) {
                            interval.reset();
                        }
                        event
                    }
                    "e" => workout.end_workout(),
                    "q" => {
                        quit = true;
                        workout.end_workout()
                    }
                    "v" => {
                        workout.visibility_regained();
                        Some(workout.engine().snapshot())
                    }
                    "" => None,
                    other => {
                        tracing::debug!(command = other, "unknown command");
                        display.hint()?;
                        None
                    }
                };
                display.show(event.as_slice())?;
            }
        }
    }
    display.finish()?;
    Ok(quit)
}

fn print_summary(workout: &Workout) {
    let Some(session) = workout.engine().session() else {
        return;
    };
    let sets = session.total_sets_completed();
    println!();
    println!("Workout complete!");
    println!(
        "You completed {sets} {}.",
        if sets == 1 { "set" } else { "sets" }
    );
    if let Some(duration) = session.duration() {
        println!("Total time: {}", format::duration(duration));
    }
}

/// Renders events either as JSON lines or as a redrawn status line.
struct Display {
    json: bool,
    /// A `\r` status line is on screen and needs a newline first.
    status_open: bool,
}

impl Display {
    fn new(json: bool) -> Self {
        Self {
            json,
            status_open: false,
        }
    }

    fn show(&mut self, events: &[Event]) -> std::io::Result<()> {
        let mut out = std::io::stdout().lock();
        for event in events {
            if self.json {
                let line = serde_json::to_string(event).map_err(std::io::Error::other)?;
                writeln!(out, "{line}")?;
                continue;
            }

            match event {
                Event::SegmentStarted {
                    kind,
                    set,
                    exercise,
                    duration_secs,
                    ..
                } => {
                    self.close(&mut out)?;
                    let label = match kind {
                        SegmentKind::Exercise => exercise.clone(),
                        other => format!("{} (next: {exercise})", other.label()),
                    };
                    writeln!(out, "Set {set} | {label} | {}", format::clock(*duration_secs))?;
                }
                Event::Tick {
                    seconds_remaining,
                    set_progress,
                    ..
                } => {
                    let filled = (set_progress * BAR_WIDTH as f64).round() as usize;
                    write!(
                        out,
                        "\r  {:>5}  [{}{}] {:>3}%   ",
                        format::clock(*seconds_remaining),
                        "#".repeat(filled.min(BAR_WIDTH)),
                        ".".repeat(BAR_WIDTH - filled.min(BAR_WIDTH)),
                        (set_progress * 100.0).round() as u32
                    )?;
                    self.status_open = true;
                }
                Event::TimerPaused { .. } => {
                    write!(out, "(paused, p to resume)")?;
                    self.status_open = true;
                }
                Event::SetCompleted { set, .. } => {
                    self.close(&mut out)?;
                    writeln!(out, "Set {set} complete!")?;
                }
                Event::StateSnapshot { screen, .. } => {
                    self.close(&mut out)?;
                    writeln!(out, "screen: {screen}")?;
                }
                _ => {}
            }
        }
        out.flush()
    }

    fn hint(&mut self) -> std::io::Result<()> {
        if self.json {
            return Ok(());
        }
        let mut out = std::io::stdout().lock();
        self.close(&mut out)?;
        writeln!(out, "commands: p pause/resume, e end, v refresh, q quit")
    }

    fn finish(&mut self) -> std::io::Result<()> {
        let mut out = std::io::stdout().lock();
        self.close(&mut out)?;
        out.flush()
    }

    fn close(&mut self, out: &mut impl Write) -> std::io::Result<()> {
        if self.status_open {
            writeln!(out)?;
            self.status_open = false;
        }
        Ok(())
    }
}

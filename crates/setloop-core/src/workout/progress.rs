//! Derived progress values for rendering.
//!
//! Both values are recomputed from session and countdown state on demand
//! and never stored.

use super::session::Screen;
use crate::storage::WorkoutConfig;
use crate::timer::BETWEEN_SETS_SECS;

/// Length of the segment shown on `screen`, if it shows one.
pub fn segment_duration(screen: Screen, config: &WorkoutConfig) -> Option<u32> {
    match screen {
        Screen::Exercise => Some(config.exercise_duration),
        Screen::Rest => Some(config.rest_duration),
        Screen::BetweenSets => Some(BETWEEN_SETS_SECS),
        Screen::Config | Screen::Complete => None,
    }
}

/// Elapsed share of the current segment, 0.0 ..= 100.0.
pub fn circle_progress(screen: Screen, config: &WorkoutConfig, seconds_remaining: u32) -> f64 {
    match segment_duration(screen, config) {
        Some(total) if total > 0 => {
            let elapsed = total.saturating_sub(seconds_remaining);
            (f64::from(elapsed) / f64::from(total) * 100.0).clamp(0.0, 100.0)
        }
        _ => 0.0,
    }
}

/// Elapsed share of the current set's scripted time, 0.0 ..= 1.0.
///
/// `config` must be the session's frozen config. The set is
/// `N * exercise + (N - 1) * rest`; the between-sets break is not part of
/// it, so that screen reports 0 like the config and complete screens.
pub fn set_progress(
    screen: Screen,
    config: &WorkoutConfig,
    exercise_index: usize,
    seconds_remaining: u32,
) -> f64 {
    let count = config.exercises.len() as u64;
    if count == 0 {
        return 0.0;
    }
    let exercise = u64::from(config.exercise_duration);
    let rest = u64::from(config.rest_duration);
    let total = count * exercise + (count - 1) * rest;
    if total == 0 {
        return 0.0;
    }

    // Every exercise before the current one was followed by a rest.
    let done = exercise_index as u64 * (exercise + rest);
    let remaining = u64::from(seconds_remaining);
    let elapsed = match screen {
        Screen::Exercise => done + exercise.saturating_sub(remaining),
        Screen::Rest => done + exercise + rest.saturating_sub(remaining),
        Screen::Config | Screen::BetweenSets | Screen::Complete => return 0.0,
    };

    (elapsed as f64 / total as f64).min(1.0)
}

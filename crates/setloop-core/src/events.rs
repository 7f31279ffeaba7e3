use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cues::Cue;
use crate::timer::SegmentKind;
use crate::workout::Screen;

/// Every state change in a workout produces an Event.
/// Front ends render from them; the controller plays the cues they carry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    WorkoutStarted {
        session_id: Uuid,
        exercises: Vec<String>,
        exercise_duration: u32,
        rest_duration: u32,
        at: DateTime<Utc>,
    },
    SegmentStarted {
        kind: SegmentKind,
        set: u32,
        exercise_index: usize,
        /// Exercise performed now, or coming up next for rests and breaks.
        exercise: String,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    /// One countdown second elapsed. Progress is measured before any
    /// transition the same tick causes.
    Tick {
        kind: SegmentKind,
        seconds_remaining: u32,
        circle_progress: f64,
        set_progress: f64,
        at: DateTime<Utc>,
    },
    CueTriggered {
        cue: Cue,
        at: DateTime<Utc>,
    },
    SegmentCompleted {
        kind: SegmentKind,
        set: u32,
        exercise_index: usize,
        at: DateTime<Utc>,
    },
    /// The last exercise of a set finished.
    SetCompleted {
        set: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        seconds_remaining: u32,
        at: DateTime<Utc>,
    },
    TimerResumed {
        seconds_remaining: u32,
        at: DateTime<Utc>,
    },
    WorkoutEnded {
        session_id: Uuid,
        total_sets: u32,
        duration_secs: i64,
        at: DateTime<Utc>,
    },
    WorkoutReset {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        screen: Screen,
        set: Option<u32>,
        exercise: Option<String>,
        next_exercise: Option<String>,
        seconds_remaining: u32,
        is_paused: bool,
        circle_progress: f64,
        set_progress: f64,
        at: DateTime<Utc>,
    },
}

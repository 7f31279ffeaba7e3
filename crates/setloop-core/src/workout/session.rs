use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::storage::WorkoutConfig;
use crate::timer::SegmentKind;

/// UI mode of the workout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Config,
    Exercise,
    Rest,
    BetweenSets,
    Complete,
}

impl Screen {
    /// Screens that run a countdown and keep the display awake.
    pub fn is_active(self) -> bool {
        self.segment_kind().is_some()
    }

    pub fn segment_kind(self) -> Option<SegmentKind> {
        match self {
            Screen::Exercise => Some(SegmentKind::Exercise),
            Screen::Rest => Some(SegmentKind::Rest),
            Screen::BetweenSets => Some(SegmentKind::BetweenSets),
            Screen::Config | Screen::Complete => None,
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Screen::Config => "config",
            Screen::Exercise => "exercise",
            Screen::Rest => "rest",
            Screen::BetweenSets => "between-sets",
            Screen::Complete => "complete",
        };
        f.write_str(name)
    }
}

/// Progress of one workout, from start until reset.
///
/// Owns a frozen copy of the configuration taken at start; later edits to
/// the live config never reach it. Only the state machine mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    id: Uuid,
    config: WorkoutConfig,
    current_exercise_index: usize,
    current_set: u32,
    current_segment_index: usize,
    total_segments_in_set: usize,
    /// Zero until the workout ends.
    total_sets_completed: u32,
    start_time: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,
}

impl Session {
    /// # Errors
    /// Rejects configs without a usable exercise or with unsupported
    /// durations.
    pub(crate) fn start(config: &WorkoutConfig, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        config.validate()?;
        let frozen = WorkoutConfig {
            exercises: config.valid_exercises(),
            ..config.clone()
        };
        let total_segments_in_set = frozen.exercises.len() * 2 - 1;

        Ok(Self {
            id: Uuid::new_v4(),
            config: frozen,
            current_exercise_index: 0,
            current_set: 1,
            current_segment_index: 0,
            total_segments_in_set,
            total_sets_completed: 0,
            start_time: now,
            end_time: None,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Frozen config; `exercises` holds only valid names.
    pub fn config(&self) -> &WorkoutConfig {
        &self.config
    }

    pub fn exercises(&self) -> &[String] {
        &self.config.exercises
    }

    pub fn exercise_count(&self) -> usize {
        self.config.exercises.len()
    }

    pub fn current_exercise_index(&self) -> usize {
        self.current_exercise_index
    }

    pub fn current_set(&self) -> u32 {
        self.current_set
    }

    pub fn current_segment_index(&self) -> usize {
        self.current_segment_index
    }

    pub fn total_segments_in_set(&self) -> usize {
        self.total_segments_in_set
    }

    pub fn total_sets_completed(&self) -> u32 {
        self.total_sets_completed
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time
    }

    pub fn current_exercise(&self) -> &str {
        &self.config.exercises[self.current_exercise_index]
    }

    /// The exercise after the current one, wrapping into the next set.
    pub fn next_exercise(&self) -> &str {
        let next = (self.current_exercise_index + 1) % self.exercise_count();
        &self.config.exercises[next]
    }

    pub fn is_last_exercise(&self) -> bool {
        self.current_exercise_index + 1 == self.exercise_count()
    }

    /// Wall-clock length of a finished workout.
    pub fn duration(&self) -> Option<chrono::Duration> {
        self.end_time.map(|end| end - self.start_time)
    }

    // ── Transitions (state machine only) ─────────────────────────────

    pub(crate) fn enter_rest(&mut self) {
        self.current_segment_index += 1;
    }

    pub(crate) fn enter_next_exercise(&mut self) {
        self.current_exercise_index += 1;
        self.current_segment_index += 1;
    }

    pub(crate) fn enter_next_set(&mut self) {
        self.current_set += 1;
        self.current_exercise_index = 0;
        self.current_segment_index = 0;
    }

    /// Freeze the totals. Later calls keep the first end time.
    pub(crate) fn finish(&mut self, now: DateTime<Utc>) {
        if self.end_time.is_none() {
            self.total_sets_completed = self.current_set;
            self.end_time = Some(now);
        }
    }
}

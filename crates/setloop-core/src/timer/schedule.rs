use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::storage::WorkoutConfig;

/// Fixed length of the break that closes every set.
pub const BETWEEN_SETS_SECS: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    Exercise,
    Rest,
    BetweenSets,
}

impl SegmentKind {
    pub fn label(self) -> &'static str {
        match self {
            SegmentKind::Exercise => "Exercise",
            SegmentKind::Rest => "Rest",
            SegmentKind::BetweenSets => "Between sets",
        }
    }
}

/// One timed unit of a set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub kind: SegmentKind,
    pub duration_secs: u32,
    /// Exercise being performed, or the one just finished for rests.
    /// `None` for the between-sets break.
    pub exercise_index: Option<usize>,
}

/// The scripted segment sequence of a single set.
///
/// N exercises yield `2N - 1` alternating exercise/rest segments followed by
/// one between-sets break.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetPlan {
    pub exercises: Vec<String>,
    pub segments: Vec<Segment>,
}

impl SetPlan {
    pub fn for_config(config: &WorkoutConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        let exercises = config.valid_exercises();

        let mut segments = Vec::with_capacity(exercises.len() * 2);
        for index in 0..exercises.len() {
            if index > 0 {
                segments.push(Segment {
                    kind: SegmentKind::Rest,
                    duration_secs: config.rest_duration,
                    exercise_index: Some(index - 1),
                });
            }
            segments.push(Segment {
                kind: SegmentKind::Exercise,
                duration_secs: config.exercise_duration,
                exercise_index: Some(index),
            });
        }
        segments.push(Segment {
            kind: SegmentKind::BetweenSets,
            duration_secs: BETWEEN_SETS_SECS,
            exercise_index: None,
        });

        Ok(Self {
            exercises,
            segments,
        })
    }

    /// Exercise and rest segments, excluding the closing break.
    pub fn timed_segment_count(&self) -> usize {
        self.segments.len() - 1
    }

    /// Seconds of exercise plus rest in one set.
    pub fn active_secs(&self) -> u32 {
        self.segments
            .iter()
            .filter(|s| s.kind != SegmentKind::BetweenSets)
            .map(|s| s.duration_secs)
            .sum()
    }

    /// Seconds of one full set including the closing break.
    pub fn total_secs(&self) -> u32 {
        self.segments.iter().map(|s| s.duration_secs).sum()
    }
}

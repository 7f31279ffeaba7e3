//! Workout configuration.
//!
//! Holds the user-authored workout definition:
//! - Ordered exercise list (display order is execution order)
//! - Exercise and rest durations, restricted to [`DURATION_OPTIONS`]
//!
//! The exercise list mirrors the editor it came from and normally ends in
//! one blank slot; blank and whitespace-only names are filtered out before
//! a workout uses the list.
//!
//! Persisted as TOML at `~/.config/setloop/config.toml` by
//! [`FileConfigStore`](super::FileConfigStore).

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ValidationError};

/// Durations (seconds) a user may pick for exercises and rests.
pub const DURATION_OPTIONS: [u32; 7] = [15, 30, 45, 60, 90, 120, 180];

pub const DEFAULT_EXERCISES: [&str; 4] = ["Push-ups", "Squats", "Plank", "Jumping Jacks"];

/// Serialized to/from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutConfig {
    #[serde(default = "default_exercises")]
    pub exercises: Vec<String>,
    #[serde(default = "default_duration")]
    pub exercise_duration: u32,
    #[serde(default = "default_duration")]
    pub rest_duration: u32,
}

fn default_exercises() -> Vec<String> {
    DEFAULT_EXERCISES
        .iter()
        .map(|s| s.to_string())
        .chain(std::iter::once(String::new()))
        .collect()
}

fn default_duration() -> u32 {
    30
}

impl Default for WorkoutConfig {
    fn default() -> Self {
        Self {
            exercises: default_exercises(),
            exercise_duration: default_duration(),
            rest_duration: default_duration(),
        }
    }
}

pub fn is_supported_duration(secs: u32) -> bool {
    DURATION_OPTIONS.contains(&secs)
}

impl WorkoutConfig {
    /// Exercises with blank entries dropped, in execution order.
    pub fn valid_exercises(&self) -> Vec<String> {
        self.exercises
            .iter()
            .filter(|e| !e.trim().is_empty())
            .cloned()
            .collect()
    }

    pub fn validate_durations(&self) -> Result<(), ValidationError> {
        for (field, seconds) in [
            ("exercise_duration", self.exercise_duration),
            ("rest_duration", self.rest_duration),
        ] {
            if !is_supported_duration(seconds) {
                return Err(ValidationError::UnsupportedDuration {
                    field: field.to_string(),
                    seconds,
                });
            }
        }
        Ok(())
    }

    /// Checks everything a workout needs before it can start.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.valid_exercises().is_empty() {
            return Err(ValidationError::NoValidExercises);
        }
        self.validate_durations()
    }

    // ── List editing ─────────────────────────────────────────────────

    /// Rename the entry at `index`. Filling the trailing blank slot opens a
    /// new one.
    pub fn update_exercise(&mut self, index: usize, value: &str) -> Result<(), ValidationError> {
        let len = self.exercises.len();
        let slot = self
            .exercises
            .get_mut(index)
            .ok_or_else(|| out_of_bounds(index, len))?;
        *slot = value.to_string();

        if index == len - 1 && !value.trim().is_empty() {
            self.exercises.push(String::new());
        }
        Ok(())
    }

    /// Append a name into the trailing blank slot.
    pub fn add_exercise(&mut self, value: &str) -> Result<(), ValidationError> {
        self.ensure_blank_slot();
        let last = self.exercises.len() - 1;
        self.update_exercise(last, value)
    }

    pub fn remove_exercise(&mut self, index: usize) -> Result<(), ValidationError> {
        if index >= self.exercises.len() {
            return Err(out_of_bounds(index, self.exercises.len()));
        }
        self.exercises.remove(index);
        self.ensure_blank_slot();
        Ok(())
    }

    /// Move the entry at `from` so it ends up at `to`.
    pub fn reorder_exercises(&mut self, from: usize, to: usize) -> Result<(), ValidationError> {
        let len = self.exercises.len();
        if from >= len {
            return Err(out_of_bounds(from, len));
        }
        if to >= len {
            return Err(out_of_bounds(to, len));
        }
        let moved = self.exercises.remove(from);
        self.exercises.insert(to, moved);
        Ok(())
    }

    /// Keep exactly the editor invariant: the list ends in a blank entry.
    pub fn ensure_blank_slot(&mut self) {
        if self.exercises.last().map_or(true, |e| !e.trim().is_empty()) {
            self.exercises.push(String::new());
        }
    }

    // ── Key/value access ─────────────────────────────────────────────

    fn field<'a>(root: &'a serde_json::Value, key: &str) -> Option<&'a serde_json::Value> {
        root.as_object()?.get(key)
    }

    fn set_field(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let obj = root.as_object_mut().ok_or_else(unknown)?;
        let existing = obj.get(key).ok_or_else(unknown)?;

        let new_value = match existing {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(
                value
                    .parse::<bool>()
                    .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
            ),
            serde_json::Value::Number(_) => value
                .parse::<u64>()
                .map(|n| serde_json::Value::Number(n.into()))
                .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?,
            // Lists accept JSON or a plain comma-separated string.
            serde_json::Value::Array(_) => match serde_json::from_str(value) {
                Ok(v @ serde_json::Value::Array(_)) => v,
                _ => serde_json::Value::Array(
                    value
                        .split(',')
                        .map(|s| serde_json::Value::String(s.trim().to_string()))
                        .collect(),
                ),
            },
            serde_json::Value::Object(_) => {
                serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
            }
            _ => serde_json::Value::String(value.into()),
        };

        obj.insert(key.to_string(), new_value);
        Ok(())
    }

    /// Get a config value as string by top-level key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::field(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Array(items) => Some(
                items
                    .iter()
                    .filter_map(|v| v.as_str())
                    .filter(|s| !s.trim().is_empty())
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the result is not a valid configuration. The config is left
    /// unchanged on error.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_field(&mut json, key, value)?;

        let mut updated: WorkoutConfig = serde_json::from_value(json).map_err(|e| {
            ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            }
        })?;
        updated
            .validate_durations()
            .map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.ensure_blank_slot();

        *self = updated;
        Ok(())
    }
}

fn out_of_bounds(index: usize, len: usize) -> ValidationError {
    ValidationError::OutOfBounds {
        collection: "exercises".to_string(),
        index,
        len,
    }
}

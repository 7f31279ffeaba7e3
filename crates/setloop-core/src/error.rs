//! Core error types for setloop-core.
//!
//! Errors are split by concern: configuration I/O, input validation,
//! workout transitions and peripheral capabilities. Only the first three
//! ever reach a caller; capability failures are logged and swallowed by
//! [`crate::peripherals::Peripherals`].

use std::path::PathBuf;
use thiserror::Error;

use crate::workout::Screen;

/// Core error type for setloop-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Workout transition errors
    #[error("Workout error: {0}")]
    Workout(#[from] WorkoutError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not name a configuration field
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// The data directory could not be created
    #[error("Cannot prepare data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Every exercise entry was empty or whitespace
    #[error("At least one non-empty exercise is required")]
    NoValidExercises,

    /// Duration outside the supported option set
    #[error("Unsupported duration for '{field}': {seconds}s (allowed: 15, 30, 45, 60, 90, 120, 180)")]
    UnsupportedDuration { field: String, seconds: u32 },

    /// Out of bounds
    #[error("Index {index} out of bounds for {collection} (length: {len})")]
    OutOfBounds {
        collection: String,
        index: usize,
        len: usize,
    },
}

/// Errors raised by workout transitions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkoutError {
    /// The requested action is not legal from the current screen
    #[error("Cannot {action} while on the {screen} screen")]
    InvalidTransition { action: &'static str, screen: Screen },

    /// The configuration cannot start a workout
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Failures reported by audio, vibration and wake-keep ports.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    /// The platform does not provide this capability
    #[error("{0} is not supported on this platform")]
    Unsupported(&'static str),

    /// The capability exists but the call failed
    #[error("{capability} failed: {message}")]
    Failed {
        capability: &'static str,
        message: String,
    },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

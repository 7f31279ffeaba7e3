//! # setloop Core Library
//!
//! Core logic for the setloop interval-workout timer: an ordered exercise
//! list is walked as exercise → rest → … → between-sets break, repeating
//! until the user ends the workout. Front ends (the bundled CLI, or any
//! GUI) are thin layers over this crate.
//!
//! ## Architecture
//!
//! - **Countdown Engine**: whole-second timer; the caller delivers ticks
//! - **Cue Dispatcher**: pure mapping from countdown position to beeps and
//!   vibration patterns
//! - **Workout State Machine**: screens, sets, segment transitions
//! - **Progress Calculator**: per-segment and per-set progress fractions
//! - **Ports**: config persistence, share links, audio/vibration/wake-lock
//!
//! ## Key Components
//!
//! - [`WorkoutEngine`]: The workout state machine
//! - [`Workout`]: State machine plus capability ports
//! - [`CountdownEngine`]: Countdown timer
//! - [`WorkoutConfig`]: User-authored workout definition

pub mod cues;
pub mod error;
pub mod events;
pub mod format;
pub mod peripherals;
pub mod share;
pub mod storage;
pub mod timer;
pub mod workout;

pub use cues::{Cue, CueKind, Tone};
pub use error::{CapabilityError, ConfigError, CoreError, ValidationError, WorkoutError};
pub use events::Event;
pub use peripherals::{AudioOutput, Peripherals, Silent, Vibrator, WakeLock};
pub use share::SharedConfig;
pub use storage::{ConfigStore, FileConfigStore, MemoryConfigStore, PersistedConfig, WorkoutConfig};
pub use timer::{CountdownEngine, CountdownEvent, SegmentKind, SetPlan, TimerState};
pub use workout::{Screen, Session, Workout, WorkoutEngine};

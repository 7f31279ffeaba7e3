//! Countdown engine implementation.
//!
//! The countdown engine is a whole-second state machine. It does not use
//! internal threads - the caller owns the one-second timer resource and
//! calls `tick()` once per elapsed second.
//!
//! ## State Transitions
//!
//! ```text
//! Stopped -> Active -> (Paused <-> Active) -> Finished (inactive, 0)
//!              ^                                 |
//!              +-------------- start ------------+
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut countdown = CountdownEngine::new();
//! countdown.start(30);
//! // Once per second:
//! for event in countdown.tick() { /* Tick { .. } then Completed */ }
//! ```

use serde::{Deserialize, Serialize};

/// Observable countdown state.
///
/// `is_active == false` implies `is_paused == false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub seconds_remaining: u32,
    pub is_paused: bool,
    pub is_active: bool,
}

/// Emitted by [`CountdownEngine::tick`], in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CountdownEvent {
    /// One second elapsed; carries the decremented value.
    Tick { seconds_remaining: u32 },
    /// The run reached zero. Always follows the `Tick` for 0.
    Completed,
}

/// Single-run countdown timer.
///
/// Starting a new run replaces the previous one outright, so there is never
/// more than one live countdown per engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CountdownEngine {
    state: TimerState,
}

impl CountdownEngine {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.state.seconds_remaining
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active
    }

    pub fn is_paused(&self) -> bool {
        self.state.is_paused
    }

    /// Whether the next `tick()` will decrement.
    pub fn is_running(&self) -> bool {
        self.state.is_active && !self.state.is_paused
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a fresh run of `duration_secs`, cancelling any current run.
    ///
    /// A zero-length run is active with nothing left; its first tick
    /// completes it.
    pub fn start(&mut self, duration_secs: u32) {
        self.state = TimerState {
            seconds_remaining: duration_secs,
            is_paused: false,
            is_active: true,
        };
    }

    /// Returns `false` when already paused or inactive.
    pub fn pause(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.state.is_paused = true;
        true
    }

    /// Returns `false` when not paused or nothing is left to count.
    pub fn resume(&mut self) -> bool {
        if !self.state.is_paused || self.state.seconds_remaining == 0 {
            return false;
        }
        self.state.is_paused = false;
        true
    }

    pub fn stop(&mut self) {
        self.state = TimerState::default();
    }

    /// Advance by one second.
    ///
    /// Inactive or paused engines ignore the call, which is what keeps a
    /// tick queued by the driver from leaking into a stopped run.
    pub fn tick(&mut self) -> Vec<CountdownEvent> {
        if !self.is_running() {
            return Vec::new();
        }

        self.state.seconds_remaining = self.state.seconds_remaining.saturating_sub(1);
        let mut events = vec![CountdownEvent::Tick {
            seconds_remaining: self.state.seconds_remaining,
        }];

        if self.state.seconds_remaining == 0 {
            self.state.is_active = false;
            self.state.is_paused = false;
            events.push(CountdownEvent::Completed);
        }
        events
    }
}

//! Couples the state machine with the capability ports.
//!
//! Every command is forwarded to [`WorkoutEngine`]; the events it returns
//! are scanned for cues to play, and the wake lock is brought in line with
//! the resulting screen.

use super::engine::WorkoutEngine;
use crate::error::WorkoutError;
use crate::events::Event;
use crate::peripherals::Peripherals;
use crate::storage::WorkoutConfig;

pub struct Workout {
    engine: WorkoutEngine,
    peripherals: Peripherals,
}

impl Workout {
    pub fn new(config: WorkoutConfig, peripherals: Peripherals) -> Self {
        Self {
            engine: WorkoutEngine::new(config),
            peripherals,
        }
    }

    pub fn engine(&self) -> &WorkoutEngine {
        &self.engine
    }

    pub fn config_mut(&mut self) -> &mut WorkoutConfig {
        self.engine.config_mut()
    }

    pub fn peripherals(&self) -> &Peripherals {
        &self.peripherals
    }

    pub fn start_workout(&mut self) -> Result<Vec<Event>, WorkoutError> {
        let events = self.engine.start_workout()?;
        self.dispatch(&events);
        Ok(events)
    }

    pub fn tick(&mut self) -> Vec<Event> {
        let events = self.engine.tick();
        self.dispatch(&events);
        events
    }

    pub fn end_workout(&mut self) -> Option<Event> {
        let event = self.engine.end_workout();
        self.dispatch(event.as_slice());
        event
    }

    pub fn reset_workout(&mut self) -> Event {
        let event = self.engine.reset_workout();
        self.dispatch(std::slice::from_ref(&event));
        event
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.engine.pause()
    }

    pub fn resume(&mut self) -> Option<Event> {
        self.engine.resume()
    }

    pub fn toggle_pause(&mut self) -> Option<Event> {
        self.engine.toggle_pause()
    }

    /// The app became visible again; timer state is untouched.
    pub fn visibility_regained(&mut self) {
        self.peripherals.visibility_regained(self.engine.screen());
    }

    fn dispatch(&mut self, events: &[Event]) {
        for event in events {
            if let Event::CueTriggered { cue, .. } = event {
                self.peripherals.play(cue);
            }
        }
        self.peripherals.sync_wake_lock(self.engine.screen());
    }
}

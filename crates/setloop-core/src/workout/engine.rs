//! Workout state machine.
//!
//! Owns the live configuration, the current [`Screen`], the optional
//! [`Session`] and the single [`CountdownEngine`]. Every mutation goes
//! through the commands below; each returns the events it produced.
//!
//! ## State Transitions
//!
//! ```text
//! Config --start--> Exercise --done--> Rest --done--> Exercise ...
//!                      |  (last exercise)
//!                      +--done--> BetweenSets --done--> Exercise (next set)
//!
//! Exercise | Rest | BetweenSets --end--> Complete --reset--> Config
//! ```
//!
//! Like the countdown it wraps, the engine has no thread of its own: the
//! caller delivers one `tick()` per elapsed second.

use chrono::Utc;

use super::progress;
use super::session::{Screen, Session};
use crate::cues::{self, Cue};
use crate::error::WorkoutError;
use crate::events::Event;
use crate::storage::WorkoutConfig;
use crate::timer::{CountdownEngine, CountdownEvent, TimerState};

#[derive(Debug, Clone)]
pub struct WorkoutEngine {
    config: WorkoutConfig,
    screen: Screen,
    session: Option<Session>,
    countdown: CountdownEngine,
}

impl WorkoutEngine {
    /// Starts on the `Config` screen with no session.
    pub fn new(config: WorkoutConfig) -> Self {
        Self {
            config,
            screen: Screen::Config,
            session: None,
            countdown: CountdownEngine::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Live configuration, used by the next `start_workout`.
    pub fn config(&self) -> &WorkoutConfig {
        &self.config
    }

    /// Edits apply to the next workout; a running session keeps its copy.
    pub fn config_mut(&mut self) -> &mut WorkoutConfig {
        &mut self.config
    }

    pub fn timer(&self) -> TimerState {
        self.countdown.state()
    }

    pub fn countdown(&self) -> &CountdownEngine {
        &self.countdown
    }

    pub fn segment_duration(&self) -> Option<u32> {
        let session = self.session.as_ref()?;
        progress::segment_duration(self.screen, session.config())
    }

    pub fn circle_progress(&self) -> f64 {
        match &self.session {
            Some(session) => progress::circle_progress(
                self.screen,
                session.config(),
                self.countdown.seconds_remaining(),
            ),
            None => 0.0,
        }
    }

    pub fn set_progress(&self) -> f64 {
        match &self.session {
            Some(session) => progress::set_progress(
                self.screen,
                session.config(),
                session.current_exercise_index(),
                self.countdown.seconds_remaining(),
            ),
            None => 0.0,
        }
    }

    pub fn current_exercise(&self) -> Option<&str> {
        self.session.as_ref().map(Session::current_exercise)
    }

    pub fn next_exercise(&self) -> Option<&str> {
        self.session.as_ref().map(Session::next_exercise)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        let active = self.screen.is_active();
        Event::StateSnapshot {
            screen: self.screen,
            set: self.session.as_ref().map(Session::current_set),
            exercise: self
                .current_exercise()
                .filter(|_| active)
                .map(str::to_string),
            next_exercise: self
                .next_exercise()
                .filter(|_| active)
                .map(str::to_string),
            seconds_remaining: self.countdown.seconds_remaining(),
            is_paused: self.countdown.is_paused(),
            circle_progress: self.circle_progress(),
            set_progress: self.set_progress(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Config -> Exercise. Freezes the config into a new session.
    ///
    /// # Errors
    /// Fails without changing anything when not on the config screen or
    /// when the config has no usable exercise.
    pub fn start_workout(&mut self) -> Result<Vec<Event>, WorkoutError> {
        if self.screen != Screen::Config {
            return Err(WorkoutError::InvalidTransition {
                action: "start a workout",
                screen: self.screen,
            });
        }

        let session = match Session::start(&self.config, Utc::now()) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "workout start rejected");
                return Err(e.into());
            }
        };

        tracing::info!(
            session_id = %session.id(),
            exercises = session.exercise_count(),
            exercise_duration = session.config().exercise_duration,
            rest_duration = session.config().rest_duration,
            "workout started"
        );
        let started = Event::WorkoutStarted {
            session_id: session.id(),
            exercises: session.exercises().to_vec(),
            exercise_duration: session.config().exercise_duration,
            rest_duration: session.config().rest_duration,
            at: session.start_time(),
        };
        self.session = Some(session);

        let mut events = vec![started];
        events.extend(self.enter(Screen::Exercise));
        Ok(events)
    }

    /// Any active screen -> Complete. Stops the countdown first.
    pub fn end_workout(&mut self) -> Option<Event> {
        if !self.screen.is_active() {
            return None;
        }
        self.countdown.stop();

        let session = self.session.as_mut()?;
        let now = Utc::now();
        session.finish(now);
        self.screen = Screen::Complete;

        tracing::info!(
            session_id = %session.id(),
            total_sets = session.total_sets_completed(),
            "workout ended"
        );
        Some(Event::WorkoutEnded {
            session_id: session.id(),
            total_sets: session.total_sets_completed(),
            duration_secs: session.duration().map_or(0, |d| d.num_seconds()),
            at: now,
        })
    }

    /// Back to Config, discarding the session. The countdown is stopped
    /// before the session goes away.
    pub fn reset_workout(&mut self) -> Event {
        self.countdown.stop();
        if let Some(session) = self.session.take() {
            tracing::info!(session_id = %session.id(), "workout reset");
        }
        self.screen = Screen::Config;
        Event::WorkoutReset { at: Utc::now() }
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.screen.is_active() || !self.countdown.pause() {
            return None;
        }
        tracing::debug!(seconds_remaining = self.countdown.seconds_remaining(), "paused");
        Some(Event::TimerPaused {
            seconds_remaining: self.countdown.seconds_remaining(),
            at: Utc::now(),
        })
    }

    pub fn resume(&mut self) -> Option<Event> {
        if !self.screen.is_active() || !self.countdown.resume() {
            return None;
        }
        tracing::debug!(seconds_remaining = self.countdown.seconds_remaining(), "resumed");
        Some(Event::TimerResumed {
            seconds_remaining: self.countdown.seconds_remaining(),
            at: Utc::now(),
        })
    }

    pub fn toggle_pause(&mut self) -> Option<Event> {
        if self.countdown.is_paused() {
            self.resume()
        } else {
            self.pause()
        }
    }

    /// Deliver one elapsed second.
    ///
    /// Emits the tick, any cues for the new value and, when the segment
    /// runs out, the transition into the next one. Ignored outside the
    /// active screens and while paused.
    pub fn tick(&mut self) -> Vec<Event> {
        let (Some(kind), Some(duration)) = (self.screen.segment_kind(), self.segment_duration())
        else {
            return Vec::new();
        };

        let mut events = Vec::new();
        for countdown_event in self.countdown.tick() {
            match countdown_event {
                CountdownEvent::Tick { seconds_remaining } => {
                    let at = Utc::now();
                    tracing::debug!(screen = %self.screen, seconds_remaining, "tick");
                    events.push(Event::Tick {
                        kind,
                        seconds_remaining,
                        circle_progress: self.circle_progress(),
                        set_progress: self.set_progress(),
                        at,
                    });
                    events.extend(
                        cues::tick_cues(seconds_remaining, kind, duration)
                            .into_iter()
                            .map(|cue| Event::CueTriggered { cue, at }),
                    );
                }
                CountdownEvent::Completed => events.extend(self.complete_segment()),
            }
        }
        events
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete_segment(&mut self) -> Vec<Event> {
        let (Some(kind), Some(session)) = (self.screen.segment_kind(), self.session.as_mut())
        else {
            return Vec::new();
        };
        let at = Utc::now();
        let mut events = vec![Event::SegmentCompleted {
            kind,
            set: session.current_set(),
            exercise_index: session.current_exercise_index(),
            at,
        }];

        let next = match self.screen {
            Screen::Exercise if session.is_last_exercise() => {
                tracing::info!(set = session.current_set(), "set complete");
                events.push(Event::SetCompleted {
                    set: session.current_set(),
                    at,
                });
                events.push(Event::CueTriggered {
                    cue: Cue::set_complete(),
                    at,
                });
                Screen::BetweenSets
            }
            Screen::Exercise => {
                session.enter_rest();
                Screen::Rest
            }
            Screen::Rest => {
                session.enter_next_exercise();
                Screen::Exercise
            }
            Screen::BetweenSets => {
                session.enter_next_set();
                Screen::Exercise
            }
            Screen::Config | Screen::Complete => return events,
        };

        events.extend(self.enter(next));
        events
    }

    /// Switch screens and start the matching countdown.
    fn enter(&mut self, screen: Screen) -> Option<Event> {
        self.screen = screen;
        let session = self.session.as_ref()?;
        let kind = screen.segment_kind()?;
        let duration = progress::segment_duration(screen, session.config())?;

        let exercise = match screen {
            Screen::Exercise => session.current_exercise(),
            _ => session.next_exercise(),
        };
        tracing::info!(
            screen = %screen,
            set = session.current_set(),
            exercise,
            duration_secs = duration,
            "segment started"
        );
        let event = Event::SegmentStarted {
            kind,
            set: session.current_set(),
            exercise_index: session.current_exercise_index(),
            exercise: exercise.to_string(),
            duration_secs: duration,
            at: Utc::now(),
        };

        self.countdown.start(duration);
        Some(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cues::CueKind;
    use crate::error::ValidationError;

    fn engine(names: &[&str], exercise: u32, rest: u32) -> WorkoutEngine {
        WorkoutEngine::new(WorkoutConfig {
            exercises: names.iter().map(|s| s.to_string()).collect(),
            exercise_duration: exercise,
            rest_duration: rest,
        })
    }

    fn tick_n(engine: &mut WorkoutEngine, n: u32) -> Vec<Event> {
        (0..n).flat_map(|_| engine.tick()).collect()
    }

    #[test]
    fn starts_on_config_without_session() {
        let engine = engine(&["A"], 30, 15);
        assert_eq!(engine.screen(), Screen::Config);
        assert!(engine.session().is_none());
        assert!(!engine.timer().is_active);
    }

    #[test]
    fn start_enters_first_exercise() {
        let mut engine = engine(&["A", "B"], 30, 15);
        let events = engine.start_workout().unwrap();

        assert!(matches!(events[0], Event::WorkoutStarted { .. }));
        assert!(matches!(
            &events[1],
            Event::SegmentStarted { exercise, duration_secs: 30, set: 1, .. } if exercise == "A"
        ));
        assert_eq!(engine.screen(), Screen::Exercise);
        let session = engine.session().unwrap();
        assert_eq!(session.current_exercise_index(), 0);
        assert_eq!(session.current_segment_index(), 0);
        assert_eq!(session.total_segments_in_set(), 3);
        assert_eq!(engine.timer().seconds_remaining, 30);
    }

    #[test]
    fn start_without_valid_exercise_changes_nothing() {
        let mut engine = engine(&["", "  "], 30, 15);
        let err = engine.start_workout().unwrap_err();
        assert_eq!(
            err,
            WorkoutError::Validation(ValidationError::NoValidExercises)
        );
        assert_eq!(engine.screen(), Screen::Config);
        assert!(engine.session().is_none());
        assert!(!engine.timer().is_active);
    }

    #[test]
    fn start_twice_is_an_invalid_transition() {
        let mut engine = engine(&["A"], 30, 15);
        engine.start_workout().unwrap();
        let err = engine.start_workout().unwrap_err();
        assert!(matches!(
            err,
            WorkoutError::InvalidTransition { screen: Screen::Exercise, .. }
        ));
    }

    #[test]
    fn exercise_then_rest_then_next_exercise() {
        let mut engine = engine(&["A", "B"], 30, 15);
        engine.start_workout().unwrap();

        tick_n(&mut engine, 30);
        assert_eq!(engine.screen(), Screen::Rest);
        assert_eq!(engine.timer().seconds_remaining, 15);
        assert_eq!(engine.session().unwrap().current_segment_index(), 1);
        assert_eq!(engine.next_exercise(), Some("B"));

        tick_n(&mut engine, 15);
        assert_eq!(engine.screen(), Screen::Exercise);
        assert_eq!(engine.current_exercise(), Some("B"));
        assert_eq!(engine.session().unwrap().current_segment_index(), 2);
    }

    #[test]
    fn last_exercise_fires_set_complete_and_breaks() {
        let mut engine = engine(&["A"], 15, 15);
        engine.start_workout().unwrap();

        let events = tick_n(&mut engine, 15);
        assert_eq!(engine.screen(), Screen::BetweenSets);
        assert_eq!(engine.timer().seconds_remaining, 30);

        let set_complete = events
            .iter()
            .filter(|e| matches!(e, Event::CueTriggered { cue, .. } if cue.kind == CueKind::SetComplete))
            .count();
        assert_eq!(set_complete, 1);
        assert!(events.iter().any(|e| matches!(
            e,
            Event::CueTriggered { cue, .. }
                if cue.kind == (CueKind::Countdown { seconds_remaining: 0 })
        )));
    }

    #[test]
    fn between_sets_starts_next_set() {
        let mut engine = engine(&["A"], 15, 15);
        engine.start_workout().unwrap();
        tick_n(&mut engine, 15 + 30);

        assert_eq!(engine.screen(), Screen::Exercise);
        let session = engine.session().unwrap();
        assert_eq!(session.current_set(), 2);
        assert_eq!(session.current_exercise_index(), 0);
        assert_eq!(session.current_segment_index(), 0);
    }

    #[test]
    fn tick_then_complete_observe_zero() {
        let mut engine = engine(&["A", "B"], 15, 15);
        engine.start_workout().unwrap();
        let events = tick_n(&mut engine, 15);

        let tick_zero = events
            .iter()
            .position(|e| matches!(e, Event::Tick { seconds_remaining: 0, .. }))
            .unwrap();
        let completed = events
            .iter()
            .position(|e| matches!(e, Event::SegmentCompleted { .. }))
            .unwrap();
        assert!(tick_zero < completed);
    }

    #[test]
    fn pause_resume_keep_screen_and_remaining() {
        let mut engine = engine(&["A", "B"], 30, 15);
        engine.start_workout().unwrap();
        tick_n(&mut engine, 4);

        assert!(engine.pause().is_some());
        assert!(engine.pause().is_none());
        assert!(tick_n(&mut engine, 10).is_empty());
        assert_eq!(engine.timer().seconds_remaining, 26);
        assert_eq!(engine.screen(), Screen::Exercise);

        assert!(matches!(
            engine.toggle_pause(),
            Some(Event::TimerResumed { seconds_remaining: 26, .. })
        ));
        tick_n(&mut engine, 1);
        assert_eq!(engine.timer().seconds_remaining, 25);
    }

    #[test]
    fn pause_without_session_is_noop() {
        let mut engine = engine(&["A"], 30, 15);
        assert!(engine.pause().is_none());
        assert!(engine.resume().is_none());
        assert!(engine.toggle_pause().is_none());
        assert!(engine.tick().is_empty());
    }

    #[test]
    fn end_freezes_session_and_stops_countdown() {
        let mut engine = engine(&["A", "B"], 30, 15);
        engine.start_workout().unwrap();
        tick_n(&mut engine, 35);
        assert_eq!(engine.screen(), Screen::Rest);

        let ended = engine.end_workout().unwrap();
        assert!(matches!(ended, Event::WorkoutEnded { total_sets: 1, .. }));
        assert_eq!(engine.screen(), Screen::Complete);
        assert_eq!(engine.timer(), TimerState::default());

        let session = engine.session().unwrap();
        let end_time = session.end_time();
        assert!(end_time.is_some());
        assert_eq!(session.total_sets_completed(), 1);

        // A tick already queued by the driver must not move anything.
        assert!(engine.tick().is_empty());
        assert!(engine.end_workout().is_none());
        assert_eq!(engine.session().unwrap().end_time(), end_time);
    }

    #[test]
    fn end_outside_active_screens_is_noop() {
        let mut engine = engine(&["A"], 30, 15);
        assert!(engine.end_workout().is_none());
        assert_eq!(engine.screen(), Screen::Config);
    }

    #[test]
    fn reset_discards_session() {
        let mut engine = engine(&["A"], 30, 15);
        engine.start_workout().unwrap();
        engine.end_workout();
        engine.reset_workout();

        assert_eq!(engine.screen(), Screen::Config);
        assert!(engine.session().is_none());
        assert!(engine.start_workout().is_ok());
    }

    #[test]
    fn reset_mid_segment_stops_countdown_first() {
        let mut engine = engine(&["A"], 30, 15);
        engine.start_workout().unwrap();
        tick_n(&mut engine, 3);
        engine.reset_workout();

        assert_eq!(engine.timer(), TimerState::default());
        assert!(engine.tick().is_empty());
    }

    #[test]
    fn config_edits_do_not_reach_running_session() {
        let mut engine = engine(&["A", "B"], 30, 15);
        engine.start_workout().unwrap();
        engine.config_mut().exercises = vec!["Z".into()];
        engine.config_mut().rest_duration = 60;

        tick_n(&mut engine, 30);
        assert_eq!(engine.screen(), Screen::Rest);
        assert_eq!(engine.timer().seconds_remaining, 15);
        tick_n(&mut engine, 15);
        assert_eq!(engine.current_exercise(), Some("B"));
    }

    #[test]
    fn snapshot_reports_progress() {
        let mut engine = engine(&["A", "B"], 30, 15);
        engine.start_workout().unwrap();
        tick_n(&mut engine, 15);

        match engine.snapshot() {
            Event::StateSnapshot {
                screen,
                exercise,
                seconds_remaining,
                circle_progress,
                set_progress,
                ..
            } => {
                assert_eq!(screen, Screen::Exercise);
                assert_eq!(exercise.as_deref(), Some("A"));
                assert_eq!(seconds_remaining, 15);
                assert_eq!(circle_progress, 50.0);
                assert_eq!(set_progress, 15.0 / 75.0);
            }
            _ => panic!("Expected StateSnapshot"),
        }
    }
}

//! Audio/vibration cue dispatch.
//!
//! Pure mapping from countdown position to feedback. Nothing here touches
//! hardware; [`crate::peripherals::Peripherals`] plays what this returns.
//!
//! Three independent cue classes:
//! - **Countdown**: the last five seconds and zero, pitch rising at 1 and 0
//! - **Halfway**: exercise segments only, at `floor(duration / 2)`
//! - **Set complete**: once, when the last exercise of a set ends

use serde::{Deserialize, Serialize};

use crate::timer::SegmentKind;

/// Tone frequencies in Hz.
pub mod frequencies {
    /// Countdown beep for 2..=5 seconds left
    pub const COUNTDOWN_LOW: u32 = 600;
    /// Countdown beep at 1 second left
    pub const COUNTDOWN_HIGH: u32 = 1000;
    /// Countdown beep at zero
    pub const COUNTDOWN_FINAL: u32 = 1200;
    /// Halfway double beep
    pub const HALFWAY: u32 = 800;
    /// Ascending set-complete arpeggio
    pub const SET_COMPLETE: [u32; 3] = [600, 800, 1000];
}

/// Tone and vibration durations in milliseconds.
pub mod durations {
    pub const COUNTDOWN_TONE: u32 = 300;
    pub const COUNTDOWN_PULSE: u32 = 100;
    pub const HALFWAY_TONE: u32 = 150;
    pub const HALFWAY_GAP: u32 = 200;
    pub const HALFWAY_PULSES: [u32; 3] = [50, 50, 50];
    pub const SET_COMPLETE_TONES: [u32; 3] = [200, 200, 300];
    pub const SET_COMPLETE_STAGGER: u32 = 150;
    pub const SET_COMPLETE_PULSES: [u32; 3] = [200, 100, 200];
}

/// Countdown beeps cover this many seconds before zero.
pub const COUNTDOWN_WINDOW_SECS: u32 = 5;

/// One beep, `offset_ms` after the cue fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tone {
    pub frequency_hz: u32,
    pub duration_ms: u32,
    pub offset_ms: u32,
}

impl Tone {
    pub fn new(frequency_hz: u32, duration_ms: u32) -> Self {
        Self {
            frequency_hz,
            duration_ms,
            offset_ms: 0,
        }
    }

    pub fn at(mut self, offset_ms: u32) -> Self {
        self.offset_ms = offset_ms;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CueKind {
    Countdown { seconds_remaining: u32 },
    Halfway,
    SetComplete,
}

/// A tone sequence plus a vibration pattern (alternating on/off, ms).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cue {
    pub kind: CueKind,
    pub tones: Vec<Tone>,
    pub vibration: Vec<u32>,
}

impl Cue {
    pub fn countdown(seconds_remaining: u32) -> Self {
        let frequency = match seconds_remaining {
            0 => frequencies::COUNTDOWN_FINAL,
            1 => frequencies::COUNTDOWN_HIGH,
            _ => frequencies::COUNTDOWN_LOW,
        };
        Self {
            kind: CueKind::Countdown { seconds_remaining },
            tones: vec![Tone::new(frequency, durations::COUNTDOWN_TONE)],
            vibration: vec![durations::COUNTDOWN_PULSE],
        }
    }

    pub fn halfway() -> Self {
        Self {
            kind: CueKind::Halfway,
            tones: vec![
                Tone::new(frequencies::HALFWAY, durations::HALFWAY_TONE),
                Tone::new(frequencies::HALFWAY, durations::HALFWAY_TONE).at(durations::HALFWAY_GAP),
            ],
            vibration: durations::HALFWAY_PULSES.to_vec(),
        }
    }

    pub fn set_complete() -> Self {
        let tones = frequencies::SET_COMPLETE
            .iter()
            .zip(durations::SET_COMPLETE_TONES)
            .zip(0u32..)
            .map(|((&hz, ms), step)| Tone::new(hz, ms).at(step * durations::SET_COMPLETE_STAGGER))
            .collect();
        Self {
            kind: CueKind::SetComplete,
            tones,
            vibration: durations::SET_COMPLETE_PULSES.to_vec(),
        }
    }
}

/// Cues for a tick that left `seconds_remaining` on a segment of `kind`
/// lasting `segment_duration` seconds.
///
/// Countdown and halfway cues are independent and may both fire.
pub fn tick_cues(seconds_remaining: u32, kind: SegmentKind, segment_duration: u32) -> Vec<Cue> {
    let mut cues = Vec::new();
    if seconds_remaining <= COUNTDOWN_WINDOW_SECS {
        cues.push(Cue::countdown(seconds_remaining));
    }
    if kind == SegmentKind::Exercise && seconds_remaining == segment_duration / 2 {
        cues.push(Cue::halfway());
    }
    cues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(cues: &[Cue]) -> Vec<CueKind> {
        cues.iter().map(|c| c.kind).collect()
    }

    #[test]
    fn countdown_pitch_rises_at_the_end() {
        let pitch = |n| Cue::countdown(n).tones[0].frequency_hz;
        assert_eq!(pitch(0), 1200);
        assert_eq!(pitch(1), 1000);
        for n in 2..=5 {
            assert_eq!(pitch(n), 600);
        }
        assert_eq!(Cue::countdown(3).tones[0].duration_ms, 300);
        assert_eq!(Cue::countdown(3).vibration, vec![100]);
    }

    #[test]
    fn countdown_window_is_zero_through_five() {
        assert!(tick_cues(6, SegmentKind::Rest, 30).is_empty());
        for n in 0..=5 {
            assert_eq!(
                kinds(&tick_cues(n, SegmentKind::Rest, 30)),
                vec![CueKind::Countdown { seconds_remaining: n }]
            );
        }
    }

    #[test]
    fn halfway_only_on_exercise() {
        assert_eq!(
            kinds(&tick_cues(22, SegmentKind::Exercise, 45)),
            vec![CueKind::Halfway]
        );
        assert!(tick_cues(22, SegmentKind::Rest, 45).is_empty());
        assert!(tick_cues(15, SegmentKind::BetweenSets, 30).is_empty());
    }

    #[test]
    fn halfway_fires_once_across_a_segment() {
        let count = (0..60)
            .rev()
            .flat_map(|n| tick_cues(n, SegmentKind::Exercise, 60))
            .filter(|c| c.kind == CueKind::Halfway)
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn halfway_and_countdown_can_cofire() {
        // A 10s exercise would hit halfway inside the countdown window.
        assert_eq!(
            kinds(&tick_cues(5, SegmentKind::Exercise, 10)),
            vec![CueKind::Countdown { seconds_remaining: 5 }, CueKind::Halfway]
        );
    }

    #[test]
    fn halfway_is_a_double_beep() {
        let cue = Cue::halfway();
        assert_eq!(cue.tones.len(), 2);
        assert_eq!(cue.tones[1].offset_ms, 200);
        assert!(cue.tones.iter().all(|t| t.frequency_hz == 800 && t.duration_ms == 150));
        assert_eq!(cue.vibration, vec![50, 50, 50]);
    }

    #[test]
    fn set_complete_ascends() {
        let cue = Cue::set_complete();
        let freqs: Vec<_> = cue.tones.iter().map(|t| t.frequency_hz).collect();
        let offsets: Vec<_> = cue.tones.iter().map(|t| t.offset_ms).collect();
        assert_eq!(freqs, vec![600, 800, 1000]);
        assert_eq!(offsets, vec![0, 150, 300]);
        assert_eq!(cue.vibration, vec![200, 100, 200]);
    }
}

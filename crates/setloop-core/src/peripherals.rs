//! Capability ports for audio, vibration and display wake-keeping.
//!
//! Platforms plug their primitives in behind these traits. [`Peripherals`]
//! is the only caller: it logs every failure and carries on, so a missing
//! speaker or a refused wake lock never stalls the countdown.

use crate::cues::{Cue, Tone};
use crate::error::CapabilityError;
use crate::workout::Screen;

pub trait AudioOutput {
    /// Fire-and-forget beep.
    fn tone(&mut self, frequency_hz: u32, duration_ms: u32) -> Result<(), CapabilityError>;

    /// Play a cue's tones. Ports able to schedule should honour
    /// `offset_ms`; the default plays them in order.
    ///
    /// Every tone is attempted; the first failure is returned afterwards.
    fn play(&mut self, tones: &[Tone]) -> Result<(), CapabilityError> {
        let mut first_err = None;
        for tone in tones {
            if let Err(e) = self.tone(tone.frequency_hz, tone.duration_ms) {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}

pub trait Vibrator {
    /// Alternating on/off durations in milliseconds.
    fn pulse(&mut self, pattern: &[u32]) -> Result<(), CapabilityError>;
}

/// Keeps the display awake. Both calls may repeat.
pub trait WakeLock {
    fn acquire(&mut self) -> Result<(), CapabilityError>;
    fn release(&mut self) -> Result<(), CapabilityError>;
}

/// Does nothing, successfully.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl AudioOutput for Silent {
    fn tone(&mut self, _frequency_hz: u32, _duration_ms: u32) -> Result<(), CapabilityError> {
        Ok(())
    }
}

impl Vibrator for Silent {
    fn pulse(&mut self, _pattern: &[u32]) -> Result<(), CapabilityError> {
        Ok(())
    }
}

impl WakeLock for Silent {
    fn acquire(&mut self) -> Result<(), CapabilityError> {
        Ok(())
    }

    fn release(&mut self) -> Result<(), CapabilityError> {
        Ok(())
    }
}

pub struct Peripherals {
    audio: Box<dyn AudioOutput>,
    vibrator: Box<dyn Vibrator>,
    wake_lock: Box<dyn WakeLock>,
    wake_requested: bool,
}

impl Peripherals {
    pub fn new(
        audio: Box<dyn AudioOutput>,
        vibrator: Box<dyn Vibrator>,
        wake_lock: Box<dyn WakeLock>,
    ) -> Self {
        Self {
            audio,
            vibrator,
            wake_lock,
            wake_requested: false,
        }
    }

    pub fn silent() -> Self {
        Self::new(Box::new(Silent), Box::new(Silent), Box::new(Silent))
    }

    pub fn wake_requested(&self) -> bool {
        self.wake_requested
    }

    pub fn play(&mut self, cue: &Cue) {
        tracing::debug!(cue = ?cue.kind, "playing cue");
        if let Err(e) = self.audio.play(&cue.tones) {
            report("audio", &e);
        }
        if !cue.vibration.is_empty() {
            if let Err(e) = self.vibrator.pulse(&cue.vibration) {
                report("vibration", &e);
            }
        }
    }

    /// Hold the wake lock on active screens and drop it elsewhere.
    /// Only edges reach the port.
    pub fn sync_wake_lock(&mut self, screen: Screen) {
        match (screen.is_active(), self.wake_requested) {
            (true, false) => self.acquire_wake_lock(),
            (false, true) => {
                self.wake_requested = false;
                if let Err(e) = self.wake_lock.release() {
                    report("wake lock", &e);
                }
            }
            _ => {}
        }
    }

    /// Platforms drop wake locks when the app is hidden; ask again.
    pub fn visibility_regained(&mut self, screen: Screen) {
        if screen.is_active() {
            self.acquire_wake_lock();
        }
    }

    fn acquire_wake_lock(&mut self) {
        self.wake_requested = true;
        if let Err(e) = self.wake_lock.acquire() {
            report("wake lock", &e);
        }
    }
}

impl Default for Peripherals {
    fn default() -> Self {
        Self::silent()
    }
}

fn report(capability: &'static str, err: &CapabilityError) {
    match err {
        CapabilityError::Unsupported(_) => tracing::debug!(capability, error = %err, "capability unavailable"),
        CapabilityError::Failed { .. } => tracing::warn!(capability, error = %err, "capability failed"),
    }
}

//! Terminal stand-ins for the device capabilities.

use std::io::Write;

use setloop_core::{AudioOutput, CapabilityError, Peripherals, Vibrator, WakeLock};

/// Rings the terminal bell on stderr, one BEL per tone.
pub struct TerminalBell {
    muted: bool,
}

impl AudioOutput for TerminalBell {
    fn tone(&mut self, frequency_hz: u32, duration_ms: u32) -> Result<(), CapabilityError> {
        tracing::trace!(frequency_hz, duration_ms, "bell");
        if self.muted {
            return Ok(());
        }
        let mut stderr = std::io::stderr().lock();
        stderr
            .write_all(b"\x07")
            .and_then(|()| stderr.flush())
            .map_err(|e| CapabilityError::Failed {
                capability: "audio",
                message: e.to_string(),
            })
    }
}

pub struct NoVibration;

impl Vibrator for NoVibration {
    fn pulse(&mut self, _pattern: &[u32]) -> Result<(), CapabilityError> {
        Err(CapabilityError::Unsupported("vibration"))
    }
}

/// Terminals cannot hold the display awake; the request is only logged.
pub struct LoggedWakeLock;

impl WakeLock for LoggedWakeLock {
    fn acquire(&mut self) -> Result<(), CapabilityError> {
        tracing::info!("wake lock acquired");
        Ok(())
    }

    fn release(&mut self) -> Result<(), CapabilityError> {
        tracing::info!("wake lock released");
        Ok(())
    }
}

pub fn peripherals(muted: bool) -> Peripherals {
    Peripherals::new(
        Box::new(TerminalBell { muted }),
        Box::new(NoVibration),
        Box::new(LoggedWakeLock),
    )
}

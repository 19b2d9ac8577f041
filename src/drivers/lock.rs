//! Lock relay driver.
//!
//! A digital output energises the relay; the driver holds it for a fixed
//! duration and releases it.  The hold blocks the caller, so no other
//! command is serviced while the lock is open.
//!
//! ```text
//!  Released ──[pulse_unlock]──▶ Asserted ──[hold elapsed]──▶ Released
//! ```
//!
//! Generic over `embedded-hal` 1.0 [`OutputPin`] and [`DelayNs`], so the
//! same driver runs on an ESP-IDF `PinDriver` + `FreeRtos` delay or on
//! host mocks.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::{info, warn};

use crate::app::ports::LockPort;
use crate::error::ActuatorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    Released,
    Asserted,
}

pub struct LockActuator<P, D> {
    pin: P,
    delay: D,
    hold_ms: u32,
    state: LockState,
}

impl<P: OutputPin, D: DelayNs> LockActuator<P, D> {
    /// Take ownership of the relay pin and drive it low.
    pub fn new(mut pin: P, delay: D, hold_ms: u32) -> Result<Self, ActuatorError> {
        pin.set_low().map_err(|_| ActuatorError::ReleaseFailed)?;
        Ok(Self {
            pin,
            delay,
            hold_ms,
            state: LockState::Released,
        })
    }

    pub fn hold_ms(&self) -> u32 {
        self.hold_ms
    }
}

impl<P: OutputPin, D: DelayNs> LockPort for LockActuator<P, D> {
    fn pulse_unlock(&mut self) -> Result<(), ActuatorError> {
        self.pin.set_high().map_err(|_| ActuatorError::AssertFailed)?;
        self.state = LockState::Asserted;
        info!("lock: asserted for {} ms", self.hold_ms);

        self.delay.delay_ms(self.hold_ms);

        if self.pin.set_low().is_err() {
            warn!("lock: release failed, relay may still be energised");
            return Err(ActuatorError::ReleaseFailed);
        }
        self.state = LockState::Released;
        info!("lock: released");
        Ok(())
    }

    fn state(&self) -> LockState {
        self.state
    }
}

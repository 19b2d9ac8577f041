//! Status LED driver.
//!
//! A single digital LED.  In normal operation it is left off; when the
//! controller halts it blinks forever so the fault is visible on the
//! board without a serial console.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

pub struct StatusLed<P> {
    pin: P,
    lit: bool,
}

impl<P: OutputPin> StatusLed<P> {
    pub fn new(pin: P) -> Self {
        Self { pin, lit: false }
    }

    pub fn set(&mut self, on: bool) {
        // A failing LED pin has nowhere to report to.
        let _ = if on { self.pin.set_high() } else { self.pin.set_low() };
        self.lit = on;
    }

    pub fn off(&mut self) {
        self.set(false);
    }

    /// One on/off cycle of `half_period_ms` each.
    pub fn blink(&mut self, delay: &mut impl DelayNs, half_period_ms: u32) {
        self.set(true);
        delay.delay_ms(half_period_ms);
        self.set(false);
        delay.delay_ms(half_period_ms);
    }

    /// Fatal-halt indication: blink until reset.
    pub fn halt(&mut self, delay: &mut impl DelayNs, half_period_ms: u32) -> ! {
        loop {
            self.blink(delay, half_period_ms);
        }
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }
}

//! Fuzz target: `AccessController::bring_up`
//!
//! Scripts arbitrary module replies and asserts that bring-up either
//! succeeds or halts, and that a halted controller never reads again.
//!
//! cargo fuzz run fuzz_bring_up

#![no_main]

use std::collections::VecDeque;
use std::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};
use libfuzzer_sys::fuzz_target;
use rflock::app::ports::{ByteChannel, LockPort, NullSink};
use rflock::app::service::AccessController;
use rflock::config::ControllerConfig;
use rflock::drivers::lock::LockState;
use rflock::error::{ActuatorError, ChannelError};

struct FuzzChannel {
    inbound: VecDeque<u8>,
    written: usize,
}

impl ByteChannel for FuzzChannel {
    fn is_readable(&mut self) -> bool {
        !self.inbound.is_empty()
    }

    fn is_writable(&mut self) -> bool {
        true
    }

    fn read_byte(&mut self) -> Result<u8, ChannelError> {
        self.inbound.pop_front().ok_or(ChannelError::TimedOut)
    }

    fn write_byte(&mut self, _byte: u8) -> Result<(), ChannelError> {
        self.written += 1;
        Ok(())
    }
}

struct IdleLock;

impl LockPort for IdleLock {
    fn pulse_unlock(&mut self) -> Result<(), ActuatorError> {
        Ok(())
    }

    fn state(&self) -> LockState {
        LockState::Released
    }
}

struct Line;

impl ErrorType for Line {
    type Error = Infallible;
}

impl OutputPin for Line {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

fuzz_target!(|data: &[u8]| {
    let halt_on_power_reject = data.first().is_some_and(|b| b & 1 == 1);
    let config = ControllerConfig {
        halt_on_power_reject,
        ..ControllerConfig::default()
    };
    let channel = FuzzChannel {
        inbound: data.iter().skip(1).copied().collect(),
        written: 0,
    };
    let Ok(mut ctl) = AccessController::new(channel, IdleLock, &config) else {
        return;
    };

    match ctl.bring_up(Line, &mut NullSink) {
        Ok(cfg) => assert_eq!(ctl.radio_config(), Some(cfg)),
        Err(_) => {
            assert!(ctl.is_halted());
            let before = ctl.channel().inbound.len();
            assert!(matches!(ctl.poll(&mut NullSink), Ok(None)));
            assert_eq!(ctl.channel().inbound.len(), before);
        }
    }
    // RESET + SET_TX_POWER + GET_CONFIG at most.
    assert!(ctl.channel().written <= 10);
});

//! Fuzz target: `AccessController::poll`
//!
//! Feeds arbitrary byte streams to the opcode dispatcher and asserts that
//! it never panics, writes at most one reply byte per opcode, and only ever
//! pulses the lock after replying with the accept byte.
//!
//! cargo fuzz run fuzz_command_stream

#![no_main]

use std::collections::VecDeque;

use libfuzzer_sys::fuzz_target;
use rflock::app::ports::{ByteChannel, LockPort, NullSink};
use rflock::app::service::AccessController;
use rflock::config::ControllerConfig;
use rflock::drivers::lock::LockState;
use rflock::error::{ActuatorError, ChannelError};

struct FuzzChannel {
    inbound: VecDeque<u8>,
    outbound: Vec<u8>,
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

    fn write_byte(&mut self, byte: u8) -> Result<(), ChannelError> {
        self.outbound.push(byte);
        Ok(())
    }
}

/// Counts pulses.
struct CountingLock {
    pulses: usize,
}

impl LockPort for CountingLock {
    fn pulse_unlock(&mut self) -> Result<(), ActuatorError> {
        self.pulses += 1;
        Ok(())
    }

    fn state(&self) -> LockState {
        LockState::Released
    }
}

fuzz_target!(|data: &[u8]| {
    let channel = FuzzChannel {
        inbound: data.iter().copied().collect(),
        outbound: Vec::new(),
    };
    let lock = CountingLock { pulses: 0 };
    let Ok(mut ctl) = AccessController::new(channel, lock, &ControllerConfig::default()) else {
        return;
    };

    let mut handled = 0usize;
    loop {
        match ctl.poll(&mut NullSink) {
            Ok(Some(_)) => handled += 1,
            // Empty script, or a frame cut short by the end of the input.
            Ok(None) | Err(_) => break,
        }
    }

    let replies = ctl.channel().outbound.len();
    assert!(replies <= handled, "more replies than opcodes");
    assert!(
        ctl.lock().pulses <= ctl.channel().outbound.iter().filter(|b| **b == 0xDD).count(),
        "lock pulsed without an accept reply"
    );
    assert!(ctl.secret_len() <= rflock::config::MAX_CODE_LEN);
});

//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured controller events to the
//! `log` facade (ESP-IDF logger on target, whatever the host installs in
//! tests).  Secrets never reach the log; only their length does.

use log::{debug, error, info, warn};

use crate::app::events::AccessEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AccessEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AccessEvent) {
        match event {
            AccessEvent::RadioReady(cfg) => info!("RADIO | ready | {}", cfg),
            AccessEvent::PowerRejected(e) => warn!("RADIO | {}", e),
            AccessEvent::Halted(reason) => error!("HALT  | {}", reason),
            AccessEvent::Pong => debug!("PING  | pong"),
            AccessEvent::Unlocked => info!("UNLOCK| accepted"),
            AccessEvent::Rejected => info!("UNLOCK| rejected"),
            AccessEvent::SecretUpdated { len } => info!("SECRET| updated len={}", len),
            AccessEvent::InputOverflow { opcode, discarded } => {
                warn!("INPUT | overflow on {:?}, discarded {} bytes", opcode, discarded);
            }
            AccessEvent::Ignored(byte) => debug!("INPUT | ignored 0x{:02x}", byte),
        }
    }
}

//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AccessController (domain)
//! ```
//!
//! Driven adapters (UART, lock relay, event sinks) implement these traits.
//! The [`AccessController`](super::service::AccessController) consumes them
//! via generics, so the domain core never touches hardware directly.

use crate::drivers::lock::LockState;
use crate::error::{ActuatorError, ChannelError};

// ───────────────────────────────────────────────────────────────
// Byte channel (driven adapter: domain ↔ UART)
// ───────────────────────────────────────────────────────────────

/// Polling byte-stream transport shared by the RF module and the remote
/// client.  No framing, parity, or error correction beyond byte-exact
/// delivery.
///
/// Production implementations block indefinitely in `read_byte` /
/// `write_byte`.  Test channels may instead return
/// [`ChannelError::TimedOut`] so a stalled peer ends the test rather than
/// hanging it.
pub trait ByteChannel {
    /// At least one byte can be read without blocking.
    fn is_readable(&mut self) -> bool;

    /// At least one byte can be written without blocking.
    fn is_writable(&mut self) -> bool;

    /// Read one byte, blocking until one is available.
    fn read_byte(&mut self) -> Result<u8, ChannelError>;

    /// Write one byte, blocking until there is room for it.
    fn write_byte(&mut self, byte: u8) -> Result<(), ChannelError>;
}

impl<T: ByteChannel + ?Sized> ByteChannel for &mut T {
    fn is_readable(&mut self) -> bool {
        (**self).is_readable()
    }

    fn is_writable(&mut self) -> bool {
        (**self).is_writable()
    }

    fn read_byte(&mut self) -> Result<u8, ChannelError> {
        (**self).read_byte()
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), ChannelError> {
        (**self).write_byte(byte)
    }
}

// ───────────────────────────────────────────────────────────────
// Lock port (driven adapter: domain → relay)
// ───────────────────────────────────────────────────────────────

/// Momentary lock relay.
pub trait LockPort {
    /// Energise the relay, hold it for the configured duration, release it.
    /// Blocks for the whole hold.
    fn pulse_unlock(&mut self) -> Result<(), ActuatorError>;

    /// Current relay state.
    fn state(&self) -> LockState;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The controller emits structured [`AccessEvent`](super::events::AccessEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AccessEvent);
}

/// Sink that drops every event.
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &super::events::AccessEvent) {}
}

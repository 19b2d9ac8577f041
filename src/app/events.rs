//! Outbound controller events.
//!
//! The [`AccessController`](super::service::AccessController) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on
//! the other side decide what to do with them.  No variant carries secret
//! material.

use crate::error::RadioError;
use crate::protocol::RfConfig;

use super::commands::Opcode;
use super::service::HaltReason;

/// Structured events emitted by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessEvent {
    /// Radio bring-up finished; carries the configuration read back.
    RadioReady(RfConfig),

    /// The module refused the TX-power command but bring-up continued.
    PowerRejected(RadioError),

    /// Bring-up failed; the controller will not dispatch again.
    Halted(HaltReason),

    /// A ping was answered.
    Pong,

    /// A matching code was presented and the lock was pulsed.
    Unlocked,

    /// A code was presented that does not match the secret.
    Rejected,

    /// The secret was replaced; carries the new length only.
    SecretUpdated { len: usize },

    /// A code ran past buffer capacity and was discarded up to its terminator.
    InputOverflow { opcode: Opcode, discarded: usize },

    /// A byte that is not a known opcode arrived and was dropped.
    Ignored(u8),
}

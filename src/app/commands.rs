//! Inbound command opcodes.
//!
//! The first byte of every client message selects a handler in the
//! [`AccessController`](super::service::AccessController).  Any byte that
//! is not listed here is ignored.

use crate::protocol::{OP_PING, OP_SET_SECRET, OP_UNLOCK};

/// Commands a remote client can send over the radio link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    /// `0xBB`: a NUL-terminated unlock code follows.
    Unlock,

    /// `0xDD`: liveness probe, answered with a single byte.
    Ping,

    /// `0xFF`: a newline-terminated replacement secret follows.
    SetSecret,
}

impl Opcode {
    /// Decode a command byte; `None` for anything unrecognised.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            OP_UNLOCK => Some(Self::Unlock),
            OP_PING => Some(Self::Ping),
            OP_SET_SECRET => Some(Self::SetSecret),
            _ => None,
        }
    }

    pub fn as_byte(self) -> u8 {
        match self {
            Self::Unlock => OP_UNLOCK,
            Self::Ping => OP_PING,
            Self::SetSecret => OP_SET_SECRET,
        }
    }
}

//! Bounded storage for the shared secret and for inbound codes.
//!
//! Both buffers hold at most [`MAX_CODE_LEN`] code bytes; the terminator
//! that ends a code on the wire is never stored.  A push past capacity
//! returns [`CapacityError`] and leaves the buffer untouched.

use core::fmt;

use heapless::Vec;

use crate::config::MAX_CODE_LEN;
use crate::error::CapacityError;
use crate::protocol::codes_equal;

// ───────────────────────────────────────────────────────────────
// InboundBuffer
// ───────────────────────────────────────────────────────────────

/// Accumulates one terminator-delimited code from the channel.
///
/// Lives for a single handler invocation.
#[derive(Default)]
pub struct InboundBuffer {
    bytes: Vec<u8, MAX_CODE_LEN>,
}

impl InboundBuffer {
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    pub fn push(&mut self, byte: u8) -> Result<(), CapacityError> {
        self.bytes.push(byte).map_err(|_| CapacityError {
            capacity: MAX_CODE_LEN,
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Drop everything from the first `byte` onwards, if present.
    pub fn truncate_at(&mut self, byte: u8) {
        if let Some(pos) = self.bytes.iter().position(|&b| b == byte) {
            self.bytes.truncate(pos);
        }
    }
}

// ───────────────────────────────────────────────────────────────
// SecretCode
// ───────────────────────────────────────────────────────────────

/// The code an unlock attempt must present.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretCode {
    bytes: Vec<u8, MAX_CODE_LEN>,
}

impl SecretCode {
    /// Build a secret from raw bytes, failing if they exceed capacity.
    pub fn from_bytes(code: &[u8]) -> Result<Self, CapacityError> {
        let bytes = Vec::from_slice(code).map_err(|_| CapacityError {
            capacity: MAX_CODE_LEN,
        })?;
        Ok(Self { bytes })
    }

    /// Replace the stored code with the contents of `inbound`.
    pub fn replace_with(&mut self, inbound: &InboundBuffer) {
        self.bytes = inbound.bytes.clone();
    }

    pub fn matches(&self, attempt: &[u8]) -> bool {
        codes_equal(&self.bytes, attempt)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Never prints the code itself.
impl fmt::Debug for SecretCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretCode")
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

//! Unified error types for the RfLock firmware.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! dispatch loop's error handling uniform.  All variants are `Copy` so they
//! can be passed through the controller and into events without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The serial byte channel failed or timed out.
    Channel(ChannelError),
    /// The RF module answered a command frame unexpectedly.
    Radio(RadioError),
    /// The lock relay output could not be driven.
    Actuator(ActuatorError),
    /// A bounded buffer was asked to hold more than its capacity.
    Capacity(CapacityError),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Channel(e) => write!(f, "channel: {e}"),
            Self::Radio(e) => write!(f, "radio: {e}"),
            Self::Actuator(e) => write!(f, "actuator: {e}"),
            Self::Capacity(e) => write!(f, "capacity: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Channel errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelError {
    /// The underlying UART reported a receive error.
    ReadFailed,
    /// The underlying UART reported a transmit error.
    WriteFailed,
    /// No byte arrived in time (test and simulation channels only).
    TimedOut,
}

impl fmt::Display for ChannelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFailed => write!(f, "read failed"),
            Self::WriteFailed => write!(f, "write failed"),
            Self::TimedOut => write!(f, "timed out"),
        }
    }
}

impl From<ChannelError> for Error {
    fn from(e: ChannelError) -> Self {
        Self::Channel(e)
    }
}

// ---------------------------------------------------------------------------
// Radio errors
// ---------------------------------------------------------------------------

/// The module is in an unknown state after any of these; see
/// [`HaltReason`](crate::app::service::HaltReason).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioError {
    /// Reset was answered with something other than `OK\r\n`.
    ResetRejected([u8; 4]),
    /// Set-TX-power was answered with something other than `OK\r\n`.
    PowerRejected([u8; 4]),
    /// The config/operate control line could not be driven.
    ConfigLine,
}

impl fmt::Display for RadioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResetRejected(reply) => write!(f, "reset rejected (reply={:02x?})", reply),
            Self::PowerRejected(reply) => write!(f, "tx power rejected (reply={:02x?})", reply),
            Self::ConfigLine => write!(f, "config line write failed"),
        }
    }
}

impl From<RadioError> for Error {
    fn from(e: RadioError) -> Self {
        Self::Radio(e)
    }
}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// Driving the relay pin high failed; the lock was never energised.
    AssertFailed,
    /// Driving the relay pin low failed; the relay may still be energised.
    ReleaseFailed,
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AssertFailed => write!(f, "relay assert failed"),
            Self::ReleaseFailed => write!(f, "relay release failed"),
        }
    }
}

impl From<ActuatorError> for Error {
    fn from(e: ActuatorError) -> Self {
        Self::Actuator(e)
    }
}

// ---------------------------------------------------------------------------
// Capacity errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityError {
    /// Maximum number of code bytes the buffer accepts.
    pub capacity: usize,
}

impl fmt::Display for CapacityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "more than {} bytes", self.capacity)
    }
}

impl From<CapacityError> for Error {
    fn from(e: CapacityError) -> Self {
        Self::Capacity(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;

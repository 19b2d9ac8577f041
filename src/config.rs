//! Controller configuration parameters
//!
//! All tunable parameters for the RfLock controller.  Nothing here is
//! persisted: the secret returns to `default_secret` on every boot.

use heapless::String;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::protocol::MAX_TX_POWER;

/// Capacity of the secret and inbound buffers, terminator included.
pub const SECRET_CAPACITY: usize = 16;

/// Longest code that fits alongside its terminator.
pub const MAX_CODE_LEN: usize = SECRET_CAPACITY - 1;

/// Logic level of a digital control line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineLevel {
    Low,
    High,
}

impl LineLevel {
    pub fn inverted(self) -> Self {
        match self {
            Self::Low => Self::High,
            Self::High => Self::Low,
        }
    }
}

/// Core controller configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerConfig {
    // --- Secret ---
    /// Secret in effect at boot, until a remote update replaces it
    pub default_secret: String<MAX_CODE_LEN>,

    // --- Lock ---
    /// How long the relay stays energised after a matching code (ms)
    pub unlock_hold_ms: u32,

    // --- Radio ---
    /// Transmit power level sent during bring-up (1-7)
    pub tx_power: u8,
    /// Level of the config/operate line that selects configuration mode
    pub config_mode_level: LineLevel,
    /// Treat a rejected Set-TX-power as a fatal bring-up failure
    pub halt_on_power_reject: bool,
    /// UART baud rate towards the radio module
    pub radio_baud: u32,

    // --- Diagnostics ---
    /// Half-period of the status LED blink while halted (ms)
    pub halt_blink_ms: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        let mut default_secret = String::new();
        // "UNLOCK" is six bytes; always fits MAX_CODE_LEN.
        let _ = default_secret.push_str("UNLOCK");

        Self {
            default_secret,

            // Lock
            unlock_hold_ms: 5_000,

            // Radio
            tx_power: MAX_TX_POWER,
            config_mode_level: LineLevel::Low,
            halt_on_power_reject: false,
            radio_baud: 9_600,

            // Diagnostics
            halt_blink_ms: 250,
        }
    }
}

impl ControllerConfig {
    /// Reject values that would leave the controller unusable.
    pub fn validate(&self) -> Result<()> {
        if self.default_secret.is_empty() {
            return Err(Error::Config("default_secret must not be empty"));
        }
        if self.default_secret.as_bytes().contains(&0) {
            return Err(Error::Config("default_secret must not contain NUL"));
        }
        if self.unlock_hold_ms == 0 {
            return Err(Error::Config("unlock_hold_ms must be > 0"));
        }
        if self.tx_power == 0 || self.tx_power > MAX_TX_POWER {
            return Err(Error::Config("tx_power must be 1-7"));
        }
        if self.radio_baud == 0 {
            return Err(Error::Config("radio_baud must be > 0"));
        }
        if self.halt_blink_ms == 0 {
            return Err(Error::Config("halt_blink_ms must be > 0"));
        }
        Ok(())
    }
}

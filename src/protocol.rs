//! Wire constants for both serial peers: the RF module command set and the
//! single-byte access-control opcodes.
//!
//! Single source of truth for every byte that crosses the UART.  Drivers
//! and the access controller reference these rather than hard-coding
//! literals.
//!
//! ```text
//!  RF module (config mode)           Remote client (operate mode)
//!  ───────────────────────           ────────────────────────────
//!  AA FA E1          → 16B config    BB <code> 00   → DD | CC
//!  AA FA F0          → "OK\r\n"      DD             → DD
//!  AA FA 96 <level>  → "OK\r\n"      FF <code> 0A   → DD | CC
//! ```

use core::fmt;

// ---------------------------------------------------------------------------
// RF module command frames
// ---------------------------------------------------------------------------

/// Prefix shared by every RF module command.
pub const RF_PREFIX: [u8; 2] = [0xAA, 0xFA];

/// A fixed-length command frame.  `N` is known at compile time so a
/// partial frame can never be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandFrame<const N: usize>([u8; N]);

impl<const N: usize> CommandFrame<N> {
    pub const fn new(bytes: [u8; N]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }

    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }
}

/// Read back the module's 16-byte configuration record.
pub const GET_CONFIG: CommandFrame<3> = CommandFrame::new([0xAA, 0xFA, 0xE1]);

/// Restore factory configuration.  Three bytes on the wire; no padding.
pub const RESET: CommandFrame<3> = CommandFrame::new([0xAA, 0xFA, 0xF0]);

/// Highest transmit power level the module accepts.
pub const MAX_TX_POWER: u8 = 0x07;

/// Set-TX-power frame at `MAX_TX_POWER`.
pub const SET_MAX_TX_POWER: CommandFrame<4> = set_tx_power(MAX_TX_POWER);

/// Build a Set-TX-power frame for `level` (1..=7).  The module refuses 0.
pub const fn set_tx_power(level: u8) -> CommandFrame<4> {
    CommandFrame::new([0xAA, 0xFA, 0x96, level])
}

/// Acknowledgement the module sends for accepted configuration commands.
pub const ACK_OK: [u8; 4] = *b"OK\r\n";

/// Length of an acknowledgement reply.
pub const ACK_LEN: usize = ACK_OK.len();

// ---------------------------------------------------------------------------
// Access-control opcodes and replies
// ---------------------------------------------------------------------------

/// Start of an unlock attempt; followed by a NUL-terminated code.
pub const OP_UNLOCK: u8 = 0xBB;
/// Liveness probe.
pub const OP_PING: u8 = 0xDD;
/// Start of a secret update; followed by a newline-terminated code.
pub const OP_SET_SECRET: u8 = 0xFF;

/// Reply to a matching unlock attempt.
pub const REPLY_ACCEPT: u8 = 0xDD;
/// Reply to a non-matching or oversized unlock attempt.
pub const REPLY_REJECT: u8 = 0xCC;
/// Reply to a ping.
pub const REPLY_PONG: u8 = 0xDD;
/// Reply to an accepted secret update.
pub const REPLY_ACK: u8 = 0xDD;
/// Reply to a refused secret update.
pub const REPLY_NAK: u8 = 0xCC;

/// Terminator of an unlock code.
pub const UNLOCK_TERMINATOR: u8 = 0x00;
/// Terminator of a secret update.
pub const SECRET_TERMINATOR: u8 = b'\n';

/// Byte-for-byte equality of two codes or replies.
///
/// `true` means equal.  Used for the secret check and for every RF
/// acknowledgement so the sense of the comparison is the same everywhere.
/// Not constant-time.
pub fn codes_equal(a: &[u8], b: &[u8]) -> bool {
    a == b
}

// ---------------------------------------------------------------------------
// RF configuration record
// ---------------------------------------------------------------------------

/// Size of the record returned for [`GET_CONFIG`].
pub const RF_CONFIG_LEN: usize = 16;

/// The module's configuration as reported by [`GET_CONFIG`].
///
/// Positional little-endian layout:
///
/// | Offset | Size | Field       |
/// |--------|------|-------------|
/// | 0      | 4    | frequency   |
/// | 4      | 4    | data_rate   |
/// | 8      | 2    | bandwidth   |
/// | 10     | 1    | deviation   |
/// | 11     | 1    | tx_power    |
/// | 12     | 4    | baud_rate   |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RfConfig {
    /// Carrier frequency in Hz.
    pub frequency: u32,
    /// Air data rate in bit/s.
    pub data_rate: u32,
    /// Receive bandwidth in kHz.
    pub bandwidth: u16,
    /// Frequency deviation in kHz.
    pub deviation: u8,
    /// Transmit power level (1..=7).
    pub tx_power: u8,
    /// Serial baud rate in bit/s.
    pub baud_rate: u32,
}

impl RfConfig {
    pub fn from_bytes(raw: &[u8; RF_CONFIG_LEN]) -> Self {
        let u32_at = |i: usize| u32::from_le_bytes([raw[i], raw[i + 1], raw[i + 2], raw[i + 3]]);
        Self {
            frequency: u32_at(0),
            data_rate: u32_at(4),
            bandwidth: u16::from_le_bytes([raw[8], raw[9]]),
            deviation: raw[10],
            tx_power: raw[11],
            baud_rate: u32_at(12),
        }
    }

    pub fn to_bytes(&self) -> [u8; RF_CONFIG_LEN] {
        let mut raw = [0u8; RF_CONFIG_LEN];
        raw[0..4].copy_from_slice(&self.frequency.to_le_bytes());
        raw[4..8].copy_from_slice(&self.data_rate.to_le_bytes());
        raw[8..10].copy_from_slice(&self.bandwidth.to_le_bytes());
        raw[10] = self.deviation;
        raw[11] = self.tx_power;
        raw[12..16].copy_from_slice(&self.baud_rate.to_le_bytes());
        raw
    }
}

impl fmt::Display for RfConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "freq={}Hz rate={}bps bw={}kHz dev={}kHz power={} baud={}",
            self.frequency, self.data_rate, self.bandwidth, self.deviation, self.tx_power, self.baud_rate
        )
    }
}

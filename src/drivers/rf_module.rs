//! RF transceiver driver.
//!
//! Speaks the module's fixed binary command set over the shared
//! [`ByteChannel`] while the config/operate line selects configuration
//! mode, then hands the channel back for the access controller.
//!
//! ## Bring-up sequence
//!
//! ```text
//!  enter config mode ─▶ RESET ─▶ SET_TX_POWER ─▶ GET_CONFIG ─▶ exit config mode
//!                         │            │
//!                    [not OK: fatal]  [not OK: warn, or fatal if configured]
//! ```
//!
//! A failed reset leaves the module in an unknown state; no further frame
//! is sent after it.
//!
//! Replies are read without a timeout.  A module that never answers stalls
//! bring-up indefinitely.

use embedded_hal::digital::OutputPin;
use log::{debug, info, warn};

use crate::app::ports::ByteChannel;
use crate::config::{ControllerConfig, LineLevel};
use crate::error::{Error, RadioError, Result};
use crate::protocol::{
    self, ACK_LEN, ACK_OK, CommandFrame, GET_CONFIG, RESET, RF_CONFIG_LEN, RfConfig, codes_equal,
};

/// Bring-up options taken from [`ControllerConfig`].
#[derive(Debug, Clone, Copy)]
pub struct RadioOptions {
    pub tx_power: u8,
    pub config_mode_level: LineLevel,
    pub halt_on_power_reject: bool,
}

impl From<&ControllerConfig> for RadioOptions {
    fn from(c: &ControllerConfig) -> Self {
        Self {
            tx_power: c.tx_power,
            config_mode_level: c.config_mode_level,
            halt_on_power_reject: c.halt_on_power_reject,
        }
    }
}

/// What bring-up produced when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BringUpReport {
    /// Configuration read back from the module.
    pub config: RfConfig,
    /// Set when the module refused the TX-power command (non-fatal).
    pub power_rejected: Option<RadioError>,
}

pub struct RfModule<C, P> {
    channel: C,
    config_line: P,
    options: RadioOptions,
}

impl<C: ByteChannel, P: OutputPin> RfModule<C, P> {
    pub fn new(channel: C, config_line: P, options: RadioOptions) -> Self {
        Self {
            channel,
            config_line,
            options,
        }
    }

    // ── Framing ───────────────────────────────────────────────

    /// Write every byte of `frame`, waiting for room before each one.
    pub fn send_frame<const N: usize>(&mut self, frame: &CommandFrame<N>) -> Result<()> {
        for &byte in frame.as_bytes() {
            while !self.channel.is_writable() {}
            self.channel.write_byte(byte)?;
        }
        debug!("rf: sent {:02x?}", frame.as_bytes());
        Ok(())
    }

    /// Read exactly `N` bytes in receipt order.
    pub fn receive_frame<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        for slot in &mut buf {
            *slot = self.channel.read_byte()?;
        }
        debug!("rf: received {:02x?}", buf);
        Ok(buf)
    }

    // ── Module commands ───────────────────────────────────────

    /// Restore the module's factory configuration.
    pub fn reset_configuration(&mut self) -> Result<()> {
        info!("rf: resetting configuration");
        self.send_frame(&RESET)?;
        let reply: [u8; ACK_LEN] = self.receive_frame()?;
        if !codes_equal(&reply, &ACK_OK) {
            return Err(RadioError::ResetRejected(reply).into());
        }
        Ok(())
    }

    /// Set the transmit power to the configured level (7 = maximum).
    pub fn set_max_transmit_power(&mut self) -> Result<()> {
        info!("rf: setting tx power {}", self.options.tx_power);
        self.send_frame(&protocol::set_tx_power(self.options.tx_power))?;
        let reply: [u8; ACK_LEN] = self.receive_frame()?;
        if !codes_equal(&reply, &ACK_OK) {
            return Err(RadioError::PowerRejected(reply).into());
        }
        Ok(())
    }

    /// Read back the module configuration.  Diagnostic only.
    pub fn get_configuration(&mut self) -> Result<RfConfig> {
        self.send_frame(&GET_CONFIG)?;
        let raw: [u8; RF_CONFIG_LEN] = self.receive_frame()?;
        Ok(RfConfig::from_bytes(&raw))
    }

    pub fn enter_configuration_mode(&mut self) -> Result<()> {
        self.drive_config_line(self.options.config_mode_level)
    }

    pub fn exit_configuration_mode(&mut self) -> Result<()> {
        self.drive_config_line(self.options.config_mode_level.inverted())
    }

    fn drive_config_line(&mut self, level: LineLevel) -> Result<()> {
        let res = match level {
            LineLevel::Low => self.config_line.set_low(),
            LineLevel::High => self.config_line.set_high(),
        };
        res.map_err(|_| RadioError::ConfigLine)?;
        Ok(())
    }

    // ── Sequence ──────────────────────────────────────────────

    /// Run the one-time bring-up sequence.
    ///
    /// An `Err` means the module must be considered unusable.
    pub fn bring_up(&mut self) -> Result<BringUpReport> {
        self.enter_configuration_mode()?;
        self.reset_configuration()?;

        let power_rejected = match self.set_max_transmit_power() {
            Ok(()) => None,
            Err(Error::Radio(e)) if !self.options.halt_on_power_reject => {
                warn!("rf: {}, continuing", e);
                Some(e)
            }
            Err(e) => return Err(e),
        };

        let config = self.get_configuration()?;
        info!("rf: module config {}", config);

        self.exit_configuration_mode()?;
        info!("rf: operate mode");
        Ok(BringUpReport {
            config,
            power_rejected,
        })
    }

    /// Hand back the channel and config line.
    pub fn into_parts(self) -> (C, P) {
        (self.channel, self.config_line)
    }
}

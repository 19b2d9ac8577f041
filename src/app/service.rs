//! Access controller: the hexagonal core.
//!
//! [`AccessController`] owns the secret, the byte channel, and the lock
//! port.  After radio bring-up it polls the channel for opcodes and
//! dispatches each one synchronously; a handler may read further bytes,
//! reply, and pulse the lock before the next opcode is looked at.
//!
//! ```text
//!  ByteChannel ──▶ ┌─────────────────────────┐ ──▶ EventSink
//!                  │    AccessController     │
//!    LockPort  ◀── │  dispatch · secret      │
//!                  └─────────────────────────┘
//! ```
//!
//! ## Lifecycle
//!
//! ```text
//!  Serving ──[bring-up failure]──────────▶ Halted (terminal)
//!     └─────[channel/relay fault in run]──▶ Halted (terminal)
//! ```
//!
//! A halted controller never touches the channel or the lock again.  A
//! fault seen by [`poll`](AccessController::poll) alone is returned to the
//! caller without changing state.

use core::fmt;

use embedded_hal::digital::OutputPin;
use log::{error, info, warn};

use crate::config::ControllerConfig;
use crate::drivers::lock::LockState;
use crate::drivers::rf_module::{RadioOptions, RfModule};
use crate::error::{Error, Result};
use crate::protocol::{
    REPLY_ACCEPT, REPLY_ACK, REPLY_NAK, REPLY_PONG, REPLY_REJECT, RfConfig, SECRET_TERMINATOR,
    UNLOCK_TERMINATOR,
};

use super::commands::Opcode;
use super::events::AccessEvent;
use super::ports::{ByteChannel, EventSink, LockPort};
use super::secret::{InboundBuffer, SecretCode};

// ───────────────────────────────────────────────────────────────
// Lifecycle state
// ───────────────────────────────────────────────────────────────

/// Why the controller entered the fatal halt: a `Radio` error from
/// bring-up, or a `Channel`/`Actuator` fault while running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HaltReason(pub Error);

impl fmt::Display for HaltReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Error::Radio(_) => write!(f, "radio bring-up failed: {}", self.0),
            _ => write!(f, "runtime fault: {}", self.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// Dispatching inbound opcodes.
    Serving,
    /// Fatal halt; requires an external reset.
    Halted(HaltReason),
}

/// Result of reading one terminator-delimited code.
enum Inbound {
    Complete(InboundBuffer),
    /// The code ran past capacity; `discarded` bytes were read and dropped.
    Overflow { discarded: usize },
}

// ───────────────────────────────────────────────────────────────
// AccessController
// ───────────────────────────────────────────────────────────────

pub struct AccessController<C, L> {
    channel: C,
    lock: L,
    secret: SecretCode,
    radio: RadioOptions,
    state: ControllerState,
    radio_config: Option<RfConfig>,
}

impl<C: ByteChannel, L: LockPort> AccessController<C, L> {
    /// Construct the controller in `Serving` with the configured default secret.
    ///
    /// Does **not** talk to the radio. Call [`bring_up`](Self::bring_up) next
    /// when the module needs configuring.
    pub fn new(channel: C, lock: L, config: &ControllerConfig) -> Result<Self> {
        config.validate()?;
        let secret = SecretCode::from_bytes(config.default_secret.as_bytes())?;
        Ok(Self {
            channel,
            lock,
            secret,
            radio: RadioOptions::from(config),
            state: ControllerState::Serving,
            radio_config: None,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Configure the RF module over the controller's channel.
    ///
    /// Any failure moves the controller to [`ControllerState::Halted`].
    pub fn bring_up(
        &mut self,
        config_line: impl OutputPin,
        sink: &mut impl EventSink,
    ) -> core::result::Result<RfConfig, HaltReason> {
        if let ControllerState::Halted(reason) = self.state {
            return Err(reason);
        }

        let outcome = RfModule::new(&mut self.channel, config_line, self.radio).bring_up();
        match outcome {
            Ok(report) => {
                if let Some(e) = report.power_rejected {
                    sink.emit(&AccessEvent::PowerRejected(e));
                }
                self.radio_config = Some(report.config);
                sink.emit(&AccessEvent::RadioReady(report.config));
                info!("controller: ready");
                Ok(report.config)
            }
            Err(e) => Err(self.halt(e, sink)),
        }
    }

    // ── Dispatch ──────────────────────────────────────────────

    /// Service at most one opcode.
    ///
    /// Returns `Ok(None)` when nothing was readable or the controller is
    /// halted.  Unknown bytes yield [`AccessEvent::Ignored`] with no reply.
    pub fn poll(&mut self, sink: &mut impl EventSink) -> Result<Option<AccessEvent>> {
        if self.is_halted() || !self.channel.is_readable() {
            return Ok(None);
        }

        let byte = self.channel.read_byte()?;
        let event = match Opcode::from_byte(byte) {
            Some(Opcode::Unlock) => self.handle_unlock_attempt()?,
            Some(Opcode::Ping) => self.handle_ping()?,
            Some(Opcode::SetSecret) => self.handle_set_secret()?,
            None => AccessEvent::Ignored(byte),
        };
        sink.emit(&event);
        Ok(Some(event))
    }

    /// The steady-state loop.  Polls forever while serving.
    ///
    /// Returns `Ok(reason)` immediately if the controller is already
    /// halted.  A channel or actuator failure halts the controller and is
    /// returned as `Err`: a UART that stopped working or a relay that may
    /// still be energised leaves nothing safe to dispatch.
    pub fn run(&mut self, sink: &mut impl EventSink) -> Result<HaltReason> {
        loop {
            if let ControllerState::Halted(reason) = self.state {
                return Ok(reason);
            }
            if let Err(e) = self.poll(sink) {
                self.halt(e, sink);
                return Err(e);
            }
        }
    }

    // ── Handlers ──────────────────────────────────────────────

    /// `0xBB <code> 0x00`: accept and pulse the lock, or reject.
    pub fn handle_unlock_attempt(&mut self) -> Result<AccessEvent> {
        match self.read_code(UNLOCK_TERMINATOR)? {
            Inbound::Complete(code) if self.secret.matches(code.as_bytes()) => {
                self.reply(REPLY_ACCEPT)?;
                self.lock.pulse_unlock()?;
                Ok(AccessEvent::Unlocked)
            }
            Inbound::Complete(_) => {
                info!("controller: bad code");
                self.reply(REPLY_REJECT)?;
                Ok(AccessEvent::Rejected)
            }
            Inbound::Overflow { discarded } => {
                warn!("controller: unlock code overflow ({} bytes), rejecting", discarded);
                self.reply(REPLY_REJECT)?;
                Ok(AccessEvent::InputOverflow {
                    opcode: Opcode::Unlock,
                    discarded,
                })
            }
        }
    }

    /// `0xDD`: answer with a single `0xDD`.
    pub fn handle_ping(&mut self) -> Result<AccessEvent> {
        self.reply(REPLY_PONG)?;
        Ok(AccessEvent::Pong)
    }

    /// `0xFF <code> \n`: replace the secret and acknowledge, or NAK on
    /// overflow.
    ///
    /// The code is stored as a C string: an empty code is a valid secret,
    /// and bytes from the first NUL onwards are dropped, since an unlock
    /// frame ends at that NUL.
    pub fn handle_set_secret(&mut self) -> Result<AccessEvent> {
        let mut code = match self.read_code(SECRET_TERMINATOR)? {
            Inbound::Complete(code) => code,
            Inbound::Overflow { discarded } => {
                warn!("controller: secret overflow ({} bytes), keeping old secret", discarded);
                self.reply(REPLY_NAK)?;
                return Ok(AccessEvent::InputOverflow {
                    opcode: Opcode::SetSecret,
                    discarded,
                });
            }
        };

        code.truncate_at(UNLOCK_TERMINATOR);
        self.secret.replace_with(&code);
        self.reply(REPLY_ACK)?;
        Ok(AccessEvent::SecretUpdated { len: code.len() })
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn is_halted(&self) -> bool {
        matches!(self.state, ControllerState::Halted(_))
    }

    pub fn lock_state(&self) -> LockState {
        self.lock.state()
    }

    /// Configuration read back during bring-up, if it ran.
    pub fn radio_config(&self) -> Option<RfConfig> {
        self.radio_config
    }

    pub fn secret_len(&self) -> usize {
        self.secret.len()
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    pub fn lock(&self) -> &L {
        &self.lock
    }

    // ── Internal ──────────────────────────────────────────────

    /// Read bytes until `terminator`.  Bytes past capacity are consumed and
    /// dropped so the next opcode is read from a frame boundary.
    fn read_code(&mut self, terminator: u8) -> Result<Inbound> {
        let mut buf = InboundBuffer::new();
        let mut overflowed = false;
        let mut read = 0usize;

        loop {
            let byte = self.channel.read_byte()?;
            if byte == terminator {
                break;
            }
            read += 1;
            if !overflowed && buf.push(byte).is_err() {
                overflowed = true;
            }
        }

        if overflowed {
            Ok(Inbound::Overflow { discarded: read })
        } else {
            Ok(Inbound::Complete(buf))
        }
    }

    /// Enter the terminal state and report it.
    fn halt(&mut self, e: Error, sink: &mut impl EventSink) -> HaltReason {
        let reason = HaltReason(e);
        error!("controller: {}, halting", reason);
        self.state = ControllerState::Halted(reason);
        sink.emit(&AccessEvent::Halted(reason));
        reason
    }

    fn reply(&mut self, byte: u8) -> Result<()> {
        while !self.channel.is_writable() {}
        self.channel.write_byte(byte)?;
        Ok(())
    }
}

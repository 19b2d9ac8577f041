//! Mock hardware adapters for integration tests.
//!
//! Records every channel byte, pin edge, and delay so tests can assert on
//! the full history without touching a real UART or GPIO.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};
use rflock::app::events::AccessEvent;
use rflock::app::ports::{ByteChannel, EventSink};
use rflock::app::service::AccessController;
use rflock::config::ControllerConfig;
use rflock::drivers::lock::LockActuator;
use rflock::error::ChannelError;
use rflock::protocol::{ACK_OK, RfConfig};

// ── ScriptedChannel ───────────────────────────────────────────

/// Byte channel fed from a script.  `read_byte` on an empty script returns
/// `TimedOut` instead of blocking, so a stalled exchange ends the test.
#[derive(Default)]
pub struct ScriptedChannel {
    pub inbound: VecDeque<u8>,
    pub outbound: Vec<u8>,
    pub reads: usize,
}

impl ScriptedChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_inbound(bytes: &[u8]) -> Self {
        let mut ch = Self::new();
        ch.feed(bytes);
        ch
    }

    pub fn feed(&mut self, bytes: &[u8]) {
        self.inbound.extend(bytes.iter().copied());
    }

    /// Drain and return everything written so far.
    pub fn take_outbound(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.outbound)
    }
}

impl ByteChannel for ScriptedChannel {
    fn is_readable(&mut self) -> bool {
        !self.inbound.is_empty()
    }

    fn is_writable(&mut self) -> bool {
        true
    }

    fn read_byte(&mut self) -> Result<u8, ChannelError> {
        self.reads += 1;
        self.inbound.pop_front().ok_or(ChannelError::TimedOut)
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), ChannelError> {
        self.outbound.push(byte);
        Ok(())
    }
}

// ── Pins and delay sharing one timeline ──────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwEvent {
    High(&'static str),
    Low(&'static str),
    DelayNs(u64),
}

pub type Timeline = Rc<RefCell<Vec<HwEvent>>>;

pub fn timeline() -> Timeline {
    Rc::new(RefCell::new(Vec::new()))
}

pub struct MockPin {
    name: &'static str,
    timeline: Timeline,
}

impl MockPin {
    pub fn new(name: &'static str, timeline: &Timeline) -> Self {
        Self {
            name,
            timeline: Rc::clone(timeline),
        }
    }
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.timeline.borrow_mut().push(HwEvent::Low(self.name));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.timeline.borrow_mut().push(HwEvent::High(self.name));
        Ok(())
    }
}

/// Pin whose every write fails.
pub struct BrokenPin;

impl ErrorType for BrokenPin {
    type Error = ErrorKind;
}

impl OutputPin for BrokenPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }
}

/// Delay that records requested durations instead of sleeping.
pub struct MockDelay {
    timeline: Timeline,
}

impl MockDelay {
    pub fn new(timeline: &Timeline) -> Self {
        Self {
            timeline: Rc::clone(timeline),
        }
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.timeline.borrow_mut().push(HwEvent::DelayNs(u64::from(ns)));
    }

    fn delay_us(&mut self, us: u32) {
        self.timeline.borrow_mut().push(HwEvent::DelayNs(u64::from(us) * 1_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.timeline.borrow_mut().push(HwEvent::DelayNs(u64::from(ms) * 1_000_000));
    }
}

// ── RecordingSink ────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AccessEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AccessEvent) {
        self.events.push(event.clone());
    }
}

// ── Fixtures ─────────────────────────────────────────────────

pub type TestController = AccessController<ScriptedChannel, LockActuator<MockPin, MockDelay>>;

/// A serving controller with default config (secret "UNLOCK", 5 s hold)
/// and an empty inbound script.
pub fn controller() -> (TestController, Timeline) {
    controller_with(&ControllerConfig::default())
}

pub fn controller_with(config: &ControllerConfig) -> (TestController, Timeline) {
    let tl = timeline();
    let lock = LockActuator::new(MockPin::new("lock", &tl), MockDelay::new(&tl), config.unlock_hold_ms)
        .expect("mock pin never fails");
    tl.borrow_mut().clear();
    let ctl = AccessController::new(ScriptedChannel::new(), lock, config).expect("valid config");
    (ctl, tl)
}

/// Poll until the inbound script is exhausted, returning every event.
pub fn drain(ctl: &mut TestController, sink: &mut RecordingSink) -> Vec<AccessEvent> {
    let mut out = Vec::new();
    while let Some(event) = ctl.poll(sink).expect("poll failed") {
        out.push(event);
    }
    out
}

/// Number of times the lock relay was energised.
pub fn lock_pulses(tl: &Timeline) -> usize {
    tl.borrow().iter().filter(|e| **e == HwEvent::High("lock")).count()
}

/// The module configuration the scripted radio reports.
pub fn module_config() -> RfConfig {
    RfConfig {
        frequency: 433_000_000,
        data_rate: 9_600,
        bandwidth: 300,
        deviation: 50,
        tx_power: 7,
        baud_rate: 9_600,
    }
}

/// Replies a healthy module sends for reset, set-power, get-config.
pub fn healthy_radio_replies() -> Vec<u8> {
    let mut replies = Vec::new();
    replies.extend_from_slice(&ACK_OK);
    replies.extend_from_slice(&ACK_OK);
    replies.extend_from_slice(&module_config().to_bytes());
    replies
}

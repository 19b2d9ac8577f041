//! Integration tests for the lock relay and status LED drivers.

use crate::mock_hw::{
    BrokenPin, HwEvent, MockDelay, MockPin, RecordingSink, controller_with, drain, timeline,
};

use rflock::app::events::AccessEvent;
use rflock::app::ports::LockPort;
use rflock::app::service::HaltReason;
use rflock::config::ControllerConfig;
use rflock::drivers::lock::{LockActuator, LockState};
use rflock::drivers::status_led::StatusLed;
use rflock::error::{ActuatorError, Error};

#[test]
fn new_actuator_drives_relay_low() {
    let tl = timeline();
    let lock = LockActuator::new(MockPin::new("lock", &tl), MockDelay::new(&tl), 100).unwrap();

    assert_eq!(*tl.borrow(), vec![HwEvent::Low("lock")]);
    assert_eq!(lock.state(), LockState::Released);
    assert_eq!(lock.hold_ms(), 100);
}

#[test]
fn pulse_is_high_hold_low() {
    let tl = timeline();
    let mut lock = LockActuator::new(MockPin::new("lock", &tl), MockDelay::new(&tl), 5_000).unwrap();
    tl.borrow_mut().clear();

    lock.pulse_unlock().unwrap();

    assert_eq!(
        *tl.borrow(),
        vec![
            HwEvent::High("lock"),
            HwEvent::DelayNs(5_000_000_000),
            HwEvent::Low("lock"),
        ]
    );
    assert_eq!(lock.state(), LockState::Released);
}

#[test]
fn unlock_through_controller_uses_configured_hold() {
    let config = ControllerConfig {
        unlock_hold_ms: 250,
        ..ControllerConfig::default()
    };
    let (mut ctl, tl) = controller_with(&config);
    ctl.channel_mut().feed(b"\xBBUNLOCK\0");

    drain(&mut ctl, &mut RecordingSink::new());

    assert_eq!(
        *tl.borrow(),
        vec![
            HwEvent::High("lock"),
            HwEvent::DelayNs(250_000_000),
            HwEvent::Low("lock"),
        ]
    );
}

#[test]
fn unlock_replies_once_and_releases() {
    let (mut ctl, _tl) = controller_with(&ControllerConfig::default());
    ctl.channel_mut().feed(b"\xBBUNLOCK\0");

    drain(&mut ctl, &mut RecordingSink::new());

    assert_eq!(ctl.channel_mut().take_outbound(), vec![0xDD]);
    assert_eq!(ctl.lock().state(), LockState::Released);
}

#[test]
fn broken_relay_pin_fails_construction() {
    let tl = timeline();
    let res = LockActuator::new(BrokenPin, MockDelay::new(&tl), 100);

    assert!(matches!(res, Err(ActuatorError::ReleaseFailed)));
}

/// Pin that works once (the initial drive low) and then fails.
struct FailsAfterFirst {
    writes: usize,
}

impl embedded_hal::digital::ErrorType for FailsAfterFirst {
    type Error = embedded_hal::digital::ErrorKind;
}

impl embedded_hal::digital::OutputPin for FailsAfterFirst {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.writes += 1;
        if self.writes > 1 {
            Err(embedded_hal::digital::ErrorKind::Other)
        } else {
            Ok(())
        }
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Err(embedded_hal::digital::ErrorKind::Other)
    }
}

#[test]
fn failed_assert_leaves_lock_released() {
    let tl = timeline();
    let mut lock = LockActuator::new(FailsAfterFirst { writes: 0 }, MockDelay::new(&tl), 100).unwrap();

    assert_eq!(lock.pulse_unlock(), Err(ActuatorError::AssertFailed));
    assert_eq!(lock.state(), LockState::Released);
    assert!(tl.borrow().is_empty(), "no hold when the relay never energised");
}

#[test]
fn actuator_failure_surfaces_from_poll() {
    let tl = timeline();
    let lock = LockActuator::new(FailsAfterFirst { writes: 0 }, MockDelay::new(&tl), 100).unwrap();
    let mut ctl = rflock::app::service::AccessController::new(
        crate::mock_hw::ScriptedChannel::with_inbound(b"\xBBUNLOCK\0"),
        lock,
        &ControllerConfig::default(),
    )
    .unwrap();

    let res = ctl.poll(&mut RecordingSink::new());

    assert_eq!(res, Err(Error::Actuator(ActuatorError::AssertFailed)));
    assert_eq!(ctl.channel_mut().take_outbound(), vec![0xDD]);
}

#[test]
fn relay_fault_in_run_halts_controller() {
    let tl = timeline();
    let lock = LockActuator::new(FailsAfterFirst { writes: 0 }, MockDelay::new(&tl), 100).unwrap();
    let mut ctl = rflock::app::service::AccessController::new(
        crate::mock_hw::ScriptedChannel::with_inbound(b"\xBBUNLOCK\0\xDD"),
        lock,
        &ControllerConfig::default(),
    )
    .unwrap();
    let mut sink = RecordingSink::new();

    let fault = Error::Actuator(ActuatorError::AssertFailed);
    assert_eq!(ctl.run(&mut sink), Err(fault));

    assert!(ctl.is_halted());
    assert_eq!(sink.events, vec![AccessEvent::Halted(HaltReason(fault))]);
    // The trailing ping is never answered.
    assert_eq!(ctl.channel_mut().take_outbound(), vec![0xDD]);
    assert_eq!(ctl.channel().inbound.len(), 1);
}

// ── Status LED ───────────────────────────────────────────────

#[test]
fn led_blink_is_on_wait_off_wait() {
    let tl = timeline();
    let mut led = StatusLed::new(MockPin::new("led", &tl));
    let mut delay = MockDelay::new(&tl);

    led.blink(&mut delay, 250);

    assert_eq!(
        *tl.borrow(),
        vec![
            HwEvent::High("led"),
            HwEvent::DelayNs(250_000_000),
            HwEvent::Low("led"),
            HwEvent::DelayNs(250_000_000),
        ]
    );
    assert!(!led.is_lit());
}

#[test]
fn led_set_tracks_state() {
    let tl = timeline();
    let mut led = StatusLed::new(MockPin::new("led", &tl));

    led.set(true);
    assert!(led.is_lit());
    led.off();
    assert!(!led.is_lit());
    assert_eq!(*tl.borrow(), vec![HwEvent::High("led"), HwEvent::Low("led")]);
}

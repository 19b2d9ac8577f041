//! RfLock firmware entry point
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  UartChannel      LockActuator     LogEventSink          │
//! │  (ByteChannel)    (LockPort)       (EventSink)           │
//! │                                                          │
//! │  ───────────── Port Trait Boundary ─────────────         │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │        AccessController (pure logic)           │      │
//! │  │  RF bring-up · opcode dispatch · secret        │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::{error, info};

use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{AnyIOPin, PinDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::uart::{UartDriver, config::Config as UartConfig};
use esp_idf_hal::units::Hertz;

use rflock::adapters::log_sink::LogEventSink;
use rflock::adapters::uart::UartChannel;
use rflock::app::service::AccessController;
use rflock::config::ControllerConfig;
use rflock::drivers::lock::LockActuator;
use rflock::drivers::status_led::StatusLed;
use rflock::error::Error;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("RfLock v{}", env!("CARGO_PKG_VERSION"));

    let config = ControllerConfig::default();
    config.validate()?;

    // ── 2. Peripherals ────────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let pins = peripherals.pins;

    // Radio module on UART1: TX=GPIO17, RX=GPIO18.
    let uart = UartDriver::new(
        peripherals.uart1,
        pins.gpio17,
        pins.gpio18,
        Option::<AnyIOPin>::None,
        Option::<AnyIOPin>::None,
        &UartConfig::default().baudrate(Hertz(config.radio_baud)),
    )?;

    // Config/operate line; polarity comes from config.
    let mut config_line = PinDriver::output(pins.gpio4)?;
    // Lock relay, active high.
    let lock_pin = PinDriver::output(pins.gpio5)?;
    let mut led = StatusLed::new(PinDriver::output(pins.gpio2)?);
    led.off();

    let lock = LockActuator::new(lock_pin, FreeRtos, config.unlock_hold_ms).map_err(Error::from)?;

    // ── 3. Controller ─────────────────────────────────────────
    let mut controller = AccessController::new(UartChannel::new(uart), lock, &config)?;
    let mut sink = LogEventSink::new();

    info!("Setting up radio...");
    if controller.bring_up(&mut config_line, &mut sink).is_ok() {
        info!("Ready.");
    }

    // ── 4. Dispatch until halted ──────────────────────────────
    // Both arms leave the controller halted; the reason is already logged.
    if let Err(e) = controller.run(&mut sink) {
        error!("Dispatch stopped: {}", e);
    }
    led.halt(&mut FreeRtos, config.halt_blink_ms)
}

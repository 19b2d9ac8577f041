//! Peripheral drivers: RF module, lock relay, status LED.

pub mod lock;
pub mod rf_module;
pub mod status_led;

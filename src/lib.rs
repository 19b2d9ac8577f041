//! RfLock firmware library.
//!
//! Exposes the pure-logic modules for integration testing.  The only
//! ESP-IDF-specific module is [`adapters::uart`], compiled for the
//! `espidf` target only.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod protocol;

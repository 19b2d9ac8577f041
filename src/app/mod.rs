//! Application core: pure domain logic, no direct I/O.
//!
//! This module contains the access-control rules: opcode dispatch, secret
//! handling, and the controller lifecycle.  All interaction with hardware
//! happens through **port traits** defined in [`ports`], keeping this layer
//! fully testable without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod secret;
pub mod service;

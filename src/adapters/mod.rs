//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements   | Connects to             |
//! |------------|--------------|-------------------------|
//! | `log_sink` | EventSink    | Serial log output       |
//! | `uart`     | ByteChannel  | ESP32 UART (radio link) |

pub mod log_sink;
#[cfg(all(feature = "espidf", target_os = "espidf"))]
pub mod uart;

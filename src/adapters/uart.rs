//! UART byte-channel adapter (ESP-IDF only).
//!
//! Wraps an `esp-idf-hal` [`UartDriver`] behind [`ByteChannel`].  Reads and
//! writes block with `BLOCK` timeouts, matching the controller's
//! no-timeout polling model.

use esp_idf_hal::delay::BLOCK;
use esp_idf_hal::uart::UartDriver;

use crate::app::ports::ByteChannel;
use crate::error::ChannelError;

pub struct UartChannel<'d> {
    uart: UartDriver<'d>,
}

impl<'d> UartChannel<'d> {
    pub fn new(uart: UartDriver<'d>) -> Self {
        Self { uart }
    }
}

impl ByteChannel for UartChannel<'_> {
    fn is_readable(&mut self) -> bool {
        self.uart.remaining_read().is_ok_and(|n| n > 0)
    }

    fn is_writable(&mut self) -> bool {
        self.uart.remaining_write().is_ok_and(|n| n > 0)
    }

    fn read_byte(&mut self) -> Result<u8, ChannelError> {
        let mut byte = [0u8; 1];
        loop {
            match self.uart.read(&mut byte, BLOCK) {
                Ok(1) => return Ok(byte[0]),
                Ok(_) => continue,
                Err(_) => return Err(ChannelError::ReadFailed),
            }
        }
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), ChannelError> {
        loop {
            match self.uart.write(&[byte]) {
                Ok(1) => return Ok(()),
                Ok(_) => continue,
                Err(_) => return Err(ChannelError::WriteFailed),
            }
        }
    }
}

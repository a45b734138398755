//! Text outputs over a serial transmitter
//!
//! The debug sink writes plain CR LF terminated lines. The status display
//! renders on a VT100 terminal, one terminal row per display row.

use bodyctl_hal::UartTx;

use super::text::format_line;
use super::{DebugSink, StatusDisplay, TextError};

/// Rows available on the serial status display
pub const DISPLAY_ROWS: u8 = 2;

/// Text output over a UART transmitter
pub struct SerialText<U> {
    uart: U,
}

impl<U: UartTx> SerialText<U> {
    /// Wrap a transmitter
    pub fn new(uart: U) -> Self {
        Self { uart }
    }

    /// Get the wrapped transmitter
    pub fn inner(&self) -> &U {
        &self.uart
    }
}

impl<U: UartTx> DebugSink for SerialText<U> {
    fn write_line(&mut self, text: &str) -> Result<(), TextError> {
        self.uart.write_line(text).map_err(|_| TextError::Link)
    }
}

impl<U: UartTx> StatusDisplay for SerialText<U> {
    fn write_line(&mut self, row: u8, text: &str) -> Result<(), TextError> {
        if row >= DISPLAY_ROWS {
            return Err(TextError::InvalidRow);
        }
        // Cursor to column 1 of the row, then clear the rest of it
        let line = format_line(format_args!("\x1b[{};1H{}\x1b[K", row + 1, text))?;
        self.uart
            .write_blocking(line.as_bytes())
            .map_err(|_| TextError::Link)
    }
}

//! UART serial communication abstractions
//!
//! Only the transmit half is needed: debug and status text go out, nothing
//! comes back.

/// UART transmitter
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// Write data to the UART
    ///
    /// Blocks until all data has been written or an error occurs.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Flush any buffered data
    fn flush(&mut self) -> Result<(), Self::Error>;

    /// Write a line of text terminated by CR LF
    fn write_line(&mut self, text: &str) -> Result<(), Self::Error> {
        self.write_blocking(text.as_bytes())?;
        self.write_blocking(b"\r\n")
    }
}

/// UART configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self { baudrate: 115200 }
    }
}

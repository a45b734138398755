//! Blocking UART transmitter
//!
//! RP2040 has two UART peripherals; each module uses the TX half of UART0
//! for its text output.

use embassy_rp::uart::{Blocking, Error, UartTx};

/// Transmit half of an RP2040 UART
pub struct RpUartTx {
    tx: UartTx<'static, Blocking>,
}

impl RpUartTx {
    pub fn new(tx: UartTx<'static, Blocking>) -> Self {
        Self { tx }
    }
}

impl bodyctl_hal::UartTx for RpUartTx {
    type Error = Error;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Error> {
        self.tx.blocking_write(data)
    }

    fn flush(&mut self) -> Result<(), Error> {
        self.tx.blocking_flush()
    }
}

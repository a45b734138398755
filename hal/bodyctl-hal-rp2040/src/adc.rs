//! ADC channel management
//!
//! RP2040 has a single 12-bit ADC multiplexed over:
//! - ADC0: GPIO26
//! - ADC1: GPIO27
//! - ADC2: GPIO28
//! - ADC3: GPIO29
//!
//! Each dial or sensor gets its own [`RpAnalogIn`], all borrowing the one
//! converter through a `RefCell`.

use core::cell::RefCell;

use bodyctl_hal::adc::{claim, normalize};
use bodyctl_hal::{AnalogError, AnalogInput};
use embassy_rp::adc::{Adc, Blocking, Channel};

/// Largest raw count of the 12-bit converter
pub const ADC_FULL_SCALE: u16 = 4095;

/// Converter shared by every channel of a module
pub type SharedAdc = RefCell<Adc<'static, Blocking>>;

/// One ADC input channel
pub struct RpAnalogIn<'a> {
    adc: &'a SharedAdc,
    channel: Channel<'static>,
}

impl<'a> RpAnalogIn<'a> {
    pub fn new(adc: &'a SharedAdc, channel: Channel<'static>) -> Self {
        Self { adc, channel }
    }
}

impl AnalogInput for RpAnalogIn<'_> {
    fn read_normalized(&mut self) -> Result<f32, AnalogError> {
        let mut adc = claim(self.adc)?;
        let raw = adc
            .blocking_read(&mut self.channel)
            .map_err(|_| AnalogError::Conversion)?;
        Ok(normalize(raw, ADC_FULL_SCALE))
    }
}

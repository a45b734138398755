//! Analog input abstractions
//!
//! Dial and light-sensor readings are consumed as a ratio of full scale,
//! so the control logic never sees ADC resolution.

use core::cell::{RefCell, RefMut};

/// Errors that can occur during an analog conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnalogError {
    /// Conversion did not complete
    Conversion,
    /// Shared converter is in use by another channel
    Busy,
}

/// Analog input channel
pub trait AnalogInput {
    /// Read the channel as a fraction of full scale in `[0.0, 1.0]`
    ///
    /// Takes `&mut self` because ADC reads typically require mutable access.
    fn read_normalized(&mut self) -> Result<f32, AnalogError>;
}

/// Claim a converter shared between channels
///
/// Fails with [`AnalogError::Busy`] instead of panicking when another
/// channel still holds it.
pub fn claim<T>(converter: &RefCell<T>) -> Result<RefMut<'_, T>, AnalogError> {
    converter.try_borrow_mut().map_err(|_| AnalogError::Busy)
}

/// Convert a raw ADC count to a ratio of full scale
///
/// `full_scale` is the largest count the converter returns (4095 for
/// a 12-bit ADC). Counts above it clamp to 1.0.
pub fn normalize(raw: u16, full_scale: u16) -> f32 {
    if full_scale == 0 {
        return 0.0;
    }
    let ratio = raw as f32 / full_scale as f32;
    if ratio > 1.0 {
        1.0
    } else {
        ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_range() {
        assert_eq!(normalize(0, 4095), 0.0);
        assert_eq!(normalize(4095, 4095), 1.0);
        assert!((normalize(2048, 4095) - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_claim_reports_busy_converter() {
        let converter = RefCell::new(0u16);
        let held = claim(&converter).unwrap();
        assert_eq!(claim(&converter).err(), Some(AnalogError::Busy));

        drop(held);
        assert!(claim(&converter).is_ok());
    }

    #[test]
    fn test_normalize_clamps() {
        assert_eq!(normalize(5000, 4095), 1.0);
        assert_eq!(normalize(100, 0), 0.0);
    }
}

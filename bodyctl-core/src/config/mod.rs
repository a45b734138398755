//! Configuration types
//!
//! Board-agnostic tuning for both modules. Defaults carry the calibrated
//! values for the reference hardware; firmware builds may override them
//! from `body.toml`.

pub mod types;

pub use types::*;

/// Errors found while validating a configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Tick period must be non-zero
    ZeroTick,
    /// Debounce threshold shorter than one tick
    DebounceTooShort,
    /// A pair of thresholds is out of order
    ThresholdOrder,
    /// A threshold lies outside `[0.0, 1.0]`
    ThresholdRange,
    /// Duty bounds are out of order or outside `[0.0, 1.0]`
    DutyBounds,
    /// Ramp step is zero or larger than the duty span
    RampStep,
    /// Ramp time shorter than one gate period
    RampTime,
    /// Interval pause does not leave room for a full sweep
    IntervalPause,
    /// PWM period must be non-zero
    ZeroPwmPeriod,
}

/// Check that a threshold is a finite ratio of full scale
pub(crate) fn check_ratio(value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ThresholdRange)
    }
}

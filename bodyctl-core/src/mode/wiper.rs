//! Wiper mode and interval selection from the raw dials
//!
//! The wiper dials are sampled unaveraged each tick.

use crate::config::WiperConfig;

/// Wiper operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WiperMode {
    /// Parked
    #[default]
    Off,
    /// Continuous slow sweeps
    Low,
    /// Continuous fast sweeps
    High,
    /// One slow sweep per interval
    Interval,
    /// Speed dial could not be classified; servo is left alone
    Fault,
}

impl WiperMode {
    /// Label used on the status display
    pub fn as_str(self) -> &'static str {
        match self {
            WiperMode::Off => "OFF",
            WiperMode::Low => "LOW",
            WiperMode::High => "HIGH",
            WiperMode::Interval => "INT",
            WiperMode::Fault => "FAULT",
        }
    }

    /// Get the mode as a byte code
    pub fn as_u8(self) -> u8 {
        match self {
            WiperMode::Off => 0,
            WiperMode::Low => 1,
            WiperMode::High => 2,
            WiperMode::Interval => 3,
            WiperMode::Fault => 0xFF,
        }
    }

    /// Create a mode from a byte code
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(WiperMode::Off),
            1 => Some(WiperMode::Low),
            2 => Some(WiperMode::High),
            3 => Some(WiperMode::Interval),
            0xFF => Some(WiperMode::Fault),
            _ => None,
        }
    }
}

/// Pause length selection for Interval mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IntervalSetting {
    #[default]
    Short,
    Medium,
    Long,
}

impl IntervalSetting {
    /// Label used on the status display
    pub fn as_str(self) -> &'static str {
        match self {
            IntervalSetting::Short => "SHORT",
            IntervalSetting::Medium => "MEDIUM",
            IntervalSetting::Long => "LONG",
        }
    }

    /// Full interval cycle length (ms), measured from the start of the sweep
    pub fn pause_ms(self, config: &WiperConfig) -> u32 {
        match self {
            IntervalSetting::Short => config.pause_short_ms,
            IntervalSetting::Medium => config.pause_medium_ms,
            IntervalSetting::Long => config.pause_long_ms,
        }
    }
}

/// Select the wiper mode from the speed dial
///
/// Forced to [`WiperMode::Off`] while the engine is off. A non-finite
/// reading selects [`WiperMode::Fault`].
pub fn arbitrate_wiper_mode(speed: f32, engine_on: bool, config: &WiperConfig) -> WiperMode {
    if !engine_on {
        WiperMode::Off
    } else if !speed.is_finite() {
        WiperMode::Fault
    } else if speed <= config.speed_off_max {
        WiperMode::Off
    } else if speed <= config.speed_low_max {
        WiperMode::Low
    } else if speed <= config.speed_interval_max {
        WiperMode::Interval
    } else {
        WiperMode::High
    }
}

/// Select the interval setting from the interval dial
///
/// Returns `None` for readings that no branch claims (above the Long
/// threshold or non-finite); the caller keeps its previous setting.
pub fn arbitrate_interval(dial: f32, config: &WiperConfig) -> Option<IntervalSetting> {
    if dial <= config.interval_short_max {
        Some(IntervalSetting::Short)
    } else if dial <= config.interval_medium_max {
        Some(IntervalSetting::Medium)
    } else if dial <= config.interval_long_max {
        Some(IntervalSetting::Long)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn speed(value: f32) -> WiperMode {
        arbitrate_wiper_mode(value, true, &WiperConfig::default())
    }

    fn interval(value: f32) -> Option<IntervalSetting> {
        arbitrate_interval(value, &WiperConfig::default())
    }

    #[test]
    fn test_speed_thresholds() {
        assert_eq!(speed(0.0), WiperMode::Off);
        assert_eq!(speed(0.25), WiperMode::Off);
        assert_eq!(speed(0.4), WiperMode::Low);
        assert_eq!(speed(0.5), WiperMode::Low);
        assert_eq!(speed(0.6), WiperMode::Interval);
        assert_eq!(speed(0.75), WiperMode::Interval);
        assert_eq!(speed(0.8), WiperMode::High);
        assert_eq!(speed(1.0), WiperMode::High);
    }

    #[test]
    fn test_engine_off_forces_off() {
        let config = WiperConfig::default();
        assert_eq!(arbitrate_wiper_mode(0.9, false, &config), WiperMode::Off);
        assert_eq!(arbitrate_wiper_mode(f32::NAN, false, &config), WiperMode::Off);
    }

    #[test]
    fn test_unreadable_speed_is_fault() {
        assert_eq!(speed(f32::NAN), WiperMode::Fault);
    }

    #[test]
    fn test_interval_thresholds() {
        assert_eq!(interval(0.2), Some(IntervalSetting::Short));
        assert_eq!(interval(0.33), Some(IntervalSetting::Short));
        assert_eq!(interval(0.5), Some(IntervalSetting::Medium));
        assert_eq!(interval(0.66), Some(IntervalSetting::Medium));
        assert_eq!(interval(0.9), Some(IntervalSetting::Long));
        assert_eq!(interval(1.0), Some(IntervalSetting::Long));
    }

    #[test]
    fn test_interval_out_of_range_keeps_previous() {
        assert_eq!(interval(1.2), None);
        assert_eq!(interval(f32::NAN), None);
    }

    #[test]
    fn test_pause_lengths() {
        let config = WiperConfig::default();
        assert_eq!(IntervalSetting::Short.pause_ms(&config), 3000);
        assert_eq!(IntervalSetting::Medium.pause_ms(&config), 6000);
        assert_eq!(IntervalSetting::Long.pause_ms(&config), 8000);
    }

    #[test]
    fn test_codes() {
        for m in [
            WiperMode::Off,
            WiperMode::Low,
            WiperMode::High,
            WiperMode::Interval,
            WiperMode::Fault,
        ] {
            assert_eq!(WiperMode::from_u8(m.as_u8()), Some(m));
        }
        assert_eq!(WiperMode::from_u8(9), None);
    }

    proptest! {
        #[test]
        fn prop_speed_is_monotonic(a in 0.0f32..=1.0, b in 0.0f32..=1.0) {
            // Off < Low < Interval < High in dial order
            let rank = |m: WiperMode| match m {
                WiperMode::Off => 0,
                WiperMode::Low => 1,
                WiperMode::Interval => 2,
                WiperMode::High => 3,
                WiperMode::Fault => 4,
            };
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(rank(speed(lo)) <= rank(speed(hi)));
        }

        #[test]
        fn prop_interval_in_range_always_selects(dial in 0.0f32..=1.0) {
            prop_assert!(interval(dial).is_some());
        }
    }
}

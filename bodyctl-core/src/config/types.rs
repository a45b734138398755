//! Configuration type definitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{check_ratio, ConfigError};

/// Nominal control loop period in milliseconds
pub const TICK_MS: u32 = 10;

/// Number of samples in each averaging ring
pub const AVERAGE_SAMPLES: usize = 100;

/// Ignition debounce configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DebounceConfig {
    /// Time a level must hold before a transition commits (ms)
    pub threshold_ms: u32,
    /// A low level means "pressed"
    pub active_low: bool,
}

impl DebounceConfig {
    /// Headlight module: pressed reads high, 40 ms
    pub const fn headlight() -> Self {
        Self {
            threshold_ms: 40,
            active_low: false,
        }
    }

    /// Wiper module: pressed reads low, 20 ms
    pub const fn wiper() -> Self {
        Self {
            threshold_ms: 20,
            active_low: true,
        }
    }

    /// Interpret a raw pin level as pressed/released
    pub fn is_pressed(&self, level_high: bool) -> bool {
        level_high != self.active_low
    }

    fn validate(&self, tick_ms: u32) -> Result<(), ConfigError> {
        if self.threshold_ms < tick_ms {
            return Err(ConfigError::DebounceTooShort);
        }
        Ok(())
    }
}

/// Headlight module configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HeadlightConfig {
    /// Loop period (ms)
    pub tick_ms: u32,
    /// Ignition button debounce
    pub debounce: DebounceConfig,
    /// Driver seat sensor reads low when occupied
    pub seat_active_low: bool,
    /// Dial at or below this forces the beams on
    pub lights_on: f32,
    /// Dial at or above this forces the beams off
    pub lights_off: f32,
    /// Light sensor below this counts toward switching on
    pub dusk: f32,
    /// Light sensor above this counts toward switching off
    pub daylight: f32,
    /// Sustained dusk time before the beams switch on (ms)
    pub dusk_delay_ms: u32,
    /// Sustained daylight time before the beams switch off (ms)
    pub daylight_delay_ms: u32,
}

impl Default for HeadlightConfig {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS,
            debounce: DebounceConfig::headlight(),
            seat_active_low: false,
            lights_on: 0.3,
            lights_off: 0.7,
            dusk: 0.5,
            daylight: 0.6,
            dusk_delay_ms: 1000,
            daylight_delay_ms: 2000,
        }
    }
}

impl HeadlightConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        self.debounce.validate(self.tick_ms)?;

        for value in [self.lights_on, self.lights_off, self.dusk, self.daylight] {
            check_ratio(value)?;
        }
        if self.lights_on >= self.lights_off || self.dusk >= self.daylight {
            return Err(ConfigError::ThresholdOrder);
        }

        Ok(())
    }
}

/// Wiper module configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WiperConfig {
    /// Loop period (ms)
    pub tick_ms: u32,
    /// Ignition button debounce
    pub debounce: DebounceConfig,
    /// Driver seat sensor reads low when occupied
    pub seat_active_low: bool,
    /// Speed dial at or below this selects Off
    pub speed_off_max: f32,
    /// Speed dial at or below this selects Low
    pub speed_low_max: f32,
    /// Speed dial at or below this selects Interval, above is High
    pub speed_interval_max: f32,
    /// Interval dial at or below this selects Short
    pub interval_short_max: f32,
    /// Interval dial at or below this selects Medium
    pub interval_medium_max: f32,
    /// Interval dial at or below this selects Long
    pub interval_long_max: f32,
    /// Actuation gate period (ms)
    pub gate_ms: u32,
    /// Servo park position (duty ratio)
    pub duty_min: f32,
    /// Servo full sweep position (duty ratio)
    pub duty_max: f32,
    /// Position step per gated tick in Low and Interval
    pub step_low: f32,
    /// Outbound sweep time in Low and Interval (ms)
    pub ramp_time_low_ms: u32,
    /// Position step per gated tick in High
    pub step_high: f32,
    /// Outbound sweep time in High (ms)
    pub ramp_time_high_ms: u32,
    /// Cycle length for the Short interval (ms)
    pub pause_short_ms: u32,
    /// Cycle length for the Medium interval (ms)
    pub pause_medium_ms: u32,
    /// Cycle length for the Long interval (ms)
    pub pause_long_ms: u32,
    /// Servo PWM period (ms)
    pub pwm_period_ms: u32,
}

impl Default for WiperConfig {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS,
            debounce: DebounceConfig::wiper(),
            seat_active_low: false,
            speed_off_max: 0.25,
            speed_low_max: 0.5,
            speed_interval_max: 0.75,
            interval_short_max: 0.33,
            interval_medium_max: 0.66,
            interval_long_max: 1.0,
            gate_ms: 30,
            duty_min: 0.025,
            duty_max: 0.065,
            step_low: 0.003,
            ramp_time_low_ms: 372,
            step_high: 0.0045,
            ramp_time_high_ms: 252,
            pause_short_ms: 3000,
            pause_medium_ms: 6000,
            pause_long_ms: 8000,
            pwm_period_ms: 20,
        }
    }
}

impl WiperConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 || self.gate_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        if self.pwm_period_ms == 0 {
            return Err(ConfigError::ZeroPwmPeriod);
        }
        self.debounce.validate(self.tick_ms)?;

        for value in [
            self.speed_off_max,
            self.speed_low_max,
            self.speed_interval_max,
            self.interval_short_max,
            self.interval_medium_max,
            self.interval_long_max,
        ] {
            check_ratio(value)?;
        }
        if !(self.speed_off_max < self.speed_low_max
            && self.speed_low_max < self.speed_interval_max)
        {
            return Err(ConfigError::ThresholdOrder);
        }
        if !(self.interval_short_max < self.interval_medium_max
            && self.interval_medium_max < self.interval_long_max)
        {
            return Err(ConfigError::ThresholdOrder);
        }

        if check_ratio(self.duty_min).is_err()
            || check_ratio(self.duty_max).is_err()
            || self.duty_min >= self.duty_max
        {
            return Err(ConfigError::DutyBounds);
        }
        let span = self.duty_max - self.duty_min;
        for step in [self.step_low, self.step_high] {
            if !(step > 0.0 && step <= span) {
                return Err(ConfigError::RampStep);
            }
        }
        if self.ramp_time_low_ms < self.gate_ms || self.ramp_time_high_ms < self.gate_ms {
            return Err(ConfigError::RampTime);
        }

        let sweep_ms = self.ramp_time_low_ms.saturating_mul(2);
        if self.pause_short_ms <= sweep_ms
            || self.pause_medium_ms < self.pause_short_ms
            || self.pause_long_ms < self.pause_medium_ms
        {
            return Err(ConfigError::IntervalPause);
        }

        Ok(())
    }

    /// PWM period in microseconds
    pub fn pwm_period_us(&self) -> u32 {
        self.pwm_period_ms.saturating_mul(1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(HeadlightConfig::default().validate(), Ok(()));
        assert_eq!(WiperConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_debounce_polarity() {
        let headlight = DebounceConfig::headlight();
        assert!(headlight.is_pressed(true));
        assert!(!headlight.is_pressed(false));

        let wiper = DebounceConfig::wiper();
        assert!(wiper.is_pressed(false));
        assert!(!wiper.is_pressed(true));
    }

    #[test]
    fn test_headlight_rejects_bad_values() {
        let mut config = HeadlightConfig::default();
        config.tick_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroTick));

        let mut config = HeadlightConfig::default();
        config.lights_on = 0.8;
        assert_eq!(config.validate(), Err(ConfigError::ThresholdOrder));

        // The hysteresis band must not be empty
        let mut config = HeadlightConfig::default();
        config.dusk = config.daylight;
        assert_eq!(config.validate(), Err(ConfigError::ThresholdOrder));

        let mut config = HeadlightConfig::default();
        config.dusk = f32::NAN;
        assert_eq!(config.validate(), Err(ConfigError::ThresholdRange));

        let mut config = HeadlightConfig::default();
        config.debounce.threshold_ms = 5;
        assert_eq!(config.validate(), Err(ConfigError::DebounceTooShort));
    }

    #[test]
    fn test_unvalidated_extremes_saturate() {
        let mut config = WiperConfig::default();
        config.pwm_period_ms = u32::MAX;
        assert_eq!(config.pwm_period_us(), u32::MAX);

        config.pwm_period_ms = 20;
        config.ramp_time_low_ms = u32::MAX;
        assert_eq!(config.validate(), Err(ConfigError::IntervalPause));
    }

    #[test]
    fn test_wiper_rejects_bad_values() {
        let mut config = WiperConfig::default();
        config.duty_max = 0.01;
        assert_eq!(config.validate(), Err(ConfigError::DutyBounds));

        let mut config = WiperConfig::default();
        config.step_high = 0.5;
        assert_eq!(config.validate(), Err(ConfigError::RampStep));

        let mut config = WiperConfig::default();
        config.pause_short_ms = 700;
        assert_eq!(config.validate(), Err(ConfigError::IntervalPause));

        let mut config = WiperConfig::default();
        config.speed_low_max = 0.9;
        assert_eq!(config.validate(), Err(ConfigError::ThresholdOrder));

        let mut config = WiperConfig::default();
        config.pwm_period_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroPwmPeriod));
    }

    #[test]
    fn test_pwm_period_us() {
        assert_eq!(WiperConfig::default().pwm_period_us(), 20_000);
    }
}

//! Headlight mode selection from the averaged dial

use crate::config::HeadlightConfig;

/// Headlight operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LightMode {
    /// Beams forced on
    On,
    /// Beams follow the light sensor with hysteresis
    Auto,
    /// Beams forced off
    #[default]
    Off,
    /// Dial reading could not be classified; beams show the fault pattern
    Fault,
}

impl LightMode {
    /// Label used in debug output
    pub fn as_str(self) -> &'static str {
        match self {
            LightMode::On => "ON",
            LightMode::Auto => "AUTO",
            LightMode::Off => "OFF",
            LightMode::Fault => "FAULT",
        }
    }

    /// Get the mode as a byte code
    pub fn as_u8(self) -> u8 {
        match self {
            LightMode::On => 0,
            LightMode::Auto => 1,
            LightMode::Off => 2,
            LightMode::Fault => 0xFF,
        }
    }

    /// Create a mode from a byte code
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(LightMode::On),
            1 => Some(LightMode::Auto),
            2 => Some(LightMode::Off),
            0xFF => Some(LightMode::Fault),
            _ => None,
        }
    }
}

/// Select the light mode for an averaged dial reading
///
/// `lights_on` and `lights_off` are inclusive, so 0.3 is On and 0.7 is Off.
/// A non-finite reading selects [`LightMode::Fault`].
pub fn arbitrate_light_mode(dial: f32, config: &HeadlightConfig) -> LightMode {
    if !dial.is_finite() {
        LightMode::Fault
    } else if dial <= config.lights_on {
        LightMode::On
    } else if dial >= config.lights_off {
        LightMode::Off
    } else {
        LightMode::Auto
    }
}

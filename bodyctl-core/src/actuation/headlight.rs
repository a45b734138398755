//! Low-beam driver with daylight/dusk hysteresis
//!
//! On and Off drive the beams every tick. Auto switches them only after the
//! light level has stayed past a threshold for the configured delay:
//!
//! - above `daylight`: count toward off, switch off after `daylight_delay_ms`
//! - below `dusk`: count toward on, switch on after `dusk_delay_ms`
//! - between the two: both counters hold their value
//!
//! Fault drives the asymmetric pattern (left off, right on).

use crate::config::HeadlightConfig;
use crate::mode::LightMode;

/// Low-beam output levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Beams {
    pub left: bool,
    pub right: bool,
}

impl Beams {
    pub const ON: Beams = Beams {
        left: true,
        right: true,
    };
    pub const OFF: Beams = Beams {
        left: false,
        right: false,
    };
    /// Visibly wrong pattern shown for an unrecognized mode
    pub const FAULT: Beams = Beams {
        left: false,
        right: true,
    };
}

/// Beam driver holding the Auto-mode hysteresis timers
#[derive(Debug, Clone)]
pub struct BeamDriver {
    config: HeadlightConfig,
    time_to_off_ms: u32,
    time_to_on_ms: u32,
}

impl BeamDriver {
    /// Create a driver with both timers at zero
    pub fn new(config: HeadlightConfig) -> Self {
        Self {
            config,
            time_to_off_ms: 0,
            time_to_on_ms: 0,
        }
    }

    /// Accumulated daylight time (ms)
    pub fn time_to_off_ms(&self) -> u32 {
        self.time_to_off_ms
    }

    /// Accumulated dusk time (ms)
    pub fn time_to_on_ms(&self) -> u32 {
        self.time_to_on_ms
    }

    /// Compute this tick's beam command
    ///
    /// `light_level` is the averaged light sensor reading; it is only
    /// consumed in Auto mode. Returns `None` when the beams must keep their
    /// current levels.
    pub fn update(&mut self, mode: LightMode, light_level: Option<f32>) -> Option<Beams> {
        match mode {
            LightMode::On => Some(Beams::ON),
            LightMode::Off => Some(Beams::OFF),
            LightMode::Auto => light_level.and_then(|level| self.auto(level)),
            _ => Some(Beams::FAULT),
        }
    }

    fn auto(&mut self, level: f32) -> Option<Beams> {
        let tick = self.config.tick_ms;
        let mut command = None;

        if level > self.config.daylight {
            self.time_to_off_ms = self.time_to_off_ms.saturating_add(tick);
            if self.time_to_off_ms >= self.config.daylight_delay_ms {
                self.time_to_off_ms = 0;
                command = Some(Beams::OFF);
            }
        }

        if level < self.config.dusk {
            self.time_to_on_ms = self.time_to_on_ms.saturating_add(tick);
            if self.time_to_on_ms >= self.config.dusk_delay_ms {
                self.time_to_on_ms = 0;
                command = Some(Beams::ON);
            }
        }

        command
    }
}

//! Engine-on latch
//!
//! The engine state toggles on a debounced ignition release, but only while
//! someone sits in the driver seat.

/// Engine latch transition reported for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EngineTransition {
    /// Latch unchanged
    None,
    /// Engine switched on this tick
    Started,
    /// Engine switched off this tick
    Stopped,
}

/// Engine-on latch, off at power-up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EngineLatch {
    on: bool,
}

impl EngineLatch {
    /// Create a latch with the engine off
    pub const fn new() -> Self {
        Self { on: false }
    }

    /// Whether the engine is on
    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Apply one tick of ignition and seat input
    pub fn update(&mut self, released: bool, seat_occupied: bool) -> EngineTransition {
        if !(released && seat_occupied) {
            return EngineTransition::None;
        }

        self.on = !self.on;
        if self.on {
            EngineTransition::Started
        } else {
            EngineTransition::Stopped
        }
    }
}

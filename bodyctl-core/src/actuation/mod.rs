//! Actuation drivers
//!
//! Turn the active mode into output commands. Both drivers own the timing
//! accumulators that persist between ticks; everything else is recomputed
//! every tick.

pub mod headlight;
pub mod wiper;

pub use headlight::{BeamDriver, Beams};
pub use wiper::{WiperDriver, WiperStep};

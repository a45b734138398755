//! Per-tick control loops
//!
//! Each controller owns its hardware ports and every piece of state that
//! persists between ticks. One call to `tick()` is one loop iteration:
//!
//! ```text
//! debounce → engine latch → arbitrate mode → actuate → text output
//! ```
//!
//! The caller is responsible for waiting one tick period between calls.

pub mod headlight;
pub mod wiper;

pub use headlight::{HeadlightController, HeadlightHardware, HeadlightReport};
pub use wiper::{WiperController, WiperHardware, WiperReport};

use crate::traits::AnalogInput;

/// Read an analog port, rejecting failed or non-finite conversions
///
/// A rejected reading never enters an averaging ring, so a fault lasts only
/// as long as the failing reads.
pub(crate) fn read_finite<A: AnalogInput>(input: &mut A) -> Option<f32> {
    input.read_normalized().ok().filter(|value| value.is_finite())
}

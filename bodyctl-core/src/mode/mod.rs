//! Mode arbitration
//!
//! Maps dial readings to discrete operating modes by threshold comparison.
//! Branch order matters: boundary values belong to the first branch that
//! claims them.

pub mod headlight;
pub mod wiper;

pub use headlight::{arbitrate_light_mode, LightMode};
pub use wiper::{arbitrate_interval, arbitrate_wiper_mode, IntervalSetting, WiperMode};

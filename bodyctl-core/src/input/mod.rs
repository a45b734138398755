//! Input conditioning
//!
//! Turns raw pin levels and ADC readings into clean values for the mode
//! arbiters: a debounced ignition release event and a moving average.

pub mod averager;
pub mod debounce;

pub use averager::SampleRing;
pub use debounce::{DebounceState, Debouncer};

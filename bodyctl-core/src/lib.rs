//! Board-agnostic control core for the body-control modules
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Ignition debounce state machine and engine latch
//! - Analog signal averaging
//! - Mode arbitration for headlights and wipers
//! - Actuation drivers (beam hysteresis, wiper ramp profiles)
//! - The per-tick control loops tying them together
//! - Configuration type definitions
//!
//! All timing is tick-counted: every accumulator advances by the nominal
//! tick period, never by measured wall-clock time.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod actuation;
pub mod config;
pub mod control;
pub mod engine;
pub mod input;
pub mod mode;
pub mod traits;

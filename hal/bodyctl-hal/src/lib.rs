//! Bodyctl Hardware Abstraction Layer
//!
//! This crate defines hardware abstraction traits that can be implemented
//! by chip-specific HALs. The control core only ever talks to these traits,
//! so the same headlight and wiper logic runs on a board or against mock
//! pins in host tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (bodyctl-firmware)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  bodyctl-core (control logic)           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  bodyctl-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ bodyctl-hal-  │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`adc::AnalogInput`] - Normalized analog readings
//! - [`pwm::PwmOutput`] - Duty-ratio PWM output
//! - [`uart::UartTx`] - Serial transmit

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod gpio;
pub mod pwm;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use adc::{AnalogError, AnalogInput};
pub use gpio::{InputPin, OutputPin};
pub use pwm::PwmOutput;
pub use uart::UartTx;

//! RP2040-specific HAL for the body-control firmware
//!
//! This crate provides RP2040 implementations of the shared `bodyctl-hal`
//! traits on top of `embassy-rp`:
//!
//! - GPIO input/output wrappers
//! - Normalized ADC channels sharing one blocking converter
//! - Servo PWM on a PWM slice output
//! - Blocking UART transmitter

#![no_std]

pub mod adc;
pub mod gpio;
pub mod pwm;
pub mod uart;

pub use adc::{RpAnalogIn, SharedAdc};
pub use gpio::{RpInput, RpOutput};
pub use pwm::RpServoPwm;
pub use uart::RpUartTx;

// Re-export shared traits from bodyctl-hal for convenience
pub use bodyctl_hal::{AnalogInput, InputPin, OutputPin, PwmOutput, UartTx};

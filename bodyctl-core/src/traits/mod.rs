//! Output port traits owned by the core
//!
//! Pin, ADC, PWM and UART traits come from `bodyctl-hal`; the text outputs
//! are defined here because their line format is application-specific.

pub mod serial;
pub mod text;

pub use bodyctl_hal::{AnalogError, AnalogInput, InputPin, OutputPin, PwmOutput, UartTx};
pub use serial::SerialText;
pub use text::{DebugSink, StatusDisplay, TextError, LINE_CAPACITY};

#[cfg(test)]
pub(crate) mod mock;

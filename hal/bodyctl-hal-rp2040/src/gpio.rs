//! GPIO pins
//!
//! embassy-rp pins implement the `embedded-hal` 1.0 digital traits, so the
//! generic adaptors from `bodyctl-hal` cover them.

use bodyctl_hal::gpio::{EhInput, EhOutput};
use embassy_rp::gpio::{Input, Output};

/// Digital input pin
pub type RpInput = EhInput<Input<'static>>;

/// Digital output pin, driven low when wrapped
pub type RpOutput = EhOutput<Output<'static>>;

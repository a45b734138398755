//! GPIO pin abstractions
//!
//! Provides traits for digital input and output pins that can be implemented
//! by chip-specific HALs, plus adaptors for any `embedded-hal` 1.0 pin.

use embedded_hal::digital;

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip. Relay and LED drivers in the core only ever call
/// [`OutputPin::set_state`].
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Adaptor for an `embedded-hal` input pin
///
/// `embedded-hal` reads are fallible and take `&mut self`; a failed read is
/// reported as low. The wrapped pin sits in a `RefCell` so reads work
/// through `&self`.
pub struct EhInput<P> {
    pin: core::cell::RefCell<P>,
}

impl<P: digital::InputPin> EhInput<P> {
    /// Wrap an `embedded-hal` input pin
    pub fn new(pin: P) -> Self {
        Self {
            pin: core::cell::RefCell::new(pin),
        }
    }

    /// Release the wrapped pin
    pub fn into_inner(self) -> P {
        self.pin.into_inner()
    }
}

impl<P: digital::InputPin> InputPin for EhInput<P> {
    fn is_high(&self) -> bool {
        self.pin.borrow_mut().is_high().unwrap_or(false)
    }
}

/// Adaptor for an `embedded-hal` output pin
///
/// Remembers the last commanded level so [`OutputPin::is_set_high`] works
/// for pins that cannot be read back.
pub struct EhOutput<P> {
    pin: P,
    high: bool,
}

impl<P: digital::OutputPin> EhOutput<P> {
    /// Wrap an `embedded-hal` output pin, driving it low
    pub fn new(mut pin: P) -> Self {
        let _ = pin.set_low();
        Self { pin, high: false }
    }

    /// Release the wrapped pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: digital::OutputPin> OutputPin for EhOutput<P> {
    fn set_high(&mut self) {
        if self.pin.set_high().is_ok() {
            self.high = true;
        }
    }

    fn set_low(&mut self) {
        if self.pin.set_low().is_ok() {
            self.high = false;
        }
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    struct FakePin {
        level: bool,
    }

    impl digital::ErrorType for FakePin {
        type Error = Infallible;
    }

    impl digital::InputPin for FakePin {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            Ok(self.level)
        }

        fn is_low(&mut self) -> Result<bool, Infallible> {
            Ok(!self.level)
        }
    }

    impl digital::OutputPin for FakePin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.level = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.level = true;
            Ok(())
        }
    }

    #[test]
    fn test_input_adaptor_reads_level() {
        let input = EhInput::new(FakePin { level: true });
        assert!(input.is_high());
        assert!(!input.is_low());
    }

    #[test]
    fn test_output_adaptor_tracks_state() {
        let mut output = EhOutput::new(FakePin { level: true });
        assert!(!output.is_set_high());

        output.set_state(true);
        assert!(output.is_set_high());
        assert!(output.into_inner().level);
    }
}

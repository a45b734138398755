//! Text output traits for the status display and debug serial line

use core::fmt::Write;

use heapless::String;

/// Longest line the controllers format
pub const LINE_CAPACITY: usize = 64;

/// Errors that can occur writing a text line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextError {
    /// Line did not fit the formatting buffer
    Overflow,
    /// Underlying link rejected the write
    Link,
    /// Row outside the display
    InvalidRow,
}

/// Character display showing one status line per row
pub trait StatusDisplay {
    /// Replace the contents of `row` with `text`
    fn write_line(&mut self, row: u8, text: &str) -> Result<(), TextError>;
}

/// Serial diagnostics output
pub trait DebugSink {
    /// Emit one line of text
    fn write_line(&mut self, text: &str) -> Result<(), TextError>;
}

/// Format into a fixed-capacity line
pub(crate) fn format_line(
    args: core::fmt::Arguments<'_>,
) -> Result<String<LINE_CAPACITY>, TextError> {
    let mut line = String::new();
    line.write_fmt(args).map_err(|_| TextError::Overflow)?;
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line() {
        let line = format_line(format_args!("Potentiometer: {:.3}", 0.5f32)).unwrap();
        assert_eq!(line.as_str(), "Potentiometer: 0.500");
    }

    #[test]
    fn test_format_line_overflow() {
        let long = [b'x'; 80];
        let text = core::str::from_utf8(&long).unwrap();
        assert_eq!(
            format_line(format_args!("{}", text)),
            Err(TextError::Overflow)
        );
    }
}

//! Mock hardware shared by controller tests

use heapless::{String, Vec};

use super::{
    AnalogError, AnalogInput, DebugSink, InputPin, OutputPin, PwmOutput, StatusDisplay,
    TextError, LINE_CAPACITY,
};

/// Lines kept by the recording sink
pub const MAX_LINES: usize = 32;

/// Input pin with a settable level
#[derive(Default)]
pub struct MockInput {
    pub high: bool,
}

impl InputPin for MockInput {
    fn is_high(&self) -> bool {
        self.high
    }
}

/// Analog channel with a settable reading
#[derive(Default)]
pub struct MockAnalog {
    pub value: f32,
    pub fail: bool,
}

impl AnalogInput for MockAnalog {
    fn read_normalized(&mut self) -> Result<f32, AnalogError> {
        if self.fail {
            Err(AnalogError::Conversion)
        } else {
            Ok(self.value)
        }
    }
}

/// Output pin counting writes
#[derive(Default)]
pub struct MockOutput {
    pub high: bool,
    pub writes: u32,
}

impl OutputPin for MockOutput {
    fn set_high(&mut self) {
        self.high = true;
        self.writes += 1;
    }

    fn set_low(&mut self) {
        self.high = false;
        self.writes += 1;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// PWM channel recording period and duty writes
#[derive(Default)]
pub struct MockPwm {
    pub period_us: u32,
    pub ratio: f32,
    pub writes: u32,
}

impl PwmOutput for MockPwm {
    fn set_period_us(&mut self, period_us: u32) {
        self.period_us = period_us;
    }

    fn set_duty_ratio(&mut self, ratio: f32) {
        self.ratio = ratio;
        self.writes += 1;
    }

    fn duty_ratio(&self) -> f32 {
        self.ratio
    }
}

/// Debug sink that keeps the most recent lines
#[derive(Default)]
pub struct RecordingSink {
    pub lines: Vec<String<LINE_CAPACITY>, MAX_LINES>,
    pub fail: bool,
}

impl RecordingSink {
    pub fn count(&self, text: &str) -> usize {
        self.lines.iter().filter(|l| l.as_str() == text).count()
    }

    pub fn count_prefix(&self, prefix: &str) -> usize {
        self.lines.iter().filter(|l| l.starts_with(prefix)).count()
    }

    pub fn last(&self) -> Option<&str> {
        self.lines.last().map(|l| l.as_str())
    }
}

impl DebugSink for RecordingSink {
    fn write_line(&mut self, text: &str) -> Result<(), TextError> {
        if self.fail {
            return Err(TextError::Link);
        }
        if self.lines.is_full() {
            self.lines.remove(0);
        }
        let line = String::try_from(text).map_err(|_| TextError::Overflow)?;
        let _ = self.lines.push(line);
        Ok(())
    }
}

/// Two-row display keeping the last text per row
#[derive(Default)]
pub struct RecordingDisplay {
    pub rows: [String<LINE_CAPACITY>; 2],
    pub writes: u32,
    pub fail: bool,
}

impl StatusDisplay for RecordingDisplay {
    fn write_line(&mut self, row: u8, text: &str) -> Result<(), TextError> {
        if self.fail {
            return Err(TextError::Link);
        }
        let slot = self
            .rows
            .get_mut(row as usize)
            .ok_or(TextError::InvalidRow)?;
        *slot = String::try_from(text).map_err(|_| TextError::Overflow)?;
        self.writes += 1;
        Ok(())
    }
}

//! PWM output abstractions
//!
//! The wiper servo is positioned by the duty ratio of a fixed-period PWM
//! signal.

/// PWM output channel driven by duty ratio
pub trait PwmOutput {
    /// Configure the PWM period in microseconds
    ///
    /// Called once at startup; the duty ratio is relative to this period.
    fn set_period_us(&mut self, period_us: u32);

    /// Set the active fraction of each period, clamped to `[0.0, 1.0]`
    fn set_duty_ratio(&mut self, ratio: f32);

    /// Get the last commanded duty ratio
    fn duty_ratio(&self) -> f32;
}

/// Clamp a duty ratio into `[0.0, 1.0]`, mapping NaN to 0.0
pub fn clamp_ratio(ratio: f32) -> f32 {
    if ratio.is_nan() || ratio < 0.0 {
        0.0
    } else if ratio > 1.0 {
        1.0
    } else {
        ratio
    }
}

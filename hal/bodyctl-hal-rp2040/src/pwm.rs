//! Servo PWM on an RP2040 PWM slice
//!
//! The slice counter runs from the 125 MHz system clock through a fixed
//! divider of 64, giving 0.512 us per count. A 20 ms servo frame is then
//! 39062 counts, which fits the 16-bit `top` register.

use bodyctl_hal::pwm::clamp_ratio;
use bodyctl_hal::PwmOutput;
use embassy_rp::pwm::{Config, Pwm};

/// System clock feeding the PWM slices (Hz)
pub const SYS_CLOCK_HZ: u32 = 125_000_000;

/// Integer clock divider used for servo frames
pub const SERVO_DIVIDER: u8 = 64;

/// Counts per period for a PWM period in microseconds
pub fn period_counts(period_us: u32) -> u32 {
    let counts = (SYS_CLOCK_HZ / 1_000_000) as u64 * period_us as u64 / SERVO_DIVIDER as u64;
    counts.clamp(1, u16::MAX as u64 + 1) as u32
}

/// Servo output on channel A of a PWM slice
pub struct RpServoPwm {
    pwm: Pwm<'static>,
    config: Config,
    ratio: f32,
}

impl RpServoPwm {
    /// Wrap a slice configured with [`Pwm::new_output_a`]
    pub fn new(pwm: Pwm<'static>) -> Self {
        let mut config = Config::default();
        config.divider = SERVO_DIVIDER.into();
        config.compare_a = 0;
        Self {
            pwm,
            config,
            ratio: 0.0,
        }
    }

    fn apply(&mut self) {
        let counts = self.config.top as u32 + 1;
        self.config.compare_a = (self.ratio * counts as f32) as u16;
        self.pwm.set_config(&self.config);
    }
}

impl PwmOutput for RpServoPwm {
    fn set_period_us(&mut self, period_us: u32) {
        self.config.top = (period_counts(period_us) - 1) as u16;
        self.apply();
    }

    fn set_duty_ratio(&mut self, ratio: f32) {
        self.ratio = clamp_ratio(ratio);
        self.apply();
    }

    fn duty_ratio(&self) -> f32 {
        self.ratio
    }
}

//! Wiper servo motion profiles
//!
//! The servo position is a PWM duty ratio between `duty_min` (parked) and
//! `duty_max`. Motion only advances on gated ticks, every `gate_ms` of loop
//! time while the engine is on, and `wipe_time` counts gate periods since
//! the start of the current sweep.
//!
//! | Mode     | Profile                                                    |
//! |----------|------------------------------------------------------------|
//! | Off      | park, reset sweep time                                     |
//! | Low      | step out until `ramp_time_low`, back until twice that, park |
//! | High     | same shape with the High step/ramp; no park write at the end |
//! | Interval | one Low sweep, hold parked until the interval pause elapses |
//! | Fault    | nothing                                                    |
//!
//! Only the branches above that name a position write produce a duty
//! command; the others leave the PWM output untouched.

use crate::config::WiperConfig;
use crate::mode::{IntervalSetting, WiperMode};

/// Result of one wiper driver update
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WiperStep {
    /// The 30 ms gate fired this tick
    pub gated: bool,
    /// Duty ratio to write to the servo PWM, if any
    pub duty: Option<f32>,
}

impl WiperStep {
    const IDLE: WiperStep = WiperStep {
        gated: false,
        duty: None,
    };
}

/// Wiper servo driver holding the sweep timers
#[derive(Debug, Clone)]
pub struct WiperDriver {
    config: WiperConfig,
    position: f32,
    wipe_time_ms: u32,
    ticker_ms: u32,
}

impl WiperDriver {
    /// Create a driver parked at `duty_min`
    pub fn new(config: WiperConfig) -> Self {
        Self {
            position: config.duty_min,
            config,
            wipe_time_ms: 0,
            ticker_ms: 0,
        }
    }

    /// Current servo position (duty ratio)
    pub fn position(&self) -> f32 {
        self.position
    }

    /// Time since the start of the current sweep (ms)
    pub fn wipe_time_ms(&self) -> u32 {
        self.wipe_time_ms
    }

    /// Time since the gate last fired (ms)
    pub fn ticker_ms(&self) -> u32 {
        self.ticker_ms
    }

    /// Advance one loop tick
    ///
    /// Nothing moves while the engine is off; the gate timer only runs with
    /// the engine on.
    pub fn update(
        &mut self,
        mode: WiperMode,
        interval: IntervalSetting,
        engine_on: bool,
    ) -> WiperStep {
        if !engine_on {
            return WiperStep::IDLE;
        }

        self.ticker_ms = self.ticker_ms.saturating_add(self.config.tick_ms);
        if self.ticker_ms < self.config.gate_ms {
            return WiperStep::IDLE;
        }
        self.ticker_ms = 0;

        let duty = match mode {
            WiperMode::Off => {
                self.position = self.config.duty_min;
                self.wipe_time_ms = 0;
                Some(self.position)
            }
            WiperMode::Low => self.sweep(self.config.step_low, self.config.ramp_time_low_ms, true),
            WiperMode::High => {
                self.sweep(self.config.step_high, self.config.ramp_time_high_ms, false)
            }
            WiperMode::Interval => self.interval(interval.pause_ms(&self.config)),
            _ => None,
        };

        WiperStep { gated: true, duty }
    }

    /// One gated step of an out-and-back sweep
    fn sweep(&mut self, step: f32, ramp_ms: u32, park_at_end: bool) -> Option<f32> {
        self.wipe_time_ms = self.wipe_time_ms.saturating_add(self.config.gate_ms);

        if self.wipe_time_ms < ramp_ms {
            self.step_out(step)
        } else if self.wipe_time_ms < ramp_ms.saturating_mul(2) {
            self.step_back(step)
        } else {
            self.wipe_time_ms = 0;
            if park_at_end {
                self.position = self.config.duty_min;
                Some(self.position)
            } else {
                None
            }
        }
    }

    /// One gated step of a Low sweep followed by a parked pause
    fn interval(&mut self, pause_ms: u32) -> Option<f32> {
        let ramp_ms = self.config.ramp_time_low_ms;
        self.wipe_time_ms = self.wipe_time_ms.saturating_add(self.config.gate_ms);

        if self.wipe_time_ms < ramp_ms {
            self.step_out(self.config.step_low)
        } else if self.wipe_time_ms < ramp_ms.saturating_mul(2) {
            self.step_back(self.config.step_low)
        } else if self.wipe_time_ms < pause_ms {
            self.position = self.config.duty_min;
            Some(self.position)
        } else {
            self.wipe_time_ms = 0;
            None
        }
    }

    fn step_out(&mut self, step: f32) -> Option<f32> {
        self.position = (self.position + step).min(self.config.duty_max);
        Some(self.position)
    }

    fn step_back(&mut self, step: f32) -> Option<f32> {
        self.position = (self.position - step).max(self.config.duty_min);
        Some(self.position)
    }
}

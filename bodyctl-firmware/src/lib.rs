//! Shared setup for the headlight and wiper binaries
//!
//! Tuning constants are generated from `body.toml` at build time and turned
//! into the core configuration types here.

#![no_std]

use bodyctl_core::config::{DebounceConfig, HeadlightConfig, WiperConfig};

/// Constants generated from body.toml
pub mod tuning {
    include!(concat!(env!("OUT_DIR"), "/tuning.rs"));
}

use tuning::*;

/// Headlight configuration from body.toml
pub fn headlight_config() -> HeadlightConfig {
    HeadlightConfig {
        tick_ms: TIMING_TICK_MS,
        debounce: DebounceConfig {
            threshold_ms: HEADLIGHT_DEBOUNCE_MS,
            active_low: HEADLIGHT_DEBOUNCE_ACTIVE_LOW,
        },
        seat_active_low: HEADLIGHT_SEAT_ACTIVE_LOW,
        lights_on: HEADLIGHT_LIGHTS_ON,
        lights_off: HEADLIGHT_LIGHTS_OFF,
        dusk: HEADLIGHT_DUSK,
        daylight: HEADLIGHT_DAYLIGHT,
        dusk_delay_ms: HEADLIGHT_DUSK_DELAY_MS,
        daylight_delay_ms: HEADLIGHT_DAYLIGHT_DELAY_MS,
    }
}

/// Wiper configuration from body.toml
pub fn wiper_config() -> WiperConfig {
    WiperConfig {
        tick_ms: TIMING_TICK_MS,
        debounce: DebounceConfig {
            threshold_ms: WIPER_DEBOUNCE_MS,
            active_low: WIPER_DEBOUNCE_ACTIVE_LOW,
        },
        seat_active_low: WIPER_SEAT_ACTIVE_LOW,
        speed_off_max: WIPER_SPEED_OFF_MAX,
        speed_low_max: WIPER_SPEED_LOW_MAX,
        speed_interval_max: WIPER_SPEED_INTERVAL_MAX,
        interval_short_max: WIPER_INTERVAL_SHORT_MAX,
        interval_medium_max: WIPER_INTERVAL_MEDIUM_MAX,
        interval_long_max: WIPER_INTERVAL_LONG_MAX,
        gate_ms: WIPER_GATE_MS,
        duty_min: WIPER_DUTY_MIN,
        duty_max: WIPER_DUTY_MAX,
        step_low: WIPER_STEP_LOW,
        ramp_time_low_ms: WIPER_RAMP_TIME_LOW_MS,
        step_high: WIPER_STEP_HIGH,
        ramp_time_high_ms: WIPER_RAMP_TIME_HIGH_MS,
        pause_short_ms: WIPER_PAUSE_SHORT_MS,
        pause_medium_ms: WIPER_PAUSE_MEDIUM_MS,
        pause_long_ms: WIPER_PAUSE_LONG_MS,
        pwm_period_ms: WIPER_PWM_PERIOD_MS,
    }
}

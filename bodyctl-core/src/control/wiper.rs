//! Windscreen wiper control loop
//!
//! Both dials are read raw every tick. The mode is forced to Off while the
//! engine is off, and an interval dial reading that selects nothing leaves
//! the previous interval setting in place.

use core::fmt;

use crate::actuation::{WiperDriver, WiperStep};
use crate::config::WiperConfig;
use crate::engine::{EngineLatch, EngineTransition};
use crate::input::Debouncer;
use crate::mode::{arbitrate_interval, arbitrate_wiper_mode, IntervalSetting, WiperMode};
use crate::traits::text::format_line;
use crate::traits::{AnalogInput, InputPin, OutputPin, PwmOutput, StatusDisplay};

use super::read_finite;

/// Display row carrying the mode label
const STATUS_ROW: u8 = 0;

/// Hardware ports used by the wiper module
pub struct WiperHardware<Ign, Seat, Speed, Int, Servo, Led, Disp> {
    /// Ignition button
    pub ignition: Ign,
    /// Driver seat occupancy switch
    pub driver_seat: Seat,
    /// Wiper speed dial
    pub speed_dial: Speed,
    /// Interval length dial
    pub interval_dial: Int,
    /// Wiper servo PWM
    pub servo: Servo,
    /// Engine indicator LED
    pub engine_led: Led,
    /// Status display
    pub display: Disp,
}

/// Summary of one wiper tick
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WiperReport {
    pub engine: EngineTransition,
    pub engine_on: bool,
    pub mode: WiperMode,
    /// Interval setting in effect after this tick
    pub interval: IntervalSetting,
    /// Raw speed dial reading
    pub speed: f32,
    /// Raw interval dial reading
    pub interval_dial: f32,
    pub step: WiperStep,
}

/// Wiper controller
pub struct WiperController<Ign, Seat, Speed, Int, Servo, Led, Disp> {
    hw: WiperHardware<Ign, Seat, Speed, Int, Servo, Led, Disp>,
    config: WiperConfig,
    ignition: Debouncer,
    engine: EngineLatch,
    mode: WiperMode,
    interval: IntervalSetting,
    driver: WiperDriver,
    dropped_lines: u32,
}

impl<Ign, Seat, Speed, Int, Servo, Led, Disp> WiperController<Ign, Seat, Speed, Int, Servo, Led, Disp>
where
    Ign: InputPin,
    Seat: InputPin,
    Speed: AnalogInput,
    Int: AnalogInput,
    Servo: PwmOutput,
    Led: OutputPin,
    Disp: StatusDisplay,
{
    /// Take ownership of the hardware and put it in its power-on state
    ///
    /// Configures the servo PWM period, parks the servo and turns the
    /// engine indicator off.
    pub fn new(
        mut hw: WiperHardware<Ign, Seat, Speed, Int, Servo, Led, Disp>,
        config: WiperConfig,
    ) -> Self {
        let ignition = Debouncer::seeded(config.debounce, config.tick_ms, hw.ignition.is_high());
        hw.servo.set_period_us(config.pwm_period_us());
        hw.servo.set_duty_ratio(config.duty_min);
        hw.engine_led.set_low();

        Self {
            hw,
            config,
            ignition,
            engine: EngineLatch::new(),
            mode: WiperMode::Off,
            interval: IntervalSetting::default(),
            driver: WiperDriver::new(config),
            dropped_lines: 0,
        }
    }

    /// Run one loop iteration
    pub fn tick(&mut self) -> WiperReport {
        let released = self.ignition.update(self.hw.ignition.is_high());
        let seat = self.hw.driver_seat.is_high() != self.config.seat_active_low;
        let engine = self.engine.update(released, seat);
        self.hw.engine_led.set_state(self.engine.is_on());

        let speed = read_finite(&mut self.hw.speed_dial).unwrap_or(f32::NAN);
        let interval_dial = read_finite(&mut self.hw.interval_dial).unwrap_or(f32::NAN);

        self.mode = arbitrate_wiper_mode(speed, self.engine.is_on(), &self.config);
        if let Some(setting) = arbitrate_interval(interval_dial, &self.config) {
            self.interval = setting;
        }

        let step = self
            .driver
            .update(self.mode, self.interval, self.engine.is_on());
        if let Some(duty) = step.duty {
            self.hw.servo.set_duty_ratio(duty);
        }

        if self.mode == WiperMode::Interval {
            self.status(format_args!(
                "{} {} {:.3}",
                self.mode.as_str(),
                self.interval.as_str(),
                interval_dial
            ));
        } else {
            self.status(format_args!("{}", self.mode.as_str()));
        }

        WiperReport {
            engine,
            engine_on: self.engine.is_on(),
            mode: self.mode,
            interval: self.interval,
            speed,
            interval_dial,
            step,
        }
    }

    fn status(&mut self, args: fmt::Arguments<'_>) {
        let written =
            format_line(args).and_then(|line| self.hw.display.write_line(STATUS_ROW, &line));
        if written.is_err() {
            self.dropped_lines = self.dropped_lines.saturating_add(1);
        }
    }

    /// Whether the engine is on
    pub fn engine_on(&self) -> bool {
        self.engine.is_on()
    }

    /// Current wiper mode
    pub fn mode(&self) -> WiperMode {
        self.mode
    }

    /// Current interval setting
    pub fn interval(&self) -> IntervalSetting {
        self.interval
    }

    /// Servo driver, for its position and sweep timers
    pub fn driver(&self) -> &WiperDriver {
        &self.driver
    }

    /// Ignition debouncer
    pub fn ignition(&self) -> &Debouncer {
        &self.ignition
    }

    /// Number of status lines the display rejected
    pub fn dropped_lines(&self) -> u32 {
        self.dropped_lines
    }

    /// Get access to the hardware ports
    pub fn hardware(&self) -> &WiperHardware<Ign, Seat, Speed, Int, Servo, Led, Disp> {
        &self.hw
    }

    /// Get mutable access to the hardware ports
    pub fn hardware_mut(&mut self) -> &mut WiperHardware<Ign, Seat, Speed, Int, Servo, Led, Disp> {
        &mut self.hw
    }
}

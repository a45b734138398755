//! Automatic headlight control loop
//!
//! The dial is averaged every tick. Mode arbitration, beam actuation and the
//! per-tick debug lines only run while the engine is on; when the engine
//! turns off the mode and beams keep whatever they last were.

use core::fmt;

use crate::actuation::{BeamDriver, Beams};
use crate::config::HeadlightConfig;
use crate::engine::{EngineLatch, EngineTransition};
use crate::input::{Debouncer, SampleRing};
use crate::mode::{arbitrate_light_mode, LightMode};
use crate::traits::text::format_line;
use crate::traits::{AnalogInput, DebugSink, InputPin, OutputPin};

use super::read_finite;

/// Hardware ports used by the headlight module
pub struct HeadlightHardware<Ign, Seat, Dial, Ldr, Beam, Dbg> {
    /// Ignition button
    pub ignition: Ign,
    /// Driver seat occupancy switch
    pub driver_seat: Seat,
    /// Light mode dial
    pub dial: Dial,
    /// Ambient light sensor
    pub light_sensor: Ldr,
    /// Left low-beam relay
    pub low_beam_left: Beam,
    /// Right low-beam relay
    pub low_beam_right: Beam,
    /// Serial diagnostics
    pub debug: Dbg,
}

/// Summary of one headlight tick
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HeadlightReport {
    /// Engine latch change this tick
    pub engine: EngineTransition,
    /// Engine latch after this tick
    pub engine_on: bool,
    /// Active light mode
    pub mode: LightMode,
    /// Averaged dial reading, NaN when this tick's read failed
    pub dial: f32,
    /// Averaged light sensor reading, when sampled successfully
    pub light: Option<f32>,
    /// Beam levels written this tick
    pub beams: Option<Beams>,
}

/// Headlight controller
pub struct HeadlightController<Ign, Seat, Dial, Ldr, Beam, Dbg> {
    hw: HeadlightHardware<Ign, Seat, Dial, Ldr, Beam, Dbg>,
    config: HeadlightConfig,
    ignition: Debouncer,
    engine: EngineLatch,
    mode: LightMode,
    dial_ring: SampleRing,
    light_ring: SampleRing,
    beams: BeamDriver,
    dropped_lines: u32,
}

impl<Ign, Seat, Dial, Ldr, Beam, Dbg> HeadlightController<Ign, Seat, Dial, Ldr, Beam, Dbg>
where
    Ign: InputPin,
    Seat: InputPin,
    Dial: AnalogInput,
    Ldr: AnalogInput,
    Beam: OutputPin,
    Dbg: DebugSink,
{
    /// Take ownership of the hardware and put it in its power-on state
    ///
    /// Seeds the ignition debouncer from the current pin level and drives
    /// both beams off.
    pub fn new(
        mut hw: HeadlightHardware<Ign, Seat, Dial, Ldr, Beam, Dbg>,
        config: HeadlightConfig,
    ) -> Self {
        let ignition = Debouncer::seeded(config.debounce, config.tick_ms, hw.ignition.is_high());
        hw.low_beam_left.set_low();
        hw.low_beam_right.set_low();

        Self {
            hw,
            config,
            ignition,
            engine: EngineLatch::new(),
            mode: LightMode::Off,
            dial_ring: SampleRing::new(),
            light_ring: SampleRing::new(),
            beams: BeamDriver::new(config),
            dropped_lines: 0,
        }
    }

    /// Run one loop iteration
    pub fn tick(&mut self) -> HeadlightReport {
        let released = self.ignition.update(self.hw.ignition.is_high());
        let seat = self.hw.driver_seat.is_high() != self.config.seat_active_low;
        let engine = self.engine.update(released, seat);
        match engine {
            EngineTransition::Started => self.debug(format_args!("Engine on")),
            EngineTransition::Stopped => self.debug(format_args!("Engine off")),
            EngineTransition::None => {}
        }

        // A failed read arbitrates as Fault for this tick only
        let dial = match read_finite(&mut self.hw.dial) {
            Some(value) => self.dial_ring.sample(value),
            None => f32::NAN,
        };

        let mut light = None;
        let mut beams = None;
        if self.engine.is_on() {
            self.mode = arbitrate_light_mode(dial, &self.config);
            self.debug(format_args!(
                "Potentiometer: {:.3} Lights {}",
                dial,
                self.mode.as_str()
            ));

            if self.mode == LightMode::Auto {
                light = read_finite(&mut self.hw.light_sensor)
                    .map(|value| self.light_ring.sample(value));
                if let Some(level) = light {
                    self.debug(format_args!("LDR Sensor: {:.3}", level));
                }
            }

            beams = self.beams.update(self.mode, light);
            if let Some(levels) = beams {
                self.hw.low_beam_left.set_state(levels.left);
                self.hw.low_beam_right.set_state(levels.right);
            }
        }

        HeadlightReport {
            engine,
            engine_on: self.engine.is_on(),
            mode: self.mode,
            dial,
            light,
            beams,
        }
    }

    fn debug(&mut self, args: fmt::Arguments<'_>) {
        let written = format_line(args).and_then(|line| self.hw.debug.write_line(&line));
        if written.is_err() {
            self.dropped_lines = self.dropped_lines.saturating_add(1);
        }
    }

    /// Whether the engine is on
    pub fn engine_on(&self) -> bool {
        self.engine.is_on()
    }

    /// Last arbitrated light mode
    pub fn mode(&self) -> LightMode {
        self.mode
    }

    /// Beam driver, for its hysteresis timers
    pub fn beam_driver(&self) -> &BeamDriver {
        &self.beams
    }

    /// Ignition debouncer
    pub fn ignition(&self) -> &Debouncer {
        &self.ignition
    }

    /// Number of debug lines the sink rejected
    pub fn dropped_lines(&self) -> u32 {
        self.dropped_lines
    }

    /// Get access to the hardware ports
    pub fn hardware(&self) -> &HeadlightHardware<Ign, Seat, Dial, Ldr, Beam, Dbg> {
        &self.hw
    }

    /// Get mutable access to the hardware ports
    pub fn hardware_mut(&mut self) -> &mut HeadlightHardware<Ign, Seat, Dial, Ldr, Beam, Dbg> {
        &mut self.hw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::mock::{MockAnalog, MockInput, MockOutput, RecordingSink};

    type Controller =
        HeadlightController<MockInput, MockInput, MockAnalog, MockAnalog, MockOutput, RecordingSink>;

    fn controller(dial: f32, light: f32) -> Controller {
        let hw = HeadlightHardware {
            ignition: MockInput::default(),
            driver_seat: MockInput { high: true },
            dial: MockAnalog {
                value: dial,
                fail: false,
            },
            light_sensor: MockAnalog {
                value: light,
                fail: false,
            },
            low_beam_left: MockOutput {
                high: true,
                writes: 0,
            },
            low_beam_right: MockOutput {
                high: true,
                writes: 0,
            },
            debug: RecordingSink::default(),
        };
        HeadlightController::new(hw, HeadlightConfig::default())
    }

    fn run(ctrl: &mut Controller, ticks: usize) {
        for _ in 0..ticks {
            ctrl.tick();
        }
    }

    /// Hold the ignition for 50 ms, then release it for 50 ms
    fn press_and_release(ctrl: &mut Controller) -> usize {
        let mut toggles = 0;
        ctrl.hardware_mut().ignition.high = true;
        for _ in 0..5 {
            if ctrl.tick().engine != EngineTransition::None {
                toggles += 1;
            }
        }
        ctrl.hardware_mut().ignition.high = false;
        for _ in 0..5 {
            if ctrl.tick().engine != EngineTransition::None {
                toggles += 1;
            }
        }
        toggles
    }

    fn beams(ctrl: &Controller) -> (bool, bool) {
        let hw = ctrl.hardware();
        (hw.low_beam_left.high, hw.low_beam_right.high)
    }

    #[test]
    fn test_power_on_state() {
        let ctrl = controller(0.5, 0.5);
        assert_eq!(beams(&ctrl), (false, false));
        assert_eq!(ctrl.mode(), LightMode::Off);
        assert!(!ctrl.engine_on());
    }

    #[test]
    fn test_ignition_starts_engine_once() {
        let mut ctrl = controller(0.0, 0.5);
        assert_eq!(press_and_release(&mut ctrl), 1);
        assert!(ctrl.engine_on());
        assert_eq!(ctrl.hardware().debug.count("Engine on"), 1);

        // Nothing more happens while the button stays released
        run(&mut ctrl, 20);
        assert!(ctrl.engine_on());
        assert_eq!(ctrl.hardware().debug.count("Engine on"), 1);
    }

    #[test]
    fn test_empty_seat_blocks_ignition() {
        let mut ctrl = controller(0.0, 0.5);
        ctrl.hardware_mut().driver_seat.high = false;
        assert_eq!(press_and_release(&mut ctrl), 0);
        assert!(!ctrl.engine_on());
    }

    #[test]
    fn test_second_press_stops_engine() {
        let mut ctrl = controller(0.0, 0.5);
        press_and_release(&mut ctrl);
        press_and_release(&mut ctrl);
        assert!(!ctrl.engine_on());
        assert_eq!(ctrl.hardware().debug.count("Engine off"), 1);
    }

    #[test]
    fn test_engine_off_skips_arbitration() {
        let mut ctrl = controller(0.0, 0.5);
        run(&mut ctrl, 150);
        assert_eq!(ctrl.mode(), LightMode::Off);
        assert_eq!(beams(&ctrl), (false, false));
        assert!(ctrl.hardware().debug.lines.is_empty());
    }

    #[test]
    fn test_dial_on_drives_beams() {
        let mut ctrl = controller(0.1, 0.9);
        run(&mut ctrl, 100);
        press_and_release(&mut ctrl);

        let report = ctrl.tick();
        assert_eq!(report.mode, LightMode::On);
        assert_eq!(report.beams, Some(Beams::ON));
        assert_eq!(report.light, None);
        assert_eq!(beams(&ctrl), (true, true));
        assert_eq!(ctrl.hardware().debug.last(), Some("Potentiometer: 0.100 Lights ON"));
    }

    #[test]
    fn test_mode_holds_when_engine_stops() {
        let mut ctrl = controller(0.1, 0.9);
        press_and_release(&mut ctrl);
        run(&mut ctrl, 5);
        assert_eq!(ctrl.mode(), LightMode::On);

        press_and_release(&mut ctrl);
        assert!(!ctrl.engine_on());

        // Dial moves to Off, but nothing is re-evaluated with the engine off
        ctrl.hardware_mut().dial.value = 1.0;
        run(&mut ctrl, 200);
        assert_eq!(ctrl.mode(), LightMode::On);
        assert_eq!(beams(&ctrl), (true, true));
    }

    #[test]
    fn test_auto_switches_on_after_dusk_delay() {
        // Fill the dial average before starting the engine
        let mut ctrl = controller(0.5, 0.1);
        run(&mut ctrl, 100);
        press_and_release(&mut ctrl);
        assert_eq!(ctrl.mode(), LightMode::Auto);
        assert_eq!(ctrl.hardware().debug.count_prefix("LDR Sensor:"), 1);

        // The engine started on an Auto tick; 1000 ms needs 100 in total
        for _ in 0..98 {
            assert_eq!(ctrl.tick().beams, None);
        }
        assert_eq!(ctrl.tick().beams, Some(Beams::ON));
        assert_eq!(beams(&ctrl), (true, true));
        assert_eq!(ctrl.beam_driver().time_to_on_ms(), 0);
    }

    #[test]
    fn test_auto_switches_off_in_daylight() {
        let mut ctrl = controller(0.5, 0.1);
        run(&mut ctrl, 100);
        press_and_release(&mut ctrl);
        run(&mut ctrl, 100);
        assert_eq!(beams(&ctrl), (true, true));

        ctrl.hardware_mut().light_sensor.value = 0.95;
        let mut switched_off = 0;
        for _ in 0..400 {
            if ctrl.tick().beams == Some(Beams::OFF) {
                switched_off += 1;
            }
        }
        assert_eq!(switched_off, 1);
        assert_eq!(beams(&ctrl), (false, false));
    }

    #[test]
    fn test_failed_dial_read_shows_fault_pattern() {
        let mut ctrl = controller(0.1, 0.5);
        press_and_release(&mut ctrl);

        ctrl.hardware_mut().dial.fail = true;
        let report = ctrl.tick();
        assert_eq!(report.mode, LightMode::Fault);
        assert_eq!(beams(&ctrl), (false, true));
    }

    #[test]
    fn test_single_failed_dial_read_faults_one_tick() {
        let mut ctrl = controller(0.1, 0.5);
        run(&mut ctrl, 100);
        press_and_release(&mut ctrl);

        ctrl.hardware_mut().dial.fail = true;
        let report = ctrl.tick();
        assert_eq!(report.mode, LightMode::Fault);
        assert!(report.dial.is_nan());
        assert_eq!(beams(&ctrl), (false, true));

        ctrl.hardware_mut().dial.fail = false;
        let mut fault_ticks = 0;
        for _ in 0..200 {
            let report = ctrl.tick();
            if report.mode == LightMode::Fault {
                fault_ticks += 1;
            }
            assert!((report.dial - 0.1).abs() < 1e-4);
        }
        assert_eq!(fault_ticks, 0);
        assert_eq!(ctrl.mode(), LightMode::On);
        assert_eq!(beams(&ctrl), (true, true));
    }

    #[test]
    fn test_failed_light_read_only_skips_one_tick() {
        let mut ctrl = controller(0.5, 0.1);
        run(&mut ctrl, 100);
        press_and_release(&mut ctrl);
        assert_eq!(ctrl.beam_driver().time_to_on_ms(), 10);

        ctrl.hardware_mut().light_sensor.fail = true;
        let report = ctrl.tick();
        assert_eq!(report.mode, LightMode::Auto);
        assert_eq!(report.light, None);
        assert_eq!(report.beams, None);
        assert_eq!(ctrl.beam_driver().time_to_on_ms(), 10);

        ctrl.hardware_mut().light_sensor.fail = false;
        let report = ctrl.tick();
        assert!(report.light.is_some_and(|level| level < 0.5));
        assert_eq!(ctrl.beam_driver().time_to_on_ms(), 20);
    }

    #[test]
    fn test_rejected_debug_lines_are_counted() {
        let mut ctrl = controller(0.1, 0.5);
        ctrl.hardware_mut().debug.fail = true;
        press_and_release(&mut ctrl);
        assert!(ctrl.engine_on());
        assert!(ctrl.dropped_lines() >= 1);
    }
}

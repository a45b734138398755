//! Wiper module firmware
//!
//! Reads the ignition button, driver seat switch, wiper speed dial and
//! interval dial, drives the wiper servo and engine indicator, and shows
//! the wiper mode on a serial status terminal.
//!
//! Pin assignment:
//!
//! | Signal           | GPIO |
//! |------------------|------|
//! | Status UART TX   | 0    |
//! | Ignition button  | 2    |
//! | Driver seat      | 3    |
//! | Wiper servo      | 16 (PWM0 A) |
//! | Engine indicator | 25   |
//! | Speed dial       | 26 (ADC0) |
//! | Interval dial    | 27 (ADC1) |

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::{Config as RpUartConfig, UartTx};
use embassy_time::{Duration, Ticker};
use {defmt_rtt as _, panic_probe as _};

use bodyctl_core::control::{WiperController, WiperHardware};
use bodyctl_core::engine::EngineTransition;
use bodyctl_core::traits::SerialText;
use bodyctl_hal::uart::UartConfig;
use bodyctl_hal_rp2040::{RpAnalogIn, RpInput, RpOutput, RpServoPwm, RpUartTx};

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Wiper module starting...");

    let p = embassy_rp::init(Default::default());

    let mut config = bodyctl_firmware::wiper_config();
    if let Err(e) = config.validate() {
        warn!("Invalid wiper tuning ({}), using defaults", e);
        config = Default::default();
    }

    let mut uart_config = RpUartConfig::default();
    uart_config.baudrate = UartConfig::default().baudrate;
    let status_tx = UartTx::new_blocking(p.UART0, p.PIN_0, uart_config);

    // Both dials share the one converter
    let adc = RefCell::new(Adc::new_blocking(p.ADC, AdcConfig::default()));
    let speed_dial = Channel::new_pin(p.PIN_26, Pull::None);
    let interval_dial = Channel::new_pin(p.PIN_27, Pull::None);

    let servo = Pwm::new_output_a(p.PWM_SLICE0, p.PIN_16, PwmConfig::default());

    let hw = WiperHardware {
        // Pressed pulls the line low
        ignition: RpInput::new(Input::new(p.PIN_2, Pull::Up)),
        driver_seat: RpInput::new(Input::new(p.PIN_3, Pull::Down)),
        speed_dial: RpAnalogIn::new(&adc, speed_dial),
        interval_dial: RpAnalogIn::new(&adc, interval_dial),
        servo: RpServoPwm::new(servo),
        engine_led: RpOutput::new(Output::new(p.PIN_25, Level::Low)),
        display: SerialText::new(RpUartTx::new(status_tx)),
    };
    let mut controller = WiperController::new(hw, config);
    info!(
        "Peripherals initialized, servo period {} us",
        config.pwm_period_us()
    );

    let mut ticker = Ticker::every(Duration::from_millis(config.tick_ms as u64));
    let mut mode = controller.mode();
    let mut interval = controller.interval();
    let mut dropped = 0;

    loop {
        let report = controller.tick();

        match report.engine {
            EngineTransition::Started => info!("Engine on"),
            EngineTransition::Stopped => info!("Engine off"),
            EngineTransition::None => {}
        }
        if report.mode != mode || report.interval != interval {
            debug!(
                "Wiper mode {} interval {} (speed {}, interval dial {})",
                report.mode, report.interval, report.speed, report.interval_dial
            );
            mode = report.mode;
            interval = report.interval;
        }
        if controller.dropped_lines() != dropped {
            dropped = controller.dropped_lines();
            warn!("Status UART dropped {} lines", dropped);
        }

        ticker.next().await;
    }
}

//! Headlight module firmware
//!
//! Reads the ignition button, driver seat switch, light mode dial and
//! ambient light sensor, and drives the two low-beam relays.
//!
//! Pin assignment:
//!
//! | Signal          | GPIO |
//! |-----------------|------|
//! | Debug UART TX   | 0    |
//! | Ignition button | 2    |
//! | Driver seat     | 3    |
//! | Left low beam   | 14   |
//! | Right low beam  | 15   |
//! | Mode dial       | 26 (ADC0) |
//! | Light sensor    | 27 (ADC1) |

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::uart::{Config as RpUartConfig, UartTx};
use embassy_time::{Duration, Ticker};
use {defmt_rtt as _, panic_probe as _};

use bodyctl_core::control::{HeadlightController, HeadlightHardware};
use bodyctl_core::engine::EngineTransition;
use bodyctl_core::traits::SerialText;
use bodyctl_hal::uart::UartConfig;
use bodyctl_hal_rp2040::{RpAnalogIn, RpInput, RpOutput, RpUartTx};

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Headlight module starting...");

    let p = embassy_rp::init(Default::default());

    let mut config = bodyctl_firmware::headlight_config();
    if let Err(e) = config.validate() {
        warn!("Invalid headlight tuning ({}), using defaults", e);
        config = Default::default();
    }

    let mut uart_config = RpUartConfig::default();
    uart_config.baudrate = UartConfig::default().baudrate;
    let debug_tx = UartTx::new_blocking(p.UART0, p.PIN_0, uart_config);

    // Both analog inputs share the one converter
    let adc = RefCell::new(Adc::new_blocking(p.ADC, AdcConfig::default()));
    let dial = Channel::new_pin(p.PIN_26, Pull::None);
    let light_sensor = Channel::new_pin(p.PIN_27, Pull::None);

    let hw = HeadlightHardware {
        ignition: RpInput::new(Input::new(p.PIN_2, Pull::Down)),
        driver_seat: RpInput::new(Input::new(p.PIN_3, Pull::Down)),
        dial: RpAnalogIn::new(&adc, dial),
        light_sensor: RpAnalogIn::new(&adc, light_sensor),
        low_beam_left: RpOutput::new(Output::new(p.PIN_14, Level::Low)),
        low_beam_right: RpOutput::new(Output::new(p.PIN_15, Level::Low)),
        debug: SerialText::new(RpUartTx::new(debug_tx)),
    };
    let mut controller = HeadlightController::new(hw, config);
    info!("Peripherals initialized, tick every {} ms", config.tick_ms);

    let mut ticker = Ticker::every(Duration::from_millis(config.tick_ms as u64));
    let mut mode = controller.mode();
    let mut dropped = 0;

    loop {
        let report = controller.tick();

        match report.engine {
            EngineTransition::Started => info!("Engine on"),
            EngineTransition::Stopped => info!("Engine off"),
            EngineTransition::None => {}
        }
        if report.mode != mode {
            debug!("Light mode {} (dial {})", report.mode, report.dial);
            mode = report.mode;
        }
        if let Some(beams) = report.beams {
            trace!("Beams {}", beams);
        }
        if controller.dropped_lines() != dropped {
            dropped = controller.dropped_lines();
            warn!("Debug UART dropped {} lines", dropped);
        }

        ticker.next().await;
    }
}

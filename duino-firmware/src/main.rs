//! DU-INO - Control Module Firmware
//!
//! Firmware binary for RP2040-based DU-INO modules: an MCP4922 dual DAC on
//! SPI, an SSD1306 OLED on I2C and a quadrature encoder with push button,
//! tied together by the interface shell from `duino-core`.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output};
use embassy_rp::{i2c, spi};
use {defmt_rtt as _, panic_probe as _};

use duino_core::{BoardConfig, Interface};
use duino_drivers::{Mcp4922, QuadratureEncoder};
use duino_hal_rp2040::{pull, RpInput, RpOutput, RpSpi};

use crate::app::CvApp;
use crate::display::Oled;

mod app;
mod channels;
mod display;
mod tasks;

/// GPIOs claimed below, in `BoardConfig::pins` order:
/// DAC CS/SCK/MOSI, OLED SDA/SCL, encoder A/B/button
const WIRED_PINS: [u8; 8] = [17, 18, 19, 4, 5, 9, 10, 8];

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("DU-INO firmware starting...");

    let config = BoardConfig::DEFAULT;
    if let Err(e) = config
        .validate()
        .and_then(|()| config.check_wiring(&WIRED_PINS))
    {
        error!("Invalid board configuration: {:?}", e);
        core::panic!("invalid board configuration");
    }
    info!("Board configuration OK, tick every {} us", config.tick_interval_us);

    let p = embassy_rp::init(Default::default());

    // DAC on SPI0
    // CS starts deselected so the DAC never sees a partial frame at boot
    let cs = RpOutput::new(Output::new(p.PIN_17, Level::High));
    let spi = spi::Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi::Config::default());
    let dac = Mcp4922::new(cs);
    let spi = RpSpi::new(spi);

    // OLED on I2C0
    let i2c = i2c::I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c::Config::default());
    let oled = Oled::new(i2c);

    // Encoder
    let enc = config.encoder;
    let encoder = QuadratureEncoder::new(
        RpInput::new(Input::new(p.PIN_9, pull(enc.a.pull_up))),
        RpInput::new(Input::new(p.PIN_10, pull(enc.b.pull_up))),
        RpInput::new(Input::new(p.PIN_8, pull(enc.button.pull_up))),
    );

    let ui: tasks::Ui = Interface::new(oled, encoder, CvApp::new());

    info!("Spawning tasks...");
    spawner.spawn(tasks::dac_task(dac, spi)).unwrap();
    spawner.spawn(tasks::ui_task(ui)).unwrap();
    spawner
        .spawn(tasks::tick_task(config.tick_interval_us))
        .unwrap();

    info!("All tasks spawned");
}

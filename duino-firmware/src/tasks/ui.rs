//! UI task
//!
//! Owns the interface shell. Brings the display up once, then services one
//! shell tick per message from the tick task.

use defmt::*;
use duino_core::Interface;
use duino_drivers::QuadratureEncoder;
use duino_hal_rp2040::RpInput;
use embassy_time::Timer;

use crate::app::CvApp;
use crate::channels::TICK_CHANNEL;
use crate::display::Oled;

/// Front panel encoder
pub type PanelEncoder = QuadratureEncoder<RpInput<'static>, RpInput<'static>, RpInput<'static>>;

/// Interface shell as wired on this board
pub type Ui = Interface<Oled, PanelEncoder, CvApp>;

/// Delay between display bring-up attempts
const BEGIN_RETRY_MS: u64 = 500;

/// UI task - runs the shell's begin once, then one service per tick
#[embassy_executor::task]
pub async fn ui_task(mut ui: Ui) {
    info!("UI task started");

    while let Err(e) = ui.begin() {
        warn!("Display bring-up failed: {:?}, retrying", e);
        Timer::after_millis(BEGIN_RETRY_MS).await;
    }
    info!("Interface ready");

    // Ticks that arrived during bring-up carry no input worth replaying
    while TICK_CHANNEL.try_receive().is_ok() {}

    loop {
        let _tick = TICK_CHANNEL.receive().await;
        ui.timer_isr();
    }
}

//! Tick task for the UI shell
//!
//! Stands in for the hardware timer interrupt: every tick interval it posts
//! a tick number to the UI task, which services the encoder and runs the
//! application's timer hook. Ticks are queued so a briefly late UI task
//! still sees every tick in order.

use defmt::*;
use embassy_time::{Duration, Ticker};

use crate::channels::TICK_CHANNEL;

/// Tick task - posts a sequential tick number every interval
#[embassy_executor::task]
pub async fn tick_task(interval_us: u32) {
    info!("Tick task started ({} us)", interval_us);

    let mut ticker = Ticker::every(Duration::from_micros(interval_us as u64));
    let mut tick: u32 = 0;

    loop {
        ticker.next().await;

        if TICK_CHANNEL.try_send(tick).is_err() {
            warn!("UI tick overrun, dropped tick {}", tick);
        }
        tick = tick.wrapping_add(1);
    }
}

//! DAC output task
//!
//! Sole owner of the SPI bus and the MCP4922. Writes each level the
//! application publishes; only one transaction is ever on the bus.

use defmt::*;
use duino_drivers::Mcp4922;
use duino_hal_rp2040::{RpOutput, RpSpi};
use embassy_rp::peripherals::SPI0;

use crate::channels::DAC_LEVEL;

/// DAC task - configures the bus, then outputs requested levels
#[embassy_executor::task]
pub async fn dac_task(mut dac: Mcp4922<RpOutput<'static>>, mut spi: RpSpi<'static, SPI0>) {
    info!("DAC task started");

    if let Err(e) = dac.begin(&mut spi) {
        error!("DAC bus configuration failed: {:?}", e);
        return;
    }
    info!("DAC bus at {} Hz", spi.frequency());

    loop {
        let level = DAC_LEVEL.wait().await;

        match dac.output(&mut spi, level.channel, level.sample) {
            Ok(()) => trace!("DAC {} <- {}", level.channel, level.sample),
            Err(e) => warn!("DAC write failed: {:?}", e),
        }
    }
}

//! Inter-task communication channels
//!
//! Defines the static channels used between the tick source, the UI task
//! and the DAC task. Uses embassy-sync primitives so producers never block.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use duino_drivers::dac::Channel as DacChannel;

/// Ticks the UI task may fall behind before ticks are dropped
pub const TICK_QUEUE_DEPTH: usize = 4;

/// Requested DAC output
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub struct DacLevel {
    pub channel: DacChannel,
    pub sample: u16,
}

/// Tick counter from the tick task to the UI task
pub static TICK_CHANNEL: Channel<CriticalSectionRawMutex, u32, TICK_QUEUE_DEPTH> = Channel::new();

/// Latest level requested by the application (older requests are replaced)
pub static DAC_LEVEL: Signal<CriticalSectionRawMutex, DacLevel> = Signal::new();

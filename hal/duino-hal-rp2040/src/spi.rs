//! Blocking SPI with runtime configuration
//!
//! The RP2040 SPI block is configured through embassy-rp's `Config`
//! (frequency, polarity, phase). [`RpSpi`] keeps a copy of that config and
//! re-applies it whenever one of the `duino-hal` settings changes, so
//! drivers can publish their bus requirements as a plain
//! [`duino_hal::SpiConfig`].
//!
//! Clock divisors are taken relative to [`REFERENCE_HZ`] rather than the
//! peripheral clock, so a divisor means the same bus speed it did on the
//! original 16 MHz module.

use duino_hal::spi::{Phase, Polarity};
use duino_hal::{BitOrder, ClockDivider, Mode, SpiBus};
use embassy_rp::spi::{self, Blocking, Instance, Spi};

/// Reference clock that [`ClockDivider`] values divide
pub const REFERENCE_HZ: u32 = 16_000_000;

/// SPI errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiError {
    /// Setting not supported by the RP2040 SPI block
    Unsupported,
    /// Transfer failed
    Bus,
}

/// Blocking SPI bus
pub struct RpSpi<'d, T: Instance> {
    spi: Spi<'d, T, Blocking>,
    config: spi::Config,
    reference_hz: u32,
}

impl<'d, T: Instance> RpSpi<'d, T> {
    /// Wrap a blocking embassy-rp SPI
    ///
    /// Nothing is applied until [`SpiBus::enable`] is called.
    pub fn new(spi: Spi<'d, T, Blocking>) -> Self {
        Self::with_reference(spi, REFERENCE_HZ)
    }

    /// Wrap a blocking SPI with a custom divisor reference clock
    pub fn with_reference(spi: Spi<'d, T, Blocking>, reference_hz: u32) -> Self {
        let mut config = spi::Config::default();
        config.frequency = ClockDivider::Div4.frequency(reference_hz);

        Self {
            spi,
            config,
            reference_hz,
        }
    }

    /// Currently requested bus clock in Hz
    pub fn frequency(&self) -> u32 {
        self.config.frequency
    }

    fn apply(&mut self) {
        self.spi.set_config(&self.config);
    }
}

impl<T: Instance> SpiBus for RpSpi<'_, T> {
    type Error = SpiError;

    fn enable(&mut self) -> Result<(), SpiError> {
        self.apply();
        Ok(())
    }

    fn set_bit_order(&mut self, order: BitOrder) -> Result<(), SpiError> {
        match order {
            BitOrder::MsbFirst => Ok(()),
            BitOrder::LsbFirst => {
                #[cfg(feature = "defmt")]
                defmt::warn!("RP2040 SPI cannot shift LSB first");
                Err(SpiError::Unsupported)
            }
        }
    }

    fn set_mode(&mut self, mode: Mode) -> Result<(), SpiError> {
        self.config.polarity = match mode.polarity() {
            Polarity::IdleLow => spi::Polarity::IdleLow,
            Polarity::IdleHigh => spi::Polarity::IdleHigh,
        };
        self.config.phase = match mode.phase() {
            Phase::CaptureOnFirstTransition => spi::Phase::CaptureOnFirstTransition,
            Phase::CaptureOnSecondTransition => spi::Phase::CaptureOnSecondTransition,
        };
        self.apply();
        Ok(())
    }

    fn set_clock_divider(&mut self, divider: ClockDivider) -> Result<(), SpiError> {
        self.config.frequency = divider.frequency(self.reference_hz);
        self.apply();
        Ok(())
    }

    fn transfer(&mut self, byte: u8) -> Result<u8, SpiError> {
        let mut buf = [byte];
        embedded_hal::spi::SpiBus::transfer_in_place(&mut self.spi, &mut buf)
            .map_err(|_| SpiError::Bus)?;
        Ok(buf[0])
    }
}

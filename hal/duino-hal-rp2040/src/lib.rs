//! RP2040-specific HAL for the DU-INO firmware
//!
//! This crate provides RP2040 implementations of the shared `duino-hal`
//! traits on top of embassy-rp:
//!
//! - Digital lines ([`gpio::RpOutput`], [`gpio::RpInput`])
//! - Blocking SPI with runtime bus configuration ([`spi::RpSpi`])

#![no_std]

pub mod gpio;
pub mod spi;

pub use gpio::{pull, RpInput, RpOutput};
pub use spi::{RpSpi, SpiError, REFERENCE_HZ};

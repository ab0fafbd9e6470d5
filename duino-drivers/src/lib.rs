//! Hardware driver implementations
//!
//! This crate provides concrete drivers written against the collaborator
//! traits in `duino-hal`:
//!
//! - DAC drivers (MCP4922 dual 12-bit SPI DAC)
//! - Polled quadrature encoder with push button

#![no_std]
#![deny(unsafe_code)]

pub mod dac;
pub mod encoder;

pub use dac::{Channel, Mcp4922};
pub use encoder::QuadratureEncoder;

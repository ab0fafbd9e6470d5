//! DU-INO Hardware Abstraction Layer
//!
//! This crate defines the narrow collaborator traits the DU-INO drivers and
//! UI shell are written against. Chip-specific crates (RP2040, host fakes in
//! tests) implement them, so the DAC protocol and the UI lifecycle can be
//! exercised without real hardware.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (duino-firmware, etc.)     │
//! └─────────────────────────────────────────┘
//!           │                     │
//!           ▼                     ▼
//! ┌──────────────────┐  ┌──────────────────┐
//! │  duino-drivers   │  │   duino-core     │
//! │  (MCP4922, enc)  │  │  (UI shell)      │
//! └──────────────────┘  └──────────────────┘
//!           │                     │
//!           └──────────┬──────────┘
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │  duino-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                      │
//!                      ▼
//!            ┌───────────────────┐
//!            │  duino-hal-rp2040 │
//!            └───────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital lines
//! - [`spi::SpiBus`] - Byte-oriented serial bus with runtime configuration
//! - [`display::Display`] - Buffered display controller
//! - [`encoder::Encoder`] - Polled rotary encoder with push button

#![no_std]
#![deny(unsafe_code)]

pub mod display;
pub mod encoder;
pub mod gpio;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use display::Display;
pub use encoder::{ButtonState, Encoder, EncoderPins};
pub use gpio::{InputPin, OutputPin};
pub use spi::{BitOrder, ClockDivider, Mode, SpiBus, SpiConfig};

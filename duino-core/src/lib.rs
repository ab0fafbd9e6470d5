//! Board-agnostic core logic for DU-INO control module firmware
//!
//! This crate contains the pieces of the module that do not depend on a
//! specific chip:
//!
//! - The user-interface shell that owns the display and encoder and drives
//!   the application's `setup`/`timer` hooks
//! - Board configuration types (pin assignments, tick rate) and validation

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod interface;

pub use config::{BoardConfig, ConfigError, TICK_INTERVAL_US};
pub use interface::{Application, InitState, Interface};

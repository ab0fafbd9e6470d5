//! DAC driver implementations

pub mod mcp4922;

pub use mcp4922::{command_word, Channel, Mcp4922};

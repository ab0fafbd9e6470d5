//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod dac;
pub mod tick;
pub mod ui;

pub use dac::dac_task;
pub use tick::tick_task;
pub use ui::{ui_task, Ui};

//! GPIO line wrappers
//!
//! Thin adapters from embassy-rp pins to the `duino-hal` line traits.

use embassy_rp::gpio::{Input, Output, Pull};

/// Output line
pub struct RpOutput<'d> {
    pin: Output<'d>,
}

impl<'d> RpOutput<'d> {
    /// Wrap an embassy-rp output
    pub fn new(pin: Output<'d>) -> Self {
        Self { pin }
    }

    /// Unwrap the embassy-rp output
    pub fn into_inner(self) -> Output<'d> {
        self.pin
    }
}

impl duino_hal::OutputPin for RpOutput<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}

/// Input line
pub struct RpInput<'d> {
    pin: Input<'d>,
}

impl<'d> RpInput<'d> {
    /// Wrap an embassy-rp input
    pub fn new(pin: Input<'d>) -> Self {
        Self { pin }
    }
}

impl duino_hal::InputPin for RpInput<'_> {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}

/// Pull setting for a configured line
pub fn pull(pull_up: bool) -> Pull {
    if pull_up {
        Pull::Up
    } else {
        Pull::None
    }
}

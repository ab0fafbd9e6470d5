//! Rotary encoder abstraction
//!
//! The encoder is a polled collaborator: its owner calls [`Encoder::service`]
//! once per tick and the encoder updates its own rotation and button state.
//! Readers then pick up the accumulated rotation and the button state for
//! that tick.

/// Line roles of a push-button rotary encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderPins {
    /// Quadrature pulse A
    pub a: u8,
    /// Quadrature pulse B
    pub b: u8,
    /// Push button
    pub button: u8,
}

impl EncoderPins {
    /// DU-INO front panel wiring
    pub const DEFAULT: Self = Self {
        a: 9,
        b: 10,
        button: 8,
    };
}

impl Default for EncoderPins {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Push-button state as seen on the most recent service tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonState {
    /// Released, and was released on the previous tick
    #[default]
    Open,
    /// Went down on this tick
    Pressed,
    /// Held down, and was down on the previous tick
    Closed,
    /// Came up on this tick
    Released,
}

impl ButtonState {
    /// Returns true while the button is physically down
    pub fn is_down(&self) -> bool {
        matches!(self, ButtonState::Pressed | ButtonState::Closed)
    }

    /// Returns true on the tick where the state changed
    pub fn is_edge(&self) -> bool {
        matches!(self, ButtonState::Pressed | ButtonState::Released)
    }
}

/// Polled rotary encoder with push button
pub trait Encoder {
    /// Sample the lines and advance the internal state machine
    ///
    /// Called once per timer tick. Must not block.
    fn service(&mut self);

    /// Detents turned since the last call (positive = clockwise)
    ///
    /// Reading clears the counter.
    fn take_delta(&mut self) -> i16;

    /// Button state as of the last [`Encoder::service`] call
    fn button(&self) -> ButtonState;
}

impl<T: Encoder + ?Sized> Encoder for &mut T {
    fn service(&mut self) {
        (**self).service();
    }

    fn take_delta(&mut self) -> i16 {
        (**self).take_delta()
    }

    fn button(&self) -> ButtonState {
        (**self).button()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_state_flags() {
        assert!(!ButtonState::Open.is_down());
        assert!(ButtonState::Pressed.is_down());
        assert!(ButtonState::Closed.is_down());
        assert!(!ButtonState::Released.is_down());

        assert!(ButtonState::Pressed.is_edge());
        assert!(ButtonState::Released.is_edge());
        assert!(!ButtonState::Closed.is_edge());
    }

    #[test]
    fn test_default_pins() {
        let pins = EncoderPins::default();
        assert_eq!((pins.a, pins.b, pins.button), (9, 10, 8));
    }
}

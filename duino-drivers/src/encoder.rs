//! Polled rotary encoder
//!
//! Decodes quadrature encoder signals on every service tick and tracks the
//! push button. Rotation is accumulated as a signed detent count that the
//! application drains with [`Encoder::take_delta`].
//!
//! No debouncing is done here; the state machine only rejects sequences
//! that fall back to the idle position before a detent completes.

use duino_hal::{ButtonState, Encoder, InputPin};

/// Quadrature decoder states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    CwStep1,
    CwStep2,
    CcwStep1,
    CcwStep2,
}

/// One completed detent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Cw,
    Ccw,
}

/// Quadrature encoder with push button
///
/// Both pulse lines and the button are expected to idle high (pull-ups,
/// common to ground).
pub struct QuadratureEncoder<A, B, BTN> {
    a: A,
    b: B,
    button: BTN,
    state: State,
    last_a: bool,
    last_b: bool,
    delta: i16,
    button_down: bool,
    button_state: ButtonState,
}

impl<A: InputPin, B: InputPin, BTN: InputPin> QuadratureEncoder<A, B, BTN> {
    /// Create a new encoder
    ///
    /// Samples the current line levels so the first tick does not register
    /// a spurious transition.
    pub fn new(a: A, b: B, button: BTN) -> Self {
        let last_a = a.is_high();
        let last_b = b.is_high();
        let button_down = button.is_low();

        Self {
            a,
            b,
            button,
            state: State::Idle,
            last_a,
            last_b,
            delta: 0,
            button_down,
            button_state: if button_down {
                ButtonState::Closed
            } else {
                ButtonState::Open
            },
        }
    }

    /// Detents accumulated and not yet taken
    pub fn pending(&self) -> i16 {
        self.delta
    }

    /// Decode encoder state using state machine
    ///
    /// Quadrature encoding:
    /// CW:  A leads B (A changes first when rotating clockwise)
    /// CCW: B leads A (B changes first when rotating counter-clockwise)
    ///
    /// State transitions for CW rotation:
    /// Idle (1,1) -> CwStep1 (0,1) -> CwStep2 (0,0) -> A rises -> detent -> Idle
    ///
    /// State transitions for CCW rotation:
    /// Idle (1,1) -> CcwStep1 (1,0) -> CcwStep2 (0,0) -> B rises -> detent -> Idle
    ///
    /// From a step-2 state, the line that fell second rising again is a
    /// reversal and steps back instead of counting.
    fn decode(&mut self, a: bool, b: bool) -> Option<Step> {
        match self.state {
            State::Idle => {
                if !a && b {
                    self.state = State::CwStep1;
                } else if a && !b {
                    self.state = State::CcwStep1;
                }
                None
            }
            State::CwStep1 => {
                if !a && !b {
                    self.state = State::CwStep2;
                } else if a && b {
                    self.state = State::Idle;
                }
                None
            }
            State::CwStep2 => {
                if a {
                    self.state = State::Idle;
                    return Some(Step::Cw);
                } else if b {
                    self.state = State::CwStep1;
                }
                None
            }
            State::CcwStep1 => {
                if !a && !b {
                    self.state = State::CcwStep2;
                } else if a && b {
                    self.state = State::Idle;
                }
                None
            }
            State::CcwStep2 => {
                if b {
                    self.state = State::Idle;
                    return Some(Step::Ccw);
                } else if a {
                    self.state = State::CcwStep1;
                }
                None
            }
        }
    }

    fn service_rotation(&mut self) {
        let a = self.a.is_high();
        let b = self.b.is_high();

        if a == self.last_a && b == self.last_b {
            return;
        }

        match self.decode(a, b) {
            Some(Step::Cw) => self.delta = self.delta.saturating_add(1),
            Some(Step::Ccw) => self.delta = self.delta.saturating_sub(1),
            None => {}
        }

        self.last_a = a;
        self.last_b = b;
    }

    fn service_button(&mut self) {
        let down = self.button.is_low();

        self.button_state = match (self.button_down, down) {
            (false, false) => ButtonState::Open,
            (false, true) => ButtonState::Pressed,
            (true, true) => ButtonState::Closed,
            (true, false) => ButtonState::Released,
        };
        self.button_down = down;
    }
}

impl<A: InputPin, B: InputPin, BTN: InputPin> Encoder for QuadratureEncoder<A, B, BTN> {
    fn service(&mut self) {
        self.service_rotation();
        self.service_button();
    }

    fn take_delta(&mut self) -> i16 {
        core::mem::take(&mut self.delta)
    }

    fn button(&self) -> ButtonState {
        self.button_state
    }
}

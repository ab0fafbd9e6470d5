//! User-interface shell
//!
//! [`Interface`] owns the module's display and encoder and hands control to
//! an [`Application`] at two points:
//!
//! - once, from [`Interface::begin`], after the display has been brought up
//!   and blanked (`setup`)
//! - on every timer tick, from [`Interface::timer_isr`], after the encoder
//!   has been serviced (`timer`)
//!
//! ```text
//!            begin()                      timer_isr()  (every tick)
//!               │                               │
//!   Uninitialized ──► display.begin()           ├──► encoder.service()
//!               │     display.clear_display()   │
//!               │     display.display()         └──► app.timer()
//!               │     app.setup()
//!               ▼
//!             Ready ── begin() again: no-op
//! ```
//!
//! `timer_isr` runs in the tick context, so neither the shell nor the
//! encoder service blocks or allocates. The application's `timer` hook is
//! held to the same rule.

use duino_hal::{Display, Encoder};

/// Initialization state of the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitState {
    /// Display not brought up, application setup not run
    #[default]
    Uninitialized,
    /// Display up and application setup done
    Ready,
}

/// Application extension points
///
/// Both hooks borrow the shell's display and encoder for the duration of
/// the call.
pub trait Application<D, E> {
    /// First-time configuration, run exactly once from [`Interface::begin`]
    ///
    /// Typically draws the initial screen.
    fn setup(&mut self, display: &mut D, encoder: &mut E);

    /// Periodic work, run on every tick after the encoder has been serviced
    ///
    /// Must not block: this runs in the tick context.
    fn timer(&mut self, display: &mut D, encoder: &mut E);
}

/// UI shell owning the display, the encoder and the application
pub struct Interface<D, E, A> {
    display: D,
    encoder: E,
    app: A,
    state: InitState,
}

impl<D, E, A> Interface<D, E, A>
where
    D: Display,
    E: Encoder,
    A: Application<D, E>,
{
    /// Create a new shell
    ///
    /// Nothing is initialized yet; call [`Interface::begin`] before arming
    /// the tick source.
    pub fn new(display: D, encoder: E, app: A) -> Self {
        Self {
            display,
            encoder,
            app,
            state: InitState::Uninitialized,
        }
    }

    /// Bring up the display and run the application's setup
    ///
    /// Only the first successful call does anything; later calls return
    /// `Ok(())` immediately. If the display fails to come up the error is
    /// returned, setup is not run and the shell stays
    /// [`InitState::Uninitialized`] so the call can be retried.
    pub fn begin(&mut self) -> Result<(), D::Error> {
        if self.state == InitState::Ready {
            return Ok(());
        }

        self.display.begin()?;
        self.display.clear_display();
        self.display.display()?;

        self.app.setup(&mut self.display, &mut self.encoder);
        self.state = InitState::Ready;

        Ok(())
    }

    /// Service one timer tick
    ///
    /// Updates the encoder, then runs the application's `timer` hook, so the
    /// hook always sees this tick's input. Ticks delivered before
    /// [`Interface::begin`] has succeeded are ignored.
    pub fn timer_isr(&mut self) {
        if self.state != InitState::Ready {
            return;
        }

        self.encoder.service();
        self.app.timer(&mut self.display, &mut self.encoder);
    }

    /// Current initialization state
    pub fn state(&self) -> InitState {
        self.state
    }

    /// Check if [`Interface::begin`] has completed
    pub fn is_ready(&self) -> bool {
        self.state == InitState::Ready
    }

    /// The owned display
    pub fn display(&self) -> &D {
        &self.display
    }

    /// The owned encoder
    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    /// The application
    pub fn app(&self) -> &A {
        &self.app
    }

    /// The application, mutably
    pub fn app_mut(&mut self) -> &mut A {
        &mut self.app
    }

    /// Tear the shell apart into display, encoder and application
    pub fn into_parts(self) -> (D, E, A) {
        (self.display, self.encoder, self.app)
    }
}

//! Display controller abstraction
//!
//! The UI shell only needs the bring-up and frame-buffer lifecycle of the
//! display: start the controller, clear the in-memory buffer, push the
//! buffer to the panel. Drawing into the buffer is up to the application and
//! the concrete driver.

/// Buffered display controller
pub trait Display {
    /// Error type for bus traffic to the panel
    type Error;

    /// Bring up the display bus and run the controller init sequence
    fn begin(&mut self) -> Result<(), Self::Error>;

    /// Clear the in-memory pixel buffer
    ///
    /// Does not touch the panel until [`Display::display`] is called.
    fn clear_display(&mut self);

    /// Present the in-memory buffer on the panel
    fn display(&mut self) -> Result<(), Self::Error>;
}

impl<T: Display + ?Sized> Display for &mut T {
    type Error = T::Error;

    fn begin(&mut self) -> Result<(), Self::Error> {
        (**self).begin()
    }

    fn clear_display(&mut self) {
        (**self).clear_display();
    }

    fn display(&mut self) -> Result<(), Self::Error> {
        (**self).display()
    }
}

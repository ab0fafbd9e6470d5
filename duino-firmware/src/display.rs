//! SSD1306 OLED adapter
//!
//! Wraps the `ssd1306` crate's buffered graphics mode so the UI shell can
//! drive it through `duino_hal::Display`. Applications draw into the buffer
//! with embedded-graphics through [`Oled::canvas`].

use duino_hal::Display;
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::{I2CDisplayInterface, Ssd1306};

/// Blocking I2C bus the panel sits on
pub type OledI2c = I2c<'static, I2C0, Blocking>;

/// Buffered SSD1306 driver type
pub type Panel =
    Ssd1306<I2CInterface<OledI2c>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Display faults
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum DisplayFault {
    /// Controller init sequence failed
    Init,
    /// Buffer transfer failed
    Flush,
}

/// 128x64 OLED on I2C
pub struct Oled {
    panel: Panel,
}

impl Oled {
    /// Create the adapter; the panel is not touched until `begin`
    pub fn new(i2c: OledI2c) -> Self {
        let interface = I2CDisplayInterface::new(i2c);
        let panel = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();

        Self { panel }
    }

    /// Draw target backed by the in-memory buffer
    pub fn canvas(&mut self) -> &mut Panel {
        &mut self.panel
    }
}

impl Display for Oled {
    type Error = DisplayFault;

    fn begin(&mut self) -> Result<(), DisplayFault> {
        self.panel.init().map_err(|_| DisplayFault::Init)
    }

    fn clear_display(&mut self) {
        self.panel.clear_buffer();
    }

    fn display(&mut self) -> Result<(), DisplayFault> {
        self.panel.flush().map_err(|_| DisplayFault::Flush)
    }
}

//! CV source application
//!
//! Turns the encoder into a manual control-voltage source: each detent
//! moves the output level, a button press switches between DAC channels A
//! and B. Level changes are handed to the DAC task; nothing here touches
//! the SPI bus, so the timer hook stays short.

use defmt::*;
use duino_core::Application;
use duino_drivers::dac::{mcp4922::MAX_SAMPLE, Channel};
use duino_hal::{ButtonState, Display, Encoder};
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};

use crate::channels::{DacLevel, DAC_LEVEL};
use crate::display::Oled;
use crate::tasks::ui::PanelEncoder;

/// DAC codes per encoder detent
const STEP: i32 = 16;

/// Manual CV source
pub struct CvApp {
    channel: Channel,
    level: u16,
}

impl CvApp {
    /// Start at mid-scale on channel A
    pub fn new() -> Self {
        Self {
            channel: Channel::A,
            level: (MAX_SAMPLE + 1) / 2,
        }
    }

    fn publish(&self) {
        DAC_LEVEL.signal(DacLevel {
            channel: self.channel,
            sample: self.level,
        });
    }
}

/// Move a level by a number of detents, clamped to the DAC range
fn adjust(level: u16, delta: i16) -> u16 {
    let moved = level as i32 + delta as i32 * STEP;
    moved.clamp(0, MAX_SAMPLE as i32) as u16
}

impl Application<Oled, PanelEncoder> for CvApp {
    fn setup(&mut self, display: &mut Oled, _encoder: &mut PanelEncoder) {
        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        let title = Text::with_baseline("DU-INO CV", Point::zero(), style, Baseline::Top);

        if title.draw(display.canvas()).is_err() || display.display().is_err() {
            warn!("Failed to draw title screen");
        }

        info!("CV app ready: {} = {}", self.channel, self.level);
        self.publish();
    }

    fn timer(&mut self, _display: &mut Oled, encoder: &mut PanelEncoder) {
        let mut changed = false;

        let delta = encoder.take_delta();
        if delta != 0 {
            self.level = adjust(self.level, delta);
            changed = true;
        }

        if encoder.button() == ButtonState::Pressed {
            self.channel = match self.channel {
                Channel::A => Channel::B,
                Channel::B => Channel::A,
            };
            changed = true;
        }

        if changed {
            self.publish();
        }
    }
}

//! Board configuration
//!
//! Pin assignments and timing for a DU-INO module. The defaults map the
//! original front panel wiring (encoder on 9/10/8) onto RP2040 GPIOs; the
//! firmware validates the configuration once at boot before claiming any
//! peripheral.

use duino_hal::EncoderPins;
use heapless::FnvIndexSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of user GPIOs on the RP2040
pub const GPIO_COUNT: u8 = 30;

/// UI tick period in microseconds
///
/// The encoder is sampled once per tick, so this bounds how fast it can be
/// turned without losing detents.
pub const TICK_INTERVAL_US: u32 = 1_000;

/// Single pin assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// GPIO pin number (0-29 for RP2040)
    pub pin: u8,
    /// Enable internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            pull_up: false,
        }
    }

    /// Create a pin with pull-up enabled
    pub const fn with_pullup(pin: u8) -> Self {
        Self { pin, pull_up: true }
    }
}

/// DAC bus wiring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DacPins {
    /// Chip select (active low)
    pub cs: PinConfig,
    /// Bus clock
    pub sck: PinConfig,
    /// Bus data out
    pub mosi: PinConfig,
}

/// Display bus wiring (I2C)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayPins {
    pub sda: PinConfig,
    pub scl: PinConfig,
}

/// Encoder wiring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EncoderPinConfig {
    pub a: PinConfig,
    pub b: PinConfig,
    pub button: PinConfig,
}

impl EncoderPinConfig {
    /// Encoder on the given lines, all pulled up
    pub const fn pulled_up(pins: EncoderPins) -> Self {
        Self {
            a: PinConfig::with_pullup(pins.a),
            b: PinConfig::with_pullup(pins.b),
            button: PinConfig::with_pullup(pins.button),
        }
    }

    /// Line roles without electrical options
    pub fn pins(&self) -> EncoderPins {
        EncoderPins {
            a: self.a.pin,
            b: self.b.pin,
            button: self.button.pin,
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Pin number does not exist on the chip
    PinOutOfRange(u8),
    /// Same pin assigned to two roles
    PinConflict(u8),
    /// Tick interval of zero
    InvalidTickInterval,
    /// Configured pin differs from the pin the firmware actually claims
    WiringMismatch { configured: u8, wired: u8 },
}

/// Complete board configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoardConfig {
    pub dac: DacPins,
    pub display: DisplayPins,
    pub encoder: EncoderPinConfig,
    /// UI tick period in microseconds
    pub tick_interval_us: u32,
}

impl BoardConfig {
    /// DU-INO wiring on an RP2040 (SPI0 for the DAC, I2C0 for the OLED)
    pub const DEFAULT: Self = Self {
        dac: DacPins {
            cs: PinConfig::new(17),
            sck: PinConfig::new(18),
            mosi: PinConfig::new(19),
        },
        display: DisplayPins {
            sda: PinConfig::new(4),
            scl: PinConfig::new(5),
        },
        encoder: EncoderPinConfig::pulled_up(EncoderPins::DEFAULT),
        tick_interval_us: TICK_INTERVAL_US,
    };

    /// Every assigned pin, in declaration order
    pub fn pins(&self) -> [u8; 8] {
        [
            self.dac.cs.pin,
            self.dac.sck.pin,
            self.dac.mosi.pin,
            self.display.sda.pin,
            self.display.scl.pin,
            self.encoder.a.pin,
            self.encoder.b.pin,
            self.encoder.button.pin,
        ]
    }

    /// Check pin ranges, pin conflicts and timing
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_us == 0 {
            return Err(ConfigError::InvalidTickInterval);
        }

        let mut allocated: FnvIndexSet<u8, 32> = FnvIndexSet::new();
        for pin in self.pins() {
            if pin >= GPIO_COUNT {
                return Err(ConfigError::PinOutOfRange(pin));
            }
            match allocated.insert(pin) {
                Ok(true) => {}
                Ok(false) => return Err(ConfigError::PinConflict(pin)),
                // GPIO_COUNT fits, so the set never fills
                Err(_) => return Err(ConfigError::PinOutOfRange(pin)),
            }
        }

        Ok(())
    }

    /// Check the configuration against the pins a board build claims
    ///
    /// `wired` is in [`BoardConfig::pins`] order. Peripheral pins are typed
    /// at compile time on the RP2040, so the firmware states what it claims
    /// and checks it here at boot.
    pub fn check_wiring(&self, wired: &[u8; 8]) -> Result<(), ConfigError> {
        for (configured, &wired) in self.pins().into_iter().zip(wired) {
            if configured != wired {
                return Err(ConfigError::WiringMismatch { configured, wired });
            }
        }

        Ok(())
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

//! Serial peripheral bus abstractions
//!
//! The bus is modelled the way small microcontroller SPI blocks expose it:
//! a handful of global settings applied at start-up plus a blocking
//! single-byte exchange. Devices sharing the bus all see the same settings;
//! there is no per-transfer reconfiguration.

/// SPI bus master
///
/// Provides bus-wide configuration and a blocking byte exchange for
/// communicating with peripheral devices. Chip-select lines are not part of
/// the bus; each device driver owns its own.
pub trait SpiBus {
    /// Error type for bus operations
    type Error;

    /// Enable the bus peripheral
    fn enable(&mut self) -> Result<(), Self::Error>;

    /// Select the bit order used for every byte on the bus
    fn set_bit_order(&mut self, order: BitOrder) -> Result<(), Self::Error>;

    /// Select clock polarity and phase
    fn set_mode(&mut self, mode: Mode) -> Result<(), Self::Error>;

    /// Select the clock rate as a divisor of the bus reference clock
    fn set_clock_divider(&mut self, divider: ClockDivider) -> Result<(), Self::Error>;

    /// Clock one byte out and return the byte clocked in at the same time
    ///
    /// Blocks until the full byte has been shifted.
    fn transfer(&mut self, byte: u8) -> Result<u8, Self::Error>;
}

impl<T: SpiBus + ?Sized> SpiBus for &mut T {
    type Error = T::Error;

    fn enable(&mut self) -> Result<(), Self::Error> {
        (**self).enable()
    }

    fn set_bit_order(&mut self, order: BitOrder) -> Result<(), Self::Error> {
        (**self).set_bit_order(order)
    }

    fn set_mode(&mut self, mode: Mode) -> Result<(), Self::Error> {
        (**self).set_mode(mode)
    }

    fn set_clock_divider(&mut self, divider: ClockDivider) -> Result<(), Self::Error> {
        (**self).set_clock_divider(divider)
    }

    fn transfer(&mut self, byte: u8) -> Result<u8, Self::Error> {
        (**self).transfer(byte)
    }
}

/// Order in which the bits of each byte are shifted out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitOrder {
    /// Most significant bit first
    MsbFirst,
    /// Least significant bit first
    LsbFirst,
}

/// SPI clock polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Clock idles low (CPOL=0)
    IdleLow,
    /// Clock idles high (CPOL=1)
    IdleHigh,
}

/// SPI clock phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Data captured on first clock transition (CPHA=0)
    CaptureOnFirstTransition,
    /// Data captured on second clock transition (CPHA=1)
    CaptureOnSecondTransition,
}

/// SPI mode (combined polarity and phase)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Mode 0: CPOL=0, CPHA=0
    Mode0,
    /// Mode 1: CPOL=0, CPHA=1
    Mode1,
    /// Mode 2: CPOL=1, CPHA=0
    Mode2,
    /// Mode 3: CPOL=1, CPHA=1
    Mode3,
}

impl Mode {
    /// Clock polarity of this mode
    pub fn polarity(self) -> Polarity {
        let (polarity, _): (Polarity, Phase) = self.into();
        polarity
    }

    /// Clock phase of this mode
    pub fn phase(self) -> Phase {
        let (_, phase): (Polarity, Phase) = self.into();
        phase
    }
}

impl From<Mode> for (Polarity, Phase) {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Mode0 => (Polarity::IdleLow, Phase::CaptureOnFirstTransition),
            Mode::Mode1 => (Polarity::IdleLow, Phase::CaptureOnSecondTransition),
            Mode::Mode2 => (Polarity::IdleHigh, Phase::CaptureOnFirstTransition),
            Mode::Mode3 => (Polarity::IdleHigh, Phase::CaptureOnSecondTransition),
        }
    }
}

/// Bus clock divisor relative to the reference clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ClockDivider {
    Div2 = 2,
    Div4 = 4,
    Div8 = 8,
    Div16 = 16,
    Div32 = 32,
    Div64 = 64,
    Div128 = 128,
}

impl ClockDivider {
    /// Divisor as an integer
    pub fn divisor(self) -> u32 {
        self as u32
    }

    /// Resulting bus clock for a given reference clock
    pub fn frequency(self, reference_hz: u32) -> u32 {
        reference_hz / self.divisor()
    }
}

/// Complete bus configuration
///
/// Bundles the three global settings a device class needs so a driver can
/// publish its requirements as a single constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiConfig {
    /// Bit order for every byte
    pub bit_order: BitOrder,
    /// Clock polarity and phase
    pub mode: Mode,
    /// Clock divisor
    pub divider: ClockDivider,
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self {
            bit_order: BitOrder::MsbFirst,
            mode: Mode::Mode0,
            divider: ClockDivider::Div4,
        }
    }
}

impl SpiConfig {
    /// Enable the bus and apply this configuration
    ///
    /// Settings are applied in a fixed order: enable, bit order, mode,
    /// clock divisor.
    pub fn apply<S: SpiBus + ?Sized>(&self, bus: &mut S) -> Result<(), S::Error> {
        bus.enable()?;
        bus.set_bit_order(self.bit_order)?;
        bus.set_mode(self.mode)?;
        bus.set_clock_divider(self.divider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Setting {
        Enable,
        BitOrder(BitOrder),
        Mode(Mode),
        Divider(ClockDivider),
    }

    struct RecordingBus {
        settings: [Option<Setting>; 4],
        count: usize,
    }

    impl RecordingBus {
        fn new() -> Self {
            Self {
                settings: [None; 4],
                count: 0,
            }
        }

        fn record(&mut self, setting: Setting) -> Result<(), ()> {
            if self.count >= self.settings.len() {
                return Err(());
            }
            self.settings[self.count] = Some(setting);
            self.count += 1;
            Ok(())
        }
    }

    impl SpiBus for RecordingBus {
        type Error = ();

        fn enable(&mut self) -> Result<(), ()> {
            self.record(Setting::Enable)
        }

        fn set_bit_order(&mut self, order: BitOrder) -> Result<(), ()> {
            self.record(Setting::BitOrder(order))
        }

        fn set_mode(&mut self, mode: Mode) -> Result<(), ()> {
            self.record(Setting::Mode(mode))
        }

        fn set_clock_divider(&mut self, divider: ClockDivider) -> Result<(), ()> {
            self.record(Setting::Divider(divider))
        }

        fn transfer(&mut self, byte: u8) -> Result<u8, ()> {
            Ok(byte)
        }
    }

    #[test]
    fn test_apply_order() {
        let mut bus = RecordingBus::new();
        let config = SpiConfig {
            bit_order: BitOrder::MsbFirst,
            mode: Mode::Mode0,
            divider: ClockDivider::Div2,
        };

        config.apply(&mut bus).unwrap();

        assert_eq!(
            bus.settings,
            [
                Some(Setting::Enable),
                Some(Setting::BitOrder(BitOrder::MsbFirst)),
                Some(Setting::Mode(Mode::Mode0)),
                Some(Setting::Divider(ClockDivider::Div2)),
            ]
        );
    }

    #[test]
    fn test_apply_stops_on_error() {
        let mut bus = RecordingBus::new();
        bus.count = 3;

        // Only one slot left: enable succeeds, bit order fails
        assert!(SpiConfig::default().apply(&mut bus).is_err());
        assert_eq!(bus.settings[3], Some(Setting::Enable));
    }

    #[test]
    fn test_mode_polarity_phase() {
        assert_eq!(Mode::Mode0.polarity(), Polarity::IdleLow);
        assert_eq!(Mode::Mode0.phase(), Phase::CaptureOnFirstTransition);
        assert_eq!(Mode::Mode3.polarity(), Polarity::IdleHigh);
        assert_eq!(Mode::Mode3.phase(), Phase::CaptureOnSecondTransition);
    }

    #[test]
    fn test_divider_frequency() {
        assert_eq!(ClockDivider::Div2.frequency(16_000_000), 8_000_000);
        assert_eq!(ClockDivider::Div128.frequency(16_000_000), 125_000);
        assert_eq!(ClockDivider::Div16.divisor(), 16);
    }
}

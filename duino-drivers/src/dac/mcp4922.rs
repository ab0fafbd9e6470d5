//! MCP4922 dual 12-bit DAC (SPI)
//!
//! The MCP4922 takes one 16-bit command per conversion, framed by its
//! chip-select line:
//!
//! ```text
//!  15    14    13    12    11 ............... 0
//! ┌─────┬─────┬─────┬──────┬───────────────────┐
//! │ A/B │ BUF │ /GA │/SHDN │ D11 ........ D0   │
//! └─────┴─────┴─────┴──────┴───────────────────┘
//! ```
//!
//! The driver always sends `BUF | /GA | /SHDN` = `0b111`, so the control
//! field is a constant and only the channel bit and the sample vary. The
//! word is clocked out MSB first as two bytes, high byte first, in SPI
//! mode 0.
//!
//! # Usage
//!
//! ```ignore
//! let mut dac = Mcp4922::new(cs_pin);
//! dac.begin(&mut spi)?;
//!
//! dac.output(&mut spi, Channel::A, 2048)?; // mid-scale
//! ```
//!
//! The bus is borrowed per call rather than owned, so several devices can
//! share it. Holding `&mut` to the bus for the whole call is what keeps
//! another transfer from landing inside this device's chip-select window.

use duino_hal::{BitOrder, ClockDivider, Mode, OutputPin, SpiBus, SpiConfig};

/// Command word bit positions
pub mod bits {
    /// Channel select (0 = A, 1 = B)
    pub const CHANNEL: u16 = 15;
    /// Reference input buffer control
    pub const BUF: u16 = 14;
    /// Output gain select (1 = 1x)
    pub const GA: u16 = 13;
    /// Output shutdown control (1 = active)
    pub const SHDN: u16 = 12;
    /// Mask for the 12-bit sample field
    pub const DATA_MASK: u16 = 0x0FFF;
}

/// Fixed control field sent with every sample
pub const CONTROL_BITS: u16 = (1 << bits::BUF) | (1 << bits::GA) | (1 << bits::SHDN);

/// Full-scale sample value
pub const MAX_SAMPLE: u16 = bits::DATA_MASK;

/// DAC output channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Channel {
    A = 0,
    B = 1,
}

impl Channel {
    /// Both channels, in output order
    pub const ALL: [Channel; 2] = [Channel::A, Channel::B];

    /// Channel number (0 for A, 1 for B)
    pub fn index(self) -> u8 {
        self as u8
    }
}

/// Map an integer selector onto a channel by its lowest bit
///
/// Only bit 0 survives the shift into bit 15 of the command word, so 2 maps
/// to A and 3 maps to B.
impl From<u8> for Channel {
    fn from(value: u8) -> Self {
        if value & 1 == 0 {
            Channel::A
        } else {
            Channel::B
        }
    }
}

/// Build the 16-bit command word for a sample
///
/// Bits above the 12-bit sample field are discarded (4096 wraps to 0).
pub fn command_word(channel: Channel, sample: u16) -> u16 {
    ((channel as u16) << bits::CHANNEL) | CONTROL_BITS | (sample & bits::DATA_MASK)
}

/// MCP4922 driver
///
/// Owns the device's chip-select line. The line is held high (deselected)
/// except while a command word is on the bus.
pub struct Mcp4922<CS> {
    cs: CS,
}

impl<CS: OutputPin> Mcp4922<CS> {
    /// Bus settings required by the MCP4922
    ///
    /// Mode 0 at half the reference clock; the part accepts up to 20 MHz.
    pub const BUS_CONFIG: SpiConfig = SpiConfig {
        bit_order: BitOrder::MsbFirst,
        mode: Mode::Mode0,
        divider: ClockDivider::Div2,
    };

    /// Create a new driver
    ///
    /// The chip-select line is driven high immediately so the shared bus is
    /// not claimed.
    pub fn new(mut cs: CS) -> Self {
        cs.set_high();
        Self { cs }
    }

    /// Configure the shared bus for this device class
    ///
    /// The configuration is bus-global. Every device sharing the bus must
    /// tolerate the same settings.
    pub fn begin<S: SpiBus>(&mut self, spi: &mut S) -> Result<(), S::Error> {
        self.cs.set_high();
        Self::BUS_CONFIG.apply(spi)
    }

    /// Write a sample to one channel
    ///
    /// Only the low 12 bits of `sample` are used. Chip-select is released
    /// after the second byte, and also when the bus fails part way through.
    pub fn output<S: SpiBus>(
        &mut self,
        spi: &mut S,
        channel: Channel,
        sample: u16,
    ) -> Result<(), S::Error> {
        let [high, low] = command_word(channel, sample).to_be_bytes();

        self.cs.set_low();
        let result = spi.transfer(high).and_then(|_| spi.transfer(low));
        self.cs.set_high();

        result.map(|_| ())
    }

    /// Write both channels, A then B
    ///
    /// Each channel is its own transaction with its own chip-select window.
    pub fn output_both<S: SpiBus>(
        &mut self,
        spi: &mut S,
        sample_a: u16,
        sample_b: u16,
    ) -> Result<(), S::Error> {
        self.output(spi, Channel::A, sample_a)?;
        self.output(spi, Channel::B, sample_b)
    }

    /// Check that the device is currently deselected
    pub fn is_idle(&self) -> bool {
        self.cs.is_set_high()
    }

    /// Release the chip-select line
    pub fn release(self) -> CS {
        self.cs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;
    use heapless::Vec;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Event {
        CsHigh,
        CsLow,
        Enable,
        BitOrder(BitOrder),
        Mode(Mode),
        Divider(ClockDivider),
        Byte(u8),
    }

    type Log = RefCell<Vec<Event, 32>>;

    /// Mock chip-select line sharing a log with the bus
    struct MockCs<'a> {
        log: &'a Log,
        high: bool,
    }

    impl OutputPin for MockCs<'_> {
        fn set_high(&mut self) {
            self.high = true;
            self.log.borrow_mut().push(Event::CsHigh).unwrap();
        }

        fn set_low(&mut self) {
            self.high = false;
            self.log.borrow_mut().push(Event::CsLow).unwrap();
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    #[derive(Debug, PartialEq, Eq)]
    struct BusFault;

    /// Mock bus; fails the transfer with the given index when set
    struct MockBus<'a> {
        log: &'a Log,
        fail_at: Option<usize>,
        transfers: usize,
    }

    impl<'a> MockBus<'a> {
        fn new(log: &'a Log) -> Self {
            Self {
                log,
                fail_at: None,
                transfers: 0,
            }
        }

        fn record(&self, event: Event) -> Result<(), BusFault> {
            self.log.borrow_mut().push(event).unwrap();
            Ok(())
        }
    }

    impl SpiBus for MockBus<'_> {
        type Error = BusFault;

        fn enable(&mut self) -> Result<(), BusFault> {
            self.record(Event::Enable)
        }

        fn set_bit_order(&mut self, order: BitOrder) -> Result<(), BusFault> {
            self.record(Event::BitOrder(order))
        }

        fn set_mode(&mut self, mode: Mode) -> Result<(), BusFault> {
            self.record(Event::Mode(mode))
        }

        fn set_clock_divider(&mut self, divider: ClockDivider) -> Result<(), BusFault> {
            self.record(Event::Divider(divider))
        }

        fn transfer(&mut self, byte: u8) -> Result<u8, BusFault> {
            let index = self.transfers;
            self.transfers += 1;
            if self.fail_at == Some(index) {
                return Err(BusFault);
            }
            self.record(Event::Byte(byte))?;
            Ok(0)
        }
    }

    fn events(log: &Log) -> Vec<Event, 32> {
        log.borrow().clone()
    }

    #[test]
    fn test_command_word_scenarios() {
        assert_eq!(command_word(Channel::A, 0), 0x7000);
        assert_eq!(command_word(Channel::B, 4095), 0xFFFF);
        assert_eq!(command_word(Channel::A, 2048), 0x7800);
    }

    #[test]
    fn test_command_word_wraps() {
        assert_eq!(command_word(Channel::A, 4095) & 0x0FFF, 0x0FFF);
        assert_eq!(command_word(Channel::A, 4096) & 0x0FFF, 0x0000);
        assert_eq!(command_word(Channel::B, 0xFFFF), 0xFFFF);
    }

    #[test]
    fn test_command_word_all_values() {
        for channel in Channel::ALL {
            for value in 0..=u16::MAX {
                let expected = ((channel as u16) << 15) | 0b111_0000_0000_0000 | (value & 0xFFF);
                assert_eq!(command_word(channel, value), expected);
            }
        }
    }

    #[test]
    fn test_channel_from_selector() {
        assert_eq!(Channel::from(0), Channel::A);
        assert_eq!(Channel::from(1), Channel::B);
        assert_eq!(Channel::from(2), Channel::A);
        assert_eq!(Channel::from(3), Channel::B);
        assert_eq!(Channel::B.index(), 1);
    }

    #[test]
    fn test_new_deselects() {
        let log = Log::default();
        let dac = Mcp4922::new(MockCs { log: &log, high: false });

        assert!(dac.is_idle());
        assert_eq!(events(&log), [Event::CsHigh]);
    }

    #[test]
    fn test_begin_configures_bus() {
        let log = Log::default();
        let mut dac = Mcp4922::new(MockCs { log: &log, high: false });
        let mut bus = MockBus::new(&log);
        log.borrow_mut().clear();

        dac.begin(&mut bus).unwrap();

        assert_eq!(
            events(&log),
            [
                Event::CsHigh,
                Event::Enable,
                Event::BitOrder(BitOrder::MsbFirst),
                Event::Mode(Mode::Mode0),
                Event::Divider(ClockDivider::Div2),
            ]
        );
        assert!(dac.is_idle());
    }

    #[test]
    fn test_output_frames_word() {
        let log = Log::default();
        let mut dac = Mcp4922::new(MockCs { log: &log, high: false });
        let mut bus = MockBus::new(&log);
        log.borrow_mut().clear();

        dac.output(&mut bus, Channel::A, 2048).unwrap();

        assert_eq!(
            events(&log),
            [
                Event::CsLow,
                Event::Byte(0x78),
                Event::Byte(0x00),
                Event::CsHigh,
            ]
        );
        assert!(dac.is_idle());
    }

    #[test]
    fn test_output_channel_b_truncates() {
        let log = Log::default();
        let mut dac = Mcp4922::new(MockCs { log: &log, high: false });
        let mut bus = MockBus::new(&log);
        log.borrow_mut().clear();

        // 0x1ABC -> 0xABC
        dac.output(&mut bus, Channel::B, 0x1ABC).unwrap();

        assert_eq!(
            events(&log),
            [
                Event::CsLow,
                Event::Byte(0xFA),
                Event::Byte(0xBC),
                Event::CsHigh,
            ]
        );
    }

    #[test]
    fn test_output_both_uses_two_windows() {
        let log = Log::default();
        let mut dac = Mcp4922::new(MockCs { log: &log, high: false });
        let mut bus = MockBus::new(&log);
        log.borrow_mut().clear();

        dac.output_both(&mut bus, 0, 4095).unwrap();

        assert_eq!(
            events(&log),
            [
                Event::CsLow,
                Event::Byte(0x70),
                Event::Byte(0x00),
                Event::CsHigh,
                Event::CsLow,
                Event::Byte(0xFF),
                Event::Byte(0xFF),
                Event::CsHigh,
            ]
        );
    }

    #[test]
    fn test_bus_error_releases_chip_select() {
        let log = Log::default();
        let mut dac = Mcp4922::new(MockCs { log: &log, high: false });
        let mut bus = MockBus::new(&log);
        bus.fail_at = Some(1);
        log.borrow_mut().clear();

        assert_eq!(dac.output(&mut bus, Channel::A, 1), Err(BusFault));

        assert_eq!(
            events(&log),
            [Event::CsLow, Event::Byte(0x70), Event::CsHigh]
        );
        assert!(dac.is_idle());
    }

    #[test]
    fn test_failed_first_byte_skips_second() {
        let log = Log::default();
        let mut dac = Mcp4922::new(MockCs { log: &log, high: false });
        let mut bus = MockBus::new(&log);
        bus.fail_at = Some(0);
        log.borrow_mut().clear();

        assert!(dac.output(&mut bus, Channel::B, 1).is_err());

        assert_eq!(events(&log), [Event::CsLow, Event::CsHigh]);
        assert_eq!(bus.transfers, 1);
    }

    #[test]
    fn test_release_returns_line() {
        let log = Log::default();
        let dac = Mcp4922::new(MockCs { log: &log, high: false });

        let cs = dac.release();
        assert!(cs.is_set_high());
    }
}

//! Strongly typed parameter enumerations for the MCP3911 driver.
//!
//! These enums map directly to datasheet field encodings and are used across
//! [`Config`](crate::config::Config) and the high-level driver APIs. Prefer these
//! types over raw integers to keep configuration values valid and explicit.
//!
//! # Examples
//!
//! ```rust
//! use mcp3911::params::{Channel, Osr, PgaGain};
//!
//! let channel = Channel::Ch0;
//! let gain = PgaGain::X8;
//! let osr = Osr::R256;
//! let _ = (channel, gain, osr);
//! ```

use modular_bitfield::prelude::Specifier;

use crate::error::InvalidChannel;
use crate::registers::{REG_CHANNEL0, REG_CHANNEL1, REG_OFFCAL_CH0, REG_OFFCAL_CH1};

/// The two converter channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    /// Channel 0.
    Ch0,
    /// Channel 1.
    Ch1,
}

impl Channel {
    /// Returns the address of the channel's 24-bit data register.
    pub const fn data_register(self) -> u8 {
        match self {
            Self::Ch0 => REG_CHANNEL0,
            Self::Ch1 => REG_CHANNEL1,
        }
    }

    /// Returns the address of the channel's offset calibration register.
    pub const fn offset_register(self) -> u8 {
        match self {
            Self::Ch0 => REG_OFFCAL_CH0,
            Self::Ch1 => REG_OFFCAL_CH1,
        }
    }

    /// Returns the channel index (0 or 1).
    pub const fn index(self) -> u8 {
        match self {
            Self::Ch0 => 0,
            Self::Ch1 => 1,
        }
    }
}

impl TryFrom<u8> for Channel {
    type Error = InvalidChannel;

    fn try_from(index: u8) -> core::result::Result<Self, Self::Error> {
        match index {
            0 => Ok(Self::Ch0),
            1 => Ok(Self::Ch1),
            _ => Err(InvalidChannel),
        }
    }
}

/// Programmable gain amplifier selections (`GAIN.PGA_CHn`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 3]
pub enum PgaGain {
    /// Gain of 1 (input range ±0.6 V).
    X1 = 0b000,
    /// Gain of 2.
    X2 = 0b001,
    /// Gain of 4.
    X4 = 0b010,
    /// Gain of 8.
    X8 = 0b011,
    /// Gain of 16.
    X16 = 0b100,
    /// Gain of 32.
    X32 = 0b101,
    /// Reserved code, decoded by the converter as gain of 1.
    X1Alt6 = 0b110,
    /// Reserved code, decoded by the converter as gain of 1.
    X1Alt7 = 0b111,
}

impl PgaGain {
    /// Returns the amplification factor applied ahead of the modulator.
    ///
    /// The two reserved codes decode as unity gain, exactly as the converter
    /// treats them; the mapping is a table, not a power-of-two rule.
    pub const fn multiplier(self) -> u8 {
        match self {
            Self::X1 | Self::X1Alt6 | Self::X1Alt7 => 1,
            Self::X2 => 2,
            Self::X4 => 4,
            Self::X8 => 8,
            Self::X16 => 16,
            Self::X32 => 32,
        }
    }
}

/// Bias current boost selections (`GAIN.BOOST`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum Boost {
    /// All channels at half bias current.
    X0_5 = 0b00,
    /// All channels at two-thirds bias current.
    X0_66 = 0b01,
    /// Nominal bias current.
    X1 = 0b10,
    /// Doubled bias current for the fastest master clocks.
    X2 = 0b11,
}

/// Per-channel selection mask used by the reset, shutdown, and modulator
/// output fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum ChannelSelection {
    /// Neither channel selected.
    Neither = 0b00,
    /// Channel 0 only.
    Ch0 = 0b01,
    /// Channel 1 only.
    Ch1 = 0b10,
    /// Both channels.
    Both = 0b11,
}

/// Data-ready pin idle behaviour (`STATUSCOM.DR_HIZ`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum DataReadyPull {
    /// Pin floats between pulses; needs an external pull-up.
    HighImpedance = 0,
    /// Pin is driven logic high between pulses.
    LogicHigh = 1,
}

/// Data-ready link mode (`STATUSCOM.DRMODE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum DataReadyMode {
    /// Pulse follows the lagging channel; both results are fresh.
    Lagging = 0b00,
    /// Pulse follows channel 0 conversions only.
    Ch0 = 0b01,
    /// Pulse follows channel 1 conversions only.
    Ch1 = 0b10,
    /// Both channels pulse the pin independently.
    Both = 0b11,
}

/// Address-counter behaviour on multi-byte reads (`STATUSCOM.READ`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum ReadLoop {
    /// Counter loops on the addressed register.
    Register = 0b00,
    /// Counter loops inside the addressed register group.
    Group = 0b01,
    /// Counter loops inside the addressed register type set.
    Types = 0b10,
    /// Counter loops across the entire register map.
    EntireMap = 0b11,
}

/// Address-counter behaviour on multi-byte writes (`STATUSCOM.WRITE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum WriteLoop {
    /// Counter stays on the addressed register.
    Register = 0,
    /// Counter increments across the entire register map.
    EntireMap = 1,
}

/// Output word width of a channel's data register (`STATUSCOM.WIDTH`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum SampleWidth {
    /// 16-bit output words (rounded).
    W16 = 0,
    /// Full 24-bit output words.
    W24 = 1,
}

/// Master clock prescaler (`CONFIG.PRE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum Prescale {
    /// AMCLK = MCLK.
    Div1 = 0b00,
    /// AMCLK = MCLK / 2.
    Div2 = 0b01,
    /// AMCLK = MCLK / 4.
    Div4 = 0b10,
    /// AMCLK = MCLK / 8.
    Div8 = 0b11,
}

/// Oversampling ratio selections (`CONFIG.OSR`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 3]
pub enum Osr {
    /// 32x oversampling.
    R32 = 0b000,
    /// 64x oversampling.
    R64 = 0b001,
    /// 128x oversampling.
    R128 = 0b010,
    /// 256x oversampling.
    R256 = 0b011,
    /// 512x oversampling.
    R512 = 0b100,
    /// 1024x oversampling.
    R1024 = 0b101,
    /// 2048x oversampling.
    R2048 = 0b110,
    /// 4096x oversampling.
    R4096 = 0b111,
}

impl Osr {
    /// Returns the oversampling ratio as an integer value.
    pub const fn ratio(self) -> u16 {
        match self {
            Self::R32 => 32,
            Self::R64 => 64,
            Self::R128 => 128,
            Self::R256 => 256,
            Self::R512 => 512,
            Self::R1024 => 1_024,
            Self::R2048 => 2_048,
            Self::R4096 => 4_096,
        }
    }
}

/// Dithering level applied to the modulators (`CONFIG.DITHER`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum Dither {
    /// Dithering off.
    Off = 0b00,
    /// Minimal dithering.
    Minimal = 0b01,
    /// Medium dithering.
    Medium = 0b10,
    /// Maximal dithering.
    Maximal = 0b11,
}

/// Auto-zeroing chopper frequency (`CONFIG.AZ_FREQ`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum AutoZeroFreq {
    /// Auto-zeroing runs at the lower chopper rate.
    Low = 0,
    /// Auto-zeroing runs at the higher chopper rate.
    High = 1,
}

/// Voltage reference selection (`CONFIG.VREFEXT`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum ReferenceSource {
    /// Internal 1.2 V bandgap reference.
    Internal = 0,
    /// External reference on the REFIN pins.
    External = 1,
}

/// Master clock source selection (`CONFIG.CLKEXT`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum ClockSource {
    /// Crystal oscillator between OSC1 and OSC2.
    Crystal = 0,
    /// Externally generated clock on OSC1.
    External = 1,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The gain mapping is the datasheet table, reserved codes included.
    #[test]
    fn gain_multiplier_table() {
        assert_eq!(PgaGain::X1.multiplier(), 1);
        assert_eq!(PgaGain::X2.multiplier(), 2);
        assert_eq!(PgaGain::X4.multiplier(), 4);
        assert_eq!(PgaGain::X8.multiplier(), 8);
        assert_eq!(PgaGain::X16.multiplier(), 16);
        assert_eq!(PgaGain::X32.multiplier(), 32);
        assert_eq!(PgaGain::X1Alt6.multiplier(), 1);
        assert_eq!(PgaGain::X1Alt7.multiplier(), 1);
    }

    #[test]
    fn channel_register_mapping() {
        assert_eq!(Channel::Ch0.data_register(), 0x00);
        assert_eq!(Channel::Ch1.data_register(), 0x03);
        assert_eq!(Channel::Ch0.offset_register(), 0x0E);
        assert_eq!(Channel::Ch1.offset_register(), 0x14);
    }

    /// Raw indices outside the two physical channels must be rejected.
    #[test]
    fn channel_conversion_rejects_unknown_indices() {
        assert_eq!(Channel::try_from(0), Ok(Channel::Ch0));
        assert_eq!(Channel::try_from(1), Ok(Channel::Ch1));
        assert_eq!(Channel::try_from(2), Err(InvalidChannel));
        assert_eq!(Channel::try_from(0xFF), Err(InvalidChannel));
    }
}

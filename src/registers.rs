//! Register map definitions for the MCP3911 converter.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

use crate::params::{
    AutoZeroFreq, Boost, ChannelSelection, ClockSource, DataReadyMode, DataReadyPull, Dither, Osr,
    PgaGain, Prescale, ReadLoop, ReferenceSource, SampleWidth, WriteLoop,
};

/// Hardware address bits of the converter, fixed by the device variant.
pub const DEVICE_ADDRESS: u8 = 0x00;

/// Register address of `CHANNEL0` (24-bit data word, spans 0x00..=0x02).
pub const REG_CHANNEL0: u8 = 0x00;
/// Register address of `CHANNEL1` (24-bit data word, spans 0x03..=0x05).
pub const REG_CHANNEL1: u8 = 0x03;
/// Register address of `PHASE` (16-bit, spans 0x07..=0x08).
pub const REG_PHASE: u8 = 0x07;
/// Register address of `GAIN`.
pub const REG_GAIN: u8 = 0x09;
/// Register address of `STATUSCOM` (16-bit, spans 0x0A..=0x0B).
pub const REG_STATUSCOM: u8 = 0x0A;
/// Register address of `CONFIG` (16-bit, spans 0x0C..=0x0D).
pub const REG_CONFIG: u8 = 0x0C;
/// Register address of the low `CONFIG` byte, which holds the reset,
/// shutdown, reference, and clock fields.
pub const REG_MODE: u8 = 0x0D;
/// Register address of `OFFCAL_CH0` (24-bit, spans 0x0E..=0x10).
pub const REG_OFFCAL_CH0: u8 = 0x0E;
/// Register address of `OFFCAL_CH1` (24-bit, spans 0x14..=0x16).
pub const REG_OFFCAL_CH1: u8 = 0x14;

/// Bitfield representation of the `GAIN` register (address `0x09`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gain {
    // Channel 0 PGA code (bits 2:0).
    pub pga_ch0: PgaGain,
    // Channel 1 PGA code (bits 5:3).
    pub pga_ch1: PgaGain,
    // Bias current boost (bits 7:6).
    pub boost: Boost,
}

impl From<u8> for Gain {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<Gain> for u8 {
    fn from(value: Gain) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `STATUSCOM` register (address `0x0A`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCom {
    #[skip]
    __: B1,
    // Digital gain error calibration enable (bit 1).
    pub en_gaincal: bool,
    // Digital offset error calibration enable (bit 2).
    pub en_offcal: bool,
    // Channel 0 output word width (bit 3).
    pub width_ch0: SampleWidth,
    // Channel 1 output word width (bit 4).
    pub width_ch1: SampleWidth,
    // Address-counter behaviour on writes (bit 5).
    pub write_loop: WriteLoop,
    // Address-counter behaviour on reads (bits 7:6).
    pub read_loop: ReadLoop,
    #[skip]
    __: B2,
    // Data-ready link mode (bits 11:10).
    pub dr_mode: DataReadyMode,
    // Data-ready pin idle behaviour (bit 12).
    pub dr_pull: DataReadyPull,
    #[skip]
    __: B1,
    // Modulator output enable (bits 15:14).
    pub mod_out: ChannelSelection,
}

impl From<u16> for StatusCom {
    fn from(value: u16) -> Self {
        Self::from_bytes(value.to_le_bytes())
    }
}

impl From<StatusCom> for u16 {
    fn from(value: StatusCom) -> Self {
        u16::from_le_bytes(value.into_bytes())
    }
}

/// Bitfield representation of the `CONFIG` register (address `0x0C`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MasterConfig {
    #[skip]
    __: B1,
    // Master clock source selection (bit 1).
    pub clock: ClockSource,
    // Voltage reference selection (bit 2).
    pub vref: ReferenceSource,
    #[skip]
    __: B1,
    // Per-channel shutdown (bits 5:4).
    pub shutdown: ChannelSelection,
    // Per-channel soft reset (bits 7:6).
    pub reset: ChannelSelection,
    // Auto-zeroing chopper frequency (bit 8).
    pub az_freq: AutoZeroFreq,
    // Dithering level (bits 10:9).
    pub dither: Dither,
    // Oversampling ratio (bits 13:11).
    pub osr: Osr,
    // Master clock prescaler (bits 15:14).
    pub prescale: Prescale,
}

impl From<u16> for MasterConfig {
    fn from(value: u16) -> Self {
        Self::from_bytes(value.to_le_bytes())
    }
}

impl From<MasterConfig> for u16 {
    fn from(value: MasterConfig) -> Self {
        u16::from_le_bytes(value.into_bytes())
    }
}

/// Bitfield view of the low `CONFIG` byte (address `0x0D`).
///
/// The reset and shutdown fields live here, so mode changes can
/// read-modify-write this single byte without touching the rest of the
/// `CONFIG` register.
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeControl {
    #[skip]
    __: B1,
    // Master clock source selection (bit 1).
    pub clock: ClockSource,
    // Voltage reference selection (bit 2).
    pub vref: ReferenceSource,
    #[skip]
    __: B1,
    // Per-channel shutdown (bits 5:4).
    pub shutdown: ChannelSelection,
    // Per-channel soft reset (bits 7:6).
    pub reset: ChannelSelection,
}

impl From<u8> for ModeControl {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<ModeControl> for u8 {
    fn from(value: ModeControl) -> Self {
        value.into_bytes()[0]
    }
}

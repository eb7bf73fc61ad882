//! Configuration primitives for the MCP3911 driver.

use crate::params::{
    AutoZeroFreq, Boost, Channel, ChannelSelection, ClockSource, DataReadyMode, DataReadyPull,
    Dither, Osr, PgaGain, Prescale, ReadLoop, ReferenceSource, SampleWidth, WriteLoop,
};
use crate::registers::{Gain, MasterConfig, StatusCom};

/// User-facing configuration for the MCP3911 converter.
///
/// One field per configuration register sub-field. The value is applied as a
/// whole by [`Mcp3911::configure`](crate::Mcp3911::configure) and a copy is
/// retained by the driver for gain lookups; there is no piecemeal mutation of
/// live device state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Raw phase delay between the two channels, in units of the modulator
    /// period (two's complement register value).
    pub phase: u16,
    /// Bias current boost selection.
    pub boost: Boost,
    /// Channel 0 programmable gain amplifier code.
    pub pga_ch0: PgaGain,
    /// Channel 1 programmable gain amplifier code.
    pub pga_ch1: PgaGain,
    /// Modulator output enable per channel.
    pub mod_out: ChannelSelection,
    /// Data-ready pin idle behaviour.
    pub dr_pull: DataReadyPull,
    /// Data-ready link mode.
    pub dr_mode: DataReadyMode,
    /// Address-counter behaviour on multi-byte reads.
    pub read_loop: ReadLoop,
    /// Address-counter behaviour on multi-byte writes.
    pub write_loop: WriteLoop,
    /// Channel 0 output word width.
    pub width_ch0: SampleWidth,
    /// Channel 1 output word width.
    pub width_ch1: SampleWidth,
    /// Digital offset error calibration enable.
    pub en_offcal: bool,
    /// Digital gain error calibration enable.
    pub en_gaincal: bool,
    /// Master clock prescaler.
    pub prescale: Prescale,
    /// Oversampling ratio.
    pub osr: Osr,
    /// Dithering level.
    pub dither: Dither,
    /// Auto-zeroing chopper frequency.
    pub az_freq: AutoZeroFreq,
    /// Per-channel soft reset state.
    pub reset: ChannelSelection,
    /// Per-channel shutdown state.
    pub shutdown: ChannelSelection,
    /// Voltage reference selection.
    pub vref: ReferenceSource,
    /// Master clock source selection.
    pub clock: ClockSource,
}

impl Config {
    /// Begins building a [`Config`] using the builder pattern.
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Returns the PGA code configured for the given channel.
    pub const fn pga(&self, channel: Channel) -> PgaGain {
        match channel {
            Channel::Ch0 => self.pga_ch0,
            Channel::Ch1 => self.pga_ch1,
        }
    }

    /// Packs the `GAIN` register value.
    pub fn gain_register(&self) -> Gain {
        Gain::new()
            .with_boost(self.boost)
            .with_pga_ch1(self.pga_ch1)
            .with_pga_ch0(self.pga_ch0)
    }

    /// Packs the `STATUSCOM` register value.
    pub fn statuscom_register(&self) -> StatusCom {
        StatusCom::new()
            .with_mod_out(self.mod_out)
            .with_dr_pull(self.dr_pull)
            .with_dr_mode(self.dr_mode)
            .with_read_loop(self.read_loop)
            .with_write_loop(self.write_loop)
            .with_width_ch1(self.width_ch1)
            .with_width_ch0(self.width_ch0)
            .with_en_offcal(self.en_offcal)
            .with_en_gaincal(self.en_gaincal)
    }

    /// Packs the `CONFIG` register value.
    pub fn config_register(&self) -> MasterConfig {
        MasterConfig::new()
            .with_prescale(self.prescale)
            .with_osr(self.osr)
            .with_dither(self.dither)
            .with_az_freq(self.az_freq)
            .with_reset(self.reset)
            .with_shutdown(self.shutdown)
            .with_vref(self.vref)
            .with_clock(self.clock)
    }
}

impl Default for Config {
    /// Mirrors the converter's power-on defaults: 24-bit output words,
    /// auto-increment writes across the register map, 256x oversampling,
    /// maximal dithering, internal reference, crystal clock, unity gain.
    fn default() -> Self {
        Self {
            phase: 0,
            boost: Boost::X1,
            pga_ch0: PgaGain::X1,
            pga_ch1: PgaGain::X1,
            mod_out: ChannelSelection::Neither,
            dr_pull: DataReadyPull::HighImpedance,
            dr_mode: DataReadyMode::Lagging,
            read_loop: ReadLoop::Register,
            write_loop: WriteLoop::EntireMap,
            width_ch0: SampleWidth::W24,
            width_ch1: SampleWidth::W24,
            en_offcal: false,
            en_gaincal: false,
            prescale: Prescale::Div1,
            osr: Osr::R256,
            dither: Dither::Maximal,
            az_freq: AutoZeroFreq::Low,
            reset: ChannelSelection::Neither,
            shutdown: ChannelSelection::Neither,
            vref: ReferenceSource::Internal,
            clock: ClockSource::Crystal,
        }
    }
}

/// Builder for [`Config`] allowing piecemeal construction.
#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a new builder seeded with [`Config::default()`].
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Sets the raw phase delay register value.
    pub fn phase(mut self, phase: u16) -> Self {
        self.config.phase = phase;
        self
    }

    /// Sets the bias current boost.
    pub fn boost(mut self, boost: Boost) -> Self {
        self.config.boost = boost;
        self
    }

    /// Sets the PGA code for one channel.
    pub fn pga(mut self, channel: Channel, gain: PgaGain) -> Self {
        match channel {
            Channel::Ch0 => self.config.pga_ch0 = gain,
            Channel::Ch1 => self.config.pga_ch1 = gain,
        }
        self
    }

    /// Enables the modulator output pins for the selected channels.
    pub fn mod_out(mut self, mod_out: ChannelSelection) -> Self {
        self.config.mod_out = mod_out;
        self
    }

    /// Sets the data-ready pin idle behaviour.
    pub fn dr_pull(mut self, dr_pull: DataReadyPull) -> Self {
        self.config.dr_pull = dr_pull;
        self
    }

    /// Sets the data-ready link mode.
    pub fn dr_mode(mut self, dr_mode: DataReadyMode) -> Self {
        self.config.dr_mode = dr_mode;
        self
    }

    /// Sets the address-counter behaviour for multi-byte reads.
    pub fn read_loop(mut self, read_loop: ReadLoop) -> Self {
        self.config.read_loop = read_loop;
        self
    }

    /// Sets the address-counter behaviour for multi-byte writes.
    pub fn write_loop(mut self, write_loop: WriteLoop) -> Self {
        self.config.write_loop = write_loop;
        self
    }

    /// Sets the output word width for one channel.
    pub fn width(mut self, channel: Channel, width: SampleWidth) -> Self {
        match channel {
            Channel::Ch0 => self.config.width_ch0 = width,
            Channel::Ch1 => self.config.width_ch1 = width,
        }
        self
    }

    /// Enables or disables digital offset error calibration.
    pub fn offset_calibration(mut self, enabled: bool) -> Self {
        self.config.en_offcal = enabled;
        self
    }

    /// Enables or disables digital gain error calibration.
    pub fn gain_calibration(mut self, enabled: bool) -> Self {
        self.config.en_gaincal = enabled;
        self
    }

    /// Sets the master clock prescaler.
    pub fn prescale(mut self, prescale: Prescale) -> Self {
        self.config.prescale = prescale;
        self
    }

    /// Sets the oversampling ratio.
    pub fn osr(mut self, osr: Osr) -> Self {
        self.config.osr = osr;
        self
    }

    /// Sets the dithering level.
    pub fn dither(mut self, dither: Dither) -> Self {
        self.config.dither = dither;
        self
    }

    /// Sets the auto-zeroing chopper frequency.
    pub fn az_freq(mut self, az_freq: AutoZeroFreq) -> Self {
        self.config.az_freq = az_freq;
        self
    }

    /// Shuts down the selected channels.
    pub fn shutdown(mut self, shutdown: ChannelSelection) -> Self {
        self.config.shutdown = shutdown;
        self
    }

    /// Sets the voltage reference selection.
    pub fn vref(mut self, vref: ReferenceSource) -> Self {
        self.config.vref = vref;
        self
    }

    /// Sets the master clock source selection.
    pub fn clock(mut self, clock: ClockSource) -> Self {
        self.config.clock = clock;
        self
    }

    /// Finalizes the builder and returns the [`Config`].
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

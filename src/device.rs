//! High-level MCP3911 device driver implementation.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::interface::spi::SpiInterface;
use crate::interface::Mcp3911Interface;
use crate::params::{Channel, ChannelSelection};
use crate::registers::{ModeControl, StatusCom, REG_MODE, REG_PHASE, REG_STATUSCOM};
use embedded_hal::spi::SpiDevice;

// Internal reference voltage (volts).
const INTERNAL_VREF: f32 = 1.2;
// Half-range of a 24-bit two's-complement sample (2^23).
const FULL_SCALE: f32 = 8_388_608.0;
// Gain of the delta-sigma transfer function between input and output code.
const TRANSFER_GAIN: f32 = 1.5;
// Number of bytes in a 24-bit data register.
const SAMPLE_BYTES: usize = 3;

/// Reassembles a 3-byte big-endian register payload into a sign-extended
/// sample.
#[inline]
fn unpack_sample(raw: [u8; SAMPLE_BYTES]) -> i32 {
    // 24-bit two's complement: widen through the top of the word so the sign
    // bit lands at bit 31 before the arithmetic shift back down.
    i32::from_be_bytes([raw[0], raw[1], raw[2], 0]) >> 8
}

/// High-level synchronous driver for the MCP3911 dual-channel ADC.
///
/// Every operation is a blocking register transaction on the underlying bus;
/// `&mut self` receivers guarantee at most one transaction in flight per
/// device handle. Sharing one bus between several converters is the platform
/// `SpiDevice` implementation's concern, not the driver's.
pub struct Mcp3911<IFACE> {
    interface: IFACE,
    config: Config,
}

impl<IFACE> Mcp3911<IFACE> {
    // ==================================================================
    // == Driver Construction & Ownership ===============================
    // ==================================================================
    /// Creates a new driver instance from the provided bus interface.
    ///
    /// The configuration is not applied to the hardware until
    /// [`configure`](Self::configure) is called.
    pub fn new(interface: IFACE, config: Config) -> Self {
        Self { interface, config }
    }

    /// Consumes the driver and returns the owned interface.
    pub fn release(self) -> (IFACE, Config) {
        (self.interface, self.config)
    }

    /// Provides mutable access to the underlying interface.
    pub fn interface_mut(&mut self) -> &mut IFACE {
        &mut self.interface
    }
}

impl<SPI> Mcp3911<SpiInterface<SPI>>
where
    SPI: SpiDevice,
{
    // ==================================================================
    // == SPI Convenience Constructors ==================================
    // ==================================================================
    /// Convenience constructor for SPI transports.
    pub fn new_spi(spi: SPI, config: Config) -> Self {
        Self::new(SpiInterface::new(spi), config)
    }

    /// Releases the driver, returning the SPI device and configuration.
    pub fn release_spi(self) -> (SPI, Config) {
        let (iface, config) = self.release();
        (iface.release(), config)
    }
}

impl<IFACE, CommE> Mcp3911<IFACE>
where
    IFACE: Mcp3911Interface<Error = CommE>,
{
    // ==================================================================
    // == Initialization & Global Configuration =========================
    // ==================================================================
    /// Resets and configures the converter in one write cycle.
    ///
    /// Both channels are put into reset first so a partially written register
    /// set can never drive conversions, then the PHASE, GAIN, STATUSCOM, and
    /// CONFIG registers are programmed in a single transaction riding the
    /// device's auto-incrementing address pointer. The converters stay in
    /// reset afterwards; call [`exit_reset_mode`](Self::exit_reset_mode) to
    /// start converting.
    pub fn configure(&mut self, config: Config) -> Result<(), CommE> {
        self.enter_reset_mode()?;

        let phase = config.phase.to_be_bytes();
        let statuscom = u16::from(config.statuscom_register()).to_be_bytes();
        // Hold both channels in reset until the caller releases them.
        let master = config.config_register().with_reset(ChannelSelection::Both);
        let master = u16::from(master).to_be_bytes();

        // Register order is fixed by the device's address pointer: PHASE,
        // GAIN, STATUSCOM, CONFIG. 16-bit registers take their high byte
        // first.
        let payload = [
            phase[0],
            phase[1],
            u8::from(config.gain_register()),
            statuscom[0],
            statuscom[1],
            master[0],
            master[1],
        ];
        self.interface
            .write_many(REG_PHASE, &payload)
            .map_err(Error::from)?;

        self.config = Config {
            reset: ChannelSelection::Both,
            ..config
        };
        Ok(())
    }

    /// Returns a shared reference to the stored configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    // ==================================================================
    // == Reset & Mode Control ==========================================
    // ==================================================================
    /// Puts both channels into reset mode, preserving every other bit of the
    /// mode register.
    ///
    /// Idempotent: entering reset mode twice in a row leaves the register
    /// untouched the second time.
    pub fn enter_reset_mode(&mut self) -> Result<(), CommE> {
        self.update_mode_control(|mode| mode.set_reset(ChannelSelection::Both))
    }

    /// Releases both channels from reset mode, preserving every other bit of
    /// the mode register.
    ///
    /// Idempotent, like [`enter_reset_mode`](Self::enter_reset_mode).
    pub fn exit_reset_mode(&mut self) -> Result<(), CommE> {
        self.update_mode_control(|mode| mode.set_reset(ChannelSelection::Neither))
    }

    // ==================================================================
    // == Data Acquisition ==============================================
    // ==================================================================
    /// Reads a raw sign-extended sample from the given channel.
    ///
    /// The channel must be configured for 24-bit output words.
    pub fn read_raw(&mut self, channel: Channel) -> Result<i32, CommE> {
        let mut raw = [0u8; SAMPLE_BYTES];
        self.interface
            .read_many(channel.data_register(), &mut raw)
            .map_err(Error::from)?;

        Ok(unpack_sample(raw))
    }

    /// Reads the given channel and converts the sample to volts.
    pub fn read_channel(&mut self, channel: Channel) -> Result<f32, CommE> {
        let sample = self.read_raw(channel)?;
        Ok(self.sample_to_voltage(sample, channel))
    }

    /// Converts a raw sample to volts using the channel's configured gain.
    pub fn sample_to_voltage(&self, sample: i32, channel: Channel) -> f32 {
        let gain = self.config.pga(channel).multiplier();
        (sample as f32 * INTERNAL_VREF) / (FULL_SCALE * TRANSFER_GAIN * gain as f32)
    }

    // ==================================================================
    // == Calibration ===================================================
    // ==================================================================
    /// Writes a 24-bit two's-complement offset to the channel's offset
    /// calibration register, most significant byte first.
    ///
    /// The value is truncated to its low 24 bits; the register has no shared
    /// bits, so no read-modify-write cycle is needed.
    pub fn write_offset(&mut self, channel: Channel, offset: i32) -> Result<(), CommE> {
        let bytes = offset.to_be_bytes();
        self.interface
            .write_many(channel.offset_register(), &bytes[1..])
            .map_err(Error::from)
    }

    // ==================================================================
    // == Status & Raw Register Access ==================================
    // ==================================================================
    /// Reads the `STATUSCOM` register and decodes it.
    pub fn read_statuscom(&mut self) -> Result<StatusCom, CommE> {
        let mut raw = [0u8; 2];
        self.interface
            .read_many(REG_STATUSCOM, &mut raw)
            .map_err(Error::from)?;

        Ok(StatusCom::from(u16::from_be_bytes(raw)))
    }

    /// Reads a single register byte.
    ///
    /// The address is forwarded to the device as-is; what an undefined
    /// address returns is up to the hardware.
    pub fn read_register(&mut self, register: u8) -> Result<u8, CommE> {
        self.interface.read_register(register).map_err(Error::from)
    }

    /// Writes a single register byte, address forwarded as-is.
    pub fn write_register(&mut self, register: u8, value: u8) -> Result<(), CommE> {
        self.interface
            .write_register(register, value)
            .map_err(Error::from)
    }

    // ==================================================================
    // == Internal Mode Register Helpers ================================
    // ==================================================================
    fn update_mode_control<F>(&mut self, mut mutate: F) -> Result<(), CommE>
    where
        F: FnMut(&mut ModeControl),
    {
        let current = self
            .interface
            .read_register(REG_MODE)
            .map_err(Error::from)?;

        let mut mode = ModeControl::from(current);
        mutate(&mut mode);

        let updated = u8::from(mode);
        if updated != current {
            self.interface
                .write_register(REG_MODE, updated)
                .map_err(Error::from)?;
        }

        self.config.reset = mode.reset();
        self.config.shutdown = mode.shutdown();
        self.config.vref = mode.vref();
        self.config.clock = mode.clock();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{Boost, PgaGain, ReferenceSource, SampleWidth, WriteLoop};
    use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};
    use std::vec;
    use std::vec::Vec;

    fn adc(expectations: &[SpiTransaction<u8>], config: Config) -> Mcp3911<SpiInterface<SpiMock<u8>>> {
        Mcp3911::new_spi(SpiMock::new(expectations), config)
    }

    fn finish(adc: Mcp3911<SpiInterface<SpiMock<u8>>>) {
        let (mut spi, _) = adc.release_spi();
        spi.done();
    }

    fn read_transaction(control: u8, response: Vec<u8>) -> Vec<SpiTransaction<u8>> {
        vec![
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![control]),
            SpiTransaction::read_vec(response),
            SpiTransaction::transaction_end(),
        ]
    }

    fn write_transaction(control: u8, payload: Vec<u8>) -> Vec<SpiTransaction<u8>> {
        vec![
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![control]),
            SpiTransaction::write_vec(payload),
            SpiTransaction::transaction_end(),
        ]
    }

    /// Sign extension round-trips every boundary sample value.
    #[test]
    fn unpack_sample_round_trips_boundary_values() {
        let values: [i32; 15] = [
            -8_388_608,
            -8_388_607,
            -32_769,
            -32_768,
            -129,
            -128,
            -1,
            0,
            1,
            127,
            128,
            32_767,
            32_768,
            8_388_606,
            8_388_607,
        ];

        for value in values {
            let bytes = value.to_be_bytes();
            let unpacked = unpack_sample([bytes[1], bytes[2], bytes[3]]);
            assert_eq!(unpacked, value, "sample {value:#x} did not survive widening");
        }
    }

    #[test]
    fn read_raw_sign_extends_negative_samples() {
        let mut expectations = read_transaction(0x01, vec![0x80, 0x00, 0x00]);
        expectations.extend(read_transaction(0x01, vec![0xFF, 0xFF, 0xFF]));
        expectations.extend(read_transaction(0x07, vec![0x7F, 0xFF, 0xFF]));

        let mut adc = adc(&expectations, Config::default());
        assert_eq!(adc.read_raw(Channel::Ch0).unwrap(), -8_388_608);
        assert_eq!(adc.read_raw(Channel::Ch0).unwrap(), -1);
        assert_eq!(adc.read_raw(Channel::Ch1).unwrap(), 8_388_607);
        finish(adc);
    }

    /// Full-scale positive at unity gain and full-scale negative at gain 32.
    #[test]
    fn read_channel_scales_with_configured_gain() {
        let config = Config::new().pga(Channel::Ch1, PgaGain::X32).build();

        let mut expectations = read_transaction(0x01, vec![0x7F, 0xFF, 0xFF]);
        expectations.extend(read_transaction(0x07, vec![0x80, 0x00, 0x00]));

        let mut adc = adc(&expectations, config);

        let ch0 = adc.read_channel(Channel::Ch0).unwrap();
        let expected_ch0 = (8_388_607.0_f32 * 1.2) / (8_388_608.0 * 1.5);
        assert!((ch0 - expected_ch0).abs() < 1e-7, "got {ch0}");

        let ch1 = adc.read_channel(Channel::Ch1).unwrap();
        let expected_ch1 = (-8_388_608.0_f32 * 1.2) / (8_388_608.0 * 1.5 * 32.0);
        assert!((ch1 - expected_ch1).abs() < 1e-7, "got {ch1}");

        finish(adc);
    }

    /// The reserved gain codes scale like unity gain.
    #[test]
    fn reserved_gain_codes_convert_as_unity() {
        let unity = Config::default();
        let reserved = Config::new().pga(Channel::Ch0, PgaGain::X1Alt7).build();

        let adc_unity = adc(&[], unity);
        let adc_reserved = adc(&[], reserved);

        let sample = 4_242_424;
        assert_eq!(
            adc_unity.sample_to_voltage(sample, Channel::Ch0),
            adc_reserved.sample_to_voltage(sample, Channel::Ch0),
        );

        finish(adc_unity);
        finish(adc_reserved);
    }

    /// One reset transaction, then one auto-increment write covering PHASE,
    /// GAIN, STATUSCOM, and CONFIG in device order, high bytes first.
    #[test]
    fn configure_writes_registers_in_device_order() {
        let config = Config::new()
            .phase(0x1234)
            .boost(Boost::X2)
            .pga(Channel::Ch0, PgaGain::X2)
            .pga(Channel::Ch1, PgaGain::X4)
            .build();

        let mut expectations = read_transaction(0x1B, vec![0x00]);
        expectations.extend(write_transaction(0x1A, vec![0xC0]));
        expectations.extend(write_transaction(
            0x0E,
            vec![0x12, 0x34, 0xD1, 0x00, 0x38, 0x1E, 0xC0],
        ));

        let mut adc = adc(&expectations, Config::default());
        adc.configure(config).unwrap();

        assert_eq!(adc.config().pga_ch1, PgaGain::X4);
        assert_eq!(adc.config().reset, ChannelSelection::Both);
        finish(adc);
    }

    /// Entering and leaving reset restores every non-reset bit, reserved
    /// bits included.
    #[test]
    fn reset_round_trip_preserves_mode_bits() {
        let mut expectations = read_transaction(0x1B, vec![0x3F]);
        expectations.extend(write_transaction(0x1A, vec![0xFF]));
        expectations.extend(read_transaction(0x1B, vec![0xFF]));
        expectations.extend(write_transaction(0x1A, vec![0x3F]));

        let mut adc = adc(&expectations, Config::default());

        adc.enter_reset_mode().unwrap();
        assert_eq!(adc.config().reset, ChannelSelection::Both);
        assert_eq!(adc.config().shutdown, ChannelSelection::Both);
        assert_eq!(adc.config().vref, ReferenceSource::External);

        adc.exit_reset_mode().unwrap();
        assert_eq!(adc.config().reset, ChannelSelection::Neither);
        assert_eq!(adc.config().shutdown, ChannelSelection::Both);

        finish(adc);
    }

    /// A second enter_reset_mode sees the bits already set and skips the
    /// write.
    #[test]
    fn repeated_reset_entry_skips_redundant_write() {
        let mut expectations = read_transaction(0x1B, vec![0x00]);
        expectations.extend(write_transaction(0x1A, vec![0xC0]));
        expectations.extend(read_transaction(0x1B, vec![0xC0]));

        let mut adc = adc(&expectations, Config::default());
        adc.enter_reset_mode().unwrap();
        adc.enter_reset_mode().unwrap();
        finish(adc);
    }

    #[test]
    fn write_offset_sends_low_24_bits_msb_first() {
        let mut expectations = write_transaction(0x1C, vec![0x12, 0x34, 0x56]);
        expectations.extend(write_transaction(0x28, vec![0xFF, 0xFF, 0xFF]));

        let mut adc = adc(&expectations, Config::default());
        adc.write_offset(Channel::Ch0, 0x0012_3456).unwrap();
        adc.write_offset(Channel::Ch1, -1).unwrap();
        finish(adc);
    }

    #[test]
    fn read_statuscom_decodes_register_word() {
        let expectations = read_transaction(0x15, vec![0x00, 0x38]);

        let mut adc = adc(&expectations, Config::default());
        let statuscom = adc.read_statuscom().unwrap();

        assert_eq!(statuscom.width_ch0(), SampleWidth::W24);
        assert_eq!(statuscom.width_ch1(), SampleWidth::W24);
        assert_eq!(statuscom.write_loop(), WriteLoop::EntireMap);
        assert!(!statuscom.en_offcal());
        finish(adc);
    }
}

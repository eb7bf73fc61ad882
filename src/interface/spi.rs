//! SPI interface implementation built on top of `embedded-hal` `SpiDevice`.

use embedded_hal::spi::{Operation, SpiDevice};

use super::Mcp3911Interface;
use crate::registers::DEVICE_ADDRESS;

/// SPI-based interface implementation for the MCP3911 driver.
///
/// The converter accepts SCLK rates up to 20 MHz, MSB first, in SPI mode 0
/// (mode 3 is also tolerated by the device). Configure the wrapped
/// [`SpiDevice`] accordingly; chip-select framing is the device's
/// `transaction` contract, so every register access toggles the select line
/// exactly once.
pub struct SpiInterface<SPI> {
    spi: SPI,
}

impl<SPI> SpiInterface<SPI> {
    /// Creates a new interface from the provided SPI device abstraction.
    pub const fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Builds the control byte used to address registers over SPI.
    ///
    /// The register address occupies bits 6:1, the read flag bit 0, and the
    /// hardware address bits the remainder.
    fn control_byte(register: u8, is_read: bool) -> u8 {
        let mut control = DEVICE_ADDRESS | ((register & 0x3F) << 1);
        if is_read {
            control |= 0x01;
        }
        control
    }

    /// Provides mutable access to the wrapped SPI device.
    pub fn spi_mut(&mut self) -> &mut SPI {
        &mut self.spi
    }

    /// Consumes the interface and returns the owned SPI device.
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI> Mcp3911Interface for SpiInterface<SPI>
where
    SPI: SpiDevice,
{
    type Error = SPI::Error;

    fn write_register(&mut self, register: u8, value: u8) -> core::result::Result<(), Self::Error> {
        self.write_many(register, core::slice::from_ref(&value))
    }

    fn read_register(&mut self, register: u8) -> core::result::Result<u8, Self::Error> {
        let mut value = [0u8; 1];
        self.read_many(register, &mut value)?;
        Ok(value[0])
    }

    fn read_many(&mut self, register: u8, buf: &mut [u8]) -> core::result::Result<(), Self::Error> {
        if buf.is_empty() {
            return Ok(());
        }

        let control = [Self::control_byte(register, true)];
        let mut operations = [Operation::Write(&control), Operation::Read(buf)];
        self.spi.transaction(&mut operations)
    }

    fn write_many(&mut self, register: u8, data: &[u8]) -> core::result::Result<(), Self::Error> {
        if data.is_empty() {
            return Ok(());
        }

        let control = [Self::control_byte(register, false)];
        let mut operations = [Operation::Write(&control), Operation::Write(data)];
        self.spi.transaction(&mut operations)
    }
}

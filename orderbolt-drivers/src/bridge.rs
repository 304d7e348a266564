//! Bridges from `embedded-hal` 1.0 peripherals
//!
//! Linux (and most board support crates) hand out `embedded-hal` I2C buses
//! and output pins. These wrappers let the drivers above run on any of them.

use embedded_hal::digital::OutputPin as HalOutputPin;
use embedded_hal::i2c::I2c;
use orderbolt_hal::{I2cBus, OutputPin};

/// An `embedded-hal` I2C bus as an `I2cBus`
pub struct HalI2c<T>(pub T);

impl<T: I2c> I2cBus for HalI2c<T> {
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        I2c::write(&mut self.0, address, data)
    }
}

/// An `embedded-hal` output pin as an `OutputPin`
pub struct HalPin<T>(pub T);

impl<T: HalOutputPin> OutputPin for HalPin<T> {
    type Error = T::Error;

    fn set_high(&mut self) -> Result<(), Self::Error> {
        HalOutputPin::set_high(&mut self.0)
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        HalOutputPin::set_low(&mut self.0)
    }
}

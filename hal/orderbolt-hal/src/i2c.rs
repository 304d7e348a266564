//! I2C bus abstractions

/// I2C bus master
///
/// Only writes are needed to drive the OLED controller; the panel has no
/// readable registers worth polling.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;
}

/// I2C configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// 7-bit device address
    pub address: u8,
    /// Clock frequency in Hz (informational on Linux, set by the bus driver)
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self {
            address: 0x3C,
            frequency: 400_000,
        }
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD_HZ: u32 = 100_000;

    /// Fast mode (400 kHz)
    pub const FAST_HZ: u32 = 400_000;
}

//! Indicator outputs

pub mod gpio;

pub use gpio::GpioIndicator;

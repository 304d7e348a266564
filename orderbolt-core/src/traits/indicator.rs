//! Indicator line trait for the status LED

use core::fmt;

/// Errors from the indicator output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IndicatorError {
    /// The output pin could not be driven
    Io,
}

impl fmt::Display for IndicatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorError::Io => write!(f, "indicator output failed"),
        }
    }
}

/// Trait for a binary indicator output
pub trait IndicatorLine {
    /// Drive the indicator on (`true`) or off
    fn set_level(&mut self, on: bool) -> Result<(), IndicatorError>;
}

impl<T: IndicatorLine + ?Sized> IndicatorLine for &mut T {
    fn set_level(&mut self, on: bool) -> Result<(), IndicatorError> {
        (**self).set_level(on)
    }
}

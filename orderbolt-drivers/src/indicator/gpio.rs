//! GPIO indicator output
//!
//! Status LED on a GPIO line, directly or through a transistor. The line can
//! be active-high (default) or active-low.

use orderbolt_core::traits::{IndicatorError, IndicatorLine};
use orderbolt_hal::OutputPin;

/// GPIO indicator
pub struct GpioIndicator<P> {
    pin: P,
    /// If true, indicator ON = pin LOW
    active_low: bool,
    /// Last level written successfully
    on: bool,
}

impl<P: OutputPin> GpioIndicator<P> {
    /// Create a new GPIO indicator
    ///
    /// # Arguments
    /// - `pin`: The GPIO line driving the LED
    /// - `active_low`: If true, the LED is lit when the line is LOW
    pub fn new(pin: P, active_low: bool) -> Self {
        Self {
            pin,
            active_low,
            on: false,
        }
    }

    /// Create a new indicator with active-high output
    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    /// Create a new indicator with active-low output
    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }

    /// Whether the LED was last switched on
    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Give back the pin
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> IndicatorLine for GpioIndicator<P> {
    fn set_level(&mut self, on: bool) -> Result<(), IndicatorError> {
        // Active-high: on -> high. Active-low: on -> low.
        self.pin
            .set_state(on != self.active_low)
            .map_err(|_| IndicatorError::Io)?;
        self.on = on;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mock GPIO line for testing
    struct MockPin {
        high: bool,
        broken: bool,
    }

    impl MockPin {
        fn new() -> Self {
            Self {
                high: false,
                broken: false,
            }
        }
    }

    impl OutputPin for MockPin {
        type Error = ();

        fn set_high(&mut self) -> Result<(), ()> {
            if self.broken {
                return Err(());
            }
            self.high = true;
            Ok(())
        }

        fn set_low(&mut self) -> Result<(), ()> {
            if self.broken {
                return Err(());
            }
            self.high = false;
            Ok(())
        }
    }

    #[test]
    fn test_active_high_indicator() {
        let mut led = GpioIndicator::new_active_high(MockPin::new());
        assert!(!led.is_on());

        led.set_level(true).unwrap();
        assert!(led.is_on());
        assert!(led.pin.high);

        led.set_level(false).unwrap();
        assert!(!led.is_on());
        assert!(!led.pin.high);
    }

    #[test]
    fn test_active_low_indicator() {
        let mut led = GpioIndicator::new_active_low(MockPin::new());

        led.set_level(true).unwrap();
        assert!(!led.pin.high);

        led.set_level(false).unwrap();
        assert!(led.pin.high);
    }

    #[test]
    fn test_pin_failure_keeps_state() {
        let mut led = GpioIndicator::new_active_high(MockPin::new());
        led.pin.broken = true;
        assert_eq!(led.set_level(true), Err(IndicatorError::Io));
        assert!(!led.is_on());

        led.pin.broken = false;
        assert_eq!(led.set_level(true), Ok(()));
        assert!(led.release().high);
    }
}

//! GPIO pin abstractions

/// Digital output pin
///
/// Unlike a microcontroller register write, driving a line through the Linux
/// GPIO character device can fail, so every write reports an error.
pub trait OutputPin {
    /// Error type for pin writes
    type Error;

    /// Set the pin high (logic 1)
    fn set_high(&mut self) -> Result<(), Self::Error>;

    /// Set the pin low (logic 0)
    fn set_low(&mut self) -> Result<(), Self::Error>;

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) -> Result<(), Self::Error> {
        if high {
            self.set_high()
        } else {
            self.set_low()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Latch {
        high: bool,
        writes: u8,
    }

    impl OutputPin for Latch {
        type Error = ();

        fn set_high(&mut self) -> Result<(), ()> {
            self.high = true;
            self.writes += 1;
            Ok(())
        }

        fn set_low(&mut self) -> Result<(), ()> {
            self.high = false;
            self.writes += 1;
            Ok(())
        }
    }

    #[test]
    fn test_set_state_dispatches() {
        let mut pin = Latch {
            high: false,
            writes: 0,
        };
        pin.set_state(true).unwrap();
        assert!(pin.high);
        pin.set_state(false).unwrap();
        assert!(!pin.high);
        assert_eq!(pin.writes, 2);
    }
}

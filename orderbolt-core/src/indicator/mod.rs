//! Indicator pulse coordination
//!
//! Order events become time-boxed on/off patterns on the status LED. The
//! patterns advance on the display ticks, so they never need their own timer.

pub mod pulse;

pub use pulse::{PulseCoordinator, PulsePattern};

//! Orderbolt Hardware Abstraction Layer
//!
//! The traits here are what the drivers in `orderbolt-drivers` talk to. The
//! daemon implements them on top of Linux character devices; tests implement
//! them with in-memory fakes.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  orderbolt-drivers (Sh1106, GpioIndicator)│
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  orderbolt-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  orderbolt-daemon (linux-embedded-hal)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - digital output (indicator LED)
//! - [`i2c::I2cBus`] - I2C master (OLED panel)

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod i2c;

pub use gpio::OutputPin;
pub use i2c::{I2cBus, I2cConfig};

//! Hardware driver implementations
//!
//! Concrete implementations of the collaborator traits defined in
//! orderbolt-core, written against the orderbolt-hal bus and pin traits:
//!
//! - Panel drivers (SH1106 over I2C)
//! - Indicator outputs (GPIO LED, active-high or active-low)
//! - Bridges from `embedded-hal` 1.0 peripherals to the orderbolt-hal traits

#![no_std]
#![deny(unsafe_code)]

pub mod bridge;
pub mod indicator;
pub mod panel;

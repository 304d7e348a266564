//! Configuration types
//!
//! Everything the engine reads but never writes: panel geometry, tick rate,
//! scroll speed, per-state dwell times and indicator patterns.

pub mod types;

pub use types::*;

//! Daemon configuration
//!
//! `[display]` maps straight onto the engine's `DisplayConfig`; `[hardware]`
//! names the Linux devices the panel and indicator live on.

mod loader;

pub use loader::{load, HardwareConfig};

//! Daemon setup errors

use std::path::PathBuf;

use orderbolt_core::config::ConfigError;
use thiserror::Error;

/// Failures while loading configuration or opening hardware
#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("cannot read config file {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in config")]
    ConfigParse(#[from] toml::de::Error),

    #[error("invalid display configuration: {0}")]
    InvalidDisplay(ConfigError),

    #[error("invalid hardware configuration: {0}")]
    InvalidHardware(String),

    #[error("cannot open I2C bus {bus}: {reason}")]
    I2cOpen { bus: String, reason: String },

    #[error("panel at 0x{address:02X} did not initialize: {reason}")]
    PanelInit { address: u8, reason: String },

    #[error("cannot claim GPIO line {line} on {chip}")]
    Gpio {
        chip: String,
        line: u32,
        #[source]
        source: linux_embedded_hal::gpio_cdev::errors::Error,
    },
}

//! TOML configuration loader

use std::fs;
use std::path::Path;

use orderbolt_core::config::DisplayConfig;
use serde::Deserialize;

use crate::error::DaemonError;

/// Default configuration compiled into the binary
/// Edit orderbolt.toml and rebuild to change it
pub const EMBEDDED_CONFIG: &str = include_str!("../../orderbolt.toml");

/// Where the panel and indicator are attached
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HardwareConfig {
    /// I2C character device the panel is on
    pub i2c_bus: String,
    /// 7-bit panel address
    pub panel_address: u8,
    /// Panel contrast applied at init
    pub contrast: u8,
    /// GPIO character device for the indicator
    pub gpio_chip: String,
    /// Line offset on `gpio_chip`
    pub indicator_line: u32,
    /// LED lit when the line is low
    pub indicator_active_low: bool,
}

impl Default for HardwareConfig {
    fn default() -> Self {
        Self {
            i2c_bus: String::from("/dev/i2c-1"),
            panel_address: 0x3C,
            contrast: 0xCF,
            gpio_chip: String::from("/dev/gpiochip0"),
            indicator_line: 17,
            indicator_active_low: false,
        }
    }
}

impl HardwareConfig {
    fn validate(&self) -> Result<(), DaemonError> {
        if !(0x08..=0x77).contains(&self.panel_address) {
            return Err(DaemonError::InvalidHardware(format!(
                "panel_address 0x{:02X} is not a usable 7-bit address",
                self.panel_address
            )));
        }
        if self.i2c_bus.is_empty() || self.gpio_chip.is_empty() {
            return Err(DaemonError::InvalidHardware(String::from(
                "device paths must not be empty",
            )));
        }
        Ok(())
    }
}

/// Everything the daemon reads at startup
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DaemonConfig {
    pub display: DisplayConfig,
    pub hardware: HardwareConfig,
}

/// Parse and validate a configuration document
pub fn parse(text: &str) -> Result<DaemonConfig, DaemonError> {
    let config: DaemonConfig = toml::from_str(text)?;
    config
        .display
        .validate()
        .map_err(DaemonError::InvalidDisplay)?;
    config.hardware.validate()?;
    Ok(config)
}

/// Load the configuration from `path`, or the embedded default
pub fn load(path: Option<&Path>) -> Result<DaemonConfig, DaemonError> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|source| DaemonError::ConfigRead {
                path: path.to_path_buf(),
                source,
            })?;
            parse(&text)
        }
        None => parse(EMBEDDED_CONFIG),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderbolt_core::config::ConfigError;
    use orderbolt_core::indicator::PulsePattern;
    use orderbolt_core::sequencer::DwellPolicy;
    use orderbolt_core::text::Alignment;

    #[test]
    fn test_embedded_config_is_valid() {
        let config = load(None).unwrap();
        assert_eq!(config.display.width, 128);
        assert_eq!(config.display.tick_rate_hz, 10);
        assert_eq!(config.display.idle_banner.as_deref(), Some("Orderbolt"));
        assert_eq!(config.display.indicator.arrival, PulsePattern::new(45, 2, 2));
        assert_eq!(config.hardware, HardwareConfig::default());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config, DaemonConfig::default());
        assert_eq!(config.display.idle_banner, None);
    }

    #[test]
    fn test_partial_sections() {
        let config = parse(
            r#"
            [display.scroll]
            alignment = "left"

            [display.timing]
            item_ticks = 40
            item_policy = "scroll_pass"

            [hardware]
            panel_address = 0x3D
            "#,
        )
        .unwrap();
        assert_eq!(config.display.scroll.alignment, Alignment::Left);
        assert_eq!(config.display.scroll.speed, 24);
        assert_eq!(config.display.timing.item_ticks, 40);
        assert_eq!(config.display.timing.item_policy, DwellPolicy::ScrollPass);
        assert_eq!(config.display.timing.flash_ticks, 30);
        assert_eq!(config.hardware.panel_address, 0x3D);
        assert_eq!(config.hardware.i2c_bus, "/dev/i2c-1");
    }

    #[test]
    fn test_invalid_display_values() {
        let err = parse("[display]\ntick_rate_hz = 0\n").unwrap_err();
        assert!(matches!(
            err,
            DaemonError::InvalidDisplay(ConfigError::InvalidTickRate(0))
        ));
    }

    #[test]
    fn test_invalid_hardware_values() {
        let err = parse("[hardware]\npanel_address = 0x02\n").unwrap_err();
        assert!(matches!(err, DaemonError::InvalidHardware(_)));
    }

    #[test]
    fn test_syntax_error() {
        assert!(matches!(
            parse("[display\nwidth = 1"),
            Err(DaemonError::ConfigParse(_))
        ));
        // Banner longer than the engine can hold
        let long = format!("[display]\nidle_banner = \"{}\"\n", "x".repeat(40));
        assert!(matches!(parse(&long), Err(DaemonError::ConfigParse(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = load(Some(Path::new("/nonexistent/orderbolt.toml"))).unwrap_err();
        assert!(matches!(err, DaemonError::ConfigRead { .. }));
    }
}

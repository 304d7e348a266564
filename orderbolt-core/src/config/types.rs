//! Configuration type definitions
//!
//! Defaults reproduce the behaviour of the first hand-wired prototype: a
//! 128x64 SH1106 refreshed every 100 ms, a three second alert, eight seconds
//! per detail screen and a burst of LED blinks per order.

use core::fmt;

use heapless::String;

use crate::indicator::PulsePattern;
use crate::sequencer::DwellPolicy;
use crate::text::{Alignment, DEFAULT_SCROLL_SPEED};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum idle banner length (characters)
pub const MAX_BANNER_LEN: usize = 32;

/// Largest panel we accept
pub const MAX_PANEL_WIDTH: u16 = 256;
pub const MAX_PANEL_HEIGHT: u16 = 128;

/// Highest supported tick rate
pub const MAX_TICK_RATE_HZ: u16 = 100;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Width or height is zero or above the supported maximum
    InvalidDimensions { width: u16, height: u16 },
    /// Tick rate is zero or above `MAX_TICK_RATE_HZ`
    InvalidTickRate(u16),
    /// Scroll speed of zero would never finish a pass
    ZeroScrollSpeed,
    /// A state duration is zero ticks
    ZeroDuration(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidDimensions { width, height } => write!(
                f,
                "panel size {}x{} outside 1x1..{}x{}",
                width, height, MAX_PANEL_WIDTH, MAX_PANEL_HEIGHT
            ),
            ConfigError::InvalidTickRate(hz) => {
                write!(f, "tick rate {} Hz outside 1..={}", hz, MAX_TICK_RATE_HZ)
            }
            ConfigError::ZeroScrollSpeed => write!(f, "scroll speed must be at least 1"),
            ConfigError::ZeroDuration(field) => write!(f, "{} must be at least one tick", field),
        }
    }
}

/// Scroll engine settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScrollConfig {
    /// Speed in sixteenths of a pixel per tick
    pub speed: u16,
    /// Placement of text that fits the panel
    pub alignment: Alignment,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SCROLL_SPEED,
            alignment: Alignment::Center,
        }
    }
}

/// Per-state durations, all in ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimingConfig {
    /// Lightning alert length
    pub flash_ticks: u32,
    /// Order summary dwell
    pub detail_ticks: u32,
    /// Dwell per line item
    pub item_ticks: u32,
    /// Transition back to idle
    pub return_ticks: u32,
    /// When the summary screen is done
    pub detail_policy: DwellPolicy,
    /// When a line item screen is done
    pub item_policy: DwellPolicy,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            flash_ticks: 30,
            detail_ticks: 80,
            item_ticks: 80,
            return_ticks: 5,
            detail_policy: DwellPolicy::Fixed,
            item_policy: DwellPolicy::Fixed,
        }
    }
}

impl TimingConfig {
    /// Ticks for a complete cycle of an order with `items` fixed-dwell items
    pub fn fixed_cycle_ticks(&self, items: u32) -> u32 {
        self.flash_ticks + self.detail_ticks + self.item_ticks * items + self.return_ticks
    }
}

/// Indicator LED patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct IndicatorConfig {
    /// Played whenever an order is accepted
    pub arrival: PulsePattern,
    /// Played when an order's display cycle starts
    pub cycle_start: Option<PulsePattern>,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            arrival: PulsePattern::new(45, 2, 2),
            cycle_start: None,
        }
    }
}

/// Complete display engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DisplayConfig {
    /// Panel width in pixels
    pub width: u16,
    /// Panel height in pixels
    pub height: u16,
    /// Ticks per second
    pub tick_rate_hz: u16,
    /// Scroll engine settings
    pub scroll: ScrollConfig,
    /// State durations
    pub timing: TimingConfig,
    /// Static text shown while idle (blank panel when `None`)
    pub idle_banner: Option<String<MAX_BANNER_LEN>>,
    /// Indicator LED patterns
    pub indicator: IndicatorConfig,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 128,
            height: 64,
            tick_rate_hz: 10,
            scroll: ScrollConfig::default(),
            timing: TimingConfig::default(),
            idle_banner: None,
            indicator: IndicatorConfig::default(),
        }
    }
}

impl DisplayConfig {
    /// Milliseconds between ticks
    pub fn tick_interval_ms(&self) -> u64 {
        1000 / u64::from(self.tick_rate_hz.max(1))
    }

    /// Convert a wall-clock duration to a tick count (rounded up)
    pub fn ticks_for_ms(&self, ms: u32) -> u32 {
        let per_tick = self.tick_interval_ms() as u32;
        ms.div_ceil(per_tick.max(1))
    }

    /// Check the configuration for values the engine cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0
            || self.height == 0
            || self.width > MAX_PANEL_WIDTH
            || self.height > MAX_PANEL_HEIGHT
        {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        if self.tick_rate_hz == 0 || self.tick_rate_hz > MAX_TICK_RATE_HZ {
            return Err(ConfigError::InvalidTickRate(self.tick_rate_hz));
        }

        if self.scroll.speed == 0 {
            return Err(ConfigError::ZeroScrollSpeed);
        }

        let durations = [
            ("flash_ticks", self.timing.flash_ticks),
            ("detail_ticks", self.timing.detail_ticks),
            ("item_ticks", self.timing.item_ticks),
            ("return_ticks", self.timing.return_ticks),
        ];
        for (field, ticks) in durations {
            if ticks == 0 {
                return Err(ConfigError::ZeroDuration(field));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = DisplayConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.tick_interval_ms(), 100);
    }

    #[test]
    fn test_default_arrival_pulse() {
        let arrival = IndicatorConfig::default().arrival;
        assert_eq!(arrival, PulsePattern::new(45, 2, 2));
        // 0.2 s on, 0.2 s off at 10 Hz
        assert_eq!(arrival.total_ticks(), 180);
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        let config = DisplayConfig {
            width: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidDimensions {
                width: 0,
                height: 64
            })
        );
    }

    #[test]
    fn test_rejects_oversized_panel() {
        let config = DisplayConfig {
            height: MAX_PANEL_HEIGHT + 1,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_tick_rate() {
        let config = DisplayConfig {
            tick_rate_hz: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidTickRate(0)));
    }

    #[test]
    fn test_rejects_zero_duration() {
        let mut config = DisplayConfig::default();
        config.timing.item_ticks = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroDuration("item_ticks"))
        );
    }

    #[test]
    fn test_rejects_zero_speed() {
        let mut config = DisplayConfig::default();
        config.scroll.speed = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroScrollSpeed));
    }

    #[test]
    fn test_ticks_for_ms() {
        let config = DisplayConfig::default();
        assert_eq!(config.ticks_for_ms(3000), 30);
        assert_eq!(config.ticks_for_ms(150), 2);
        assert_eq!(config.ticks_for_ms(0), 0);
    }

    #[test]
    fn test_fixed_cycle_ticks() {
        let timing = TimingConfig {
            flash_ticks: 10,
            detail_ticks: 20,
            item_ticks: 30,
            return_ticks: 5,
            ..Default::default()
        };
        assert_eq!(timing.fixed_cycle_ticks(1), 65);
        assert_eq!(timing.fixed_cycle_ticks(3), 125);
    }
}

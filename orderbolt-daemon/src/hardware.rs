//! Hardware setup
//!
//! Opens the Linux devices named in `[hardware]` and wraps them in the
//! engine's collaborator traits. Embassy tasks cannot be generic, so the
//! real and console backends sit behind small enums.

use std::io::Stdout;

use clap::ValueEnum;
use linux_embedded_hal::gpio_cdev::{Chip, LineRequestFlags};
use linux_embedded_hal::{CdevPin, I2cdev};
use log::info;
use orderbolt_core::traits::{FramePresenter, IndicatorError, IndicatorLine, PresentError};
use orderbolt_core::Framebuffer;
use orderbolt_drivers::bridge::{HalI2c, HalPin};
use orderbolt_drivers::indicator::GpioIndicator;
use orderbolt_drivers::panel::Sh1106;

use crate::config::HardwareConfig;
use crate::console::{ConsolePanel, LogIndicator};
use crate::error::DaemonError;

/// GPIO consumer label shown by `gpioinfo`
const GPIO_CONSUMER: &str = "orderbolt";

/// Panel backend selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PanelKind {
    /// SH1106 OLED over I2C, indicator LED on a GPIO line
    Sh1106,
    /// Frames drawn in the terminal, indicator logged
    Console,
}

pub enum Panel {
    Sh1106(Sh1106<HalI2c<I2cdev>>),
    Console(ConsolePanel<Stdout>),
}

impl FramePresenter for Panel {
    fn present(&mut self, frame: &Framebuffer) -> Result<(), PresentError> {
        match self {
            Panel::Sh1106(panel) => panel.present(frame),
            Panel::Console(panel) => panel.present(frame),
        }
    }
}

pub enum Indicator {
    Gpio(GpioIndicator<HalPin<CdevPin>>),
    Log(LogIndicator),
}

impl IndicatorLine for Indicator {
    fn set_level(&mut self, on: bool) -> Result<(), IndicatorError> {
        match self {
            Indicator::Gpio(led) => led.set_level(on),
            Indicator::Log(led) => led.set_level(on),
        }
    }
}

/// Open the panel and indicator for `kind`
pub fn open(kind: PanelKind, config: &HardwareConfig) -> Result<(Panel, Indicator), DaemonError> {
    match kind {
        PanelKind::Sh1106 => Ok((open_sh1106(config)?, open_gpio_indicator(config)?)),
        PanelKind::Console => {
            info!("Console panel: frames go to stdout");
            Ok((
                Panel::Console(ConsolePanel::new(std::io::stdout(), true)),
                Indicator::Log(LogIndicator::new()),
            ))
        }
    }
}

fn open_sh1106(config: &HardwareConfig) -> Result<Panel, DaemonError> {
    let i2c = I2cdev::new(&config.i2c_bus).map_err(|e| DaemonError::I2cOpen {
        bus: config.i2c_bus.clone(),
        reason: e.to_string(),
    })?;

    let mut panel = Sh1106::new(HalI2c(i2c), config.panel_address).with_contrast(config.contrast);
    panel.init().map_err(|e| DaemonError::PanelInit {
        address: config.panel_address,
        reason: format!("{:?}", e),
    })?;

    info!(
        "SH1106 ready on {} at 0x{:02X}",
        config.i2c_bus, config.panel_address
    );
    Ok(Panel::Sh1106(panel))
}

fn open_gpio_indicator(config: &HardwareConfig) -> Result<Indicator, DaemonError> {
    let gpio_err = |source| DaemonError::Gpio {
        chip: config.gpio_chip.clone(),
        line: config.indicator_line,
        source,
    };

    // Request the line already at its "off" level
    let off_level = u8::from(config.indicator_active_low);
    let mut chip = Chip::new(&config.gpio_chip).map_err(gpio_err)?;
    let handle = chip
        .get_line(config.indicator_line)
        .map_err(gpio_err)?
        .request(LineRequestFlags::OUTPUT, off_level, GPIO_CONSUMER)
        .map_err(gpio_err)?;
    let pin = CdevPin::new(handle).map_err(gpio_err)?;

    info!(
        "Indicator on {} line {} (active {})",
        config.gpio_chip,
        config.indicator_line,
        if config.indicator_active_low { "low" } else { "high" }
    );
    Ok(Indicator::Gpio(GpioIndicator::new(
        HalPin(pin),
        config.indicator_active_low,
    )))
}

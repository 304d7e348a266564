//! Orderbolt - order alert daemon
//!
//! Reads shop order webhooks (one JSON object per line on stdin), queues
//! them, and plays each one on a small OLED: a lightning flash, the order
//! summary, then every line item in turn. An indicator LED blinks as orders
//! arrive.
//!
//! Configuration comes from the embedded orderbolt.toml unless `--config`
//! names another file. Logging is controlled with `RUST_LOG` (default info).

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use embassy_executor::Executor;
use log::info;
use static_cell::StaticCell;

mod channels;
mod config;
mod console;
mod error;
mod hardware;
mod tasks;

use crate::channels::ORDER_INBOX;
use crate::hardware::PanelKind;

/// Executor lives for the whole process
static EXECUTOR: StaticCell<Executor> = StaticCell::new();

#[derive(Debug, Parser)]
#[command(name = "orderbolt", version, about = "Order alert display daemon")]
struct Cli {
    /// TOML configuration file (defaults to the built-in configuration)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Where frames are shown
    #[arg(long, value_enum, default_value = "sh1106", value_name = "PANEL")]
    panel: PanelKind,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("Orderbolt {} starting", env!("CARGO_PKG_VERSION"));

    let config = config::load(cli.config.as_deref()).context("loading configuration")?;
    let display = &config.display;
    info!(
        "Panel {}x{}, {} Hz, flash {} / detail {} / item {} / return {} ticks",
        display.width,
        display.height,
        display.tick_rate_hz,
        display.timing.flash_ticks,
        display.timing.detail_ticks,
        display.timing.item_ticks,
        display.timing.return_ticks
    );
    match cli.config.as_deref() {
        Some(path) => info!("Config loaded from {}", path.display()),
        None => info!("Using built-in configuration"),
    }

    let (panel, indicator) =
        hardware::open(cli.panel, &config.hardware).context("opening display hardware")?;

    tasks::spawn_stdin(&ORDER_INBOX).context("starting intake thread")?;

    let display_config = config.display;
    let executor = EXECUTOR.init(Executor::new());
    executor.run(move |spawner| {
        spawner
            .spawn(tasks::display_task(display_config, panel, indicator))
            .unwrap();
    })
}

//! Display task
//!
//! Owns the display controller and advances it once per tick from an
//! embassy-time `Ticker`. A slow panel write delays the next tick but never
//! drops one: the ticker catches up by firing late ticks back to back.

use std::fmt::Display;

use embassy_time::{Duration, Ticker};
use log::{debug, info, warn};
use orderbolt_core::config::DisplayConfig;
use orderbolt_core::{DisplayController, TickReport};

use crate::channels::ORDER_INBOX;
use crate::hardware::{Indicator, Panel};

/// Health of one collaborator as seen tick by tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Health {
    Ok,
    /// First failure after a healthy run
    Failed,
    /// Still failing; count of consecutive failures so far
    StillFailing(u32),
    /// Healthy again after this many failed ticks
    Recovered(u32),
}

/// Collapses per-tick results into state changes worth logging
#[derive(Debug)]
pub struct FailureTracker {
    name: &'static str,
    failures: u32,
}

impl FailureTracker {
    pub const fn new(name: &'static str) -> Self {
        Self { name, failures: 0 }
    }

    pub fn is_failing(&self) -> bool {
        self.failures > 0
    }

    /// Fold in one tick's result
    pub fn observe<E>(&mut self, error: Option<&E>) -> Health {
        match (error, self.failures) {
            (None, 0) => Health::Ok,
            (None, n) => {
                self.failures = 0;
                Health::Recovered(n)
            }
            (Some(_), 0) => {
                self.failures = 1;
                Health::Failed
            }
            (Some(_), n) => {
                self.failures = n.saturating_add(1);
                Health::StillFailing(self.failures)
            }
        }
    }

    /// Observe and log: first failure at warn, repeats at debug, recovery at info
    pub fn log<E: Display>(&mut self, tick: u64, error: Option<&E>) -> Health {
        let health = self.observe(error);
        match (health, error) {
            (Health::Failed, Some(e)) => warn!("{} failed at tick {}: {}", self.name, tick, e),
            (Health::StillFailing(n), Some(e)) => {
                debug!("{} still failing at tick {} ({}x): {}", self.name, tick, n, e)
            }
            (Health::Recovered(n), _) => {
                info!("{} recovered at tick {} after {} failed ticks", self.name, tick, n)
            }
            _ => {}
        }
        health
    }
}

/// Log the cycle boundaries of one tick
pub fn log_cycle(report: &TickReport, queued: usize) {
    if report.arrivals > 0 {
        debug!(
            "Tick {}: {} order(s) arrived, {} waiting",
            report.tick, report.arrivals, queued
        );
    }
    if let Some(id) = &report.started {
        info!("Showing order {} ({} waiting)", id, queued);
    }
    if report.finished {
        info!("Display cycle finished at tick {}", report.tick);
    }
}

/// Display task - advances the controller every tick
#[embassy_executor::task]
pub async fn display_task(config: DisplayConfig, panel: Panel, indicator: Indicator) {
    info!(
        "Display task started ({}x{} @ {} Hz)",
        config.width, config.height, config.tick_rate_hz
    );

    let mut controller = DisplayController::new(&config, &ORDER_INBOX, panel, indicator);
    let mut panel_health = FailureTracker::new("Panel");
    let mut indicator_health = FailureTracker::new("Indicator");

    let mut ticker = Ticker::every(Duration::from_millis(config.tick_interval_ms()));
    loop {
        ticker.next().await;

        let report = controller.advance();
        log_cycle(&report, controller.queued());
        panel_health.log(report.tick, report.present_error.as_ref());
        indicator_health.log(report.tick, report.indicator_error.as_ref());
    }
}

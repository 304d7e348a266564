//! Order intake
//!
//! Reads webhook bodies, one JSON object per line, and hands valid orders
//! to the display task through the shared inbox. Runs on its own OS thread
//! since stdin reads block; the inbox is the only state it touches.

use std::io::{self, BufRead};
use std::thread::{self, JoinHandle};

use log::{info, warn};
use orderbolt_core::OrderInbox;
use orderbolt_protocol::parse_order;

/// Outcome of reading one input stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntakeStats {
    pub accepted: u32,
    pub rejected: u32,
}

/// Feed every line of `reader` into `inbox` until end of input
///
/// Lines are handled as raw bytes so one undecodable line is rejected like
/// any other malformed order. Only a read error ends the stream.
pub fn pump<R: BufRead>(reader: R, inbox: &OrderInbox) -> io::Result<IntakeStats> {
    let mut stats = IntakeStats::default();

    for (index, line) in reader.split(b'\n').enumerate() {
        let line = line?;
        let body = line.trim_ascii();
        if body.is_empty() {
            continue;
        }

        match parse_order(body) {
            Ok(order) => {
                let id = order.id().to_owned();
                let items = order.item_count();
                let seq = inbox.submit(order);
                stats.accepted += 1;
                info!("Order {} accepted ({} items, arrival #{})", id, items, seq);
            }
            Err(e) => {
                stats.rejected += 1;
                warn!("Rejected order on line {}: {}", index + 1, e);
            }
        }
    }

    Ok(stats)
}

/// Start the stdin reader thread
pub fn spawn_stdin(inbox: &'static OrderInbox) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("intake".into())
        .spawn(move || {
            info!("Intake started, reading orders from stdin");
            match pump(io::stdin().lock(), inbox) {
                Ok(stats) => info!(
                    "Intake reached end of input ({} accepted, {} rejected)",
                    stats.accepted, stats.rejected
                ),
                Err(e) => warn!("Intake stopped: {}", e),
            }
        })
}

//! Shared state between the intake thread and the display task

use orderbolt_core::OrderInbox;

/// Orders accepted by intake, drained by the display task once per tick
pub static ORDER_INBOX: OrderInbox = OrderInbox::new();

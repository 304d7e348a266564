//! Order webhook payload adapter
//!
//! The shop platform POSTs one JSON document per order. Whatever receives
//! the webhook hands the raw body to [`parse_order`], which keeps the few
//! fields the display needs and validates them into an `Order`:
//!
//! ```text
//! {
//!   "id": 820982911946154508,
//!   "name": "#1001",              -> order id (fallback "#<id>")
//!   "total_price": "19.98",       -> total (string or number)
//!   "currency": "USD",
//!   "customer": { "first_name": "Ada" },
//!   "line_items": [ { "name": "Lightning Mug", "quantity": 2 } ]
//! }
//! ```
//!
//! Unknown fields are ignored.

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

pub mod error;
pub mod payload;

pub use error::PayloadError;
pub use payload::{parse_order, OrderPayload};

//! Board-agnostic core logic for the order display
//!
//! This crate contains everything between "an order arrived" and "these are
//! the pixels to push to the panel", with no hardware dependencies:
//!
//! - Framebuffer model (1 bit per pixel, SH1106 page layout)
//! - Text layout and sub-pixel scroll engine
//! - Animation sequencer (Idle / Flash / Detail / Items / ReturnToIdle)
//! - Order model, FIFO queue and the thread-safe inbox hand-off
//! - Display controller (one order cycle at a time)
//! - Indicator pulse coordinator
//! - Configuration type definitions
//! - Collaborator traits for the panel and the indicator line

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

pub mod config;
pub mod controller;
pub mod framebuffer;
pub mod indicator;
pub mod order;
pub mod sequencer;
pub mod text;
pub mod traits;

pub use controller::{DisplayController, TickReport};
pub use framebuffer::Framebuffer;
pub use order::{LineItem, Order, OrderError, OrderInbox, OrderQueue};
pub use sequencer::{Sequencer, SequencerState};

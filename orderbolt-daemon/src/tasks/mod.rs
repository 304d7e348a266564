//! Daemon tasks
//!
//! The display task runs on the embassy executor; intake blocks on stdin and
//! gets an OS thread of its own. They share nothing but the order inbox.

pub mod display;
pub mod intake;

pub use display::display_task;
pub use intake::spawn_stdin;

//! Animation sequencer
//!
//! A finite state machine that turns one order into a tick-timed run of
//! frames: lightning flash, order summary, one screen per line item, then a
//! short wipe back to idle. The sequencer is the only owner of the
//! framebuffer and the only code that changes `SequencerState`.

pub mod engine;
pub mod events;
pub mod scenes;
pub mod state;

pub use engine::{Sequencer, SequencerBusy, SequencerStatus};
pub use events::Event;
pub use scenes::DwellPolicy;
pub use state::SequencerState;

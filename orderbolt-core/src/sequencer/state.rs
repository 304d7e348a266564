//! Sequencer state machine definition

use super::events::Event;

/// Sequencer states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequencerState {
    /// Nothing to show, idle frame on screen
    #[default]
    Idle,
    /// Lightning alert for a new order
    Flash,
    /// Order summary screen
    Detail,
    /// One screen per line item
    Items,
    /// Wipe back to the idle frame
    ReturnToIdle,
}

impl SequencerState {
    /// Check if an order cycle is in progress
    pub fn is_animating(&self) -> bool {
        !matches!(self, SequencerState::Idle)
    }

    /// Short label for logs
    pub fn name(&self) -> &'static str {
        match self {
            SequencerState::Idle => "idle",
            SequencerState::Flash => "flash",
            SequencerState::Detail => "detail",
            SequencerState::Items => "items",
            SequencerState::ReturnToIdle => "return",
        }
    }

    /// Process an event and return the next state
    ///
    /// Pairs not listed leave the state unchanged, so a stray event can never
    /// cut a cycle short.
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use SequencerState::*;

        match (self, event) {
            (Idle, OrderDequeued) => Flash,
            (Flash, FlashElapsed) => Detail,
            (Detail, DetailElapsed) => Items,
            (Items, NextItem) => Items,
            (Items, ItemsFinished) => ReturnToIdle,
            (ReturnToIdle, ReturnElapsed) => Idle,

            // Default: stay in current state
            _ => self,
        }
    }
}

//! Events that move the sequencer between states

/// Sequencer events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// The controller handed over the next queued order
    OrderDequeued,

    // Dwell events, raised by the sequencer itself
    /// Lightning alert played for its full duration
    FlashElapsed,
    /// Order summary dwell finished
    DetailElapsed,
    /// Line item dwell finished and more items remain
    NextItem,
    /// Last line item dwell finished
    ItemsFinished,
    /// Wipe back to idle finished
    ReturnElapsed,
}

impl Event {
    /// Check if this event comes from outside the sequencer
    pub fn is_external(&self) -> bool {
        matches!(self, Event::OrderDequeued)
    }

    /// Check if this event marks the end of a state's dwell
    pub fn is_dwell_event(&self) -> bool {
        !self.is_external()
    }
}

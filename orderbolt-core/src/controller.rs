//! Display controller
//!
//! The single point that decides what is on screen. Once per tick it pulls
//! new orders out of the inbox, starts the next cycle when the sequencer is
//! idle, renders and presents one frame, then drives the indicator.
//!
//! Collaborator failures are recorded in the `TickReport` and never change
//! the sequence of states.

use alloc::string::String;

use crate::config::DisplayConfig;
use crate::indicator::PulseCoordinator;
use crate::order::{OrderInbox, OrderQueue};
use crate::sequencer::{Sequencer, SequencerState, SequencerStatus};
use crate::traits::{FramePresenter, IndicatorError, IndicatorLine, PresentError};

/// What happened on one tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    /// Tick number, starting at 1
    pub tick: u64,
    /// State rendered on this tick
    pub state: SequencerState,
    /// Orders moved from the inbox into the queue
    pub arrivals: usize,
    /// Id of the order whose cycle started on this tick
    pub started: Option<String>,
    /// A cycle finished on this tick
    pub finished: bool,
    pub present_error: Option<PresentError>,
    pub indicator_error: Option<IndicatorError>,
}

/// Drives the sequencer, the panel and the indicator from one tick source
pub struct DisplayController<'a, P, L>
where
    P: FramePresenter,
    L: IndicatorLine,
{
    inbox: &'a OrderInbox,
    queue: OrderQueue,
    sequencer: Sequencer,
    pulses: PulseCoordinator,
    presenter: P,
    indicator: L,
    /// Level last written successfully, `None` until the first write
    indicator_level: Option<bool>,
    ticks: u64,
}

impl<'a, P, L> DisplayController<'a, P, L>
where
    P: FramePresenter,
    L: IndicatorLine,
{
    pub fn new(config: &DisplayConfig, inbox: &'a OrderInbox, presenter: P, indicator: L) -> Self {
        Self {
            inbox,
            queue: OrderQueue::new(),
            sequencer: Sequencer::new(config),
            pulses: PulseCoordinator::new(
                config.indicator.arrival,
                config.indicator.cycle_start,
            ),
            presenter,
            indicator,
            indicator_level: None,
            ticks: 0,
        }
    }

    /// Run one tick
    pub fn advance(&mut self) -> TickReport {
        self.ticks += 1;

        // 1. Collect arrivals
        let arrivals = self.inbox.drain_into(&mut self.queue);
        for _ in 0..arrivals {
            self.pulses.on_order_accepted();
        }

        // 2. Start the next cycle when idle
        let mut started = None;
        if self.sequencer.is_idle() {
            if let Some(order) = self.queue.pop() {
                let id = String::from(order.id());
                if self.sequencer.begin(order).is_ok() {
                    self.pulses.on_cycle_start();
                    started = Some(id);
                }
            }
        }

        // 3. Render and present
        let state = self.sequencer.state();
        let cycles_before = self.sequencer.cycles_completed();
        let frame = self.sequencer.tick();
        let present_error = self.presenter.present(frame).err();
        let finished = self.sequencer.cycles_completed() != cycles_before;

        // 4. Indicator
        let level = self.pulses.tick();
        let mut indicator_error = None;
        if self.indicator_level != Some(level) {
            match self.indicator.set_level(level) {
                Ok(()) => self.indicator_level = Some(level),
                Err(e) => {
                    // Retried next tick
                    self.indicator_level = None;
                    indicator_error = Some(e);
                }
            }
        }

        TickReport {
            tick: self.ticks,
            state,
            arrivals,
            started,
            finished,
            present_error,
            indicator_error,
        }
    }

    /// Orders waiting behind the current cycle
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    pub fn status(&self) -> SequencerStatus<'_> {
        self.sequencer.status()
    }

    pub fn inbox(&self) -> &'a OrderInbox {
        self.inbox
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn indicator(&self) -> &L {
        &self.indicator
    }

    pub fn pulses(&self) -> &PulseCoordinator {
        &self.pulses
    }

    /// Ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::Framebuffer;
    use crate::indicator::PulsePattern;
    use crate::order::{LineItem, Order};
    use alloc::vec;
    use alloc::vec::Vec;

    #[derive(Default)]
    struct Recorder {
        frames: usize,
    }

    impl FramePresenter for Recorder {
        fn present(&mut self, _frame: &Framebuffer) -> Result<(), PresentError> {
            self.frames += 1;
            Ok(())
        }
    }

    #[derive(Default)]
    struct Led {
        writes: Vec<bool>,
    }

    impl IndicatorLine for Led {
        fn set_level(&mut self, on: bool) -> Result<(), IndicatorError> {
            self.writes.push(on);
            Ok(())
        }
    }

    fn config() -> DisplayConfig {
        let mut config = DisplayConfig::default();
        config.timing.flash_ticks = 2;
        config.timing.detail_ticks = 2;
        config.timing.item_ticks = 2;
        config.timing.return_ticks = 1;
        config.indicator.arrival = PulsePattern::new(1, 2, 1);
        config
    }

    fn order(id: &str) -> Order {
        Order::new(id, vec![LineItem::new("Mug", 1)], "5.00", "USD").unwrap()
    }

    #[test]
    fn test_idle_without_orders() {
        let inbox = OrderInbox::new();
        let mut controller =
            DisplayController::new(&config(), &inbox, Recorder::default(), Led::default());
        for _ in 0..5 {
            let report = controller.advance();
            assert_eq!(report.state, SequencerState::Idle);
            assert_eq!(report.arrivals, 0);
            assert!(report.started.is_none());
        }
        assert_eq!(controller.presenter().frames, 5);
        // First tick writes the initial (off) level, then nothing changes
        assert_eq!(controller.indicator().writes, [false]);
    }

    #[test]
    fn test_arrival_starts_cycle_same_tick() {
        let inbox = OrderInbox::new();
        let mut controller =
            DisplayController::new(&config(), &inbox, Recorder::default(), Led::default());
        inbox.submit(order("#1"));

        let report = controller.advance();
        assert_eq!(report.tick, 1);
        assert_eq!(report.arrivals, 1);
        assert_eq!(report.started.as_deref(), Some("#1"));
        assert_eq!(report.state, SequencerState::Flash);
        assert_eq!(controller.queued(), 0);
    }

    #[test]
    fn test_cycle_finishes() {
        let inbox = OrderInbox::new();
        let mut controller =
            DisplayController::new(&config(), &inbox, Recorder::default(), Led::default());
        inbox.submit(order("#1"));

        // 2 + 2 + 2 + 1 ticks
        let reports: Vec<_> = (0..7).map(|_| controller.advance()).collect();
        assert!(reports[..6].iter().all(|r| !r.finished));
        assert!(reports[6].finished);
        assert_eq!(reports[6].state, SequencerState::ReturnToIdle);
        assert!(controller.sequencer().is_idle());
    }

    #[test]
    fn test_arrival_pulse_drives_indicator() {
        let inbox = OrderInbox::new();
        let mut controller =
            DisplayController::new(&config(), &inbox, Recorder::default(), Led::default());
        inbox.submit(order("#1"));
        for _ in 0..5 {
            controller.advance();
        }
        // on, on, off, off, off: written on change only
        assert_eq!(controller.indicator().writes, [true, false]);
        assert!(!controller.pulses().is_active());
    }

    #[test]
    fn test_cycle_start_pulse_replaces_arrival_pulse() {
        let mut config = config();
        config.indicator.cycle_start = Some(PulsePattern::new(2, 1, 1));
        let inbox = OrderInbox::new();
        let mut controller =
            DisplayController::new(&config, &inbox, Recorder::default(), Led::default());
        inbox.submit(order("#1"));

        for _ in 0..4 {
            controller.advance();
        }
        // Arrival alone would be on, on, off; the cycle-start blinks win
        assert_eq!(controller.indicator().writes, [true, false, true, false]);
        assert!(!controller.pulses().is_active());

        // An arrival mid-cycle does not start a cycle, so its pattern plays
        inbox.submit(order("#2"));
        controller.advance();
        controller.advance();
        assert_eq!(
            controller.indicator().writes,
            [true, false, true, false, true]
        );
        assert_eq!(controller.pulses().remaining_ticks(), 1);
    }
}

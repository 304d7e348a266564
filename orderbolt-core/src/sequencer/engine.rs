//! Sequencer engine
//!
//! Drives one order through Flash, Detail, Items and ReturnToIdle, one
//! frame per `tick()`. A state whose scene completes on a tick transitions
//! right away, so the following tick already renders the next state and no
//! tick is spent in between.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use super::events::Event;
use super::scenes::{flash_seed, ActiveScene, FlashScene, IdleScene, ReturnScene, TextScene};
use super::state::SequencerState;
use crate::config::DisplayConfig;
use crate::framebuffer::Framebuffer;
use crate::order::{LineItem, Order};

/// `begin()` was called while a cycle is still running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SequencerBusy(pub SequencerState);

impl fmt::Display for SequencerBusy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sequencer busy in {} state", self.0.name())
    }
}

/// Snapshot of sequencer progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SequencerStatus<'a> {
    pub state: SequencerState,
    /// Ticks already rendered in the current state
    pub tick_in_state: u32,
    /// Ticks the current state runs for (0 while idle)
    pub state_duration: u32,
    /// Index of the line item on screen (0 outside `Items`)
    pub item_index: usize,
    /// Line items in the active order
    pub item_count: usize,
    /// Id of the active order
    pub order_id: Option<&'a str>,
}

/// Display sequencer
///
/// Owns the framebuffer. Callers hand it one order at a time with `begin()`
/// and pull one frame per tick.
#[derive(Debug)]
pub struct Sequencer {
    config: DisplayConfig,
    state: SequencerState,
    idle: IdleScene,
    scene: Option<ActiveScene>,
    frame: Framebuffer,
    order: Option<Order>,
    item_index: usize,
    tick_in_state: u32,
    cycles_completed: u32,
}

impl Sequencer {
    pub fn new(config: &DisplayConfig) -> Self {
        let banner = config.idle_banner.as_ref().map(|b| b.as_str());
        Self {
            config: config.clone(),
            state: SequencerState::Idle,
            idle: IdleScene::new(config.width, config.height, banner),
            scene: None,
            frame: Framebuffer::new(config.width, config.height),
            order: None,
            item_index: 0,
            tick_in_state: 0,
            cycles_completed: 0,
        }
    }

    /// Start the display cycle for `order`
    ///
    /// Only possible while idle. The next `tick()` renders the first flash
    /// frame.
    pub fn begin(&mut self, order: Order) -> Result<(), SequencerBusy> {
        let next = self.state.transition(Event::OrderDequeued);
        if next == self.state {
            return Err(SequencerBusy(self.state));
        }

        let flash = FlashScene::new(
            self.config.width,
            self.config.height,
            flash_seed(order.id()),
            self.config.timing.flash_ticks,
        );
        self.order = Some(order);
        self.item_index = 0;
        self.enter(next, Some(ActiveScene::Flash(flash)));
        Ok(())
    }

    /// Render the current state into the framebuffer, then advance one tick
    pub fn tick(&mut self) -> &Framebuffer {
        match self.scene.as_mut() {
            Some(scene) => scene.tick(&mut self.frame),
            None => self.idle.tick(&mut self.frame),
        }

        if self.state.is_animating() {
            self.tick_in_state = self.tick_in_state.saturating_add(1);
            if self.state_complete() {
                self.finish_state();
            }
        }

        &self.frame
    }

    /// Last rendered frame
    pub fn frame(&self) -> &Framebuffer {
        &self.frame
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == SequencerState::Idle
    }

    /// Whether the current state has run its full duration
    pub fn state_complete(&self) -> bool {
        self.scene.as_ref().is_some_and(ActiveScene::is_complete)
    }

    pub fn status(&self) -> SequencerStatus<'_> {
        SequencerStatus {
            state: self.state,
            tick_in_state: self.tick_in_state,
            state_duration: self.scene.as_ref().map(ActiveScene::duration).unwrap_or(0),
            item_index: self.item_index,
            item_count: self.order.as_ref().map(|o| o.items().len()).unwrap_or(0),
            order_id: self.order.as_ref().map(Order::id),
        }
    }

    /// The order being shown, if any
    pub fn order(&self) -> Option<&Order> {
        self.order.as_ref()
    }

    /// The line item on screen while in `Items`
    pub fn current_item(&self) -> Option<&LineItem> {
        if self.state != SequencerState::Items {
            return None;
        }
        self.order.as_ref()?.items().get(self.item_index)
    }

    /// Orders shown to completion
    pub fn cycles_completed(&self) -> u32 {
        self.cycles_completed
    }

    fn enter(&mut self, state: SequencerState, scene: Option<ActiveScene>) {
        self.state = state;
        self.scene = scene;
        self.tick_in_state = 0;
    }

    /// Raise the dwell event for the finished state and set up the next scene
    fn finish_state(&mut self) {
        let Some(order) = self.order.as_ref() else {
            self.enter(SequencerState::Idle, None);
            return;
        };

        let (event, scene) = match self.state {
            SequencerState::Flash => (Event::FlashElapsed, Some(self.detail_scene(order))),
            SequencerState::Detail => (Event::DetailElapsed, Some(self.item_scene(order, 0))),
            SequencerState::Items if self.item_index + 1 < order.items().len() => {
                (Event::NextItem, Some(self.item_scene(order, self.item_index + 1)))
            }
            SequencerState::Items => (
                Event::ItemsFinished,
                Some(ActiveScene::Return(ReturnScene::new(
                    self.config.timing.return_ticks,
                ))),
            ),
            SequencerState::ReturnToIdle => (Event::ReturnElapsed, None),
            SequencerState::Idle => return,
        };

        match event {
            Event::DetailElapsed => self.item_index = 0,
            Event::NextItem => self.item_index += 1,
            Event::ReturnElapsed => {
                self.order = None;
                self.item_index = 0;
                self.cycles_completed = self.cycles_completed.wrapping_add(1);
            }
            _ => {}
        }

        let next = self.state.transition(event);
        self.enter(next, scene);
    }

    fn detail_scene(&self, order: &Order) -> ActiveScene {
        let total = format!("Total: {} {}", order.total(), order.currency());
        let mut lines: Vec<String> = Vec::with_capacity(4);
        lines.push(format!("Order {}", order.id()));
        lines.push(String::from(total.trim_end()));
        lines.push(format!("Items: {}", order.item_count()));
        if let Some(name) = order.customer() {
            lines.push(format!("Customer: {}", name));
        }

        let timing = &self.config.timing;
        ActiveScene::Text(TextScene::new(
            &lines,
            self.config.width,
            &self.config.scroll,
            timing.detail_policy,
            timing.detail_ticks,
        ))
    }

    fn item_scene(&self, order: &Order, index: usize) -> ActiveScene {
        let items = order.items();
        let (name, quantity) = items
            .get(index)
            .map(|item| (item.name.as_str(), item.quantity))
            .unwrap_or(("", 0));
        let lines = [
            format!("Item {}/{}", index + 1, items.len()),
            String::from(name),
            format!("Qty: {}", quantity),
        ];

        let timing = &self.config.timing;
        ActiveScene::Text(TextScene::new(
            &lines,
            self.config.width,
            &self.config.scroll,
            timing.item_policy,
            timing.item_ticks,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimingConfig;
    use alloc::vec;

    fn config() -> DisplayConfig {
        DisplayConfig {
            timing: TimingConfig {
                flash_ticks: 3,
                detail_ticks: 4,
                item_ticks: 2,
                return_ticks: 2,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn order(items: usize) -> Order {
        let items = (0..items)
            .map(|i| LineItem::new(format!("Product {}", i), 1))
            .collect();
        Order::new("#1001", items, "19.98", "USD").unwrap()
    }

    #[test]
    fn test_starts_idle() {
        let mut sequencer = Sequencer::new(&config());
        assert!(sequencer.is_idle());
        assert_eq!(sequencer.tick().lit_pixels(), 0);
        assert_eq!(sequencer.status().state_duration, 0);
        assert!(sequencer.order().is_none());
    }

    #[test]
    fn test_state_sequence() {
        let mut sequencer = Sequencer::new(&config());
        sequencer.begin(order(2)).unwrap();

        let mut states = Vec::new();
        for _ in 0..13 {
            states.push(sequencer.state());
            sequencer.tick();
        }

        use SequencerState::*;
        assert_eq!(
            states,
            vec![
                Flash, Flash, Flash, Detail, Detail, Detail, Detail, Items, Items, Items, Items,
                ReturnToIdle, ReturnToIdle
            ]
        );
        assert!(sequencer.is_idle());
        assert_eq!(sequencer.cycles_completed(), 1);
        assert!(sequencer.order().is_none());
    }

    #[test]
    fn test_begin_while_busy() {
        let mut sequencer = Sequencer::new(&config());
        sequencer.begin(order(1)).unwrap();
        assert_eq!(
            sequencer.begin(order(1)),
            Err(SequencerBusy(SequencerState::Flash))
        );
        // The running order is untouched
        assert_eq!(sequencer.status().tick_in_state, 0);
    }

    #[test]
    fn test_current_item_tracks_index() {
        let mut sequencer = Sequencer::new(&config());
        sequencer.begin(order(2)).unwrap();
        assert!(sequencer.current_item().is_none());

        for _ in 0..7 {
            sequencer.tick();
        }
        assert_eq!(sequencer.current_item().unwrap().name, "Product 0");
        let status = sequencer.status();
        assert_eq!(status.item_index, 0);
        assert_eq!(status.item_count, 2);
        assert_eq!(status.order_id, Some("#1001"));

        sequencer.tick();
        sequencer.tick();
        assert_eq!(sequencer.current_item().unwrap().name, "Product 1");
    }

    #[test]
    fn test_status_progress() {
        let mut sequencer = Sequencer::new(&config());
        sequencer.begin(order(1)).unwrap();
        sequencer.tick();
        let status = sequencer.status();
        assert_eq!(status.state, SequencerState::Flash);
        assert_eq!(status.tick_in_state, 1);
        assert_eq!(status.state_duration, 3);
        assert!(!sequencer.state_complete());
    }

    #[test]
    fn test_detail_renders_text() {
        let mut sequencer = Sequencer::new(&config());
        sequencer.begin(order(1).with_customer("Ada")).unwrap();
        for _ in 0..3 {
            sequencer.tick();
        }
        assert_eq!(sequencer.state(), SequencerState::Detail);
        assert!(sequencer.tick().lit_pixels() > 0);
    }
}

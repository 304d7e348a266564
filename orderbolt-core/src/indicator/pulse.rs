//! Pulse patterns and the coordinator that plays them

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A blink pattern: `cycles` repetitions of on-then-off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PulsePattern {
    /// Number of blinks
    pub cycles: u8,
    /// Ticks lit per blink
    pub on_ticks: u16,
    /// Ticks dark per blink
    pub off_ticks: u16,
}

impl PulsePattern {
    pub const fn new(cycles: u8, on_ticks: u16, off_ticks: u16) -> Self {
        Self {
            cycles,
            on_ticks,
            off_ticks,
        }
    }

    fn period(&self) -> u32 {
        u32::from(self.on_ticks) + u32::from(self.off_ticks)
    }

    /// Length of the whole pattern in ticks
    pub fn total_ticks(&self) -> u32 {
        u32::from(self.cycles) * self.period()
    }

    /// Level `tick` ticks into the pattern (off once finished)
    pub fn level_at(&self, tick: u32) -> bool {
        if tick >= self.total_ticks() {
            return false;
        }
        tick % self.period() < u32::from(self.on_ticks)
    }
}

/// Plays at most one pulse pattern at a time
///
/// A newly scheduled pattern replaces whatever is playing and starts from its
/// first tick.
#[derive(Debug, Clone)]
pub struct PulseCoordinator {
    arrival: PulsePattern,
    cycle_start: Option<PulsePattern>,
    active: Option<PulsePattern>,
    elapsed: u32,
}

impl PulseCoordinator {
    pub fn new(arrival: PulsePattern, cycle_start: Option<PulsePattern>) -> Self {
        Self {
            arrival,
            cycle_start,
            active: None,
            elapsed: 0,
        }
    }

    /// An order was accepted into the queue
    pub fn on_order_accepted(&mut self) {
        self.schedule(self.arrival);
    }

    /// An order's display cycle started
    pub fn on_cycle_start(&mut self) {
        if let Some(pattern) = self.cycle_start {
            self.schedule(pattern);
        }
    }

    /// Start playing `pattern`, replacing the current one
    pub fn schedule(&mut self, pattern: PulsePattern) {
        self.elapsed = 0;
        self.active = (pattern.total_ticks() > 0).then_some(pattern);
    }

    /// Level for this tick, then advance
    pub fn tick(&mut self) -> bool {
        let Some(pattern) = self.active else {
            return false;
        };

        let level = pattern.level_at(self.elapsed);
        self.elapsed += 1;
        if self.elapsed >= pattern.total_ticks() {
            self.active = None;
            self.elapsed = 0;
        }
        level
    }

    /// Whether a pattern is still playing
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Ticks left in the current pattern
    pub fn remaining_ticks(&self) -> u32 {
        self.active
            .map(|p| p.total_ticks() - self.elapsed)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levels(coordinator: &mut PulseCoordinator, ticks: usize) -> heapless::Vec<bool, 64> {
        let mut out = heapless::Vec::new();
        for _ in 0..ticks {
            let _ = out.push(coordinator.tick());
        }
        out
    }

    #[test]
    fn test_pattern_levels() {
        let pattern = PulsePattern::new(2, 2, 1);
        assert_eq!(pattern.total_ticks(), 6);
        let seen: [bool; 7] = core::array::from_fn(|t| pattern.level_at(t as u32));
        assert_eq!(seen, [true, true, false, true, true, false, false]);
    }

    #[test]
    fn test_idle_coordinator_is_dark() {
        let mut coordinator = PulseCoordinator::new(PulsePattern::new(5, 2, 2), None);
        assert!(!coordinator.is_active());
        assert!(!coordinator.tick());
        assert_eq!(coordinator.remaining_ticks(), 0);
    }

    #[test]
    fn test_arrival_pattern_self_terminates() {
        let mut coordinator = PulseCoordinator::new(PulsePattern::new(2, 1, 1), None);
        coordinator.on_order_accepted();
        assert_eq!(coordinator.remaining_ticks(), 4);

        let seen = levels(&mut coordinator, 6);
        assert_eq!(&seen[..], &[true, false, true, false, false, false]);
        assert!(!coordinator.is_active());
    }

    #[test]
    fn test_new_pattern_replaces_current() {
        let mut coordinator = PulseCoordinator::new(PulsePattern::new(3, 1, 1), None);
        coordinator.on_order_accepted();
        coordinator.tick();
        coordinator.tick();
        coordinator.tick();
        assert_eq!(coordinator.remaining_ticks(), 3);

        // A second arrival restarts the pattern from the beginning
        coordinator.on_order_accepted();
        assert_eq!(coordinator.remaining_ticks(), 6);
        assert!(coordinator.tick());
    }

    #[test]
    fn test_cycle_start_without_pattern_is_noop() {
        let mut coordinator = PulseCoordinator::new(PulsePattern::new(1, 1, 1), None);
        coordinator.on_cycle_start();
        assert!(!coordinator.is_active());

        let mut coordinator =
            PulseCoordinator::new(PulsePattern::new(1, 1, 1), Some(PulsePattern::new(1, 3, 0)));
        coordinator.on_cycle_start();
        assert_eq!(&levels(&mut coordinator, 4)[..], &[true, true, true, false]);
    }

    #[test]
    fn test_empty_pattern_is_ignored() {
        let mut coordinator = PulseCoordinator::new(PulsePattern::new(0, 2, 2), None);
        coordinator.on_order_accepted();
        assert!(!coordinator.is_active());
    }
}

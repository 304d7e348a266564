//! Order FIFO and the cross-thread inbox
//!
//! Orders arrive on whatever thread runs the webhook receiver and are handed
//! to the display task through an `OrderInbox`. The display controller moves
//! them into its own `OrderQueue` at the start of every tick, so the queue
//! itself is never shared.

use alloc::collections::VecDeque;
use core::cell::RefCell;

use embassy_sync::blocking_mutex::CriticalSectionMutex;

use super::Order;

/// FIFO of orders waiting for their display cycle
#[derive(Debug, Default)]
pub struct OrderQueue {
    orders: VecDeque<Order>,
}

impl OrderQueue {
    pub const fn new() -> Self {
        Self {
            orders: VecDeque::new(),
        }
    }

    /// Append at the back
    pub fn push(&mut self, order: Order) {
        self.orders.push_back(order);
    }

    /// Take the oldest order
    pub fn pop(&mut self) -> Option<Order> {
        self.orders.pop_front()
    }

    /// Oldest order without removing it
    pub fn peek(&self) -> Option<&Order> {
        self.orders.front()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }
}

struct Pending {
    orders: VecDeque<Order>,
    submitted: u32,
}

/// Hand-off point between the order producer and the display task
///
/// Guarded by a critical-section mutex, so a `static` inbox can be shared
/// between the intake thread and the tick loop.
pub struct OrderInbox {
    inner: CriticalSectionMutex<RefCell<Pending>>,
}

impl OrderInbox {
    pub const fn new() -> Self {
        Self {
            inner: CriticalSectionMutex::new(RefCell::new(Pending {
                orders: VecDeque::new(),
                submitted: 0,
            })),
        }
    }

    /// Hand over an order, returning its arrival sequence number (from 1)
    pub fn submit(&self, order: Order) -> u32 {
        self.inner.lock(|cell| {
            let mut pending = cell.borrow_mut();
            pending.orders.push_back(order);
            pending.submitted = pending.submitted.wrapping_add(1);
            pending.submitted
        })
    }

    /// Move every waiting order into `queue`, oldest first
    pub fn drain_into(&self, queue: &mut OrderQueue) -> usize {
        self.inner.lock(|cell| {
            let mut pending = cell.borrow_mut();
            let count = pending.orders.len();
            queue.orders.extend(pending.orders.drain(..));
            count
        })
    }

    /// Orders submitted but not yet drained
    pub fn pending(&self) -> usize {
        self.inner.lock(|cell| cell.borrow().orders.len())
    }

    /// Orders submitted since creation
    pub fn submitted(&self) -> u32 {
        self.inner.lock(|cell| cell.borrow().submitted)
    }
}

impl Default for OrderInbox {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::LineItem;
    use alloc::format;
    use alloc::vec;

    fn order(n: u32) -> Order {
        Order::new(format!("#{}", n), vec![LineItem::new("Mug", 1)], "5.00", "USD").unwrap()
    }

    #[test]
    fn test_queue_is_fifo() {
        let mut queue = OrderQueue::new();
        queue.push(order(1));
        queue.push(order(2));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.peek().map(Order::id), Some("#1"));
        assert_eq!(queue.pop().unwrap().id(), "#1");
        assert_eq!(queue.pop().unwrap().id(), "#2");
        assert!(queue.pop().is_none());
    }

    #[test]
    fn test_inbox_sequence_numbers() {
        let inbox = OrderInbox::new();
        assert_eq!(inbox.submit(order(1)), 1);
        assert_eq!(inbox.submit(order(2)), 2);
        assert_eq!(inbox.pending(), 2);
        assert_eq!(inbox.submitted(), 2);
    }

    #[test]
    fn test_drain_preserves_order() {
        let inbox = OrderInbox::new();
        let mut queue = OrderQueue::new();
        queue.push(order(1));

        inbox.submit(order(2));
        inbox.submit(order(3));
        assert_eq!(inbox.drain_into(&mut queue), 2);
        assert_eq!(inbox.pending(), 0);
        assert_eq!(inbox.drain_into(&mut queue), 0);

        let ids: alloc::vec::Vec<_> = queue.iter().map(|o| o.id()).collect();
        assert_eq!(ids, ["#1", "#2", "#3"]);
    }
}

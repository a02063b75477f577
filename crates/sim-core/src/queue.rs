//! Time-ordered event queue.
//!
//! Events pop in `(due_minute, insertion sequence)` order, so events due
//! the same minute execute FIFO. Scheduling never fails from the
//! caller's point of view: out-of-range requests and requests past the
//! capacity are silently shed (and counted), which lets a saturated
//! simulation degrade instead of halting.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use contracts::{EventKind, ScheduledEvent, SimConfig, UserId};

/// Wrapper that provides Ord for ScheduledEvent.
/// Ordering: (due_minute ASC, sequence ASC). We use `Reverse` in the
/// BinaryHeap so the smallest tuple comes out first.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
struct OrderedEvent(ScheduledEvent);

impl PartialOrd for OrderedEvent {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedEvent {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0
            .due_minute
            .cmp(&other.0.due_minute)
            .then_with(|| self.0.sequence.cmp(&other.0.sequence))
    }
}

#[derive(Debug, Clone)]
pub struct EventQueue {
    heap: BinaryHeap<Reverse<OrderedEvent>>,
    next_sequence: u64,
    capacity: usize,
    horizon_minutes: u64,
    population_size: usize,
    dropped: u64,
}

impl EventQueue {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_sequence: 0,
            capacity: config.event_capacity,
            horizon_minutes: config.horizon_minutes,
            population_size: config.population_size,
            dropped: 0,
        }
    }

    /// Queue an event. Requests for unknown users, for minutes outside
    /// `[0, horizon)`, or arriving once the queue is at capacity are
    /// shed; the return value says whether the event was accepted.
    pub fn schedule(&mut self, due_minute: u64, kind: EventKind, user_id: UserId) -> bool {
        if user_id >= self.population_size
            || due_minute >= self.horizon_minutes
            || self.heap.len() >= self.capacity
        {
            self.dropped = self.dropped.saturating_add(1);
            return false;
        }

        let event = ScheduledEvent {
            due_minute,
            kind,
            user_id,
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;
        self.heap.push(Reverse(OrderedEvent(event)));
        true
    }

    /// Remove and return every event with `due_minute <= now`, in
    /// `(due_minute, sequence)` order. Events queued while the caller
    /// works through the batch are untouched until the next call.
    pub fn drain_due(&mut self, now: u64) -> Vec<ScheduledEvent> {
        let mut due = Vec::new();
        while let Some(Reverse(OrderedEvent(event))) = self.heap.peek() {
            if event.due_minute > now {
                break;
            }
            if let Some(Reverse(OrderedEvent(event))) = self.heap.pop() {
                due.push(event);
            }
        }
        due
    }

    /// The due minute of the earliest queued event.
    pub fn peek_next_minute(&self) -> Option<u64> {
        self.heap.peek().map(|e| e.0 .0.due_minute)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// How many schedule requests have been shed so far.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

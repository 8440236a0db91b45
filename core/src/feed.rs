//! Bounded, newest-first event feed.
//!
//! Insertion order is the only ordering: the head is always the most
//! recent append, and overflow silently drops entries off the tail.

use crate::event::EventRecord;
use std::collections::VecDeque;

pub const FEED_CAPACITY: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct EventFeed {
    events:   VecDeque<EventRecord>,
    capacity: usize,
}

impl EventFeed {
    pub fn new(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Start from a newest-first seed, keeping only its first `capacity`
    /// entries.
    pub fn initialize(seed: Vec<EventRecord>, capacity: usize) -> Self {
        let mut events: VecDeque<EventRecord> = seed.into();
        events.truncate(capacity);
        Self { events, capacity }
    }

    /// Put `event` at the head and evict whatever falls past capacity.
    pub fn append(&mut self, event: EventRecord) {
        self.events.push_front(event);
        self.events.truncate(self.capacity);
    }

    /// Current contents, newest first.
    pub fn snapshot(&self) -> Vec<EventRecord> {
        self.events.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventRecord> {
        self.events.iter()
    }

    pub fn latest(&self) -> Option<&EventRecord> {
        self.events.front()
    }

    pub fn len(&self) -> usize { self.events.len() }
    pub fn is_empty(&self) -> bool { self.events.is_empty() }
    pub fn capacity(&self) -> usize { self.capacity }
}

impl Default for EventFeed {
    fn default() -> Self { Self::new(FEED_CAPACITY) }
}

//! Synthetic event generator for the live monitoring feed.
//!
//! DRAW ORDER (fixed, so a seeded generator replays exactly):
//!   1. category     uniform over the four pipeline stages
//!   2. status       uniform over {success, pending}
//!   3. description  uniform over the category's canned phrases
//!   4. customer     uniform over the customer pool
//!
//! Identities combine the event's millisecond timestamp with a
//! per-generator sequence number, so two events from one generator never
//! collide even when stamped with the same instant.

use crate::{
    event::{EventCategory, EventRecord, EventStatus},
    rng::RandomSource,
    types::Timestamp,
};

/// Size of the pseudo-random customer pool referenced in event details.
pub const DEFAULT_CUSTOMER_POOL: u32 = 9;

pub struct EventGenerator<R: RandomSource> {
    rng:           R,
    next_seq:      u64,
    customer_pool: u32,
}

impl<R: RandomSource> EventGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self::with_customer_pool(rng, DEFAULT_CUSTOMER_POOL)
    }

    /// A pool of 0 is raised to 1.
    pub fn with_customer_pool(rng: R, customer_pool: u32) -> Self {
        Self {
            rng,
            next_seq: 1,
            customer_pool: customer_pool.max(1),
        }
    }

    /// Number of events produced so far.
    pub fn generated(&self) -> u64 {
        self.next_seq - 1
    }

    /// Fabricate one event stamped with `now`.
    pub fn generate(&mut self, now: Timestamp) -> EventRecord {
        let category = EventCategory::ALL[self.rng.next_index(EventCategory::ALL.len())];
        let status = EventStatus::GENERATED[self.rng.next_index(EventStatus::GENERATED.len())];
        let phrases = descriptions(category);
        let description = phrases[self.rng.next_index(phrases.len())];
        let customer = self.rng.next_u64_below(self.customer_pool as u64) + 1;

        let seq = self.next_seq;
        self.next_seq += 1;

        let event = EventRecord {
            id: format!("E{}-{seq:04}", now.and_utc().timestamp_millis()),
            timestamp: now,
            category,
            description: description.to_string(),
            status,
            details: format!("Customer ID: C{customer:03}"),
        };
        log::debug!(
            "generated {} [{}] {:?}: {}",
            event.id,
            category.label(),
            status,
            event.description
        );
        event
    }
}

/// Canned phrases for each category.
pub fn descriptions(category: EventCategory) -> &'static [&'static str] {
    match category {
        EventCategory::Analysis => &[
            "Customer profile analysis completed",
            "Data enrichment in progress",
            "Preference learning updated",
        ],
        EventCategory::Decision => &[
            "AI selected Auto Insurance product",
            "Channel optimization completed",
            "Timing algorithm executed",
        ],
        EventCategory::Delivery => &[
            "Message delivered via Email",
            "SMS notification sent",
            "Push notification delivered",
        ],
        EventCategory::Engagement => &[
            "Email opened by customer",
            "Link clicked in message",
            "App session started",
        ],
    }
}

//! Live event records: what the monitoring feed shows.
//!
//! RULE: An event is never mutated once created. The feed only prepends
//! new records and evicts the oldest.

use crate::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventRecord {
    pub id:          EntityId,
    pub timestamp:   Timestamp,
    #[serde(rename = "type")]
    pub category:    EventCategory,
    pub description: String,
    pub status:      EventStatus,
    pub details:     String,
}

/// Pipeline stage an event belongs to.
/// Variants are never reordered: the generator draws by index.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Analysis,
    Decision,
    Delivery,
    Engagement,
}

impl EventCategory {
    pub const ALL: [EventCategory; 4] = [
        Self::Analysis,
        Self::Decision,
        Self::Delivery,
        Self::Engagement,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Analysis   => "Analysis",
            Self::Decision   => "Decision",
            Self::Delivery   => "Delivery",
            Self::Engagement => "Engagement",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Success,
    Pending,
    Warning,
}

impl EventStatus {
    /// Statuses the generator may emit. Warning only ever comes from seed data.
    pub const GENERATED: [EventStatus; 2] = [Self::Success, Self::Pending];
}

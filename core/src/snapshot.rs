//! Presentation snapshot: what the monitoring page renders.
//!
//! Taken on demand; the session never reads one back.

use crate::{
    clock::FeedMode,
    event::EventRecord,
    types::{SessionId, Timestamp},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub mode:       FeedMode,
    pub now:        Timestamp,
    /// Events produced by the generator since the session started.
    pub generated:  u64,
    /// Feed contents, newest first.
    pub events:     Vec<EventRecord>,
}

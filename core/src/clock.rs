//! Live timer: owns the production cadence, the Live/Paused mode and
//! cancellation on teardown.
//!
//! Time never advances on its own. The owner feeds elapsed time in through
//! `step`, and the timer reports when a tick boundary has been crossed.

use crate::types::Timestamp;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Cadence of the live feed.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(5);

/// Shortest cadence the timer accepts; anything below is raised to it.
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FeedMode {
    Live,
    Paused,
}

impl FeedMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Live   => "Live",
            Self::Paused => "Paused",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiveTimer {
    interval:  Duration,
    /// Time accumulated towards the next tick. Always < interval.
    elapsed:   Duration,
    mode:      FeedMode,
    cancelled: bool,
}

impl LiveTimer {
    /// A fresh timer starts Live with a full interval ahead of it.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval:  interval.max(MIN_TICK_INTERVAL),
            elapsed:   Duration::ZERO,
            mode:      FeedMode::Live,
            cancelled: false,
        }
    }

    pub fn interval(&self) -> Duration { self.interval }
    pub fn mode(&self) -> FeedMode { self.mode }
    pub fn is_cancelled(&self) -> bool { self.cancelled }

    /// Time left until the next tick, or None when nothing is scheduled.
    pub fn until_next_tick(&self) -> Option<Duration> {
        if self.cancelled || self.mode == FeedMode::Paused {
            return None;
        }
        Some(self.interval - self.elapsed)
    }

    /// Consume at most `budget` of elapsed time.
    ///
    /// Returns how much of the budget was used and whether a tick fired at
    /// the end of it. Callers loop until the budget is spent.
    pub fn step(&mut self, budget: Duration) -> (Duration, bool) {
        let Some(wait) = self.until_next_tick() else {
            return (budget, false);
        };
        if budget >= wait {
            self.elapsed = Duration::ZERO;
            (wait, true)
        } else {
            self.elapsed += budget;
            (budget, false)
        }
    }

    /// Suspend production. The pending partial interval is discarded.
    /// Returns false when the timer was already paused.
    pub fn pause(&mut self) -> bool {
        if self.mode == FeedMode::Paused {
            return false;
        }
        self.mode = FeedMode::Paused;
        self.elapsed = Duration::ZERO;
        true
    }

    /// Restart production with a full interval ahead.
    /// Resuming a timer that is already Live changes nothing and returns
    /// false.
    pub fn resume(&mut self) -> bool {
        if self.mode == FeedMode::Live {
            return false;
        }
        self.mode = FeedMode::Live;
        self.elapsed = Duration::ZERO;
        true
    }

    pub fn toggle(&mut self) -> FeedMode {
        match self.mode {
            FeedMode::Live   => self.pause(),
            FeedMode::Paused => self.resume(),
        };
        self.mode
    }

    /// Cancel for good. A cancelled timer never fires again,
    /// whatever its mode.
    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.elapsed = Duration::ZERO;
    }
}

/// Move a timestamp forward by a std duration, saturating at the input on
/// overflow.
pub fn advance_timestamp(now: Timestamp, by: Duration) -> Timestamp {
    chrono::Duration::from_std(by)
        .ok()
        .and_then(|delta| now.checked_add_signed(delta))
        .unwrap_or(now)
}

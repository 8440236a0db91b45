//! The monitoring session: one live feed with its generator and timer.
//!
//! RULES:
//!   - A session exclusively owns its feed, generator and timer.
//!     Independent sessions never share state.
//!   - Time moves only through `advance`. Each tick boundary crossed while
//!     Live produces exactly one event, stamped with the boundary's time.
//!   - `teardown` consumes the session and cancels the timer, so nothing
//!     can be appended afterwards.

use crate::{
    clock::{advance_timestamp, FeedMode, LiveTimer},
    command::ViewCommand,
    config::FeedConfig,
    error::DashResult,
    event::EventRecord,
    feed::EventFeed,
    generator::EventGenerator,
    rng::{RandomSource, SeededRng},
    snapshot::SessionSnapshot,
    types::{SessionId, Timestamp},
};
use std::time::Duration;
use uuid::Uuid;

pub struct MonitoringSession<R: RandomSource = SeededRng> {
    pub session_id: SessionId,
    feed:           EventFeed,
    generator:      EventGenerator<R>,
    timer:          LiveTimer,
    now:            Timestamp,
}

impl MonitoringSession<SeededRng> {
    /// Build a session whose generator draws from the config's seed.
    pub fn build(
        config: &FeedConfig,
        seed_events: Vec<EventRecord>,
        start: Timestamp,
    ) -> DashResult<Self> {
        Self::new(config, seed_events, SeededRng::for_generator(config.seed), start)
    }
}

impl<R: RandomSource> MonitoringSession<R> {
    pub fn new(
        config: &FeedConfig,
        seed_events: Vec<EventRecord>,
        rng: R,
        start: Timestamp,
    ) -> DashResult<Self> {
        config.validate()?;
        let session_id = format!("session-{}", Uuid::new_v4());
        let feed = EventFeed::initialize(seed_events, config.capacity);
        log::info!(
            "{session_id}: started with {} seed events (capacity {}, interval {:?})",
            feed.len(),
            config.capacity,
            config.tick_interval()
        );
        Ok(Self {
            session_id,
            feed,
            generator: EventGenerator::with_customer_pool(rng, config.customer_pool_size),
            timer: LiveTimer::new(config.tick_interval()),
            now: start,
        })
    }

    pub fn mode(&self) -> FeedMode { self.timer.mode() }
    pub fn now(&self) -> Timestamp { self.now }
    pub fn interval(&self) -> Duration { self.timer.interval() }
    pub fn generated(&self) -> u64 { self.generator.generated() }
    pub fn feed(&self) -> &EventFeed { &self.feed }

    pub fn toggle(&mut self) -> FeedMode {
        let mode = self.timer.toggle();
        log::debug!("{}: feed {}", self.session_id, mode.label());
        mode
    }

    /// Returns false, and changes nothing, when the feed is already paused.
    pub fn pause(&mut self) -> bool {
        let changed = self.timer.pause();
        if changed {
            log::debug!("{}: feed Paused", self.session_id);
        } else {
            log::warn!("{}: pause ignored, feed already Paused", self.session_id);
        }
        changed
    }

    /// Returns false, and changes nothing, when the feed is already Live.
    pub fn resume(&mut self) -> bool {
        let changed = self.timer.resume();
        if changed {
            log::debug!("{}: feed Live", self.session_id);
        } else {
            log::warn!("{}: resume ignored, feed already Live", self.session_id);
        }
        changed
    }

    /// Move the session clock forward by `elapsed`, producing one event per
    /// tick boundary crossed. Returns the number of events appended.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        let mut remaining = elapsed;
        let mut appended = 0;
        while !remaining.is_zero() {
            let (used, fired) = self.timer.step(remaining);
            remaining -= used;
            self.now = advance_timestamp(self.now, used);
            if fired {
                let event = self.generator.generate(self.now);
                self.feed.append(event);
                appended += 1;
            }
        }
        appended
    }

    /// Advance by exactly `n` intervals.
    pub fn run_ticks(&mut self, n: u32) -> usize {
        self.advance(self.timer.interval() * n)
    }

    pub fn apply(&mut self, command: &ViewCommand) -> usize {
        match command {
            ViewCommand::Pause        => { self.pause(); 0 }
            ViewCommand::Resume       => { self.resume(); 0 }
            ViewCommand::ToggleLive   => { self.toggle(); 0 }
            ViewCommand::Advance { millis } => self.advance(Duration::from_millis(*millis)),
        }
    }

    /// Current feed contents, newest first.
    pub fn snapshot(&self) -> Vec<EventRecord> {
        self.feed.snapshot()
    }

    pub fn view(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.session_id.clone(),
            mode:       self.mode(),
            now:        self.now,
            generated:  self.generated(),
            events:     self.feed.snapshot(),
        }
    }

    /// Cancel production and discard the session, returning its final
    /// events.
    pub fn teardown(mut self) -> Vec<EventRecord> {
        self.timer.cancel();
        log::info!(
            "{}: torn down after {} generated events",
            self.session_id,
            self.generated()
        );
        self.feed.snapshot()
    }
}

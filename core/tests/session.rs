//! Monitoring session tests.
//!
//! Tests cover: seed eviction math, Live/Paused production, tick
//! timestamps, view commands, teardown.

use chrono::{NaiveDate, NaiveDateTime};
use policypulse_core::{
    clock::{FeedMode, LiveTimer},
    command::ViewCommand,
    config::FeedConfig,
    dataset::Dataset,
    event::EventRecord,
    session::MonitoringSession,
};
use std::time::Duration;

fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 2, 17)
        .and_then(|d| d.and_hms_opt(9, 25, 0))
        .expect("valid timestamp")
}

fn seed_events() -> Vec<EventRecord> {
    Dataset::builtin().expect("dataset").seed_events
}

fn build(seed: u64) -> MonitoringSession {
    let _ = env_logger::builder().is_test(true).try_init();
    let config = FeedConfig::default().with_seed(seed);
    MonitoringSession::build(&config, seed_events(), start()).expect("session")
}

fn secs(n: u64) -> Duration {
    Duration::from_secs(n)
}

#[test]
fn session_starts_live_with_seed_events() {
    let session = build(1);
    assert_eq!(session.mode(), FeedMode::Live);
    assert_eq!(session.snapshot(), seed_events());
    assert_eq!(session.generated(), 0);
}

/// 5 seed events, capacity 20, 20 appends: every seed event is evicted and
/// the feed holds exactly the 20 generated events.
#[test]
fn twenty_appends_evict_all_seed_events() {
    let mut session = build(2);
    let seed_ids: Vec<String> = seed_events().into_iter().map(|e| e.id).collect();

    assert_eq!(session.run_ticks(20), 20);

    let events = session.snapshot();
    assert_eq!(events.len(), 20);
    assert!(events.iter().all(|e| !seed_ids.contains(&e.id)));
}

#[test]
fn fifteen_appends_leave_five_seed_events() {
    let mut session = build(3);
    session.run_ticks(15);

    let events = session.snapshot();
    assert_eq!(events.len(), 20);
    let tail: Vec<&str> = events[15..].iter().map(|e| e.id.as_str()).collect();
    assert_eq!(tail, vec!["E001", "E002", "E003", "E004", "E005"]);
}

#[test]
fn one_event_per_interval() {
    let mut session = build(4);
    assert_eq!(session.advance(secs(4)), 0);
    assert_eq!(session.advance(secs(1)), 1);
    assert_eq!(session.advance(secs(12)), 2);
    assert_eq!(session.generated(), 3);
}

#[test]
fn events_are_stamped_at_tick_boundaries() {
    let mut session = build(5);
    session.advance(secs(16));

    let events = session.snapshot();
    assert_eq!(events[0].timestamp, start() + chrono::Duration::seconds(15));
    assert_eq!(events[1].timestamp, start() + chrono::Duration::seconds(10));
    assert_eq!(events[2].timestamp, start() + chrono::Duration::seconds(5));
    assert_eq!(session.now(), start() + chrono::Duration::seconds(16));
}

/// Paused for several intervals produces nothing; production restarts one
/// full interval after resuming.
#[test]
fn pause_suspends_and_resume_restarts_on_next_boundary() {
    let mut session = build(6);
    session.advance(secs(3));

    assert_eq!(session.toggle(), FeedMode::Paused);
    assert_eq!(session.advance(secs(30)), 0);
    assert_eq!(session.generated(), 0);

    assert_eq!(session.toggle(), FeedMode::Live);
    assert_eq!(session.advance(Duration::from_millis(4_999)), 0);
    assert_eq!(session.advance(Duration::from_millis(1)), 1);
}

#[test]
fn resume_while_live_does_not_double_start() {
    let mut session = build(7);
    session.advance(secs(4));
    assert!(!session.resume());
    assert!(!session.resume());
    assert_eq!(session.advance(secs(1)), 1);
    assert_eq!(session.advance(secs(4)), 0);
}

#[test]
fn pause_while_paused_is_ignored() {
    let mut session = build(9);
    assert!(session.pause());
    assert!(!session.pause());
    assert_eq!(session.mode(), FeedMode::Paused);
    assert!(session.resume());
    assert_eq!(session.advance(secs(5)), 1);
}

#[test]
fn view_commands_drive_the_session() {
    let mut session = build(8);

    assert_eq!(session.apply(&ViewCommand::Advance { millis: 10_000 }), 2);
    session.apply(&ViewCommand::Pause);
    assert_eq!(session.apply(&ViewCommand::Advance { millis: 60_000 }), 0);
    session.apply(&ViewCommand::ToggleLive);
    assert_eq!(session.mode(), FeedMode::Live);
    assert_eq!(session.apply(&ViewCommand::Advance { millis: 5_000 }), 1);

    let view = session.view();
    assert_eq!(view.mode, FeedMode::Live);
    assert_eq!(view.generated, 3);
    assert_eq!(view.events.len(), 8);
}

#[test]
fn view_commands_parse_from_json() {
    let cmd: ViewCommand = serde_json::from_str(r#"{ "cmd": "advance", "millis": 2500 }"#).unwrap();
    assert_eq!(cmd, ViewCommand::Advance { millis: 2500 });
    let cmd: ViewCommand = serde_json::from_str(r#"{ "cmd": "toggle_live" }"#).unwrap();
    assert_eq!(cmd, ViewCommand::ToggleLive);
}

#[test]
fn teardown_returns_final_events() {
    let mut session = build(9);
    session.run_ticks(3);
    let before = session.snapshot();

    let after = session.teardown();
    assert_eq!(after, before);
}

/// Once cancelled, the timer never schedules another tick, so nothing can
/// reach a feed after teardown even if time keeps moving.
#[test]
fn cancelled_timer_produces_no_ticks() {
    let mut timer = LiveTimer::new(secs(5));
    timer.step(secs(4));
    timer.cancel();

    for _ in 0..10 {
        let (_, fired) = timer.step(secs(5));
        assert!(!fired, "cancelled timer fired");
    }
    timer.resume();
    assert_eq!(timer.until_next_tick(), None);
}

#[test]
fn sessions_are_independent() {
    let mut a = build(10);
    let b = build(10);
    a.run_ticks(4);

    assert_ne!(a.session_id, b.session_id);
    assert_eq!(a.generated(), 4);
    assert_eq!(b.generated(), 0);
    assert_eq!(b.snapshot(), seed_events());
}

#[test]
fn smaller_capacity_from_config() {
    let config = FeedConfig { capacity: 3, ..FeedConfig::default() };
    let mut session = MonitoringSession::build(&config, seed_events(), start()).expect("session");
    assert_eq!(session.snapshot().len(), 3);
    session.run_ticks(2);
    let events = session.snapshot();
    assert_eq!(events.len(), 3);
    assert_eq!(events[2].id, "E001");
}

#[test]
fn invalid_config_is_rejected() {
    let config = FeedConfig { tick_interval_ms: 0, ..FeedConfig::default() };
    assert!(MonitoringSession::build(&config, seed_events(), start()).is_err());
}

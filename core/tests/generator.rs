//! Event generator tests.
//!
//! Tests cover: identity uniqueness, status pool, phrase pools, customer
//! pool, scripted draws through a session.

use chrono::{NaiveDate, NaiveDateTime};
use policypulse_core::{
    config::FeedConfig,
    event::{EventCategory, EventStatus},
    generator::{descriptions, EventGenerator},
    rng::{ScriptedRng, SeededRng},
    session::MonitoringSession,
};
use std::collections::HashSet;

fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 2, 17)
        .and_then(|d| d.and_hms_opt(9, 25, 0))
        .expect("valid timestamp")
}

/// No two events generated in one run share an identity.
#[test]
fn identities_unique_over_a_thousand_ticks() {
    let mut session = MonitoringSession::build(&FeedConfig::default(), Vec::new(), start())
        .expect("session");
    let mut seen = HashSet::new();

    for tick in 0..1_000 {
        assert_eq!(session.run_ticks(1), 1);
        let latest = session.feed().latest().expect("latest event").id.clone();
        assert!(seen.insert(latest.clone()), "duplicate id {latest} at tick {tick}");
    }
    assert_eq!(seen.len(), 1_000);
}

#[test]
fn identities_unique_even_at_one_instant() {
    let mut generator = EventGenerator::new(SeededRng::for_generator(3));
    let ids: HashSet<String> = (0..1_000).map(|_| generator.generate(start()).id).collect();
    assert_eq!(ids.len(), 1_000);
}

#[test]
fn warning_is_never_generated() {
    let mut generator = EventGenerator::new(SeededRng::for_generator(11));
    let mut statuses = HashSet::new();
    for _ in 0..1_000 {
        statuses.insert(generator.generate(start()).status);
    }
    assert!(!statuses.contains(&EventStatus::Warning));
    assert!(statuses.contains(&EventStatus::Success));
    assert!(statuses.contains(&EventStatus::Pending));
}

#[test]
fn descriptions_come_from_the_category_pool() {
    let mut generator = EventGenerator::new(SeededRng::for_generator(12));
    let mut categories = HashSet::new();
    for _ in 0..500 {
        let event = generator.generate(start());
        assert!(
            descriptions(event.category).contains(&event.description.as_str()),
            "{:?} got foreign phrase '{}'",
            event.category,
            event.description
        );
        categories.insert(event.category);
    }
    assert_eq!(categories.len(), EventCategory::ALL.len());
}

#[test]
fn details_reference_the_customer_pool() {
    let mut generator = EventGenerator::new(SeededRng::for_generator(13));
    let allowed: HashSet<String> = (1..=9).map(|n| format!("Customer ID: C00{n}")).collect();
    let mut seen = HashSet::new();
    for _ in 0..500 {
        let details = generator.generate(start()).details;
        assert!(allowed.contains(&details), "unexpected detail '{details}'");
        seen.insert(details);
    }
    assert_eq!(seen.len(), 9);
}

#[test]
fn scripted_rng_makes_the_feed_exact() {
    // Two ticks: (engagement, success, "Link clicked in message", C001)
    //            (analysis, pending, "Preference learning updated", C009)
    let rng = ScriptedRng::new(vec![3, 0, 1, 0, 0, 1, 2, 8]);
    let mut session = MonitoringSession::new(&FeedConfig::default(), Vec::new(), rng, start())
        .expect("session");
    session.run_ticks(2);

    let events = session.snapshot();
    assert_eq!(events[1].category, EventCategory::Engagement);
    assert_eq!(events[1].status, EventStatus::Success);
    assert_eq!(events[1].description, "Link clicked in message");
    assert_eq!(events[1].details, "Customer ID: C001");

    assert_eq!(events[0].category, EventCategory::Analysis);
    assert_eq!(events[0].status, EventStatus::Pending);
    assert_eq!(events[0].description, "Preference learning updated");
    assert_eq!(events[0].details, "Customer ID: C009");
}

//! Metrics aggregator: display figures derived from the seed dataset.
//!
//! RULE: Every function here is total. Empty collections and zero
//! denominators yield 0, never NaN or infinity, because "no data" reads
//! naturally as zero on a dashboard card.
//!
//! Rates are percentages in [0, 100] (unrounded); use `round_to_tenth`
//! for one-decimal display.

use crate::dataset::{
    ChannelStat, CustomerRecord, Dataset, DecisionOutcome, DecisionRecord, ResponsibleAIMetrics,
};
use serde::{Deserialize, Serialize};

pub const HIGH_ENGAGEMENT_THRESHOLD: u32 = 85;
pub const HIGH_CONFIDENCE_THRESHOLD: f64 = 0.85;

// ── Channels ─────────────────────────────────────────────────────────────────

pub fn total_revenue(channels: &[ChannelStat]) -> u64 {
    channels.iter().map(|c| c.revenue).sum()
}

pub fn total_converted(channels: &[ChannelStat]) -> u64 {
    channels.iter().map(|c| c.converted).sum()
}

pub fn total_sent(channels: &[ChannelStat]) -> u64 {
    channels.iter().map(|c| c.sent).sum()
}

pub fn average_conversion_rate(channels: &[ChannelStat]) -> f64 {
    percentage(total_converted(channels), total_sent(channels))
}

pub fn open_rate(stat: &ChannelStat) -> f64 {
    percentage(stat.opened, stat.sent)
}

pub fn click_rate(stat: &ChannelStat) -> f64 {
    percentage(stat.clicked, stat.opened)
}

pub fn conversion_rate(stat: &ChannelStat) -> f64 {
    percentage(stat.converted, stat.sent)
}

// ── Customers ────────────────────────────────────────────────────────────────

pub fn average_engagement(customers: &[CustomerRecord]) -> f64 {
    mean(customers.iter().map(|c| c.engagement_score as f64))
}

pub fn high_engagement_count(customers: &[CustomerRecord], threshold: u32) -> usize {
    customers.iter().filter(|c| c.engagement_score >= threshold).count()
}

pub fn total_lifetime_value(customers: &[CustomerRecord]) -> u64 {
    customers.iter().map(|c| c.lifetime_value).sum()
}

/// Canned next-best-action insight for a customer's life stage.
pub fn customer_insight(customer: &CustomerRecord) -> &'static str {
    match customer.life_stage.as_str() {
        "New Parent" => {
            "High propensity for life insurance. Recent family changes indicate strong conversion potential."
        }
        "Mid-Career" if customer.engagement_score > 90 => {
            "Excellent engagement with premium products. Consider upsell opportunities for comprehensive coverage."
        }
        "First-Time Buyer" => {
            "Budget-sensitive segment. Focus on starter packages and educational content to build trust."
        }
        "Empty Nester" | "Pre-Retirement" => {
            "High-value segment entering retirement planning phase. Strong candidate for wealth protection products."
        }
        _ => "Growing family needs indicate opportunity for home and auto bundle expansion.",
    }
}

// ── Decisions ────────────────────────────────────────────────────────────────

/// Mean confidence as a percentage.
pub fn average_confidence(decisions: &[DecisionRecord]) -> f64 {
    mean(decisions.iter().map(|d| d.confidence)) * 100.0
}

pub fn high_confidence_count(decisions: &[DecisionRecord], threshold: f64) -> usize {
    decisions.iter().filter(|d| d.confidence >= threshold).count()
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutcomeCounts {
    pub sent:      usize,
    pub scheduled: usize,
    pub skipped:   usize,
}

pub fn outcome_counts(decisions: &[DecisionRecord]) -> OutcomeCounts {
    decisions.iter().fold(OutcomeCounts::default(), |mut acc, d| {
        match d.outcome {
            DecisionOutcome::Sent      => acc.sent += 1,
            DecisionOutcome::Scheduled => acc.scheduled += 1,
            DecisionOutcome::Skipped   => acc.skipped += 1,
        }
        acc
    })
}

// ── Responsible AI ───────────────────────────────────────────────────────────

pub fn overall_responsible_ai_score(metrics: &ResponsibleAIMetrics) -> f64 {
    mean(metrics.sub_scores().iter().map(|(_, score)| *score))
}

// ── Helpers ──────────────────────────────────────────────────────────────────

/// One-decimal display rounding.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn percentage(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    numerator as f64 / denominator as f64 * 100.0
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 { 0.0 } else { sum / n as f64 }
}

// ── Summary ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChannelRates {
    pub channel:         String,
    pub open_rate:       f64,
    pub click_rate:      f64,
    pub conversion_rate: f64,
}

/// Every figure the dashboard pages render, computed in one pass over a
/// dataset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardSummary {
    pub customer_count:           usize,
    pub average_engagement:       f64,
    pub high_engagement_count:    usize,
    pub total_lifetime_value:     u64,
    pub decision_count:           usize,
    pub average_confidence:       f64,
    pub high_confidence_count:    usize,
    pub outcomes:                 OutcomeCounts,
    pub total_sent:               u64,
    pub total_converted:          u64,
    pub total_revenue:            u64,
    pub average_conversion_rate:  f64,
    pub channels:                 Vec<ChannelRates>,
    pub responsible_ai_score:     f64,
}

impl DashboardSummary {
    pub fn compute(dataset: &Dataset) -> Self {
        Self {
            customer_count:          dataset.customers.len(),
            average_engagement:      average_engagement(&dataset.customers),
            high_engagement_count:   high_engagement_count(&dataset.customers, HIGH_ENGAGEMENT_THRESHOLD),
            total_lifetime_value:    total_lifetime_value(&dataset.customers),
            decision_count:          dataset.decisions.len(),
            average_confidence:      average_confidence(&dataset.decisions),
            high_confidence_count:   high_confidence_count(&dataset.decisions, HIGH_CONFIDENCE_THRESHOLD),
            outcomes:                outcome_counts(&dataset.decisions),
            total_sent:              total_sent(&dataset.channels),
            total_converted:         total_converted(&dataset.channels),
            total_revenue:           total_revenue(&dataset.channels),
            average_conversion_rate: average_conversion_rate(&dataset.channels),
            channels: dataset
                .channels
                .iter()
                .map(|c| ChannelRates {
                    channel:         c.channel.clone(),
                    open_rate:       open_rate(c),
                    click_rate:      click_rate(c),
                    conversion_rate: conversion_rate(c),
                })
                .collect(),
            responsible_ai_score:    overall_responsible_ai_score(&dataset.responsible_ai),
        }
    }
}

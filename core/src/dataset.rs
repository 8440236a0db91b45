use crate::{
    error::{DashError, DashResult},
    event::EventRecord,
    types::{EntityId, Timestamp},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ── Customers ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomerRecord {
    pub id: EntityId,
    pub name: String,
    pub age: u32,
    pub segment: String,
    pub life_stage: String,
    pub risk_profile: String,
    pub preferred_channel: String,
    /// 0–100.
    pub engagement_score: u32,
    /// Lifetime value in whole currency units.
    pub lifetime_value: u64,
}

// ── AI decisions ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecisionRecord {
    pub id: EntityId,
    pub timestamp: Timestamp,
    pub customer_id: EntityId,
    pub customer_name: String,
    pub product: String,
    pub channel: String,
    pub timing: String,
    /// 0.0–1.0.
    pub confidence: f64,
    /// Independent contributions; weights are not expected to sum to 1.
    pub factors: Vec<DecisionFactor>,
    pub outcome: DecisionOutcome,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecisionFactor {
    pub factor: String,
    pub weight: f64,
    pub value: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DecisionOutcome {
    Sent,
    Scheduled,
    Skipped,
}

// ── Channels ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChannelStat {
    pub channel: String,
    pub sent: u64,
    pub opened: u64,
    pub clicked: u64,
    pub converted: u64,
    /// 0–100.
    pub avg_confidence: f64,
    pub revenue: u64,
}

// ── Responsible AI ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResponsibleAIMetrics {
    pub transparency_score: f64,
    pub fairness_score: f64,
    pub privacy_compliance: f64,
    pub explainability_score: f64,
    pub bias_detection_score: f64,
    pub data_quality_score: f64,
}

impl ResponsibleAIMetrics {
    /// Named sub-scores in display order.
    pub fn sub_scores(&self) -> [(&'static str, f64); 6] {
        [
            ("Transparency", self.transparency_score),
            ("Fairness", self.fairness_score),
            ("Privacy", self.privacy_compliance),
            ("Explainability", self.explainability_score),
            ("Bias Detection", self.bias_detection_score),
            ("Data Quality", self.data_quality_score),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BiasMonitoringEntry {
    pub category: String,
    pub score: f64,
    pub status: BiasStatus,
    pub trend: BiasTrend,
    pub details: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BiasStatus {
    Pass,
    Monitor,
    Review,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BiasTrend {
    Stable,
    Improving,
    Declining,
}

// ── Overview page ──────────────────────────────────────────────────

/// Headline KPIs, each paired with its period-over-period change (percent).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverviewMetrics {
    pub total_messages: u64,
    pub messages_change: f64,
    pub avg_confidence: f64,
    pub confidence_change: f64,
    pub engagement_rate: f64,
    pub engagement_change: f64,
    pub conversion_rate: f64,
    pub conversion_change: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeeklyPerformance {
    pub day: String,
    pub messages: u64,
    pub engagement: u64,
    pub conversion: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductShare {
    pub name: String,
    /// Share of recommendations, percent.
    pub value: f64,
}

// ── File shapes ────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
struct CustomersFile {
    customers: Vec<CustomerRecord>,
}

#[derive(Debug, Clone, Deserialize)]
struct DecisionsFile {
    decisions: Vec<DecisionRecord>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChannelsFile {
    channels: Vec<ChannelStat>,
}

#[derive(Debug, Clone, Deserialize)]
struct EventsFile {
    events: Vec<EventRecord>,
}

#[derive(Debug, Clone, Deserialize)]
struct ResponsibleAIFile {
    metrics: ResponsibleAIMetrics,
    bias_monitoring: Vec<BiasMonitoringEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct OverviewFile {
    metrics: OverviewMetrics,
    weekly_performance: Vec<WeeklyPerformance>,
    product_performance: Vec<ProductShare>,
}

const CUSTOMERS_FILE: &str = "customers.json";
const DECISIONS_FILE: &str = "decisions.json";
const CHANNELS_FILE: &str = "channels.json";
const EVENTS_FILE: &str = "events.json";
const RESPONSIBLE_AI_FILE: &str = "responsible_ai.json";
const OVERVIEW_FILE: &str = "overview.json";

// ── Dataset ────────────────────────────────────────────────────────

/// The read-only seed data every page renders from.
/// Loaded once; nothing in the core mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub customers: Vec<CustomerRecord>,
    pub decisions: Vec<DecisionRecord>,
    pub channels: Vec<ChannelStat>,
    /// Initial feed contents, newest first.
    pub seed_events: Vec<EventRecord>,
    pub responsible_ai: ResponsibleAIMetrics,
    pub bias_monitoring: Vec<BiasMonitoringEntry>,
    pub overview: OverviewMetrics,
    pub weekly_performance: Vec<WeeklyPerformance>,
    pub product_performance: Vec<ProductShare>,
}

impl Dataset {
    /// Load from a data directory holding the six seed files.
    pub fn load(data_dir: impl AsRef<Path>) -> DashResult<Self> {
        let dir = data_dir.as_ref();
        let read = |name: &str| -> DashResult<String> {
            let path = dir.join(name);
            std::fs::read_to_string(&path).map_err(|source| DashError::Io {
                path: path.display().to_string(),
                source,
            })
        };
        let dataset = Self::from_sources(
            &read(CUSTOMERS_FILE)?,
            &read(DECISIONS_FILE)?,
            &read(CHANNELS_FILE)?,
            &read(EVENTS_FILE)?,
            &read(RESPONSIBLE_AI_FILE)?,
            &read(OVERVIEW_FILE)?,
        )?;
        log::info!(
            "loaded dataset from {}: {} customers, {} decisions, {} channels, {} seed events",
            dir.display(),
            dataset.customers.len(),
            dataset.decisions.len(),
            dataset.channels.len(),
            dataset.seed_events.len()
        );
        Ok(dataset)
    }

    /// The seed data shipped with the crate.
    pub fn builtin() -> DashResult<Self> {
        Self::from_sources(
            include_str!("../data/customers.json"),
            include_str!("../data/decisions.json"),
            include_str!("../data/channels.json"),
            include_str!("../data/events.json"),
            include_str!("../data/responsible_ai.json"),
            include_str!("../data/overview.json"),
        )
    }

    fn from_sources(
        customers: &str,
        decisions: &str,
        channels: &str,
        events: &str,
        responsible_ai: &str,
        overview: &str,
    ) -> DashResult<Self> {
        let customers: CustomersFile = serde_json::from_str(customers)?;
        let decisions: DecisionsFile = serde_json::from_str(decisions)?;
        let channels: ChannelsFile = serde_json::from_str(channels)?;
        let events: EventsFile = serde_json::from_str(events)?;
        let responsible_ai: ResponsibleAIFile = serde_json::from_str(responsible_ai)?;
        let overview: OverviewFile = serde_json::from_str(overview)?;

        let dataset = Self {
            customers: customers.customers,
            decisions: decisions.decisions,
            channels: channels.channels,
            seed_events: events.events,
            responsible_ai: responsible_ai.metrics,
            bias_monitoring: responsible_ai.bias_monitoring,
            overview: overview.metrics,
            weekly_performance: overview.weekly_performance,
            product_performance: overview.product_performance,
        };
        dataset.validate()?;
        Ok(dataset)
    }

    /// Check the invariants the aggregator relies on.
    pub fn validate(&self) -> DashResult<()> {
        for c in &self.customers {
            if c.engagement_score > 100 {
                return Err(invalid(&c.id, format!("engagement score {} exceeds 100", c.engagement_score)));
            }
        }

        for d in &self.decisions {
            if !unit_interval(d.confidence) {
                return Err(invalid(&d.id, format!("confidence {} outside [0, 1]", d.confidence)));
            }
            if let Some(f) = d.factors.iter().find(|f| !unit_interval(f.weight)) {
                return Err(invalid(
                    &d.id,
                    format!("factor '{}' weight {} outside [0, 1]", f.factor, f.weight),
                ));
            }
        }

        for ch in &self.channels {
            if !(ch.sent >= ch.opened && ch.opened >= ch.clicked && ch.clicked >= ch.converted) {
                return Err(invalid(
                    &ch.channel,
                    format!(
                        "funnel out of order: sent {} opened {} clicked {} converted {}",
                        ch.sent, ch.opened, ch.clicked, ch.converted
                    ),
                ));
            }
            if !percent(ch.avg_confidence) {
                return Err(invalid(&ch.channel, format!("avg confidence {} outside [0, 100]", ch.avg_confidence)));
            }
        }

        for (name, score) in self.responsible_ai.sub_scores() {
            if !percent(score) {
                return Err(invalid(name, format!("score {score} outside [0, 100]")));
            }
        }
        for entry in &self.bias_monitoring {
            if !percent(entry.score) {
                return Err(invalid(&entry.category, format!("bias score {} outside [0, 100]", entry.score)));
            }
        }
        Ok(())
    }

    pub fn customer(&self, id: &str) -> Option<&CustomerRecord> {
        self.customers.iter().find(|c| c.id == id)
    }
}

fn unit_interval(v: f64) -> bool {
    (0.0..=1.0).contains(&v)
}

fn percent(v: f64) -> bool {
    (0.0..=100.0).contains(&v)
}

fn invalid(record: &str, reason: String) -> DashError {
    DashError::InvalidDataset { record: record.to_string(), reason }
}

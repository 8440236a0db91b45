use crate::{
    clock::DEFAULT_TICK_INTERVAL,
    error::{DashError, DashResult},
    feed::FEED_CAPACITY,
    generator::DEFAULT_CUSTOMER_POOL,
};
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};

/// Settings for one monitoring session. Every field has a default, so a
/// config file only needs the keys it overrides.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeedConfig {
    /// Maximum number of events kept in the feed.
    pub capacity: usize,
    /// Cadence of the generator while Live.
    pub tick_interval_ms: u64,
    /// Master seed for the generator's random stream.
    pub seed: u64,
    /// Event details reference customers C001..=C00n.
    pub customer_pool_size: u32,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            capacity:           FEED_CAPACITY,
            tick_interval_ms:   DEFAULT_TICK_INTERVAL.as_millis() as u64,
            seed:               42,
            customer_pool_size: DEFAULT_CUSTOMER_POOL,
        }
    }
}

impl FeedConfig {
    /// Load from a JSON file and validate.
    pub fn load(path: impl AsRef<Path>) -> DashResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| DashError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: FeedConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DashResult<()> {
        if self.capacity == 0 {
            return Err(DashError::InvalidConfig {
                field:  "capacity",
                reason: "must be at least 1".into(),
            });
        }
        if self.tick_interval_ms == 0 {
            return Err(DashError::InvalidConfig {
                field:  "tick_interval_ms",
                reason: "must be at least 1".into(),
            });
        }
        if self.customer_pool_size == 0 {
            return Err(DashError::InvalidConfig {
                field:  "customer_pool_size",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

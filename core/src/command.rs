use serde::{Deserialize, Serialize};

/// Commands the monitoring view issues against its session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum ViewCommand {
    // ── Production mode ───────────────────────────
    Pause,
    Resume,
    ToggleLive,

    // ── Clock ─────────────────────────────────────
    /// Feed `millis` of elapsed time into the session.
    Advance { millis: u64 },
}

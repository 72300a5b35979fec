use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScoreCycle {
    Core,
    Aux,
}

impl ScoreCycle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreCycle::Core => "core",
            ScoreCycle::Aux => "aux",
        }
    }
}

/// Timing and outcome of one scoring cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleMetrics {
    pub timestamp: DateTime<Utc>,
    pub cycle: ScoreCycle,
    pub frames: usize,
    pub duration_ms: u64,
    pub score: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub recent_cycles: Vec<CycleMetrics>,
    pub core_cycle_count: u64,
    pub aux_cycle_count: u64,
    /// Cycles that evaluated an empty window (no signal from the extractor).
    pub empty_window_count: u64,
}

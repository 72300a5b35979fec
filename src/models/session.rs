use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ScoreSnapshot;

/// A time interval during which the combined score stayed at or above the
/// focus threshold. Closed when focus ends or the session is finalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusSegment {
    pub id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl FocusSegment {
    pub fn duration_secs(&self) -> i64 {
        (self.end - self.start).num_seconds()
    }
}

/// Read-only view over a whole session, computed on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub session_id: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub total_duration_secs: i64,
    pub total_focus_secs: i64,
    /// Mean of all total scores in the history, 0 if the history is empty.
    pub average_score: f64,
    pub score_history: Vec<ScoreSnapshot>,
    pub focus_segments: Vec<FocusSegment>,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Aggregate inputs and weighted sub-scores from a core (30 s) cycle.
/// A zeroed breakdown is the documented no-signal outcome, not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreBreakdown {
    pub avg_yaw: f64,
    pub avg_ear: f64,
    pub eye_closed_ratio: f64,
    pub blink_count: u32,
    pub yaw_score: f64,
    pub eye_open_score: f64,
    pub eye_closed_score: f64,
    pub blink_score: f64,
}

/// Aggregate inputs and weighted sub-scores from an auxiliary (60 s) cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuxBreakdown {
    pub avg_yaw_change: f64,
    pub snooze_ratio: f64,
    pub frame_count: usize,
    pub blink_count: u32,
    pub blink_score: f64,
    pub yaw_stability_score: f64,
    pub ml_snooze_score: f64,
}

/// Factor breakdown attached to each snapshot. The core half is always
/// present (zeroed until the first core cycle produces data); the aux half
/// is absent until the first auxiliary cycle completes, so "core-only" vs
/// "core+aux" states are exhaustively checkable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub core: CoreBreakdown,
    pub aux: Option<AuxBreakdown>,
}

/// One entry per completed scoring evaluation, whichever cycle fired.
/// Appended to an ordered, append-only history; never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSnapshot {
    pub timestamp: DateTime<Utc>,
    pub core_score: f64,
    /// Absent until the first auxiliary window completes.
    pub aux_score: Option<f64>,
    pub total_score: f64,
    pub is_focused: bool,
    pub classifier_label: Option<String>,
    pub classifier_confidence: Option<f64>,
    pub breakdown: ScoreBreakdown,
}

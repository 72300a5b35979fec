use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Tunable constants for the scoring engine: window durations, sub-score
/// weights, normalization ceilings, and the focus threshold. Defaults encode
/// the shipped domain priors; every formula constant lives here so it can be
/// tuned or unit-tested independently of the aggregation logic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringConfig {
    /// Core window and core tick cadence.
    pub core_window_secs: u64,
    /// Auxiliary window and aux tick cadence.
    pub aux_window_secs: u64,
    /// Trailing retention horizon of the frame buffer.
    pub retention_secs: u64,
    /// Cadence of the ingest pump when a `SignalSource` is attached.
    pub frame_interval_ms: u64,

    /// Core sub-score weights (head posture dominates short-term focus).
    pub weight_yaw: f64,
    pub weight_eye_open: f64,
    pub weight_eye_closed: f64,
    pub weight_blink: f64,

    /// Auxiliary sub-score weights (classifier signal dominates the trend).
    pub weight_blink_aux: f64,
    pub weight_yaw_stability: f64,
    pub weight_ml_snooze: f64,

    /// Normalization ceilings and detection thresholds.
    pub max_avg_yaw: f64,
    pub min_avg_ear: f64,
    pub max_avg_ear: f64,
    /// EAR below this counts a frame as eyes-closed.
    pub eye_closed_ear: f64,
    pub max_blinks_per_minute: f64,
    pub max_avg_yaw_change: f64,
    /// EAR below this flags a frame as snooze-like.
    pub snooze_ear: f64,
    /// |yaw| above this flags a frame as snooze-like.
    pub snooze_yaw: f64,
    /// Classifier label that flags a frame as snooze-like.
    pub snooze_label: String,

    /// Combination weights: total = core × core_weight + aux × aux_weight.
    pub core_weight: f64,
    pub aux_weight: f64,
    /// Combined score at or above this marks the session as focused.
    pub focus_threshold: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            core_window_secs: 30,
            aux_window_secs: 60,
            retention_secs: 120,
            frame_interval_ms: 33,
            weight_yaw: 0.40,
            weight_eye_open: 0.25,
            weight_eye_closed: 0.20,
            weight_blink: 0.15,
            weight_blink_aux: 0.25,
            weight_yaw_stability: 0.25,
            weight_ml_snooze: 0.50,
            max_avg_yaw: 0.4,
            min_avg_ear: 0.15,
            max_avg_ear: 0.35,
            eye_closed_ear: 0.20,
            max_blinks_per_minute: 30.0,
            max_avg_yaw_change: 0.2,
            snooze_ear: 0.18,
            snooze_yaw: 0.3,
            snooze_label: "snooze".into(),
            core_weight: 0.7,
            aux_weight: 0.3,
            focus_threshold: 50.0,
        }
    }
}

impl ScoringConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config at {}", path.display()))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let serialized = serde_json::to_string_pretty(self)?;
        fs::write(path, serialized)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }
}

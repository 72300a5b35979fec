use crate::config::ScoringConfig;
use crate::models::{CoreBreakdown, FrameMeasurement};

use super::{mean, normalize};

/// Batch of measurements extracted from the core window.
#[derive(Debug, Clone)]
pub struct CoreScoreInput {
    pub yaw_values: Vec<f64>,
    pub ear_values: Vec<f64>,
    pub blink_count: u32,
    /// Window length, used to scale blink count to a per-minute rate.
    pub window_secs: f64,
}

impl CoreScoreInput {
    pub fn from_window(frames: &[&FrameMeasurement], window_secs: f64) -> Self {
        Self {
            yaw_values: frames.iter().map(|f| f.yaw).collect(),
            ear_values: frames.iter().map(|f| f.ear).collect(),
            blink_count: frames.iter().filter(|f| f.blink_detected).count() as u32,
            window_secs,
        }
    }
}

/// Short-term posture/blink score over the core window. Empty input yields
/// score 0 with a zeroed breakdown, the degenerate no-signal outcome.
pub fn core_score(input: &CoreScoreInput, config: &ScoringConfig) -> (f64, CoreBreakdown) {
    if input.yaw_values.is_empty() || input.ear_values.is_empty() {
        return (0.0, CoreBreakdown::default());
    }

    let abs_yaws: Vec<f64> = input.yaw_values.iter().map(|y| y.abs()).collect();
    let avg_yaw = mean(&abs_yaws);
    let avg_ear = mean(&input.ear_values);
    let closed_count = input
        .ear_values
        .iter()
        .filter(|ear| **ear < config.eye_closed_ear)
        .count();
    let eye_closed_ratio = closed_count as f64 / input.ear_values.len() as f64;

    let yaw_score = (1.0 - normalize(avg_yaw, 0.0, config.max_avg_yaw)) * 100.0 * config.weight_yaw;
    let eye_open_score =
        normalize(avg_ear, config.min_avg_ear, config.max_avg_ear) * 100.0 * config.weight_eye_open;
    let eye_closed_score = (1.0 - eye_closed_ratio) * 100.0 * config.weight_eye_closed;

    let blink_per_minute = if input.window_secs > 0.0 {
        input.blink_count as f64 * 60.0 / input.window_secs
    } else {
        0.0
    };
    let blink_score = (1.0 - normalize(blink_per_minute, 0.0, config.max_blinks_per_minute))
        * 100.0
        * config.weight_blink;

    let total = (yaw_score + eye_open_score + eye_closed_score + blink_score).clamp(0.0, 100.0);

    let breakdown = CoreBreakdown {
        avg_yaw,
        avg_ear,
        eye_closed_ratio,
        blink_count: input.blink_count,
        yaw_score,
        eye_open_score,
        eye_closed_score,
        blink_score,
    };

    (total, breakdown)
}

use crate::config::ScoringConfig;
use crate::models::{AuxBreakdown, FrameMeasurement};

use super::{mean, normalize};

/// Batch of measurements extracted from the auxiliary window.
#[derive(Debug, Clone)]
pub struct AuxScoreInput {
    pub blink_count: u32,
    /// |yaw[i] − yaw[i−1]| per consecutive frame pair, in temporal order.
    /// Needs at least two frames to be non-empty.
    pub yaw_changes: Vec<f64>,
    /// Per-frame snooze flags: classifier said so, EAR below the snooze
    /// threshold, or |yaw| past the snooze threshold.
    pub snooze_flags: Vec<bool>,
}

impl AuxScoreInput {
    pub fn from_window(frames: &[&FrameMeasurement], config: &ScoringConfig) -> Self {
        let yaw_changes = frames
            .windows(2)
            .map(|pair| (pair[1].yaw - pair[0].yaw).abs())
            .collect();

        let snooze_flags = frames
            .iter()
            .map(|f| {
                f.classifier_label.as_deref() == Some(config.snooze_label.as_str())
                    || f.ear < config.snooze_ear
                    || f.yaw.abs() > config.snooze_yaw
            })
            .collect();

        Self {
            blink_count: frames.iter().filter(|f| f.blink_detected).count() as u32,
            yaw_changes,
            snooze_flags,
        }
    }
}

/// Longer-term stability and classifier-informed score over the auxiliary
/// window. Empty input yields score 0 with a zeroed breakdown.
pub fn aux_score(input: &AuxScoreInput, config: &ScoringConfig) -> (f64, AuxBreakdown) {
    if input.yaw_changes.is_empty() || input.snooze_flags.is_empty() {
        return (0.0, AuxBreakdown::default());
    }

    let avg_yaw_change = mean(&input.yaw_changes);
    let snooze_count = input.snooze_flags.iter().filter(|s| **s).count();
    let snooze_ratio = snooze_count as f64 / input.snooze_flags.len() as f64;

    let blink_norm = normalize(input.blink_count as f64, 0.0, config.max_blinks_per_minute);
    let blink_score = (100.0 - blink_norm).max(0.0) * config.weight_blink_aux;
    let stability_norm = normalize(avg_yaw_change, 0.0, config.max_avg_yaw_change);
    let yaw_stability_score = (100.0 - stability_norm).max(0.0) * config.weight_yaw_stability;
    let ml_snooze_score = (1.0 - snooze_ratio).powi(2) * 100.0 * config.weight_ml_snooze;

    let total = (blink_score + yaw_stability_score + ml_snooze_score).clamp(0.0, 100.0);

    let breakdown = AuxBreakdown {
        avg_yaw_change,
        snooze_ratio,
        frame_count: input.snooze_flags.len(),
        blink_count: input.blink_count,
        blink_score,
        yaw_stability_score,
        ml_snooze_score,
    };

    (total, breakdown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn input(blinks: u32, yaw_changes: Vec<f64>, snooze: Vec<bool>) -> AuxScoreInput {
        AuxScoreInput {
            blink_count: blinks,
            yaw_changes,
            snooze_flags: snooze,
        }
    }

    #[test]
    fn empty_window_scores_zero_with_zeroed_breakdown() {
        let config = ScoringConfig::default();
        let (score, breakdown) = aux_score(&input(0, Vec::new(), Vec::new()), &config);
        assert_eq!(score, 0.0);
        assert_eq!(breakdown, AuxBreakdown::default());
    }

    #[test]
    fn all_snooze_frames_zero_the_ml_sub_score() {
        let config = ScoringConfig::default();
        let (_, breakdown) = aux_score(&input(0, vec![0.0; 9], vec![true; 10]), &config);
        assert_eq!(breakdown.snooze_ratio, 1.0);
        assert_eq!(breakdown.ml_snooze_score, 0.0);
    }

    #[test]
    fn no_snooze_frames_give_ml_sub_score_of_50() {
        let config = ScoringConfig::default();
        let (_, breakdown) = aux_score(&input(0, vec![0.0; 9], vec![false; 10]), &config);
        assert_eq!(breakdown.snooze_ratio, 0.0);
        assert!((breakdown.ml_snooze_score - 50.0).abs() < 1e-9);
    }

    #[test]
    fn snooze_ratio_is_squared() {
        let config = ScoringConfig::default();
        let flags = vec![true, true, false, false];
        let (_, breakdown) = aux_score(&input(0, vec![0.0; 3], flags), &config);
        // (1 − 0.5)² × 100 × 0.5
        assert!((breakdown.ml_snooze_score - 12.5).abs() < 1e-9);
    }

    #[test]
    fn from_window_derives_changes_flags_and_blinks() {
        let config = ScoringConfig::default();
        let base = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let mut frames = vec![
            FrameMeasurement::new(base, 0.0, 0.30, false),
            FrameMeasurement::new(base + chrono::Duration::seconds(1), 0.1, 0.30, true),
            // snooze-like on all three heuristics
            FrameMeasurement::new(base + chrono::Duration::seconds(2), 0.5, 0.30, false),
            FrameMeasurement::new(base + chrono::Duration::seconds(3), 0.0, 0.10, false),
        ];
        frames[0].classifier_label = Some("snooze".into());

        let refs: Vec<&FrameMeasurement> = frames.iter().collect();
        let input = AuxScoreInput::from_window(&refs, &config);

        assert_eq!(input.blink_count, 1);
        assert_eq!(input.yaw_changes.len(), 3);
        assert!((input.yaw_changes[1] - 0.4).abs() < 1e-9);
        assert_eq!(input.snooze_flags, vec![true, false, true, true]);
    }

    #[test]
    fn single_frame_window_is_degenerate() {
        let config = ScoringConfig::default();
        let base = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let frame = FrameMeasurement::new(base, 0.0, 0.30, false);
        let input = AuxScoreInput::from_window(&[&frame], &config);
        let (score, breakdown) = aux_score(&input, &config);
        assert_eq!(score, 0.0);
        assert_eq!(breakdown, AuxBreakdown::default());
    }
}

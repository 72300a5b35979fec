use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One measurement per processed camera frame, as emitted by the signal
/// extractor. Immutable once created; owned by the frame buffer after
/// ingestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameMeasurement {
    pub timestamp: DateTime<Utc>,
    /// Left-right head rotation, signed, relative to facing forward.
    pub yaw: f64,
    /// Eye-aspect-ratio; lower values mean a more closed eye.
    pub ear: f64,
    /// True only on the frame where a blink is confirmed complete.
    pub blink_detected: bool,
    /// Classifier output updates at a lower rate than frame geometry;
    /// absence is a valid state, never defaulted.
    pub classifier_label: Option<String>,
    pub classifier_confidence: Option<f64>,
}

impl FrameMeasurement {
    pub fn new(timestamp: DateTime<Utc>, yaw: f64, ear: f64, blink_detected: bool) -> Self {
        Self {
            timestamp,
            yaw,
            ear,
            blink_detected,
            classifier_label: None,
            classifier_confidence: None,
        }
    }

    pub fn with_classifier(mut self, label: impl Into<String>, confidence: f64) -> Self {
        self.classifier_label = Some(label.into());
        self.classifier_confidence = Some(confidence);
        self
    }
}

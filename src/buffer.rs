use chrono::{DateTime, Duration, Utc};
use std::collections::VecDeque;

use crate::models::FrameMeasurement;

/// Time-ordered store of frame measurements with a trailing retention
/// horizon. One physical store serves both the core and auxiliary window
/// queries; pruning happens on ingestion against the newest timestamp.
#[derive(Debug)]
pub struct FrameBuffer {
    frames: VecDeque<FrameMeasurement>,
    retention: Duration,
}

impl FrameBuffer {
    pub fn new(retention_secs: u64) -> Self {
        Self {
            frames: VecDeque::new(),
            retention: Duration::seconds(retention_secs as i64),
        }
    }

    /// Append a measurement, then evict everything older than the retention
    /// horizon. Arrival is timestamp-monotone per the extractor contract, so
    /// the newest timestamp is the prune reference.
    pub fn ingest(&mut self, measurement: FrameMeasurement) {
        let cutoff = measurement.timestamp - self.retention;
        self.frames.push_back(measurement);
        while let Some(front) = self.frames.front() {
            if front.timestamp >= cutoff {
                break;
            }
            self.frames.pop_front();
        }
    }

    /// Contiguous suffix of measurements with `timestamp >= cutoff`, in
    /// original order. An empty window is a valid result.
    pub fn window_since(&self, cutoff: DateTime<Utc>) -> Vec<&FrameMeasurement> {
        let start = self.frames.partition_point(|f| f.timestamp < cutoff);
        self.frames.iter().skip(start).collect()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

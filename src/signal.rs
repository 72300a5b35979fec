use std::collections::VecDeque;

use crate::models::FrameMeasurement;

/// Boundary to the upstream vision/ML extractor. The core pulls one
/// measurement at a time at frame cadence; a source with nothing ready
/// returns `None` and is polled again on the next frame tick. Gaps in
/// sensing are expected, not errors.
pub trait SignalSource: Send {
    fn next_measurement(&mut self) -> Option<FrameMeasurement>;

    /// Reset the upstream blink counter, for extractors that accumulate one.
    /// Sources without such state ignore this.
    fn reset_blink_counter(&mut self) {}
}

/// Deterministic source replaying a pre-built measurement sequence. Used to
/// drive the engine in tests and offline replays without any camera or ML
/// dependency.
#[derive(Debug, Default)]
pub struct ScriptedSignalSource {
    frames: VecDeque<FrameMeasurement>,
}

impl ScriptedSignalSource {
    pub fn new(frames: Vec<FrameMeasurement>) -> Self {
        Self {
            frames: frames.into(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl SignalSource for ScriptedSignalSource {
    fn next_measurement(&mut self) -> Option<FrameMeasurement> {
        self.frames.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn replays_frames_in_order_then_runs_dry() {
        let base = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let mut source = ScriptedSignalSource::new(vec![
            FrameMeasurement::new(base, 0.1, 0.3, false),
            FrameMeasurement::new(base + chrono::Duration::seconds(1), 0.2, 0.3, true),
        ]);

        assert_eq!(source.remaining(), 2);
        assert_eq!(source.next_measurement().unwrap().yaw, 0.1);
        assert_eq!(source.next_measurement().unwrap().yaw, 0.2);
        assert!(source.next_measurement().is_none());

        // No counter state to reset; must not panic.
        source.reset_blink_counter();
    }
}

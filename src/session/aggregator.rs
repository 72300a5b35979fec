use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::buffer::FrameBuffer;
use crate::config::ScoringConfig;
use crate::models::{
    AuxBreakdown, CoreBreakdown, FocusSegment, FrameMeasurement, ScoreBreakdown, ScoreSnapshot,
    SessionSummary,
};
use crate::scoring::{aux_score, core_score, AuxScoreInput, CoreScoreInput};

/// Single-writer owner of all live session state: the frame buffer, the
/// current scores, the focus segmentation machine, and the score history.
/// Every mutating operation takes an explicit `now` so the aggregator is
/// deterministic under test; the controller supplies the wall clock.
pub struct SessionAggregator {
    config: ScoringConfig,
    buffer: FrameBuffer,
    session_id: String,
    started_at: DateTime<Utc>,

    core_score: f64,
    aux_score: Option<f64>,
    total_score: f64,
    focus_secs: i64,

    last_core_breakdown: CoreBreakdown,
    last_aux_breakdown: Option<AuxBreakdown>,

    // Most recent classifier output seen on any frame, stamped onto snapshots.
    classifier_label: Option<String>,
    classifier_confidence: Option<f64>,

    // Segmentation machine: Some(start) while focused, None while idle.
    focus_started_at: Option<DateTime<Utc>>,
    focus_segments: Vec<FocusSegment>,
    score_history: Vec<ScoreSnapshot>,
}

impl SessionAggregator {
    pub fn new(config: ScoringConfig, started_at: DateTime<Utc>) -> Self {
        let buffer = FrameBuffer::new(config.retention_secs);
        Self {
            config,
            buffer,
            session_id: Uuid::new_v4().to_string(),
            started_at,
            core_score: 0.0,
            aux_score: None,
            total_score: 0.0,
            focus_secs: 0,
            last_core_breakdown: CoreBreakdown::default(),
            last_aux_breakdown: None,
            classifier_label: None,
            classifier_confidence: None,
            focus_started_at: None,
            focus_segments: Vec::new(),
            score_history: Vec::new(),
        }
    }

    /// Forward a measurement into the frame buffer. No scoring side effect.
    pub fn on_frame(&mut self, measurement: FrameMeasurement) {
        if measurement.classifier_label.is_some() {
            self.classifier_label = measurement.classifier_label.clone();
            self.classifier_confidence = measurement.classifier_confidence;
        }
        self.buffer.ingest(measurement);
    }

    /// Evaluate the core window ending at `now`, update the current core
    /// score, and recombine. Returns the number of frames evaluated. An
    /// empty window records a zero score so downstream consumers can tell
    /// "no data" from "low score".
    pub fn on_core_tick(&mut self, now: DateTime<Utc>) -> usize {
        let cutoff = now - Duration::seconds(self.config.core_window_secs as i64);
        let window = self.buffer.window_since(cutoff);
        let frames = window.len();

        let input = CoreScoreInput::from_window(&window, self.config.core_window_secs as f64);
        let (score, breakdown) = core_score(&input, &self.config);
        self.core_score = score;
        self.last_core_breakdown = breakdown;

        self.recombine(now);
        frames
    }

    /// Evaluate the auxiliary window ending at `now`, update the current aux
    /// score, and recombine. Returns the number of frames evaluated.
    pub fn on_aux_tick(&mut self, now: DateTime<Utc>) -> usize {
        let cutoff = now - Duration::seconds(self.config.aux_window_secs as i64);
        let window = self.buffer.window_since(cutoff);
        let frames = window.len();

        let input = AuxScoreInput::from_window(&window, &self.config);
        let (score, breakdown) = aux_score(&input, &self.config);
        self.aux_score = Some(score);
        self.last_aux_breakdown = Some(breakdown);

        self.recombine(now);
        frames
    }

    /// Combine the current cycle scores, run the focus segmentation
    /// transition, refresh the focused-seconds counter, and append one
    /// snapshot to the history. Aux contributes 0 until its first cycle
    /// completes, biasing the early session toward the core score.
    fn recombine(&mut self, now: DateTime<Utc>) {
        let total = self.core_score * self.config.core_weight
            + self.aux_score.unwrap_or(0.0) * self.config.aux_weight;
        self.total_score = total;
        let is_focused = total >= self.config.focus_threshold;

        match (is_focused, self.focus_started_at) {
            (true, None) => self.focus_started_at = Some(now),
            (false, Some(start)) => {
                self.focus_segments.push(FocusSegment {
                    id: Uuid::new_v4().to_string(),
                    start,
                    end: now,
                });
                self.focus_started_at = None;
            }
            _ => {}
        }

        self.focus_secs = self.accumulated_focus_secs(now);

        self.score_history.push(ScoreSnapshot {
            timestamp: now,
            core_score: self.core_score,
            aux_score: self.aux_score,
            total_score: total,
            is_focused,
            classifier_label: self.classifier_label.clone(),
            classifier_confidence: self.classifier_confidence,
            breakdown: ScoreBreakdown {
                core: self.last_core_breakdown.clone(),
                aux: self.last_aux_breakdown.clone(),
            },
        });
    }

    fn accumulated_focus_secs(&self, now: DateTime<Utc>) -> i64 {
        let closed: i64 = self.focus_segments.iter().map(|s| s.duration_secs()).sum();
        let open = self
            .focus_started_at
            .map(|start| (now - start).num_seconds())
            .unwrap_or(0);
        closed + open
    }

    /// Read-only session report. An open focus segment is closed at `now`
    /// for the returned view only; the live segmentation state is untouched,
    /// so repeated calls differ solely in that provisional close timestamp.
    pub fn summarize(&self, now: DateTime<Utc>) -> SessionSummary {
        let mut segments = self.focus_segments.clone();
        if let Some(start) = self.focus_started_at {
            segments.push(FocusSegment {
                id: Uuid::new_v4().to_string(),
                start,
                end: now,
            });
        }

        let total_focus_secs = segments.iter().map(|s| s.duration_secs()).sum();
        let average_score = if self.score_history.is_empty() {
            0.0
        } else {
            self.score_history.iter().map(|s| s.total_score).sum::<f64>()
                / self.score_history.len() as f64
        };

        SessionSummary {
            session_id: self.session_id.clone(),
            started_at: self.started_at,
            ended_at: now,
            total_duration_secs: (now - self.started_at).num_seconds(),
            total_focus_secs,
            average_score,
            score_history: self.score_history.clone(),
            focus_segments: segments,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn core_score(&self) -> f64 {
        self.core_score
    }

    pub fn aux_score(&self) -> Option<f64> {
        self.aux_score
    }

    pub fn total_score(&self) -> f64 {
        self.total_score
    }

    /// Accumulated focused seconds as of the most recent completed tick.
    pub fn focus_secs(&self) -> i64 {
        self.focus_secs
    }

    pub fn is_focused(&self) -> bool {
        self.total_score >= self.config.focus_threshold
    }

    pub fn history(&self) -> &[ScoreSnapshot] {
        &self.score_history
    }

    pub fn buffered_frames(&self) -> usize {
        self.buffer.len()
    }
}

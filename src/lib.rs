//! sightline: live biometric focus-scoring engine.
//!
//! Ingests per-frame signals (head yaw, eye-aspect-ratio, blink events, an
//! external classifier's label/confidence) at camera frame-rate and derives
//! an explainable focus score on two overlapping timescales, plus a running
//! log of focus segments for the session.
//!
//! The scoring core is pure and clock-explicit; [`SessionController`] wraps
//! it with tokio tickers for live use. Landmark extraction, EAR computation
//! and the pose classifier live behind the [`SignalSource`] boundary.

pub mod buffer;
pub mod config;
pub mod metrics;
pub mod models;
pub mod scoring;
pub mod session;
pub mod signal;
pub mod utils;

pub use buffer::FrameBuffer;
pub use config::ScoringConfig;
pub use metrics::{CycleMetrics, MetricsCollector, MetricsSnapshot, ScoreCycle};
pub use models::{
    AuxBreakdown, CoreBreakdown, FocusSegment, FrameMeasurement, ScoreBreakdown, ScoreSnapshot,
    SessionSummary,
};
pub use session::{ScoreView, SessionAggregator, SessionController};
pub use signal::{ScriptedSignalSource, SignalSource};
pub use utils::init_logging;

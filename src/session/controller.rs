use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use chrono::Utc;
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::config::ScoringConfig;
use crate::metrics::{CycleMetrics, MetricsCollector, MetricsSnapshot, ScoreCycle};
use crate::models::{FrameMeasurement, SessionSummary};
use crate::session::SessionAggregator;
use crate::signal::SignalSource;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::log_info;

/// Presentation-facing view of the current scores, reflecting the most
/// recent completed tick.
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ScoreView {
    pub core_score: f64,
    pub aux_score: Option<f64>,
    pub total_score: f64,
    pub is_focused: bool,
    pub focus_secs: i64,
}

struct Workers {
    cancel_token: Option<CancellationToken>,
    handles: Vec<JoinHandle<()>>,
}

/// Timer-driven shell around the aggregator. Ingestion and both tick
/// handlers serialize on one mutex; the periodic loops are tokio tasks whose
/// lifetime is bounded by a cancellation token, so nothing touches
/// aggregator state after `end()` returns.
#[derive(Clone)]
pub struct SessionController {
    config: ScoringConfig,
    aggregator: Arc<Mutex<SessionAggregator>>,
    metrics: MetricsCollector,
    workers: Arc<Mutex<Workers>>,
}

impl SessionController {
    pub fn new(config: ScoringConfig) -> Self {
        let aggregator = SessionAggregator::new(config.clone(), Utc::now());
        Self {
            config,
            aggregator: Arc::new(Mutex::new(aggregator)),
            metrics: MetricsCollector::new(),
            workers: Arc::new(Mutex::new(Workers {
                cancel_token: None,
                handles: Vec::new(),
            })),
        }
    }

    /// Begin a session: reset aggregator state and spawn the core and aux
    /// scoring loops. Frames are delivered through `on_frame`.
    pub async fn start(&self) -> Result<()> {
        let mut workers = self.workers.lock().await;
        if workers.cancel_token.is_some() {
            bail!("scoring session already active");
        }

        let token = self.spawn_scoring(&mut workers).await;
        workers.cancel_token = Some(token);
        Ok(())
    }

    /// Begin a session fed by a pulled signal source: the scoring loops plus
    /// an ingest pump polling the source at frame cadence. The source's
    /// blink counter is reset so no stale count leaks into the new session.
    pub async fn start_with_source<S>(&self, mut source: S) -> Result<()>
    where
        S: SignalSource + 'static,
    {
        let mut workers = self.workers.lock().await;
        if workers.cancel_token.is_some() {
            bail!("scoring session already active");
        }

        source.reset_blink_counter();
        let token = self.spawn_scoring(&mut workers).await;
        let handle = tokio::spawn(ingest_loop(
            source,
            self.config.frame_interval_ms,
            self.aggregator.clone(),
            token.clone(),
        ));
        workers.handles.push(handle);
        workers.cancel_token = Some(token);
        Ok(())
    }

    async fn spawn_scoring(&self, workers: &mut Workers) -> CancellationToken {
        {
            let mut aggregator = self.aggregator.lock().await;
            *aggregator = SessionAggregator::new(self.config.clone(), Utc::now());
            log_info!("session {} starting", aggregator.session_id());
        }
        self.metrics.reset().await;

        let token = CancellationToken::new();
        let core = tokio::spawn(scoring_loop(
            ScoreCycle::Core,
            Duration::from_secs(self.config.core_window_secs),
            self.aggregator.clone(),
            self.metrics.clone(),
            token.clone(),
        ));
        let aux = tokio::spawn(scoring_loop(
            ScoreCycle::Aux,
            Duration::from_secs(self.config.aux_window_secs),
            self.aggregator.clone(),
            self.metrics.clone(),
            token.clone(),
        ));
        workers.handles = vec![core, aux];
        token
    }

    /// Push entry point for extractors that call into the core directly.
    pub async fn on_frame(&self, measurement: FrameMeasurement) {
        self.aggregator.lock().await.on_frame(measurement);
    }

    pub async fn snapshot(&self) -> ScoreView {
        let aggregator = self.aggregator.lock().await;
        ScoreView {
            core_score: aggregator.core_score(),
            aux_score: aggregator.aux_score(),
            total_score: aggregator.total_score(),
            is_focused: aggregator.is_focused(),
            focus_secs: aggregator.focus_secs(),
        }
    }

    /// Live report at the current instant. Does not end the session; an
    /// open focus segment is closed provisionally in the returned view only.
    pub async fn summarize(&self) -> SessionSummary {
        self.aggregator.lock().await.summarize(Utc::now())
    }

    /// Stop both scoring loops (and the ingest pump, if any), wait for them
    /// to wind down, and return the final summary.
    pub async fn end(&self) -> Result<SessionSummary> {
        let (token, handles) = {
            let mut workers = self.workers.lock().await;
            let token = workers
                .cancel_token
                .take()
                .ok_or_else(|| anyhow!("no active session to end"))?;
            (token, std::mem::take(&mut workers.handles))
        };

        token.cancel();
        for handle in handles {
            handle.await.context("scoring worker failed to join")?;
        }

        let summary = self.aggregator.lock().await.summarize(Utc::now());
        log_info!(
            "session {} ended: {}s focused of {}s, avg score {:.1}",
            summary.session_id,
            summary.total_focus_secs,
            summary.total_duration_secs,
            summary.average_score
        );
        Ok(summary)
    }

    pub async fn is_active(&self) -> bool {
        self.workers.lock().await.cancel_token.is_some()
    }

    pub async fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.get_snapshot().await
    }
}

async fn scoring_loop(
    cycle: ScoreCycle,
    period: Duration,
    aggregator: Arc<Mutex<SessionAggregator>>,
    metrics: MetricsCollector,
    cancel_token: CancellationToken,
) {
    // First evaluation once a full window has elapsed, not at t=0.
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let now = Utc::now();
                let eval_start = Instant::now();
                let (frames, score) = {
                    let mut aggregator = aggregator.lock().await;
                    let frames = match cycle {
                        ScoreCycle::Core => aggregator.on_core_tick(now),
                        ScoreCycle::Aux => aggregator.on_aux_tick(now),
                    };
                    let score = match cycle {
                        ScoreCycle::Core => aggregator.core_score(),
                        ScoreCycle::Aux => aggregator.aux_score().unwrap_or(0.0),
                    };
                    (frames, score)
                };

                metrics
                    .record_cycle(CycleMetrics {
                        timestamp: now,
                        cycle,
                        frames,
                        duration_ms: eval_start.elapsed().as_millis() as u64,
                        score,
                    })
                    .await;

                log_info!("{} cycle scored {:.1} over {} frames", cycle.as_str(), score, frames);
            }
            _ = cancel_token.cancelled() => {
                log_info!("{} scoring loop shutting down", cycle.as_str());
                break;
            }
        }
    }
}

async fn ingest_loop<S: SignalSource>(
    mut source: S,
    frame_interval_ms: u64,
    aggregator: Arc<Mutex<SessionAggregator>>,
    cancel_token: CancellationToken,
) {
    let mut ticker = tokio::time::interval(Duration::from_millis(frame_interval_ms.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                // None means no frame ready; sensing gaps are expected.
                if let Some(measurement) = source.next_measurement() {
                    aggregator.lock().await.on_frame(measurement);
                }
            }
            _ = cancel_token.cancelled() => {
                log_info!("ingest loop shutting down");
                break;
            }
        }
    }
}

mod types;

pub use types::{CycleMetrics, MetricsSnapshot, ScoreCycle};

use std::sync::Arc;
use tokio::sync::Mutex;

const MAX_RECENT_CYCLES: usize = 20;

/// In-memory diagnostics for the scoring loops: per-cycle timings plus
/// running counters. Purely observational; never feeds back into scoring.
pub struct MetricsCollector {
    inner: Arc<Mutex<MetricsState>>,
}

struct MetricsState {
    recent_cycles: Vec<CycleMetrics>,
    core_cycle_count: u64,
    aux_cycle_count: u64,
    empty_window_count: u64,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MetricsState {
                recent_cycles: Vec::with_capacity(MAX_RECENT_CYCLES),
                core_cycle_count: 0,
                aux_cycle_count: 0,
                empty_window_count: 0,
            })),
        }
    }

    pub async fn record_cycle(&self, metrics: CycleMetrics) {
        let mut state = self.inner.lock().await;

        match metrics.cycle {
            ScoreCycle::Core => state.core_cycle_count += 1,
            ScoreCycle::Aux => state.aux_cycle_count += 1,
        }
        if metrics.frames == 0 {
            state.empty_window_count += 1;
        }

        state.recent_cycles.push(metrics);

        if state.recent_cycles.len() > MAX_RECENT_CYCLES {
            state.recent_cycles.remove(0);
        }
    }

    pub async fn get_snapshot(&self) -> MetricsSnapshot {
        let state = self.inner.lock().await;
        MetricsSnapshot {
            recent_cycles: state.recent_cycles.clone(),
            core_cycle_count: state.core_cycle_count,
            aux_cycle_count: state.aux_cycle_count,
            empty_window_count: state.empty_window_count,
        }
    }

    pub async fn reset(&self) {
        let mut state = self.inner.lock().await;
        state.recent_cycles.clear();
        state.core_cycle_count = 0;
        state.aux_cycle_count = 0;
        state.empty_window_count = 0;
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for MetricsCollector {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

// Performance metrics module
//
// Lightweight counters for submissions, generation calls and state traffic

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Session metrics
///
/// Uses atomic operations for thread-safe tracking without locks. The
/// orchestrator records into these as intents arrive and jobs resolve; the
/// binary logs a summary on shutdown.
#[derive(Debug)]
pub struct Metrics {
    /// Submit intents that started a job
    pub submissions_started: AtomicUsize,

    /// Submit intents rejected by validation
    pub submissions_rejected: AtomicUsize,

    /// Current jobs that resolved with results
    pub generations_succeeded: AtomicUsize,

    /// Current jobs that resolved with an error
    pub generations_failed: AtomicUsize,

    /// Superseded jobs whose outcome was discarded
    pub stale_completions: AtomicUsize,

    /// Export descriptors handed out
    pub exports: AtomicUsize,

    /// Total time spent waiting on the generation client, in milliseconds
    pub total_generation_time_ms: AtomicU64,

    /// Number of generation calls timed
    pub generation_calls: AtomicU64,

    /// Number of state updates performed
    pub state_updates: AtomicU64,

    /// Number of change events broadcast
    pub state_broadcasts: AtomicU64,

    /// Number of change events with no live receiver
    pub state_broadcast_errors: AtomicU64,

    start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            submissions_started: AtomicUsize::new(0),
            submissions_rejected: AtomicUsize::new(0),
            generations_succeeded: AtomicUsize::new(0),
            generations_failed: AtomicUsize::new(0),
            stale_completions: AtomicUsize::new(0),
            exports: AtomicUsize::new(0),
            total_generation_time_ms: AtomicU64::new(0),
            generation_calls: AtomicU64::new(0),
            state_updates: AtomicU64::new(0),
            state_broadcasts: AtomicU64::new(0),
            state_broadcast_errors: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn record_submission_started(&self) {
        self.submissions_started.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_submission_rejected(&self) {
        self.submissions_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_generation_succeeded(&self) {
        self.generations_succeeded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_generation_failed(&self) {
        self.generations_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_stale_completion(&self) {
        self.stale_completions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_export(&self) {
        self.exports.fetch_add(1, Ordering::Relaxed);
    }

    /// Record how long one generation call took, stale or not
    pub fn record_generation_time(&self, duration: Duration) {
        self.total_generation_time_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
        self.generation_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_state_update(&self) {
        self.state_updates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_state_broadcast(&self) {
        self.state_broadcasts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_state_broadcast_error(&self) {
        self.state_broadcast_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Average generation call time in milliseconds
    pub fn avg_generation_time_ms(&self) -> f64 {
        let total = self.total_generation_time_ms.load(Ordering::Relaxed);
        let count = self.generation_calls.load(Ordering::Relaxed);
        if count > 0 {
            total as f64 / count as f64
        } else {
            0.0
        }
    }

    /// Log metrics summary
    pub fn log_summary(&self) {
        let uptime = self.uptime();
        tracing::info!("=== Session Metrics Summary ===");
        tracing::info!("Uptime: {:.2}s", uptime.as_secs_f64());
        tracing::info!(
            "Submissions: {} started, {} rejected",
            self.submissions_started.load(Ordering::Relaxed),
            self.submissions_rejected.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Generations: {} succeeded, {} failed, {} discarded as stale",
            self.generations_succeeded.load(Ordering::Relaxed),
            self.generations_failed.load(Ordering::Relaxed),
            self.stale_completions.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Generation time: {:.2}s total (avg: {:.2}ms per call)",
            self.total_generation_time_ms.load(Ordering::Relaxed) as f64 / 1000.0,
            self.avg_generation_time_ms()
        );
        tracing::info!(
            "State updates: {}, broadcasts: {}, errors: {}",
            self.state_updates.load(Ordering::Relaxed),
            self.state_broadcasts.load(Ordering::Relaxed),
            self.state_broadcast_errors.load(Ordering::Relaxed)
        );
        tracing::info!("Exports: {}", self.exports.load(Ordering::Relaxed));
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

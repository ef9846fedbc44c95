use dashmap::DashMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Global metrics collector for the application.
///
/// Tracks provider call outcomes, latency, fallback engagements, and
/// per-endpoint request counts. Thread-safe and cheap to clone.
#[derive(Clone)]
pub struct Metrics {
    inner: Arc<MetricsInner>,
}

struct MetricsInner {
    // Provider call metrics
    api_calls_total: AtomicUsize,
    api_calls_success: AtomicUsize,
    api_calls_failed: AtomicUsize,
    api_latency_ms: RwLock<Vec<u64>>,

    // Router metrics
    fallbacks_triggered: AtomicUsize,

    // Per-endpoint request counters
    endpoint_counters: DashMap<String, AtomicUsize>,

    // Start time for uptime calculation
    start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetricsInner {
                api_calls_total: AtomicUsize::new(0),
                api_calls_success: AtomicUsize::new(0),
                api_calls_failed: AtomicUsize::new(0),
                api_latency_ms: RwLock::new(Vec::new()),
                fallbacks_triggered: AtomicUsize::new(0),
                endpoint_counters: DashMap::new(),
                start_time: Instant::now(),
            }),
        }
    }

    // Provider call metrics
    pub fn record_api_call(&self, success: bool, duration: Duration) {
        self.inner.api_calls_total.fetch_add(1, Ordering::Relaxed);
        if success {
            self.inner.api_calls_success.fetch_add(1, Ordering::Relaxed);
        } else {
            self.inner.api_calls_failed.fetch_add(1, Ordering::Relaxed);
        }
        self.inner
            .api_latency_ms
            .write()
            .push(duration.as_millis() as u64);
    }

    // Router metrics
    pub fn record_fallback(&self) {
        self.inner.fallbacks_triggered.fetch_add(1, Ordering::Relaxed);
    }

    // Endpoint metrics
    pub fn record_endpoint_request(&self, endpoint: &str) {
        self.inner
            .endpoint_counters
            .entry(endpoint.to_string())
            .or_insert_with(|| AtomicUsize::new(0))
            .fetch_add(1, Ordering::Relaxed);
    }

    // Get snapshot for reporting
    pub fn snapshot(&self) -> MetricsSnapshot {
        let api_latency = self.inner.api_latency_ms.read();
        let api_latency_avg = avg(&api_latency);
        let api_latency_p50 = percentile(&api_latency, 0.5);
        let api_latency_p95 = percentile(&api_latency, 0.95);
        let api_latency_p99 = percentile(&api_latency, 0.99);
        drop(api_latency);

        let requests_by_endpoint = self
            .inner
            .endpoint_counters
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().load(Ordering::Relaxed)))
            .collect();

        MetricsSnapshot {
            api_calls_total: self.inner.api_calls_total.load(Ordering::Relaxed),
            api_calls_success: self.inner.api_calls_success.load(Ordering::Relaxed),
            api_calls_failed: self.inner.api_calls_failed.load(Ordering::Relaxed),
            api_latency_avg_ms: api_latency_avg,
            api_latency_p50_ms: api_latency_p50,
            api_latency_p95_ms: api_latency_p95,
            api_latency_p99_ms: api_latency_p99,
            fallbacks_triggered: self.inner.fallbacks_triggered.load(Ordering::Relaxed),
            requests_by_endpoint,
            uptime_seconds: self.inner.start_time.elapsed().as_secs(),
        }
    }

    /// Generate Prometheus-format metrics
    pub fn to_prometheus(&self) -> String {
        let snapshot = self.snapshot();
        format!(
            r#"# HELP api_calls_total Total number of provider calls made
# TYPE api_calls_total counter
api_calls_total {}

# HELP api_calls_success Number of successful provider calls
# TYPE api_calls_success counter
api_calls_success {}

# HELP api_calls_failed Number of failed provider calls
# TYPE api_calls_failed counter
api_calls_failed {}

# HELP api_latency_avg_ms Average provider call latency in milliseconds
# TYPE api_latency_avg_ms gauge
api_latency_avg_ms {}

# HELP fallbacks_triggered_total Forward translations that fell back to Gemini
# TYPE fallbacks_triggered_total counter
fallbacks_triggered_total {}

# HELP uptime_seconds Application uptime in seconds
# TYPE uptime_seconds counter
uptime_seconds {}
"#,
            snapshot.api_calls_total,
            snapshot.api_calls_success,
            snapshot.api_calls_failed,
            snapshot.api_latency_avg_ms,
            snapshot.fallbacks_triggered,
            snapshot.uptime_seconds,
        )
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub api_calls_total: usize,
    pub api_calls_success: usize,
    pub api_calls_failed: usize,
    pub api_latency_avg_ms: u64,
    pub api_latency_p50_ms: u64,
    pub api_latency_p95_ms: u64,
    pub api_latency_p99_ms: u64,
    pub fallbacks_triggered: usize,
    pub requests_by_endpoint: HashMap<String, usize>,
    pub uptime_seconds: u64,
}

fn avg(values: &[u64]) -> u64 {
    if values.is_empty() {
        return 0;
    }
    values.iter().sum::<u64>() / values.len() as u64
}

fn percentile(values: &[u64], p: f64) -> u64 {
    if values.is_empty() {
        return 0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let rank = ((sorted.len() as f64 - 1.0) * p).round() as usize;
    sorted[rank.min(sorted.len() - 1)]
}

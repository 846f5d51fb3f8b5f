//! Basic metrics instrumentation for tracking storage performance.
//!
//! Provides counters and duration tracking for store calls.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Metrics collector for tracking store performance.
#[derive(Debug, Clone)]
pub struct Metrics {
    /// Total number of store calls made
    store_calls_total: Arc<AtomicU64>,

    /// Total number of failed store calls (missing rows are not failures)
    store_errors_total: Arc<AtomicU64>,

    /// Store calls abandoned because they exceeded the timeout
    store_timeouts_total: Arc<AtomicU64>,

    /// Total duration of all store calls in milliseconds
    store_duration_total_ms: Arc<AtomicU64>,

    /// Number of contacts returned by store calls
    contacts_returned_total: Arc<AtomicU64>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self {
            store_calls_total: Arc::new(AtomicU64::new(0)),
            store_errors_total: Arc::new(AtomicU64::new(0)),
            store_timeouts_total: Arc::new(AtomicU64::new(0)),
            store_duration_total_ms: Arc::new(AtomicU64::new(0)),
            contacts_returned_total: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record a store call with duration.
    pub fn record_store_call(&self, duration: Duration) {
        self.store_calls_total.fetch_add(1, Ordering::Relaxed);
        self.store_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Record a failed store call.
    pub fn record_store_error(&self) {
        self.store_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a store call that hit the timeout.
    pub fn record_store_timeout(&self) {
        self.store_timeouts_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record contacts returned.
    pub fn record_contacts_returned(&self, count: usize) {
        self.contacts_returned_total
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn store_calls_total(&self) -> u64 {
        self.store_calls_total.load(Ordering::Relaxed)
    }

    pub fn store_errors_total(&self) -> u64 {
        self.store_errors_total.load(Ordering::Relaxed)
    }

    pub fn store_timeouts_total(&self) -> u64 {
        self.store_timeouts_total.load(Ordering::Relaxed)
    }

    pub fn store_duration_total_ms(&self) -> u64 {
        self.store_duration_total_ms.load(Ordering::Relaxed)
    }

    /// Get average store call duration in milliseconds.
    pub fn store_duration_avg_ms(&self) -> f64 {
        let total = self.store_duration_total_ms.load(Ordering::Relaxed);
        let count = self.store_calls_total.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    pub fn contacts_returned_total(&self) -> u64 {
        self.contacts_returned_total.load(Ordering::Relaxed)
    }

    /// Get a summary of all metrics.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            store_calls_total: self.store_calls_total(),
            store_errors_total: self.store_errors_total(),
            store_timeouts_total: self.store_timeouts_total(),
            store_duration_total_ms: self.store_duration_total_ms(),
            store_duration_avg_ms: self.store_duration_avg_ms(),
            contacts_returned_total: self.contacts_returned_total(),
        }
    }
}

/// A snapshot of metrics values.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSummary {
    pub store_calls_total: u64,
    pub store_errors_total: u64,
    pub store_timeouts_total: u64,
    pub store_duration_total_ms: u64,
    pub store_duration_avg_ms: f64,
    pub contacts_returned_total: u64,
}

/// Helper for timing store calls.
pub struct StoreTimer {
    start: Instant,
    metrics: Metrics,
}

impl StoreTimer {
    /// Start timing a store call.
    pub fn new(metrics: Metrics) -> Self {
        Self {
            start: Instant::now(),
            metrics,
        }
    }

    /// Complete the timing and record the duration.
    pub fn complete(self) {
        self.metrics.record_store_call(self.start.elapsed());
    }

    /// Complete the timing and record as an error.
    pub fn complete_with_error(self) {
        self.metrics.record_store_call(self.start.elapsed());
        self.metrics.record_store_error();
    }
}

//! Dispatch metrics for observability

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for a single dispatcher instance
#[derive(Debug, Default)]
pub struct DispatchMetrics {
    /// Total outcomes published to the result channel
    published_count: AtomicU64,
    /// Total invocation attempts issued
    invoked_count: AtomicU64,
    /// Total failed invocation attempts
    failure_count: AtomicU64,
    /// Total empty-payload validation failures
    validation_count: AtomicU64,
    /// Outcomes dropped because the result channel was closed
    dropped_count: AtomicU64,
}

impl DispatchMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Get published outcome count
    pub fn published_count(&self) -> u64 {
        self.published_count.load(Ordering::Relaxed)
    }

    /// Increment published outcome count
    pub fn inc_published_count(&self) {
        self.published_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get invocation attempt count
    pub fn invoked_count(&self) -> u64 {
        self.invoked_count.load(Ordering::Relaxed)
    }

    /// Increment invocation attempt count
    pub fn inc_invoked_count(&self) {
        self.invoked_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get failed invocation count
    pub fn failure_count(&self) -> u64 {
        self.failure_count.load(Ordering::Relaxed)
    }

    /// Increment failed invocation count
    pub fn inc_failure_count(&self) {
        self.failure_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get validation failure count
    pub fn validation_count(&self) -> u64 {
        self.validation_count.load(Ordering::Relaxed)
    }

    /// Increment validation failure count
    pub fn inc_validation_count(&self) {
        self.validation_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get dropped outcome count
    pub fn dropped_count(&self) -> u64 {
        self.dropped_count.load(Ordering::Relaxed)
    }

    /// Increment dropped outcome count
    pub fn inc_dropped_count(&self) {
        self.dropped_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of all metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            published_count: self.published_count(),
            invoked_count: self.invoked_count(),
            failure_count: self.failure_count(),
            validation_count: self.validation_count(),
            dropped_count: self.dropped_count(),
        }
    }
}

/// Snapshot of dispatch metrics (for reporting)
#[derive(Debug, Clone, Copy)]
pub struct MetricsSnapshot {
    pub published_count: u64,
    pub invoked_count: u64,
    pub failure_count: u64,
    pub validation_count: u64,
    pub dropped_count: u64,
}

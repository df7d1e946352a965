//! Dispatch metrics.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Dispatch-level metrics counters.
#[derive(Debug, Default)]
pub struct DispatchMetrics {
    /// Workflow events handled
    pub events: AtomicU64,
    /// Notifications persisted
    pub persisted: AtomicU64,
    /// Pushes accepted by the channel
    pub pushed: AtomicU64,
    /// Pushes that errored, timed out, or were not accepted
    pub push_failed: AtomicU64,
    /// Events that took the fallback path
    pub fallbacks: AtomicU64,
}

impl DispatchMetrics {
    /// Create new zeroed metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one handled event
    pub fn record_event(&self) {
        self.events.fetch_add(1, Ordering::Relaxed);
    }

    /// Record one persisted notification
    pub fn record_persisted(&self) {
        self.persisted.fetch_add(1, Ordering::Relaxed);
    }

    /// Record one accepted push
    pub fn record_pushed(&self) {
        self.pushed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record one failed push
    pub fn record_push_failed(&self) {
        self.push_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record one fallback
    pub fn record_fallback(&self) {
        self.fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of all metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            events: self.events.load(Ordering::Relaxed),
            persisted: self.persisted.load(Ordering::Relaxed),
            pushed: self.pushed.load(Ordering::Relaxed),
            push_failed: self.push_failed.load(Ordering::Relaxed),
            fallbacks: self.fallbacks.load(Ordering::Relaxed),
        }
    }
}

/// Serializable metrics snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Workflow events handled
    pub events: u64,
    /// Notifications persisted
    pub persisted: u64,
    /// Pushes accepted by the channel
    pub pushed: u64,
    /// Pushes that failed
    pub push_failed: u64,
    /// Events that took the fallback path
    pub fallbacks: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_reflects_counters() {
        let metrics = DispatchMetrics::new();
        metrics.record_event();
        metrics.record_persisted();
        metrics.record_persisted();
        metrics.record_push_failed();

        let snap = metrics.snapshot();
        assert_eq!(snap.events, 1);
        assert_eq!(snap.persisted, 2);
        assert_eq!(snap.pushed, 0);
        assert_eq!(snap.push_failed, 1);
        assert_eq!(snap.fallbacks, 0);
    }
}

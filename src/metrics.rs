//! Lock-free generation counters

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Counters updated by a generator when metrics are enabled
#[derive(Debug, Default)]
pub(crate) struct Metrics {
    issued: AtomicU64,
    sequence_overflow_events: AtomicU64,
    clock_backward_events: AtomicU64,
    wait_events: AtomicU64,
    total_wait_nanos: AtomicU64,
}

impl Metrics {
    #[inline]
    pub(crate) fn record_issued(&self, count: u64) {
        self.issued.fetch_add(count, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_sequence_overflow(&self) {
        self.sequence_overflow_events.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_clock_backward(&self) {
        self.clock_backward_events.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_wait(&self, waited: Duration) {
        let nanos = u64::try_from(waited.as_nanos()).unwrap_or(u64::MAX);
        self.wait_events.fetch_add(1, Ordering::Relaxed);
        self.total_wait_nanos.fetch_add(nanos, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            enabled: true,
            issued: self.issued.load(Ordering::Relaxed),
            sequence_overflow_events: self.sequence_overflow_events.load(Ordering::Relaxed),
            clock_backward_events: self.clock_backward_events.load(Ordering::Relaxed),
            wait_events: self.wait_events.load(Ordering::Relaxed),
            total_wait_nanos: self.total_wait_nanos.load(Ordering::Relaxed),
        }
    }

    pub(crate) fn reset(&self) {
        self.issued.store(0, Ordering::Relaxed);
        self.sequence_overflow_events.store(0, Ordering::Relaxed);
        self.clock_backward_events.store(0, Ordering::Relaxed);
        self.wait_events.store(0, Ordering::Relaxed);
        self.total_wait_nanos.store(0, Ordering::Relaxed);
    }
}

/// Point-in-time copy of the generator counters.
///
/// `enabled` is false (and every counter zero) for generators built without
/// metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricsSnapshot {
    pub enabled: bool,
    pub issued: u64,
    pub sequence_overflow_events: u64,
    pub clock_backward_events: u64,
    pub wait_events: u64,
    pub total_wait_nanos: u64,
}

impl MetricsSnapshot {
    /// Cumulative time spent waiting for the clock
    pub fn total_wait(&self) -> Duration {
        Duration::from_nanos(self.total_wait_nanos)
    }
}

//! Configuration for the snowflake generator

mod builder;

use std::time::Duration;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use thiserror::Error;

pub use builder::{GeneratorConfigBuilder, MAX_BATCH_SIZE_LIMIT, MAX_EPOCH_MS};
use builder::{
    DEFAULT_BACKWARD_MAX_RETRIES, DEFAULT_BACKWARD_TOLERANCE_MS, DEFAULT_EPOCH,
    DEFAULT_FUTURE_TOLERANCE, DEFAULT_MAX_BATCH_SIZE, DEFAULT_OVERFLOW_POLL_INTERVAL,
    DEFAULT_TICK_WAIT_LIMIT,
};

/// Default epoch in milliseconds since the Unix epoch
pub const DEFAULT_EPOCH_MS: i64 = DEFAULT_EPOCH;

/// Default epoch as a UTC datetime
pub static DEFAULT_EPOCH_DATETIME: Lazy<DateTime<Utc>> = Lazy::new(|| {
    DateTime::<Utc>::from_timestamp_millis(DEFAULT_EPOCH).unwrap_or_default()
});

/// Errors related to `GeneratorConfig` builder validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Epoch before the Unix epoch, or too late for the timestamp field
    #[error("Epoch {epoch} is invalid. Must be between 0 and {}", MAX_EPOCH_MS)]
    InvalidEpoch { epoch: i64 },
    /// Batch limit of zero or above `MAX_BATCH_SIZE_LIMIT`
    #[error("Max batch size {size} is invalid. Must be between 1 and {}", MAX_BATCH_SIZE_LIMIT)]
    InvalidMaxBatchSize { size: usize },
    /// Negative backward tolerance
    #[error("Backward tolerance {tolerance_ms} ms must not be negative")]
    InvalidTolerance { tolerance_ms: i64 },
}

/// What the generator does when the sampled clock is behind its last timestamp
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BackwardPolicy {
    /// Fail the call immediately
    Error,
    /// Sleep through small regressions, fail on large ones
    #[default]
    Wait,
    /// Keep minting on the last timestamp until the clock catches up
    UseLastTimestamp,
}

/// Configuration for the snowflake generator
#[derive(Debug, Clone, Copy)]
pub struct GeneratorConfig {
    epoch: i64,
    backward_policy: BackwardPolicy,
    backward_tolerance_ms: i64,
    backward_max_retries: u32,
    enable_metrics: bool,
    max_batch_size: usize,
    overflow_poll_interval: Duration,
    tick_wait_limit: Duration,
    future_tolerance: Duration,
}

impl GeneratorConfig {
    /// Create config from builder
    pub(crate) fn from_builder(b: GeneratorConfigBuilder) -> Self {
        Self {
            epoch: b.epoch,
            backward_policy: b.backward_policy,
            backward_tolerance_ms: b.backward_tolerance_ms,
            backward_max_retries: b.backward_max_retries,
            enable_metrics: b.enable_metrics,
            max_batch_size: b.max_batch_size,
            overflow_poll_interval: b.overflow_poll_interval,
            tick_wait_limit: b.tick_wait_limit,
            future_tolerance: b.future_tolerance,
        }
    }

    /// Create a new configuration builder
    pub fn builder() -> GeneratorConfigBuilder {
        GeneratorConfigBuilder::new()
    }

    #[inline(always)]
    pub const fn epoch(&self) -> i64 {
        self.epoch
    }

    /// Epoch as a UTC datetime
    pub fn epoch_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.epoch)
    }

    #[inline(always)]
    pub const fn backward_policy(&self) -> BackwardPolicy {
        self.backward_policy
    }

    #[inline(always)]
    pub const fn backward_tolerance_ms(&self) -> i64 {
        self.backward_tolerance_ms
    }

    #[inline(always)]
    pub const fn backward_max_retries(&self) -> u32 {
        self.backward_max_retries
    }

    #[inline(always)]
    pub const fn metrics_enabled(&self) -> bool {
        self.enable_metrics
    }

    #[inline(always)]
    pub const fn max_batch_size(&self) -> usize {
        self.max_batch_size
    }

    #[inline(always)]
    pub const fn overflow_poll_interval(&self) -> Duration {
        self.overflow_poll_interval
    }

    #[inline(always)]
    pub const fn tick_wait_limit(&self) -> Duration {
        self.tick_wait_limit
    }

    #[inline(always)]
    pub const fn future_tolerance(&self) -> Duration {
        self.future_tolerance
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            epoch: DEFAULT_EPOCH,
            backward_policy: BackwardPolicy::default(),
            backward_tolerance_ms: DEFAULT_BACKWARD_TOLERANCE_MS,
            backward_max_retries: DEFAULT_BACKWARD_MAX_RETRIES,
            enable_metrics: false,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
            overflow_poll_interval: DEFAULT_OVERFLOW_POLL_INTERVAL,
            tick_wait_limit: DEFAULT_TICK_WAIT_LIMIT,
            future_tolerance: DEFAULT_FUTURE_TOLERANCE,
        }
    }
}

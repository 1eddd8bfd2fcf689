//! GeneratorConfig builder for constructing configuration

use std::time::Duration;

use chrono::{DateTime, Utc};

use super::{BackwardPolicy, ConfigError, GeneratorConfig};
use crate::codec::MAX_TIMESTAMP_DELTA;

/// Default configuration values
pub(super) const DEFAULT_EPOCH: i64 = 1672502400000; // 2023-01-01 00:00:00 +08:00
pub(super) const DEFAULT_BACKWARD_TOLERANCE_MS: i64 = 5;
pub(super) const DEFAULT_BACKWARD_MAX_RETRIES: u32 = 10;
pub(super) const DEFAULT_MAX_BATCH_SIZE: usize = 100_000;
pub(super) const DEFAULT_OVERFLOW_POLL_INTERVAL: Duration = Duration::from_micros(100);
pub(super) const DEFAULT_TICK_WAIT_LIMIT: Duration = Duration::from_secs(1);
pub(super) const DEFAULT_FUTURE_TOLERANCE: Duration = Duration::from_secs(5 * 60);

/// Hard ceiling for `max_batch_size`; a full batch is allocated up front
pub const MAX_BATCH_SIZE_LIMIT: usize = 1 << 24;

/// Latest epoch whose 41-bit timestamp range still fits in an `i64`
pub const MAX_EPOCH_MS: i64 = i64::MAX - MAX_TIMESTAMP_DELTA;

/// Builder for GeneratorConfig
#[derive(Debug)]
pub struct GeneratorConfigBuilder {
    pub(super) epoch: i64,
    pub(super) backward_policy: BackwardPolicy,
    pub(super) backward_tolerance_ms: i64,
    pub(super) backward_max_retries: u32,
    pub(super) enable_metrics: bool,
    pub(super) max_batch_size: usize,
    pub(super) overflow_poll_interval: Duration,
    pub(super) tick_wait_limit: Duration,
    pub(super) future_tolerance: Duration,
}

impl GeneratorConfigBuilder {
    /// Create a new GeneratorConfigBuilder with default values
    pub fn new() -> Self {
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

    /// Set the epoch in milliseconds since the Unix epoch
    pub fn epoch(mut self, epoch: i64) -> Result<Self, ConfigError> {
        if !(0..=MAX_EPOCH_MS).contains(&epoch) {
            return Err(ConfigError::InvalidEpoch { epoch });
        }
        self.epoch = epoch;
        Ok(self)
    }

    /// Set the epoch from a UTC datetime
    pub fn epoch_datetime(self, epoch: DateTime<Utc>) -> Result<Self, ConfigError> {
        self.epoch(epoch.timestamp_millis())
    }

    /// Choose how the generator reacts to the clock moving backwards
    pub const fn backward_policy(mut self, policy: BackwardPolicy) -> Self {
        self.backward_policy = policy;
        self
    }

    /// Largest backward offset in milliseconds the `Wait` policy sleeps through
    pub fn backward_tolerance_ms(mut self, tolerance_ms: i64) -> Result<Self, ConfigError> {
        if tolerance_ms < 0 {
            return Err(ConfigError::InvalidTolerance { tolerance_ms });
        }
        self.backward_tolerance_ms = tolerance_ms;
        Ok(self)
    }

    /// Number of re-samples the `Wait` policy attempts before giving up
    pub const fn backward_max_retries(mut self, retries: u32) -> Self {
        self.backward_max_retries = retries;
        self
    }

    /// Enable lock-free generation counters
    pub const fn enable_metrics(mut self, enable: bool) -> Self {
        self.enable_metrics = enable;
        self
    }

    /// Largest batch `next_id_batch` accepts, at most [`MAX_BATCH_SIZE_LIMIT`]
    pub fn max_batch_size(mut self, size: usize) -> Result<Self, ConfigError> {
        if size == 0 || size > MAX_BATCH_SIZE_LIMIT {
            return Err(ConfigError::InvalidMaxBatchSize { size });
        }
        self.max_batch_size = size;
        Ok(self)
    }

    /// Sleep between clock samples while waiting for the next millisecond
    pub const fn overflow_poll_interval(mut self, interval: Duration) -> Self {
        self.overflow_poll_interval = interval;
        self
    }

    /// Give up waiting for the next millisecond after this long
    pub const fn tick_wait_limit(mut self, limit: Duration) -> Self {
        self.tick_wait_limit = limit;
        self
    }

    /// How far ahead of the current time a validated id may be
    pub const fn future_tolerance(mut self, tolerance: Duration) -> Self {
        self.future_tolerance = tolerance;
        self
    }

    /// Build the final GeneratorConfig
    pub fn build(self) -> GeneratorConfig {
        GeneratorConfig::from_builder(self)
    }
}

impl Default for GeneratorConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

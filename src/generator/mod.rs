//! Core snowflake generator implementation
//!
//! Split into modules for testability:
//! - `state` - The (timestamp, sequence) history guarded by the generator lock
//! - `time` - Clock sources
//! - `backward` - Clock-backward recovery policies
//! - `wait` - Bounded waits for the clock
//! - `generate` - Single id generation
//! - `batch` - Batch generation across millisecond boundaries

mod backward;
mod batch;
mod generate;
mod state;
pub(crate) mod time;
mod wait;

use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use crate::codec::{MAX_DATACENTER_ID, MAX_WORKER_ID};
use crate::config::GeneratorConfig;
use crate::error::SnowflakeError;
use crate::metrics::{Metrics, MetricsSnapshot};
use crate::parser::{IdInfo, IdParser};

use state::GeneratorState;
pub use time::{ClockSource, ManualClock, SystemClock};

/// Snowflake id generator for one (datacenter, worker) pair.
///
/// Generation is serialized through an internal mutex; share the generator
/// between threads with an `Arc`.
#[derive(Debug)]
pub struct Generator<C: ClockSource = SystemClock> {
    state: Mutex<GeneratorState>,
    clock: C,
    metrics: Option<Metrics>,

    datacenter_id: u8,
    worker_id: u8,
    config: GeneratorConfig,
    parser: IdParser,
}

impl Generator<SystemClock> {
    /// Create with default configuration
    pub fn new(datacenter_id: u8, worker_id: u8) -> Result<Self, SnowflakeError> {
        Self::with_config(datacenter_id, worker_id, GeneratorConfig::default())
    }

    /// Create with custom configuration
    pub fn with_config(
        datacenter_id: u8,
        worker_id: u8,
        config: GeneratorConfig,
    ) -> Result<Self, SnowflakeError> {
        Self::with_clock(datacenter_id, worker_id, config, SystemClock)
    }
}

impl<C: ClockSource> Generator<C> {
    /// Create with custom configuration and clock
    pub fn with_clock(
        datacenter_id: u8,
        worker_id: u8,
        config: GeneratorConfig,
        clock: C,
    ) -> Result<Self, SnowflakeError> {
        Self::validate_node(datacenter_id, worker_id)?;

        let now = clock.now_millis();
        if config.epoch() > now {
            return Err(SnowflakeError::EpochInFuture {
                epoch: config.epoch(),
                now,
            });
        }

        debug!(
            datacenter_id,
            worker_id,
            epoch = config.epoch(),
            policy = ?config.backward_policy(),
            metrics = config.metrics_enabled(),
            "snowflake generator created"
        );

        Ok(Self {
            state: Mutex::new(GeneratorState::new(datacenter_id, worker_id)),
            clock,
            metrics: config.metrics_enabled().then(Metrics::default),
            datacenter_id,
            worker_id,
            parser: IdParser::new(&config),
            config,
        })
    }

    fn validate_node(datacenter_id: u8, worker_id: u8) -> Result<(), SnowflakeError> {
        if datacenter_id > MAX_DATACENTER_ID {
            return Err(SnowflakeError::InvalidDatacenterId {
                datacenter_id,
                max: MAX_DATACENTER_ID,
            });
        }
        if worker_id > MAX_WORKER_ID {
            return Err(SnowflakeError::InvalidWorkerId {
                worker_id,
                max: MAX_WORKER_ID,
            });
        }
        Ok(())
    }

    #[inline(always)]
    pub const fn datacenter_id(&self) -> u8 {
        self.datacenter_id
    }

    #[inline(always)]
    pub const fn worker_id(&self) -> u8 {
        self.worker_id
    }

    #[inline(always)]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    #[inline(always)]
    pub const fn parser(&self) -> &IdParser {
        &self.parser
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Decode an id minted with this generator's epoch
    pub fn parse(&self, id: i64) -> Result<IdInfo, SnowflakeError> {
        self.parser.parse(id)
    }

    /// Check an id is positive and its timestamp is plausible right now
    pub fn validate(&self, id: i64) -> Result<(), SnowflakeError> {
        self.parser.validate_at(id, self.clock.now_millis())
    }

    /// Snapshot of the counters; all zero with `enabled == false` when metrics are off
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics
            .as_ref()
            .map(Metrics::snapshot)
            .unwrap_or_default()
    }

    /// Zero every counter. Meant for tests.
    pub fn reset_metrics(&self) {
        if let Some(metrics) = &self.metrics {
            metrics.reset();
        }
    }

    #[inline]
    pub(crate) fn lock_state(&self) -> Result<MutexGuard<'_, GeneratorState>, SnowflakeError> {
        self.state.lock().map_err(|_| SnowflakeError::LockPoisoned)
    }
}

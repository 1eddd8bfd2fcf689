//! Clock-backward recovery
//!
//! Every clock sample taken for minting goes through `sample_clock`, which
//! applies the configured [`BackwardPolicy`].

use std::time::Instant;

use tracing::{debug, warn};

use super::time::ClockSource;
use super::wait::sleep_out_offset;
use super::Generator;
use crate::config::BackwardPolicy;
use crate::error::SnowflakeError;

impl<C: ClockSource> Generator<C> {
    /// Sample the clock and reconcile it with `last_timestamp`.
    ///
    /// The returned timestamp is never below `last_timestamp`. `produced` is
    /// the number of ids already minted by the current call and is reported
    /// in the error.
    pub(crate) fn sample_clock(
        &self,
        last_timestamp: i64,
        produced: usize,
    ) -> Result<i64, SnowflakeError> {
        let sampled = self.clock.now_millis();
        if sampled >= last_timestamp {
            return Ok(sampled);
        }
        self.on_clock_backward(last_timestamp, sampled, produced)
    }

    #[cold]
    #[inline(never)]
    fn on_clock_backward(
        &self,
        last_timestamp: i64,
        sampled: i64,
        produced: usize,
    ) -> Result<i64, SnowflakeError> {
        let offset_ms = last_timestamp - sampled;
        let policy = self.config.backward_policy();
        if let Some(metrics) = &self.metrics {
            metrics.record_clock_backward();
        }
        warn!(
            offset_ms,
            last_timestamp,
            ?policy,
            datacenter_id = self.datacenter_id,
            worker_id = self.worker_id,
            "clock moved backwards"
        );

        match policy {
            BackwardPolicy::Error => Err(SnowflakeError::ClockBackward {
                offset_ms,
                produced,
            }),
            BackwardPolicy::UseLastTimestamp => Ok(last_timestamp),
            BackwardPolicy::Wait => self.wait_for_clock(last_timestamp, offset_ms, produced),
        }
    }

    /// Sleep through a small regression, re-sampling up to the retry limit
    fn wait_for_clock(
        &self,
        last_timestamp: i64,
        mut offset_ms: i64,
        produced: usize,
    ) -> Result<i64, SnowflakeError> {
        let tolerance = self.config.backward_tolerance_ms();
        let started = Instant::now();
        let mut attempts = 0;
        let mut caught_up = None;

        while attempts < self.config.backward_max_retries() && offset_ms <= tolerance {
            attempts += 1;
            sleep_out_offset(offset_ms);
            let sampled = self.clock.now_millis();
            if sampled >= last_timestamp {
                caught_up = Some(sampled);
                break;
            }
            offset_ms = last_timestamp - sampled;
        }

        if attempts > 0 {
            if let Some(metrics) = &self.metrics {
                metrics.record_wait(started.elapsed());
            }
        }

        match caught_up {
            Some(sampled) => {
                debug!(attempts, "clock caught up after moving backwards");
                Ok(sampled)
            }
            None => Err(SnowflakeError::ClockBackward {
                offset_ms,
                produced,
            }),
        }
    }
}

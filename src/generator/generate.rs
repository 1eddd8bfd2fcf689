//! ID generation logic
//!
//! Core next_id() implementation and the per-millisecond sequence rules

use std::time::Instant;

use tracing::{trace, warn};

use super::state::GeneratorState;
use super::time::ClockSource;
use super::wait::sleep_until_after;
use super::Generator;
use crate::codec::{self, MAX_TIMESTAMP_DELTA};
use crate::error::SnowflakeError;

impl<C: ClockSource> Generator<C> {
    /// Generate a new snowflake id.
    ///
    /// Ids from one generator are strictly increasing in call order.
    pub fn next_id(&self) -> Result<i64, SnowflakeError> {
        let id = {
            let mut state = self.lock_state()?;
            let now = self.sample_clock(state.last_timestamp, 0)?;
            self.advance(&mut state, now)?;
            self.compose(&state)?
        };

        if let Some(metrics) = &self.metrics {
            metrics.record_issued(1);
        }
        Ok(id)
    }

    /// Move the state to the next free (timestamp, sequence) slot.
    ///
    /// `now` has already been reconciled with the backward policy and is
    /// never below `last_timestamp`.
    #[inline]
    pub(crate) fn advance(
        &self,
        state: &mut GeneratorState,
        now: i64,
    ) -> Result<(), SnowflakeError> {
        if now > state.last_timestamp {
            state.rollover_to(now);
        } else if state.has_sequence_room() {
            state.increment_sequence();
        } else {
            let next = self.wait_next_tick(state.last_timestamp)?;
            state.rollover_to(next);
        }
        Ok(())
    }

    /// Block until the clock reads past the exhausted millisecond
    #[cold]
    #[inline(never)]
    pub(crate) fn wait_next_tick(&self, last_timestamp: i64) -> Result<i64, SnowflakeError> {
        trace!(last_timestamp, "sequence exhausted, waiting for next millisecond");
        if let Some(metrics) = &self.metrics {
            metrics.record_sequence_overflow();
        }

        let started = Instant::now();
        let result = sleep_until_after(
            last_timestamp,
            self.config.overflow_poll_interval(),
            self.config.tick_wait_limit(),
            || self.clock.now_millis(),
        );
        if let Some(metrics) = &self.metrics {
            metrics.record_wait(started.elapsed());
        }

        result.map_err(|waited| {
            warn!(last_timestamp, ?waited, "clock did not advance to the next millisecond");
            SnowflakeError::ClockStalled {
                last_timestamp,
                waited_ms: u64::try_from(waited.as_millis()).unwrap_or(u64::MAX),
            }
        })
    }

    /// Compose the id for the current state
    #[inline(always)]
    pub(crate) fn compose(&self, state: &GeneratorState) -> Result<i64, SnowflakeError> {
        let delta = self.timestamp_delta(state.last_timestamp)?;
        Ok(codec::compose(delta, state.node_bits, state.sequence))
    }

    /// Milliseconds since the epoch, checked against the 41-bit field
    #[inline(always)]
    pub(crate) fn timestamp_delta(&self, timestamp: i64) -> Result<i64, SnowflakeError> {
        let delta = timestamp.saturating_sub(self.config.epoch());
        if !(0..=MAX_TIMESTAMP_DELTA).contains(&delta) {
            return Err(SnowflakeError::TimestampOverflow { delta });
        }
        Ok(delta)
    }
}

//! Batch generation
//!
//! Mints a whole millisecond's worth of sequences per clock sample instead
//! of re-sampling the clock for every id.

use tracing::instrument;

use super::time::ClockSource;
use super::Generator;
use crate::codec::TIMESTAMP_SHIFT;
use crate::error::{BatchError, SnowflakeError};

impl<C: ClockSource> Generator<C> {
    /// Generate `n` strictly increasing ids under a single lock acquisition.
    ///
    /// Batches larger than one millisecond's sequence space wait for the
    /// clock to tick. If the clock fails mid-batch, the ids minted so far
    /// are returned inside the [`BatchError`].
    #[instrument(level = "trace", skip(self))]
    pub fn next_id_batch(&self, n: usize) -> Result<Vec<i64>, BatchError> {
        let max = self.config.max_batch_size();
        if n == 0 || n > max {
            return Err(SnowflakeError::InvalidBatchSize { requested: n, max }.into());
        }

        let mut ids = Vec::with_capacity(n);
        let result = self.fill_batch(&mut ids, n);

        if let Some(metrics) = &self.metrics {
            metrics.record_issued(ids.len() as u64);
        }
        match result {
            Ok(()) => Ok(ids),
            Err(source) => Err(BatchError::new(ids, source)),
        }
    }

    fn fill_batch(&self, ids: &mut Vec<i64>, n: usize) -> Result<(), SnowflakeError> {
        let mut state = self.lock_state()?;

        while ids.len() < n {
            let now = self.sample_clock(state.last_timestamp, ids.len())?;
            self.advance(&mut state, now)?;

            // Everything minted until the next clock sample shares this prefix
            let prefix = (self.timestamp_delta(state.last_timestamp)? << TIMESTAMP_SHIFT)
                | state.node_bits;
            ids.push(prefix | state.sequence as i64);

            let take = (n - ids.len()).min(state.remaining_in_tick());
            for _ in 0..take {
                state.increment_sequence();
                ids.push(prefix | state.sequence as i64);
            }
        }
        Ok(())
    }
}

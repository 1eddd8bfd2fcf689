//! Bounded waits for the clock
//!
//! Both waits block the calling thread; they are expected to last well
//! under a few milliseconds.

use std::thread;
use std::time::{Duration, Instant};

/// Poll the clock until it reads past `from_timestamp`.
///
/// Sleeps `poll_interval` between samples. Returns the new reading, or the
/// time spent waiting once `limit` elapses without progress.
#[inline]
pub(crate) fn sleep_until_after<F>(
    from_timestamp: i64,
    poll_interval: Duration,
    limit: Duration,
    get_time: F,
) -> Result<i64, Duration>
where
    F: Fn() -> i64,
{
    let started = Instant::now();
    loop {
        let now = get_time();
        if now > from_timestamp {
            return Ok(now);
        }
        let waited = started.elapsed();
        if waited >= limit {
            return Err(waited);
        }
        thread::sleep(poll_interval);
    }
}

/// Sleep long enough for a clock `offset_ms` behind to catch up
#[inline]
pub(crate) fn sleep_out_offset(offset_ms: i64) {
    let millis = u64::try_from(offset_ms.saturating_add(1)).unwrap_or(1);
    thread::sleep(Duration::from_millis(millis));
}

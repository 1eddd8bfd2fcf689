//! Clock sources for snowflake generation
//!
//! Provides wall-clock time in milliseconds since the Unix epoch

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the current time in milliseconds since the Unix epoch.
///
/// Any `Fn() -> i64` closure is a clock, which makes scripted clocks in
/// tests a one-liner.
pub trait ClockSource: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// The operating system wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl ClockSource for SystemClock {
    #[inline(always)]
    fn now_millis(&self) -> i64 {
        unix_time_ms()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same reading.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    millis: Arc<AtomicI64>,
}

impl ManualClock {
    pub fn new(millis: i64) -> Self {
        Self {
            millis: Arc::new(AtomicI64::new(millis)),
        }
    }

    pub fn set(&self, millis: i64) {
        self.millis.store(millis, Ordering::SeqCst);
    }

    pub fn advance(&self, millis: i64) {
        self.millis.fetch_add(millis, Ordering::SeqCst);
    }

    pub fn rewind(&self, millis: i64) {
        self.millis.fetch_sub(millis, Ordering::SeqCst);
    }

    pub fn get(&self) -> i64 {
        self.millis.load(Ordering::SeqCst)
    }
}

impl ClockSource for ManualClock {
    #[inline]
    fn now_millis(&self) -> i64 {
        self.get()
    }
}

impl<F> ClockSource for F
where
    F: Fn() -> i64 + Send + Sync,
{
    #[inline]
    fn now_millis(&self) -> i64 {
        self()
    }
}

/// Get current wall-clock time in milliseconds since Unix epoch.
///
/// A system clock set before 1970 reads as a negative value rather than
/// panicking.
#[inline(always)]
pub fn unix_time_ms() -> i64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX),
        Err(before) => -i64::try_from(before.duration().as_millis()).unwrap_or(i64::MAX),
    }
}

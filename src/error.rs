use thiserror::Error;

/// Why an id failed parsing or validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidIdReason {
    /// Zero or negative; generated ids are always positive
    NonPositive,
    /// Decoded timestamp lies before the generator epoch
    BeforeEpoch,
    /// Decoded timestamp is further ahead of the current time than allowed
    TooFarInFuture { ahead_ms: i64 },
}

impl std::fmt::Display for InvalidIdReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidIdReason::NonPositive => write!(f, "id must be positive"),
            InvalidIdReason::BeforeEpoch => write!(f, "timestamp is before the epoch"),
            InvalidIdReason::TooFarInFuture { ahead_ms } => {
                write!(f, "timestamp is {ahead_ms} ms in the future")
            }
        }
    }
}

/// Represents errors that can occur during snowflake operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnowflakeError {
    /// Datacenter id exceeds the 5-bit field
    #[error("Datacenter ID {datacenter_id} is invalid. Maximum allowed value is {max}")]
    InvalidDatacenterId { datacenter_id: u8, max: u8 },
    /// Worker id exceeds the 5-bit field
    #[error("Worker ID {worker_id} is invalid. Maximum allowed value is {max}")]
    InvalidWorkerId { worker_id: u8, max: u8 },
    /// Sequence exceeds the 12-bit field
    #[error("Sequence {sequence} is invalid. Maximum allowed value is {max}")]
    SequenceOutOfRange { sequence: u16, max: u16 },
    /// Batch size outside `[1, max]`
    #[error("Batch size {requested} is invalid. Must be between 1 and {max}")]
    InvalidBatchSize { requested: usize, max: usize },
    /// Configured epoch is later than the clock at construction
    #[error("Epoch {epoch} is ahead of current time {now}")]
    EpochInFuture { epoch: i64, now: i64 },
    /// Clock moved backwards beyond what the configured policy recovers from
    #[error("Clock moved backwards by {offset_ms} ms. Refusing to generate id ({produced} already produced)")]
    ClockBackward { offset_ms: i64, produced: usize },
    /// Clock did not advance past the exhausted millisecond in time
    #[error("Clock did not advance past {last_timestamp} within {waited_ms} ms")]
    ClockStalled { last_timestamp: i64, waited_ms: u64 },
    /// Timestamp delta does not fit the 41-bit field
    #[error("Timestamp delta {delta} does not fit in 41 bits")]
    TimestampOverflow { delta: i64 },
    /// Id is malformed or out of the plausible time range
    #[error("Invalid id {id}: {reason}")]
    InvalidId { id: i64, reason: InvalidIdReason },
    /// Generator lock poisoned by a panicking thread
    #[error("Generator lock is poisoned (a thread panicked while holding it)")]
    LockPoisoned,
}

impl SnowflakeError {
    /// True for the clock anomaly errors a caller may retry later
    pub fn is_clock_error(&self) -> bool {
        matches!(
            self,
            SnowflakeError::ClockBackward { .. } | SnowflakeError::ClockStalled { .. }
        )
    }
}

/// A batch interrupted after some ids were already minted.
///
/// The minted ids are valid, unique and ordered; they are handed back
/// together with the error that stopped the batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Batch interrupted after {} ids: {source}", .ids.len())]
pub struct BatchError {
    pub ids: Vec<i64>,
    #[source]
    pub source: SnowflakeError,
}

impl BatchError {
    pub(crate) fn new(ids: Vec<i64>, source: SnowflakeError) -> Self {
        Self { ids, source }
    }

    /// Ids minted before the failure
    pub fn produced(&self) -> &[i64] {
        &self.ids
    }

    pub fn into_parts(self) -> (Vec<i64>, SnowflakeError) {
        (self.ids, self.source)
    }
}

impl From<SnowflakeError> for BatchError {
    fn from(source: SnowflakeError) -> Self {
        Self::new(Vec::new(), source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display() {
        let invalid_worker = SnowflakeError::InvalidWorkerId {
            worker_id: 32,
            max: 31,
        };
        assert_eq!(
            invalid_worker.to_string(),
            "Worker ID 32 is invalid. Maximum allowed value is 31"
        );

        let backward = SnowflakeError::ClockBackward {
            offset_ms: 3,
            produced: 0,
        };
        assert_eq!(
            backward.to_string(),
            "Clock moved backwards by 3 ms. Refusing to generate id (0 already produced)"
        );

        let invalid = SnowflakeError::InvalidId {
            id: 0,
            reason: InvalidIdReason::NonPositive,
        };
        assert_eq!(invalid.to_string(), "Invalid id 0: id must be positive");
    }

    #[test]
    fn test_batch_error_source() {
        let err = BatchError::new(
            vec![1, 2, 3],
            SnowflakeError::ClockBackward {
                offset_ms: 10,
                produced: 3,
            },
        );
        assert_eq!(err.produced(), &[1, 2, 3]);
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("Batch interrupted after 3 ids"));

        let (ids, source) = err.into_parts();
        assert_eq!(ids.len(), 3);
        assert!(source.is_clock_error());
    }

    #[test]
    fn test_error_clone() {
        let original = SnowflakeError::InvalidDatacenterId {
            datacenter_id: 40,
            max: 31,
        };
        assert_eq!(original.clone(), original);
        assert!(!original.is_clock_error());
    }
}

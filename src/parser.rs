use chrono::{DateTime, Utc};

use crate::codec::{self, IdParts};
use crate::config::{ConfigError, GeneratorConfig};
use crate::error::{InvalidIdReason, SnowflakeError};

/// Fields of a parsed id, with the timestamp resolved against the epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IdInfo {
    pub id: i64,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    pub datacenter_id: u8,
    pub worker_id: u8,
    pub sequence: u16,
}

impl IdInfo {
    /// Mint time as a UTC datetime
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.timestamp)
    }
}

/// Snowflake id decoder and sanity checker
#[derive(Debug, Copy, Clone)]
pub struct IdParser {
    epoch: i64,
    future_tolerance_ms: i64,
}

impl IdParser {
    pub(crate) fn new(config: &GeneratorConfig) -> Self {
        Self {
            epoch: config.epoch(),
            future_tolerance_ms: i64::try_from(config.future_tolerance().as_millis())
                .unwrap_or(i64::MAX),
        }
    }

    /// Parser for ids minted against `epoch`, with default validation tolerance.
    ///
    /// The epoch is checked the same way [`GeneratorConfigBuilder::epoch`]
    /// checks it.
    ///
    /// [`GeneratorConfigBuilder::epoch`]: crate::GeneratorConfigBuilder::epoch
    pub fn with_epoch(epoch: i64) -> Result<Self, ConfigError> {
        let config = GeneratorConfig::builder().epoch(epoch)?.build();
        Ok(Self::new(&config))
    }

    #[inline(always)]
    pub const fn epoch(&self) -> i64 {
        self.epoch
    }

    /// Absolute mint time in milliseconds since the Unix epoch
    #[inline(always)]
    pub const fn timestamp(&self, id: i64) -> i64 {
        self.epoch + codec::decode(id).timestamp_delta
    }

    #[inline(always)]
    pub const fn datacenter_id(&self, id: i64) -> u8 {
        codec::decode(id).datacenter_id
    }

    #[inline(always)]
    pub const fn worker_id(&self, id: i64) -> u8 {
        codec::decode(id).worker_id
    }

    #[inline(always)]
    pub const fn sequence(&self, id: i64) -> u16 {
        codec::decode(id).sequence
    }

    /// Raw fields, timestamp still relative to the epoch
    #[inline]
    pub const fn decompose(&self, id: i64) -> IdParts {
        codec::decode(id)
    }

    /// Decode a positive id into its fields
    pub fn parse(&self, id: i64) -> Result<IdInfo, SnowflakeError> {
        if id <= 0 {
            return Err(SnowflakeError::InvalidId {
                id,
                reason: InvalidIdReason::NonPositive,
            });
        }
        let parts = codec::decode(id);
        Ok(IdInfo {
            id,
            timestamp: self.epoch + parts.timestamp_delta,
            datacenter_id: parts.datacenter_id,
            worker_id: parts.worker_id,
            sequence: parts.sequence,
        })
    }

    /// Check `id` could have been minted by now (`now_ms`, Unix milliseconds)
    pub fn validate_at(&self, id: i64, now_ms: i64) -> Result<(), SnowflakeError> {
        let info = self.parse(id)?;
        // Guard only: a positive id has a non-negative delta
        if info.timestamp < self.epoch {
            return Err(SnowflakeError::InvalidId {
                id,
                reason: InvalidIdReason::BeforeEpoch,
            });
        }
        let ahead_ms = info.timestamp.saturating_sub(now_ms);
        if ahead_ms > self.future_tolerance_ms {
            return Err(SnowflakeError::InvalidId {
                id,
                reason: InvalidIdReason::TooFarInFuture { ahead_ms },
            });
        }
        Ok(())
    }
}

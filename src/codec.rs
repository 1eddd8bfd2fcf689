//! Bit layout of a snowflake id
//!
//! ```text
//! | 0 | 41 bits timestamp delta | 5 bits datacenter | 5 bits worker | 12 bits sequence |
//! ```

use crate::error::SnowflakeError;

pub const TIMESTAMP_BITS: u32 = 41;
pub const DATACENTER_ID_BITS: u32 = 5;
pub const WORKER_ID_BITS: u32 = 5;
pub const SEQUENCE_BITS: u32 = 12;

pub const WORKER_ID_SHIFT: u32 = SEQUENCE_BITS;
pub const DATACENTER_ID_SHIFT: u32 = SEQUENCE_BITS + WORKER_ID_BITS;
pub const TIMESTAMP_SHIFT: u32 = SEQUENCE_BITS + WORKER_ID_BITS + DATACENTER_ID_BITS;

pub const MAX_TIMESTAMP_DELTA: i64 = (1 << TIMESTAMP_BITS) - 1;
pub const MAX_DATACENTER_ID: u8 = (1 << DATACENTER_ID_BITS) - 1;
pub const MAX_WORKER_ID: u8 = (1 << WORKER_ID_BITS) - 1;
pub const MAX_SEQUENCE: u16 = (1 << SEQUENCE_BITS) - 1;

/// Number of ids one instance can mint inside a single millisecond
pub const IDS_PER_MILLISECOND: usize = MAX_SEQUENCE as usize + 1;

/// The four fields packed into an id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdParts {
    pub timestamp_delta: i64,
    pub datacenter_id: u8,
    pub worker_id: u8,
    pub sequence: u16,
}

/// Precompute the static datacenter/worker bits shared by every id of one instance
#[inline(always)]
pub const fn node_bits(datacenter_id: u8, worker_id: u8) -> i64 {
    ((datacenter_id as i64) << DATACENTER_ID_SHIFT) | ((worker_id as i64) << WORKER_ID_SHIFT)
}

/// Compose an id from a timestamp delta, precomputed node bits and a sequence.
///
/// Callers on the hot path have already range checked their inputs.
#[inline(always)]
pub(crate) const fn compose(timestamp_delta: i64, node_bits: i64, sequence: u16) -> i64 {
    (timestamp_delta << TIMESTAMP_SHIFT) | node_bits | sequence as i64
}

/// Encode the given fields into an id.
///
/// Every field is range checked; nothing is silently masked away.
pub fn encode(parts: IdParts) -> Result<i64, SnowflakeError> {
    if !(0..=MAX_TIMESTAMP_DELTA).contains(&parts.timestamp_delta) {
        return Err(SnowflakeError::TimestampOverflow {
            delta: parts.timestamp_delta,
        });
    }
    if parts.datacenter_id > MAX_DATACENTER_ID {
        return Err(SnowflakeError::InvalidDatacenterId {
            datacenter_id: parts.datacenter_id,
            max: MAX_DATACENTER_ID,
        });
    }
    if parts.worker_id > MAX_WORKER_ID {
        return Err(SnowflakeError::InvalidWorkerId {
            worker_id: parts.worker_id,
            max: MAX_WORKER_ID,
        });
    }
    if parts.sequence > MAX_SEQUENCE {
        return Err(SnowflakeError::SequenceOutOfRange {
            sequence: parts.sequence,
            max: MAX_SEQUENCE,
        });
    }
    Ok(compose(
        parts.timestamp_delta,
        node_bits(parts.datacenter_id, parts.worker_id),
        parts.sequence,
    ))
}

/// Split an id into its four fields
#[inline]
pub const fn decode(id: i64) -> IdParts {
    let raw = id as u64;
    IdParts {
        timestamp_delta: ((raw >> TIMESTAMP_SHIFT) & MAX_TIMESTAMP_DELTA as u64) as i64,
        datacenter_id: ((raw >> DATACENTER_ID_SHIFT) & MAX_DATACENTER_ID as u64) as u8,
        worker_id: ((raw >> WORKER_ID_SHIFT) & MAX_WORKER_ID as u64) as u8,
        sequence: (raw & MAX_SEQUENCE as u64) as u16,
    }
}

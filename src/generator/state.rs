//! Mutable (timestamp, sequence) history of one generator
//!
//! Only ever touched through the generator mutex.

use crate::codec::{self, MAX_SEQUENCE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct GeneratorState {
    /// Last millisecond (Unix time) an id was minted for; `-1` before the first id
    pub(crate) last_timestamp: i64,
    /// Sequence of the last minted id within `last_timestamp`
    pub(crate) sequence: u16,
    /// `(datacenter_id << 17) | (worker_id << 12)`
    pub(crate) node_bits: i64,
}

impl GeneratorState {
    pub(crate) const fn new(datacenter_id: u8, worker_id: u8) -> Self {
        Self {
            last_timestamp: -1,
            sequence: 0,
            node_bits: codec::node_bits(datacenter_id, worker_id),
        }
    }

    /// Ids still available in `last_timestamp` after the last minted one
    #[inline(always)]
    pub(crate) const fn remaining_in_tick(&self) -> usize {
        MAX_SEQUENCE as usize - self.sequence as usize
    }

    #[inline(always)]
    pub(crate) const fn has_sequence_room(&self) -> bool {
        self.sequence < MAX_SEQUENCE
    }

    /// Move to a later millisecond, minting sequence 0 there
    #[inline(always)]
    pub(crate) fn rollover_to(&mut self, timestamp: i64) {
        debug_assert!(timestamp > self.last_timestamp);
        self.last_timestamp = timestamp;
        self.sequence = 0;
    }

    /// Mint the next sequence within the current millisecond
    #[inline(always)]
    pub(crate) fn increment_sequence(&mut self) {
        debug_assert!(self.has_sequence_room());
        self.sequence += 1;
    }
}

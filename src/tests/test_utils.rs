//! Shared test utilities for generator tests

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::codec;

/// Epoch used by the deterministic scenarios
pub const TEST_EPOCH: i64 = 1672502400000;

/// Assert that all IDs in the collection are unique
pub fn assert_unique_ids(ids: &[i64], expected_count: usize) {
    let set: HashSet<_> = ids.iter().copied().collect();
    assert_eq!(
        set.len(),
        expected_count,
        "Expected {} unique IDs, but got {} (duplicates detected)",
        expected_count,
        set.len()
    );
}

/// Assert that IDs are strictly increasing in the order given
pub fn assert_strictly_increasing(ids: &[i64]) {
    for i in 1..ids.len() {
        assert!(
            ids[i] > ids[i - 1],
            "ID at position {} ({}) is not greater than previous ID ({})",
            i,
            ids[i],
            ids[i - 1]
        );
    }
}

/// Assert no timestamp delta carries more ids than one millisecond allows
pub fn assert_per_tick_bound(ids: &[i64]) {
    let mut per_tick = std::collections::HashMap::new();
    for &id in ids {
        *per_tick
            .entry(codec::decode(id).timestamp_delta)
            .or_insert(0usize) += 1;
    }
    for (delta, count) in per_tick {
        assert!(
            count <= codec::IDS_PER_MILLISECOND,
            "{count} ids minted in millisecond {delta}"
        );
    }
}

/// A clock replaying `readings` in order, then repeating the last one.
///
/// Remember that the generator constructor consumes the first reading.
pub fn scripted_clock(readings: Vec<i64>) -> impl Fn() -> i64 + Send + Sync {
    assert!(!readings.is_empty());
    let next = AtomicUsize::new(0);
    move || {
        let i = next.fetch_add(1, Ordering::SeqCst);
        readings[i.min(readings.len() - 1)]
    }
}

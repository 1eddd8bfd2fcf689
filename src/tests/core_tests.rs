use crate::codec;
use crate::tests::test_utils::{assert_strictly_increasing, assert_unique_ids, TEST_EPOCH};
use crate::*;

fn manual_generator(datacenter_id: u8, worker_id: u8) -> (Generator<ManualClock>, ManualClock) {
    let clock = ManualClock::new(TEST_EPOCH);
    let config = GeneratorConfig::builder().epoch(TEST_EPOCH).unwrap().build();
    let generator = Generator::with_clock(datacenter_id, worker_id, config, clock.clone()).unwrap();
    (generator, clock)
}

#[test]
fn test_first_ids_at_epoch() {
    let (generator, _clock) = manual_generator(1, 1);

    let first = generator.next_id().unwrap();
    assert_eq!(first, (1 << 17) | (1 << 12));
    assert_eq!(first, 135168);

    let second = generator.next_id().unwrap();
    assert_eq!(second, 135169);
}

#[test]
fn test_sequence_resets_on_new_millisecond() {
    let (generator, clock) = manual_generator(2, 3);

    let a = generator.next_id().unwrap();
    let b = generator.next_id().unwrap();
    clock.advance(1);
    let c = generator.next_id().unwrap();

    assert_eq!(codec::decode(a).sequence, 0);
    assert_eq!(codec::decode(b).sequence, 1);

    let parts = codec::decode(c);
    assert_eq!(parts.timestamp_delta, 1);
    assert_eq!(parts.sequence, 0);
    assert_eq!(parts.datacenter_id, 2);
    assert_eq!(parts.worker_id, 3);
    assert!(c > b);
}

#[test]
fn test_monotonic_with_system_clock() {
    let generator = Generator::new(0, 1).unwrap();
    let ids: Vec<i64> = (0..10_000).map(|_| generator.next_id().unwrap()).collect();

    assert!(ids.iter().all(|&id| id > 0));
    assert_strictly_increasing(&ids);
}

#[test]
fn test_monotonic_with_advancing_manual_clock() {
    let (generator, clock) = manual_generator(5, 5);
    let mut ids = Vec::new();
    for step in 0..2_000 {
        if step % 7 == 0 {
            clock.advance(1);
        }
        ids.push(generator.next_id().unwrap());
    }
    assert_strictly_increasing(&ids);
}

#[test]
fn test_cross_instance_uniqueness() {
    let clock = ManualClock::new(TEST_EPOCH);
    let config = GeneratorConfig::builder().epoch(TEST_EPOCH).unwrap().build();
    let generators: Vec<_> = [(0, 0), (0, 1), (1, 0), (31, 31)]
        .into_iter()
        .map(|(dc, worker)| Generator::with_clock(dc, worker, config, clock.clone()).unwrap())
        .collect();

    let mut all = Vec::new();
    for round in 0..500 {
        if round % 100 == 0 {
            clock.advance(1);
        }
        for generator in &generators {
            all.push(generator.next_id().unwrap());
        }
    }

    assert_unique_ids(&all, 500 * generators.len());
}

#[test]
fn test_random_node_ids_round_trip_through_generator() {
    use rand::Rng;

    let mut rng = rand::rng();
    for _ in 0..32 {
        let dc = rng.random_range(0..=codec::MAX_DATACENTER_ID);
        let worker = rng.random_range(0..=codec::MAX_WORKER_ID);
        let generator = Generator::new(dc, worker).unwrap();
        let info = generator.parse(generator.next_id().unwrap()).unwrap();
        assert_eq!(info.datacenter_id, dc);
        assert_eq!(info.worker_id, worker);
    }
}

#[test]
fn test_invalid_node_ids() {
    assert_eq!(
        Generator::new(32, 0).unwrap_err(),
        SnowflakeError::InvalidDatacenterId {
            datacenter_id: 32,
            max: 31
        }
    );
    assert_eq!(
        Generator::new(0, 32).unwrap_err(),
        SnowflakeError::InvalidWorkerId {
            worker_id: 32,
            max: 31
        }
    );
    assert!(Generator::new(31, 31).is_ok());
}

#[test]
fn test_epoch_in_future_rejected() {
    let clock = ManualClock::new(TEST_EPOCH - 1);
    let config = GeneratorConfig::builder().epoch(TEST_EPOCH).unwrap().build();
    let err = Generator::with_clock(1, 1, config, clock).unwrap_err();
    assert_eq!(
        err,
        SnowflakeError::EpochInFuture {
            epoch: TEST_EPOCH,
            now: TEST_EPOCH - 1
        }
    );
}

#[test]
fn test_timestamp_overflow_is_reported() {
    let (generator, clock) = manual_generator(1, 1);
    clock.set(TEST_EPOCH + codec::MAX_TIMESTAMP_DELTA);
    let last = generator.next_id().unwrap();
    assert_eq!(codec::decode(last).timestamp_delta, codec::MAX_TIMESTAMP_DELTA);

    clock.advance(1);
    assert_eq!(
        generator.next_id().unwrap_err(),
        SnowflakeError::TimestampOverflow {
            delta: codec::MAX_TIMESTAMP_DELTA + 1
        }
    );
}

#[test]
fn test_accessors() {
    let (generator, clock) = manual_generator(4, 9);
    assert_eq!(generator.datacenter_id(), 4);
    assert_eq!(generator.worker_id(), 9);
    assert_eq!(generator.config().epoch(), TEST_EPOCH);
    assert_eq!(generator.parser().epoch(), TEST_EPOCH);
    assert_eq!(generator.clock().get(), clock.get());
}

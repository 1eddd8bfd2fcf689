use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use snowgen::{BackwardPolicy, Generator, GeneratorConfig};
use std::hint::black_box;
use std::sync::Arc;

pub fn single_id_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("Single ID");

    for (name, metrics) in [("metrics_off", false), ("metrics_on", true)] {
        let config = GeneratorConfig::builder().enable_metrics(metrics).build();
        let generator = Generator::with_config(1, 1, config).unwrap();
        group.bench_function(name, |b| {
            b.iter(|| black_box(generator.next_id().unwrap()));
        });
    }

    let config = GeneratorConfig::builder()
        .backward_policy(BackwardPolicy::UseLastTimestamp)
        .build();
    let generator = Generator::with_config(1, 1, config).unwrap();
    group.bench_function("use_last_timestamp", |b| {
        b.iter(|| black_box(generator.next_id().unwrap()));
    });

    group.finish();
}

pub fn batch_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("Batch");
    let generator = Generator::new(1, 1).unwrap();

    for &size in &[16usize, 256, 4096, 10_000] {
        group.bench_function(format!("size/{size}"), |b| {
            b.iter(|| black_box(generator.next_id_batch(black_box(size)).unwrap()));
        });
    }

    group.finish();
}

pub fn parse_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("Parse");
    let generator = Generator::new(1, 1).unwrap();
    let id = generator.next_id().unwrap();

    group.bench_function("parse", |b| {
        b.iter(|| black_box(generator.parse(black_box(id)).unwrap()));
    });
    group.bench_function("validate", |b| {
        b.iter(|| black_box(generator.validate(black_box(id)).unwrap()));
    });

    group.finish();
}

pub fn concurrent_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("Concurrent");

    for &thread_count in &[2, 4, 8] {
        group.bench_function(format!("threads/{}", thread_count), |b| {
            b.iter_batched(
                || Arc::new(Generator::new(1, 1).unwrap()),
                |generator| {
                    let handles: Vec<_> = (0..thread_count)
                        .map(|_| {
                            let generator = Arc::clone(&generator);
                            std::thread::spawn(move || {
                                for _ in 0..100 {
                                    black_box(generator.next_id().unwrap());
                                }
                            })
                        })
                        .collect();
                    for handle in handles {
                        handle.join().unwrap();
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    single_id_benchmarks,
    batch_benchmarks,
    parse_benchmarks,
    concurrent_benchmarks
);
criterion_main!(benches);

use chrono::{TimeZone, Utc};
use snowgen::{BackwardPolicy, Generator, GeneratorConfig};

fn main() {
    // Epoch at 2024-01-01, fail fast on clock regressions, collect metrics
    let config = GeneratorConfig::builder()
        .epoch_datetime(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        .unwrap()
        .backward_policy(BackwardPolicy::Error)
        .enable_metrics(true)
        .max_batch_size(10_000)
        .unwrap()
        .build();

    let generator = Generator::with_config(3, 17, config).unwrap();

    println!("Generator configuration:");
    println!("  Epoch: {:?}", generator.config().epoch_datetime());
    println!("  Backward policy: {:?}", generator.config().backward_policy());
    println!("  Max batch size: {}", generator.config().max_batch_size());

    let id = generator.next_id().unwrap();
    let info = generator.parse(id).unwrap();

    println!("\nGenerated ID: {}", id);
    println!("Components:");
    println!("  Timestamp: {}", info.timestamp);
    println!("  Datacenter ID: {}", info.datacenter_id);
    println!("  Worker ID: {}", info.worker_id);
    println!("  Sequence: {}", info.sequence);

    generator.next_id_batch(10_000).unwrap();
    println!("\nMetrics: {:?}", generator.metrics());
}

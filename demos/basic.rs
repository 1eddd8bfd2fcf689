use snowgen::{Generator, IdInfo};

fn main() {
    // Create a generator for datacenter 1, worker 1
    let generator = Generator::new(1, 1).unwrap();

    // Generate some IDs
    let id1 = generator.next_id().unwrap();
    let id2 = generator.next_id().unwrap();
    let id3 = generator.next_id().unwrap();

    println!("Generated IDs (guaranteed to be monotonic):");
    for id in [id1, id2, id3] {
        print_id(&generator.parse(id).unwrap());
    }

    // A batch spanning more than one millisecond
    let batch = generator.next_id_batch(5_000).unwrap();
    let first = generator.parse(batch[0]).unwrap();
    let last = generator.parse(batch[batch.len() - 1]).unwrap();
    println!("\nBatch of {} IDs:", batch.len());
    print_id(&first);
    print_id(&last);

    // Or extract components individually
    let parser = generator.parser();
    println!("\nComponents of ID2 (extracted individually):");
    println!("  Timestamp: {} ms since Unix epoch", parser.timestamp(id2));
    println!("  Datacenter ID: {}", parser.datacenter_id(id2));
    println!("  Worker ID: {}", parser.worker_id(id2));
    println!("  Sequence: {}", parser.sequence(id2));
}

fn print_id(info: &IdInfo) {
    let datetime = info
        .datetime()
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_default();
    println!(
        "  ID: {}, Timestamp: {}, Human date: {datetime}, Datacenter: {}, Worker: {}, Sequence: {}",
        info.id, info.timestamp, info.datacenter_id, info.worker_id, info.sequence
    );
}

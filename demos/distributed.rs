use rand::{rng, Rng};
use snowgen::Generator;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn main() {
    // One generator per (datacenter, worker) pair, each shared by several threads
    let generators: Vec<_> = [(0, 0), (0, 1), (1, 0)]
        .into_iter()
        .map(|(dc, worker)| Arc::new(Generator::new(dc, worker).unwrap()))
        .collect();

    let mut handles = vec![];
    for (node, generator) in generators.iter().enumerate() {
        for thread_id in 0..2 {
            let generator = Arc::clone(generator);
            handles.push(thread::spawn(move || {
                let mut ids = Vec::new();
                let mut rng = rng();

                for i in 0..5 {
                    let id = generator.next_id().unwrap();
                    let info = generator.parse(id).unwrap();
                    println!(
                        "Node {} thread {} generated ID {} (ts={}, dc={}, worker={}, seq={})",
                        node, thread_id, i, info.timestamp, info.datacenter_id, info.worker_id,
                        info.sequence
                    );
                    ids.push(id);

                    // Random delay to simulate work
                    let delay = rng.random_range(0..=9);
                    thread::sleep(Duration::from_millis(delay));
                }
                ids
            }));
        }
    }

    let mut all_ids = HashSet::new();
    let mut total = 0;
    for handle in handles {
        let ids = handle.join().unwrap();
        total += ids.len();
        all_ids.extend(ids);
    }

    println!("\nTotal IDs generated: {}", total);
    assert_eq!(all_ids.len(), total, "Duplicate ID generated!");
    println!("All IDs are unique across nodes!");
}

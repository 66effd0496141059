/// Architecture search demo: starts XOR from a network with no hidden layer
/// and prints one line per macro-epoch pair while the search grows it.
///
/// Run with:
///   cargo run --example optimize --release
use std::sync::mpsc;
use std::thread;

use ferrite_grow::{optimize, MemoryStore, NetworkStore, SearchConfig, Topology};

fn main() -> ferrite_grow::Result<()> {
    env_logger::init();

    let inputs = vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![1.0, 1.0],
    ];
    let targets = vec![vec![-1.0], vec![1.0], vec![1.0], vec![-1.0]];

    let (tx, rx) = mpsc::channel();
    let config = SearchConfig {
        sweeps_per_block: 200,
        progress_tx: Some(tx),
        ..SearchConfig::seeded(7)
    };

    let printer = thread::spawn(move || {
        for s in rx {
            println!(
                "[{:>9}] block {:>3}  err {:.4} -> {:.4}  stalls {:>2}  lr {:<6}  {:?}",
                s.topology, s.block, s.error_before, s.error_after, s.stall_count, s.learning_rate, s.phase
            );
        }
    });

    let mut store = MemoryStore::new();
    let outcome = optimize(Topology::new(vec![2, 1])?, &inputs, &targets, &inputs, &targets, &config, &mut store);
    // Dropping the config closes the channel so the printer thread finishes.
    drop(config);
    let _ = printer.join();
    let outcome = outcome?;

    println!("\nAccepted {} via {:?}", outcome.name, outcome.acceptance);
    let mut network = store.load(&outcome.name)?;
    for input in &inputs {
        println!("Input: {:?} -> Output: {:.4}", input, network.predict(input)?[0]);
    }
    Ok(())
}

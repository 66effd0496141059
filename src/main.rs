// Runs the architecture search on XOR and writes the accepted network to
// trained_models/<topology>.json.
//
//   RUST_LOG=info cargo run --release [-- path/to/search.json]
//
// Dataset loading and argument parsing belong to the embedding program; this
// binary only demonstrates the library.
use log::{error, info};

use ferrite_grow::{optimize, JsonFileStore, Result, SearchConfig, Topology};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("loading search config from {path}");
            SearchConfig::load_json(path)?
        }
        None => SearchConfig::default(),
    };

    let inputs = vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![1.0, 1.0],
    ];
    let targets = vec![vec![-1.0], vec![1.0], vec![1.0], vec![-1.0]];

    let mut store = JsonFileStore::default();
    let outcome = optimize(
        Topology::new(vec![2, 2, 1])?,
        &inputs,
        &targets,
        &inputs,
        &targets,
        &config,
        &mut store,
    )?;

    info!(
        "accepted {} ({:?}) after {} topologies; saved to {}",
        outcome.name,
        outcome.acceptance,
        outcome.topologies_tried,
        store.path_for(&outcome.name).display()
    );
    Ok(())
}

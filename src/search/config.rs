use std::path::Path;
use std::sync::mpsc;
use std::sync::{Arc, atomic::AtomicBool};

use serde::{Serialize, Deserialize};

use crate::error::Result;
use crate::search::stats::BlockStats;

/// Configuration for an `optimize` run.
///
/// # Fields
/// - `sweeps_per_block`:        full passes over the training set per macro-epoch
/// - `initial_learning_rate`:   learning rate every topology starts with
/// - `decay_after_stalls`:      decay once the stall counter exceeds this
/// - `decay_factor`:            multiplier applied to the learning rate on decay
/// - `abandon_after_stalls`:    give up on a topology once the counter exceeds this
/// - `max_blocks_per_topology`: macro-epoch pairs before a topology is abandoned
///                               even if its error is still creeping down
/// - `max_topologies`:          topologies tried before the search is exhausted
/// - `max_layers`:              growing past this depth exhausts the search
/// - `time_budget_secs`:        optional wall-clock budget
/// - `seed`:                    weight-initialisation seed; `None` uses entropy
/// - `progress_tx`:             optional channel; one `BlockStats` per
///                               macro-epoch pair. A dropped receiver is ignored.
/// - `stop_flag`:               optional atomic flag; when set the search
///                               stops at the next macro-epoch boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub sweeps_per_block: usize,
    pub initial_learning_rate: f64,
    pub decay_after_stalls: usize,
    pub decay_factor: f64,
    pub abandon_after_stalls: usize,
    pub max_blocks_per_topology: usize,
    pub max_topologies: usize,
    pub max_layers: usize,
    pub time_budget_secs: Option<u64>,
    pub seed: Option<u64>,
    #[serde(skip)]
    pub progress_tx: Option<mpsc::Sender<BlockStats>>,
    #[serde(skip)]
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            sweeps_per_block: 1000,
            initial_learning_rate: 1.0,
            decay_after_stalls: 5,
            decay_factor: 0.1,
            abandon_after_stalls: 10,
            max_blocks_per_topology: 500,
            max_topologies: 32,
            max_layers: 16,
            time_budget_secs: None,
            seed: None,
            progress_tx: None,
            stop_flag: None,
        }
    }
}

impl SearchConfig {
    /// Default configuration with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        SearchConfig { seed: Some(seed), ..SearchConfig::default() }
    }

    /// Serializes the numeric settings to a pretty-printed JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Reads settings from JSON; missing fields take their defaults.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<SearchConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Serialize, Deserialize};

use crate::error::{GrowError, Result};
use crate::network::network::Network;
use crate::network::topology::Topology;
use crate::optim::sgd::Sgd;
use crate::search::config::SearchConfig;
use crate::search::growth::grow;
use crate::search::stats::{BlockStats, SearchPhase};
use crate::store::NetworkStore;
use crate::train::evaluate::{is_accurate, total_absolute_error};
use crate::train::trainer::{check_dataset, train_sweep};

/// Which accuracy check let the search stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Acceptance {
    /// The held-out test set passed while training was still in progress.
    TestSet,
    /// Training on the topology stalled, but the training set itself passes.
    TrainingSet,
}

/// Result of a successful search. The network has already been saved
/// under `name`.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub network: Network,
    pub topology: Topology,
    pub name: String,
    pub acceptance: Acceptance,
    pub topologies_tried: usize,
    /// Macro-epoch pairs run across every topology tried.
    pub blocks_trained: usize,
    pub final_learning_rate: f64,
    /// Total absolute training error at acceptance.
    pub training_error: f64,
}

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Greedy architecture search.
///
/// Starting from `initial`, trains each candidate topology in macro-epoch
/// pairs until it either passes the test set, or stalls and is judged on
/// the training set. A rejected topology is grown by one mutation and the
/// next candidate starts from freshly initialised weights. The accepted
/// network is saved to `store` under its topology name (e.g. `"2,3,1"`).
///
/// # Errors
/// - `EmptyDataset` if there are no training examples
/// - `DatasetMismatch` / `InvalidInputShape` for inconsistent data
/// - `SearchExhausted` when `max_topologies`, `max_layers` or the time
///   budget runs out
/// - `Cancelled` when `config.stop_flag` is raised
pub fn optimize<S: NetworkStore + ?Sized>(
    initial: Topology,
    train_inputs: &[Vec<f64>],
    train_targets: &[Vec<f64>],
    test_inputs: &[Vec<f64>],
    test_targets: &[Vec<f64>],
    config: &SearchConfig,
    store: &mut S,
) -> Result<SearchOutcome> {
    // Growth never changes the input or output width, so every candidate
    // accepts exactly the shapes `initial` does.
    check_dataset(&initial, train_inputs, train_targets)?;
    check_dataset(&initial, test_inputs, test_targets)?;
    if train_inputs.is_empty() {
        return Err(GrowError::EmptyDataset);
    }

    let data = Split {
        train_inputs,
        train_targets,
        test_inputs,
        test_targets,
    };
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut clock = Clock {
        started: Instant::now(),
        budget: config.time_budget_secs.map(Duration::from_secs),
        topologies_tried: 0,
    };
    let mut blocks_trained = 0;
    let mut topology = initial;

    loop {
        if clock.topologies_tried >= config.max_topologies {
            return Err(exhausted(&clock, &topology, format!(
                "limit of {} topologies reached", config.max_topologies
            )));
        }
        if topology.depth() > config.max_layers {
            return Err(exhausted(&clock, &topology, format!(
                "depth {} exceeds limit of {} layers", topology.depth(), config.max_layers
            )));
        }
        clock.topologies_tried += 1;
        info!("training topology {} (candidate {})", topology, clock.topologies_tried);

        let mut network = Network::new(&topology, &mut rng);
        let report = train_topology(&mut network, &topology, &data, config, &clock)?;
        blocks_trained += report.blocks;

        match report.acceptance {
            Some(acceptance) => {
                let name = topology.name();
                store.save(&name, &network)?;
                info!(
                    "accepted {} via {:?} after {} blocks (training error {:.6})",
                    name, acceptance, report.blocks, report.training_error
                );
                return Ok(SearchOutcome {
                    network,
                    topology,
                    name,
                    acceptance,
                    topologies_tried: clock.topologies_tried,
                    blocks_trained,
                    final_learning_rate: report.learning_rate,
                    training_error: report.training_error,
                });
            }
            None => {
                let (next, mutation) = grow(&topology);
                info!("rejected {}; {:?} -> {}", topology, mutation, next);
                topology = next;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

struct Split<'a> {
    train_inputs: &'a [Vec<f64>],
    train_targets: &'a [Vec<f64>],
    test_inputs: &'a [Vec<f64>],
    test_targets: &'a [Vec<f64>],
}

struct Clock {
    started: Instant,
    budget: Option<Duration>,
    topologies_tried: usize,
}

struct TopologyReport {
    acceptance: Option<Acceptance>,
    blocks: usize,
    learning_rate: f64,
    training_error: f64,
}

enum BlockOutcome {
    Continue,
    Accept(Acceptance),
    Abandon,
}

/// Trains one topology in macro-epoch pairs until it is accepted or abandoned.
fn train_topology(
    network: &mut Network,
    topology: &Topology,
    data: &Split<'_>,
    config: &SearchConfig,
    clock: &Clock,
) -> Result<TopologyReport> {
    let mut sgd = Sgd::new(config.initial_learning_rate);
    let mut stall_count = 0usize;
    let mut decayed = false;
    let mut block = 0usize;

    loop {
        checkpoint(config, clock, topology)?;
        let t_start = Instant::now();
        block += 1;

        run_block(network, data, &sgd, config.sweeps_per_block)?;
        let error_before = total_absolute_error(network, data.train_inputs, data.train_targets)?;
        run_block(network, data, &sgd, config.sweeps_per_block)?;
        let error_after = total_absolute_error(network, data.train_inputs, data.train_targets)?;

        let improved = error_after < error_before;
        if !improved {
            stall_count += 1;
        }
        if stall_count > config.decay_after_stalls && !decayed {
            sgd.decay(config.decay_factor);
            decayed = true;
            warn!(
                "{}: {} stalled blocks, learning rate decayed to {}",
                topology, stall_count, sgd.learning_rate
            );
        }

        let outcome = if stall_count > config.abandon_after_stalls
            || block >= config.max_blocks_per_topology
        {
            warn!("{}: abandoning after {} blocks ({} stalled)", topology, block, stall_count);
            if is_accurate(network, data.train_inputs, data.train_targets)? {
                BlockOutcome::Accept(Acceptance::TrainingSet)
            } else {
                BlockOutcome::Abandon
            }
        } else if is_accurate(network, data.test_inputs, data.test_targets)? {
            BlockOutcome::Accept(Acceptance::TestSet)
        } else {
            BlockOutcome::Continue
        };

        let phase = match outcome {
            BlockOutcome::Accept(_) => SearchPhase::Accepted,
            BlockOutcome::Abandon => SearchPhase::Grown,
            BlockOutcome::Continue if improved => SearchPhase::Training,
            BlockOutcome::Continue => SearchPhase::Stalled,
        };
        debug!(
            "{} block {}: error {:.6} -> {:.6}, stalls {}, lr {}",
            topology, block, error_before, error_after, stall_count, sgd.learning_rate
        );
        if let Some(ref tx) = config.progress_tx {
            // A dropped receiver only means nobody is watching.
            let _ = tx.send(BlockStats {
                topology: topology.name(),
                block,
                error_before,
                error_after,
                stall_count,
                learning_rate: sgd.learning_rate,
                phase,
                elapsed_ms: t_start.elapsed().as_millis() as u64,
            });
        }

        let acceptance = match outcome {
            BlockOutcome::Continue => continue,
            BlockOutcome::Accept(a) => Some(a),
            BlockOutcome::Abandon => None,
        };
        return Ok(TopologyReport {
            acceptance,
            blocks: block,
            learning_rate: sgd.learning_rate,
            training_error: error_after,
        });
    }
}

/// One macro-epoch: `sweeps` in-order passes over the training set.
fn run_block(network: &mut Network, data: &Split<'_>, sgd: &Sgd, sweeps: usize) -> Result<()> {
    for _ in 0..sweeps {
        train_sweep(network, data.train_inputs, data.train_targets, sgd)?;
    }
    Ok(())
}

/// Cancellation and wall-clock checks, run at every macro-epoch boundary.
fn checkpoint(config: &SearchConfig, clock: &Clock, topology: &Topology) -> Result<()> {
    if let Some(ref flag) = config.stop_flag {
        if flag.load(Ordering::Relaxed) {
            info!("search cancelled while training {}", topology);
            return Err(GrowError::Cancelled);
        }
    }
    if let Some(budget) = clock.budget {
        if clock.started.elapsed() >= budget {
            return Err(exhausted(clock, topology, format!(
                "time budget of {}s exceeded", budget.as_secs()
            )));
        }
    }
    Ok(())
}

fn exhausted(clock: &Clock, topology: &Topology, reason: String) -> GrowError {
    warn!("search exhausted at {}: {}", topology, reason);
    GrowError::SearchExhausted {
        topologies_tried: clock.topologies_tried,
        last_topology: topology.widths().to_vec(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::sync::{mpsc, Arc, atomic::AtomicBool};

    fn quick_config(seed: u64) -> SearchConfig {
        SearchConfig { sweeps_per_block: 20, ..SearchConfig::seeded(seed) }
    }

    fn sign_data() -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
        (vec![vec![-1.0], vec![1.0]], vec![vec![-1.0], vec![1.0]])
    }

    #[test]
    fn linearly_separable_task_is_accepted_on_first_topology() {
        let (x, y) = sign_data();
        let mut store = MemoryStore::new();
        let initial = Topology::new(vec![1, 1]).unwrap();

        let outcome = optimize(initial.clone(), &x, &y, &x, &y, &quick_config(1), &mut store).unwrap();
        assert_eq!(outcome.topology, initial);
        assert_eq!(outcome.name, "1,1");
        assert_eq!(outcome.acceptance, Acceptance::TestSet);
        assert_eq!(outcome.topologies_tried, 1);
        assert!(store.contains("1,1"));
    }

    #[test]
    fn empty_training_set_is_rejected() {
        let mut store = MemoryStore::new();
        let err = optimize(Topology::new(vec![1, 1]).unwrap(), &[], &[], &[], &[], &quick_config(0), &mut store)
            .unwrap_err();
        assert!(matches!(err, GrowError::EmptyDataset));
    }

    #[test]
    fn empty_test_set_falls_back_to_training_acceptance() {
        let (x, y) = sign_data();
        let mut store = MemoryStore::new();
        let config = SearchConfig { max_blocks_per_topology: 2, ..quick_config(2) };

        let outcome = optimize(Topology::new(vec![1, 1]).unwrap(), &x, &y, &[], &[], &config, &mut store).unwrap();
        assert_eq!(outcome.acceptance, Acceptance::TrainingSet);
        assert_eq!(outcome.blocks_trained, 2);
    }

    #[test]
    fn unreachable_targets_exhaust_the_topology_limit() {
        // Contradictory labels for the same input can never be learnt.
        let x = vec![vec![0.5], vec![0.5]];
        let y = vec![vec![1.0], vec![-1.0]];
        let mut store = MemoryStore::new();
        let config = SearchConfig { max_blocks_per_topology: 1, max_topologies: 3, ..quick_config(3) };

        match optimize(Topology::new(vec![1, 1]).unwrap(), &x, &y, &x, &y, &config, &mut store) {
            Err(GrowError::SearchExhausted { topologies_tried, last_topology, .. }) => {
                assert_eq!(topologies_tried, 3);
                // [1,1] -> [1,2,1] -> [1,2,2,1] -> [1,2,2,2,1]
                assert_eq!(last_topology, vec![1, 2, 2, 2, 1]);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(store.is_empty());
    }

    #[test]
    fn depth_limit_exhausts_search() {
        let x = vec![vec![0.5], vec![0.5]];
        let y = vec![vec![1.0], vec![-1.0]];
        let mut store = MemoryStore::new();
        let config = SearchConfig { max_blocks_per_topology: 1, max_layers: 3, ..quick_config(3) };

        let err = optimize(Topology::new(vec![1, 1]).unwrap(), &x, &y, &x, &y, &config, &mut store).unwrap_err();
        assert!(matches!(err, GrowError::SearchExhausted { topologies_tried: 2, .. }));
    }

    #[test]
    fn bad_test_example_fails_before_any_training() {
        let (x, y) = sign_data();
        let test_x = vec![vec![1.0], vec![1.0, 0.0]];
        let (tx, rx) = mpsc::channel();
        let config = SearchConfig { progress_tx: Some(tx), ..quick_config(7) };
        let mut store = MemoryStore::new();

        let err = optimize(Topology::new(vec![1, 1]).unwrap(), &x, &y, &test_x, &y, &config, &mut store)
            .unwrap_err();
        assert!(matches!(err, GrowError::InvalidInputShape { expected: 1, actual: 2 }));
        assert_eq!(rx.try_iter().count(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn bad_training_target_fails_before_any_training() {
        let (x, _) = sign_data();
        let y = vec![vec![-1.0], vec![1.0, 1.0]];
        let (tx, rx) = mpsc::channel();
        let config = SearchConfig { progress_tx: Some(tx), ..quick_config(7) };
        let mut store = MemoryStore::new();

        let err = optimize(Topology::new(vec![1, 1]).unwrap(), &x, &y, &[], &[], &config, &mut store)
            .unwrap_err();
        assert!(matches!(err, GrowError::InvalidInputShape { expected: 1, actual: 2 }));
        assert_eq!(rx.try_iter().count(), 0);
    }

    #[test]
    fn zero_time_budget_exhausts_before_first_block() {
        let (x, y) = sign_data();
        let (tx, rx) = mpsc::channel();
        let config = SearchConfig { time_budget_secs: Some(0), progress_tx: Some(tx), ..quick_config(8) };
        let mut store = MemoryStore::new();

        match optimize(Topology::new(vec![1, 1]).unwrap(), &x, &y, &x, &y, &config, &mut store) {
            Err(GrowError::SearchExhausted { topologies_tried, last_topology, reason }) => {
                assert_eq!(topologies_tried, 1);
                assert_eq!(last_topology, vec![1, 1]);
                assert!(reason.contains("time budget"), "{reason}");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(rx.try_iter().count(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn raised_stop_flag_cancels_before_training() {
        let (x, y) = sign_data();
        let mut store = MemoryStore::new();
        let flag = Arc::new(AtomicBool::new(true));
        let config = SearchConfig { stop_flag: Some(flag), ..quick_config(4) };

        let err = optimize(Topology::new(vec![1, 1]).unwrap(), &x, &y, &x, &y, &config, &mut store).unwrap_err();
        assert!(matches!(err, GrowError::Cancelled));
        assert!(store.is_empty());
    }

    #[test]
    fn stall_counter_decays_once_then_abandons() {
        // Nothing to learn: both stalls and the learning-rate schedule are
        // driven purely by the counter.
        let x = vec![vec![0.5], vec![0.5]];
        let y = vec![vec![1.0], vec![-1.0]];
        let (tx, rx) = mpsc::channel();
        let config = SearchConfig {
            sweeps_per_block: 1,
            initial_learning_rate: 0.0,
            max_topologies: 1,
            progress_tx: Some(tx),
            ..SearchConfig::seeded(5)
        };
        let mut store = MemoryStore::new();
        let _ = optimize(Topology::new(vec![1, 1]).unwrap(), &x, &y, &x, &y, &config, &mut store);

        let stats: Vec<BlockStats> = rx.try_iter().collect();
        assert_eq!(stats.len(), 11);
        assert!(stats.iter().all(|s| s.error_after == s.error_before));
        assert_eq!(stats.last().unwrap().stall_count, 11);
        assert_eq!(stats.last().unwrap().phase, SearchPhase::Grown);
        assert_eq!(stats[4].phase, SearchPhase::Stalled);
    }

    #[test]
    fn learning_rate_decays_exactly_once() {
        let x = vec![vec![0.5], vec![0.5]];
        let y = vec![vec![1.0], vec![-1.0]];
        let (tx, rx) = mpsc::channel();
        let config = SearchConfig {
            sweeps_per_block: 1,
            initial_learning_rate: 1e-300,
            max_topologies: 1,
            progress_tx: Some(tx),
            ..SearchConfig::seeded(6)
        };
        let mut store = MemoryStore::new();
        let _ = optimize(Topology::new(vec![1, 1]).unwrap(), &x, &y, &x, &y, &config, &mut store);

        let rates: Vec<f64> = rx.try_iter().map(|s| s.learning_rate).collect();
        assert_eq!(rates.len(), 11);
        assert!(rates[..5].iter().all(|&r| r == 1e-300));
        assert!(rates[5..].iter().all(|&r| r == 1e-300 * 0.1));
    }
}

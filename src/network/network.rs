use std::path::Path;

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::error::{GrowError, Result};
use crate::layers::dense::Layer;
use crate::math::matrix::Matrix;
use crate::network::snapshot::{NetworkSnapshot, SNAPSHOT_FORMAT_VERSION};
use crate::network::topology::Topology;
use crate::optim::sgd::Sgd;

/// Fully-connected tanh network.
///
/// Layer 0 is the input layer and only holds the values copied in by the
/// last forward pass. Every later layer is a [`Layer`] owning its values,
/// biases, error signals and incoming weights.
#[derive(Debug, Clone)]
pub struct Network {
    topology: Topology,
    input: Vec<f64>,
    layers: Vec<Layer>,
}

impl Network {
    /// Builds a fresh network: weights uniform in [-0.5, 0.5), everything else zero.
    pub fn new<R: Rng + ?Sized>(topology: &Topology, rng: &mut R) -> Network {
        let widths = topology.widths();
        let layers = widths.windows(2)
            .map(|w| Layer::new(w[1], w[0], rng))
            .collect();
        Network {
            topology: topology.clone(),
            input: vec![0.0; topology.input_size()],
            layers,
        }
    }

    /// Convenience constructor from a raw shape vector and a seed.
    pub fn with_seed(layers: &[usize], seed: u64) -> Result<Network> {
        let topology = Topology::new(layers.to_vec())?;
        let mut rng = StdRng::seed_from_u64(seed);
        Ok(Network::new(&topology, &mut rng))
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn input_size(&self) -> usize {
        self.topology.input_size()
    }

    pub fn output_size(&self) -> usize {
        self.topology.output_size()
    }

    /// Layer `l` for `l >= 1`; the input layer has no parameters.
    pub fn layer(&self, l: usize) -> Option<&Layer> {
        l.checked_sub(1).and_then(|k| self.layers.get(k))
    }

    /// Neuron values of layer `l` from the most recent forward pass.
    pub fn values(&self, l: usize) -> Option<&[f64]> {
        if l == 0 {
            Some(&self.input)
        } else {
            self.layer(l).map(|layer| layer.values.as_slice())
        }
    }

    /// Forward pass. Fails without touching any state if `input` has the
    /// wrong length.
    pub fn forward(&mut self, input: &[f64]) -> Result<&[f64]> {
        check_len(self.input_size(), input.len())?;
        self.input.copy_from_slice(input);

        let mut prev: &[f64] = &self.input;
        for layer in &mut self.layers {
            prev = layer.feed_from(prev);
        }
        Ok(prev)
    }

    /// Forward pass returning an owned output vector.
    pub fn predict(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        self.forward(input).map(<[f64]>::to_vec)
    }

    /// Back-propagates `target` and applies one gradient step.
    ///
    /// Reads the values left by the preceding [`forward`](Self::forward) on
    /// the same example.
    pub fn backward(&mut self, target: &[f64], optimizer: &Sgd) -> Result<()> {
        check_len(self.output_size(), target.len())?;
        self.compute_errors(target);
        self.apply_updates(optimizer);
        Ok(())
    }

    fn compute_errors(&mut self, target: &[f64]) {
        let last = self.layers.len() - 1;
        self.layers[last].compute_output_errors(target);
        for k in (0..last).rev() {
            let (head, tail) = self.layers.split_at_mut(k + 1);
            head[k].compute_hidden_errors(&tail[0]);
        }
    }

    // Values are not recomputed here, so every layer sees the activations
    // of the forward pass regardless of update order.
    fn apply_updates(&mut self, optimizer: &Sgd) {
        for k in (0..self.layers.len()).rev() {
            let (head, tail) = self.layers.split_at_mut(k);
            let inputs: &[f64] = match head.last() {
                Some(prev) => &prev.values,
                None => &self.input,
            };
            optimizer.step(&mut tail[0], inputs);
        }
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Flattens weights and biases into the versioned snapshot layout.
    pub fn to_snapshot(&self) -> NetworkSnapshot {
        NetworkSnapshot {
            format_version: SNAPSHOT_FORMAT_VERSION,
            layers: self.topology.widths().to_vec(),
            weights: self.layers.iter()
                .flat_map(|l| l.weights.as_slice().iter().copied())
                .collect(),
            biases: self.layers.iter()
                .flat_map(|l| l.biases.iter().copied())
                .collect(),
        }
    }

    /// Rebuilds a network from a snapshot, validating version and array sizes.
    pub fn from_snapshot(snapshot: NetworkSnapshot) -> Result<Network> {
        snapshot.validate()?;
        let topology = Topology::new(snapshot.layers)?;

        let mut weights = snapshot.weights.into_iter();
        let mut biases = snapshot.biases.into_iter();
        let layers = topology.widths().windows(2)
            .map(|w| {
                let (rows, cols) = (w[0], w[1]);
                let flat = weights.by_ref().take(rows * cols).collect();
                let b = biases.by_ref().take(cols).collect();
                Matrix::from_flat(rows, cols, flat)
                    .map(|m| Layer::from_parts(m, b))
                    .ok_or_else(|| GrowError::MalformedSnapshot("weight block too short".into()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Network {
            input: vec![0.0; topology.input_size()],
            topology,
            layers,
        })
    }

    /// Replaces this network's parameters with the snapshot's. Fails with
    /// `ShapeMismatchOnLoad` and leaves `self` untouched if the shapes differ.
    pub fn restore(&mut self, snapshot: NetworkSnapshot) -> Result<()> {
        snapshot.expect_shape(self.topology.widths())?;
        *self = Network::from_snapshot(snapshot)?;
        Ok(())
    }

    /// Serializes the network to a pretty-printed JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &self.to_snapshot())?;
        Ok(())
    }

    /// Deserializes a network from a JSON file previously written by `save_json`.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Network> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let snapshot: NetworkSnapshot = serde_json::from_reader(reader)?;
        Network::from_snapshot(snapshot)
    }
}

fn check_len(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(GrowError::InvalidInputShape { expected, actual });
    }
    Ok(())
}

use serde::{Serialize, Deserialize};

use crate::error::{GrowError, Result};
use crate::network::topology::Topology;

/// Current on-disk schema version.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// Versioned, flat persistence form of a [`Network`](crate::Network).
///
/// Layout:
/// - `layers`:  neuron count per layer, input first
/// - `weights`: every connection, ordered by layer `l`, then source neuron
///               `i` in layer `l`, then destination neuron `j` in layer `l+1`
/// - `biases`:  one per neuron of layers `1..L`, ordered by layer then
///               neuron; the input layer has no stored biases
///
/// Neuron values and error signals are transient and not persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    pub format_version: u32,
    pub layers: Vec<usize>,
    pub weights: Vec<f64>,
    pub biases: Vec<f64>,
}

impl NetworkSnapshot {
    /// Checks the version and that the flat arrays fit `layers`.
    pub fn validate(&self) -> Result<()> {
        if self.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(GrowError::MalformedSnapshot(format!(
                "unsupported format version {} (expected {})",
                self.format_version, SNAPSHOT_FORMAT_VERSION
            )));
        }
        let topology = Topology::new(self.layers.clone())
            .map_err(|e| GrowError::MalformedSnapshot(e.to_string()))?;
        let overflow = || GrowError::MalformedSnapshot(format!(
            "layer widths {:?} overflow the parameter count", self.layers
        ));
        let expected_weights = topology.weight_count().ok_or_else(overflow)?;
        let expected_biases = topology.bias_count().ok_or_else(overflow)?;
        if self.weights.len() != expected_weights {
            return Err(GrowError::MalformedSnapshot(format!(
                "expected {} weights for {:?}, found {}",
                expected_weights, self.layers, self.weights.len()
            )));
        }
        if self.biases.len() != expected_biases {
            return Err(GrowError::MalformedSnapshot(format!(
                "expected {} biases for {:?}, found {}",
                expected_biases, self.layers, self.biases.len()
            )));
        }
        Ok(())
    }

    /// Fails with `ShapeMismatchOnLoad` unless the stored shape is `expected`.
    pub fn expect_shape(&self, expected: &[usize]) -> Result<()> {
        if self.layers != expected {
            return Err(GrowError::ShapeMismatchOnLoad {
                expected: expected.to_vec(),
                found: self.layers.clone(),
            });
        }
        Ok(())
    }
}

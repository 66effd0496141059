use std::fmt;

use serde::{Serialize, Deserialize};

use crate::error::{GrowError, Result};

/// Delimiter used when a topology is turned into a persistence key.
pub const NAME_DELIMITER: &str = ",";

/// Validated layer-shape vector: neuron count per layer, input first.
///
/// A topology always has at least two layers (input and output) and no
/// zero-width layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Topology(Vec<usize>);

impl Topology {
    pub fn new(layers: Vec<usize>) -> Result<Topology> {
        if layers.len() < 2 {
            return Err(GrowError::InvalidTopology(format!(
                "need at least an input and an output layer, got {} layer(s)",
                layers.len()
            )));
        }
        if let Some(idx) = layers.iter().position(|&w| w == 0) {
            return Err(GrowError::InvalidTopology(format!("layer {idx} has zero neurons")));
        }
        Ok(Topology(layers))
    }

    pub fn widths(&self) -> &[usize] {
        &self.0
    }

    /// Number of layers, input and output included.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn input_size(&self) -> usize {
        self.0[0]
    }

    pub fn output_size(&self) -> usize {
        self.0[self.0.len() - 1]
    }

    pub fn neuron_count(&self) -> usize {
        self.0.iter().sum()
    }

    /// Number of connections; `None` if it does not fit in `usize`.
    pub fn weight_count(&self) -> Option<usize> {
        self.0.windows(2)
            .try_fold(0usize, |acc, w| w[0].checked_mul(w[1])?.checked_add(acc))
    }

    /// Biases are stored for every layer except the input layer; `None` on
    /// overflow.
    pub fn bias_count(&self) -> Option<usize> {
        self.0[1..].iter().try_fold(0usize, |acc, &w| acc.checked_add(w))
    }

    /// Persistence key, e.g. `"3,4,2"`.
    pub fn name(&self) -> String {
        self.0.iter()
            .map(|w| w.to_string())
            .collect::<Vec<_>>()
            .join(NAME_DELIMITER)
    }

    /// Copy with a layer of `width` inserted directly before the output layer.
    pub(crate) fn insert_before_output(&self, width: usize) -> Topology {
        debug_assert!(width > 0);
        let mut layers = self.0.clone();
        layers.insert(layers.len() - 1, width);
        Topology(layers)
    }

    /// Copy with layer `index` widened by one neuron.
    pub(crate) fn widen(&self, index: usize) -> Topology {
        let mut layers = self.0.clone();
        layers[index] += 1;
        Topology(layers)
    }
}

impl TryFrom<Vec<usize>> for Topology {
    type Error = GrowError;

    fn try_from(layers: Vec<usize>) -> Result<Topology> {
        Topology::new(layers)
    }
}

impl From<Topology> for Vec<usize> {
    fn from(t: Topology) -> Vec<usize> {
        t.0
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

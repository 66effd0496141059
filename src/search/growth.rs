use serde::{Serialize, Deserialize};

use crate::network::topology::Topology;

/// Width of a layer inserted by [`Mutation::Deepen`].
pub const INSERTED_LAYER_WIDTH: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mutation {
    /// A layer of [`INSERTED_LAYER_WIDTH`] neurons was inserted before the output layer.
    Deepen,
    /// The last hidden layer gained one neuron.
    Widen,
}

/// Next topology to try after `current` failed to converge.
///
/// - first hidden layer at least twice the input width: deepen
/// - last hidden layer narrower than the layer feeding it: widen it
/// - otherwise (including no hidden layer at all): deepen
///
/// Exactly one change per call. Input and output widths are preserved, and
/// neither depth nor neuron count ever decreases.
pub fn grow(current: &Topology) -> (Topology, Mutation) {
    let w = current.widths();
    let depth = w.len();

    if depth < 3 || w[1] >= 2 * w[0] {
        return (current.insert_before_output(INSERTED_LAYER_WIDTH), Mutation::Deepen);
    }

    let last_hidden = depth - 2;
    if w[last_hidden] < w[last_hidden - 1] {
        return (current.widen(last_hidden), Mutation::Widen);
    }

    (current.insert_before_output(INSERTED_LAYER_WIDTH), Mutation::Deepen)
}

use crate::layers::dense::Layer;

/// Plain per-sample gradient step. Carries the learning rate explicitly so
/// callers (the trainer, the architecture search) own it rather than the
/// network.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// Applies one update to a layer from its stored error signals.
    pub fn step(&self, layer: &mut Layer, inputs: &[f64]) {
        layer.apply_update(inputs, self.learning_rate);
    }

    pub fn decay(&mut self, factor: f64) {
        self.learning_rate *= factor;
    }
}

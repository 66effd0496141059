use rand::Rng;

use crate::{math::matrix::Matrix, activation::tanh::Tanh};

/// One non-input layer of the network.
///
/// Owns its incoming connections: `weights` has shape
/// `(input_size, size)`, so `weights[i][j]` connects neuron `i` of the
/// previous layer to neuron `j` of this one.
#[derive(Debug, Clone)]
pub struct Layer {
    pub size: usize,
    /// Post-activation values from the most recent forward pass.
    pub values: Vec<f64>,
    pub biases: Vec<f64>,
    /// Local gradient terms from the most recent backward pass.
    pub errors: Vec<f64>,
    pub weights: Matrix,
}

impl Layer {
    /// Fresh layer: uniform weights in [-0.5, 0.5), zero biases, values and errors.
    pub fn new<R: Rng + ?Sized>(size: usize, input_size: usize, rng: &mut R) -> Layer {
        Layer {
            size,
            values: vec![0.0; size],
            biases: vec![0.0; size],
            errors: vec![0.0; size],
            weights: Matrix::random(input_size, size, rng),
        }
    }

    /// Rebuilds a layer from persisted parameters. Caller guarantees
    /// `biases.len() == weights.cols`.
    pub(crate) fn from_parts(weights: Matrix, biases: Vec<f64>) -> Layer {
        let size = biases.len();
        Layer {
            size,
            values: vec![0.0; size],
            biases,
            errors: vec![0.0; size],
            weights,
        }
    }

    pub fn input_size(&self) -> usize {
        self.weights.rows
    }

    /// `v[j] = tanh(Σ_i input[i] * w[i][j] + b[j])`
    pub fn feed_from(&mut self, input: &[f64]) -> &[f64] {
        let z = self.weights.vec_mul(input);
        for ((v, z), b) in self.values.iter_mut().zip(z).zip(&self.biases) {
            *v = Tanh::function(z + b);
        }
        &self.values
    }

    /// Output-layer error: `(target - v) * (1 - v²)`.
    pub fn compute_output_errors(&mut self, target: &[f64]) {
        for ((e, &v), &t) in self.errors.iter_mut().zip(&self.values).zip(target) {
            *e = (t - v) * Tanh::derivative_from_output(v);
        }
    }

    /// Hidden-layer error pulled back through the next layer's incoming
    /// weights: `e[n] = (1 - v[n]²) * Σ_j next.e[j] * next.w[n][j]`.
    pub fn compute_hidden_errors(&mut self, next: &Layer) {
        for (n, (e, &v)) in self.errors.iter_mut().zip(&self.values).enumerate() {
            let downstream: f64 = next.weights.row(n).iter()
                .zip(&next.errors)
                .map(|(w, ne)| w * ne)
                .sum();
            *e = downstream * Tanh::derivative_from_output(v);
        }
    }

    /// Gradient step from the stored errors. `inputs` are the previous
    /// layer's values from the same forward pass.
    pub fn apply_update(&mut self, inputs: &[f64], lr: f64) {
        for (n, (b, &e)) in self.biases.iter_mut().zip(&self.errors).enumerate() {
            *b += lr * e;
            for (i, &x) in inputs.iter().enumerate() {
                *self.weights.get_mut(i, n) += lr * e * x;
            }
        }
    }
}

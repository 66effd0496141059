use rand::Rng;
use serde::{Serialize, Deserialize};

/// Dense row-major matrix of `f64`.
///
/// Used for connection weights: entry `(i, j)` is the weight from neuron `i`
/// of the source layer to neuron `j` of the destination layer, so a weight
/// matrix has `rows = source width` and `cols = destination width`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix { rows, cols, data: vec![0.0; rows * cols] }
    }

    /// Uniform samples in [-0.5, 0.5).
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let data = (0..rows * cols).map(|_| rng.gen::<f64>() - 0.5).collect();
        Matrix { rows, cols, data }
    }

    /// Wraps a flat row-major buffer. Returns `None` if the length is wrong
    /// or `rows * cols` overflows.
    pub fn from_flat(rows: usize, cols: usize, data: Vec<f64>) -> Option<Matrix> {
        if rows.checked_mul(cols) != Some(data.len()) {
            return None;
        }
        Some(Matrix { rows, cols, data })
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.cols + j]
    }

    #[inline]
    pub fn get_mut(&mut self, i: usize, j: usize) -> &mut f64 {
        &mut self.data[i * self.cols + j]
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Row vector times matrix: `out[j] = Σ_i v[i] * self[i][j]`.
    ///
    /// # Panics
    /// Panics if `v.len() != self.rows`.
    pub fn vec_mul(&self, v: &[f64]) -> Vec<f64> {
        assert_eq!(v.len(), self.rows, "vector length must equal matrix rows");
        let mut out = vec![0.0; self.cols];
        for (i, &x) in v.iter().enumerate() {
            for (o, w) in out.iter_mut().zip(self.row(i)) {
                *o += x * w;
            }
        }
        out
    }

    /// Flat row-major view of all entries.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { rows: 0, cols: 0, data: vec![] }
    }
}

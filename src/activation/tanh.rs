/// Hyperbolic tangent, the only activation the network uses.
pub struct Tanh;

impl Tanh {
    pub fn function(x: f64) -> f64 {
        x.tanh()
    }

    /// Derivative expressed through the activation itself: `1 - y²` where
    /// `y = tanh(x)`. Backprop only keeps post-activation values, so this is
    /// the form it needs.
    pub fn derivative_from_output(y: f64) -> f64 {
        1.0 - y * y
    }
}

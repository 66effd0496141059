/// Absolute-error helpers shared by the evaluator.
pub struct AbsoluteError;

impl AbsoluteError {
    /// Unnormalised sum: Σ |predicted - expected|
    pub fn total(predicted: &[f64], expected: &[f64]) -> f64 {
        predicted.iter().zip(expected.iter())
            .map(|(p, y)| (p - y).abs())
            .sum()
    }

    /// True when every output is within `tolerance` of its target.
    pub fn within(predicted: &[f64], expected: &[f64], tolerance: f64) -> bool {
        predicted.iter().zip(expected.iter())
            .all(|(p, y)| (p - y).abs() <= tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_sums_without_averaging() {
        assert_eq!(AbsoluteError::total(&[0.5, -0.5], &[1.0, 1.0]), 2.0);
    }

    #[test]
    fn tolerance_is_inclusive() {
        assert!(AbsoluteError::within(&[0.5], &[1.0], 0.5));
        assert!(!AbsoluteError::within(&[0.49, 0.0], &[1.0, 0.0], 0.5));
    }
}

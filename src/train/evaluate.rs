use crate::{
    error::{GrowError, Result},
    loss::absolute::AbsoluteError,
    network::network::Network,
    train::trainer::check_dataset,
};

/// An example counts as correct when every output is within this distance
/// of its target.
pub const CORRECT_TOLERANCE: f64 = 0.5;

/// `is_accurate` requires the correct fraction to be strictly above this.
pub const ACCURACY_THRESHOLD: f64 = 0.9;

/// Σ over examples and outputs of `|output - target|`.
///
/// Only meaningful as a relative progress signal. Returns `EmptyDataset`
/// for zero examples.
pub fn total_absolute_error(
    network: &mut Network,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
) -> Result<f64> {
    check_dataset(network.topology(), inputs, targets)?;
    if inputs.is_empty() {
        return Err(GrowError::EmptyDataset);
    }
    let mut total = 0.0;
    for (input, target) in inputs.iter().zip(targets.iter()) {
        let output = network.forward(input)?;
        total += AbsoluteError::total(output, target);
    }
    Ok(total)
}

/// Fraction of examples whose outputs are all within
/// [`CORRECT_TOLERANCE`] of their targets; `None` for an empty dataset.
pub fn accuracy(
    network: &mut Network,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
) -> Result<Option<f64>> {
    check_dataset(network.topology(), inputs, targets)?;
    if inputs.is_empty() {
        return Ok(None);
    }
    let mut correct = 0usize;
    for (input, target) in inputs.iter().zip(targets.iter()) {
        let output = network.forward(input)?;
        if AbsoluteError::within(output, target, CORRECT_TOLERANCE) {
            correct += 1;
        }
    }
    Ok(Some(correct as f64 / inputs.len() as f64))
}

/// True iff strictly more than [`ACCURACY_THRESHOLD`] of the examples are
/// correct. An empty dataset is never accurate.
pub fn is_accurate(
    network: &mut Network,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
) -> Result<bool> {
    Ok(accuracy(network, inputs, targets)?.map_or(false, |a| a > ACCURACY_THRESHOLD))
}

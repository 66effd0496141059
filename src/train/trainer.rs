use crate::{
    error::{GrowError, Result},
    network::{network::Network, topology::Topology},
    optim::sgd::Sgd,
};

/// One online training step: forward on `input`, then back-propagate
/// `target` with a single gradient update.
///
/// Both vectors are checked before anything is written, so a shape error
/// leaves the network as it was.
pub fn train_step(
    network: &mut Network,
    input: &[f64],
    target: &[f64],
    optimizer: &Sgd,
) -> Result<()> {
    if target.len() != network.output_size() {
        return Err(GrowError::InvalidInputShape {
            expected: network.output_size(),
            actual: target.len(),
        });
    }
    network.forward(input)?;
    network.backward(target, optimizer)
}

/// One full pass over the dataset in order, one update per example.
///
/// Every example is shape-checked first; a bad one anywhere in the dataset
/// fails the sweep before any update is applied.
pub fn train_sweep(
    network: &mut Network,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
    optimizer: &Sgd,
) -> Result<()> {
    check_dataset(network.topology(), inputs, targets)?;
    for (input, target) in inputs.iter().zip(targets.iter()) {
        train_step(network, input, target, optimizer)?;
    }
    Ok(())
}

/// Checks that inputs and targets pair up and that every example matches
/// the topology's input and output widths.
pub(crate) fn check_dataset(
    topology: &Topology,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
) -> Result<()> {
    if inputs.len() != targets.len() {
        return Err(GrowError::DatasetMismatch { inputs: inputs.len(), targets: targets.len() });
    }
    for (input, target) in inputs.iter().zip(targets.iter()) {
        check_width(topology.input_size(), input.len())?;
        check_width(topology.output_size(), target.len())?;
    }
    Ok(())
}

fn check_width(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(GrowError::InvalidInputShape { expected, actual });
    }
    Ok(())
}

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GrowError>;

/// Everything that can go wrong while building, training, searching or
/// persisting a network.
#[derive(Error, Debug)]
pub enum GrowError {
    /// An input or target vector does not match the width of the layer it
    /// is fed to.
    #[error("invalid input shape: expected {expected} values, got {actual}")]
    InvalidInputShape { expected: usize, actual: usize },

    /// Input and target collections have different lengths.
    #[error("dataset mismatch: {inputs} inputs but {targets} targets")]
    DatasetMismatch { inputs: usize, targets: usize },

    /// Error evaluation or search was requested over zero examples.
    #[error("dataset is empty")]
    EmptyDataset,

    /// The layer-shape vector cannot describe a network.
    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    /// A persisted network does not have the shape the caller expects.
    #[error("shape mismatch on load: expected {expected:?}, found {found:?}")]
    ShapeMismatchOnLoad { expected: Vec<usize>, found: Vec<usize> },

    /// A snapshot is internally inconsistent or has an unknown version.
    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),

    /// The architecture search ran out of budget without accepting a network.
    #[error("search exhausted after {topologies_tried} topologies (last {last_topology:?}): {reason}")]
    SearchExhausted {
        topologies_tried: usize,
        last_topology: Vec<usize>,
        reason: String,
    },

    /// The stop flag was raised.
    #[error("search cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

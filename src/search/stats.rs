use serde::{Serialize, Deserialize};

/// Where a topology stands after a macro-epoch pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPhase {
    /// Error improved over the block; training continues.
    Training,
    /// Error did not improve over the block; training continues with the
    /// stall counter raised.
    Stalled,
    /// The network met an accuracy target and was persisted.
    Accepted,
    /// The topology was rejected and a larger one queued.
    Grown,
}

/// Per-block statistics emitted by `optimize`.
///
/// When a `progress_tx` channel is configured in `SearchConfig`, one
/// `BlockStats` is sent after every macro-epoch pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockStats {
    /// Topology name, e.g. `"2,3,1"`.
    pub topology: String,
    /// 1-based index of the macro-epoch pair within this topology.
    pub block: usize,
    pub error_before: f64,
    pub error_after: f64,
    pub stall_count: usize,
    /// Learning rate after any decay applied in this block.
    pub learning_rate: f64,
    pub phase: SearchPhase,
    /// Wall-clock duration of the block in milliseconds.
    pub elapsed_ms: u64,
}

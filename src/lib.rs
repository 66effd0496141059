pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;
pub mod search;
pub mod store;

// Convenience re-exports
pub use error::{GrowError, Result};
pub use math::matrix::Matrix;
pub use activation::tanh::Tanh;
pub use layers::dense::Layer;
pub use network::{Network, NetworkSnapshot, Topology};
pub use optim::sgd::Sgd;
pub use train::{train_step, train_sweep, is_accurate, total_absolute_error};
pub use search::{optimize, Acceptance, BlockStats, SearchConfig, SearchOutcome, SearchPhase};
pub use store::{JsonFileStore, MemoryStore, NetworkStore};

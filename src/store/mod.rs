//! Named persistence of whole networks.
//!
//! The architecture search only needs `save`; `load` and `load_expecting`
//! are for whoever consumes the accepted network afterwards.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::error::Result;
use crate::network::network::Network;
use crate::network::topology::Topology;

/// Save/load service keyed by name (by convention the topology name, e.g. `"2,3,1"`).
pub trait NetworkStore {
    fn save(&mut self, name: &str, network: &Network) -> Result<()>;

    fn load(&self, name: &str) -> Result<Network>;

    fn contains(&self, name: &str) -> bool;

    /// Loads `name` and fails with `ShapeMismatchOnLoad` unless it has the
    /// `expected` shape.
    fn load_expecting(&self, name: &str, expected: &Topology) -> Result<Network> {
        let network = self.load(name)?;
        network.to_snapshot().expect_shape(expected.widths())?;
        Ok(network)
    }
}

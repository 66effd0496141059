pub mod network;
pub mod snapshot;
pub mod topology;

pub use network::Network;
pub use snapshot::{NetworkSnapshot, SNAPSHOT_FORMAT_VERSION};
pub use topology::Topology;

use std::collections::HashMap;

use crate::error::{GrowError, Result};
use crate::network::network::Network;
use crate::network::snapshot::NetworkSnapshot;
use crate::store::NetworkStore;

/// In-process store holding snapshots by name.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    snapshots: HashMap<String, NetworkSnapshot>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl NetworkStore for MemoryStore {
    fn save(&mut self, name: &str, network: &Network) -> Result<()> {
        self.snapshots.insert(name.to_owned(), network.to_snapshot());
        Ok(())
    }

    fn load(&self, name: &str) -> Result<Network> {
        let snapshot = self.snapshots.get(name).cloned().ok_or_else(|| {
            GrowError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no network stored under '{name}'"),
            ))
        })?;
        Network::from_snapshot(snapshot)
    }

    fn contains(&self, name: &str) -> bool {
        self.snapshots.contains_key(name)
    }
}

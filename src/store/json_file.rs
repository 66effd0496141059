use std::path::{Path, PathBuf};

use log::debug;

use crate::error::Result;
use crate::network::network::Network;
use crate::store::NetworkStore;

/// Default output directory for accepted networks.
pub const DEFAULT_MODEL_DIR: &str = "trained_models";

/// Stores each network as `<dir>/<name>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> JsonFileStore {
        JsonFileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        JsonFileStore::new(DEFAULT_MODEL_DIR)
    }
}

impl NetworkStore for JsonFileStore {
    fn save(&mut self, name: &str, network: &Network) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(name);
        debug!("writing network to {}", path.display());
        network.save_json(path)
    }

    fn load(&self, name: &str) -> Result<Network> {
        Network::load_json(self.path_for(name))
    }

    fn contains(&self, name: &str) -> bool {
        self.path_for(name).is_file()
    }
}

//! Config Module
//!
//! Every tunable of the simulation in one serde tree. Missing fields fall back
//! to their defaults, so a config file only lists what it changes:
//!
//! ```json
//! { "seed": 7, "economy": { "win": { "metal": 20 } } }
//! ```

pub mod economy_config;
pub mod player_config;
pub mod world_config;

pub use economy_config::EconomyConfig;
pub use player_config::PlayerConfig;
pub use world_config::{AnimalSpec, LayoutConfig, TreeSpec, WorldConfig};

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Root configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
    pub world: WorldConfig,
    pub player: PlayerConfig,
    pub economy: EconomyConfig,
}

impl SimConfig {
    /// Parse a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Builder: fix the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

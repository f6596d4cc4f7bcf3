//! Simulator configuration: engine thresholds and search bounds.
//! Missing file means defaults; an unreadable or invalid file also falls back
//! to defaults, with a warning.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::combat::BattleConfig;
use crate::data::roster::read_document;
use crate::optimizer::SearchConfig;

pub const DEFAULT_CONFIG_PATH: &str = "data/simulator.json";
pub const CONFIG_PATH_ENV: &str = "UNKILLABLE_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    #[serde(default)]
    pub battle: BattleConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

pub fn load_config(path: impl AsRef<Path>) -> SimulatorConfig {
    let path = path.as_ref();
    if !path.exists() {
        return SimulatorConfig::default();
    }
    match read_document(path) {
        Ok(config) => config,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "ignoring invalid simulator config");
            SimulatorConfig::default()
        }
    }
}

/// Config from `$UNKILLABLE_CONFIG`, else [DEFAULT_CONFIG_PATH].
pub fn load_config_from_env() -> SimulatorConfig {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    load_config(path)
}

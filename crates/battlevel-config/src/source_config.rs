//! Power-supply source configuration

use battlevel_hal::{DEFAULT_POWER_SUPPLY_DIR, SourceSettings};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the battery is read from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Kernel power-supply class directory
    #[serde(default = "default_power_supply_dir")]
    pub power_supply_dir: PathBuf,

    /// Supply to read, e.g. `BAT0`; detected by type when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_name: Option<String>,
}

fn default_power_supply_dir() -> PathBuf {
    PathBuf::from(DEFAULT_POWER_SUPPLY_DIR)
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            power_supply_dir: default_power_supply_dir(),
            battery_name: None,
        }
    }
}

impl From<&SourceConfig> for SourceSettings {
    fn from(config: &SourceConfig) -> Self {
        Self {
            power_supply_dir: config.power_supply_dir.clone(),
            battery_name: config.battery_name.clone(),
        }
    }
}

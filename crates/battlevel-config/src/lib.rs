//! Configuration management for battlevel
//!
//! TOML config files naming where the power-supply class lives and, optionally,
//! which supply is the battery.

mod source_config;

pub use source_config::SourceConfig;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// System-wide configuration directory
pub const CONFIG_DIR: &str = "/etc/battlevel";

const CONFIG_FILE: &str = "config.toml";

/// Main battlevel configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattlevelConfig {
    #[serde(default)]
    pub source: SourceConfig,
}

impl BattlevelConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load_default() -> Result<Self, ConfigError> {
        // Try user config first, then system config
        if let Some(user_config) = user_config_path() {
            if user_config.exists() {
                return Self::load(&user_config);
            }
        }

        let system_config = Path::new(CONFIG_DIR).join(CONFIG_FILE);
        if system_config.exists() {
            return Self::load(&system_config);
        }

        tracing::debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        self.validate()?;
        let contents = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, contents)?;
        tracing::info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Reject values that cannot name a power supply
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(name) = &self.source.battery_name {
            if name.is_empty() || name.contains('/') || name == "." || name == ".." {
                return Err(ConfigError::Invalid(format!(
                    "battery_name must be a single directory name, got {:?}",
                    name
                )));
            }
        }
        Ok(())
    }
}

/// `$XDG_CONFIG_HOME/battlevel/config.toml`, falling back to `~/.config`
pub fn user_config_path() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;
    Some(base.join("battlevel").join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_default_config() {
        let config = BattlevelConfig::default();
        assert_eq!(
            config.source.power_supply_dir,
            PathBuf::from("/sys/class/power_supply")
        );
        assert!(config.source.battery_name.is_none());
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let config_content = r#"
[source]
power_supply_dir = "/tmp/power_supply"
battery_name = "BAT1"
"#;
        write!(temp_file, "{}", config_content).unwrap();

        let config = BattlevelConfig::load(temp_file.path()).unwrap();
        assert_eq!(
            config.source.power_supply_dir,
            PathBuf::from("/tmp/power_supply")
        );
        assert_eq!(config.source.battery_name.as_deref(), Some("BAT1"));
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let temp_file = NamedTempFile::new().unwrap();
        let config = BattlevelConfig::load(temp_file.path()).unwrap();
        assert_eq!(config, BattlevelConfig::default());
    }

    #[test]
    fn test_partial_source_section() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "[source]\nbattery_name = \"battery\"\n").unwrap();

        let config = BattlevelConfig::load(temp_file.path()).unwrap();
        assert_eq!(
            config.source.power_supply_dir,
            PathBuf::from("/sys/class/power_supply")
        );
        assert_eq!(config.source.battery_name.as_deref(), Some("battery"));
    }

    #[test]
    fn test_missing_file() {
        let td = TempDir::new().unwrap();
        let err = BattlevelConfig::load(&td.path().join("config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
        assert!(format!("{}", err).contains("not found"));
    }

    #[test]
    fn test_malformed_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "[source\npower_supply_dir = 3").unwrap();

        let err = BattlevelConfig::load(temp_file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn test_rejects_path_as_battery_name() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "[source]\nbattery_name = \"../BAT0\"\n").unwrap();

        let err = BattlevelConfig::load(temp_file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_save_config() {
        let td = TempDir::new().unwrap();
        let path = td.path().join("nested").join("config.toml");
        let config = BattlevelConfig {
            source: SourceConfig {
                power_supply_dir: PathBuf::from("/sys/class/power_supply"),
                battery_name: Some("BAT0".into()),
            },
        };

        config.save(&path).unwrap();

        let loaded = BattlevelConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unset_battery_name_is_omitted() {
        let pretty = toml::to_string_pretty(&BattlevelConfig::default()).unwrap();
        assert!(pretty.contains("[source]"));
        assert!(!pretty.contains("battery_name"));
    }
}

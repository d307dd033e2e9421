//! Power-supply class reader
//!
//! Reads battery charge from the kernel's `/sys/class/power_supply` tree,
//! which both desktop Linux and Android expose. Files are opened per query
//! and nothing is held between calls.

use crate::power::{BatteryStatus, PowerError, PowerStatusSource};
use std::fs;
use std::path::{Path, PathBuf};

/// Kernel power-supply class directory
pub const DEFAULT_POWER_SUPPLY_DIR: &str = "/sys/class/power_supply";

/// Supply name Android kernels use for the main battery
const ANDROID_BATTERY_NAME: &str = "battery";

/// Sysfs scale of the `capacity` attribute
const CAPACITY_SCALE: i64 = 100;

/// (level, scale) attribute pairs, in order of preference
const CHARGE_COUNTERS: [(&str, &str); 2] = [
    ("charge_now", "charge_full"),
    ("energy_now", "energy_full"),
];

/// Where to look for the battery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSettings {
    pub power_supply_dir: PathBuf,
    /// Fixed supply name; detected by `type` when unset
    pub battery_name: Option<String>,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            power_supply_dir: PathBuf::from(DEFAULT_POWER_SUPPLY_DIR),
            battery_name: None,
        }
    }
}

/// Battery reader over a single power-supply directory
#[derive(Debug, Clone)]
pub struct SysfsPowerSource {
    battery_path: PathBuf,
}

impl SysfsPowerSource {
    /// Read from the given supply directory, e.g. `/sys/class/power_supply/BAT0`
    pub fn with_path(battery_path: impl Into<PathBuf>) -> Self {
        Self {
            battery_path: battery_path.into(),
        }
    }

    /// The `battery` supply Android kernels register
    pub fn android_default() -> Self {
        Self::with_path(Path::new(DEFAULT_POWER_SUPPLY_DIR).join(ANDROID_BATTERY_NAME))
    }

    /// Find the first supply whose `type` is `Battery`
    pub fn detect(power_supply_dir: &Path) -> crate::Result<Self> {
        if !power_supply_dir.exists() {
            return Err(PowerError::SupplyNotFound(power_supply_dir.to_path_buf()));
        }

        let mut entries = fs::read_dir(power_supply_dir)?
            .collect::<Result<Vec<_>, _>>()?;
        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let path = entry.path();
            let Ok(psu_type) = fs::read_to_string(path.join("type")) else {
                continue;
            };

            if psu_type.trim().eq_ignore_ascii_case("battery") {
                tracing::info!("Found battery at {}", path.display());
                return Ok(Self::with_path(path));
            }
        }

        Err(PowerError::NoBattery(power_supply_dir.to_path_buf()))
    }

    /// Resolve settings to a source: named supply, then detection, then the Android default
    pub fn from_settings(settings: &SourceSettings) -> Self {
        if let Some(name) = &settings.battery_name {
            let path = settings.power_supply_dir.join(name);
            if !path.exists() {
                tracing::warn!("Configured battery {} does not exist", path.display());
            }
            return Self::with_path(path);
        }

        match Self::detect(&settings.power_supply_dir) {
            Ok(source) => source,
            Err(e) => {
                let fallback = settings.power_supply_dir.join(ANDROID_BATTERY_NAME);
                tracing::warn!("{}, falling back to {}", e, fallback.display());
                Self::with_path(fallback)
            }
        }
    }

    /// Supply directory this source reads
    pub fn battery_path(&self) -> &Path {
        &self.battery_path
    }

    /// Read integer from sysfs file
    fn read_sysfs_int(&self, attribute: &str) -> Option<i64> {
        let path = self.battery_path.join(attribute);
        match fs::read_to_string(&path) {
            Ok(contents) => {
                let value = contents.trim().parse().ok();
                if value.is_none() {
                    tracing::debug!("Unparsable value in {}: {:?}", path.display(), contents);
                }
                value
            }
            Err(e) => {
                tracing::debug!("Cannot read {}: {}", path.display(), e);
                None
            }
        }
    }
}

impl PowerStatusSource for SysfsPowerSource {
    fn snapshot(&self) -> Option<BatteryStatus> {
        if let Some(capacity) = self.read_sysfs_int("capacity") {
            return Some(BatteryStatus::new(capacity, CAPACITY_SCALE));
        }

        CHARGE_COUNTERS.iter().find_map(|(now, full)| {
            let level = self.read_sysfs_int(now)?;
            let scale = self.read_sysfs_int(full)?;
            Some(BatteryStatus::new(level, scale))
        })
    }
}

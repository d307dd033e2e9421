//! Battery level query
//!
//! Reads the device's current battery charge from the host power-supply
//! facility and reports it as an integer percentage, or `-1` when no valid
//! reading is available.
//!
//! # Supported Sources
//!
//! - Linux and Android sysfs (`/sys/class/power_supply`)
//! - Mock source for tests and desktop development
//!
//! # Example
//!
//! ```no_run
//! use battlevel_hal::{SysfsPowerSource, battery_level};
//!
//! let source = SysfsPowerSource::android_default();
//! match battery_level(&source) {
//!     -1 => println!("battery: unknown"),
//!     level => println!("battery: {}%", level),
//! }
//! ```

pub mod mock;
pub mod power;
pub mod sysfs;

pub use power::{
    BATTERY_LEVEL_UNAVAILABLE, BatteryStatus, PowerError, PowerStatusSource, battery_level,
};
pub use sysfs::{DEFAULT_POWER_SUPPLY_DIR, SourceSettings, SysfsPowerSource};

/// HAL Result type
pub type Result<T> = std::result::Result<T, PowerError>;

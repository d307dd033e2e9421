//! Battery level derivation
//!
//! A [`PowerStatusSource`] hands out a point-in-time [`BatteryStatus`];
//! [`battery_level`] turns it into a percentage or the `-1` sentinel.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Returned by [`battery_level`] when no valid reading exists.
pub const BATTERY_LEVEL_UNAVAILABLE: i32 = -1;

#[derive(Debug, Error)]
pub enum PowerError {
    #[error("No battery found under {0}")]
    NoBattery(PathBuf),

    #[error("Power supply not found: {0}")]
    SupplyNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Raw charge reading copied out of the host's power status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatteryStatus {
    /// Current charge units
    pub level: i64,
    /// Maximum charge units
    pub scale: i64,
}

impl BatteryStatus {
    pub fn new(level: i64, scale: i64) -> Self {
        Self { level, scale }
    }

    /// Whether the reading can be turned into a percentage
    pub fn is_valid(&self) -> bool {
        self.level >= 0 && self.scale > 0
    }

    /// Charge percentage, truncated toward zero.
    ///
    /// Not clamped to 100: a supply reporting `level > scale` is passed through.
    /// `None` when the reading is invalid or the ratio does not fit in an `i32`.
    pub fn percentage(&self) -> Option<i32> {
        if !self.is_valid() {
            return None;
        }
        // Widened so `level * 100` cannot overflow for any i64 level
        i32::try_from(i128::from(self.level) * 100 / i128::from(self.scale)).ok()
    }
}

/// Host facility that can report the current power status.
///
/// Each call is a fresh synchronous read; implementations keep no
/// subscription or listener between calls.
pub trait PowerStatusSource: Send + Sync {
    /// Current snapshot, or `None` when the host has nothing to report
    fn snapshot(&self) -> Option<BatteryStatus>;
}

impl<S: PowerStatusSource + ?Sized> PowerStatusSource for &S {
    fn snapshot(&self) -> Option<BatteryStatus> {
        (**self).snapshot()
    }
}

impl<S: PowerStatusSource + ?Sized> PowerStatusSource for Box<S> {
    fn snapshot(&self) -> Option<BatteryStatus> {
        (**self).snapshot()
    }
}

/// Current battery charge as a percentage, or [`BATTERY_LEVEL_UNAVAILABLE`].
///
/// Callers must treat `-1` as "unknown", not as an empty battery.
pub fn battery_level<S: PowerStatusSource + ?Sized>(source: &S) -> i32 {
    let Some(status) = source.snapshot() else {
        tracing::debug!("Power status snapshot unavailable");
        return BATTERY_LEVEL_UNAVAILABLE;
    };

    match status.percentage() {
        Some(level) => level,
        None => {
            tracing::debug!(
                "Rejecting battery reading level={} scale={}",
                status.level,
                status.scale
            );
            BATTERY_LEVEL_UNAVAILABLE
        }
    }
}

//! Mock power source for testing without real hardware
//!
//! # Usage
//!
//! ```
//! use battlevel_hal::battery_level;
//! use battlevel_hal::mock::MockPowerSource;
//!
//! let source = MockPowerSource::new(80, 100);
//! assert_eq!(battery_level(&source), 80);
//!
//! source.discharge_to(15);
//! assert_eq!(battery_level(&source), 15);
//!
//! source.disconnect();
//! assert_eq!(battery_level(&source), -1);
//! ```

use crate::power::{BatteryStatus, PowerStatusSource};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

/// Power source returning a settable snapshot
#[derive(Debug, Clone, Default)]
pub struct MockPowerSource {
    status: Arc<RwLock<Option<BatteryStatus>>>,
    queries: Arc<AtomicUsize>,
}

impl MockPowerSource {
    pub fn new(level: i64, scale: i64) -> Self {
        Self::from_status(Some(BatteryStatus::new(level, scale)))
    }

    /// Source with no snapshot, as on hosts without a battery
    pub fn unavailable() -> Self {
        Self::from_status(None)
    }

    pub fn from_status(status: Option<BatteryStatus>) -> Self {
        Self {
            status: Arc::new(RwLock::new(status)),
            queries: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Replace the snapshot
    pub fn set_status(&self, status: Option<BatteryStatus>) {
        if let Ok(mut current) = self.status.write() {
            *current = status;
        }
    }

    /// Keep the scale, change the level
    pub fn discharge_to(&self, level: i64) {
        if let Ok(mut current) = self.status.write() {
            let scale = current.map_or(100, |s| s.scale);
            *current = Some(BatteryStatus::new(level, scale));
        }
    }

    /// Drop the snapshot
    pub fn disconnect(&self) {
        self.set_status(None);
    }

    /// Number of snapshots taken so far
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::Relaxed)
    }
}

impl PowerStatusSource for MockPowerSource {
    fn snapshot(&self) -> Option<BatteryStatus> {
        self.queries.fetch_add(1, Ordering::Relaxed);
        self.status.read().ok().and_then(|status| *status)
    }
}

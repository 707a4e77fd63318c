//! Device State Store
//!
//! Maps device id → rolling classification state. Backed by a sharded
//! concurrent map so classification for a given device is serialized (the
//! shard entry is held exclusively for the duration of one `classify` call)
//! while distinct devices proceed in parallel.
//!
//! Classification is O(window size) and performs no I/O, so the entry guard
//! is never held across anything blocking. States are created lazily on
//! first reading and retained for the process lifetime (no eviction).

use dashmap::DashMap;

use crate::classifier::{self, DeviceState};
use crate::profiles::CompressorProfile;
use crate::types::{SensorReading, Verdict};

/// Concurrent per-device state store.
#[derive(Debug, Default)]
pub struct DeviceStateStore {
    states: DashMap<String, DeviceState>,
}

impl DeviceStateStore {
    pub fn new() -> Self {
        Self {
            states: DashMap::new(),
        }
    }

    /// Classify one reading against the device's live state.
    ///
    /// Creates default state on first access. The map entry is held
    /// exclusively while the classifier runs, so interleaved readings for
    /// the same device cannot tear the vibration window.
    pub fn classify_reading(
        &self,
        profile: &CompressorProfile,
        reading: &SensorReading,
    ) -> Verdict {
        let mut entry = self
            .states
            .entry(reading.device_id.clone())
            .or_default();
        classifier::classify(profile, entry.value_mut(), reading)
    }

    /// Clone of a device's current state, if it has reported at least once.
    pub fn snapshot(&self, device_id: &str) -> Option<DeviceState> {
        self.states.get(device_id).map(|s| s.value().clone())
    }

    /// Ids of all devices seen so far.
    pub fn device_ids(&self) -> Vec<String> {
        self.states.iter().map(|e| e.key().clone()).collect()
    }

    /// Number of devices tracked.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

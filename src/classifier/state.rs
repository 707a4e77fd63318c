//! Per-device classification state
//!
//! One [`DeviceState`] exists per device id, created lazily on first reading
//! and retained for the process lifetime. A STANDBY classification resets it
//! to the initial condition so the next duty cycle recalibrates from scratch.

use serde::{Deserialize, Serialize};

use super::window::VibrationWindow;
use crate::types::OperatingLevel;

/// Rolling classification memory for one compressor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceState {
    /// Last ≤10 vibration readings since the last idle reset
    pub window: VibrationWindow,
    /// Adaptive operating level inferred from the window mean
    pub current_level: OperatingLevel,
    /// True once the window has filled at least once since the last idle reset
    pub calibrated: bool,
}

impl DeviceState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return to the initial condition (idle, empty window, uncalibrated).
    pub fn reset_to_idle(&mut self) {
        self.window.clear();
        self.current_level = OperatingLevel::Idle;
        self.calibrated = false;
    }
}

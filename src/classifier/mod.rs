//! Health classification engine
//!
//! Turns one sensor reading plus one device's rolling state into a
//! [`Verdict`]. Evaluation is an ordered cascade, first match wins:
//!
//! 1. Safety and performance alarms ([`rules::ALARM_RULES`])
//! 2. Standby detection (resets the device state)
//! 3. Window accumulation (CALIBRATING until the window fills)
//! 4. Statistical evaluation (chaos check, then adaptive level)
//!
//! `classify` is pure given its three inputs: no I/O, no clock, no
//! randomness. Callers own locking; see [`crate::store::DeviceStateStore`].

pub mod rules;
pub mod state;
pub mod window;

pub use state::DeviceState;
pub use window::{VibrationWindow, WINDOW_CAPACITY};

use crate::config::defaults::CHAOS_STD_LIMIT;
use crate::profiles::CompressorProfile;
use crate::types::{HealthStatus, OperatingLevel, SensorReading, Verdict};

/// Classify one reading against a device's rolling state.
///
/// Mutates `state` (window growth, idle resets, level changes) and returns
/// the verdict for this reading.
pub fn classify(
    profile: &CompressorProfile,
    state: &mut DeviceState,
    reading: &SensorReading,
) -> Verdict {
    // Phase 1+2: alarm cascade (stateless, highest priority).
    if let Some(verdict) = rules::evaluate(profile, state, reading) {
        return verdict;
    }

    // Phase 3: standby. Clears the window so the next duty cycle
    // recalibrates from scratch.
    if reading.vibration < profile.idle_vib {
        state.reset_to_idle();
        return Verdict::new(HealthStatus::Standby, "System Idle", 0.0);
    }

    // Phase 4: accumulate the vibration window.
    state.window.push(reading.vibration);
    if !state.window.is_full() {
        return Verdict::new(HealthStatus::Calibrating, "Analyzing Rhythm...", 0.0);
    }

    // Phase 5: statistical evaluation over the full window.
    state.calibrated = true;

    if state.window.std_dev() > CHAOS_STD_LIMIT {
        return Verdict::new(HealthStatus::AiWarning, "Unstable/Chaotic Rhythm", 5.0);
    }

    let new_level = if state.window.mean() > profile.high_speed_vib {
        OperatingLevel::High
    } else {
        OperatingLevel::Low
    };
    let previous_level = state.current_level;
    state.current_level = new_level;

    if previous_level != new_level && previous_level != OperatingLevel::Idle {
        return Verdict::new(
            HealthStatus::Optimal,
            format!("RAMPING UP: {}->{}", previous_level, new_level),
            0.0,
        );
    }

    if new_level == OperatingLevel::High {
        Verdict::new(HealthStatus::OptimalLevel2, "High Speed Cooling", 0.0)
    } else {
        Verdict::new(HealthStatus::OptimalLevel1, "Normal Operation", 0.0)
    }
}

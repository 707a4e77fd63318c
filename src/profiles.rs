//! Compressor profile registry
//!
//! A profile is a named bundle of seven calibration thresholds governing what
//! counts as idle / running / overheating / loud for a class of equipment.
//! Exactly one profile is active per process lifetime; it is resolved by name
//! at startup and never mutated afterwards.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Calibration thresholds for one class of compressor.
///
/// Invariants (checked by [`CompressorProfile::validate`]):
/// `0 < idle_temp < run_temp < max_temp` and
/// `0 < idle_vib < high_speed_vib < max_vib`, `loud_mic > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompressorProfile {
    /// Below this the shell is resting (°C)
    pub idle_temp: f64,
    /// Above this the motor is working (°C)
    pub run_temp: f64,
    /// Above this is thermal danger (°C)
    pub max_temp: f64,
    /// Below this the unit is still (g)
    pub idle_vib: f64,
    /// Window mean above this is level-2 speed (g)
    pub high_speed_vib: f64,
    /// Above this the mounting is loose (g)
    pub max_vib: f64,
    /// Microphone threshold for "loud" (raw ADC units)
    pub loud_mic: f64,
}

impl CompressorProfile {
    /// Check threshold ordering invariants.
    pub fn validate(&self) -> Result<()> {
        if !(self.idle_temp > 0.0 && self.idle_temp < self.run_temp && self.run_temp < self.max_temp)
        {
            bail!(
                "temperature thresholds must satisfy 0 < idle ({}) < run ({}) < max ({})",
                self.idle_temp,
                self.run_temp,
                self.max_temp
            );
        }
        if !(self.idle_vib > 0.0
            && self.idle_vib < self.high_speed_vib
            && self.high_speed_vib < self.max_vib)
        {
            bail!(
                "vibration thresholds must satisfy 0 < idle ({}) < high_speed ({}) < max ({})",
                self.idle_vib,
                self.high_speed_vib,
                self.max_vib
            );
        }
        if self.loud_mic <= 0.0 {
            bail!("loud_mic must be positive (got {})", self.loud_mic);
        }
        Ok(())
    }
}

/// Bench-demo profile: thresholds low enough to trip with hand heat and a
/// phone vibration motor.
pub const DEMO_MODE: CompressorProfile = CompressorProfile {
    idle_temp: 26.0,
    run_temp: 27.5,
    max_temp: 32.0,
    idle_vib: 0.5,
    high_speed_vib: 3.0,
    max_vib: 8.0,
    loud_mic: 2200.0,
};

/// Factory profile for modern R600a (isobutane) hermetic compressors.
pub const R600A_MODERN: CompressorProfile = CompressorProfile {
    idle_temp: 35.0,
    run_temp: 45.0,
    max_temp: 85.0,
    idle_vib: 0.1,
    high_speed_vib: 1.5,
    max_vib: 3.5,
    loud_mic: 3000.0,
};

/// The static registry: `(name, profile)` pairs.
pub const REGISTRY: &[(&str, &CompressorProfile)] =
    &[("DEMO_MODE", &DEMO_MODE), ("R600A_MODERN", &R600A_MODERN)];

/// Look up a profile by name (case-insensitive).
pub fn by_name(name: &str) -> Option<&'static CompressorProfile> {
    REGISTRY
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, p)| *p)
}

/// Registered profile names, for error messages and the API.
pub fn names() -> Vec<&'static str> {
    REGISTRY.iter().map(|(n, _)| *n).collect()
}

//! Alarm rule table
//!
//! The safety and performance alarms are an ordered decision list: the first
//! rule whose predicate matches wins and later rules are never evaluated.
//! Representing them as data makes the precedence auditable and lets each
//! rule be tested in isolation.
//!
//! Ordering (highest priority first):
//!
//! 1. Overheat                      → 10.0
//! 2. Stall, motor locked (humming) →  9.5
//! 3. Stall, start relay dead       →  9.0
//! 4. Loose mounting                →  8.5
//! 5. Gas leak (running cold)       →  6.0 (calibrated devices only)
//! 6. Acoustic fault (grinding)     →  7.0
//!
//! The idle/calibration/statistics phases are stateful and live in
//! [`super::classify`]; only the stateless alarms belong in this table.

use super::state::DeviceState;
use crate::profiles::CompressorProfile;
use crate::types::{HealthStatus, SensorReading, Verdict};

/// One entry in the alarm cascade.
pub struct AlarmRule {
    /// Short identifier for logs and tests
    pub name: &'static str,
    /// Does this rule fire for the given reading?
    pub applies: fn(&CompressorProfile, &DeviceState, &SensorReading) -> bool,
    /// Verdict produced when the rule fires
    pub verdict: fn(&CompressorProfile, &SensorReading) -> Verdict,
}

/// The ordered alarm cascade. First match wins.
pub const ALARM_RULES: &[AlarmRule] = &[
    AlarmRule {
        name: "overheat",
        applies: |p, _, r| r.temperature > p.max_temp,
        verdict: |_, r| {
            Verdict::new(
                HealthStatus::CriticalFailure,
                // Debug keeps the decimal on whole numbers: "33.0", not "33".
                // The dashboard pattern-matches the full string.
                format!("OVERHEAT ({:?}°C)", r.temperature),
                10.0,
            )
        },
    },
    AlarmRule {
        name: "stall_motor_locked",
        applies: |p, _, r| {
            r.temperature > p.run_temp && r.vibration < p.idle_vib && r.microphone_level > p.loud_mic
        },
        verdict: |_, _| {
            Verdict::new(
                HealthStatus::CriticalFailure,
                "STALL: Motor Locked (Humming)",
                9.5,
            )
        },
    },
    AlarmRule {
        name: "stall_relay_dead",
        applies: |p, _, r| r.temperature > p.run_temp && r.vibration < p.idle_vib,
        verdict: |_, _| {
            Verdict::new(HealthStatus::CriticalFailure, "STALL: Start Relay Dead", 9.0)
        },
    },
    AlarmRule {
        name: "loose_mounting",
        applies: |p, _, r| r.vibration > p.max_vib,
        verdict: |_, _| {
            Verdict::new(
                HealthStatus::CriticalFailure,
                "MECHANICAL: Loose Mounting",
                8.5,
            )
        },
    },
    AlarmRule {
        // Only fires once the device has completed a calibration cycle —
        // a cold start with residual vibration is not evidence of a leak.
        name: "gas_leak",
        applies: |p, s, r| r.vibration > p.idle_vib && r.temperature < p.idle_temp && s.calibrated,
        verdict: |_, _| Verdict::new(HealthStatus::Warning, "GAS LEAK? (Running Cold)", 6.0),
    },
    AlarmRule {
        name: "acoustic_fault",
        applies: |p, _, r| r.vibration > p.idle_vib && r.microphone_level > p.loud_mic,
        verdict: |_, _| {
            Verdict::new(HealthStatus::Warning, "ACOUSTIC FAULT: Grinding Noise", 7.0)
        },
    },
];

/// Evaluate the alarm cascade; `None` means no alarm fired and the
/// idle/calibration phases should run.
pub fn evaluate(
    profile: &CompressorProfile,
    state: &DeviceState,
    reading: &SensorReading,
) -> Option<Verdict> {
    ALARM_RULES
        .iter()
        .find(|rule| (rule.applies)(profile, state, reading))
        .map(|rule| (rule.verdict)(profile, reading))
}

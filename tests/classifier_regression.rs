//! Classifier regression tests
//!
//! End-to-end properties of the health classification cascade, exercised
//! through the public library API with the bench-demo profile.

use echocold_brain::classifier::{classify, DeviceState};
use echocold_brain::profiles::{DEMO_MODE, R600A_MODERN};
use echocold_brain::types::{HealthStatus, SensorReading};

fn reading(temp: f64, vib: f64, mic: f64) -> SensorReading {
    SensorReading {
        device_id: "fridge-1".to_string(),
        temperature: temp,
        vibration: vib,
        microphone_level: mic,
        timestamp: 0,
    }
}

#[test]
fn overheat_dominates_all_other_signals() {
    // temperature > max_temp always yields CRITICAL FAILURE / 10.0,
    // regardless of vibration or microphone values.
    for vib in [0.0, 0.3, 1.0, 5.0, 9.0, 20.0] {
        for mic in [0.0, 1000.0, 2500.0, 9999.0] {
            let mut state = DeviceState::new();
            let v = classify(&DEMO_MODE, &mut state, &reading(32.1, vib, mic));
            assert_eq!(v.status, HealthStatus::CriticalFailure, "vib={} mic={}", vib, mic);
            assert_eq!(v.fault_score, 10.0, "vib={} mic={}", vib, mic);
        }
    }
}

#[test]
fn demo_profile_spot_checks_on_fresh_device() {
    let mut state = DeviceState::new();
    let v = classify(&DEMO_MODE, &mut state, &reading(20.0, 0.1, 0.0));
    assert_eq!(v.status, HealthStatus::Standby);

    let mut state = DeviceState::new();
    let v = classify(&DEMO_MODE, &mut state, &reading(33.0, 0.0, 0.0));
    assert_eq!(v.status, HealthStatus::CriticalFailure);
    assert!(v.message.starts_with("OVERHEAT"));

    let mut state = DeviceState::new();
    let v = classify(&DEMO_MODE, &mut state, &reading(28.0, 0.2, 2500.0));
    assert_eq!(v.status, HealthStatus::CriticalFailure);
    assert_eq!(v.message, "STALL: Motor Locked (Humming)");
    assert_eq!(v.fault_score, 9.5);
}

#[test]
fn ten_steady_readings_calibrate_then_level_one() {
    let mut state = DeviceState::new();
    for i in 1..=10 {
        // Low-variance vibration between idle_vib (0.5) and high_speed_vib (3.0).
        let v = classify(&DEMO_MODE, &mut state, &reading(28.0, 1.0 + 0.02 * i as f64, 0.0));
        match i {
            1..=9 => {
                assert_eq!(v.status, HealthStatus::Calibrating, "reading {}", i);
                assert_eq!(v.fault_score, 0.0);
                assert!(!state.calibrated, "calibrated too early at reading {}", i);
            }
            _ => {
                assert_eq!(v.status, HealthStatus::OptimalLevel1);
                assert!(state.calibrated, "calibrated must flip at reading 10");
            }
        }
    }
}

#[test]
fn chaotic_rhythm_warns_without_any_single_extreme_reading() {
    let mut state = DeviceState::new();
    let mut last = None;
    for i in 0..10 {
        // Alternating 1g / 6g: population std 2.5 > 1.5, every reading
        // well below max_vib (8.0).
        let vib = if i % 2 == 0 { 1.0 } else { 6.0 };
        last = Some(classify(&DEMO_MODE, &mut state, &reading(28.0, vib, 0.0)));
    }
    let v = last.unwrap();
    assert_eq!(v.status, HealthStatus::AiWarning);
    assert_eq!(v.fault_score, 5.0);
}

#[test]
fn standby_always_forces_recalibration() {
    let mut state = DeviceState::new();
    // Fully calibrate.
    for _ in 0..10 {
        classify(&DEMO_MODE, &mut state, &reading(28.0, 1.0, 0.0));
    }
    assert!(state.calibrated);

    // Any standby classification clears the window and the flag...
    let v = classify(&DEMO_MODE, &mut state, &reading(25.0, 0.2, 0.0));
    assert_eq!(v.status, HealthStatus::Standby);

    // ...so the immediately following non-idle reading is CALIBRATING,
    // never an immediate statistical verdict.
    let v = classify(&DEMO_MODE, &mut state, &reading(28.0, 1.0, 0.0));
    assert_eq!(v.status, HealthStatus::Calibrating);
}

#[test]
fn uncalibrated_device_never_reports_gas_leak() {
    // Raw values match the leak predicate (running cold) on both profiles,
    // but a fresh device must not trigger it.
    let mut state = DeviceState::new();
    let v = classify(&DEMO_MODE, &mut state, &reading(20.0, 1.0, 0.0));
    assert_eq!(v.status, HealthStatus::Calibrating);

    // After a full calibration cycle the same reading is a WARNING.
    let mut state = DeviceState::new();
    for _ in 0..10 {
        classify(&DEMO_MODE, &mut state, &reading(28.0, 1.0, 0.0));
    }
    let v = classify(&DEMO_MODE, &mut state, &reading(20.0, 1.0, 0.0));
    assert_eq!(v.status, HealthStatus::Warning);
    assert_eq!(v.fault_score, 6.0);
}

#[test]
fn same_sequence_same_verdicts_on_both_profiles() {
    // The cascade is deterministic for any profile.
    let sequence: Vec<SensorReading> = (0..40)
        .map(|i| reading(30.0 + (i % 7) as f64, 0.2 + (i % 5) as f64 * 0.5, (i * 100) as f64))
        .collect();

    for profile in [&DEMO_MODE, &R600A_MODERN] {
        let run = || {
            let mut state = DeviceState::new();
            sequence
                .iter()
                .map(|r| {
                    let v = classify(profile, &mut state, r);
                    (v.status, v.fault_score)
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }
}

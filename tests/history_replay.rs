//! History replay integration tests
//!
//! The query path must re-derive verdicts over stored rows without touching
//! live classification state, degrade to an empty result on storage
//! failure, and cap responses at 50 rows.

use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use echocold_brain::api::{create_app, ApiState};
use echocold_brain::profiles::DEMO_MODE;
use echocold_brain::storage::SampleStorage;
use echocold_brain::store::DeviceStateStore;
use echocold_brain::types::SensorReading;

fn reading(device: &str, ts: u64, temp: f64, vib: f64, mic: f64) -> SensorReading {
    SensorReading {
        device_id: device.to_string(),
        temperature: temp,
        vibration: vib,
        microphone_level: mic,
        timestamp: ts,
    }
}

fn state_with(storage: Option<SampleStorage>) -> ApiState {
    ApiState::new(
        &DEMO_MODE,
        "DEMO_MODE",
        Arc::new(DeviceStateStore::new()),
        storage,
        Arc::new(AtomicU64::new(0)),
    )
}

async fn get_json(app: axum::Router, uri: &str) -> serde_json::Value {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK, "GET {}", uri);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn history_rows_are_annotated_newest_first() {
    let dir = tempfile::tempdir().unwrap();
    let storage = SampleStorage::open(dir.path()).unwrap();

    // Ten steady readings, then an overheat as the most recent row.
    for ts in 1..=10 {
        storage
            .store_sample(&reading("fridge-1", ts, 28.0, 1.0, 0.0))
            .unwrap();
    }
    storage
        .store_sample(&reading("fridge-1", 11, 33.0, 1.0, 0.0))
        .unwrap();

    let app = create_app(state_with(Some(storage)));
    let rows = get_json(app, "/api/v1/history/fridge-1").await;
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 11);

    // Newest first: the overheat row leads.
    assert_eq!(rows[0]["status"], "CRITICAL FAILURE");
    assert_eq!(rows[0]["fault_score"], 10.0);
    // The chronological replay produced CALIBRATING for the earliest rows
    // and a level verdict at the tenth.
    assert_eq!(rows[10]["status"], "CALIBRATING");
    assert_eq!(rows[1]["status"], "OPTIMAL (LEVEL 1)");
    // Raw fields are echoed alongside the verdict.
    assert_eq!(rows[0]["temp"], 33.0);
    assert_eq!(rows[0]["vib"], 1.0);
}

#[tokio::test]
async fn replaying_twice_yields_identical_verdicts_and_leaves_live_state_alone() {
    let dir = tempfile::tempdir().unwrap();
    let storage = SampleStorage::open(dir.path()).unwrap();
    for ts in 1..=20 {
        let vib = 0.6 + (ts % 4) as f64 * 0.3;
        storage
            .store_sample(&reading("fridge-1", ts, 27.0, vib, 500.0))
            .unwrap();
    }

    let state = state_with(Some(storage));
    let store = Arc::clone(&state.store);
    let app = create_app(state);

    let first = get_json(app.clone(), "/api/v1/history/fridge-1").await;
    let second = get_json(app, "/api/v1/history/fridge-1").await;
    assert_eq!(first, second);

    // The live store was never consulted: a history query must not advance
    // any device's calibration window.
    assert!(store.is_empty());
}

#[tokio::test]
async fn history_is_capped_at_fifty_rows() {
    let dir = tempfile::tempdir().unwrap();
    let storage = SampleStorage::open(dir.path()).unwrap();
    for ts in 1..=80 {
        storage
            .store_sample(&reading("fridge-1", ts, 28.0, 1.0, 0.0))
            .unwrap();
    }

    let app = create_app(state_with(Some(storage)));
    let rows = get_json(app, "/api/v1/history/fridge-1").await;
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 50);
    // The 50 most recent rows: timestamps 80 down to 31.
    assert!(rows[0]["time"].as_str().unwrap().contains("1970"));
}

#[tokio::test]
async fn burst_of_same_millisecond_samples_is_fully_retained() {
    // Stdin replay at pipe speed stamps many readings in one millisecond;
    // every one must survive storage and appear in the annotated history.
    let dir = tempfile::tempdir().unwrap();
    let storage = SampleStorage::open(dir.path()).unwrap();
    for i in 0..12 {
        storage
            .store_sample(&reading("fridge-1", 1000, 28.0, 1.0 + 0.01 * f64::from(i), 0.0))
            .unwrap();
    }

    let app = create_app(state_with(Some(storage)));
    let rows = get_json(app, "/api/v1/history/fridge-1").await;
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 12);
}

#[tokio::test]
async fn missing_storage_degrades_to_empty_result() {
    let app = create_app(state_with(None));
    let rows = get_json(app, "/api/v1/history/fridge-1").await;
    assert_eq!(rows, serde_json::json!([]));
}

#[tokio::test]
async fn unknown_device_yields_empty_result() {
    let dir = tempfile::tempdir().unwrap();
    let storage = SampleStorage::open(dir.path()).unwrap();
    storage
        .store_sample(&reading("fridge-1", 1, 28.0, 1.0, 0.0))
        .unwrap();

    let app = create_app(state_with(Some(storage)));
    let rows = get_json(app, "/api/v1/history/ghost").await;
    assert_eq!(rows, serde_json::json!([]));
}

//! API route handlers
//!
//! Request handling logic for the dashboard endpoints: annotated history,
//! live device snapshots, profile registry, and system status.
//!
//! History annotation replays stored rows through an *ephemeral* device
//! state, so a query never perturbs the live calibration window that the
//! ingestion path is advancing.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::classifier::{self, DeviceState};
use crate::config::defaults::HISTORY_QUERY_LIMIT;
use crate::profiles::{self, CompressorProfile};
use crate::storage::SampleStorage;
use crate::store::DeviceStateStore;
use crate::types::{HealthStatus, SensorReading};

// ============================================================================
// API State
// ============================================================================

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    /// Active compressor profile (fixed for the process lifetime)
    pub profile: &'static CompressorProfile,
    /// Name the profile was selected under
    pub profile_name: String,
    /// Live per-device classification state (read-only from the API)
    pub store: Arc<DeviceStateStore>,
    /// Raw sample history; `None` degrades history queries to empty
    pub storage: Option<SampleStorage>,
    /// Process start, for uptime reporting
    pub started: Instant,
    /// Total readings classified by the ingestion path
    pub readings_processed: Arc<AtomicU64>,
}

impl ApiState {
    pub fn new(
        profile: &'static CompressorProfile,
        profile_name: impl Into<String>,
        store: Arc<DeviceStateStore>,
        storage: Option<SampleStorage>,
        readings_processed: Arc<AtomicU64>,
    ) -> Self {
        Self {
            profile,
            profile_name: profile_name.into(),
            store,
            storage,
            started: Instant::now(),
            readings_processed,
        }
    }
}

// ============================================================================
// History
// ============================================================================

/// One history row, annotated with a freshly recomputed verdict.
#[derive(Debug, Serialize)]
pub struct HistoryRow {
    pub time: String,
    pub temp: f64,
    pub vib: f64,
    pub mic: f64,
    pub status: HealthStatus,
    pub diagnosis: String,
    pub fault_score: f64,
}

/// Replay rows through an ephemeral device state and annotate each.
///
/// `rows` arrive newest first (storage order); replay runs chronologically
/// so the calibration window evolves the way it did live, then the result
/// is flipped back to newest first. Deterministic: annotating the same rows
/// twice yields identical verdicts.
pub fn annotate_history(profile: &CompressorProfile, rows: &[SensorReading]) -> Vec<HistoryRow> {
    let mut state = DeviceState::new();
    let mut annotated: Vec<HistoryRow> = rows
        .iter()
        .rev()
        .map(|reading| {
            let verdict = classifier::classify(profile, &mut state, reading);
            HistoryRow {
                // A corrupt stored timestamp degrades to an empty string
                // rather than wrapping into a bogus date.
                time: i64::try_from(reading.timestamp)
                    .ok()
                    .and_then(chrono::DateTime::from_timestamp_millis)
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_default(),
                temp: reading.temperature,
                vib: reading.vibration,
                mic: reading.microphone_level,
                status: verdict.status,
                diagnosis: verdict.message,
                fault_score: verdict.fault_score,
            }
        })
        .collect();
    annotated.reverse();
    annotated
}

/// GET /api/v1/history/:device_id
///
/// Up to 50 most-recent raw rows, newest first, each annotated. Persistence
/// failure degrades to an empty array — never an error to the caller.
pub async fn get_history(
    State(state): State<ApiState>,
    Path(device_id): Path<String>,
) -> Json<Vec<HistoryRow>> {
    let Some(storage) = &state.storage else {
        tracing::warn!(device = %device_id, "history requested but storage is unavailable");
        return Json(Vec::new());
    };
    let rows = storage.recent_for_device(&device_id, HISTORY_QUERY_LIMIT);
    Json(annotate_history(state.profile, &rows))
}

// ============================================================================
// Status / Devices / Profiles
// ============================================================================

/// GET /api/v1/status response.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub profile: String,
    pub devices_tracked: usize,
    pub readings_processed: u64,
    pub samples_stored: usize,
    pub uptime_seconds: u64,
}

/// GET /api/v1/status
pub async fn get_status(State(state): State<ApiState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        profile: state.profile_name.clone(),
        devices_tracked: state.store.len(),
        readings_processed: state.readings_processed.load(Ordering::Relaxed),
        samples_stored: state.storage.as_ref().map_or(0, SampleStorage::count),
        uptime_seconds: state.started.elapsed().as_secs(),
    })
}

/// One entry of GET /api/v1/devices.
#[derive(Debug, Serialize)]
pub struct DeviceSummary {
    pub device_id: String,
    pub current_level: String,
    pub calibrated: bool,
    /// Window fill, 0..=10
    pub window_fill: usize,
}

/// GET /api/v1/devices
pub async fn get_devices(State(state): State<ApiState>) -> Json<Vec<DeviceSummary>> {
    let mut devices: Vec<DeviceSummary> = state
        .store
        .device_ids()
        .into_iter()
        .filter_map(|id| {
            state.store.snapshot(&id).map(|s| DeviceSummary {
                device_id: id,
                current_level: s.current_level.to_string(),
                calibrated: s.calibrated,
                window_fill: s.window.len(),
            })
        })
        .collect();
    devices.sort_by(|a, b| a.device_id.cmp(&b.device_id));
    Json(devices)
}

/// One entry of GET /api/v1/profiles.
#[derive(Debug, Serialize)]
pub struct ProfileEntry {
    pub name: &'static str,
    pub active: bool,
    #[serde(flatten)]
    pub thresholds: CompressorProfile,
}

/// GET /api/v1/profiles
pub async fn get_profiles(State(state): State<ApiState>) -> Json<Vec<ProfileEntry>> {
    Json(
        profiles::REGISTRY
            .iter()
            .map(|(name, profile)| ProfileEntry {
                name,
                active: name.eq_ignore_ascii_case(&state.profile_name),
                thresholds: **profile,
            })
            .collect(),
    )
}

/// GET /health (legacy root route) response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub uptime_seconds: u64,
}

/// GET /health
pub async fn legacy_health_check(State(state): State<ApiState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        uptime_seconds: state.started.elapsed().as_secs(),
    })
}

//! EchoCold Brain: Compressor Health Intelligence
//!
//! Real-time classification of refrigeration-compressor operating condition
//! from vibration/temperature/acoustic telemetry.
//!
//! ## Architecture
//!
//! - **Classifier**: ordered decision cascade turning one reading plus one
//!   device's rolling state into a health verdict
//! - **Device State Store**: sharded concurrent map of per-device
//!   calibration state
//! - **Ingestion Adapter**: MQTT/stdin sources feeding the classifier and
//!   the raw sample store
//! - **Query Adapter**: HTTP API re-deriving verdicts over stored history
//!   without touching live state

pub mod api;
pub mod classifier;
pub mod config;
pub mod ingest;
pub mod profiles;
pub mod storage;
pub mod store;
pub mod types;

// Re-export configuration
pub use config::BrainConfig;

// Re-export commonly used types
pub use types::{HealthStatus, OperatingLevel, SensorReading, TelemetryPayload, Verdict};

// Re-export the classification core
pub use classifier::{classify, DeviceState, VibrationWindow, WINDOW_CAPACITY};
pub use profiles::CompressorProfile;
pub use store::DeviceStateStore;

// Re-export storage
pub use storage::{SampleStorage, StorageError};

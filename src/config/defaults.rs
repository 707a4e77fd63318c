//! System-wide default constants.
//!
//! Centralises magic numbers so calibration changes happen in one place.
//! Grouped by subsystem for easy discovery.

// ============================================================================
// Classifier
// ============================================================================

/// Population standard deviation above which the vibration rhythm is
/// considered chaotic (g).
pub const CHAOS_STD_LIMIT: f64 = 1.5;

// ============================================================================
// History / Query
// ============================================================================

/// Maximum raw rows returned (and replayed) per history query.
pub const HISTORY_QUERY_LIMIT: usize = 50;

// ============================================================================
// Ingestion
// ============================================================================

/// Default MQTT broker host.
pub const MQTT_DEFAULT_HOST: &str = "mosquitto";

/// Default MQTT broker port.
pub const MQTT_DEFAULT_PORT: u16 = 1883;

/// Topic root for sensor telemetry; devices publish to `<root>/<device_id>`.
pub const MQTT_TOPIC_ROOT: &str = "echocold";

/// MQTT keep-alive interval (seconds).
pub const MQTT_KEEP_ALIVE_SECS: u64 = 60;

/// Pause before re-polling the MQTT event loop after a connection error
/// (milliseconds). rumqttc reconnects on the next poll.
pub const MQTT_RECONNECT_DELAY_MS: u64 = 1_000;

// ============================================================================
// Server / Storage
// ============================================================================

/// Default HTTP bind address.
pub const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:8000";

/// Default sled data directory.
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Default active profile name.
pub const DEFAULT_PROFILE: &str = "DEMO_MODE";

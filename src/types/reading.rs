//! Sensor reading types
//!
//! A [`TelemetryPayload`] is the raw JSON body published by a sensor node;
//! a [`SensorReading`] is the same data bound to a device id and timestamp.
//! Sensor firmware occasionally serializes numbers as strings, so payload
//! fields accept either form (lenient coercion).

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// Raw MQTT payload: `{"vib": 1.2, "temp": 28.4, "mic": 1800}`
///
/// Missing keys default to 0. Non-numeric or non-finite values fail
/// deserialization and the reading is dropped at the adapter boundary.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TelemetryPayload {
    #[serde(default, deserialize_with = "de_f64_lenient")]
    pub vib: f64,
    #[serde(default, deserialize_with = "de_f64_lenient")]
    pub temp: f64,
    #[serde(default, deserialize_with = "de_f64_lenient")]
    pub mic: f64,
}

/// Accept a JSON number or a numeric string, rejecting non-finite values.
fn de_f64_lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrStr {
        Num(f64),
        Str(String),
    }

    let value = match NumOrStr::deserialize(deserializer)? {
        NumOrStr::Num(n) => n,
        NumOrStr::Str(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("non-numeric field value: {:?}", s)))?,
    };

    if !value.is_finite() {
        return Err(de::Error::custom("non-finite field value"));
    }
    Ok(value)
}

/// One telemetry sample bound to its source device.
///
/// This is the unit of work handed to the classifier and the unit of
/// storage in the raw sample history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorReading {
    pub device_id: String,
    /// Shell temperature (°C)
    pub temperature: f64,
    /// Vibration amplitude (g)
    pub vibration: f64,
    /// Microphone level (raw ADC units)
    pub microphone_level: f64,
    /// Unix timestamp in milliseconds
    pub timestamp: u64,
}

impl SensorReading {
    /// Bind a payload to a device id, stamped with the current wall clock.
    pub fn from_payload(device_id: impl Into<String>, payload: TelemetryPayload) -> Self {
        Self {
            device_id: device_id.into(),
            temperature: payload.temp,
            vibration: payload.vib,
            microphone_level: payload.mic,
            timestamp: chrono::Utc::now().timestamp_millis().max(0) as u64,
        }
    }
}

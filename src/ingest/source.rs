//! Sample source abstraction for telemetry ingestion.
//!
//! Provides a unified trait for reading sensor samples from different
//! transports: the MQTT broker (production) and stdin (JSON lines, for
//! local replay and demos).

use anyhow::Result;
use async_trait::async_trait;
use rumqttc::{AsyncClient, Event, EventLoop, MqttOptions, Packet, QoS};
use serde::Deserialize;

use crate::config::defaults::{MQTT_KEEP_ALIVE_SECS, MQTT_RECONNECT_DELAY_MS};
use crate::config::BrokerConfig;
use crate::types::{SensorReading, TelemetryPayload};

/// Events produced by a sample source.
pub enum SampleEvent {
    /// A well-formed reading was received.
    Sample(SensorReading),
    /// Source reached end of data (EOF for stdin; MQTT never emits this).
    Eof,
}

/// Trait abstracting where sensor samples come from.
///
/// Implementations own transport parsing and reconnection; malformed input
/// is dropped internally with a warn log and never reaches the caller.
#[async_trait]
pub trait SampleSource: Send + 'static {
    /// Read the next well-formed sample from the source.
    async fn next_sample(&mut self) -> Result<SampleEvent>;

    /// Human-readable name for logging (e.g. "MQTT", "stdin").
    fn source_name(&self) -> &str;
}

/// Extract the device id from a telemetry topic.
///
/// Topics are two-segment addressing paths (`namespace/device_id`); anything
/// with fewer than two segments is discarded before classification.
pub fn device_id_from_topic(topic: &str) -> Option<&str> {
    let mut segments = topic.split('/');
    let _namespace = segments.next()?;
    match segments.next() {
        Some(id) if !id.is_empty() => Some(id),
        _ => None,
    }
}

// ============================================================================
// MQTT Source
// ============================================================================

/// Reads telemetry from the MQTT broker.
///
/// Subscribes to `<topic_root>/+` at QoS 0. The rumqttc event loop
/// reconnects on the next poll after a connection error; the subscription
/// is re-issued on every ConnAck so reconnects resume delivery.
pub struct MqttSource {
    client: AsyncClient,
    event_loop: EventLoop,
    subscription: String,
}

impl MqttSource {
    pub fn new(broker: &BrokerConfig) -> Self {
        let mut options = MqttOptions::new(&broker.client_id, &broker.host, broker.port);
        options.set_keep_alive(std::time::Duration::from_secs(MQTT_KEEP_ALIVE_SECS));

        let (client, event_loop) = AsyncClient::new(options, 64);
        Self {
            client,
            event_loop,
            subscription: format!("{}/+", broker.topic_root),
        }
    }

    /// Parse a publish packet into a reading, or explain why it was dropped.
    fn parse_publish(topic: &str, payload: &[u8]) -> Option<SensorReading> {
        let Some(device_id) = device_id_from_topic(topic) else {
            tracing::warn!(topic, "discarding reading with malformed topic");
            return None;
        };
        match serde_json::from_slice::<TelemetryPayload>(payload) {
            Ok(p) => Some(SensorReading::from_payload(device_id, p)),
            Err(e) => {
                tracing::warn!(topic, error = %e, "discarding malformed payload");
                None
            }
        }
    }
}

#[async_trait]
impl SampleSource for MqttSource {
    async fn next_sample(&mut self) -> Result<SampleEvent> {
        loop {
            match self.event_loop.poll().await {
                Ok(Event::Incoming(Packet::ConnAck(_))) => {
                    tracing::info!(topic = %self.subscription, "connected to broker, subscribing");
                    self.client
                        .subscribe(self.subscription.clone(), QoS::AtMostOnce)
                        .await?;
                }
                Ok(Event::Incoming(Packet::Publish(publish))) => {
                    if let Some(reading) = Self::parse_publish(&publish.topic, &publish.payload) {
                        return Ok(SampleEvent::Sample(reading));
                    }
                    // Malformed reading dropped; keep polling.
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "MQTT connection error, retrying");
                    tokio::time::sleep(std::time::Duration::from_millis(MQTT_RECONNECT_DELAY_MS))
                        .await;
                }
            }
        }
    }

    fn source_name(&self) -> &str {
        "MQTT"
    }
}

// ============================================================================
// Stdin Source (JSON samples, one per line)
// ============================================================================

/// One stdin line: `{"device_id": "fridge-1", "vib": 1.2, "temp": 28.4}`
#[derive(Debug, Deserialize)]
struct StdinRecord {
    device_id: String,
    #[serde(flatten)]
    payload: TelemetryPayload,
}

/// Reads JSON-formatted samples from stdin.
///
/// Used for replay and demos:
/// `python sensor_simulator.py | ./echocold-brain --stdin`
pub struct StdinSource {
    reader: tokio::io::BufReader<tokio::io::Stdin>,
    line_buffer: String,
}

impl StdinSource {
    pub fn new() -> Self {
        Self {
            reader: tokio::io::BufReader::new(tokio::io::stdin()),
            line_buffer: String::with_capacity(512),
        }
    }
}

impl Default for StdinSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SampleSource for StdinSource {
    async fn next_sample(&mut self) -> Result<SampleEvent> {
        use tokio::io::AsyncBufReadExt;
        loop {
            self.line_buffer.clear();
            let bytes = self.reader.read_line(&mut self.line_buffer).await?;
            if bytes == 0 {
                return Ok(SampleEvent::Eof);
            }
            let line = self.line_buffer.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<StdinRecord>(line) {
                Ok(record) => {
                    return Ok(SampleEvent::Sample(SensorReading::from_payload(
                        record.device_id,
                        record.payload,
                    )))
                }
                Err(e) => {
                    tracing::warn!(error = %e, "skipping malformed stdin line");
                }
            }
        }
    }

    fn source_name(&self) -> &str {
        "stdin"
    }
}

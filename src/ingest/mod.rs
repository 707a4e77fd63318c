//! Ingestion adapter
//!
//! Drains a [`SampleSource`], classifies each reading against the device
//! state store, logs the verdict, and persists the raw sample. Faults are
//! per-reading: a failed persist is logged and the reading dropped — no
//! retry, no backpressure, never fatal to the loop.

pub mod source;

pub use source::{MqttSource, SampleEvent, SampleSource, StdinSource};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::profiles::CompressorProfile;
use crate::storage::SampleStorage;
use crate::store::DeviceStateStore;
use crate::types::SensorReading;

/// The streaming ingestion path: source → classifier → store → persistence.
pub struct IngestLoop {
    profile: &'static CompressorProfile,
    store: Arc<DeviceStateStore>,
    storage: SampleStorage,
    readings_processed: Arc<AtomicU64>,
}

impl IngestLoop {
    pub fn new(
        profile: &'static CompressorProfile,
        store: Arc<DeviceStateStore>,
        storage: SampleStorage,
        readings_processed: Arc<AtomicU64>,
    ) -> Self {
        Self {
            profile,
            store,
            storage,
            readings_processed,
        }
    }

    /// Run until the source is exhausted or shutdown is requested.
    pub async fn run(self, mut source: Box<dyn SampleSource>, cancel: CancellationToken) {
        tracing::info!(source = source.source_name(), "ingestion started");
        loop {
            tokio::select! {
                () = cancel.cancelled() => {
                    tracing::info!("ingestion shutting down");
                    break;
                }
                event = source.next_sample() => match event {
                    Ok(SampleEvent::Sample(reading)) => self.handle_reading(&reading),
                    Ok(SampleEvent::Eof) => {
                        tracing::info!(source = source.source_name(), "sample source exhausted");
                        break;
                    }
                    Err(e) => {
                        tracing::error!(source = source.source_name(), error = %e, "sample source failed");
                        break;
                    }
                }
            }
        }
    }

    /// Classify, log, persist. No lock is held across the persist call.
    fn handle_reading(&self, reading: &SensorReading) {
        let verdict = self.store.classify_reading(self.profile, reading);
        self.readings_processed.fetch_add(1, Ordering::Relaxed);

        tracing::info!(
            device = %reading.device_id,
            status = %verdict.status,
            fault_score = verdict.fault_score,
            "{}", verdict.message
        );

        if let Err(e) = self.storage.store_sample(reading) {
            tracing::warn!(device = %reading.device_id, error = %e, "dropping unpersisted reading");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::DEMO_MODE;
    use crate::types::TelemetryPayload;

    fn make_loop() -> (IngestLoop, Arc<DeviceStateStore>, SampleStorage, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let storage = SampleStorage::open(dir.path()).unwrap();
        let store = Arc::new(DeviceStateStore::new());
        let ingest = IngestLoop::new(
            &DEMO_MODE,
            Arc::clone(&store),
            storage.clone(),
            Arc::new(AtomicU64::new(0)),
        );
        (ingest, store, storage, dir)
    }

    #[test]
    fn test_handle_reading_classifies_and_persists() {
        let (ingest, store, storage, _dir) = make_loop();
        let payload: TelemetryPayload =
            serde_json::from_str(r#"{"vib": 0.1, "temp": 20.0}"#).unwrap();
        let reading = SensorReading::from_payload("fridge-1", payload);

        ingest.handle_reading(&reading);

        assert!(store.snapshot("fridge-1").is_some());
        assert_eq!(storage.recent_for_device("fridge-1", 50).len(), 1);
        assert_eq!(ingest.readings_processed.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn test_run_drains_scripted_source() {
        struct Scripted(Vec<SensorReading>);

        #[async_trait::async_trait]
        impl SampleSource for Scripted {
            async fn next_sample(&mut self) -> anyhow::Result<SampleEvent> {
                Ok(match self.0.pop() {
                    Some(r) => SampleEvent::Sample(r),
                    None => SampleEvent::Eof,
                })
            }
            fn source_name(&self) -> &str {
                "scripted"
            }
        }

        let (ingest, store, storage, _dir) = make_loop();
        let counter = Arc::clone(&ingest.readings_processed);
        let readings: Vec<SensorReading> = (0..5)
            .map(|i| SensorReading {
                device_id: "fridge-1".to_string(),
                temperature: 28.0,
                vibration: 1.0,
                microphone_level: 0.0,
                timestamp: i,
            })
            .collect();

        ingest
            .run(Box::new(Scripted(readings)), CancellationToken::new())
            .await;

        assert_eq!(counter.load(Ordering::Relaxed), 5);
        assert_eq!(store.snapshot("fridge-1").unwrap().window.len(), 5);
        assert_eq!(storage.recent_for_device("fridge-1", 50).len(), 5);
    }

    #[tokio::test]
    async fn test_run_stops_on_cancellation() {
        struct Pending;

        #[async_trait::async_trait]
        impl SampleSource for Pending {
            async fn next_sample(&mut self) -> anyhow::Result<SampleEvent> {
                futures::future::pending::<()>().await;
                Ok(SampleEvent::Eof)
            }
            fn source_name(&self) -> &str {
                "pending"
            }
        }

        let (ingest, _store, _storage, _dir) = make_loop();
        let cancel = CancellationToken::new();
        cancel.cancel();
        // Must return promptly instead of waiting on the source.
        ingest.run(Box::new(Pending), cancel).await;
    }
}

//! Raw Sample Storage
//!
//! Persists every ingested sensor reading for history queries.
//!
//! Key layout: `<device_id> 0x1f <timestamp_be> <seq_be>` — the unit
//! separator keeps device ids prefix-free and the big-endian timestamp makes
//! a prefix scan return one device's rows in chronological order. The
//! process-monotonic sequence suffix disambiguates samples landing in the
//! same millisecond (routine for piped stdin replay), which would otherwise
//! overwrite each other.
//!
//! Writes are not flushed individually; sled's background flushing is
//! sufficient for a monitoring history where losing the last few rows on
//! crash is acceptable.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use thiserror::Error;

use crate::types::SensorReading;

/// Separator between device id and timestamp in storage keys.
const KEY_SEP: u8 = 0x1f;

/// Error type for storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sled::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Append-only store of raw sensor samples, one keyspace per device.
#[derive(Clone)]
pub struct SampleStorage {
    db: Arc<sled::Db>,
    /// Disambiguates keys for samples stamped in the same millisecond.
    seq: Arc<AtomicU64>,
}

impl SampleStorage {
    /// Open or create the sample store at the specified path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let db = sled::open(path)?;
        Ok(Self {
            db: Arc::new(db),
            seq: Arc::new(AtomicU64::new(0)),
        })
    }

    fn key_for(device_id: &str, timestamp: u64, seq: u64) -> Vec<u8> {
        let mut key = Vec::with_capacity(device_id.len() + 1 + 16);
        key.extend_from_slice(device_id.as_bytes());
        key.push(KEY_SEP);
        key.extend_from_slice(&timestamp.to_be_bytes());
        key.extend_from_slice(&seq.to_be_bytes());
        key
    }

    fn prefix_for(device_id: &str) -> Vec<u8> {
        let mut prefix = Vec::with_capacity(device_id.len() + 1);
        prefix.extend_from_slice(device_id.as_bytes());
        prefix.push(KEY_SEP);
        prefix
    }

    /// Persist one reading. Never overwrites: samples sharing a timestamp
    /// get distinct sequence suffixes.
    pub fn store_sample(&self, reading: &SensorReading) -> Result<(), StorageError> {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        let key = Self::key_for(&reading.device_id, reading.timestamp, seq);
        let value = serde_json::to_vec(reading)?;
        self.db.insert(key, value)?;
        Ok(())
    }

    /// The most recent `limit` rows for a device, newest first.
    ///
    /// Fail-soft: any storage or decode error degrades to the rows read so
    /// far (possibly empty) rather than propagating.
    pub fn recent_for_device(&self, device_id: &str, limit: usize) -> Vec<SensorReading> {
        let mut rows = Vec::with_capacity(limit.min(64));

        for item in self.db.scan_prefix(Self::prefix_for(device_id)).rev() {
            if rows.len() >= limit {
                break;
            }
            match item {
                Ok((_key, value)) => match serde_json::from_slice::<SensorReading>(&value) {
                    Ok(reading) => rows.push(reading),
                    Err(e) => {
                        tracing::warn!(device = device_id, error = %e, "skipping undecodable row");
                    }
                },
                Err(e) => {
                    tracing::warn!(device = device_id, error = %e, "history scan aborted");
                    break;
                }
            }
        }

        rows
    }

    /// Total number of stored samples across all devices.
    pub fn count(&self) -> usize {
        self.db.len()
    }

    /// Database size on disk in bytes.
    pub fn size_bytes(&self) -> u64 {
        self.db.size_on_disk().unwrap_or(0)
    }

    /// Flush to disk. Used by tests and shutdown.
    pub fn flush(&self) -> Result<(), StorageError> {
        self.db.flush()?;
        Ok(())
    }
}

//! Brain configuration
//!
//! TOML-loadable configuration covering the ingestion broker, HTTP server,
//! storage location, and active compressor profile. Every field has a
//! built-in default so the service runs with no config file at all.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::defaults;
use crate::profiles::{self, CompressorProfile};

/// MQTT broker settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrokerConfig {
    pub host: String,
    pub port: u16,
    /// Topic root; the brain subscribes to `<topic_root>/+`.
    pub topic_root: String,
    /// MQTT client id.
    pub client_id: String,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            host: defaults::MQTT_DEFAULT_HOST.to_string(),
            port: defaults::MQTT_DEFAULT_PORT,
            topic_root: defaults::MQTT_TOPIC_ROOT.to_string(),
            client_id: "echocold-brain".to_string(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: defaults::DEFAULT_SERVER_ADDR.to_string(),
        }
    }
}

/// Raw sample storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: defaults::DEFAULT_DATA_DIR.to_string(),
        }
    }
}

/// Top-level brain configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrainConfig {
    /// Name of the active compressor profile (see [`crate::profiles`]).
    pub profile: String,
    pub broker: BrokerConfig,
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

impl Default for BrainConfig {
    fn default() -> Self {
        Self {
            profile: defaults::DEFAULT_PROFILE.to_string(),
            broker: BrokerConfig::default(),
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl BrainConfig {
    /// Load configuration using the standard precedence:
    ///
    /// 1. `ECHOCOLD_CONFIG` environment variable (path to TOML file)
    /// 2. `echocold.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Result<Self> {
        if let Ok(path) = std::env::var("ECHOCOLD_CONFIG") {
            return Self::from_file(&path)
                .with_context(|| format!("loading config from ECHOCOLD_CONFIG={}", path));
        }
        let cwd_file = Path::new("echocold.toml");
        if cwd_file.exists() {
            return Self::from_file(cwd_file).context("loading ./echocold.toml");
        }
        tracing::info!("no config file found, using built-in defaults");
        Ok(Self::default())
    }

    /// Parse a TOML config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&raw)?;
        Ok(config)
    }

    /// Resolve and validate the active profile.
    pub fn resolve_profile(&self) -> Result<&'static CompressorProfile> {
        let profile = profiles::by_name(&self.profile).with_context(|| {
            format!(
                "unknown compressor profile {:?} (available: {})",
                self.profile,
                profiles::names().join(", ")
            )
        })?;
        profile
            .validate()
            .with_context(|| format!("profile {:?} failed validation", self.profile))?;
        Ok(profile)
    }
}

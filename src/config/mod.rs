//! Configuration Module
//!
//! Provides process-wide configuration loaded from TOML, replacing hardcoded
//! broker addresses and profile selection with operator-tunable values.
//!
//! ## Loading Order
//!
//! 1. `ECHOCOLD_CONFIG` environment variable (path to TOML file)
//! 2. `echocold.toml` in the current working directory
//! 3. Built-in defaults
//!
//! ## Usage
//!
//! Call `config::init()` once at startup, then `config::get()` anywhere:
//!
//! ```ignore
//! // In main():
//! config::init(BrainConfig::load()?);
//!
//! // Anywhere in the codebase:
//! let addr = &config::get().server.addr;
//! ```

mod brain_config;
pub mod defaults;

pub use brain_config::*;

use std::sync::OnceLock;

/// Global brain configuration, initialized once at startup.
static BRAIN_CONFIG: OnceLock<BrainConfig> = OnceLock::new();

/// Initialize the global configuration.
///
/// Must be called exactly once before any calls to `get()`.
pub fn init(config: BrainConfig) {
    if BRAIN_CONFIG.set(config).is_err() {
        tracing::warn!("config::init() called more than once, ignoring");
    }
}

/// Get a reference to the global configuration.
///
/// Panics if `init()` has not been called. A missing config is a fatal
/// startup error, not a recoverable condition.
pub fn get() -> &'static BrainConfig {
    BRAIN_CONFIG
        .get()
        .expect("config::get() called before config::init(): startup bug")
}

/// Check whether the config has been initialized.
///
/// Useful for tests and optional config paths.
pub fn is_initialized() -> bool {
    BRAIN_CONFIG.get().is_some()
}

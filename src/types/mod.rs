//! Shared data structures for compressor health classification
//!
//! - `reading`: raw telemetry payloads and device-bound sensor readings
//! - `verdict`: health statuses, operating levels, and classification verdicts

mod reading;
mod verdict;

pub use reading::*;
pub use verdict::*;

//! Health verdict types

use serde::{Deserialize, Serialize};

/// Operating status assigned to a single reading.
///
/// Serialized values match the wire strings consumed by the dashboard,
/// so variant renames here are a breaking API change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    /// Immediate safety problem (overheat, stall, loose mounting)
    #[serde(rename = "CRITICAL FAILURE")]
    CriticalFailure,
    /// Performance degradation (gas leak, grinding noise)
    #[serde(rename = "WARNING")]
    Warning,
    /// Statistical anomaly in the vibration rhythm
    #[serde(rename = "AI WARNING")]
    AiWarning,
    /// Compressor is idle
    #[serde(rename = "STANDBY")]
    Standby,
    /// Accumulating the vibration window, no statistics yet
    #[serde(rename = "CALIBRATING")]
    Calibrating,
    /// Healthy, level transition in progress
    #[serde(rename = "OPTIMAL")]
    Optimal,
    /// Healthy, high-speed cooling
    #[serde(rename = "OPTIMAL (LEVEL 2)")]
    OptimalLevel2,
    /// Healthy, normal operation
    #[serde(rename = "OPTIMAL (LEVEL 1)")]
    OptimalLevel1,
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HealthStatus::CriticalFailure => "CRITICAL FAILURE",
            HealthStatus::Warning => "WARNING",
            HealthStatus::AiWarning => "AI WARNING",
            HealthStatus::Standby => "STANDBY",
            HealthStatus::Calibrating => "CALIBRATING",
            HealthStatus::Optimal => "OPTIMAL",
            HealthStatus::OptimalLevel2 => "OPTIMAL (LEVEL 2)",
            HealthStatus::OptimalLevel1 => "OPTIMAL (LEVEL 1)",
        };
        write!(f, "{}", s)
    }
}

/// Adaptive operating level inferred from the vibration window mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OperatingLevel {
    /// Compressor at rest (vibration below idle threshold)
    #[default]
    Idle,
    /// Level 1 - normal-speed cooling
    Low,
    /// Level 2 - high-speed cooling
    High,
}

impl std::fmt::Display for OperatingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperatingLevel::Idle => write!(f, "IDLE"),
            OperatingLevel::Low => write!(f, "LOW"),
            OperatingLevel::High => write!(f, "HIGH"),
        }
    }
}

/// Classification result for one sensor reading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    pub status: HealthStatus,
    /// Human-readable diagnosis
    pub message: String,
    /// Severity scalar, 0.0 (nominal) to 10.0 (catastrophic)
    pub fault_score: f64,
}

impl Verdict {
    pub fn new(status: HealthStatus, message: impl Into<String>, fault_score: f64) -> Self {
        Self {
            status,
            message: message.into(),
            fault_score,
        }
    }

    /// True for any verdict that should page the dashboard (score > 0).
    pub fn is_fault(&self) -> bool {
        self.fault_score > 0.0
    }
}

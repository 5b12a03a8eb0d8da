use crate::diagnostic::{Diagnostic, Statistics, Status};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The structured validation report written next to the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub schema: String,
    pub tool: ReportToolInfo,
    pub timestamp: DateTime<Utc>,

    #[serde(default)]
    pub fix_mode: bool,

    /// Dataset files that were loaded.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<String>,

    pub summary: ReportSummary,

    #[serde(default)]
    pub errors: Vec<Diagnostic>,

    #[serde(default)]
    pub warnings: Vec<Diagnostic>,

    #[serde(default)]
    pub fixes: Vec<Diagnostic>,

    pub statistics: Statistics,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportToolInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub status: Status,
    pub errors: u64,
    pub warnings: u64,
    pub fixes: u64,
}

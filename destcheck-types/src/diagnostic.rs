use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three diagnostic tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Blocking data-quality violation.
    Error,
    /// Advisory; never affects the verdict.
    Warning,
    /// A repair that was applied in fix mode.
    Fix,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Fix => "fix",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One Error, Warning or Fix record. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Id of the rule that produced this record.
    pub rule: String,
    pub message: String,
    /// City label (name, falling back to id).
    pub city: String,
    /// Context path inside the city record, e.g. `points_of_interest[2].cost[0].currency`.
    pub path: String,
    pub timestamp: DateTime<Utc>,

    /// Corrective action; set on fixes only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl Diagnostic {
    /// Identity of a diagnostic without its timestamp, for set comparisons across runs.
    pub fn key(&self) -> (String, String, String, String) {
        (
            self.rule.clone(),
            self.city.clone(),
            self.path.clone(),
            self.message.clone(),
        )
    }
}

/// Overall verdict of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Pass,
    Fail,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Running counters kept by the collector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub cities_processed: u64,
    pub pois_processed: u64,
    pub accommodations_processed: u64,
    pub total_errors: u64,
    pub total_warnings: u64,
    pub total_fixes: u64,
    /// Number of catalog rules the engine ran.
    #[serde(default)]
    pub rules_run: u64,
}

impl Statistics {
    pub fn count_for(&self, kind: DiagnosticKind) -> u64 {
        match kind {
            DiagnosticKind::Error => self.total_errors,
            DiagnosticKind::Warning => self.total_warnings,
            DiagnosticKind::Fix => self.total_fixes,
        }
    }
}

//! Report projection.
//!
//! The collector is the only source of counts. [`build_report`] copies its lists and
//! statistics verbatim and refuses to produce a report whose lists and counters
//! disagree.

use chrono::{DateTime, Utc};
use destcheck_domain::Collector;
use destcheck_types::diagnostic::DiagnosticKind;
use destcheck_types::report::{ReportSummary, ReportToolInfo, ValidationReport};
use destcheck_types::schema::DESTCHECK_REPORT_V1;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    #[error("{kind} count mismatch: {listed} listed but statistics say {counted}")]
    CountMismatch {
        kind: DiagnosticKind,
        listed: u64,
        counted: u64,
    },
}

/// Run facts the collector does not know.
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub tool: ReportToolInfo,
    pub timestamp: DateTime<Utc>,
    pub fix_mode: bool,
    pub inputs: Vec<String>,
}

pub fn build_report(
    collector: &Collector,
    ctx: ReportContext,
) -> Result<ValidationReport, ReportError> {
    let statistics = collector.statistics();
    for kind in [DiagnosticKind::Error, DiagnosticKind::Warning, DiagnosticKind::Fix] {
        let listed = collector.diagnostics(kind).len() as u64;
        let counted = statistics.count_for(kind);
        if listed != counted {
            return Err(ReportError::CountMismatch {
                kind,
                listed,
                counted,
            });
        }
    }

    Ok(ValidationReport {
        schema: DESTCHECK_REPORT_V1.to_string(),
        tool: ctx.tool,
        timestamp: ctx.timestamp,
        fix_mode: ctx.fix_mode,
        inputs: ctx.inputs,
        summary: ReportSummary {
            status: collector.status(),
            errors: statistics.total_errors,
            warnings: statistics.total_warnings,
            fixes: statistics.total_fixes,
        },
        errors: collector.errors().to_vec(),
        warnings: collector.warnings().to_vec(),
        fixes: collector.fixes().to_vec(),
        statistics,
    })
}

/// Re-check a report read back from disk: every list length matches its counter.
pub fn verify_counts(report: &ValidationReport) -> Result<(), ReportError> {
    let checks = [
        (DiagnosticKind::Error, report.errors.len(), report.summary.errors),
        (DiagnosticKind::Warning, report.warnings.len(), report.summary.warnings),
        (DiagnosticKind::Fix, report.fixes.len(), report.summary.fixes),
    ];
    for (kind, listed, counted) in checks {
        let listed = listed as u64;
        if listed != counted || counted != report.statistics.count_for(kind) {
            return Err(ReportError::CountMismatch {
                kind,
                listed,
                counted,
            });
        }
    }
    Ok(())
}

//! Rendering helpers (markdown and plain text) for human-readable artifacts.
//!
//! Both renderers are pure functions of the report; the same report always renders to
//! the same bytes.

use destcheck_types::diagnostic::{Diagnostic, DiagnosticKind};
use destcheck_types::report::ValidationReport;
use std::fmt::Write;

pub fn render_report_md(report: &ValidationReport) -> String {
    let mut out = String::new();
    out.push_str("# Destination dataset validation report\n\n");
    out.push_str(&format!("- Status: **{}**\n", report.summary.status));
    out.push_str(&format!("- Mode: {}\n", mode_label(report.fix_mode)));
    out.push_str(&format!("- Generated: {}\n", report.timestamp.to_rfc3339()));
    out.push_str(&format!(
        "- Tool: {} {}\n\n",
        report.tool.name, report.tool.version
    ));

    out.push_str("## Summary\n\n");
    out.push_str("| Category | Count |\n|---|---|\n");
    out.push_str(&format!("| Errors | {} |\n", report.summary.errors));
    out.push_str(&format!("| Warnings | {} |\n", report.summary.warnings));
    out.push_str(&format!("| Fixes | {} |\n\n", report.summary.fixes));

    let s = &report.statistics;
    out.push_str(&format!("- Cities processed: {}\n", s.cities_processed));
    out.push_str(&format!("- POIs processed: {}\n", s.pois_processed));
    out.push_str(&format!(
        "- Accommodations processed: {}\n",
        s.accommodations_processed
    ));
    out.push_str(&format!("- Rules run: {}\n\n", s.rules_run));

    if !report.inputs.is_empty() {
        out.push_str("## Inputs\n\n");
        for input in &report.inputs {
            out.push_str(&format!("- `{}`\n", input));
        }
        out.push('\n');
    }

    section_md(&mut out, "Errors", &report.errors, DiagnosticKind::Error);
    section_md(&mut out, "Warnings", &report.warnings, DiagnosticKind::Warning);
    section_md(&mut out, "Fixes", &report.fixes, DiagnosticKind::Fix);

    out
}

fn section_md(out: &mut String, title: &str, items: &[Diagnostic], kind: DiagnosticKind) {
    out.push_str(&format!("## {title}\n\n"));
    if items.is_empty() {
        out.push_str("_None found._\n\n");
        return;
    }

    for (i, d) in items.iter().enumerate() {
        out.push_str(&format!(
            "{}. **{}** `{}`: {} (`{}`)\n",
            i + 1,
            d.city,
            d.path,
            d.message,
            d.rule
        ));
        if kind == DiagnosticKind::Fix
            && let Some(action) = &d.action
        {
            out.push_str(&format!("   - Action: {action}\n"));
        }
    }
    out.push('\n');
}

/// Plain-text summary for the terminal.
pub fn render_console_summary(report: &ValidationReport) -> String {
    let mut out = String::new();
    let s = &report.statistics;

    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        "destcheck: {} ({} errors, {} warnings, {} fixes) [{}]",
        report.summary.status,
        report.summary.errors,
        report.summary.warnings,
        report.summary.fixes,
        mode_label(report.fix_mode)
    );
    let _ = writeln!(
        out,
        "processed {} cities, {} POIs, {} accommodations",
        s.cities_processed, s.pois_processed, s.accommodations_processed
    );

    for (title, items) in [
        ("Errors", &report.errors),
        ("Warnings", &report.warnings),
        ("Fixes", &report.fixes),
    ] {
        let _ = writeln!(out, "\n{title}:");
        if items.is_empty() {
            let _ = writeln!(out, "  (none)");
            continue;
        }
        for (i, d) in items.iter().enumerate() {
            let _ = write!(out, "  {}. [{}] {}: {}", i + 1, d.city, d.path, d.message);
            if let Some(action) = &d.action {
                let _ = write!(out, " -> {action}");
            }
            out.push('\n');
        }
    }

    out
}

fn mode_label(fix_mode: bool) -> &'static str {
    if fix_mode { "fix" } else { "report only" }
}

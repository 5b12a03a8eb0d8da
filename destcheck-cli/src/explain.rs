//! Rule explanations for the `destcheck explain` and `destcheck list-rules` commands.

use destcheck_domain::{builtin_rule_metas, RuleMeta, RuleScope, Severity};
use std::fmt::Write;

const RULE: &str =
    "--------------------------------------------------------------------------------";

/// Find a rule by id. Case-insensitive; `-` is accepted in place of `_`.
pub fn lookup_rule_query(query: &str) -> Option<&'static RuleMeta> {
    let normalized = query.trim().to_lowercase().replace('-', "_");
    builtin_rule_metas()
        .into_iter()
        .find(|meta| meta.id == normalized)
}

/// All rule ids in catalog order.
pub fn list_rule_ids() -> Vec<&'static str> {
    builtin_rule_metas().into_iter().map(|m| m.id).collect()
}

pub fn format_severity(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "Error",
        Severity::Warning => "Warning",
    }
}

pub fn severity_meaning(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => {
            "ERROR violations fail the run (exit code 2) unless fix mode repairs them.\n\
             Repaired violations are recorded as fixes instead."
        }
        Severity::Warning => {
            "WARNING findings are advisory and never change the verdict.\n\
             Run `destcheck validate --fix` to apply the repairs this rule knows."
        }
    }
}

fn scope_meaning(scope: RuleScope) -> &'static str {
    match scope {
        RuleScope::City => "Runs once per city record, independently of the others.",
        RuleScope::Dataset => "Runs once over the whole dataset after every city was checked.",
    }
}

/// Long-form explanation printed by `destcheck explain`.
pub fn render_explanation(meta: &RuleMeta) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", meta.title);
    let _ = writeln!(out, "{}", "=".repeat(meta.title.len()));
    let _ = writeln!(out);
    let _ = writeln!(out, "Rule ID:  {}", meta.id);
    let _ = writeln!(out, "Scope:    {}", meta.scope.as_str());
    let _ = writeln!(out, "Severity: {}", format_severity(meta.severity));
    let _ = writeln!(out, "Fixable:  {}", if meta.fixable { "yes" } else { "no" });
    let _ = writeln!(out);

    section(&mut out, "DESCRIPTION", meta.description);
    section(&mut out, "SCOPE", scope_meaning(meta.scope));
    section(
        &mut out,
        &format!("SEVERITY: {}", format_severity(meta.severity)),
        severity_meaning(meta.severity),
    );
    section(&mut out, "REMEDIATION GUIDANCE", meta.remediation);
    out
}

fn section(out: &mut String, heading: &str, body: &str) {
    let _ = writeln!(out, "{heading}");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "{body}");
    let _ = writeln!(out);
}

/// Table printed by `destcheck list-rules`.
pub fn render_rule_table() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Available rules:\n");
    let _ = writeln!(
        out,
        "  {:<22} {:<8} {:<8} {:<4} TITLE",
        "ID", "SCOPE", "SEVERITY", "FIX"
    );
    let _ = writeln!(
        out,
        "  {:<22} {:<8} {:<8} {:<4} -----",
        "--", "-----", "--------", "---"
    );
    for meta in builtin_rule_metas() {
        let _ = writeln!(
            out,
            "  {:<22} {:<8} {:<8} {:<4} {}",
            meta.id,
            meta.scope.as_str(),
            meta.severity,
            if meta.fixable { "yes" } else { "no" },
            meta.title
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Use 'destcheck explain <RULE_ID>' for details.");
    out
}

pub fn rule_json(meta: &RuleMeta) -> serde_json::Value {
    serde_json::json!({
        "id": meta.id,
        "title": meta.title,
        "scope": meta.scope.as_str(),
        "severity": meta.severity.to_string(),
        "fixable": meta.fixable,
    })
}

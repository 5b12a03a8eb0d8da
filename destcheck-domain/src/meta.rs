use crate::rules;
use std::fmt;

/// Where a rule looks: one city at a time, or the whole dataset after the per-city merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleScope {
    City,
    Dataset,
}

impl RuleScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::City => "city",
            Self::Dataset => "dataset",
        }
    }
}

/// How an unrepaired violation is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => f.write_str("error"),
            Self::Warning => f.write_str("warning"),
        }
    }
}

/// Declarative description of one catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMeta {
    pub id: &'static str,
    pub title: &'static str,
    pub scope: RuleScope,
    /// Highest severity the rule reports.
    pub severity: Severity,
    /// Whether fix mode repairs some of its violations.
    pub fixable: bool,
    pub description: &'static str,
    pub remediation: &'static str,
}

/// Every built-in rule, in catalog order.
pub fn builtin_rule_metas() -> Vec<&'static RuleMeta> {
    rules::builtin_city_rules()
        .iter()
        .map(|r| r.meta())
        .chain(rules::builtin_dataset_rules().iter().map(|r| r.meta()))
        .collect()
}

pub fn lookup_rule(id: &str) -> Option<&'static RuleMeta> {
    builtin_rule_metas().into_iter().find(|m| m.id == id)
}

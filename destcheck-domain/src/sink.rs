use crate::collector::Collector;
use crate::meta::Severity;
use chrono::Utc;
use destcheck_types::diagnostic::{Diagnostic, DiagnosticKind};

/// Per-city, per-rule handle through which a rule reports what it found.
pub struct RuleSink<'a> {
    collector: &'a mut Collector,
    rule: &'static str,
    city: &'a str,
    fix_mode: bool,
}

impl<'a> RuleSink<'a> {
    pub fn new(
        collector: &'a mut Collector,
        rule: &'static str,
        city: &'a str,
        fix_mode: bool,
    ) -> Self {
        Self {
            collector,
            rule,
            city,
            fix_mode,
        }
    }

    pub fn fix_mode(&self) -> bool {
        self.fix_mode
    }

    pub fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.push(DiagnosticKind::Error, path.into(), message.into(), None);
    }

    pub fn warning(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.push(DiagnosticKind::Warning, path.into(), message.into(), None);
    }

    pub fn report(
        &mut self,
        severity: Severity,
        path: impl Into<String>,
        message: impl Into<String>,
    ) {
        match severity {
            Severity::Error => self.error(path, message),
            Severity::Warning => self.warning(path, message),
        }
    }

    /// Record a fixable violation.
    ///
    /// In fix mode this records a Fix carrying `action` and returns `true`; the caller
    /// then applies the mutation. Otherwise the problem is reported at `severity` and
    /// the data must be left untouched.
    pub fn repair(
        &mut self,
        path: impl Into<String>,
        severity: Severity,
        problem: impl Into<String>,
        action: impl Into<String>,
    ) -> bool {
        if self.fix_mode {
            self.push(
                DiagnosticKind::Fix,
                path.into(),
                problem.into(),
                Some(action.into()),
            );
            true
        } else {
            self.report(severity, path, problem);
            false
        }
    }

    fn push(
        &mut self,
        kind: DiagnosticKind,
        path: String,
        message: String,
        action: Option<String>,
    ) {
        self.collector.record(
            kind,
            Diagnostic {
                rule: self.rule.to_string(),
                message,
                city: self.city.to_string(),
                path,
                timestamp: Utc::now(),
                action,
            },
        );
    }
}

/// Sink for dataset-scoped rules; each diagnostic names its own city.
pub struct DatasetSink<'a> {
    collector: &'a mut Collector,
    rule: &'static str,
}

impl<'a> DatasetSink<'a> {
    pub fn new(collector: &'a mut Collector, rule: &'static str) -> Self {
        Self { collector, rule }
    }

    pub fn error(&mut self, city: &str, path: impl Into<String>, message: impl Into<String>) {
        self.collector.record(
            DiagnosticKind::Error,
            Diagnostic {
                rule: self.rule.to_string(),
                message: message.into(),
                city: city.to_string(),
                path: path.into(),
                timestamp: Utc::now(),
                action: None,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repair_records_fix_only_in_fix_mode() {
        let mut c = Collector::new();
        let applied = RuleSink::new(&mut c, "r", "Goa", false).repair(
            "timezone",
            Severity::Error,
            "bad timezone",
            "set to Asia/Kolkata",
        );
        assert!(!applied);
        assert_eq!(c.errors().len(), 1);
        assert!(c.errors()[0].action.is_none());

        let mut c = Collector::new();
        let applied = RuleSink::new(&mut c, "r", "Goa", true).repair(
            "timezone",
            Severity::Error,
            "bad timezone",
            "set to Asia/Kolkata",
        );
        assert!(applied);
        assert!(c.errors().is_empty());
        assert_eq!(c.fixes()[0].action.as_deref(), Some("set to Asia/Kolkata"));
    }

    #[test]
    fn warning_severity_is_respected() {
        let mut c = Collector::new();
        RuleSink::new(&mut c, "r", "Goa", false).repair("p", Severity::Warning, "x", "y");
        assert_eq!(c.warnings().len(), 1);
        assert!(c.errors().is_empty());
    }
}

use destcheck_types::diagnostic::{Diagnostic, DiagnosticKind, Statistics, Status};

/// Accumulates diagnostics and the running statistics for one run.
///
/// Counters are only ever bumped by [`Collector::record`] and [`Collector::count_city`],
/// so `errors().len() == statistics().total_errors` holds at every point (likewise for
/// warnings and fixes). Workers each own a collector; [`Collector::merge`] folds them
/// together in city order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collector {
    errors: Vec<Diagnostic>,
    warnings: Vec<Diagnostic>,
    fixes: Vec<Diagnostic>,
    stats: Statistics,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, kind: DiagnosticKind, diagnostic: Diagnostic) {
        match kind {
            DiagnosticKind::Error => {
                self.errors.push(diagnostic);
                self.stats.total_errors += 1;
            }
            DiagnosticKind::Warning => {
                self.warnings.push(diagnostic);
                self.stats.total_warnings += 1;
            }
            DiagnosticKind::Fix => {
                self.fixes.push(diagnostic);
                self.stats.total_fixes += 1;
            }
        }
    }

    /// Count one processed city with its POIs and accommodations.
    pub fn count_city(&mut self, pois: usize, accommodations: usize) {
        self.stats.cities_processed += 1;
        self.stats.pois_processed += pois as u64;
        self.stats.accommodations_processed += accommodations as u64;
    }

    pub fn count_rules(&mut self, rules: usize) {
        self.stats.rules_run += rules as u64;
    }

    /// Append `other` after everything already collected.
    pub fn merge(&mut self, other: Collector) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.fixes.extend(other.fixes);

        self.stats.cities_processed += other.stats.cities_processed;
        self.stats.pois_processed += other.stats.pois_processed;
        self.stats.accommodations_processed += other.stats.accommodations_processed;
        self.stats.total_errors += other.stats.total_errors;
        self.stats.total_warnings += other.stats.total_warnings;
        self.stats.total_fixes += other.stats.total_fixes;
        self.stats.rules_run += other.stats.rules_run;
    }

    /// FAIL iff at least one error was recorded.
    pub fn status(&self) -> Status {
        if self.errors.is_empty() {
            Status::Pass
        } else {
            Status::Fail
        }
    }

    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    pub fn fixes(&self) -> &[Diagnostic] {
        &self.fixes
    }

    pub fn diagnostics(&self, kind: DiagnosticKind) -> &[Diagnostic] {
        match kind {
            DiagnosticKind::Error => &self.errors,
            DiagnosticKind::Warning => &self.warnings,
            DiagnosticKind::Fix => &self.fixes,
        }
    }

    pub fn statistics(&self) -> Statistics {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn diag(message: &str) -> Diagnostic {
        Diagnostic {
            rule: "test.rule".into(),
            message: message.into(),
            city: "Goa".into(),
            path: "name".into(),
            timestamp: Utc::now(),
            action: None,
        }
    }

    #[test]
    fn warnings_and_fixes_do_not_fail() {
        let mut c = Collector::new();
        c.record(DiagnosticKind::Warning, diag("w"));
        c.record(DiagnosticKind::Fix, diag("f"));
        assert_eq!(c.status(), Status::Pass);

        c.record(DiagnosticKind::Error, diag("e"));
        assert_eq!(c.status(), Status::Fail);
    }

    #[test]
    fn merge_keeps_counts_consistent() {
        let mut a = Collector::new();
        a.count_city(2, 1);
        a.record(DiagnosticKind::Error, diag("a"));

        let mut b = Collector::new();
        b.count_city(3, 0);
        b.record(DiagnosticKind::Error, diag("b"));
        b.record(DiagnosticKind::Warning, diag("c"));

        a.merge(b);
        let stats = a.statistics();
        assert_eq!(stats.cities_processed, 2);
        assert_eq!(stats.pois_processed, 5);
        assert_eq!(stats.accommodations_processed, 1);
        assert_eq!(a.errors().len() as u64, stats.total_errors);
        assert_eq!(a.warnings().len() as u64, stats.total_warnings);
        assert_eq!(a.errors()[0].message, "a");
        assert_eq!(a.errors()[1].message, "b");
    }
}

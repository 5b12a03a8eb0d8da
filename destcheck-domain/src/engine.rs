use crate::collector::Collector;
use crate::rules::{
    builtin_city_rules, builtin_dataset_rules, CityRule, DatasetRule, DatasetView,
    PrefixConventions,
};
use crate::sink::{DatasetSink, RuleSink};
use crate::uniqueness::{CityScope, UniquenessIndex};
use destcheck_types::dataset::City;
use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    /// Repair fixable violations in place instead of reporting them.
    pub fix_mode: bool,
    /// Run the per-city phase on the rayon pool.
    pub parallel: bool,
    /// Rule id globs; when non-empty only matching rules run.
    pub allow: Vec<String>,
    /// Rule id globs that never run. Deny wins over allow.
    pub deny: Vec<String>,
    /// POI id prefix overrides keyed by city id or name.
    pub poi_prefixes: BTreeMap<String, String>,
}

/// Runs the rule catalog over a loaded dataset.
///
/// A run has three phases: every city is checked on its own (sequentially or in
/// parallel), the per-city collectors and uniqueness scopes are merged in city order,
/// then the dataset rules run over the merged index. Sequential and parallel runs
/// produce the same diagnostics in the same order.
pub struct Engine {
    options: EngineOptions,
    conventions: PrefixConventions,
    city_rules: Vec<Box<dyn CityRule>>,
    dataset_rules: Vec<Box<dyn DatasetRule>>,
}

impl Engine {
    pub fn new(options: EngineOptions) -> Self {
        Self::with_rules(options, builtin_city_rules(), builtin_dataset_rules())
    }

    pub fn with_rules(
        options: EngineOptions,
        city_rules: Vec<Box<dyn CityRule>>,
        dataset_rules: Vec<Box<dyn DatasetRule>>,
    ) -> Self {
        let enabled = |id: &str| rule_enabled(id, &options.allow, &options.deny);
        let city_rules: Vec<_> = city_rules
            .into_iter()
            .filter(|r| enabled(r.meta().id))
            .collect();
        let dataset_rules: Vec<_> = dataset_rules
            .into_iter()
            .filter(|r| enabled(r.meta().id))
            .collect();

        Self {
            conventions: PrefixConventions::new(options.poi_prefixes.clone()),
            options,
            city_rules,
            dataset_rules,
        }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Ids of the rules that survived the allow/deny policy, in catalog order.
    pub fn rule_ids(&self) -> Vec<&'static str> {
        self.city_rules
            .iter()
            .map(|r| r.meta().id)
            .chain(self.dataset_rules.iter().map(|r| r.meta().id))
            .collect()
    }

    pub fn run(&self, cities: &mut [City]) -> Collector {
        info!(
            cities = cities.len(),
            rules = self.city_rules.len() + self.dataset_rules.len(),
            fix_mode = self.options.fix_mode,
            parallel = self.options.parallel,
            "validating dataset"
        );

        let labels: Vec<String> = cities.iter().map(City::label).collect();
        let check_city = |(ordinal, city): (usize, &mut City)| {
            self.check_city(ordinal, city, &labels[ordinal])
        };

        let locals: Vec<(Collector, CityScope)> = if self.options.parallel {
            cities.par_iter_mut().enumerate().map(check_city).collect()
        } else {
            cities.iter_mut().enumerate().map(check_city).collect()
        };

        let mut collector = Collector::new();
        let mut index = UniquenessIndex::new();
        for (local, scope) in locals {
            collector.merge(local);
            index.merge(&scope);
        }

        let view = DatasetView {
            cities: &*cities,
            labels: &labels,
            index: &index,
            conventions: &self.conventions,
        };
        for rule in &self.dataset_rules {
            debug!(rule = rule.meta().id, "running dataset rule");
            let mut sink = DatasetSink::new(&mut collector, rule.meta().id);
            rule.check(&view, &mut sink);
        }
        collector.count_rules(self.city_rules.len() + self.dataset_rules.len());

        let stats = collector.statistics();
        info!(
            status = %collector.status(),
            errors = stats.total_errors,
            warnings = stats.total_warnings,
            fixes = stats.total_fixes,
            "validation finished"
        );
        collector
    }

    fn check_city(&self, ordinal: usize, city: &mut City, label: &str) -> (Collector, CityScope) {
        let scope = CityScope::collect(ordinal, city);
        let mut collector = Collector::new();
        collector.count_city(city.pois().len(), city.accommodations().len());

        for rule in &self.city_rules {
            let mut sink =
                RuleSink::new(&mut collector, rule.meta().id, label, self.options.fix_mode);
            rule.check(city, &scope, &mut sink);
        }
        debug!(
            city = label,
            errors = collector.errors().len(),
            warnings = collector.warnings().len(),
            fixes = collector.fixes().len(),
            "city checked"
        );
        (collector, scope)
    }
}

fn rule_enabled(id: &str, allow: &[String], deny: &[String]) -> bool {
    if deny.iter().any(|p| glob_match(p, id)) {
        return false;
    }
    allow.is_empty() || allow.iter().any(|p| glob_match(p, id))
}

/// `*` matches any run of characters, `?` exactly one.
fn glob_match(pat: &str, text: &str) -> bool {
    let p = pat.as_bytes();
    let t = text.as_bytes();
    let mut dp = vec![vec![false; t.len() + 1]; p.len() + 1];
    dp[0][0] = true;

    for i in 1..=p.len() {
        if p[i - 1] == b'*' {
            dp[i][0] = dp[i - 1][0];
        }
    }

    for i in 1..=p.len() {
        for j in 1..=t.len() {
            dp[i][j] = match p[i - 1] {
                b'*' => dp[i - 1][j] || dp[i][j - 1],
                b'?' => dp[i - 1][j - 1],
                c => dp[i - 1][j - 1] && c == t[j - 1],
            };
        }
    }

    dp[p.len()][t.len()]
}

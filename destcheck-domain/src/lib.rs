//! Domain logic: run the rule catalog over a dataset and collect diagnostics.
//!
//! This crate owns *what* is wrong with a dataset and, in fix mode, applies the repairs
//! from `destcheck-fix`. Loading and persisting records is the `destcheck-dataset`
//! crate's job; rendering is `destcheck-report`/`destcheck-render`.

mod collector;
mod engine;
mod meta;
mod rules;
mod sink;
mod uniqueness;

pub use collector::Collector;
pub use engine::{Engine, EngineOptions};
pub use meta::{builtin_rule_metas, lookup_rule, RuleMeta, RuleScope, Severity};
pub use rules::{
    builtin_city_rules, builtin_dataset_rules, CityRule, DatasetRule, DatasetView,
    PrefixConventions,
};
pub use sink::{DatasetSink, RuleSink};
pub use uniqueness::{
    CityScope, CrossCityDuplicate, IdClass, LocalDuplicate, Occurrence, UniquenessIndex,
};

#![no_main]

//! Fuzz target for the rule engine.
//!
//! Runs every rule over arbitrary parsed datasets, in both modes, and checks that the
//! collector's counters agree with its lists.

use destcheck_domain::{Engine, EngineOptions};
use destcheck_types::dataset::City;
use destcheck_types::diagnostic::DiagnosticKind;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(mut cities) = serde_json::from_slice::<Vec<City>>(data) else {
        return;
    };

    for fix_mode in [false, true] {
        let engine = Engine::new(EngineOptions {
            fix_mode,
            ..EngineOptions::default()
        });
        let collector = engine.run(&mut cities);
        let stats = collector.statistics();
        for kind in [DiagnosticKind::Error, DiagnosticKind::Warning, DiagnosticKind::Fix] {
            assert_eq!(stats.count_for(kind), collector.diagnostics(kind).len() as u64);
        }
        assert_eq!(stats.cities_processed, cities.len() as u64);
    }
});

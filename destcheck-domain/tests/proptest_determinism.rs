//! Property tests for run-to-run determinism and fix-mode convergence.

use destcheck_domain::{Collector, Engine, EngineOptions};
use destcheck_types::dataset::City;
use destcheck_types::diagnostic::DiagnosticKind;
use proptest::prelude::*;
use serde_json::json;

fn arb_word() -> impl Strategy<Value = String> {
    prop::string::string_regex(r"[a-zA-Z]{1,8}( [a-zA-Z]{1,8}){0,2}").expect("valid regex")
}

fn arb_currency() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop::sample::select(vec!["INR", "inr", "USD", "XXX", "", " eur "]))
        .prop_map(|c| c.map(str::to_string))
}

fn arb_clock() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop::sample::select(vec![
        "06:00", "6:00", "9 am", "7:30 PM", "25:00", "noon", "18.45",
    ]))
    .prop_map(|c| c.map(str::to_string))
}

prop_compose! {
    fn arb_city(ordinal: usize)(
        name in arb_word(),
        timezone in prop::option::of(prop::sample::select(vec!["Asia/Kolkata", "asia/dubai", "IST"])),
        currency in arb_currency(),
        start in arb_clock(),
        end in arb_clock(),
        poi_ids in prop::collection::vec(prop::sample::select(vec!["GO1", "GO2", "PO1", "X"]), 0..4),
        hi in prop::option::of(prop::sample::select(vec!["", "हिंदी"])),
        category in prop::sample::select(vec!["beach", "Beach", "Casino"]),
        acc_category in prop::sample::select(vec!["LUXURY", "mid range", "budget", "hostel"]),
        amenities in prop::collection::vec(prop::sample::select(vec![" WiFi", "", "pool"]), 0..3),
        lat in -120.0f64..120.0,
    ) -> City {
        let pois: Vec<_> = poi_ids
            .iter()
            .map(|id| json!({
                "id": id,
                "name": {"en": name.to_lowercase(), "hi": hi},
                "category": category,
                "coordinates": {"latitude": lat, "longitude": 10.0},
                "cost": [{"amount": 10, "currency": currency}],
                "best_time_to_visit": {"start": start, "end": end},
            }))
            .collect();
        serde_json::from_value(json!({
            "id": format!("C{}", ordinal + 1),
            "name": name,
            "state": "goa",
            "country": "India",
            "timezone": timezone,
            "description": {"en": "Sun  and\nsea", "hi": hi},
            "points_of_interest": pois,
            "accommodations": [{"id": "H1", "category": acc_category, "amenities": amenities}],
        }))
        .expect("valid city")
    }
}

fn arb_dataset() -> impl Strategy<Value = Vec<City>> {
    (arb_city(0), arb_city(1), arb_city(2)).prop_map(|(a, b, c)| vec![a, b, c])
}

fn engine(fix_mode: bool, parallel: bool) -> Engine {
    Engine::new(EngineOptions {
        fix_mode,
        parallel,
        ..EngineOptions::default()
    })
}

fn keys(c: &Collector, kind: DiagnosticKind) -> Vec<(String, String, String, String)> {
    c.diagnostics(kind).iter().map(|d| d.key()).collect()
}

proptest! {
    #[test]
    fn report_only_runs_are_repeatable(cities in arb_dataset()) {
        let mut first_data = cities.clone();
        let mut second_data = cities.clone();
        let first = engine(false, false).run(&mut first_data);
        let second = engine(false, false).run(&mut second_data);

        prop_assert_eq!(keys(&first, DiagnosticKind::Error), keys(&second, DiagnosticKind::Error));
        prop_assert_eq!(keys(&first, DiagnosticKind::Warning), keys(&second, DiagnosticKind::Warning));
        prop_assert!(first.fixes().is_empty());
        prop_assert_eq!(first_data, cities);
    }

    #[test]
    fn parallel_matches_sequential(cities in arb_dataset(), fix_mode in any::<bool>()) {
        let mut seq_data = cities.clone();
        let mut par_data = cities;
        let seq = engine(fix_mode, false).run(&mut seq_data);
        let par = engine(fix_mode, true).run(&mut par_data);

        for kind in [DiagnosticKind::Error, DiagnosticKind::Warning, DiagnosticKind::Fix] {
            prop_assert_eq!(keys(&seq, kind), keys(&par, kind));
        }
        prop_assert_eq!(seq_data, par_data);
    }

    #[test]
    fn second_fix_pass_records_nothing(mut cities in arb_dataset()) {
        engine(true, false).run(&mut cities);
        let repaired = cities.clone();

        let second = engine(true, false).run(&mut cities);
        prop_assert!(second.fixes().is_empty());
        prop_assert_eq!(cities, repaired);
    }

    #[test]
    fn counters_match_lists(mut cities in arb_dataset(), fix_mode in any::<bool>()) {
        let out = engine(fix_mode, false).run(&mut cities);
        let stats = out.statistics();
        prop_assert_eq!(out.errors().len() as u64, stats.total_errors);
        prop_assert_eq!(out.warnings().len() as u64, stats.total_warnings);
        prop_assert_eq!(out.fixes().len() as u64, stats.total_fixes);
        prop_assert_eq!(stats.cities_processed, 3);
    }
}

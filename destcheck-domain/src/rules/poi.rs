use super::{check_coordinates, check_rating, negative, poi_path, CityRule};
use crate::meta::{RuleMeta, RuleScope, Severity};
use crate::sink::RuleSink;
use crate::uniqueness::{CityScope, IdClass};
use destcheck_fix::{normalize_clock, normalize_currency};
use destcheck_types::dataset::City;
use destcheck_types::vocab::{DEFAULT_VISIT_END, DEFAULT_VISIT_START};

static POI_FIELDS: RuleMeta = RuleMeta {
    id: "poi.fields",
    title: "POI identity, location, rating and cost",
    scope: RuleScope::City,
    severity: Severity::Error,
    fixable: true,
    description: "Every POI has an id that is unique within its city, valid coordinates, \
                  a rating in [0, 5] and cost entries with a non-negative amount in an \
                  allowed currency.",
    remediation: "Correct ids, coordinates, ratings and amounts by hand. Fix mode \
                  upper-cases known currency codes and replaces unknown ones with INR.",
};

pub(crate) struct PoiFields;

impl CityRule for PoiFields {
    fn meta(&self) -> &'static RuleMeta {
        &POI_FIELDS
    }

    fn check(&self, city: &mut City, scope: &CityScope, sink: &mut RuleSink<'_>) {
        for dup in scope.duplicates(IdClass::Poi) {
            sink.error(
                dup.path,
                format!(
                    "duplicate POI id '{}' within city (first declared at {})",
                    dup.id, dup.first_path
                ),
            );
        }

        for (i, poi) in city.pois_mut().iter_mut().enumerate() {
            let base = poi_path(i);
            if poi.id().trim().is_empty() {
                sink.error(format!("{base}.id"), "missing POI id");
            }

            check_coordinates(poi.coordinates.as_ref(), &base, sink);
            check_rating(poi.rating.as_ref(), format!("{base}.rating"), sink);

            for (j, entry) in poi.costs_mut().iter_mut().enumerate() {
                let path = format!("{base}.cost[{j}]");
                match &entry.amount {
                    None => sink.error(format!("{path}.amount"), "missing cost amount"),
                    Some(a) if negative(a) => {
                        sink.error(format!("{path}.amount"), format!("negative cost amount {a}"))
                    }
                    Some(_) => {}
                }

                let fixed = normalize_currency(entry.currency.as_deref());
                if entry.currency.as_deref() != Some(fixed.as_str()) {
                    let problem = match &entry.currency {
                        Some(c) => format!("currency '{c}' is not allowed"),
                        None => "missing currency".to_string(),
                    };
                    if sink.repair(
                        format!("{path}.currency"),
                        Severity::Error,
                        problem,
                        format!("set currency to {fixed}"),
                    ) {
                        entry.currency = Some(fixed);
                    }
                }
            }
        }
    }
}

static BEST_TIME: RuleMeta = RuleMeta {
    id: "poi.best_time",
    title: "Best time to visit",
    scope: RuleScope::City,
    severity: Severity::Error,
    fixable: true,
    description: "best_time_to_visit uses zero-padded 24-hour HH:MM times and starts \
                  strictly before it ends. Unreadable times fall back to 09:00 / 18:00.",
    remediation: "Fix mode rewrites the times to HH:MM. A window that still ends before \
                  it starts must be corrected by hand.",
};

pub(crate) struct BestTimeWindow;

impl CityRule for BestTimeWindow {
    fn meta(&self) -> &'static RuleMeta {
        &BEST_TIME
    }

    fn check(&self, city: &mut City, _scope: &CityScope, sink: &mut RuleSink<'_>) {
        for (i, poi) in city.pois_mut().iter_mut().enumerate() {
            let Some(window) = poi.best_time_to_visit.as_mut() else {
                continue;
            };
            let base = format!("{}.best_time_to_visit", poi_path(i));

            let start =
                normalize_time(&mut window.start, DEFAULT_VISIT_START, &base, "start", sink);
            let end = normalize_time(&mut window.end, DEFAULT_VISIT_END, &base, "end", sink);

            if start >= end {
                sink.error(
                    base,
                    format!("best time window starts at {start} but ends at {end}"),
                );
            }
        }
    }
}

/// Normalize one end of the window; returns the normalized value either way.
fn normalize_time(
    field: &mut Option<String>,
    default: &str,
    base: &str,
    which: &str,
    sink: &mut RuleSink<'_>,
) -> String {
    let fix = normalize_clock(field.as_deref(), default);
    if field.as_deref() == Some(fix.value.as_str()) {
        return fix.value;
    }

    let problem = match (field.as_deref(), fix.malformed) {
        (None, _) => format!("missing {which} time"),
        (Some(raw), true) => format!("malformed {which} time '{raw}'"),
        (Some(raw), false) => format!("{which} time '{raw}' is not HH:MM"),
    };
    if sink.repair(
        format!("{base}.{which}"),
        Severity::Warning,
        problem,
        format!("set {which} to {}", fix.value),
    ) {
        *field = Some(fix.value.clone());
    }
    fix.value
}

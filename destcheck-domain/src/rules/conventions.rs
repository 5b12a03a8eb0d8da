use super::{poi_path, DatasetRule, DatasetView};
use crate::meta::{RuleMeta, RuleScope, Severity};
use crate::sink::DatasetSink;
use crate::uniqueness::IdClass;
use regex::Regex;

static ID_CONVENTIONS: RuleMeta = RuleMeta {
    id: "id.conventions",
    title: "Dataset-wide identifier conventions",
    scope: RuleScope::Dataset,
    severity: Severity::Error,
    fixable: false,
    description: "City ids and names are unique across the dataset, POI and accommodation \
                  ids are not reused by another city, and every POI id starts with its \
                  city's prefix followed by digits (Goa -> GO1, GO2, ...).",
    remediation: "Rename the clashing id. Prefixes can be overridden per city under \
                  [conventions.poi_prefix] in destcheck.toml.",
};

pub(crate) struct IdConventions;

impl DatasetRule for IdConventions {
    fn meta(&self) -> &'static RuleMeta {
        &ID_CONVENTIONS
    }

    fn check(&self, view: &DatasetView<'_>, sink: &mut DatasetSink<'_>) {
        for class in [
            IdClass::CityId,
            IdClass::CityName,
            IdClass::Poi,
            IdClass::Accommodation,
        ] {
            for dup in view.index.cross_city_duplicates(class) {
                sink.error(
                    &dup.duplicate.city,
                    dup.duplicate.path,
                    format!(
                        "duplicate {} '{}' across cities (already used by {} at {})",
                        class.describe(),
                        dup.duplicate.spelling,
                        dup.first.city,
                        dup.first.path
                    ),
                );
            }
        }

        for (city, label) in view.cities.iter().zip(view.labels) {
            let Some(prefix) = view.conventions.prefix_for(city) else {
                tracing::debug!(city = %label, "no POI prefix convention for city");
                continue;
            };
            let pattern = match Regex::new(&format!("^{}\\d+$", regex::escape(&prefix))) {
                Ok(pattern) => pattern,
                Err(e) => {
                    tracing::warn!(
                        city = %label,
                        prefix = %prefix,
                        error = %e,
                        "skipping POI prefix convention: pattern does not compile"
                    );
                    continue;
                }
            };

            for (i, poi) in city.pois().iter().enumerate() {
                let id = poi.id().trim();
                if id.is_empty() || pattern.is_match(id) {
                    continue;
                }
                sink.error(
                    label,
                    format!("{}.id", poi_path(i)),
                    format!(
                        "POI id '{id}' in city '{label}' does not match the \
                         {prefix}<number> convention"
                    ),
                );
            }
        }
    }
}

use super::{accommodation_path, check_rating, negative, CityRule};
use crate::meta::{RuleMeta, RuleScope, Severity};
use crate::sink::RuleSink;
use crate::uniqueness::{CityScope, IdClass};
use destcheck_fix::{canonical_accommodation_category, normalize_amenities};
use destcheck_types::dataset::City;

static ACCOMMODATION_FIELDS: RuleMeta = RuleMeta {
    id: "accommodation.fields",
    title: "Accommodation identity, category, price and amenities",
    scope: RuleScope::City,
    severity: Severity::Error,
    fixable: true,
    description: "Accommodations have an id unique within the city, a category from \
                  luxury/mid-range/budget, a non-negative cost_per_night, a rating in \
                  [0, 5] and a clean amenities list.",
    remediation: "Fix mode lower-cases category spellings it recognizes and trims, \
                  lower-cases and de-blanks amenities. Prices and ratings need a manual fix.",
};

pub(crate) struct AccommodationFields;

impl CityRule for AccommodationFields {
    fn meta(&self) -> &'static RuleMeta {
        &ACCOMMODATION_FIELDS
    }

    fn check(&self, city: &mut City, scope: &CityScope, sink: &mut RuleSink<'_>) {
        for dup in scope.duplicates(IdClass::Accommodation) {
            sink.error(
                dup.path,
                format!(
                    "duplicate accommodation id '{}' within city (first declared at {})",
                    dup.id, dup.first_path
                ),
            );
        }

        for (i, acc) in city.accommodations_mut().iter_mut().enumerate() {
            let base = accommodation_path(i);
            if acc.id().trim().is_empty() {
                sink.error(format!("{base}.id"), "missing accommodation id");
            }

            match acc.category.as_deref() {
                None => sink.error(format!("{base}.category"), "missing accommodation category"),
                Some(raw) => match canonical_accommodation_category(raw) {
                    Some(canonical) if canonical == raw => {}
                    Some(canonical) => {
                        if sink.repair(
                            format!("{base}.category"),
                            Severity::Error,
                            format!("accommodation category '{raw}' is not in canonical form"),
                            format!("set category to {canonical}"),
                        ) {
                            acc.category = Some(canonical.to_string());
                        }
                    }
                    None => sink.error(
                        format!("{base}.category"),
                        format!("unknown accommodation category '{raw}'"),
                    ),
                },
            }

            match &acc.cost_per_night {
                None => sink.error(format!("{base}.cost_per_night"), "missing cost_per_night"),
                Some(c) if negative(c) => sink.error(
                    format!("{base}.cost_per_night"),
                    format!("negative cost_per_night {c}"),
                ),
                Some(_) => {}
            }

            check_rating(acc.rating.as_ref(), format!("{base}.rating"), sink);

            if let Some(amenities) = acc.amenities.as_mut() {
                let normalized = normalize_amenities(amenities);
                if *amenities != normalized
                    && sink.repair(
                        format!("{base}.amenities"),
                        Severity::Warning,
                        "amenities are not trimmed lower-case entries",
                        "normalized amenities",
                    )
                {
                    *amenities = normalized;
                }
            }
        }
    }
}

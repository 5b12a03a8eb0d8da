use super::{poi_path, CityRule};
use crate::meta::{RuleMeta, RuleScope, Severity};
use crate::sink::RuleSink;
use crate::uniqueness::CityScope;
use destcheck_fix::canonical_poi_category;
use destcheck_types::dataset::City;
use destcheck_types::vocab::{self, POI_SUBCATEGORIES, PREFERENCE_CATEGORIES};

static CATEGORIES: RuleMeta = RuleMeta {
    id: "categories",
    title: "POI category vocabularies",
    scope: RuleScope::City,
    severity: Severity::Error,
    fixable: true,
    description: "POI categories come from the closed category list. Subcategories and \
                  preference tags are checked against advisory lists.",
    remediation: "Fix mode rewrites a category that only differs in case to its title-case \
                  spelling. Unknown categories need a manual choice.",
};

pub(crate) struct PoiCategories;

impl CityRule for PoiCategories {
    fn meta(&self) -> &'static RuleMeta {
        &CATEGORIES
    }

    fn check(&self, city: &mut City, _scope: &CityScope, sink: &mut RuleSink<'_>) {
        for (i, poi) in city.pois_mut().iter_mut().enumerate() {
            let base = poi_path(i);

            match poi.category.as_deref() {
                None => sink.error(format!("{base}.category"), "missing POI category"),
                Some(raw) => match canonical_poi_category(raw) {
                    Some(canonical) if canonical == raw => {}
                    Some(canonical) => {
                        if sink.repair(
                            format!("{base}.category"),
                            Severity::Error,
                            format!("POI category '{raw}' is not in canonical form"),
                            format!("set category to {canonical}"),
                        ) {
                            poi.category = Some(canonical.to_string());
                        }
                    }
                    None => sink.error(
                        format!("{base}.category"),
                        format!("unknown POI category '{raw}'"),
                    ),
                },
            }

            if let Some(sub) = poi.subcategory.as_deref()
                && vocab::canonical(POI_SUBCATEGORIES, sub).is_none()
            {
                sink.warning(
                    format!("{base}.subcategory"),
                    format!("unknown POI subcategory '{sub}'"),
                );
            }

            for (j, tag) in poi.preference_categories.iter().flatten().enumerate() {
                if !vocab::contains(PREFERENCE_CATEGORIES, tag) {
                    sink.warning(
                        format!("{base}.preference_categories[{j}]"),
                        format!("unknown preference category '{tag}'"),
                    );
                }
            }
        }
    }
}

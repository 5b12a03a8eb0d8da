//! Two-level identifier membership.
//!
//! Each city builds a [`CityScope`] on its own worker; the engine then folds every scope
//! into one [`UniquenessIndex`] in city order before any cross-city rule runs. A repeat
//! inside one city is only ever a within-city duplicate; the global index reports an id
//! once per additional city that uses it.

use destcheck_types::dataset::City;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IdClass {
    CityId,
    CityName,
    Poi,
    Accommodation,
}

impl IdClass {
    pub fn describe(&self) -> &'static str {
        match self {
            Self::CityId => "city id",
            Self::CityName => "city name",
            Self::Poi => "POI id",
            Self::Accommodation => "accommodation id",
        }
    }
}

/// One sighting of an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    /// Position of the owning city in the loaded dataset.
    pub ordinal: usize,
    /// Label of the owning city.
    pub city: String,
    pub path: String,
    /// The identifier as written, before case folding.
    pub spelling: String,
}

/// An id repeated inside one city: `path` re-uses what `first_path` already declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalDuplicate {
    pub id: String,
    pub path: String,
    pub first_path: String,
}

/// An id that a later city re-uses after an earlier city declared it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossCityDuplicate {
    pub class: IdClass,
    pub id: String,
    pub first: Occurrence,
    pub duplicate: Occurrence,
}

/// Identifiers declared by a single city, in document order.
#[derive(Debug, Clone, Default)]
pub struct CityScope {
    ordinal: usize,
    city: String,
    entries: BTreeMap<IdClass, Vec<Entry>>,
}

#[derive(Debug, Clone)]
struct Entry {
    key: String,
    spelling: String,
    path: String,
}

impl CityScope {
    /// Snapshot the identifiers of `city`. Blank ids are skipped; the field rules report
    /// them as missing.
    pub fn collect(ordinal: usize, city: &City) -> Self {
        let mut scope = Self {
            ordinal,
            city: city.label(),
            entries: BTreeMap::new(),
        };

        scope.add(IdClass::CityId, city.id(), "id".to_string());
        scope.add(IdClass::CityName, city.name(), "name".to_string());

        for (i, poi) in city.pois().iter().enumerate() {
            scope.add(IdClass::Poi, poi.id(), format!("points_of_interest[{i}].id"));
        }
        for (i, acc) in city.accommodations().iter().enumerate() {
            scope.add(
                IdClass::Accommodation,
                acc.id(),
                format!("accommodations[{i}].id"),
            );
        }

        scope
    }

    fn add(&mut self, class: IdClass, id: &str, path: String) {
        let id = id.trim();
        if id.is_empty() {
            return;
        }
        let key = match class {
            IdClass::CityName => name_key(id),
            _ => id.to_string(),
        };
        self.entries.entry(class).or_default().push(Entry {
            key,
            spelling: id.to_string(),
            path,
        });
    }

    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    /// Every repeat of an id already seen earlier in this city.
    pub fn duplicates(&self, class: IdClass) -> Vec<LocalDuplicate> {
        let mut first_seen: BTreeMap<&str, &str> = BTreeMap::new();
        let mut out = Vec::new();
        for entry in self.entries.get(&class).into_iter().flatten() {
            match first_seen.get(entry.key.as_str()) {
                Some(first) => out.push(LocalDuplicate {
                    id: entry.spelling.clone(),
                    path: entry.path.clone(),
                    first_path: (*first).to_string(),
                }),
                None => {
                    first_seen.insert(&entry.key, &entry.path);
                }
            }
        }
        out
    }
}

/// Dataset-wide membership, built by merging every [`CityScope`].
#[derive(Debug, Clone, Default)]
pub struct UniquenessIndex {
    ids: BTreeMap<IdClass, BTreeMap<String, Vec<Occurrence>>>,
}

impl UniquenessIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one city's identifiers in. Callers merge in city order.
    pub fn merge(&mut self, scope: &CityScope) {
        for (class, entries) in &scope.entries {
            let by_id = self.ids.entry(*class).or_default();
            for entry in entries {
                by_id.entry(entry.key.clone()).or_default().push(Occurrence {
                    ordinal: scope.ordinal,
                    city: scope.city.clone(),
                    path: entry.path.clone(),
                    spelling: entry.spelling.clone(),
                });
            }
        }
    }

    pub fn occurrences(&self, class: IdClass, id: &str) -> &[Occurrence] {
        self.ids
            .get(&class)
            .and_then(|m| m.get(id))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Ids used by more than one city, one entry per city beyond the first owner.
    ///
    /// Sorted by the re-using city's position, then path.
    pub fn cross_city_duplicates(&self, class: IdClass) -> Vec<CrossCityDuplicate> {
        let mut out = Vec::new();
        for (id, occurrences) in self.ids.get(&class).into_iter().flatten() {
            let Some(first) = occurrences.first() else {
                continue;
            };
            let mut reported = vec![first.ordinal];
            for occ in &occurrences[1..] {
                if reported.contains(&occ.ordinal) {
                    continue;
                }
                reported.push(occ.ordinal);
                out.push(CrossCityDuplicate {
                    class,
                    id: id.clone(),
                    first: first.clone(),
                    duplicate: occ.clone(),
                });
            }
        }
        out.sort_by(|a, b| {
            (a.duplicate.ordinal, &a.duplicate.path, &a.id)
                .cmp(&(b.duplicate.ordinal, &b.duplicate.path, &b.id))
        });
        out
    }
}

/// City names compare case-insensitively.
fn name_key(name: &str) -> String {
    name.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use destcheck_types::dataset::Poi;

    fn city(id: &str, name: &str, pois: &[&str]) -> City {
        City {
            id: Some(id.into()),
            name: Some(name.into()),
            points_of_interest: Some(
                pois.iter()
                    .map(|p| Poi {
                        id: Some((*p).into()),
                        ..Poi::default()
                    })
                    .collect(),
            ),
            ..City::default()
        }
    }

    #[test]
    fn within_city_repeat_is_local_only() {
        let scope = CityScope::collect(0, &city("C1", "Goa", &["GO1", "GO1", "GO2"]));
        let dups = scope.duplicates(IdClass::Poi);
        assert_eq!(dups.len(), 1);
        assert_eq!(dups[0].path, "points_of_interest[1].id");
        assert_eq!(dups[0].first_path, "points_of_interest[0].id");

        let mut index = UniquenessIndex::new();
        index.merge(&scope);
        assert!(index.cross_city_duplicates(IdClass::Poi).is_empty());
    }

    #[test]
    fn reuse_across_cities_is_reported_once_per_city() {
        let a = CityScope::collect(0, &city("C1", "Goa", &["X1"]));
        let b = CityScope::collect(1, &city("C2", "Pune", &["X1", "X1"]));
        let mut index = UniquenessIndex::new();
        index.merge(&a);
        index.merge(&b);

        let dups = index.cross_city_duplicates(IdClass::Poi);
        assert_eq!(dups.len(), 1);
        assert_eq!(dups[0].first.city, "Goa");
        assert_eq!(dups[0].duplicate.city, "Pune");
        assert_eq!(index.occurrences(IdClass::Poi, "X1").len(), 3);
    }

    #[test]
    fn city_names_compare_case_insensitively() {
        let mut index = UniquenessIndex::new();
        index.merge(&CityScope::collect(0, &city("C1", "Goa", &[])));
        index.merge(&CityScope::collect(1, &city("C2", " goa ", &[])));
        let dups = index.cross_city_duplicates(IdClass::CityName);
        assert_eq!(dups.len(), 1);
        assert_eq!(dups[0].id, "goa");
        assert_eq!(dups[0].first.spelling, "Goa");
        assert_eq!(dups[0].duplicate.spelling, "goa");
    }

    #[test]
    fn blank_ids_are_not_indexed() {
        let scope = CityScope::collect(0, &city("", "", &["", " "]));
        assert!(scope.duplicates(IdClass::Poi).is_empty());
    }
}

//! The rule catalog.
//!
//! Each rule is a unit struct with a static [`RuleMeta`] and a `check` method. City rules
//! see one city (and may repair it in fix mode); dataset rules see every city plus the
//! merged [`UniquenessIndex`] and never mutate.

use crate::meta::RuleMeta;
use crate::sink::{DatasetSink, RuleSink};
use crate::uniqueness::{CityScope, UniquenessIndex};
use destcheck_types::dataset::{City, Coordinates};
use serde_json::Number;
use std::collections::BTreeMap;

mod accommodation;
mod categories;
mod city;
mod conventions;
mod poi;
mod text;
mod transport;

pub trait CityRule: Send + Sync {
    fn meta(&self) -> &'static RuleMeta;
    fn check(&self, city: &mut City, scope: &CityScope, sink: &mut RuleSink<'_>);
}

pub trait DatasetRule: Send + Sync {
    fn meta(&self) -> &'static RuleMeta;
    fn check(&self, view: &DatasetView<'_>, sink: &mut DatasetSink<'_>);
}

/// Read-only view handed to dataset rules once every city has been processed.
pub struct DatasetView<'a> {
    pub cities: &'a [City],
    /// City labels as they were before any repair, parallel to `cities`.
    pub labels: &'a [String],
    pub index: &'a UniquenessIndex,
    pub conventions: &'a PrefixConventions,
}

/// Expected POI id prefix per city.
///
/// Overrides are keyed by city id or city name (case-insensitive). Without one, the
/// prefix is the first two ASCII letters of the city name, upper-cased.
#[derive(Debug, Clone, Default)]
pub struct PrefixConventions {
    overrides: BTreeMap<String, String>,
}

impl PrefixConventions {
    pub fn new(overrides: BTreeMap<String, String>) -> Self {
        Self {
            overrides: overrides
                .into_iter()
                .map(|(k, v)| (k.trim().to_lowercase(), v.trim().to_string()))
                .collect(),
        }
    }

    pub fn prefix_for(&self, city: &City) -> Option<String> {
        let by_id = self.overrides.get(&city.id().trim().to_lowercase());
        let by_name = self.overrides.get(&city.name().trim().to_lowercase());
        if let Some(prefix) = by_id.or(by_name) {
            return Some(prefix.clone());
        }

        let letters: String = city
            .name()
            .chars()
            .filter(char::is_ascii_alphabetic)
            .take(2)
            .collect();
        (letters.len() == 2).then(|| letters.to_ascii_uppercase())
    }
}

pub fn builtin_city_rules() -> Vec<Box<dyn CityRule>> {
    vec![
        Box::new(city::CityFields),
        Box::new(city::GroupSizeBounds),
        Box::new(city::WeatherAlertShape),
        Box::new(poi::PoiFields),
        Box::new(poi::BestTimeWindow),
        Box::new(accommodation::AccommodationFields),
        Box::new(transport::TransportModes),
        Box::new(categories::PoiCategories),
        Box::new(text::Completeness),
        Box::new(text::DescriptionQuality),
        Box::new(text::Capitalization),
        Box::new(text::AiMlText),
    ]
}

pub fn builtin_dataset_rules() -> Vec<Box<dyn DatasetRule>> {
    vec![Box::new(conventions::IdConventions)]
}

fn is_blank(s: Option<&str>) -> bool {
    s.is_none_or(|v| v.trim().is_empty())
}

fn within(n: &Number, min: f64, max: f64) -> bool {
    n.as_f64().is_some_and(|v| (min..=max).contains(&v))
}

fn negative(n: &Number) -> bool {
    n.as_f64().is_some_and(|v| v < 0.0)
}

/// Coordinates must be present with latitude in [-90, 90] and longitude in [-180, 180].
fn check_coordinates(coords: Option<&Coordinates>, prefix: &str, sink: &mut RuleSink<'_>) {
    let path = join(prefix, "coordinates");
    let Some(coords) = coords else {
        sink.error(path, "missing coordinates");
        return;
    };

    match &coords.latitude {
        None => sink.error(join(&path, "latitude"), "missing latitude"),
        Some(lat) if !within(lat, -90.0, 90.0) => sink.error(
            join(&path, "latitude"),
            format!("latitude {lat} outside [-90, 90]"),
        ),
        Some(_) => {}
    }
    match &coords.longitude {
        None => sink.error(join(&path, "longitude"), "missing longitude"),
        Some(lon) if !within(lon, -180.0, 180.0) => sink.error(
            join(&path, "longitude"),
            format!("longitude {lon} outside [-180, 180]"),
        ),
        Some(_) => {}
    }
}

/// A rating, when given, lies in [0, 5].
fn check_rating(rating: Option<&Number>, path: String, sink: &mut RuleSink<'_>) {
    use destcheck_types::vocab::{RATING_MAX, RATING_MIN};
    if let Some(r) = rating
        && !within(r, RATING_MIN, RATING_MAX)
    {
        sink.error(path, format!("rating {r} outside [0, 5]"));
    }
}

fn join(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{prefix}.{field}")
    }
}

fn poi_path(i: usize) -> String {
    format!("points_of_interest[{i}]")
}

fn accommodation_path(i: usize) -> String {
    format!("accommodations[{i}]")
}

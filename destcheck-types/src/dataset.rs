//! Destination dataset records.
//!
//! Every field that a validator may complain about is optional at parse time: a missing
//! value is a diagnostic, not a load failure. Unknown keys are kept in `extra` so that
//! writing a record back preserves its shape.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::collections::BTreeMap;

/// Keys the typed model does not know about, preserved verbatim.
pub type ExtraFields = BTreeMap<String, Value>;

/// Top-level destination record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct City {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<BilingualText>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_size: Option<GroupSize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather_alert: Option<WeatherAlert>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points_of_interest: Option<Vec<Poi>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accommodations: Option<Vec<Accommodation>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport: Option<BTreeMap<String, TransportMode>>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl City {
    /// Human-facing label used in diagnostics: name, then id, then a placeholder.
    pub fn label(&self) -> String {
        if !self.name().trim().is_empty() {
            self.name().trim().to_string()
        } else if !self.id().trim().is_empty() {
            self.id().trim().to_string()
        } else {
            "<unnamed city>".to_string()
        }
    }

    /// City id, empty when the key is absent.
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }

    /// City name, empty when the key is absent.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn pois(&self) -> &[Poi] {
        self.points_of_interest.as_deref().unwrap_or(&[])
    }

    pub fn pois_mut(&mut self) -> &mut [Poi] {
        self.points_of_interest.as_deref_mut().unwrap_or(&mut [])
    }

    pub fn accommodations(&self) -> &[Accommodation] {
        self.accommodations.as_deref().unwrap_or(&[])
    }

    pub fn accommodations_mut(&mut self) -> &mut [Accommodation] {
        self.accommodations.as_deref_mut().unwrap_or(&mut [])
    }
}

/// Numbers are kept as written (`50` stays `50`, not `50.0`) so persisted records match
/// their input byte-for-byte in every field no fixer touched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<Number>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<Number>,
}

/// English/Hindi text pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BilingualText {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub en: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hi: Option<String>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl BilingualText {
    /// English text if present and non-blank.
    pub fn english(&self) -> Option<&str> {
        non_blank(self.en.as_deref())
    }

    /// Hindi text if present and non-blank.
    pub fn hindi(&self) -> Option<&str> {
        non_blank(self.hi.as_deref())
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupSize {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Number>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Number>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherAlert {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<BTreeMap<String, Value>>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Point of interest belonging to a city.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Poi {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<BilingualText>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<BilingualText>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Number>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<Vec<CostEntry>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preference_categories: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_time_to_visit: Option<TimeWindow>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Poi {
    /// POI id, empty when the key is absent.
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }

    pub fn costs(&self) -> &[CostEntry] {
        self.cost.as_deref().unwrap_or(&[])
    }

    pub fn costs_mut(&mut self) -> &mut [CostEntry] {
        self.cost.as_deref_mut().unwrap_or(&mut [])
    }

    /// English name if present and non-blank.
    pub fn english_name(&self) -> Option<&str> {
        self.name.as_ref().and_then(BilingualText::english)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Number>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Best-time-to-visit window, `HH:MM` 24-hour clock once normalized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Accommodation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<BilingualText>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_per_night: Option<Number>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Number>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Vec<String>>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Accommodation {
    /// Accommodation id, empty when the key is absent.
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }

    /// English name if present and non-blank.
    pub fn english_name(&self) -> Option<&str> {
        self.name.as_ref().and_then(BilingualText::english)
    }
}

/// One transport mode entry; either a daily rate or an average fare.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransportMode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_day: Option<Number>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_fare: Option<Number>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

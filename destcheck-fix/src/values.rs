use destcheck_types::vocab::{
    self, ACCOMMODATION_CATEGORIES, CURRENCIES, DEFAULT_CURRENCY, DEFAULT_TIMEZONE,
    POI_CATEGORIES, TIMEZONES,
};

/// Canonical currency code, or the default for missing/unknown codes.
pub fn normalize_currency(raw: Option<&str>) -> String {
    raw.and_then(|c| vocab::canonical(CURRENCIES, c))
        .unwrap_or(DEFAULT_CURRENCY)
        .to_string()
}

/// Canonical timezone spelling, or the default for missing/unknown zones.
pub fn normalize_timezone(raw: Option<&str>) -> String {
    raw.and_then(|tz| vocab::canonical(TIMEZONES, tz))
        .unwrap_or(DEFAULT_TIMEZONE)
        .to_string()
}

/// Lower-case and trim every amenity, dropping entries that end up empty.
pub fn normalize_amenities(amenities: &[String]) -> Vec<String> {
    amenities
        .iter()
        .map(|a| a.trim().to_lowercase())
        .filter(|a| !a.is_empty())
        .collect()
}

/// Map casing/separator variants (`Mid Range`, `MID_RANGE`, `midrange`) onto the closed
/// accommodation vocabulary. `None` means the value is not a category at all.
pub fn canonical_accommodation_category(raw: &str) -> Option<&'static str> {
    let key = raw.trim().to_lowercase().replace([' ', '_'], "-");
    ACCOMMODATION_CATEGORIES
        .iter()
        .copied()
        .find(|c| *c == key || c.replace('-', "") == key)
}

/// Title-case spelling of a POI category, if the value is one up to casing.
pub fn canonical_poi_category(raw: &str) -> Option<&'static str> {
    vocab::canonical(POI_CATEGORIES, raw)
}

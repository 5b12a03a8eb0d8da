//! Closed and advisory vocabularies shared by validators and fixers.

pub const DEFAULT_CURRENCY: &str = "INR";
pub const DEFAULT_TIMEZONE: &str = "Asia/Kolkata";
pub const DEFAULT_HINDI_TEXT: &str = "N/A";
pub const DEFAULT_VISIT_START: &str = "09:00";
pub const DEFAULT_VISIT_END: &str = "18:00";

pub const CURRENCIES: &[&str] = &["INR", "USD", "EUR", "GBP", "NPR", "AED"];

pub const TIMEZONES: &[&str] = &[
    "Asia/Kolkata",
    "Asia/Calcutta",
    "Asia/Kathmandu",
    "Asia/Thimphu",
    "Asia/Dhaka",
    "Asia/Colombo",
    "Indian/Maldives",
    "Asia/Dubai",
    "UTC",
];

pub const POI_CATEGORIES: &[&str] = &[
    "Historical",
    "Religious",
    "Nature",
    "Beach",
    "Adventure",
    "Cultural",
    "Museum",
    "Entertainment",
    "Shopping",
    "Food",
    "Wildlife",
    "Architecture",
    "Park",
    "Viewpoint",
];

/// Advisory: unknown subcategories are warnings.
pub const POI_SUBCATEGORIES: &[&str] = &[
    "Fort",
    "Palace",
    "Temple",
    "Church",
    "Mosque",
    "Gurudwara",
    "Monastery",
    "Monument",
    "Waterfall",
    "Lake",
    "Hill Station",
    "Garden",
    "National Park",
    "Wildlife Sanctuary",
    "Trek",
    "Water Sports",
    "Family Beach",
    "Secluded Beach",
    "Market",
    "Mall",
    "Street Food",
    "Restaurant",
    "Art Gallery",
    "Heritage Walk",
    "Festival",
    "Nightlife",
    "Amusement Park",
    "Sunset Point",
];

/// Advisory: unknown preference tags are warnings.
pub const PREFERENCE_CATEGORIES: &[&str] = &[
    "adventure",
    "culture",
    "relaxation",
    "nature",
    "food",
    "nightlife",
    "shopping",
    "history",
    "spiritual",
    "family",
    "photography",
    "wellness",
];

pub const ACCOMMODATION_CATEGORIES: &[&str] = &["luxury", "mid-range", "budget"];

/// Advisory: unknown transport modes are warnings.
pub const TRANSPORT_MODES: &[&str] = &[
    "taxi",
    "bus",
    "train",
    "metro",
    "auto_rickshaw",
    "ferry",
    "flight",
    "bike_rental",
    "car_rental",
    "cable_car",
];

pub const GROUP_SIZE_MIN: i64 = 1;
pub const GROUP_SIZE_MAX: i64 = 20;
pub const RATING_MIN: f64 = 0.0;
pub const RATING_MAX: f64 = 5.0;

pub const CITY_DESCRIPTION_MAX_CHARS: usize = 500;
pub const POI_DESCRIPTION_MAX_CHARS: usize = 300;
pub const EMBEDDING_MAX_CHARS: usize = 512;

/// Exact membership.
pub fn contains(vocab: &[&str], value: &str) -> bool {
    vocab.contains(&value)
}

/// Case-insensitive lookup returning the canonical spelling.
pub fn canonical(vocab: &[&'static str], value: &str) -> Option<&'static str> {
    let needle = value.trim();
    vocab
        .iter()
        .copied()
        .find(|entry| entry.eq_ignore_ascii_case(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_ignores_case_and_padding() {
        assert_eq!(canonical(POI_CATEGORIES, " beach "), Some("Beach"));
        assert_eq!(canonical(TIMEZONES, "asia/kolkata"), Some("Asia/Kolkata"));
        assert_eq!(canonical(CURRENCIES, "xxx"), None);
    }

    #[test]
    fn defaults_belong_to_their_vocabularies() {
        assert!(contains(CURRENCIES, DEFAULT_CURRENCY));
        assert!(contains(TIMEZONES, DEFAULT_TIMEZONE));
    }
}

#![no_main]

//! Fuzz target for the repair functions.
//!
//! Every fixer must be total and idempotent: applying it to its own output changes
//! nothing.

use destcheck_fix::{
    canonical_accommodation_category, canonical_poi_category, hindi_or_default,
    normalize_amenities, normalize_clock, normalize_currency, normalize_timezone,
    normalize_whitespace, title_case,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, arbitrary::Arbitrary)]
struct Input {
    text: String,
    amenities: Vec<String>,
}

fuzz_target!(|input: Input| {
    let s = input.text.as_str();

    let t = title_case(s);
    assert_eq!(title_case(&t), t);

    let w = normalize_whitespace(s);
    assert_eq!(normalize_whitespace(&w), w);

    let h = hindi_or_default(Some(s));
    assert_eq!(hindi_or_default(Some(&h)), h);

    let c = normalize_clock(Some(s), "09:00");
    assert_eq!(normalize_clock(Some(&c.value), "09:00").value, c.value);

    let cur = normalize_currency(Some(s));
    assert_eq!(normalize_currency(Some(&cur)), cur);

    let tz = normalize_timezone(Some(s));
    assert_eq!(normalize_timezone(Some(&tz)), tz);

    let a = normalize_amenities(&input.amenities);
    assert_eq!(normalize_amenities(&a), a);

    let _ = canonical_poi_category(s);
    let _ = canonical_accommodation_category(s);
});

#![no_main]

//! Fuzz target for dataset record parsing.
//!
//! Feeds arbitrary bytes to the `City` deserializer and checks that anything it
//! accepts survives a serialize/parse cycle unchanged.

use destcheck_types::dataset::City;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    let _ = serde_json::from_str::<Vec<City>>(s);
    let _ = serde_json::from_str::<destcheck_types::report::ValidationReport>(s);

    if let Ok(city) = serde_json::from_str::<City>(s) {
        let encoded = serde_json::to_string_pretty(&city).expect("city serializes");
        let again: City = serde_json::from_str(&encoded).expect("own output parses");
        assert_eq!(city, again);
    }
});

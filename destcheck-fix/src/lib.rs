//! Auto-fix transformer: the repair functions validators call in fix mode.
//!
//! Every function here is total, deterministic and idempotent: `f(f(x)) == f(x)`. A
//! validator compares the current value with the normalized one and only records a fix
//! when they differ, so a second fix-mode pass over repaired data records nothing.
//!
//! Numeric range violations (coordinates, ratings, costs, group sizes) have no safe
//! default and therefore no fixer.

mod text;
mod time;
mod values;

pub use text::{hindi_or_default, normalize_whitespace, title_case};
pub use time::{normalize_clock, ClockFix};
pub use values::{
    canonical_accommodation_category, canonical_poi_category, normalize_amenities,
    normalize_currency, normalize_timezone,
};

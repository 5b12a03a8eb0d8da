use regex::Regex;
use std::sync::LazyLock;

static CLOCK_24H: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})[:.](\d{2})(?::\d{2})?$").expect("valid regex")
});

static CLOCK_12H: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})(?:[:.](\d{2}))?\s*([AaPp])\.?\s*[Mm]\.?$").expect("valid regex")
});

/// Result of normalizing a clock value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockFix {
    /// Zero-padded 24-hour `HH:MM`.
    pub value: String,
    /// True when the input could not be read and `value` is the default.
    pub malformed: bool,
}

/// Normalize `9:30`, `9:30 pm`, `21.30` and `21:30:00` style clocks to `HH:MM`.
///
/// Unreadable or missing input maps to `default` with `malformed` set.
pub fn normalize_clock(raw: Option<&str>, default: &str) -> ClockFix {
    match raw.map(str::trim).and_then(parse_clock) {
        Some((h, m)) => ClockFix {
            value: format!("{h:02}:{m:02}"),
            malformed: false,
        },
        None => ClockFix {
            value: default.to_string(),
            malformed: true,
        },
    }
}

fn parse_clock(s: &str) -> Option<(u32, u32)> {
    if let Some(caps) = CLOCK_24H.captures(s) {
        let h: u32 = caps[1].parse().ok()?;
        let m: u32 = caps[2].parse().ok()?;
        return (h < 24 && m < 60).then_some((h, m));
    }

    let caps = CLOCK_12H.captures(s)?;
    let h: u32 = caps[1].parse().ok()?;
    let m: u32 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    if !(1..=12).contains(&h) || m >= 60 {
        return None;
    }
    let pm = caps[3].eq_ignore_ascii_case("p");
    let h = match (h, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, true) => h + 12,
        (h, false) => h,
    };
    Some((h, m))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(s: &str) -> ClockFix {
        normalize_clock(Some(s), "09:00")
    }

    #[test]
    fn pads_and_keeps_valid_24h() {
        assert_eq!(norm("9:30").value, "09:30");
        assert_eq!(norm("21.05").value, "21:05");
        assert_eq!(norm("06:00:00").value, "06:00");
        assert!(!norm("6:00").malformed);
    }

    #[test]
    fn converts_12h_clock() {
        assert_eq!(norm("9 am").value, "09:00");
        assert_eq!(norm("12 AM").value, "00:00");
        assert_eq!(norm("12:15 p.m.").value, "12:15");
        assert_eq!(norm("5:45PM").value, "17:45");
    }

    #[test]
    fn malformed_falls_back_to_default() {
        let fixed = norm("sunrise");
        assert_eq!(fixed.value, "09:00");
        assert!(fixed.malformed);

        assert!(norm("25:00").malformed);
        assert!(norm("13 pm").malformed);
        assert!(normalize_clock(None, "18:00").malformed);
        assert_eq!(normalize_clock(None, "18:00").value, "18:00");
    }
}

use super::{check_coordinates, CityRule};
use crate::meta::{RuleMeta, RuleScope, Severity};
use crate::sink::RuleSink;
use crate::uniqueness::CityScope;
use destcheck_fix::normalize_timezone;
use destcheck_types::dataset::City;
use destcheck_types::vocab::{GROUP_SIZE_MAX, GROUP_SIZE_MIN};
use regex::Regex;
use serde_json::{Number, Value};
use std::sync::LazyLock;

static CITY_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^C[1-9][0-9]*$").expect("valid regex"));

static CITY_FIELDS: RuleMeta = RuleMeta {
    id: "city.fields",
    title: "City identity, coordinates and timezone",
    scope: RuleScope::City,
    severity: Severity::Error,
    fixable: true,
    description: "City ids follow the `C<n>` pattern, coordinates lie within valid \
                  latitude/longitude ranges and the timezone belongs to the allow-list.",
    remediation: "Fix the id or coordinates by hand. Fix mode rewrites an unknown \
                  timezone to its canonical spelling or to Asia/Kolkata.",
};

pub(crate) struct CityFields;

impl CityRule for CityFields {
    fn meta(&self) -> &'static RuleMeta {
        &CITY_FIELDS
    }

    fn check(&self, city: &mut City, _scope: &CityScope, sink: &mut RuleSink<'_>) {
        let id = city.id().trim();
        if id.is_empty() {
            sink.error("id", "missing city id");
        } else if !CITY_ID.is_match(id) {
            sink.error("id", format!("city id '{id}' does not match C<number>"));
        }

        check_coordinates(city.coordinates.as_ref(), "", sink);

        let fixed = normalize_timezone(city.timezone.as_deref());
        if city.timezone.as_deref() != Some(fixed.as_str()) {
            let problem = match &city.timezone {
                Some(tz) => format!("timezone '{tz}' is not in the allow-list"),
                None => "missing timezone".to_string(),
            };
            if sink.repair(
                "timezone",
                Severity::Error,
                problem,
                format!("set timezone to {fixed}"),
            ) {
                city.timezone = Some(fixed);
            }
        }
    }
}

static GROUP_SIZE: RuleMeta = RuleMeta {
    id: "city.group_size",
    title: "Group size bounds",
    scope: RuleScope::City,
    severity: Severity::Error,
    fixable: false,
    description: "group_size.min and group_size.max are whole numbers between 1 and 20 \
                  with min <= max.",
    remediation: "Edit the group_size block; there is no safe default.",
};

pub(crate) struct GroupSizeBounds;

impl CityRule for GroupSizeBounds {
    fn meta(&self) -> &'static RuleMeta {
        &GROUP_SIZE
    }

    fn check(&self, city: &mut City, _scope: &CityScope, sink: &mut RuleSink<'_>) {
        let Some(group) = &city.group_size else {
            sink.error("group_size", "missing group_size");
            return;
        };

        let min = bound(group.min.as_ref(), "group_size.min", sink);
        let max = bound(group.max.as_ref(), "group_size.max", sink);
        if let (Some(min), Some(max)) = (min, max)
            && min > max
        {
            sink.error(
                "group_size",
                format!("group_size.min {min} is greater than group_size.max {max}"),
            );
        }
    }
}

fn bound(n: Option<&Number>, path: &str, sink: &mut RuleSink<'_>) -> Option<i64> {
    let Some(n) = n else {
        sink.error(path, format!("missing {path}"));
        return None;
    };
    match n.as_i64() {
        Some(v) if (GROUP_SIZE_MIN..=GROUP_SIZE_MAX).contains(&v) => Some(v),
        _ => {
            sink.error(
                path,
                format!("{path} {n} must be a whole number in {GROUP_SIZE_MIN}..={GROUP_SIZE_MAX}"),
            );
            None
        }
    }
}

static WEATHER_ALERT: RuleMeta = RuleMeta {
    id: "city.weather_alert",
    title: "Weather alert metadata",
    scope: RuleScope::City,
    severity: Severity::Error,
    fixable: false,
    description: "weather_alert lists at least one non-empty source and every threshold \
                  has a non-empty value.",
    remediation: "Add the alert sources and fill in the threshold values.",
};

pub(crate) struct WeatherAlertShape;

impl CityRule for WeatherAlertShape {
    fn meta(&self) -> &'static RuleMeta {
        &WEATHER_ALERT
    }

    fn check(&self, city: &mut City, _scope: &CityScope, sink: &mut RuleSink<'_>) {
        let Some(alert) = &city.weather_alert else {
            sink.error("weather_alert", "missing weather_alert");
            return;
        };

        match alert.sources.as_deref() {
            None | Some([]) => sink.error("weather_alert.sources", "no weather alert sources"),
            Some(sources) => {
                for (i, s) in sources.iter().enumerate() {
                    if s.trim().is_empty() {
                        sink.error(format!("weather_alert.sources[{i}]"), "blank alert source");
                    }
                }
            }
        }

        match &alert.thresholds {
            None => sink.error("weather_alert.thresholds", "missing weather alert thresholds"),
            Some(t) if t.is_empty() => {
                sink.error("weather_alert.thresholds", "no weather alert thresholds")
            }
            Some(t) => {
                for (key, value) in t {
                    if is_empty_value(value) {
                        sink.error(
                            format!("weather_alert.thresholds.{key}"),
                            format!("threshold '{key}' has no value"),
                        );
                    }
                }
            }
        }
    }
}

fn is_empty_value(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testkit::{city, paths, run};
    use serde_json::json;

    #[test]
    fn latitude_out_of_range_is_an_error() {
        let mut c = city(json!({
            "id": "C1", "name": "Goa", "timezone": "Asia/Kolkata",
            "coordinates": {"latitude": 95, "longitude": 10}
        }));
        let out = run(&CityFields, &mut c, false);
        assert_eq!(paths(&out), vec!["coordinates.latitude"]);
    }

    #[test]
    fn longitude_out_of_range_is_an_error() {
        let mut c = city(json!({
            "id": "C1", "name": "Goa", "timezone": "Asia/Kolkata",
            "coordinates": {"latitude": 10, "longitude": 200}
        }));
        let out = run(&CityFields, &mut c, false);
        assert_eq!(paths(&out), vec!["coordinates.longitude"]);
    }

    #[test]
    fn valid_city_is_clean() {
        let mut c = city(json!({
            "id": "C12", "name": "Goa", "timezone": "Asia/Kolkata",
            "coordinates": {"latitude": 45, "longitude": 90}
        }));
        let out = run(&CityFields, &mut c, false);
        assert!(out.errors().is_empty());
    }

    #[test]
    fn bad_id_is_reported() {
        let mut c = city(json!({
            "id": "C01", "name": "Goa", "timezone": "Asia/Kolkata",
            "coordinates": {"latitude": 1, "longitude": 1}
        }));
        let out = run(&CityFields, &mut c, false);
        assert_eq!(paths(&out), vec!["id"]);
    }

    #[test]
    fn timezone_is_repaired_in_fix_mode() {
        let mut c = city(json!({
            "id": "C1", "name": "Goa", "timezone": "asia/kolkata",
            "coordinates": {"latitude": 1, "longitude": 1}
        }));
        let out = run(&CityFields, &mut c, true);
        assert_eq!(out.fixes().len(), 1);
        assert_eq!(c.timezone.as_deref(), Some("Asia/Kolkata"));

        let again = run(&CityFields, &mut c, true);
        assert!(again.fixes().is_empty());
    }

    #[test]
    fn group_size_bounds() {
        let mut c = city(json!({"group_size": {"min": 0, "max": 25}}));
        let out = run(&GroupSizeBounds, &mut c, true);
        assert_eq!(paths(&out), vec!["group_size.min", "group_size.max"]);
        assert!(out.fixes().is_empty());

        let mut c = city(json!({"group_size": {"min": 10, "max": 4}}));
        assert_eq!(paths(&run(&GroupSizeBounds, &mut c, false)), vec!["group_size"]);

        let mut c = city(json!({"group_size": {"min": 1, "max": 20}}));
        assert!(run(&GroupSizeBounds, &mut c, false).errors().is_empty());
    }

    #[test]
    fn weather_alert_shape() {
        let mut c = city(json!({
            "weather_alert": {"sources": ["IMD", " "], "thresholds": {"rain_mm": 50, "heat": ""}}
        }));
        let out = run(&WeatherAlertShape, &mut c, false);
        assert_eq!(
            paths(&out),
            vec!["weather_alert.sources[1]", "weather_alert.thresholds.heat"]
        );

        let mut c = city(json!({"weather_alert": {"sources": []}}));
        let out = run(&WeatherAlertShape, &mut c, false);
        assert_eq!(out.errors().len(), 2);
    }
}

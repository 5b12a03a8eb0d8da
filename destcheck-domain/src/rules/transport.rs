use super::{negative, CityRule};
use crate::meta::{RuleMeta, RuleScope, Severity};
use crate::sink::RuleSink;
use crate::uniqueness::CityScope;
use destcheck_fix::normalize_currency;
use destcheck_types::dataset::City;
use destcheck_types::vocab::{self, TRANSPORT_MODES};

static TRANSPORT: RuleMeta = RuleMeta {
    id: "transport",
    title: "Transport modes and fares",
    scope: RuleScope::City,
    severity: Severity::Error,
    fixable: true,
    description: "Each transport mode carries a per_day rate or an average_fare, fares \
                  are non-negative and priced in an allowed currency. Unknown mode names \
                  and a missing transport block are advisory.",
    remediation: "Add the missing fare by hand. Fix mode replaces unknown currencies with INR.",
};

pub(crate) struct TransportModes;

impl CityRule for TransportModes {
    fn meta(&self) -> &'static RuleMeta {
        &TRANSPORT
    }

    fn check(&self, city: &mut City, _scope: &CityScope, sink: &mut RuleSink<'_>) {
        let Some(modes) = city.transport.as_mut() else {
            sink.warning("transport", "no transport information");
            return;
        };

        for (name, mode) in modes.iter_mut() {
            let base = format!("transport.{name}");
            if !vocab::contains(TRANSPORT_MODES, name) {
                sink.warning(base.clone(), format!("unknown transport mode '{name}'"));
            }

            if mode.per_day.is_none() && mode.average_fare.is_none() {
                sink.error(
                    base.clone(),
                    format!("transport mode '{name}' has no per_day or average_fare"),
                );
            }
            for (field, fare) in [
                ("per_day", &mode.per_day),
                ("average_fare", &mode.average_fare),
            ] {
                if let Some(f) = fare
                    && negative(f)
                {
                    sink.error(format!("{base}.{field}"), format!("negative {field} {f}"));
                }
            }

            let fixed = normalize_currency(mode.currency.as_deref());
            if mode.currency.as_deref() != Some(fixed.as_str()) {
                let problem = match &mode.currency {
                    Some(c) => format!("currency '{c}' is not allowed"),
                    None => "missing currency".to_string(),
                };
                if sink.repair(
                    format!("{base}.currency"),
                    Severity::Error,
                    problem,
                    format!("set currency to {fixed}"),
                ) {
                    mode.currency = Some(fixed);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testkit::{city, paths, run};
    use serde_json::json;

    #[test]
    fn missing_transport_is_advisory() {
        let mut c = city(json!({"id": "C1", "name": "Goa"}));
        let out = run(&TransportModes, &mut c, false);
        assert!(out.errors().is_empty());
        assert_eq!(out.warnings().len(), 1);
    }

    #[test]
    fn fares_and_currency() {
        let mut c = city(json!({"id": "C1", "name": "Goa", "transport": {
            "taxi": {"currency": "usd", "per_day": 2500},
            "bus": {"currency": "INR"},
            "hovercraft": {"currency": "INR", "average_fare": -3}
        }}));
        let out = run(&TransportModes, &mut c, false);
        assert_eq!(
            paths(&out),
            vec!["transport.bus", "transport.hovercraft.average_fare", "transport.taxi.currency"]
        );
        assert_eq!(out.warnings().len(), 1);

        let out = run(&TransportModes, &mut c, true);
        assert_eq!(out.fixes().len(), 1);
        let taxi = &c.transport.as_ref().expect("transport")["taxi"];
        assert_eq!(taxi.currency.as_deref(), Some("USD"));
    }
}

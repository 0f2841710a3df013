//! Property tests for validation, the cost comparator, the history ledger
//! and the built-in calculators.

use proptest::prelude::*;

use powercalc_core::economics::compare_costs;
use powercalc_core::history::{HistoryEntry, HistoryLedger};
use powercalc_core::registry;
use powercalc_core::schema::{FieldDefault, FieldKind, FieldSpec};
use powercalc_core::validation::{raw_inputs, validate, RawInputs, RawValue};
use powercalc_core::{ComputeOutcome, Engine, MetricValue, Outcome};

/// Map a unit fraction onto a field's valid range.
fn value_in_bounds(field: &FieldSpec, fraction: f64) -> f64 {
    let min = field.min.unwrap_or(0.0);
    let max = field.max.unwrap_or(min + 10_000.0);
    (min + (max - min) * fraction).clamp(min, max)
}

/// Every min-only field at its minimum; everything else at its default or lower bound.
fn boundary_raw(fields: &[FieldSpec]) -> RawInputs {
    let mut raw = RawInputs::new();
    for field in fields {
        let value = match (&field.kind, field.min, field.max, &field.default) {
            (FieldKind::Number, Some(min), None, _) => RawValue::from(min),
            (_, _, _, Some(FieldDefault::Number(n))) => RawValue::from(*n),
            (_, _, _, Some(FieldDefault::Choice(c))) => RawValue::from(c.as_str()),
            (FieldKind::Choice { options }, ..) => RawValue::from(options[0].as_str()),
            (FieldKind::Number, min, _, None) => RawValue::from(min.unwrap_or(0.0)),
        };
        raw.insert(field.name.clone(), value);
    }
    raw
}

fn diesel_raw(pload: f64) -> RawInputs {
    raw_inputs([("pload", pload), ("prated", 500.0), ("alpha", 0.25), ("beta", 2.0), ("fuelVol", 100.0)])
}

/// Raw values that pass validation for every field of a domain.
fn valid_raw(fields: &[FieldSpec], fractions: &[f64]) -> RawInputs {
    let mut raw = RawInputs::new();
    for (field, fraction) in fields.iter().zip(fractions.iter().cycle()) {
        let value = match &field.kind {
            FieldKind::Number => RawValue::from(value_in_bounds(field, *fraction)),
            FieldKind::Choice { options } => {
                let index = ((*fraction * options.len() as f64) as usize).min(options.len() - 1);
                RawValue::from(options[index].as_str())
            }
        };
        raw.insert(field.name.clone(), value);
    }
    raw
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: a bounded field accepts exactly the values inside its range.
    #[test]
    fn property_validation_enforces_bounds(value in -1_000.0f64..1_000.0) {
        let fields = vec![FieldSpec::number("x", "X").range(-10.0, 10.0).required()];
        let report = validate(&fields, &raw_inputs([("x", value)]));

        if (-10.0..=10.0).contains(&value) {
            prop_assert!(report.is_valid());
            prop_assert_eq!(report.parsed.number("x"), Some(value));
        } else {
            prop_assert!(report.parsed.number("x").is_none());
            let expected = if value < -10.0 { ">= -10" } else { "<= 10" };
            prop_assert_eq!(report.errors.get("x").map(String::as_str), Some(expected));
        }
    }

    /// PROPERTY: validation never panics and never fills a required field.
    #[test]
    fn property_validation_never_defaults_required(text in ".{0,24}") {
        let fields = vec![FieldSpec::number("x", "X").default_number(5.0).required()];
        let report = validate(&fields, &raw_inputs([("x", text.as_str())]));
        if !report.is_valid() {
            prop_assert_eq!(report.errors.get("x").map(String::as_str), Some("Required"));
            prop_assert!(report.parsed.number("x").is_none());
        }
    }

    /// PROPERTY: comparator outputs are never negative and payback is 0 when not viable.
    #[test]
    fn property_comparator_is_total(
        a in 0.0f64..1e7,
        b in 0.0f64..1e7,
        switching in 0.0f64..1e7,
    ) {
        let result = compare_costs(a, b, switching);
        prop_assert!(result.annual_savings >= 0.0);
        prop_assert!(result.payback_period_years >= 0.0);
        prop_assert!(result.ten_year_savings >= 0.0);
        prop_assert!((result.annual_savings - (a - b).max(0.0)).abs() < 1e-6);
        if b >= a || switching == 0.0 {
            prop_assert_eq!(result.payback_period_years, 0.0);
        }
    }

    /// PROPERTY: the ledger never holds more than its capacity.
    #[test]
    fn property_ledger_is_bounded(capacity in 1usize..20, appends in 0usize..50) {
        let ledger = HistoryLedger::with_capacity(capacity);
        for n in 0..appends {
            ledger.record(HistoryEntry::new("d", RawInputs::new(), Outcome::new().with("n", n as f64)));
        }
        prop_assert_eq!(ledger.len(), appends.min(capacity));
        if appends > 0 {
            let newest = ledger.recent(1);
            prop_assert_eq!(newest[0].outputs.number("n"), Some((appends - 1) as f64));
        }
    }

    /// PROPERTY: diesel fuel burn never falls as the load rises.
    #[test]
    fn property_diesel_fuel_monotonic_in_load(low in 1.0f64..500.0, step in 0.0f64..500.0) {
        let engine = Engine::new();
        let fuel = |pload: f64| {
            engine
                .compute("diesel-fuel", &diesel_raw(pload))
                .ok()
                .and_then(|outcome| outcome.result().and_then(|r| r.number("Fuel consumption (L/h)")))
        };
        let (at_low, at_high) = (fuel(low), fuel(low + step));
        prop_assert!(at_low.is_some() && at_high.is_some());
        prop_assert!(at_high >= at_low);
    }

    /// PROPERTY: computing twice with the same input gives the same outcome.
    #[test]
    fn property_compute_is_idempotent(
        index in 0usize..64,
        fractions in proptest::collection::vec(0.0f64..=1.0, 1..12),
    ) {
        let registry = registry::builtin();
        let domain = &registry.descriptors()[index % registry.len()];
        let raw = valid_raw(&domain.inputs, &fractions);

        let engine = Engine::new();
        let first = engine.compute(domain.id, &raw).ok();
        let second = engine.compute(domain.id, &raw).ok();
        prop_assert!(first.is_some());
        prop_assert_eq!(first, second);
    }

    /// PROPERTY: every built-in domain computes on any input its schema accepts,
    /// and no metric is NaN.
    #[test]
    fn property_builtin_domains_are_total(
        index in 0usize..64,
        fractions in proptest::collection::vec(0.0f64..=1.0, 1..12),
    ) {
        let registry = registry::builtin();
        let domain = &registry.descriptors()[index % registry.len()];
        let raw = valid_raw(&domain.inputs, &fractions);

        let engine = Engine::new();
        let outcome = engine.compute(domain.id, &raw);
        prop_assert!(outcome.is_ok(), "{} failed: {:?}", domain.id, outcome);

        match outcome.unwrap() {
            ComputeOutcome::Computed { result } => {
                for metric in result.metrics() {
                    if let MetricValue::Number(n) = metric.value {
                        prop_assert!(!n.is_nan(), "{}: {} is NaN", domain.id, metric.label);
                    }
                }
            }
            ComputeOutcome::Rejected { errors } => {
                prop_assert!(false, "{} rejected valid input: {:?}", domain.id, errors);
            }
        }
    }
}

#[test]
fn boundary_inputs_give_non_negative_metrics() {
    let engine = Engine::new();
    for domain in registry::builtin().descriptors() {
        let raw = boundary_raw(&domain.inputs);
        let outcome = engine.compute(domain.id, &raw).unwrap();
        let result = match outcome.result() {
            Some(result) => result,
            None => panic!("{} rejected boundary input: {:?}", domain.id, outcome.errors()),
        };
        for metric in result.metrics() {
            if let Some(n) = metric.value.as_number() {
                assert!(n >= 0.0, "{}: {} = {}", domain.id, metric.label, n);
            }
        }
    }
}

#[test]
fn zero_length_cycle_gives_zero_throughput() {
    let engine = Engine::new();
    let raw = raw_inputs([("t1", 0.0), ("t2", 0.0), ("t3", 0.0), ("busy", 0.0)]);
    let outcome = engine.compute("automation-throughput", &raw).unwrap();
    let result = outcome.result().unwrap();
    assert_eq!(result.number("Throughput (units/h)"), Some(0.0));
    assert_eq!(result.number("Utilization (ratio)"), Some(0.0));
}

#[test]
fn zero_time_base_gives_zero_rates() {
    let engine = Engine::new();
    let raw = raw_inputs([("reported", 1.0), ("resolved", 0.0), ("sumTime", 0.0)]);
    let outcome = engine.compute("diagnostics-resolution", &raw).unwrap();
    let result = outcome.result().unwrap();
    assert_eq!(result.number("Resolution rate (ratio)"), Some(0.0));
    assert_eq!(result.number("Avg time to resolve (h)"), Some(0.0));
}

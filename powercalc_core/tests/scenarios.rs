//! End-to-end scenarios driven through the engine with raw form values.

use powercalc_core::projection::{flatten, ChartKind};
use powercalc_core::validation::raw_inputs;
use powercalc_core::{CalcError, Engine, Outcome, RawInputs};

fn computed(engine: &Engine, domain: &str, raw: &RawInputs) -> Outcome {
    let outcome = engine.compute(domain, raw).unwrap();
    match outcome.result() {
        Some(result) => result.clone(),
        None => panic!("{} rejected: {:?}", domain, outcome.errors()),
    }
}

fn assert_close(actual: Option<f64>, expected: f64, tolerance: f64) {
    let actual = actual.expect("metric missing");
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} +/- {}, got {}",
        expected,
        tolerance,
        actual
    );
}

#[test]
fn solar_sizing_reference() {
    let engine = Engine::new();
    let raw = raw_inputs([
        ("panels", "10"),
        ("panelW", "300"),
        ("psh", "5.5"),
        ("eff", "0.8"),
        ("autonomy", "1"),
        ("vdc", "48"),
        ("dod", "0.5"),
        ("peakLoad", "2000"),
        ("sf", "1.25"),
    ]);
    let result = computed(&engine, "solar-sizing", &raw);
    assert_close(result.number("Array power (W)"), 3000.0, 1e-9);
    assert_close(result.number("Daily energy (Wh/day)"), 13_200.0, 1e-6);
    assert_close(result.number("Battery capacity (Ah)"), 550.0, 1e-6);
    assert_close(result.number("Inverter size (W)"), 2500.0, 1e-9);
}

#[test]
fn diesel_fuel_reference() {
    let engine = Engine::new();
    let raw = raw_inputs([
        ("pload", "75"),
        ("prated", "100"),
        ("alpha", "0.25"),
        ("beta", "0"),
        ("fuelVol", "100"),
    ]);
    let result = computed(&engine, "diesel-fuel", &raw);
    assert_close(result.number("Load factor (ratio)"), 0.75, 1e-12);
    assert_close(result.number("Fuel consumption (L/h)"), 18.75, 1e-12);
    assert_close(result.number("Runtime (h)"), 5.333, 1e-3);
}

#[test]
fn ups_runtime_reference() {
    let engine = Engine::new();
    let raw = raw_inputs([("vbat", "48"), ("capAh", "100"), ("eff", "0.9"), ("pload", "500"), ("pf", "0.9")]);
    let result = computed(&engine, "ups-runtime", &raw);
    assert_close(result.number("Stored energy (Wh)"), 4800.0, 1e-9);
    assert_close(result.number("UPS runtime (min)"), 518.4, 1e-6);
    assert_close(result.number("Apparent power (VA)"), 555.6, 0.05);
}

#[test]
fn water_economics_reference() {
    let engine = Engine::new();
    let raw = raw_inputs([
        ("countyRate", "120"),
        ("monthlyUsage", "1000"),
        ("reliability", "80"),
        ("drillingCost", "1500000"),
        ("annualMaintenance", "50000"),
        ("waterQuality", "good"),
    ]);
    let result = computed(&engine, "water-source-economics", &raw);
    assert_close(result.number("Borehole annual cost"), 150_000.0, 1e-6);
    let payback = result.number("Payback period (years)").unwrap();
    assert!(payback > 0.0, "borehole should pay back");
}

#[test]
fn structural_beam_through_engine() {
    let engine = Engine::new();
    let raw = raw_inputs([("liveLoad", "10"), ("deadLoad", "5"), ("span", "6")]);
    let result = computed(&engine, "structural-beam-sizing", &raw);
    assert_close(result.number("Bending moment (kN·m)"), 101.25, 1e-9);
    assert_eq!(result.text("Material"), Some("steel"));
    assert_eq!(result.text("Recommended section"), Some("UB 203x133x25"));
}

#[test]
fn import_vs_local_through_engine() {
    let engine = Engine::new();
    let raw = raw_inputs([("itemCost", "10000"), ("currency", "USD")]);
    let result = computed(&engine, "import-vs-local", &raw);
    assert_close(result.number("Landed import cost"), 2_175_000.0, 1e-6);
    assert_close(result.number("Savings (%)"), 37.5, 1e-9);
}

#[test]
fn solar_payback_verdict() {
    let engine = Engine::new();
    let raw = raw_inputs([("monthlyBill", "20000"), ("systemCost", "1000000")]);
    let result = computed(&engine, "solar-payback", &raw);
    // 1M / (240k - 84k) = 6.41 years
    assert_eq!(result.number("Payback period (years)"), Some(6.4));
    assert_eq!(result.text("Verdict"), Some("Good investment"));
}

#[test]
fn ups_sizing_recommendation() {
    let engine = Engine::new();
    let raw = raw_inputs([("watts", "2000"), ("batteryAh", "100")]);
    let result = computed(&engine, "ups-sizing", &raw);
    assert_eq!(result.text("Recommended UPS"), Some("3kVA Line-Interactive"));
    assert_eq!(result.text("Redundancy"), Some("N+1"));
}

#[test]
fn power_factor_correction_through_engine() {
    let engine = Engine::new();
    let raw = raw_inputs([("demand", "500"), ("pf", "0.75"), ("bill", "100000")]);
    let result = computed(&engine, "power-factor-correction", &raw);
    assert_close(result.number("Capacitor bank (kVAR)"), 276.6165, 1e-3);
    assert_close(result.number("Transformer rating (kVA)"), 425.0, 1e-9);
}

#[test]
fn controls_without_alarms_flattens_to_infinity() {
    let engine = Engine::new();
    let raw = raw_inputs([("alarms", "0"), ("timeH", "720"), ("startsOK", "9"), ("startsTot", "10")]);
    let result = computed(&engine, "controls-reliability", &raw);
    let json = flatten(&result);
    assert_eq!(json["MTBF (h)"], "Infinity");
    assert_eq!(json["Alarm rate (per h)"], 0.0);
}

#[test]
fn rejected_input_reports_every_bad_field() {
    let engine = Engine::new();
    let raw = raw_inputs([("panels", "0"), ("panelW", "abc"), ("psh", "12")]);
    let outcome = engine.compute("solar-sizing", &raw).unwrap();
    let errors = outcome.errors().unwrap();
    assert_eq!(errors["panels"], ">= 1");
    assert_eq!(errors["panelW"], "Required");
    assert_eq!(errors["psh"], "<= 9");
    assert!(engine.history(10).is_empty());
}

#[test]
fn cooling_load_office_reference() {
    let engine = Engine::new();
    let raw = raw_inputs([("length", "5"), ("width", "4")]);
    let result = computed(&engine, "ac-cooling-load", &raw);
    assert_close(result.number("Design load (BTU/h)"), 36_787.56, 0.01);
    assert_close(result.number("Recommended unit (BTU/h)"), 48_000.0, 1e-9);
    assert_close(result.number("Units needed"), 2.0, 1e-9);
    assert_close(result.number("Monthly running cost"), 14_702.48, 0.01);
    assert_close(result.number("Total cost"), 331_200.0, 1e-6);
}

#[test]
fn unreadable_optional_value_is_rejected() {
    let engine = Engine::new();
    let raw = raw_inputs([("length", "5"), ("width", "4"), ("humidity", "sixty")]);
    let outcome = engine.compute("ac-cooling-load", &raw).unwrap();
    let errors = outcome.errors().unwrap();
    assert_eq!(errors["humidity"], "Must be a number");
    assert_eq!(errors.len(), 1);
}

#[test]
fn unknown_domain_is_not_found() {
    let engine = Engine::new();
    let err = engine.input_schema("warp-drive").unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(err, CalcError::UnknownDomain { .. }));
}

#[test]
fn history_keeps_newest_ten() {
    let engine = Engine::new();
    for hours in 1..=12 {
        let raw = raw_inputs([("alarms", 1.0), ("timeH", f64::from(hours)), ("startsOK", 1.0), ("startsTot", 1.0)]);
        computed(&engine, "controls-reliability", &raw);
    }
    let history = engine.history(100);
    assert_eq!(history.len(), 10);
    assert_close(history[0].outputs.number("MTBF (h)"), 12.0, 1e-9);
    assert_close(history[9].outputs.number("MTBF (h)"), 3.0, 1e-9);
}

#[test]
fn comparison_domains_project_savings_lines() {
    let engine = Engine::new();
    let raw = raw_inputs([("monthlyBill", "20000"), ("systemCost", "1000000")]);
    let result = computed(&engine, "solar-payback", &raw);
    let projection = engine.project("solar-payback", &raw, &result).unwrap().unwrap();
    assert_eq!(projection.kind, ChartKind::Line);
    assert_eq!(projection.points.first().map(|p| p.value), Some(-1_000_000.0));
    assert!(projection.values().iter().all(|v| v.is_finite()));
}

//! # Result Projector
//!
//! Turns a domain [`Outcome`] into the two shapes a presentation layer
//! consumes:
//!
//! - [`flatten`]: a flat JSON object `{label: number | string}`
//! - [`project`]: a small chart series ([`Projection`]) of finite numbers
//!
//! Formatting (currency, units, percentages) stays with the caller.
//!
//! ## Example
//!
//! ```rust
//! use powercalc_core::outcome::Outcome;
//! use powercalc_core::projection::flatten;
//!
//! let outcome = Outcome::new().with("MTBF (h)", f64::INFINITY).with("Alarm rate (per h)", 0.0);
//! let flat = flatten(&outcome);
//! assert_eq!(flat["MTBF (h)"], "Infinity");
//! assert_eq!(flat["Alarm rate (per h)"], 0.0);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::outcome::{MetricValue, Outcome};
use crate::registry::DomainDescriptor;
use crate::validation::ParsedInputs;

/// Chart family a projection is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Line,
    Distribution,
}

/// One labelled chart value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// Chart-ready series derived from an outcome.
///
/// Every point value is finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub kind: ChartKind,
    pub title: String,
    pub points: Vec<ChartPoint>,
}

impl Projection {
    /// Empty projection of the given kind
    pub fn new(kind: ChartKind, title: impl Into<String>) -> Self {
        Projection {
            kind,
            title: title.into(),
            points: Vec::new(),
        }
    }

    /// Add a point; non-finite values are charted as 0
    pub fn point(mut self, label: impl Into<String>, value: f64) -> Self {
        self.points.push(ChartPoint {
            label: label.into(),
            value: finite_or_zero(value),
        });
        self
    }

    /// Point values in order
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }
}

#[inline]
fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Flatten an outcome into a JSON object in metric order.
///
/// JSON has no infinity, so `+∞` is written as the string `"Infinity"` and
/// `-∞`/`NaN` as `null`.
pub fn flatten(outcome: &Outcome) -> Map<String, Value> {
    outcome
        .metrics()
        .iter()
        .map(|metric| {
            let value = match &metric.value {
                MetricValue::Number(n) if n.is_finite() => Value::from(*n),
                MetricValue::Number(n) if *n == f64::INFINITY => Value::from("Infinity"),
                MetricValue::Number(_) => Value::Null,
                MetricValue::Text(s) => Value::from(s.as_str()),
            };
            (metric.label.clone(), value)
        })
        .collect()
}

/// Bar chart of every metric; text and non-finite values become 0.
pub fn generic_bar(title: &str, outcome: &Outcome) -> Projection {
    outcome
        .metrics()
        .iter()
        .fold(Projection::new(ChartKind::Bar, title), |projection, metric| {
            let value = metric.value.as_number().unwrap_or(0.0);
            projection.point(metric.label.as_str(), value)
        })
}

/// Cumulative net savings line over the comparator horizon.
///
/// Year 0 starts at minus the switching cost; each year adds the annual
/// savings reported in the outcome.
pub fn savings_line(title: &str, outcome: &Outcome, switching_cost: f64, years: u32) -> Projection {
    let annual = outcome.number("Annual savings").unwrap_or(0.0);
    (0..=years).fold(Projection::new(ChartKind::Line, title), |projection, year| {
        projection.point(format!("Year {}", year), annual * f64::from(year) - switching_cost)
    })
}

/// Project an outcome with the domain's own projector, or the generic bar.
pub fn project(domain: &DomainDescriptor, outcome: &Outcome, parsed: &ParsedInputs) -> Projection {
    match domain.projector {
        Some(projector) => projector(outcome, parsed),
        None => generic_bar(domain.label, outcome),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry;

    #[test]
    fn test_flatten_preserves_order_and_text() {
        let outcome = Outcome::new()
            .with("b", 2.0)
            .with("a", 1.0)
            .with("Material", "steel");
        let flat = flatten(&outcome);
        let keys: Vec<_> = flat.keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a", "Material"]);
        assert_eq!(flat["Material"], "steel");
    }

    #[test]
    fn test_flatten_non_finite() {
        let outcome = Outcome::new().with("x", f64::NAN);
        assert_eq!(flatten(&outcome)["x"], Value::Null);
    }

    #[test]
    fn test_generic_bar_sanitizes() {
        let outcome = Outcome::new()
            .with("MTBF (h)", f64::INFINITY)
            .with("Section", "none")
            .with("Rate", 2.5);
        let projection = generic_bar("Test", &outcome);
        assert_eq!(projection.kind, ChartKind::Bar);
        assert_eq!(projection.values(), vec![0.0, 0.0, 2.5]);
    }

    #[test]
    fn test_savings_line() {
        let outcome = Outcome::new().with("Annual savings", 100.0);
        let projection = savings_line("Savings", &outcome, 250.0, 3);
        assert_eq!(projection.values(), vec![-250.0, -150.0, -50.0, 50.0]);
        assert_eq!(projection.points[0].label, "Year 0");
    }

    #[test]
    fn test_project_falls_back_to_generic() {
        let registry = registry::builtin();
        let domain = registry.get("pump-hydraulics").unwrap();
        assert!(domain.projector.is_none());
        let outcome = Outcome::new().with("Hydraulic power (W)", 10.0);
        let projection = project(domain, &outcome, &ParsedInputs::default());
        assert_eq!(projection.kind, ChartKind::Bar);
        assert_eq!(projection.title, "Pumps");
    }
}

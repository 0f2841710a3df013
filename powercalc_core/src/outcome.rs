//! # Calculation Outcome
//!
//! The result of one domain computation: an ordered list of human-readable
//! metric names and their values. Order is the order the formula inserted
//! the metrics; it matters for display but not for computation.
//!
//! An `Outcome` serializes as a plain JSON object:
//!
//! ```json
//! {
//!   "Array power (W)": 3000.0,
//!   "Daily energy (Wh/day)": 13200.0,
//!   "Material": "steel"
//! }
//! ```

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Value of one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl MetricValue {
    /// The numeric value, if this is a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            MetricValue::Number(n) => Some(*n),
            MetricValue::Text(_) => None,
        }
    }

    /// The text value, if this is text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetricValue::Number(_) => None,
            MetricValue::Text(s) => Some(s),
        }
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        MetricValue::Number(value)
    }
}

impl From<&str> for MetricValue {
    fn from(value: &str) -> Self {
        MetricValue::Text(value.to_string())
    }
}

impl From<String> for MetricValue {
    fn from(value: String) -> Self {
        MetricValue::Text(value)
    }
}

/// One labelled metric.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub label: String,
    pub value: MetricValue,
}

/// Ordered result set of a computation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
    metrics: Vec<Metric>,
}

impl Outcome {
    /// Empty outcome
    pub fn new() -> Self {
        Outcome::default()
    }

    /// Append a metric (builder style).
    ///
    /// A label that is already present is replaced in place so that the
    /// result keeps the shape of a map.
    pub fn with(mut self, label: impl Into<String>, value: impl Into<MetricValue>) -> Self {
        self.push(label, value);
        self
    }

    /// Append a metric
    pub fn push(&mut self, label: impl Into<String>, value: impl Into<MetricValue>) {
        let label = label.into();
        let value = value.into();
        match self.metrics.iter_mut().find(|m| m.label == label) {
            Some(existing) => existing.value = value,
            None => self.metrics.push(Metric { label, value }),
        }
    }

    /// Append every metric of another outcome
    pub fn extend(&mut self, other: Outcome) {
        for metric in other.metrics {
            self.push(metric.label, metric.value);
        }
    }

    /// Look up a metric by label
    pub fn get(&self, label: &str) -> Option<&MetricValue> {
        self.metrics.iter().find(|m| m.label == label).map(|m| &m.value)
    }

    /// Look up a numeric metric by label
    pub fn number(&self, label: &str) -> Option<f64> {
        self.get(label).and_then(MetricValue::as_number)
    }

    /// Look up a text metric by label
    pub fn text(&self, label: &str) -> Option<&str> {
        self.get(label).and_then(MetricValue::as_text)
    }

    /// Metrics in insertion order
    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    /// Metric labels in insertion order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.metrics.iter().map(|m| m.label.as_str())
    }

    /// Number of metrics
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    /// True when no metric was produced
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.metrics.len()))?;
        for metric in &self.metrics {
            map.serialize_entry(&metric.label, &metric.value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Outcome {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OutcomeVisitor;

        impl<'de> Visitor<'de> for OutcomeVisitor {
            type Value = Outcome;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of metric labels to numbers or strings")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Outcome, A::Error> {
                let mut outcome = Outcome::new();
                while let Some((label, value)) = access.next_entry::<String, MetricValue>()? {
                    outcome.push(label, value);
                }
                Ok(outcome)
            }
        }

        deserializer.deserialize_map(OutcomeVisitor)
    }
}

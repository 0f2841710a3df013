//! # Validation
//!
//! One validation primitive shared by every domain. Raw values arrive from a
//! form as strings or numbers; the validator turns them into numbers (or
//! choice strings), checks them against the [`FieldSpec`]s, and reports
//! field-level problems as data. It never panics and never fills a rejected
//! value with a default.
//!
//! ## Example
//!
//! ```rust
//! use powercalc_core::schema::FieldSpec;
//! use powercalc_core::validation::{validate, RawInputs, RawValue};
//!
//! let fields = vec![
//!     FieldSpec::number("panels", "Number of panels").min(1.0).required(),
//!     FieldSpec::number("psh", "Peak sun hours").range(1.0, 9.0).required(),
//! ];
//!
//! let mut raw = RawInputs::new();
//! raw.insert("panels".into(), RawValue::from("10"));
//! raw.insert("psh".into(), RawValue::from(12.0));
//!
//! let report = validate(&fields, &raw);
//! assert_eq!(report.parsed.number("panels"), Some(10.0));
//! assert_eq!(report.errors["psh"], "<= 9");
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::numeric::{coerce_number, coerce_text};
use crate::schema::{FieldDefault, FieldKind, FieldSpec};

/// A raw value from a form control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    /// Interpret as a finite number, if possible
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawValue::Number(n) => coerce_number(*n),
            RawValue::Text(s) => coerce_text(s),
        }
    }

    /// True for text that is empty once trimmed
    pub fn is_blank(&self) -> bool {
        matches!(self, RawValue::Text(s) if s.trim().is_empty())
    }

    /// Interpret as a non-empty choice string
    pub fn as_choice(&self) -> Option<String> {
        match self {
            RawValue::Text(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            RawValue::Number(n) => coerce_number(*n).map(|n| n.to_string()),
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl std::fmt::Display for RawValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawValue::Number(n) => write!(f, "{}", n),
            RawValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Raw values keyed by field name.
pub type RawInputs = BTreeMap<String, RawValue>;

/// Build [`RawInputs`] from `(name, value)` pairs.
///
/// ```rust
/// use powercalc_core::validation::raw_inputs;
///
/// let raw = raw_inputs([("pload", "75"), ("prated", "100")]);
/// assert_eq!(raw.len(), 2);
/// ```
pub fn raw_inputs<I, K, V>(pairs: I) -> RawInputs
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<RawValue>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}

/// Successfully parsed values. Fields with errors are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedInputs {
    pub numbers: BTreeMap<String, f64>,
    pub choices: BTreeMap<String, String>,
}

impl ParsedInputs {
    /// Parsed number for a field, if present
    pub fn number(&self, name: &str) -> Option<f64> {
        self.numbers.get(name).copied()
    }

    /// Parsed choice for a field, if present
    pub fn choice(&self, name: &str) -> Option<&str> {
        self.choices.get(name).map(String::as_str)
    }

    /// Number the formula cannot do without.
    ///
    /// After a successful validation every required field is present, so an
    /// error here means the schema and the formula disagree.
    pub fn require(&self, name: &str) -> CalcResult<f64> {
        self.number(name).ok_or_else(|| CalcError::missing_field(name))
    }

    /// Choice the formula cannot do without
    pub fn require_choice(&self, name: &str) -> CalcResult<&str> {
        self.choice(name).ok_or_else(|| CalcError::missing_field(name))
    }

    /// Builder-style insert, handy in tests and projections
    pub fn with_number(mut self, name: impl Into<String>, value: f64) -> Self {
        self.numbers.insert(name.into(), value);
        self
    }

    /// Builder-style insert for a choice
    pub fn with_choice(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.choices.insert(name.into(), value.into());
        self
    }
}

/// Outcome of validating one set of raw values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Field name -> message; empty means valid
    pub errors: BTreeMap<String, String>,
    /// Values that passed
    pub parsed: ParsedInputs,
}

impl ValidationReport {
    /// True when no field reported an error
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate raw values against a domain's field specs.
///
/// Per field, in schema order:
///
/// - missing (absent, empty, non-numeric) and required: `"Required"`
/// - absent or blank and optional: the declared default if any, else omitted
/// - supplied but not a finite number and optional: `"Must be a number"`
/// - number below `min`: `">= {min}"`; above `max`: `"<= {max}"`
/// - choice outside its options: `"Must be one of: ..."`
///
/// Raw keys that match no field are ignored.
pub fn validate(fields: &[FieldSpec], raw: &RawInputs) -> ValidationReport {
    let mut report = ValidationReport::default();

    for field in fields {
        let supplied = raw.get(&field.name);
        match &field.kind {
            FieldKind::Number => match supplied.and_then(RawValue::as_number) {
                Some(value) => match bound_violation(field, value) {
                    Some(message) => {
                        report.errors.insert(field.name.clone(), message);
                    }
                    None => {
                        report.parsed.numbers.insert(field.name.clone(), value);
                    }
                },
                None if field.required => {
                    report.errors.insert(field.name.clone(), "Required".to_string());
                }
                None if supplied.is_some_and(|value| !value.is_blank()) => {
                    report.errors.insert(field.name.clone(), "Must be a number".to_string());
                }
                None => {
                    if let Some(FieldDefault::Number(default)) = field.default {
                        report.parsed.numbers.insert(field.name.clone(), default);
                    }
                }
            },
            FieldKind::Choice { options } => match supplied.and_then(RawValue::as_choice) {
                Some(value) if options.iter().any(|o| o == &value) => {
                    report.parsed.choices.insert(field.name.clone(), value);
                }
                Some(_) => {
                    report
                        .errors
                        .insert(field.name.clone(), format!("Must be one of: {}", options.join(", ")));
                }
                None if field.required => {
                    report.errors.insert(field.name.clone(), "Required".to_string());
                }
                None => {
                    if let Some(FieldDefault::Choice(default)) = &field.default {
                        report.parsed.choices.insert(field.name.clone(), default.clone());
                    }
                }
            },
        }
    }

    report
}

fn bound_violation(field: &FieldSpec, value: f64) -> Option<String> {
    if let Some(min) = field.min {
        if value < min {
            return Some(format!(">= {}", min));
        }
    }
    if let Some(max) = field.max {
        if value > max {
            return Some(format!("<= {}", max));
        }
    }
    None
}

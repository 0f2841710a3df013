//! # Input Schema
//!
//! Declarative description of the inputs a calculation domain accepts.
//! A caller (form, CLI, API) reads the schema to know which fields to
//! render; the validator reads the same schema to check what comes back.
//!
//! ## Example
//!
//! ```rust
//! use powercalc_core::schema::FieldSpec;
//!
//! let field = FieldSpec::number("psh", "Peak sun hours")
//!     .unit("h/day")
//!     .range(1.0, 9.0)
//!     .required();
//!
//! assert_eq!(field.name, "psh");
//! assert_eq!(field.max, Some(9.0));
//! ```

use serde::{Deserialize, Serialize};

/// What kind of value a field takes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    /// A plain decimal number
    Number,
    /// One value out of a fixed set (water quality, pump type, ...)
    Choice { options: Vec<String> },
}

/// Default for a field that was left empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldDefault {
    Number(f64),
    Choice(String),
}

/// Description of one input.
///
/// ## JSON Example
///
/// ```json
/// {
///   "name": "dod",
///   "label": "Depth of discharge",
///   "unit": null,
///   "min": 0.2,
///   "max": 0.9,
///   "required": true,
///   "default": 0.5,
///   "placeholder": "0.5",
///   "kind": "number"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Key used in raw and parsed input maps; unique within a domain
    pub name: String,

    /// Human-readable label
    pub label: String,

    /// Display unit (never used in computation)
    pub unit: Option<String>,

    /// Inclusive lower bound
    pub min: Option<f64>,

    /// Inclusive upper bound
    pub max: Option<f64>,

    /// Whether an empty value is rejected
    pub required: bool,

    /// Value used when an optional field is left empty
    pub default: Option<FieldDefault>,

    /// Hint text for an empty input box
    pub placeholder: Option<String>,

    /// Number or choice
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Start a numeric field.
    pub fn number(name: impl Into<String>, label: impl Into<String>) -> Self {
        FieldSpec {
            name: name.into(),
            label: label.into(),
            unit: None,
            min: None,
            max: None,
            required: false,
            default: None,
            placeholder: None,
            kind: FieldKind::Number,
        }
    }

    /// Start a choice field over a fixed set of options.
    pub fn choice<I, S>(name: impl Into<String>, label: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldSpec {
            kind: FieldKind::Choice {
                options: options.into_iter().map(Into::into).collect(),
            },
            ..FieldSpec::number(name, label)
        }
    }

    /// Set the display unit
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Set the inclusive lower bound
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Set the inclusive upper bound
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Set both bounds
    pub fn range(self, min: f64, max: f64) -> Self {
        self.min(min).max(max)
    }

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Suggested value. Doubles as the placeholder text.
    ///
    /// For a required field this is only a hint; an empty required field is
    /// still rejected.
    pub fn default_number(mut self, value: f64) -> Self {
        self.default = Some(FieldDefault::Number(value));
        if self.placeholder.is_none() {
            self.placeholder = Some(value.to_string());
        }
        self
    }

    /// Default option for a choice field
    pub fn default_choice(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        if self.placeholder.is_none() {
            self.placeholder = Some(value.clone());
        }
        self.default = Some(FieldDefault::Choice(value));
        self
    }

    /// Set the placeholder text explicitly
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }

    /// Whether this is a choice field
    pub fn is_choice(&self) -> bool {
        matches!(self.kind, FieldKind::Choice { .. })
    }

    /// Options of a choice field (empty for numbers)
    pub fn options(&self) -> &[String] {
        match &self.kind {
            FieldKind::Choice { options } => options,
            FieldKind::Number => &[],
        }
    }

    /// Label with the unit appended, e.g. `"Panel wattage (W)"`
    pub fn display_label(&self) -> String {
        match &self.unit {
            Some(unit) if !unit.is_empty() => format!("{} ({})", self.label, unit),
            _ => self.label.clone(),
        }
    }
}

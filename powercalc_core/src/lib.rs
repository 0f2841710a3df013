//! # powercalc_core - Engineering Calculation Engine
//!
//! `powercalc_core` is the computational heart of Powercalc: a registry of
//! engineering calculators (solar, generators, UPS, pumps, water, beams,
//! fabrication and more), each with an input schema, a validation contract
//! and a pure compute function. All inputs and outputs are JSON-serializable,
//! so any front end can drive the engine.
//!
//! ## Design Philosophy
//!
//! - **Stateless formulas**: every calculator is a pure function of validated input
//! - **Errors as data**: field problems come back as a map, never a panic
//! - **Total**: degenerate input yields sentinels (0, infinity), not failures
//! - **Configurable**: cost and sizing constants live in [`settings::Assumptions`]
//!
//! ## Quick Start
//!
//! ```rust
//! use powercalc_core::Engine;
//! use powercalc_core::validation::raw_inputs;
//!
//! let engine = Engine::new();
//! let raw = raw_inputs([
//!     ("pload", "75"),
//!     ("prated", "100"),
//!     ("alpha", "0.25"),
//!     ("beta", "0"),
//!     ("fuelVol", "100"),
//! ]);
//!
//! let outcome = engine.compute("diesel-fuel", &raw).unwrap();
//! let result = outcome.result().unwrap();
//! assert!(result.number("Fuel consumption (L/h)").unwrap() > 0.0);
//!
//! // Flat {label: value} map for a presentation layer
//! let json = powercalc_core::projection::flatten(result);
//! assert!(json.contains_key("Fuel consumption (L/h)"));
//! ```
//!
//! ## Modules
//!
//! - [`engine`] - the caller-facing surface
//! - [`registry`] - domain id -> schema + compute
//! - [`domains`] - the calculators themselves
//! - [`equations`] - shared physical formulas
//! - [`economics`] - two-option cost comparator
//! - [`schema`] / [`validation`] - input description and checking
//! - [`outcome`] / [`projection`] - results and chart-ready shapes
//! - [`history`] - bounded session ledger
//! - [`settings`] - configurable assumptions
//! - [`errors`] - structured error types

pub mod domains;
pub mod economics;
pub mod engine;
pub mod equations;
pub mod errors;
pub mod history;
pub mod numeric;
pub mod outcome;
pub mod projection;
pub mod registry;
pub mod schema;
pub mod settings;
pub mod units;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use engine::{ComputeOutcome, Engine};
pub use errors::{CalcError, CalcResult};
pub use history::{HistoryEntry, HistoryLedger};
pub use outcome::{Metric, MetricValue, Outcome};
pub use registry::{DomainDescriptor, DomainSummary, Registry};
pub use schema::FieldSpec;
pub use settings::Assumptions;
pub use validation::{RawInputs, RawValue, ValidationReport};

//! # Calculation Engine
//!
//! The surface a presentation layer drives: list domains, fetch a domain's
//! input schema, validate raw values, compute, and read back the session
//! history.
//!
//! ```text
//! caller ─ domain id ─▶ Registry ─▶ FieldSpecs
//!        ─ raw values ─▶ validate ─┬─ errors ─▶ Rejected
//!                                  └─ parsed ─▶ compute ─▶ History ─▶ Computed
//! ```
//!
//! Apart from the history ledger the engine holds no mutable state, so a
//! single `Engine` can be shared across threads behind an `Arc`.
//!
//! ## Example
//!
//! ```rust
//! use powercalc_core::engine::{ComputeOutcome, Engine};
//! use powercalc_core::validation::raw_inputs;
//!
//! let engine = Engine::new();
//! let raw = raw_inputs([("t1", "10"), ("t2", "20"), ("t3", "30"), ("busy", "5")]);
//!
//! match engine.compute("automation-throughput", &raw).unwrap() {
//!     ComputeOutcome::Computed { result } => {
//!         assert_eq!(result.number("Throughput (units/h)"), Some(60.0));
//!     }
//!     ComputeOutcome::Rejected { errors } => panic!("rejected: {:?}", errors),
//! }
//! assert_eq!(engine.history(10).len(), 1);
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::CalcResult;
use crate::history::{HistoryEntry, HistoryLedger};
use crate::outcome::Outcome;
use crate::projection::{self, Projection};
use crate::registry::{self, DomainDescriptor, DomainSummary, Registry};
use crate::schema::FieldSpec;
use crate::settings::Assumptions;
use crate::validation::{self, RawInputs, ValidationReport};

/// Result of [`Engine::compute`].
///
/// Serializes as `{"result": {...}}` or `{"errors": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComputeOutcome {
    /// Input was valid and the formula ran
    Computed { result: Outcome },
    /// Input failed validation; field name -> message
    Rejected { errors: BTreeMap<String, String> },
}

impl ComputeOutcome {
    pub fn result(&self) -> Option<&Outcome> {
        match self {
            ComputeOutcome::Computed { result } => Some(result),
            ComputeOutcome::Rejected { .. } => None,
        }
    }

    pub fn errors(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            ComputeOutcome::Computed { .. } => None,
            ComputeOutcome::Rejected { errors } => Some(errors),
        }
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, ComputeOutcome::Computed { .. })
    }
}

/// Registry, assumptions and session history.
#[derive(Debug)]
pub struct Engine {
    registry: Arc<Registry>,
    assumptions: Assumptions,
    history: HistoryLedger,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

impl Engine {
    /// Engine over the built-in domains with default assumptions
    pub fn new() -> Self {
        Engine::from_parts(registry::builtin(), Assumptions::default())
    }

    /// Engine over the built-in domains with caller-supplied assumptions.
    ///
    /// Fails when the assumptions hold values no formula can use.
    pub fn with_assumptions(assumptions: Assumptions) -> CalcResult<Self> {
        assumptions.validate()?;
        Ok(Engine::from_parts(registry::builtin(), assumptions))
    }

    /// Engine over a custom registry
    pub fn with_registry(registry: Arc<Registry>, assumptions: Assumptions) -> CalcResult<Self> {
        assumptions.validate()?;
        Ok(Engine::from_parts(registry, assumptions))
    }

    fn from_parts(registry: Arc<Registry>, assumptions: Assumptions) -> Self {
        info!("Calculation engine ready with {} domains", registry.len());
        Engine {
            registry,
            assumptions,
            history: HistoryLedger::new(),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    /// Every domain in registration order
    pub fn list_domains(&self) -> Vec<DomainSummary> {
        self.registry.summaries()
    }

    fn domain(&self, domain_id: &str) -> CalcResult<&DomainDescriptor> {
        self.registry.get(domain_id).inspect_err(|_| {
            warn!("Unknown calculation domain requested: {}", domain_id);
        })
    }

    /// Ordered input fields of a domain
    pub fn input_schema(&self, domain_id: &str) -> CalcResult<&[FieldSpec]> {
        let domain = self.domain(domain_id)?;
        debug!("Input schema for {}: {} fields", domain_id, domain.inputs.len());
        Ok(&domain.inputs)
    }

    /// Validate raw values against a domain's schema without computing
    pub fn validate(&self, domain_id: &str, raw: &RawInputs) -> CalcResult<ValidationReport> {
        let domain = self.domain(domain_id)?;
        Ok(validation::validate(&domain.inputs, raw))
    }

    /// Validate, compute and record.
    ///
    /// An unknown domain is an `Err`; invalid input is `Ok(Rejected)` and
    /// leaves the history untouched.
    pub fn compute(&self, domain_id: &str, raw: &RawInputs) -> CalcResult<ComputeOutcome> {
        let domain = self.domain(domain_id)?;
        let report = validation::validate(&domain.inputs, raw);
        if !report.is_valid() {
            warn!("Rejected input for {}: {} field error(s)", domain_id, report.errors.len());
            return Ok(ComputeOutcome::Rejected { errors: report.errors });
        }

        let result = (domain.compute)(&report.parsed, &self.assumptions)?;
        debug!("Computed {} with {} metrics", domain_id, result.len());
        self.history.record(HistoryEntry::new(domain.id, raw.clone(), result.clone()));
        Ok(ComputeOutcome::Computed { result })
    }

    /// Chart projection of an outcome computed from `raw`.
    ///
    /// Returns `None` when `raw` does not validate.
    pub fn project(&self, domain_id: &str, raw: &RawInputs, outcome: &Outcome) -> CalcResult<Option<Projection>> {
        let domain = self.domain(domain_id)?;
        let report = validation::validate(&domain.inputs, raw);
        if !report.is_valid() {
            return Ok(None);
        }
        Ok(Some(projection::project(domain, outcome, &report.parsed)))
    }

    /// Up to `limit` recent computations, newest first
    pub fn history(&self, limit: usize) -> Vec<HistoryEntry> {
        self.history.recent(limit)
    }

    /// Forget the session history
    pub fn clear_history(&self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CalcError;
    use crate::validation::raw_inputs;

    fn water_raw() -> RawInputs {
        raw_inputs([
            ("countyRate", "120"),
            ("monthlyUsage", "1000"),
            ("reliability", "80"),
            ("drillingCost", "1500000"),
            ("annualMaintenance", "50000"),
        ])
    }

    #[test]
    fn test_engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Engine>();
    }

    #[test]
    fn test_list_domains_matches_registry() {
        let engine = Engine::new();
        let ids: Vec<_> = engine.list_domains().into_iter().map(|d| d.id).collect();
        assert_eq!(ids.len(), engine.registry().len());
        assert_eq!(ids[0], "solar-sizing");
    }

    #[test]
    fn test_unknown_domain_is_distinct_from_rejection() {
        let engine = Engine::new();
        let err = engine.compute("warp-drive", &RawInputs::new()).unwrap_err();
        assert!(matches!(err, CalcError::UnknownDomain { .. }));
        assert!(engine.input_schema("warp-drive").is_err());
        assert!(engine.validate("warp-drive", &RawInputs::new()).is_err());
    }

    #[test]
    fn test_rejected_input_is_not_recorded() {
        let engine = Engine::new();
        let outcome = engine.compute("water-source-economics", &RawInputs::new()).unwrap();
        let errors = outcome.errors().unwrap();
        assert_eq!(errors.get("monthlyUsage").map(String::as_str), Some("Required"));
        assert_eq!(errors.get("drillingCost").map(String::as_str), Some("Required"));
        assert!(engine.history(10).is_empty());
    }

    #[test]
    fn test_computed_input_is_recorded() {
        let engine = Engine::new();
        let outcome = engine.compute("water-source-economics", &water_raw()).unwrap();
        let result = outcome.result().unwrap();
        assert_eq!(result.number("Payback period (years)"), Some(0.8));

        let history = engine.history(10);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].domain_id, "water-source-economics");
        assert_eq!(history[0].inputs, water_raw());
        assert_eq!(&history[0].outputs, result);
    }

    #[test]
    fn test_history_bounded() {
        let engine = Engine::new();
        for _ in 0..12 {
            engine.compute("water-source-economics", &water_raw()).unwrap();
        }
        assert_eq!(engine.history(usize::MAX).len(), 10);
        engine.clear_history();
        assert!(engine.history(10).is_empty());
    }

    #[test]
    fn test_custom_assumptions_flow_into_compute() {
        let mut assumptions = Assumptions::default();
        assumptions.water.amortization_years = 10.0;
        let engine = Engine::with_assumptions(assumptions).unwrap();
        let outcome = engine.compute("water-source-economics", &water_raw()).unwrap();
        let borehole = outcome.result().and_then(|r| r.number("Borehole annual cost")).unwrap();
        assert!((borehole - 225_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_assumptions_refused() {
        let mut assumptions = Assumptions::default();
        assumptions.water.amortization_years = 0.0;
        assert!(Engine::with_assumptions(assumptions).is_err());
    }

    #[test]
    fn test_projection_uses_domain_projector() {
        let engine = Engine::new();
        let outcome = engine.compute("water-source-economics", &water_raw()).unwrap();
        let projection = engine
            .project("water-source-economics", &water_raw(), outcome.result().unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(projection.points.len(), 11);
        assert_eq!(projection.title, "Cumulative Savings vs County");
    }

    #[test]
    fn test_compute_outcome_json_shape() {
        let engine = Engine::new();
        let rejected = engine.compute("water-source-economics", &RawInputs::new()).unwrap();
        let json = serde_json::to_value(&rejected).unwrap();
        assert_eq!(json["errors"]["monthlyUsage"], "Required");

        let computed = engine.compute("water-source-economics", &water_raw()).unwrap();
        let json = serde_json::to_value(&computed).unwrap();
        assert_eq!(json["result"]["Payback period (years)"], 0.8);
    }
}

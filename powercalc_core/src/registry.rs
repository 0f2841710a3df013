//! # Domain Registry
//!
//! Data-driven table mapping a domain id to its input schema and compute
//! function. The engine never switches on domain ids; it looks them up here.
//! A new calculator is added by writing a [`DomainDescriptor`] and
//! registering it, without touching the dispatcher.
//!
//! ## Usage
//!
//! ```rust
//! use powercalc_core::registry;
//!
//! let registry = registry::builtin();
//! let solar = registry.get("solar-sizing").unwrap();
//! assert_eq!(solar.label, "Solar Systems");
//! assert!(registry.get("warp-drive").is_err());
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domains;
use crate::errors::{CalcError, CalcResult};
use crate::outcome::Outcome;
use crate::projection::Projection;
use crate::schema::FieldSpec;
use crate::settings::Assumptions;
use crate::validation::ParsedInputs;

/// Pure compute function of a domain.
///
/// Receives inputs that already passed validation. Must not panic; degenerate
/// values come back as sentinels (0 or infinity) inside the outcome.
pub type ComputeFn = fn(&ParsedInputs, &Assumptions) -> CalcResult<Outcome>;

/// Domain-specific chart projection of an outcome.
pub type ProjectFn = fn(&Outcome, &ParsedInputs) -> Projection;

/// Static description of one calculation domain.
#[derive(Clone)]
pub struct DomainDescriptor {
    /// Unique id, e.g. `"solar-sizing"`
    pub id: &'static str,
    /// Display name
    pub label: &'static str,
    /// One-line description
    pub summary: &'static str,
    /// Ordered input fields
    pub inputs: Vec<FieldSpec>,
    /// Formula
    pub compute: ComputeFn,
    /// Custom chart projection; the generic bar chart is used when absent
    pub projector: Option<ProjectFn>,
}

impl DomainDescriptor {
    /// Public summary of this domain
    pub fn summary(&self) -> DomainSummary {
        DomainSummary {
            id: self.id.to_string(),
            label: self.label.to_string(),
            summary: self.summary.to_string(),
        }
    }
}

impl fmt::Debug for DomainDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomainDescriptor")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("inputs", &self.inputs.len())
            .field("projector", &self.projector.is_some())
            .finish()
    }
}

/// Id and label of a domain, as shown in a domain picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainSummary {
    pub id: String,
    pub label: String,
    pub summary: String,
}

/// Immutable table of domains, in registration order.
#[derive(Debug, Default)]
pub struct Registry {
    domains: Vec<DomainDescriptor>,
    index: HashMap<&'static str, usize>,
}

impl Registry {
    /// Start building a registry
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Build a registry from descriptors, rejecting duplicate ids.
    pub fn from_descriptors<I>(descriptors: I) -> CalcResult<Registry>
    where
        I: IntoIterator<Item = DomainDescriptor>,
    {
        let mut builder = Registry::builder();
        for descriptor in descriptors {
            builder.register(descriptor)?;
        }
        Ok(builder.build())
    }

    /// Look up a domain by id
    pub fn get(&self, id: &str) -> CalcResult<&DomainDescriptor> {
        self.index
            .get(id)
            .map(|&i| &self.domains[i])
            .ok_or_else(|| CalcError::unknown_domain(id))
    }

    /// True when the id is registered
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Domain ids in registration order
    pub fn ids(&self) -> Vec<&'static str> {
        self.domains.iter().map(|d| d.id).collect()
    }

    /// Summaries in registration order
    pub fn summaries(&self) -> Vec<DomainSummary> {
        self.domains.iter().map(DomainDescriptor::summary).collect()
    }

    /// All descriptors in registration order
    pub fn descriptors(&self) -> &[DomainDescriptor] {
        &self.domains
    }

    /// Number of domains
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    /// True when nothing is registered
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

/// Collects descriptors before the registry is frozen.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    domains: Vec<DomainDescriptor>,
    index: HashMap<&'static str, usize>,
}

impl RegistryBuilder {
    /// Add a domain. Fails if the id is already taken.
    pub fn register(&mut self, descriptor: DomainDescriptor) -> CalcResult<&mut Self> {
        if self.index.contains_key(descriptor.id) {
            return Err(CalcError::duplicate_domain(descriptor.id));
        }
        self.index.insert(descriptor.id, self.domains.len());
        self.domains.push(descriptor);
        Ok(self)
    }

    /// Freeze into an immutable registry
    pub fn build(self) -> Registry {
        Registry {
            domains: self.domains,
            index: self.index,
        }
    }
}

static BUILTIN: Lazy<Arc<Registry>> = Lazy::new(|| {
    let mut builder = Registry::builder();
    for descriptor in domains::builtin() {
        let id = descriptor.id;
        if let Err(e) = builder.register(descriptor) {
            tracing::error!(domain = id, error = %e, "skipping built-in domain");
        }
    }
    Arc::new(builder.build())
});

/// The built-in registry of every calculator shipped with the crate.
pub fn builtin() -> Arc<Registry> {
    Arc::clone(&BUILTIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy(id: &'static str) -> DomainDescriptor {
        DomainDescriptor {
            id,
            label: "Dummy",
            summary: "Test domain",
            inputs: vec![FieldSpec::number("x", "X").required()],
            compute: |parsed, _| Ok(Outcome::new().with("x", parsed.require("x")?)),
            projector: None,
        }
    }

    #[test]
    fn test_builtin_ids_are_unique() {
        let registry = builtin();
        assert_eq!(registry.len(), domains::builtin().len());
    }

    #[test]
    fn test_builtin_order() {
        let ids = builtin().ids();
        assert_eq!(ids.first(), Some(&"solar-sizing"));
        assert!(ids.contains(&"water-source-economics"));
        assert!(ids.contains(&"structural-beam-sizing"));
    }

    #[test]
    fn test_unknown_domain() {
        let err = builtin().get("flux-capacitor").unwrap_err();
        assert_eq!(err, CalcError::unknown_domain("flux-capacitor"));
    }

    #[test]
    fn test_duplicate_rejected() {
        let err = Registry::from_descriptors(vec![dummy("a"), dummy("a")]).unwrap_err();
        assert_eq!(err.error_code(), "DUPLICATE_DOMAIN");
    }

    #[test]
    fn test_custom_domain_without_dispatcher_changes() {
        let mut builder = Registry::builder();
        builder.register(dummy("a")).unwrap().register(dummy("b")).unwrap();
        let registry = builder.build();
        assert_eq!(registry.ids(), vec!["a", "b"]);

        let descriptor = registry.get("b").unwrap();
        let parsed = ParsedInputs::default().with_number("x", 4.0);
        let outcome = (descriptor.compute)(&parsed, &Assumptions::default()).unwrap();
        assert_eq!(outcome.number("x"), Some(4.0));
    }

    #[test]
    fn test_field_names_unique_within_each_domain() {
        for descriptor in builtin().descriptors() {
            let mut names: Vec<_> = descriptor.inputs.iter().map(|f| f.name.as_str()).collect();
            let total = names.len();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), total, "duplicate field in {}", descriptor.id);
        }
    }

    #[test]
    fn test_required_fields_carry_no_default() {
        for descriptor in builtin().descriptors() {
            for field in descriptor.inputs.iter().filter(|f| f.required) {
                assert!(
                    field.default.is_none(),
                    "{}.{} is required but declares a default",
                    descriptor.id,
                    field.name
                );
            }
        }
    }
}

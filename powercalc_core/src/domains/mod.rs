//! # Domain Formula Library
//!
//! One module per calculator family. Each calculator follows the same
//! pattern:
//!
//! - `*Input` - typed inputs, built from validated [`ParsedInputs`](crate::validation::ParsedInputs)
//! - `*Result` - typed results (JSON-serializable)
//! - `calculate(&input, ..) -> *Result` - the pure formula
//! - `descriptor()` - the registry entry: schema, compute, projector
//!
//! Formulas never fail on validated input. Degenerate cases produce the
//! sentinels described in [`crate::numeric`].
//!
//! ## Available Calculators
//!
//! - [`solar`] - PV array/battery/inverter sizing, bill payback
//! - [`generator`] - diesel fuel and runtime, generator sizing and TCO
//! - [`reliability`] - controls alarm/MTBF, diagnostics resolution
//! - [`ups`] - battery runtime, UPS sizing and downtime cost
//! - [`automation`] - cycle time and throughput
//! - [`pumps`] - pump hydraulics, solar water pumping
//! - [`incinerator`] - thermal load, compliance ROI
//! - [`motors`] - rewinding current, rewind vs replace
//! - [`water`] - county water vs borehole
//! - [`structural`] - beam sizing with standard sections
//! - [`fabrication`] - import vs local fabrication
//! - [`power_quality`] - power factor correction and transformer sizing
//! - [`cooling`] - AC cooling load and unit sizing

pub mod automation;
pub mod cooling;
pub mod fabrication;
pub mod generator;
pub mod incinerator;
pub mod motors;
pub mod power_quality;
pub mod pumps;
pub mod reliability;
pub mod solar;
pub mod structural;
pub mod ups;
pub mod water;

use crate::registry::DomainDescriptor;

/// Every built-in calculator, in display order.
pub fn builtin() -> Vec<DomainDescriptor> {
    vec![
        solar::sizing_descriptor(),
        generator::fuel_descriptor(),
        reliability::controls_descriptor(),
        ups::runtime_descriptor(),
        automation::descriptor(),
        pumps::hydraulics_descriptor(),
        incinerator::thermal_descriptor(),
        motors::rewinding_descriptor(),
        reliability::diagnostics_descriptor(),
        water::descriptor(),
        pumps::solar_pump_descriptor(),
        structural::descriptor(),
        fabrication::descriptor(),
        ups::sizing_descriptor(),
        solar::payback_descriptor(),
        generator::sizing_descriptor(),
        motors::rewind_vs_replace_descriptor(),
        incinerator::compliance_descriptor(),
        power_quality::descriptor(),
        cooling::descriptor(),
    ]
}

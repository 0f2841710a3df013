//! # Controls and Diagnostics
//!
//! Observation-based reliability ratios.
//!
//! ```text
//! λ    = alarms / hours            MTBF = 1/λ  (∞ when λ = 0)
//! SSR  = successful / total starts
//! RR   = resolved / reported       T_avg = Σt / resolved  (0 when resolved = 0)
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::numeric::{ratio_or_zero, reciprocal_or_infinity};
use crate::outcome::Outcome;
use crate::registry::DomainDescriptor;
use crate::schema::FieldSpec;
use crate::settings::Assumptions;
use crate::validation::ParsedInputs;

// ============================================================================
// Controls reliability
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlsInput {
    pub alarms: f64,
    pub observation_hours: f64,
    pub successful_starts: f64,
    pub total_starts: f64,
}

impl ControlsInput {
    pub fn from_parsed(parsed: &ParsedInputs) -> CalcResult<Self> {
        Ok(ControlsInput {
            alarms: parsed.require("alarms")?,
            observation_hours: parsed.require("timeH")?,
            successful_starts: parsed.require("startsOK")?,
            total_starts: parsed.require("startsTot")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlsResult {
    pub alarm_rate: f64,
    /// Infinite when no alarm was observed
    pub mtbf_h: f64,
    pub start_success_ratio: f64,
}

impl ControlsResult {
    pub fn to_outcome(&self) -> Outcome {
        Outcome::new()
            .with("Alarm rate (per h)", self.alarm_rate)
            .with("MTBF (h)", self.mtbf_h)
            .with("Start success ratio", self.start_success_ratio)
    }
}

pub fn calculate_controls(input: &ControlsInput) -> ControlsResult {
    let alarm_rate = ratio_or_zero(input.alarms, input.observation_hours);
    ControlsResult {
        alarm_rate,
        mtbf_h: reciprocal_or_infinity(alarm_rate),
        start_success_ratio: ratio_or_zero(input.successful_starts, input.total_starts),
    }
}

pub fn controls_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::number("alarms", "Alarms observed").min(0.0).required(),
        FieldSpec::number("timeH", "Observation time").unit("h").min(0.1).required(),
        FieldSpec::number("startsOK", "Successful starts").min(0.0).required(),
        FieldSpec::number("startsTot", "Total starts").min(1.0).required(),
    ]
}

fn compute_controls(parsed: &ParsedInputs, _: &Assumptions) -> CalcResult<Outcome> {
    let input = ControlsInput::from_parsed(parsed)?;
    Ok(calculate_controls(&input).to_outcome())
}

pub fn controls_descriptor() -> DomainDescriptor {
    DomainDescriptor {
        id: "controls-reliability",
        label: "Controls",
        summary: "Alarm rate, MTBF and start success ratio",
        inputs: controls_fields(),
        compute: compute_controls,
        projector: None,
    }
}

// ============================================================================
// Diagnostics resolution
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticsInput {
    pub reported: f64,
    pub resolved: f64,
    /// Sum of resolution times (h)
    pub total_resolution_hours: f64,
}

impl DiagnosticsInput {
    pub fn from_parsed(parsed: &ParsedInputs) -> CalcResult<Self> {
        Ok(DiagnosticsInput {
            reported: parsed.require("reported")?,
            resolved: parsed.require("resolved")?,
            total_resolution_hours: parsed.require("sumTime")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticsResult {
    pub resolution_rate: f64,
    pub average_resolution_h: f64,
}

impl DiagnosticsResult {
    pub fn to_outcome(&self) -> Outcome {
        Outcome::new()
            .with("Resolution rate (ratio)", self.resolution_rate)
            .with("Avg time to resolve (h)", self.average_resolution_h)
    }
}

pub fn calculate_diagnostics(input: &DiagnosticsInput) -> DiagnosticsResult {
    DiagnosticsResult {
        resolution_rate: ratio_or_zero(input.resolved, input.reported),
        average_resolution_h: ratio_or_zero(input.total_resolution_hours, input.resolved),
    }
}

pub fn diagnostics_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::number("reported", "Errors reported").min(1.0).required(),
        FieldSpec::number("resolved", "Errors resolved").min(0.0).required(),
        FieldSpec::number("sumTime", "Sum resolution time").unit("h").min(0.0).required(),
    ]
}

fn compute_diagnostics(parsed: &ParsedInputs, _: &Assumptions) -> CalcResult<Outcome> {
    let input = DiagnosticsInput::from_parsed(parsed)?;
    Ok(calculate_diagnostics(&input).to_outcome())
}

pub fn diagnostics_descriptor() -> DomainDescriptor {
    DomainDescriptor {
        id: "diagnostics-resolution",
        label: "Diagnostics Hub",
        summary: "Fault resolution rate and average time to resolve",
        inputs: diagnostics_fields(),
        compute: compute_diagnostics,
        projector: None,
    }
}

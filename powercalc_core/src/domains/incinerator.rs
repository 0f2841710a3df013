//! # Incinerators
//!
//! Thermal load of a waste batch, and the return on a compliant incinerator
//! measured against the regulatory fines it avoids.

use serde::{Deserialize, Serialize};

use crate::economics::{compare_costs, ComparisonResult, SAVINGS_HORIZON_YEARS};
use crate::errors::CalcResult;
use crate::numeric::ratio_or_zero;
use crate::outcome::Outcome;
use crate::projection::{savings_line, Projection};
use crate::registry::DomainDescriptor;
use crate::schema::FieldSpec;
use crate::settings::Assumptions;
use crate::units::percent_to_fraction;
use crate::validation::ParsedInputs;

// ============================================================================
// Thermal load
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermalInput {
    /// Waste mass (kg)
    pub mass_kg: f64,
    /// Waste lower heating value (MJ/kg)
    pub waste_lhv: f64,
    /// System efficiency (0-1)
    pub efficiency: f64,
    /// Support fuel lower heating value (MJ/Nm³)
    pub fuel_lhv: f64,
}

impl ThermalInput {
    pub fn from_parsed(parsed: &ParsedInputs) -> CalcResult<Self> {
        Ok(ThermalInput {
            mass_kg: parsed.require("mass")?,
            waste_lhv: parsed.require("lhv")?,
            efficiency: parsed.require("eff")?,
            fuel_lhv: parsed.require("fuelLHV")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermalResult {
    pub thermal_energy_mj: f64,
    pub fuel_gas_nm3: f64,
}

impl ThermalResult {
    pub fn to_outcome(&self) -> Outcome {
        Outcome::new()
            .with("Thermal energy (MJ)", self.thermal_energy_mj)
            .with("Fuel gas flow (Nm3)", self.fuel_gas_nm3)
    }
}

/// `E = m × LHV / η`, `V_fuel = E / LHV_fuel`
pub fn calculate_thermal(input: &ThermalInput) -> ThermalResult {
    let thermal_energy_mj = ratio_or_zero(input.mass_kg * input.waste_lhv, input.efficiency);
    ThermalResult {
        thermal_energy_mj,
        fuel_gas_nm3: ratio_or_zero(thermal_energy_mj, input.fuel_lhv),
    }
}

pub fn thermal_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::number("mass", "Waste mass").unit("kg").min(1.0).required(),
        FieldSpec::number("lhv", "Waste LHV").unit("MJ/kg").range(5.0, 25.0).placeholder("10").required(),
        FieldSpec::number("eff", "System efficiency").range(0.3, 0.9).placeholder("0.7").required(),
        FieldSpec::number("fuelLHV", "Fuel LHV").unit("MJ/Nm3").range(30.0, 45.0).placeholder("35").required(),
    ]
}

fn compute_thermal(parsed: &ParsedInputs, _: &Assumptions) -> CalcResult<Outcome> {
    let input = ThermalInput::from_parsed(parsed)?;
    Ok(calculate_thermal(&input).to_outcome())
}

pub fn thermal_descriptor() -> DomainDescriptor {
    DomainDescriptor {
        id: "incinerator-thermal",
        label: "Incinerators",
        summary: "Thermal energy and support fuel for a waste batch",
        inputs: thermal_fields(),
        compute: compute_thermal,
        projector: None,
    }
}

// ============================================================================
// Compliance ROI
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceInput {
    /// Chance of being fined in a year without the system (0-1)
    pub fine_probability: f64,
    pub average_fine: f64,
    pub system_cost: f64,
    pub annual_maintenance: f64,
}

impl ComplianceInput {
    pub fn from_parsed(parsed: &ParsedInputs) -> CalcResult<Self> {
        Ok(ComplianceInput {
            fine_probability: percent_to_fraction(parsed.require("fineProbability")?),
            average_fine: parsed.require("averageFine")?,
            system_cost: parsed.require("systemCost")?,
            annual_maintenance: parsed.require("annualMaintenance")?,
        })
    }

    /// Expected yearly fines without the system
    pub fn annual_risk(&self) -> f64 {
        self.fine_probability * self.average_fine
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceResult {
    pub comparison: ComparisonResult,
}

impl ComplianceResult {
    pub fn to_outcome(&self) -> Outcome {
        let mut outcome = Outcome::new()
            .with("Annual fine risk", self.comparison.option_a_cost)
            .with("Annual maintenance", self.comparison.option_b_cost);
        self.comparison.append_to(&mut outcome);
        outcome.push("Payback period (months)", self.comparison.payback_months());
        outcome
    }
}

/// Fines risked each year against upkeep of a compliant system.
pub fn calculate_compliance(input: &ComplianceInput) -> ComplianceResult {
    ComplianceResult {
        comparison: compare_costs(input.annual_risk(), input.annual_maintenance, input.system_cost),
    }
}

pub fn compliance_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::number("fineProbability", "Annual fine probability").unit("%").range(0.0, 100.0).default_number(85.0),
        FieldSpec::number("averageFine", "Average fine").unit("KES").min(0.0).default_number(3_500_000.0),
        FieldSpec::number("systemCost", "Incinerator system cost").unit("KES").min(0.0).required(),
        FieldSpec::number("annualMaintenance", "Annual maintenance").unit("KES").min(0.0).default_number(300_000.0),
    ]
}

fn compute_compliance(parsed: &ParsedInputs, _: &Assumptions) -> CalcResult<Outcome> {
    let input = ComplianceInput::from_parsed(parsed)?;
    Ok(calculate_compliance(&input).to_outcome())
}

fn project_compliance(outcome: &Outcome, parsed: &ParsedInputs) -> Projection {
    let switching = parsed.number("systemCost").unwrap_or(0.0);
    savings_line("Cumulative Savings", outcome, switching, SAVINGS_HORIZON_YEARS)
}

pub fn compliance_descriptor() -> DomainDescriptor {
    DomainDescriptor {
        id: "incinerator-compliance",
        label: "Incinerator Compliance ROI",
        summary: "Payback of a compliant incinerator against expected fines",
        inputs: compliance_fields(),
        compute: compute_compliance,
        projector: Some(project_compliance),
    }
}

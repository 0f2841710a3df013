//! # Motors/Rewinding
//!
//! Electrical input and line current of a three-phase motor, and the rewind
//! vs replace decision for a failed one.

use serde::{Deserialize, Serialize};

use crate::equations::{input_power, three_phase_current};
use crate::errors::CalcResult;
use crate::numeric::{non_negative, ratio_or_zero};
use crate::outcome::Outcome;
use crate::registry::DomainDescriptor;
use crate::schema::FieldSpec;
use crate::settings::{Assumptions, MotorAssumptions};
use crate::units::{hp_to_kw, percent_to_fraction, MONTHS_PER_YEAR};
use crate::validation::ParsedInputs;

// ============================================================================
// Input power and current
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewindingInput {
    /// Shaft output (kW)
    pub shaft_power_kw: f64,
    pub efficiency: f64,
    /// Line voltage (V)
    pub line_voltage: f64,
    pub power_factor: f64,
}

impl RewindingInput {
    pub fn from_parsed(parsed: &ParsedInputs) -> CalcResult<Self> {
        Ok(RewindingInput {
            shaft_power_kw: parsed.require("pout")?,
            efficiency: parsed.require("eff")?,
            line_voltage: parsed.require("V")?,
            power_factor: parsed.require("pf")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewindingResult {
    pub input_power_kw: f64,
    pub phase_current_a: f64,
}

impl RewindingResult {
    pub fn to_outcome(&self) -> Outcome {
        Outcome::new()
            .with("Input power (kW)", self.input_power_kw)
            .with("Phase current (A)", self.phase_current_a)
    }
}

/// `P_in = P_out / η`, `I = P_in × 1000 / (√3 × V × pf)`
pub fn calculate_rewinding(input: &RewindingInput) -> RewindingResult {
    let input_power_kw = input_power(input.shaft_power_kw, input.efficiency);
    RewindingResult {
        input_power_kw,
        phase_current_a: three_phase_current(input_power_kw, input.line_voltage, input.power_factor),
    }
}

pub fn rewinding_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::number("pout", "Shaft power").unit("kW").min(0.1).required(),
        FieldSpec::number("eff", "Efficiency").range(0.6, 1.0).placeholder("0.9").required(),
        FieldSpec::number("V", "Line voltage").unit("V").min(200.0).required(),
        FieldSpec::number("pf", "Power factor").range(0.5, 1.0).placeholder("0.85").required(),
    ]
}

fn compute_rewinding(parsed: &ParsedInputs, _: &Assumptions) -> CalcResult<Outcome> {
    let input = RewindingInput::from_parsed(parsed)?;
    Ok(calculate_rewinding(&input).to_outcome())
}

pub fn rewinding_descriptor() -> DomainDescriptor {
    DomainDescriptor {
        id: "motor-rewinding",
        label: "Motors/Rewinding",
        summary: "Electrical input power and line current of a three-phase motor",
        inputs: rewinding_fields(),
        compute: compute_rewinding,
        projector: None,
    }
}

// ============================================================================
// Rewind vs replace
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotorType {
    Induction,
    Synchronous,
    Dc,
    Servo,
}

impl MotorType {
    pub const OPTIONS: [&'static str; 4] = ["induction", "synchronous", "dc", "servo"];

    pub fn from_option(option: &str) -> Option<Self> {
        match option {
            "induction" => Some(MotorType::Induction),
            "synchronous" => Some(MotorType::Synchronous),
            "dc" => Some(MotorType::Dc),
            "servo" => Some(MotorType::Servo),
            _ => None,
        }
    }

    /// New motor price per horsepower (KES)
    pub fn cost_per_hp(&self) -> f64 {
        match self {
            MotorType::Induction => 8_000.0,
            MotorType::Synchronous => 12_000.0,
            MotorType::Dc => 10_000.0,
            MotorType::Servo => 15_000.0,
        }
    }

    /// Efficiency the energy baseline is referred to
    pub fn reference_efficiency(&self, motor: &MotorAssumptions) -> f64 {
        match self {
            MotorType::Induction => motor.induction_efficiency,
            _ => motor.other_efficiency,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewindInput {
    pub horsepower: f64,
    /// Running hours per year
    pub operating_hours: f64,
    /// Electricity tariff (KES/kWh)
    pub electricity_rate: f64,
    /// Efficiency gain of a new motor (0-1)
    pub efficiency_gain: f64,
    /// Rewind price as a share of a new motor (0-1)
    pub rewind_cost_fraction: f64,
    pub motor_type: MotorType,
}

impl RewindInput {
    pub fn from_parsed(parsed: &ParsedInputs) -> CalcResult<Self> {
        let motor_type = parsed.require_choice("motorType")?;
        Ok(RewindInput {
            horsepower: parsed.require("hp")?,
            operating_hours: parsed.require("operatingHours")?,
            electricity_rate: parsed.require("electricityRate")?,
            efficiency_gain: percent_to_fraction(parsed.require("efficiencyGain")?),
            rewind_cost_fraction: percent_to_fraction(parsed.require("rewindCostPercent")?),
            motor_type: MotorType::from_option(motor_type).unwrap_or(MotorType::Induction),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewindResult {
    pub replacement_cost: f64,
    pub rewind_cost: f64,
    /// Up-front saving of rewinding instead of replacing
    pub rewind_savings: f64,
    /// Yearly energy saving a new, more efficient motor would bring
    pub annual_energy_savings: f64,
    /// Months for the energy saving to cover the rewind cost; 0 when none
    pub payback_months: f64,
    /// kg CO₂ per year
    pub carbon_avoided_kg: f64,
}

impl RewindResult {
    pub fn to_outcome(&self) -> Outcome {
        Outcome::new()
            .with("Replacement cost", self.replacement_cost)
            .with("Rewind cost", self.rewind_cost)
            .with("Rewind savings", self.rewind_savings)
            .with("Annual energy savings", self.annual_energy_savings)
            .with("Payback period (months)", self.payback_months)
            .with("CO2 avoided (kg/yr)", self.carbon_avoided_kg)
    }
}

/// Price both options and the energy case for a new motor.
///
/// ```text
/// replacement = hp × cost_per_hp
/// rewind      = replacement × rewind_fraction
/// savings     = hp × 0.746 × hours × rate / η_ref × gain
/// payback     = rewind / savings × 12          (months)
/// CO₂         = hp × 0.746 × hours × gain / η_induction × factor
/// ```
pub fn calculate_rewind(input: &RewindInput, motor: &MotorAssumptions) -> RewindResult {
    let kw = hp_to_kw(input.horsepower);
    let replacement_cost = non_negative(input.horsepower * input.motor_type.cost_per_hp());
    let rewind_cost = replacement_cost * input.rewind_cost_fraction;

    let baseline_spend = ratio_or_zero(
        kw * input.operating_hours * input.electricity_rate,
        input.motor_type.reference_efficiency(motor),
    );
    let annual_energy_savings = non_negative(baseline_spend * input.efficiency_gain);

    let energy_saved_kwh = ratio_or_zero(
        kw * input.operating_hours * input.efficiency_gain,
        motor.induction_efficiency,
    );

    RewindResult {
        replacement_cost,
        rewind_cost,
        rewind_savings: non_negative(replacement_cost - rewind_cost),
        annual_energy_savings,
        payback_months: ratio_or_zero(rewind_cost, annual_energy_savings) * MONTHS_PER_YEAR,
        carbon_avoided_kg: non_negative(energy_saved_kwh * motor.carbon_kg_per_kwh),
    }
}

pub fn rewind_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::number("hp", "Motor rating").unit("hp").min(0.0).required(),
        FieldSpec::number("operatingHours", "Operating hours per year").unit("h").range(0.0, 8760.0).required(),
        FieldSpec::number("electricityRate", "Electricity rate").unit("KES/kWh").min(0.0).default_number(22.0),
        FieldSpec::number("efficiencyGain", "Efficiency gain of new motor").unit("%").range(0.0, 100.0).default_number(8.0),
        FieldSpec::number("rewindCostPercent", "Rewind cost").unit("% of new").range(0.0, 100.0).default_number(40.0),
        FieldSpec::choice("motorType", "Motor type", MotorType::OPTIONS).default_choice("induction"),
    ]
}

fn compute_rewind(parsed: &ParsedInputs, assumptions: &Assumptions) -> CalcResult<Outcome> {
    let input = RewindInput::from_parsed(parsed)?;
    Ok(calculate_rewind(&input, &assumptions.motor).to_outcome())
}

pub fn rewind_vs_replace_descriptor() -> DomainDescriptor {
    DomainDescriptor {
        id: "motor-rewind-vs-replace",
        label: "Rewind vs Replace",
        summary: "Rewind cost against a new motor and its energy savings",
        inputs: rewind_fields(),
        compute: compute_rewind,
        projector: None,
    }
}

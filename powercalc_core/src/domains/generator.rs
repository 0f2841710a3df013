//! # Diesel Generators
//!
//! Fuel burn and runtime of a running set, and sizing of a new set from
//! floor area with a simple total-cost-of-ownership figure.
//!
//! ## Fuel Model
//!
//! Linear consumption with a slope `α` (L/kWh) and idle offset `β` (L/h):
//!
//! ```text
//! LF = P_load / P_rated
//! F  = α × P_load + β          (L/h)
//! t  = V_fuel / F              (h, 0 when F <= 0)
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::numeric::{non_negative, ratio_or_zero};
use crate::outcome::Outcome;
use crate::projection::{ChartKind, Projection};
use crate::registry::DomainDescriptor;
use crate::schema::FieldSpec;
use crate::settings::{Assumptions, GeneratorAssumptions};
use crate::units::MONTHS_PER_YEAR;
use crate::validation::ParsedInputs;

/// Hours drawn on the fuel projection (0..=FUEL_CHART_HOURS)
const FUEL_CHART_HOURS: u32 = 5;

/// Days per month used for the monthly diesel estimate
const DAYS_PER_MONTH: f64 = 30.0;

// ============================================================================
// Fuel and runtime
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DieselFuelInput {
    /// Electrical load (kW)
    pub load_kw: f64,
    /// Generator rating (kW)
    pub rated_kw: f64,
    /// Fuel slope α (L/kWh)
    pub fuel_slope: f64,
    /// Idle offset β (L/h)
    pub idle_offset: f64,
    /// Fuel in the tank (L)
    pub fuel_volume: f64,
}

impl DieselFuelInput {
    pub fn from_parsed(parsed: &ParsedInputs) -> CalcResult<Self> {
        Ok(DieselFuelInput {
            load_kw: parsed.require("pload")?,
            rated_kw: parsed.require("prated")?,
            fuel_slope: parsed.require("alpha")?,
            idle_offset: parsed.require("beta")?,
            fuel_volume: parsed.require("fuelVol")?,
        })
    }

    /// Consumption rate F = α × P + β (L/h)
    pub fn fuel_rate(&self) -> f64 {
        self.fuel_slope * self.load_kw + self.idle_offset
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DieselFuelResult {
    pub load_factor: f64,
    pub fuel_rate_lph: f64,
    pub runtime_h: f64,
}

impl DieselFuelResult {
    pub fn to_outcome(&self) -> Outcome {
        Outcome::new()
            .with("Load factor (ratio)", self.load_factor)
            .with("Fuel consumption (L/h)", self.fuel_rate_lph)
            .with("Runtime (h)", self.runtime_h)
    }
}

pub fn calculate_fuel(input: &DieselFuelInput) -> DieselFuelResult {
    let fuel_rate_lph = input.fuel_rate();
    DieselFuelResult {
        load_factor: ratio_or_zero(input.load_kw, input.rated_kw),
        fuel_rate_lph,
        runtime_h: ratio_or_zero(input.fuel_volume, fuel_rate_lph),
    }
}

pub fn fuel_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::number("pload", "Load").unit("kW").min(1.0).required(),
        FieldSpec::number("prated", "Generator rated power").unit("kW").min(1.0).required(),
        FieldSpec::number("alpha", "Fuel slope").unit("L/kWh").range(0.15, 0.35).placeholder("0.25").required(),
        FieldSpec::number("beta", "Idle offset").unit("L/h").min(0.0).placeholder("0").required(),
        FieldSpec::number("fuelVol", "Fuel volume").unit("L").min(0.0).placeholder("100").required(),
    ]
}

fn compute_fuel(parsed: &ParsedInputs, _: &Assumptions) -> CalcResult<Outcome> {
    let input = DieselFuelInput::from_parsed(parsed)?;
    Ok(calculate_fuel(&input).to_outcome())
}

/// Litres burned after each of the first few hours at the computed rate.
fn project_fuel(outcome: &Outcome, _: &ParsedInputs) -> Projection {
    let rate = outcome.number("Fuel consumption (L/h)").unwrap_or(0.0);
    (0..=FUEL_CHART_HOURS).fold(
        Projection::new(ChartKind::Line, "Fuel Consumption (L)"),
        |projection, hour| projection.point(format!("{}h", hour), rate * f64::from(hour)),
    )
}

pub fn fuel_descriptor() -> DomainDescriptor {
    DomainDescriptor {
        id: "diesel-fuel",
        label: "Diesel Generators",
        summary: "Load factor, fuel burn and runtime on a tank",
        inputs: fuel_fields(),
        compute: compute_fuel,
        projector: Some(project_fuel),
    }
}

// ============================================================================
// Sizing and five-year TCO
// ============================================================================

/// Generator sizing from the floor area served.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorSizingInput {
    /// Served floor area (m²)
    pub area_m2: f64,
    /// Load density (W/m²)
    pub load_density: f64,
    /// Growth and safety factor
    pub safety_factor: f64,
}

impl GeneratorSizingInput {
    pub fn from_parsed(parsed: &ParsedInputs) -> CalcResult<Self> {
        Ok(GeneratorSizingInput {
            area_m2: parsed.require("area")?,
            load_density: parsed.require("density")?,
            safety_factor: parsed.require("factor")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorSizingResult {
    pub load_kw: f64,
    pub rating_kva: f64,
    pub capital_cost: f64,
    pub monthly_diesel_cost: f64,
    pub annual_maintenance: f64,
    pub resale_value: f64,
    pub total_cost_of_ownership: f64,
}

impl GeneratorSizingResult {
    pub fn to_outcome(&self) -> Outcome {
        Outcome::new()
            .with("Design load (kW)", self.load_kw)
            .with("Generator rating (kVA)", self.rating_kva)
            .with("Capital cost", self.capital_cost)
            .with("Monthly diesel cost", self.monthly_diesel_cost)
            .with("Annual maintenance", self.annual_maintenance)
            .with("Resale value", self.resale_value)
            .with("5-year TCO", self.total_cost_of_ownership)
    }
}

/// Size the set and cost it over the ownership horizon.
///
/// ```text
/// kW  = area × density × factor / 1000
/// kVA = kW / pf
/// TCO = capital + diesel/month × 12 × years + maintenance × years - resale
/// ```
pub fn calculate_sizing(input: &GeneratorSizingInput, costs: &GeneratorAssumptions) -> GeneratorSizingResult {
    let load_kw = non_negative(input.area_m2 * input.load_density * input.safety_factor / 1000.0);
    let rating_kva = ratio_or_zero(load_kw, costs.power_factor);

    let capital_cost = rating_kva * costs.capital_cost_per_kva;
    let monthly_diesel_cost = rating_kva * costs.diesel_cost_per_kva_day * DAYS_PER_MONTH;
    let annual_maintenance = rating_kva * costs.maintenance_per_kva_year;
    let resale_value = capital_cost * costs.resale_fraction;

    let total_cost_of_ownership = non_negative(
        capital_cost
            + monthly_diesel_cost * MONTHS_PER_YEAR * costs.tco_years
            + annual_maintenance * costs.tco_years
            - resale_value,
    );

    GeneratorSizingResult {
        load_kw,
        rating_kva,
        capital_cost,
        monthly_diesel_cost,
        annual_maintenance,
        resale_value,
        total_cost_of_ownership,
    }
}

pub fn sizing_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::number("area", "Floor area served").unit("m²").min(0.0).required(),
        FieldSpec::number("density", "Load density").unit("W/m²").min(1.0).default_number(60.0),
        FieldSpec::number("factor", "Safety factor").range(1.0, 2.0).default_number(1.25),
    ]
}

fn compute_sizing(parsed: &ParsedInputs, assumptions: &Assumptions) -> CalcResult<Outcome> {
    let input = GeneratorSizingInput::from_parsed(parsed)?;
    Ok(calculate_sizing(&input, &assumptions.generator).to_outcome())
}

pub fn sizing_descriptor() -> DomainDescriptor {
    DomainDescriptor {
        id: "generator-sizing",
        label: "Generator Sizing & 5-Year TCO",
        summary: "kVA rating from floor area, with capital, diesel, upkeep and resale",
        inputs: sizing_fields(),
        compute: compute_sizing,
        projector: None,
    }
}

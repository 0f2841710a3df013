//! # County Water vs Borehole
//!
//! Annual cost of buying county water (with a penalty for the share of
//! demand an unreliable supply fails to meet) against the annual cost of
//! owning a borehole, fed through the economic comparator with the drilling
//! cost as the switching cost.
//!
//! ```text
//! county   = rate × usage × 12 × (1 + (1 - reliability) × shortage_multiplier)
//! borehole = drilling / amortization + maintenance
//!          + quality_maintenance + quality_treatment / treatment_spread
//! ```
//!
//! ## Example
//!
//! ```rust
//! use powercalc_core::domains::water::{calculate, WaterQuality, WaterSourceInput};
//! use powercalc_core::settings::WaterAssumptions;
//!
//! let input = WaterSourceInput {
//!     county_rate: 120.0,
//!     monthly_usage_m3: 1000.0,
//!     reliability: 0.8,
//!     drilling_cost: 1_500_000.0,
//!     annual_maintenance: 50_000.0,
//!     quality: WaterQuality::Good,
//! };
//! let result = calculate(&input, &WaterAssumptions::default());
//! assert!((result.borehole_annual_cost - 150_000.0).abs() < 1e-6);
//! assert_eq!(result.comparison.payback_period_years, 0.8);
//! ```

use serde::{Deserialize, Serialize};

use crate::economics::{compare_costs, ComparisonResult, SAVINGS_HORIZON_YEARS};
use crate::errors::CalcResult;
use crate::numeric::{non_negative, ratio_or_zero};
use crate::outcome::Outcome;
use crate::projection::{savings_line, Projection};
use crate::registry::DomainDescriptor;
use crate::schema::FieldSpec;
use crate::settings::{Assumptions, WaterAssumptions};
use crate::units::{percent_to_fraction, MONTHS_PER_YEAR};
use crate::validation::ParsedInputs;

/// Raw water quality at the borehole; sets treatment and upkeep costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaterQuality {
    Good,
    Moderate,
    Poor,
    Saline,
}

impl WaterQuality {
    pub const OPTIONS: [&'static str; 4] = ["good", "moderate", "poor", "saline"];

    pub fn from_option(option: &str) -> Option<Self> {
        match option {
            "good" => Some(WaterQuality::Good),
            "moderate" => Some(WaterQuality::Moderate),
            "poor" => Some(WaterQuality::Poor),
            "saline" => Some(WaterQuality::Saline),
            _ => None,
        }
    }

    /// One-off treatment plant cost (KES)
    pub fn treatment_cost(&self) -> f64 {
        match self {
            WaterQuality::Good => 50_000.0,
            WaterQuality::Moderate => 100_000.0,
            WaterQuality::Poor => 250_000.0,
            WaterQuality::Saline => 500_000.0,
        }
    }

    /// Extra yearly maintenance (KES)
    pub fn maintenance(&self) -> f64 {
        match self {
            WaterQuality::Good => 20_000.0,
            WaterQuality::Moderate => 40_000.0,
            WaterQuality::Poor => 80_000.0,
            WaterQuality::Saline => 150_000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterSourceInput {
    /// County tariff (KES/m³)
    pub county_rate: f64,
    /// Monthly consumption (m³)
    pub monthly_usage_m3: f64,
    /// Share of demand the county supply actually delivers (0-1)
    pub reliability: f64,
    pub drilling_cost: f64,
    pub annual_maintenance: f64,
    pub quality: WaterQuality,
}

impl WaterSourceInput {
    pub fn from_parsed(parsed: &ParsedInputs) -> CalcResult<Self> {
        let quality = parsed.require_choice("waterQuality")?;
        Ok(WaterSourceInput {
            county_rate: parsed.require("countyRate")?,
            monthly_usage_m3: parsed.require("monthlyUsage")?,
            reliability: percent_to_fraction(parsed.require("reliability")?),
            drilling_cost: parsed.require("drillingCost")?,
            annual_maintenance: parsed.require("annualMaintenance")?,
            quality: WaterQuality::from_option(quality).unwrap_or(WaterQuality::Good),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterSourceResult {
    pub county_annual_cost: f64,
    pub borehole_annual_cost: f64,
    pub comparison: ComparisonResult,
}

impl WaterSourceResult {
    pub fn to_outcome(&self) -> Outcome {
        let mut outcome = Outcome::new()
            .with("County annual cost", self.county_annual_cost)
            .with("Borehole annual cost", self.borehole_annual_cost);
        self.comparison.append_to(&mut outcome);
        outcome
    }
}

/// Yearly county bill including the shortage penalty. 0 with no usage.
pub fn county_annual_cost(input: &WaterSourceInput, water: &WaterAssumptions) -> f64 {
    if input.monthly_usage_m3 <= 0.0 {
        return 0.0;
    }
    let base = input.county_rate * input.monthly_usage_m3 * MONTHS_PER_YEAR;
    let shortage = base * (1.0 - input.reliability) * water.shortage_multiplier;
    non_negative(base + shortage)
}

/// Yearly cost of owning the borehole.
pub fn borehole_annual_cost(input: &WaterSourceInput, water: &WaterAssumptions) -> f64 {
    let amortized_drilling = ratio_or_zero(input.drilling_cost, water.amortization_years);
    let treatment = ratio_or_zero(input.quality.treatment_cost(), water.treatment_spread_years);
    non_negative(amortized_drilling + input.annual_maintenance + input.quality.maintenance() + treatment)
}

pub fn calculate(input: &WaterSourceInput, water: &WaterAssumptions) -> WaterSourceResult {
    let county = county_annual_cost(input, water);
    let borehole = borehole_annual_cost(input, water);
    WaterSourceResult {
        county_annual_cost: county,
        borehole_annual_cost: borehole,
        comparison: compare_costs(county, borehole, input.drilling_cost),
    }
}

pub fn fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::number("countyRate", "County water rate").unit("KES/m³").range(0.0, 500.0).default_number(120.0),
        FieldSpec::number("monthlyUsage", "Monthly usage").unit("m³").min(0.0).required(),
        FieldSpec::number("reliability", "County supply reliability").unit("%").range(0.0, 100.0).default_number(80.0),
        FieldSpec::number("drillingCost", "Drilling cost").unit("KES").min(0.0).required(),
        FieldSpec::number("annualMaintenance", "Borehole annual maintenance").unit("KES").min(0.0).default_number(0.0),
        FieldSpec::choice("waterQuality", "Water quality", WaterQuality::OPTIONS).default_choice("good"),
    ]
}

fn compute(parsed: &ParsedInputs, assumptions: &Assumptions) -> CalcResult<Outcome> {
    let input = WaterSourceInput::from_parsed(parsed)?;
    Ok(calculate(&input, &assumptions.water).to_outcome())
}

fn project(outcome: &Outcome, parsed: &ParsedInputs) -> Projection {
    let drilling = parsed.number("drillingCost").unwrap_or(0.0);
    savings_line("Cumulative Savings vs County", outcome, drilling, SAVINGS_HORIZON_YEARS)
}

pub fn descriptor() -> DomainDescriptor {
    DomainDescriptor {
        id: "water-source-economics",
        label: "County Water vs Borehole",
        summary: "Annual cost of county water against owning a borehole, with payback",
        inputs: fields(),
        compute,
        projector: Some(project),
    }
}

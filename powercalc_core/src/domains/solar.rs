//! # Solar Systems
//!
//! Off-grid PV sizing and a grid-bill payback check.
//!
//! ## Sizing
//!
//! ```text
//! P_array = panels × P_panel                        (W)
//! E_daily = P_array × PSH × η                       (Wh/day)
//! C_Ah    = (E_daily × autonomy) / (V_dc × DoD)     (Ah)
//! P_inv   = P_peak × SF                             (W)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use powercalc_core::domains::solar::{calculate_sizing, SolarSizingInput};
//!
//! let input = SolarSizingInput {
//!     panels: 10.0,
//!     panel_watts: 300.0,
//!     peak_sun_hours: 5.5,
//!     efficiency: 0.8,
//!     autonomy_days: 1.0,
//!     system_voltage: 48.0,
//!     depth_of_discharge: 0.5,
//!     peak_load: 2000.0,
//!     safety_factor: 1.25,
//! };
//! let result = calculate_sizing(&input);
//! assert_eq!(result.array_power_w, 3000.0);
//! assert_eq!(result.inverter_size_w, 2500.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::economics::{compare_costs, ComparisonResult, SAVINGS_HORIZON_YEARS};
use crate::errors::CalcResult;
use crate::numeric::ratio_or_zero;
use crate::outcome::Outcome;
use crate::projection::{savings_line, ChartKind, Projection};
use crate::registry::DomainDescriptor;
use crate::schema::FieldSpec;
use crate::settings::Assumptions;
use crate::units::MONTHS_PER_YEAR;
use crate::validation::ParsedInputs;

// ============================================================================
// Sizing
// ============================================================================

/// Off-grid PV system inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolarSizingInput {
    pub panels: f64,
    /// Nameplate wattage per panel (W)
    pub panel_watts: f64,
    /// Peak sun hours (h/day)
    pub peak_sun_hours: f64,
    /// Overall system efficiency (0-1)
    pub efficiency: f64,
    pub autonomy_days: f64,
    /// Battery bank voltage (V)
    pub system_voltage: f64,
    /// Allowed depth of discharge (0-1)
    pub depth_of_discharge: f64,
    /// Peak AC load (W)
    pub peak_load: f64,
    pub safety_factor: f64,
}

impl SolarSizingInput {
    /// Read from validated form values
    pub fn from_parsed(parsed: &ParsedInputs) -> CalcResult<Self> {
        Ok(SolarSizingInput {
            panels: parsed.require("panels")?,
            panel_watts: parsed.require("panelW")?,
            peak_sun_hours: parsed.require("psh")?,
            efficiency: parsed.require("eff")?,
            autonomy_days: parsed.require("autonomy")?,
            system_voltage: parsed.require("vdc")?,
            depth_of_discharge: parsed.require("dod")?,
            peak_load: parsed.require("peakLoad")?,
            safety_factor: parsed.require("sf")?,
        })
    }
}

/// Off-grid PV sizing results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolarSizingResult {
    pub array_power_w: f64,
    pub daily_energy_wh: f64,
    pub battery_capacity_ah: f64,
    pub inverter_size_w: f64,
}

impl SolarSizingResult {
    pub fn to_outcome(&self) -> Outcome {
        Outcome::new()
            .with("Array power (W)", self.array_power_w)
            .with("Daily energy (Wh/day)", self.daily_energy_wh)
            .with("Battery capacity (Ah)", self.battery_capacity_ah)
            .with("Inverter size (W)", self.inverter_size_w)
    }
}

/// Size the array, battery bank and inverter.
pub fn calculate_sizing(input: &SolarSizingInput) -> SolarSizingResult {
    let array_power_w = input.panels * input.panel_watts;
    let daily_energy_wh = array_power_w * input.peak_sun_hours * input.efficiency;
    let battery_capacity_ah = ratio_or_zero(
        daily_energy_wh * input.autonomy_days,
        input.system_voltage * input.depth_of_discharge,
    );

    SolarSizingResult {
        array_power_w,
        daily_energy_wh,
        battery_capacity_ah,
        inverter_size_w: input.peak_load * input.safety_factor,
    }
}

pub fn sizing_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::number("panels", "Number of panels").min(1.0).required(),
        FieldSpec::number("panelW", "Panel wattage").unit("W").min(50.0).required(),
        FieldSpec::number("psh", "Peak sun hours").unit("h/day").range(1.0, 9.0).required(),
        FieldSpec::number("eff", "System efficiency").range(0.6, 1.0).placeholder("0.8").required(),
        FieldSpec::number("autonomy", "Autonomy days").unit("days").min(0.0).placeholder("1").required(),
        FieldSpec::number("vdc", "Battery/system voltage").unit("V").min(12.0).required(),
        FieldSpec::number("dod", "Depth of discharge").range(0.2, 0.9).placeholder("0.5").required(),
        FieldSpec::number("peakLoad", "Peak load").unit("W").min(100.0).required(),
        FieldSpec::number("sf", "Safety factor").range(1.1, 1.5).placeholder("1.25").required(),
    ]
}

fn compute_sizing(parsed: &ParsedInputs, _: &Assumptions) -> CalcResult<Outcome> {
    let input = SolarSizingInput::from_parsed(parsed)?;
    Ok(calculate_sizing(&input).to_outcome())
}

/// Metrics scaled so they share one axis: kW, kWh, hundreds of Ah, kW.
fn project_sizing(outcome: &Outcome, _: &ParsedInputs) -> Projection {
    let metric = |label: &str| outcome.number(label).unwrap_or(0.0);
    Projection::new(ChartKind::Bar, "Solar System Metrics")
        .point("Array Power", metric("Array power (W)") / 1000.0)
        .point("Daily Energy", metric("Daily energy (Wh/day)") / 1000.0)
        .point("Battery Capacity", metric("Battery capacity (Ah)") / 100.0)
        .point("Inverter Size", metric("Inverter size (W)") / 1000.0)
}

pub fn sizing_descriptor() -> DomainDescriptor {
    DomainDescriptor {
        id: "solar-sizing",
        label: "Solar Systems",
        summary: "PV array, battery bank and inverter sizing",
        inputs: sizing_fields(),
        compute: compute_sizing,
        projector: Some(project_sizing),
    }
}

// ============================================================================
// Bill payback
// ============================================================================

/// Grid bill vs installed solar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolarPaybackInput {
    /// Current monthly electricity bill
    pub monthly_bill: f64,
    /// Installed system cost
    pub system_cost: f64,
    /// Share of the bill the system offsets (0-1)
    pub offset_fraction: f64,
}

impl SolarPaybackInput {
    pub fn from_parsed(parsed: &ParsedInputs) -> CalcResult<Self> {
        Ok(SolarPaybackInput {
            monthly_bill: parsed.require("monthlyBill")?,
            system_cost: parsed.require("systemCost")?,
            offset_fraction: parsed.require("offsetFraction")?,
        })
    }
}

/// Verdict on a payback period, as shown beside the figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaybackRating {
    Excellent,
    Good,
    ConsiderIncentives,
    ReviewSizing,
    NotViable,
}

impl PaybackRating {
    pub fn from_years(years: f64) -> Self {
        match years {
            y if y <= 0.0 => PaybackRating::NotViable,
            y if y <= 4.0 => PaybackRating::Excellent,
            y if y <= 7.0 => PaybackRating::Good,
            y if y <= 10.0 => PaybackRating::ConsiderIncentives,
            _ => PaybackRating::ReviewSizing,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaybackRating::Excellent => "Excellent ROI",
            PaybackRating::Good => "Good investment",
            PaybackRating::ConsiderIncentives => "Consider incentives",
            PaybackRating::ReviewSizing => "Review system sizing",
            PaybackRating::NotViable => "Not viable",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolarPaybackResult {
    pub comparison: ComparisonResult,
    pub monthly_savings: f64,
    pub rating: PaybackRating,
}

impl SolarPaybackResult {
    pub fn to_outcome(&self) -> Outcome {
        let mut outcome = Outcome::new()
            .with("Annual grid cost", self.comparison.option_a_cost)
            .with("Annual cost with solar", self.comparison.option_b_cost)
            .with("Monthly savings", self.monthly_savings);
        self.comparison.append_to(&mut outcome);
        outcome.push("Verdict", self.rating.as_str());
        outcome
    }
}

/// Compare paying the full bill against paying the unoffset share.
///
/// The payback period is capped at `max_payback_years`.
pub fn calculate_payback(input: &SolarPaybackInput, assumptions: &Assumptions) -> SolarPaybackResult {
    let annual_bill = input.monthly_bill * MONTHS_PER_YEAR;
    let mut comparison = compare_costs(
        annual_bill,
        annual_bill * (1.0 - input.offset_fraction),
        input.system_cost,
    );
    comparison.payback_period_years = comparison
        .payback_period_years
        .min(assumptions.comparison.max_payback_years);

    SolarPaybackResult {
        monthly_savings: comparison.annual_savings / MONTHS_PER_YEAR,
        rating: PaybackRating::from_years(comparison.payback_period_years),
        comparison,
    }
}

pub fn payback_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::number("monthlyBill", "Monthly electricity bill").unit("KES").min(0.0).required(),
        FieldSpec::number("systemCost", "Installed system cost").unit("KES").min(0.0).required(),
        FieldSpec::number("offsetFraction", "Bill offset by solar").range(0.0, 1.0).default_number(0.65),
    ]
}

fn compute_payback(parsed: &ParsedInputs, assumptions: &Assumptions) -> CalcResult<Outcome> {
    let input = SolarPaybackInput::from_parsed(parsed)?;
    Ok(calculate_payback(&input, assumptions).to_outcome())
}

fn project_payback(outcome: &Outcome, parsed: &ParsedInputs) -> Projection {
    let switching = parsed.number("systemCost").unwrap_or(0.0);
    savings_line("Cumulative Savings", outcome, switching, SAVINGS_HORIZON_YEARS)
}

pub fn payback_descriptor() -> DomainDescriptor {
    DomainDescriptor {
        id: "solar-payback",
        label: "Solar Bill Payback",
        summary: "Years for a solar install to pay for itself from bill savings",
        inputs: payback_fields(),
        compute: compute_payback,
        projector: Some(project_payback),
    }
}

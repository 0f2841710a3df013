//! # Pumps
//!
//! Hydraulic and motor power of a duty point, and sizing of a solar-powered
//! water pumping system with its capital cost breakdown.
//!
//! ## Example
//!
//! ```rust
//! use powercalc_core::domains::pumps::{calculate_hydraulics, PumpHydraulicsInput};
//!
//! let input = PumpHydraulicsInput {
//!     density: 1000.0,
//!     gravity: 9.81,
//!     flow_m3_s: 0.01,
//!     head_m: 20.0,
//!     efficiency: 0.75,
//! };
//! let result = calculate_hydraulics(&input);
//! assert!((result.hydraulic_power_w - 1962.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::{daily_pumping_power_kw, hydraulic_power_w, shaft_power};
use crate::errors::CalcResult;
use crate::numeric::{non_negative, ratio_or_zero};
use crate::outcome::Outcome;
use crate::registry::DomainDescriptor;
use crate::schema::FieldSpec;
use crate::settings::{Assumptions, SolarPumpAssumptions};
use crate::units::percent_to_fraction;
use crate::validation::ParsedInputs;

// ============================================================================
// Duty point hydraulics
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PumpHydraulicsInput {
    /// Fluid density ρ (kg/m³)
    pub density: f64,
    /// g (m/s²)
    pub gravity: f64,
    /// Flow Q (m³/s)
    pub flow_m3_s: f64,
    /// Head H (m)
    pub head_m: f64,
    /// Pump efficiency η (0-1)
    pub efficiency: f64,
}

impl PumpHydraulicsInput {
    pub fn from_parsed(parsed: &ParsedInputs) -> CalcResult<Self> {
        Ok(PumpHydraulicsInput {
            density: parsed.require("rho")?,
            gravity: parsed.require("g")?,
            flow_m3_s: parsed.require("Q")?,
            head_m: parsed.require("H")?,
            efficiency: parsed.require("eta")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PumpHydraulicsResult {
    pub hydraulic_power_w: f64,
    pub motor_power_w: f64,
}

impl PumpHydraulicsResult {
    pub fn to_outcome(&self) -> Outcome {
        Outcome::new()
            .with("Hydraulic power (W)", self.hydraulic_power_w)
            .with("Motor power (W)", self.motor_power_w)
    }
}

/// `P_h = ρ g Q H`, `P_m = P_h / η`
pub fn calculate_hydraulics(input: &PumpHydraulicsInput) -> PumpHydraulicsResult {
    let hydraulic_power_w = hydraulic_power_w(input.density, input.gravity, input.flow_m3_s, input.head_m);
    PumpHydraulicsResult {
        hydraulic_power_w,
        motor_power_w: shaft_power(hydraulic_power_w, input.efficiency),
    }
}

pub fn hydraulics_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::number("rho", "Fluid density").unit("kg/m3").range(200.0, 2000.0).placeholder("1000").required(),
        FieldSpec::number("g", "Gravity").unit("m/s2").range(9.7, 9.9).placeholder("9.81").required(),
        FieldSpec::number("Q", "Flow").unit("m3/s").min(0.0001).required(),
        FieldSpec::number("H", "Head").unit("m").min(0.5).required(),
        FieldSpec::number("eta", "Efficiency").range(0.4, 1.0).placeholder("0.75").required(),
    ]
}

fn compute_hydraulics(parsed: &ParsedInputs, _: &Assumptions) -> CalcResult<Outcome> {
    let input = PumpHydraulicsInput::from_parsed(parsed)?;
    Ok(calculate_hydraulics(&input).to_outcome())
}

pub fn hydraulics_descriptor() -> DomainDescriptor {
    DomainDescriptor {
        id: "pump-hydraulics",
        label: "Pumps",
        summary: "Hydraulic and motor power at a duty point",
        inputs: hydraulics_fields(),
        compute: compute_hydraulics,
        projector: None,
    }
}

// ============================================================================
// Solar water pumping
// ============================================================================

/// Pump technology; sets the installed cost per kW.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PumpType {
    Submersible,
    Surface,
    Centrifugal,
    Diaphragm,
}

impl PumpType {
    pub const OPTIONS: [&'static str; 4] = ["submersible", "surface", "centrifugal", "diaphragm"];

    pub fn from_option(option: &str) -> Option<Self> {
        match option {
            "submersible" => Some(PumpType::Submersible),
            "surface" => Some(PumpType::Surface),
            "centrifugal" => Some(PumpType::Centrifugal),
            "diaphragm" => Some(PumpType::Diaphragm),
            _ => None,
        }
    }

    /// Installed cost per kW of pump rating (KES)
    pub fn cost_per_kw(&self) -> f64 {
        match self {
            PumpType::Submersible => 300_000.0,
            PumpType::Surface => 200_000.0,
            PumpType::Centrifugal => 250_000.0,
            PumpType::Diaphragm => 400_000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolarPumpInput {
    /// Daily water need (m³/day)
    pub daily_need_m3: f64,
    /// Pump efficiency (0-1)
    pub pump_efficiency: f64,
    /// Peak sun hours (h/day)
    pub sun_hours: f64,
    /// Days of storage
    pub storage_days: f64,
    /// Total dynamic head (m)
    pub total_head_m: f64,
    pub pump_type: PumpType,
}

impl SolarPumpInput {
    pub fn from_parsed(parsed: &ParsedInputs) -> CalcResult<Self> {
        let pump_type = parsed.require_choice("pumpType")?;
        Ok(SolarPumpInput {
            daily_need_m3: parsed.require("dailyNeed")?,
            pump_efficiency: percent_to_fraction(parsed.require("pumpEfficiency")?),
            sun_hours: parsed.require("sunHours")?,
            storage_days: parsed.require("storageDays")?,
            total_head_m: parsed.require("totalHead")?,
            pump_type: PumpType::from_option(pump_type).unwrap_or(PumpType::Submersible),
        })
    }
}

/// Capital cost split of a solar pumping system (KES).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolarPumpCosts {
    pub pump: f64,
    pub solar: f64,
    pub storage: f64,
    pub controls: f64,
}

impl SolarPumpCosts {
    pub fn total(&self) -> f64 {
        self.pump + self.solar + self.storage + self.controls
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolarPumpResult {
    pub hydraulic_power_kw: f64,
    pub pump_power_kw: f64,
    pub solar_array_kwp: f64,
    pub storage_tank_m3: f64,
    pub costs: SolarPumpCosts,
}

impl SolarPumpResult {
    pub fn to_outcome(&self) -> Outcome {
        Outcome::new()
            .with("Hydraulic power (kW)", self.hydraulic_power_kw)
            .with("Pump power (W)", self.pump_power_kw * 1000.0)
            .with("Solar array (kWp)", self.solar_array_kwp)
            .with("Storage tank (m3)", self.storage_tank_m3)
            .with("Pump cost", self.costs.pump)
            .with("Solar cost", self.costs.solar)
            .with("Storage cost", self.costs.storage)
            .with("Controls cost", self.costs.controls)
            .with("Total cost", self.costs.total())
    }
}

/// Size pump, array and tank, and price them.
///
/// ```text
/// P_h     = V_day × 1000 × 9.81 × H / 3.6e6      (kW)
/// P_pump  = P_h / η
/// P_array = P_pump × oversizing / sun_hours       (kWp)
/// V_tank  = V_day × storage_days                  (m³)
/// ```
///
/// With no daily demand or no head there is no system to build, and every
/// figure (controls included) is 0.
pub fn calculate_solar_pump(input: &SolarPumpInput, costs: &SolarPumpAssumptions) -> SolarPumpResult {
    if input.daily_need_m3 <= 0.0 || input.total_head_m <= 0.0 {
        return SolarPumpResult::default();
    }

    let hydraulic_power_kw = non_negative(daily_pumping_power_kw(input.daily_need_m3, input.total_head_m));
    let pump_power_kw = shaft_power(hydraulic_power_kw, input.pump_efficiency);
    let solar_array_kwp = ratio_or_zero(pump_power_kw * costs.oversizing_factor, input.sun_hours);
    let storage_tank_m3 = non_negative(input.daily_need_m3 * input.storage_days);

    SolarPumpResult {
        hydraulic_power_kw,
        pump_power_kw,
        solar_array_kwp,
        storage_tank_m3,
        costs: SolarPumpCosts {
            pump: pump_power_kw * input.pump_type.cost_per_kw(),
            solar: solar_array_kwp * costs.solar_cost_per_kwp,
            storage: storage_tank_m3 * costs.storage_cost_per_m3,
            controls: costs.controls_cost,
        },
    }
}

pub fn solar_pump_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::number("dailyNeed", "Daily water need").unit("m³/day").min(0.0).required(),
        FieldSpec::number("pumpEfficiency", "Pump efficiency").unit("%").range(1.0, 100.0).default_number(70.0),
        FieldSpec::number("sunHours", "Peak sun hours").unit("h/day").range(1.0, 12.0).default_number(5.5),
        FieldSpec::number("storageDays", "Storage days").unit("days").min(0.0).default_number(2.0),
        FieldSpec::number("totalHead", "Total dynamic head").unit("m").min(0.0).default_number(30.0),
        FieldSpec::choice("pumpType", "Pump type", PumpType::OPTIONS).default_choice("submersible"),
    ]
}

fn compute_solar_pump(parsed: &ParsedInputs, assumptions: &Assumptions) -> CalcResult<Outcome> {
    let input = SolarPumpInput::from_parsed(parsed)?;
    Ok(calculate_solar_pump(&input, &assumptions.solar_pump).to_outcome())
}

pub fn solar_pump_descriptor() -> DomainDescriptor {
    DomainDescriptor {
        id: "solar-pump-sizing",
        label: "Solar Water Pumping",
        summary: "Pump, PV array and storage sizing with a capital cost breakdown",
        inputs: solar_pump_fields(),
        compute: compute_solar_pump,
        projector: None,
    }
}

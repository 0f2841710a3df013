//! # AC & UPS
//!
//! Battery runtime of an existing UPS, and sizing of a new one together with
//! the cost of the outage it is meant to prevent.
//!
//! ## Runtime
//!
//! ```text
//! E   = V_bat × C_Ah                       (Wh)
//! t   = (E × η_inv / P_load) × 60          (min)
//! S   = P_load / pf                        (VA)
//! ```
//!
//! ## Sizing
//!
//! Usable battery energy is derated (0.85 by default):
//!
//! ```text
//! VA       = W / η
//! t_h      = Ah × V × derate × η / W
//! Ah_req   = ceil(W × (t_req_min / 60) / (V × η × derate))
//! downtime = R × h + recovery + R × h × reputation
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::{apparent_power, battery_energy_wh};
use crate::errors::CalcResult;
use crate::numeric::{ceil_count, non_negative, ratio_or_zero};
use crate::outcome::Outcome;
use crate::projection::{ChartKind, Projection};
use crate::registry::DomainDescriptor;
use crate::schema::FieldSpec;
use crate::settings::{Assumptions, UpsAssumptions};
use crate::units::{hours_to_minutes, minutes_to_hours};
use crate::validation::ParsedInputs;

// ============================================================================
// Runtime
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsRuntimeInput {
    /// Battery bus voltage (V)
    pub bus_voltage: f64,
    /// Battery capacity (Ah)
    pub capacity_ah: f64,
    /// Inverter efficiency (0-1)
    pub inverter_efficiency: f64,
    /// Load (W)
    pub load_w: f64,
    pub power_factor: f64,
}

impl UpsRuntimeInput {
    pub fn from_parsed(parsed: &ParsedInputs) -> CalcResult<Self> {
        Ok(UpsRuntimeInput {
            bus_voltage: parsed.require("vbat")?,
            capacity_ah: parsed.require("capAh")?,
            inverter_efficiency: parsed.require("eff")?,
            load_w: parsed.require("pload")?,
            power_factor: parsed.require("pf")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsRuntimeResult {
    pub stored_energy_wh: f64,
    pub runtime_min: f64,
    pub apparent_power_va: f64,
}

impl UpsRuntimeResult {
    pub fn to_outcome(&self) -> Outcome {
        Outcome::new()
            .with("Stored energy (Wh)", self.stored_energy_wh)
            .with("UPS runtime (min)", self.runtime_min)
            .with("Apparent power (VA)", self.apparent_power_va)
    }
}

pub fn calculate_runtime(input: &UpsRuntimeInput) -> UpsRuntimeResult {
    let stored_energy_wh = battery_energy_wh(input.bus_voltage, input.capacity_ah);
    let runtime_h = ratio_or_zero(stored_energy_wh * input.inverter_efficiency, input.load_w);
    UpsRuntimeResult {
        stored_energy_wh,
        runtime_min: hours_to_minutes(runtime_h),
        apparent_power_va: apparent_power(input.load_w, input.power_factor),
    }
}

pub fn runtime_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::number("vbat", "Battery bus voltage").unit("V").min(12.0).required(),
        FieldSpec::number("capAh", "Battery capacity").unit("Ah").min(1.0).required(),
        FieldSpec::number("eff", "Inverter efficiency").range(0.7, 1.0).placeholder("0.9").required(),
        FieldSpec::number("pload", "Load").unit("W").min(10.0).required(),
        FieldSpec::number("pf", "Power factor").range(0.5, 1.0).placeholder("0.9").required(),
    ]
}

fn compute_runtime(parsed: &ParsedInputs, _: &Assumptions) -> CalcResult<Outcome> {
    let input = UpsRuntimeInput::from_parsed(parsed)?;
    Ok(calculate_runtime(&input).to_outcome())
}

/// Stored energy, load and efficiency (as a percentage) side by side.
fn project_runtime(outcome: &Outcome, parsed: &ParsedInputs) -> Projection {
    let energy = outcome.number("Stored energy (Wh)").unwrap_or(0.0);
    Projection::new(ChartKind::Distribution, "Battery / Load / Efficiency")
        .point("Battery Capacity", energy)
        .point("Load", parsed.number("pload").unwrap_or(0.0))
        .point("Efficiency", parsed.number("eff").unwrap_or(0.0) * 100.0)
}

pub fn runtime_descriptor() -> DomainDescriptor {
    DomainDescriptor {
        id: "ups-runtime",
        label: "AC & UPS",
        summary: "Battery runtime and apparent power of a UPS load",
        inputs: runtime_fields(),
        compute: compute_runtime,
        projector: Some(project_runtime),
    }
}

// ============================================================================
// Sizing and downtime cost
// ============================================================================

/// How badly an outage hurts reputation, as a fraction of direct loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReputationImpact {
    Low,
    Medium,
    High,
    Critical,
}

impl ReputationImpact {
    pub const OPTIONS: [&'static str; 4] = ["low", "medium", "high", "critical"];

    pub fn from_option(option: &str) -> Option<Self> {
        match option {
            "low" => Some(ReputationImpact::Low),
            "medium" => Some(ReputationImpact::Medium),
            "high" => Some(ReputationImpact::High),
            "critical" => Some(ReputationImpact::Critical),
            _ => None,
        }
    }

    pub fn factor(&self) -> f64 {
        match self {
            ReputationImpact::Low => 0.05,
            ReputationImpact::Medium => 0.15,
            ReputationImpact::High => 0.3,
            ReputationImpact::Critical => 0.5,
        }
    }
}

/// Kind of load protected; sets the redundancy recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadProfile {
    Server,
    Medical,
    Industrial,
    Telecom,
}

impl LoadProfile {
    pub const OPTIONS: [&'static str; 4] = ["server", "medical", "industrial", "telecom"];

    pub fn from_option(option: &str) -> Option<Self> {
        match option {
            "server" => Some(LoadProfile::Server),
            "medical" => Some(LoadProfile::Medical),
            "industrial" => Some(LoadProfile::Industrial),
            "telecom" => Some(LoadProfile::Telecom),
            _ => None,
        }
    }

    pub fn redundancy(&self) -> &'static str {
        match self {
            LoadProfile::Server | LoadProfile::Telecom => "N+1",
            LoadProfile::Medical => "2N",
            LoadProfile::Industrial => "N",
        }
    }
}

/// Catalogue UPS picked for an apparent power.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpsRecommendation {
    pub size: &'static str,
    pub topology: &'static str,
    pub cost: f64,
    pub modules: f64,
}

impl UpsRecommendation {
    /// Smallest rung of the UPS ladder covering `va`. `None` for no load.
    pub fn for_apparent_power(va: f64) -> Option<Self> {
        let pick = |size, topology, cost, modules| {
            Some(UpsRecommendation {
                size,
                topology,
                cost,
                modules,
            })
        };
        match va {
            va if va <= 0.0 => None,
            va if va < 1_000.0 => pick("1kVA", "Standby", 50_000.0, 1.0),
            va if va < 3_000.0 => pick("3kVA", "Line-Interactive", 150_000.0, 1.0),
            va if va < 10_000.0 => pick("10kVA", "Online Single", 450_000.0, 1.0),
            va if va < 20_000.0 => pick("20kVA", "Online 3-phase", 900_000.0, 1.0),
            va if va < 50_000.0 => pick("50kVA", "Modular", 2_000_000.0, ceil_count(va / 10_000.0)),
            va => pick("100kVA+", "Modular Parallel", 4_000_000.0, ceil_count(va / 25_000.0)),
        }
    }

    pub fn label(&self) -> String {
        format!("{} {}", self.size, self.topology)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsSizingInput {
    /// Protected load (W)
    pub load_w: f64,
    /// UPS efficiency (0-1)
    pub efficiency: f64,
    /// Installed battery capacity (Ah)
    pub battery_ah: f64,
    /// DC bus voltage (V)
    pub dc_voltage: f64,
    /// Required runtime (min)
    pub runtime_required_min: f64,
    pub hourly_revenue: f64,
    /// Expected outage duration (h)
    pub outage_hours: f64,
    /// Recovery cost; `None` falls back to a fraction of hourly revenue
    pub recovery_cost: Option<f64>,
    pub reputation: ReputationImpact,
    pub profile: LoadProfile,
}

impl UpsSizingInput {
    pub fn from_parsed(parsed: &ParsedInputs) -> CalcResult<Self> {
        let reputation = parsed.require_choice("reputationImpact")?;
        let profile = parsed.require_choice("loadType")?;
        Ok(UpsSizingInput {
            load_w: parsed.require("watts")?,
            efficiency: parsed.require("efficiency")?,
            battery_ah: parsed.require("batteryAh")?,
            dc_voltage: parsed.require("dcVoltage")?,
            runtime_required_min: parsed.require("runtimeReq")?,
            hourly_revenue: parsed.require("hourlyRevenue")?,
            outage_hours: parsed.require("outageDuration")?,
            recovery_cost: parsed.number("recoveryCost").filter(|v| *v > 0.0),
            reputation: ReputationImpact::from_option(reputation).unwrap_or(ReputationImpact::Medium),
            profile: LoadProfile::from_option(profile).unwrap_or(LoadProfile::Server),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpsSizingResult {
    pub apparent_power_va: f64,
    pub runtime_h: f64,
    pub required_battery_ah: f64,
    pub recommendation: Option<UpsRecommendation>,
    pub redundancy: &'static str,
    pub downtime_cost: f64,
}

impl UpsSizingResult {
    pub fn to_outcome(&self) -> Outcome {
        let mut outcome = Outcome::new()
            .with("Apparent power (VA)", self.apparent_power_va)
            .with("Battery runtime (h)", self.runtime_h)
            .with("Required battery (Ah)", self.required_battery_ah);
        match &self.recommendation {
            Some(ups) => {
                outcome.push("Recommended UPS", ups.label());
                outcome.push("UPS cost", ups.cost);
                outcome.push("Modules", ups.modules);
            }
            None => outcome.push("Recommended UPS", "none"),
        }
        outcome.push("Redundancy", self.redundancy);
        outcome.push("Downtime cost", self.downtime_cost);
        outcome
    }
}

pub fn calculate_sizing(input: &UpsSizingInput, ups: &UpsAssumptions) -> UpsSizingResult {
    let apparent_power_va = non_negative(ratio_or_zero(input.load_w, input.efficiency));
    let usable_wh = input.battery_ah * input.dc_voltage * ups.battery_derate * input.efficiency;
    let runtime_h = non_negative(ratio_or_zero(usable_wh, input.load_w));

    let required_wh = input.load_w * minutes_to_hours(input.runtime_required_min);
    let required_battery_ah = ceil_count(ratio_or_zero(
        required_wh,
        input.dc_voltage * input.efficiency * ups.battery_derate,
    ));

    let direct_loss = input.hourly_revenue * input.outage_hours;
    let recovery = input
        .recovery_cost
        .unwrap_or(input.hourly_revenue * ups.default_recovery_fraction);
    let reputation_loss = direct_loss * input.reputation.factor();

    UpsSizingResult {
        apparent_power_va,
        runtime_h,
        required_battery_ah,
        recommendation: UpsRecommendation::for_apparent_power(apparent_power_va),
        redundancy: input.profile.redundancy(),
        downtime_cost: non_negative(direct_loss + recovery + reputation_loss),
    }
}

pub fn sizing_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::number("watts", "Protected load").unit("W").min(1.0).required(),
        FieldSpec::number("efficiency", "UPS efficiency").range(0.5, 1.0).default_number(0.94),
        FieldSpec::number("batteryAh", "Battery capacity").unit("Ah").min(0.0).required(),
        FieldSpec::number("dcVoltage", "DC bus voltage").unit("V").min(12.0).default_number(48.0),
        FieldSpec::number("runtimeReq", "Required runtime").unit("min").min(0.0).default_number(30.0),
        FieldSpec::choice("loadType", "Load type", LoadProfile::OPTIONS).default_choice("server"),
        FieldSpec::number("hourlyRevenue", "Revenue at risk per hour").unit("KES/h").min(0.0).default_number(0.0),
        FieldSpec::number("outageDuration", "Outage duration").unit("h").min(0.0).default_number(0.0),
        FieldSpec::number("recoveryCost", "Recovery cost").unit("KES").min(0.0),
        FieldSpec::choice("reputationImpact", "Reputation impact", ReputationImpact::OPTIONS)
            .default_choice("medium"),
    ]
}

fn compute_sizing(parsed: &ParsedInputs, assumptions: &Assumptions) -> CalcResult<Outcome> {
    let input = UpsSizingInput::from_parsed(parsed)?;
    Ok(calculate_sizing(&input, &assumptions.ups).to_outcome())
}

pub fn sizing_descriptor() -> DomainDescriptor {
    DomainDescriptor {
        id: "ups-sizing",
        label: "UPS Sizing & Downtime Cost",
        summary: "UPS rating, battery bank and the cost of an unprotected outage",
        inputs: sizing_fields(),
        compute: compute_sizing,
        projector: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{raw_inputs, validate};

    #[test]
    fn test_runtime_reference() {
        let input = UpsRuntimeInput {
            bus_voltage: 48.0,
            capacity_ah: 100.0,
            inverter_efficiency: 0.9,
            load_w: 500.0,
            power_factor: 0.9,
        };
        let result = calculate_runtime(&input);
        assert_eq!(result.stored_energy_wh, 4800.0);
        assert!((result.runtime_min - 518.4).abs() < 1e-9);
        assert!((result.apparent_power_va - 555.6).abs() < 0.1);
    }

    #[test]
    fn test_runtime_projection() {
        let parsed = ParsedInputs::default().with_number("pload", 500.0).with_number("eff", 0.9);
        let outcome = Outcome::new().with("Stored energy (Wh)", 4800.0);
        let projection = project_runtime(&outcome, &parsed);
        assert_eq!(projection.kind, ChartKind::Distribution);
        assert_eq!(projection.values(), vec![4800.0, 500.0, 90.0]);
    }

    #[test]
    fn test_ladder() {
        let rung = |va: f64| UpsRecommendation::for_apparent_power(va).map(|r| r.size);
        assert_eq!(rung(0.0), None);
        assert_eq!(rung(999.0), Some("1kVA"));
        assert_eq!(rung(1000.0), Some("3kVA"));
        assert_eq!(rung(9_999.0), Some("10kVA"));
        assert_eq!(rung(19_999.0), Some("20kVA"));
        assert_eq!(rung(49_999.0), Some("50kVA"));
        assert_eq!(rung(50_000.0), Some("100kVA+"));

        let modular = UpsRecommendation::for_apparent_power(42_000.0).unwrap();
        assert_eq!(modular.modules, 5.0);
        let parallel = UpsRecommendation::for_apparent_power(120_000.0).unwrap();
        assert_eq!(parallel.modules, 5.0);
    }

    fn office_rack() -> UpsSizingInput {
        UpsSizingInput {
            load_w: 4_700.0,
            efficiency: 0.94,
            battery_ah: 100.0,
            dc_voltage: 48.0,
            runtime_required_min: 30.0,
            hourly_revenue: 10_000.0,
            outage_hours: 4.0,
            recovery_cost: None,
            reputation: ReputationImpact::Medium,
            profile: LoadProfile::Server,
        }
    }

    #[test]
    fn test_sizing() {
        let result = calculate_sizing(&office_rack(), &UpsAssumptions::default());
        assert!((result.apparent_power_va - 5_000.0).abs() < 1e-6);
        // 100 × 48 × 0.85 × 0.94 / 4700 = 0.816 h
        assert!((result.runtime_h - 0.816).abs() < 1e-9);
        // 4700 × 0.5 / (48 × 0.94 × 0.85) = 61.3 -> 62
        assert_eq!(result.required_battery_ah, 62.0);
        assert_eq!(result.recommendation.as_ref().map(|r| r.size), Some("10kVA"));
        assert_eq!(result.redundancy, "N+1");
        // 40k direct + 2k recovery + 6k reputation
        assert!((result.downtime_cost - 48_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_explicit_recovery_cost() {
        let input = UpsSizingInput {
            recovery_cost: Some(15_000.0),
            reputation: ReputationImpact::Critical,
            ..office_rack()
        };
        let result = calculate_sizing(&input, &UpsAssumptions::default());
        assert!((result.downtime_cost - 75_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_sizing_through_schema_defaults() {
        let raw = raw_inputs([("watts", "4700"), ("batteryAh", "100")]);
        let report = validate(&sizing_fields(), &raw);
        assert!(report.is_valid(), "{:?}", report.errors);
        assert_eq!(report.parsed.choice("reputationImpact"), Some("medium"));
        assert!(report.parsed.number("recoveryCost").is_none());

        let outcome = compute_sizing(&report.parsed, &Assumptions::default()).unwrap();
        assert_eq!(outcome.text("Recommended UPS"), Some("10kVA Online Single"));
        assert_eq!(outcome.number("Downtime cost"), Some(0.0));
    }
}

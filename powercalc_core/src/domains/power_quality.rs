//! # HV Power Factor & Transformer
//!
//! Capacitor bank needed to correct a site's power factor to 0.95, the bill
//! savings that brings, and a transformer rating for the site's maximum
//! demand.
//!
//! ```text
//! Q_c        = P × (tan(acos pf) - tan(acos 0.95))       pf < 0.95, else 0
//! savings    = bill × 0.015 (pf < 0.9) + bill × 0.08
//! rating_kVA = ceil(P × demand_factor × diversity × growth)
//! ```
//!
//! Diversity and growth default to the load type's typical values and may be
//! overridden; the demand factor always comes from the load type.

use serde::{Deserialize, Serialize};

use crate::equations::capacitor_kvar;
use crate::errors::CalcResult;
use crate::numeric::{ceil_count, non_negative};
use crate::outcome::Outcome;
use crate::registry::DomainDescriptor;
use crate::schema::FieldSpec;
use crate::settings::Assumptions;
use crate::units::MONTHS_PER_YEAR;
use crate::validation::ParsedInputs;

/// Power factor the capacitor bank corrects to
pub const TARGET_POWER_FACTOR: f64 = 0.95;

/// Below this power factor the utility applies a surcharge
pub const PENALTY_THRESHOLD: f64 = 0.9;

/// Surcharge on the monthly bill for a poor power factor
pub const PENALTY_RATE: f64 = 0.015;

/// Loss reduction from correction, as a share of the monthly bill
pub const EFFICIENCY_GAIN: f64 = 0.08;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadType {
    Residential,
    Commercial,
    Industrial,
    Hospital,
}

/// Typical planning factors for a load type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadFactors {
    pub diversity: f64,
    pub growth: f64,
    pub demand_factor: f64,
}

impl LoadType {
    pub const OPTIONS: [&'static str; 4] = ["residential", "commercial", "industrial", "hospital"];

    pub fn from_option(option: &str) -> Option<Self> {
        match option {
            "residential" => Some(LoadType::Residential),
            "commercial" => Some(LoadType::Commercial),
            "industrial" => Some(LoadType::Industrial),
            "hospital" => Some(LoadType::Hospital),
            _ => None,
        }
    }

    pub fn factors(&self) -> LoadFactors {
        let (diversity, growth, demand_factor) = match self {
            LoadType::Residential => (0.6, 1.15, 0.7),
            LoadType::Commercial => (0.8, 1.25, 0.85),
            LoadType::Industrial => (0.9, 1.35, 0.95),
            LoadType::Hospital => (0.7, 1.3, 0.9),
        };
        LoadFactors {
            diversity,
            growth,
            demand_factor,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerQualityInput {
    /// Maximum demand (kW)
    pub demand_kw: f64,
    pub power_factor: f64,
    /// Current monthly electricity bill
    pub monthly_bill: f64,
    pub load_type: LoadType,
    pub diversity: f64,
    pub growth: f64,
}

impl PowerQualityInput {
    pub fn from_parsed(parsed: &ParsedInputs) -> CalcResult<Self> {
        let load_type = parsed.require_choice("loadType")?;
        let load_type = LoadType::from_option(load_type).unwrap_or(LoadType::Commercial);
        let typical = load_type.factors();
        Ok(PowerQualityInput {
            demand_kw: parsed.require("demand")?,
            power_factor: parsed.require("pf")?,
            monthly_bill: parsed.require("bill")?,
            load_type,
            diversity: parsed.number("diversity").unwrap_or(typical.diversity),
            growth: parsed.number("growth").unwrap_or(typical.growth),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerQualityResult {
    pub capacitor_kvar: f64,
    pub monthly_savings: f64,
    /// Demand after the load type's demand factor (kW)
    pub adjusted_demand_kw: f64,
    pub transformer_kva: f64,
}

impl PowerQualityResult {
    pub fn to_outcome(&self) -> Outcome {
        Outcome::new()
            .with("Capacitor bank (kVAR)", self.capacitor_kvar)
            .with("Monthly savings", self.monthly_savings)
            .with("Annual savings", self.monthly_savings * MONTHS_PER_YEAR)
            .with("Adjusted demand (kW)", self.adjusted_demand_kw)
            .with("Transformer rating (kVA)", self.transformer_kva)
    }
}

/// Bill savings from correcting to the target power factor
pub fn monthly_savings(monthly_bill: f64, power_factor: f64) -> f64 {
    let penalty = if power_factor < PENALTY_THRESHOLD { PENALTY_RATE } else { 0.0 };
    non_negative(monthly_bill * penalty + monthly_bill * EFFICIENCY_GAIN)
}

pub fn calculate(input: &PowerQualityInput) -> PowerQualityResult {
    let demand = non_negative(input.demand_kw);
    let adjusted_demand_kw = demand * input.load_type.factors().demand_factor;
    PowerQualityResult {
        capacitor_kvar: capacitor_kvar(demand, input.power_factor, TARGET_POWER_FACTOR),
        monthly_savings: monthly_savings(input.monthly_bill, input.power_factor),
        adjusted_demand_kw,
        transformer_kva: ceil_count(adjusted_demand_kw * input.diversity * input.growth),
    }
}

pub fn fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::number("demand", "Maximum demand").unit("kW").min(0.0).required(),
        FieldSpec::number("pf", "Present power factor").range(0.5, 1.0).default_number(0.75),
        FieldSpec::number("bill", "Monthly bill").unit("KES").min(0.0).default_number(0.0),
        FieldSpec::choice("loadType", "Load type", LoadType::OPTIONS).default_choice("commercial"),
        FieldSpec::number("diversity", "Diversity factor").range(0.1, 1.0).placeholder("load type"),
        FieldSpec::number("growth", "Growth factor").range(1.0, 2.0).placeholder("load type"),
    ]
}

fn compute(parsed: &ParsedInputs, _: &Assumptions) -> CalcResult<Outcome> {
    let input = PowerQualityInput::from_parsed(parsed)?;
    Ok(calculate(&input).to_outcome())
}

pub fn descriptor() -> DomainDescriptor {
    DomainDescriptor {
        id: "power-factor-correction",
        label: "HV Power Factor & Transformer",
        summary: "Capacitor bank to 0.95 pf, bill savings and transformer rating",
        inputs: fields(),
        compute,
        projector: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{raw_inputs, validate};

    fn office_block() -> PowerQualityInput {
        PowerQualityInput {
            demand_kw: 500.0,
            power_factor: 0.75,
            monthly_bill: 100_000.0,
            load_type: LoadType::Commercial,
            diversity: 0.8,
            growth: 1.25,
        }
    }

    #[test]
    fn test_correction_from_poor_pf() {
        let result = calculate(&office_block());
        assert!((result.capacitor_kvar - 276.6165).abs() < 1e-3);
        // 1.5% penalty + 8% efficiency
        assert!((result.monthly_savings - 9_500.0).abs() < 1e-6);
        assert_eq!(result.transformer_kva, 425.0);
    }

    #[test]
    fn test_no_penalty_between_090_and_095() {
        let input = PowerQualityInput {
            power_factor: 0.92,
            ..office_block()
        };
        let result = calculate(&input);
        assert!(result.capacitor_kvar > 0.0);
        assert!((result.monthly_savings - 8_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_already_corrected() {
        let input = PowerQualityInput {
            power_factor: 0.97,
            ..office_block()
        };
        assert_eq!(calculate(&input).capacitor_kvar, 0.0);
    }

    #[test]
    fn test_transformer_rounds_up() {
        let input = PowerQualityInput {
            load_type: LoadType::Industrial,
            diversity: 0.9,
            growth: 1.35,
            demand_kw: 1000.0,
            ..office_block()
        };
        // 1000 × 0.95 × 0.9 × 1.35 = 1154.25
        assert_eq!(calculate(&input).transformer_kva, 1155.0);
    }

    #[test]
    fn test_load_type_factors_fill_blank_overrides() {
        let raw = raw_inputs([("demand", "500"), ("loadType", "residential")]);
        let report = validate(&fields(), &raw);
        assert!(report.is_valid(), "{:?}", report.errors);
        let input = PowerQualityInput::from_parsed(&report.parsed).unwrap();
        assert_eq!(input.diversity, 0.6);
        assert_eq!(input.growth, 1.15);
        // 500 × 0.7 × 0.6 × 1.15 = 241.5
        assert_eq!(calculate(&input).transformer_kva, 242.0);
    }

    #[test]
    fn test_override_diversity() {
        let raw = raw_inputs([("demand", "500"), ("diversity", "1.0"), ("growth", "1.0")]);
        let report = validate(&fields(), &raw);
        let input = PowerQualityInput::from_parsed(&report.parsed).unwrap();
        // 500 × 0.85
        assert_eq!(calculate(&input).transformer_kva, 425.0);
    }
}

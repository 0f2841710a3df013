//! # Import vs Local Fabrication
//!
//! Landed cost of importing a fabricated item against the band a local
//! workshop would typically quote for it.
//!
//! ```text
//! landed  = cost × fx × (1 + shipping + duty) + opportunity
//! local   = [low, high] × landed           (default [0.55, 0.70])
//! savings = max(0, landed - avg(local))
//! ```
//!
//! The local average is further split 60/30/10 into material, labour and
//! engineering so the quote can be sanity-checked line by line.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::numeric::{non_negative, ratio_or_zero};
use crate::outcome::Outcome;
use crate::registry::DomainDescriptor;
use crate::schema::FieldSpec;
use crate::settings::{Assumptions, FabricationAssumptions};
use crate::units::{fraction_to_percent, percent_to_fraction};
use crate::validation::ParsedInputs;

/// Currencies the item price may be quoted in
pub const CURRENCIES: [&str; 5] = ["USD", "EUR", "GBP", "CNY", "INR"];

/// Worst-case local fabrication lead time (weeks)
pub const LOCAL_LEAD_TIME_WEEKS: f64 = 4.0;

const MATERIAL_SHARE: f64 = 0.6;
const LABOUR_SHARE: f64 = 0.3;
const ENGINEERING_SHARE: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportInput {
    /// Supplier price in `currency`
    pub item_cost: f64,
    pub currency: String,
    /// Freight and insurance as a share of the converted price (0-1)
    pub shipping_fraction: f64,
    /// Import duty as a share of the converted price (0-1)
    pub duty_fraction: f64,
    /// Cost of waiting for delivery, already in local currency
    pub opportunity_cost: f64,
    pub lead_time_weeks: f64,
}

impl ImportInput {
    pub fn from_parsed(parsed: &ParsedInputs) -> CalcResult<Self> {
        Ok(ImportInput {
            item_cost: parsed.require("itemCost")?,
            currency: parsed.require_choice("currency")?.to_string(),
            shipping_fraction: percent_to_fraction(parsed.require("shippingPercent")?),
            duty_fraction: percent_to_fraction(parsed.require("dutyPercent")?),
            opportunity_cost: parsed.number("opportunityCost").unwrap_or(0.0),
            lead_time_weeks: parsed.require("leadTimeWeeks")?,
        })
    }
}

/// Quote band for local fabrication.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocalQuote {
    pub low: f64,
    pub high: f64,
}

impl LocalQuote {
    pub fn average(&self) -> f64 {
        (self.low + self.high) / 2.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportResult {
    pub landed_cost: f64,
    pub local: LocalQuote,
    pub savings: f64,
    /// Savings as a share of the landed cost (0-1)
    pub savings_fraction: f64,
    pub time_saved_weeks: f64,
}

impl ImportResult {
    pub fn to_outcome(&self) -> Outcome {
        let average = self.local.average();
        Outcome::new()
            .with("Landed import cost", self.landed_cost)
            .with("Local cost (low)", self.local.low)
            .with("Local cost (high)", self.local.high)
            .with("Local cost (average)", average)
            .with("Local material", average * MATERIAL_SHARE)
            .with("Local labour", average * LABOUR_SHARE)
            .with("Local engineering", average * ENGINEERING_SHARE)
            .with("Savings", self.savings)
            .with("Savings (%)", fraction_to_percent(self.savings_fraction))
            .with("Time saved (weeks)", self.time_saved_weeks)
    }
}

/// Converted price plus shipping, duty and opportunity cost, never negative.
///
/// Fails when no exchange rate is configured for the input currency.
pub fn landed_cost(input: &ImportInput, fabrication: &FabricationAssumptions) -> CalcResult<f64> {
    let rate = fabrication.exchange_rate(&input.currency).ok_or_else(|| {
        CalcError::invalid_input("currency", input.currency.clone(), "No exchange rate configured")
    })?;
    let converted = input.item_cost * rate;
    Ok(non_negative(
        converted * (1.0 + input.shipping_fraction + input.duty_fraction) + input.opportunity_cost,
    ))
}

pub fn calculate(input: &ImportInput, fabrication: &FabricationAssumptions) -> CalcResult<ImportResult> {
    let landed = landed_cost(input, fabrication)?;
    let local = LocalQuote {
        low: landed * fabrication.local_low_fraction,
        high: landed * fabrication.local_high_fraction,
    };
    let savings = non_negative(landed - local.average());

    Ok(ImportResult {
        landed_cost: landed,
        local,
        savings,
        savings_fraction: ratio_or_zero(savings, landed),
        time_saved_weeks: non_negative(input.lead_time_weeks - LOCAL_LEAD_TIME_WEEKS),
    })
}

pub fn fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::number("itemCost", "Item cost").min(0.0).required(),
        FieldSpec::choice("currency", "Currency", CURRENCIES).default_choice("USD"),
        FieldSpec::number("shippingPercent", "Shipping").unit("%").range(0.0, 100.0).default_number(25.0),
        FieldSpec::number("dutyPercent", "Import duty").unit("%").range(0.0, 100.0).default_number(20.0),
        FieldSpec::number("opportunityCost", "Opportunity cost").unit("KES").min(0.0).placeholder("0"),
        FieldSpec::number("leadTimeWeeks", "Import lead time").unit("weeks").range(1.0, 52.0).default_number(12.0),
    ]
}

fn compute(parsed: &ParsedInputs, assumptions: &Assumptions) -> CalcResult<Outcome> {
    let input = ImportInput::from_parsed(parsed)?;
    Ok(calculate(&input, &assumptions.fabrication)?.to_outcome())
}

pub fn descriptor() -> DomainDescriptor {
    DomainDescriptor {
        id: "import-vs-local",
        label: "Import vs Local Fabrication",
        summary: "Landed import cost against a local fabrication quote band",
        inputs: fields(),
        compute,
        projector: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{raw_inputs, validate};

    fn pump_skid() -> ImportInput {
        ImportInput {
            item_cost: 10_000.0,
            currency: "USD".to_string(),
            shipping_fraction: 0.25,
            duty_fraction: 0.20,
            opportunity_cost: 0.0,
            lead_time_weeks: 12.0,
        }
    }

    #[test]
    fn test_landed_and_local_band() {
        let result = calculate(&pump_skid(), &FabricationAssumptions::default()).unwrap();
        // 10k × 150 × 1.45
        assert!((result.landed_cost - 2_175_000.0).abs() < 1e-6);
        assert!((result.local.low - 1_196_250.0).abs() < 1e-6);
        assert!((result.local.high - 1_522_500.0).abs() < 1e-6);
        assert!((result.savings - 815_625.0).abs() < 1e-6);
        assert!((result.savings_fraction - 0.375).abs() < 1e-12);
        assert_eq!(result.time_saved_weeks, 8.0);
    }

    #[test]
    fn test_opportunity_cost_added_after_conversion() {
        let input = ImportInput {
            opportunity_cost: 100_000.0,
            ..pump_skid()
        };
        let result = calculate(&input, &FabricationAssumptions::default()).unwrap();
        assert!((result.landed_cost - 2_275_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_cost_has_no_savings() {
        let input = ImportInput {
            item_cost: 0.0,
            ..pump_skid()
        };
        let result = calculate(&input, &FabricationAssumptions::default()).unwrap();
        assert_eq!(result.landed_cost, 0.0);
        assert_eq!(result.savings, 0.0);
        assert_eq!(result.savings_fraction, 0.0);
    }

    #[test]
    fn test_breakdown_sums_to_average() {
        let outcome = calculate(&pump_skid(), &FabricationAssumptions::default()).unwrap().to_outcome();
        let parts: f64 = ["Local material", "Local labour", "Local engineering"]
            .iter()
            .filter_map(|label| outcome.number(label))
            .sum();
        let average = outcome.number("Local cost (average)").unwrap();
        assert!((parts - average).abs() < 1e-6);
    }

    #[test]
    fn test_configured_exchange_rate() {
        let mut fabrication = FabricationAssumptions::default();
        fabrication.exchange_rates.insert("USD".to_string(), 130.0);
        let result = calculate(&pump_skid(), &fabrication).unwrap();
        assert!((result.landed_cost - 1_885_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_partial_rate_table_keeps_other_currencies() {
        let assumptions = Assumptions::from_toml_str("[fabrication.exchange_rates]\nUSD = 155.0\n").unwrap();
        let input = ImportInput {
            item_cost: 1_000.0,
            currency: "EUR".to_string(),
            shipping_fraction: 0.0,
            duty_fraction: 0.0,
            ..pump_skid()
        };
        let result = calculate(&input, &assumptions.fabrication).unwrap();
        assert!((result.landed_cost - 160_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_unconfigured_currency_is_an_error() {
        let mut fabrication = FabricationAssumptions::default();
        fabrication.exchange_rates.remove("CNY");
        let input = ImportInput {
            currency: "CNY".to_string(),
            ..pump_skid()
        };
        let err = calculate(&input, &fabrication).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_defaults_through_schema() {
        let raw = raw_inputs([("itemCost", "10000")]);
        let report = validate(&fields(), &raw);
        assert!(report.is_valid(), "{:?}", report.errors);
        let input = ImportInput::from_parsed(&report.parsed).unwrap();
        assert_eq!(input, pump_skid());
    }
}

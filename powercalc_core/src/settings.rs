//! # Engineering Assumptions
//!
//! Constants the calculators rely on but that no cited standard fixes:
//! oversizing factors, amortization periods, unit costs, exchange rates.
//! They are defaults, not engineering truths, so they live here where a
//! caller can override them from a TOML file instead of being buried in the
//! formulas.
//!
//! Every section is `#[serde(default)]`, so a file only has to name what it
//! changes. Exchange rates merge onto the built-in table, so naming one
//! currency leaves the others at their defaults:
//!
//! ```toml
//! [solar_pump]
//! oversizing_factor = 1.25
//!
//! [fabrication.exchange_rates]
//! USD = 129.5
//! ```
//!
//! ## Example
//!
//! ```rust
//! use powercalc_core::settings::Assumptions;
//!
//! let assumptions = Assumptions::from_toml_str("[water]\namortization_years = 25.0\n").unwrap();
//! assert_eq!(assumptions.water.amortization_years, 25.0);
//! assert_eq!(assumptions.water.treatment_spread_years, 10.0);
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::domains::fabrication::CURRENCIES;
use crate::errors::{CalcError, CalcResult};

/// All configurable assumptions, grouped by calculator family.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Assumptions {
    pub water: WaterAssumptions,
    pub solar_pump: SolarPumpAssumptions,
    pub fabrication: FabricationAssumptions,
    pub ups: UpsAssumptions,
    pub generator: GeneratorAssumptions,
    pub motor: MotorAssumptions,
    pub cooling: CoolingAssumptions,
    pub comparison: ComparisonAssumptions,
}

/// County water vs borehole economics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterAssumptions {
    /// Years over which the drilling cost is amortized
    pub amortization_years: f64,
    /// Years over which the one-off treatment plant cost is spread
    pub treatment_spread_years: f64,
    /// Multiplier on the unreliable share of the county bill (shortage penalty)
    pub shortage_multiplier: f64,
}

impl Default for WaterAssumptions {
    fn default() -> Self {
        WaterAssumptions {
            amortization_years: 20.0,
            treatment_spread_years: 10.0,
            shortage_multiplier: 2.0,
        }
    }
}

/// Solar water pumping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolarPumpAssumptions {
    /// Array oversizing over the pump's electrical demand
    pub oversizing_factor: f64,
    /// Installed cost per kWp of array
    pub solar_cost_per_kwp: f64,
    /// Storage tank cost per m³
    pub storage_cost_per_m3: f64,
    /// Flat controller and wiring cost
    pub controls_cost: f64,
}

impl Default for SolarPumpAssumptions {
    fn default() -> Self {
        SolarPumpAssumptions {
            oversizing_factor: 1.3,
            solar_cost_per_kwp: 100_000.0,
            storage_cost_per_m3: 5_000.0,
            controls_cost: 150_000.0,
        }
    }
}

/// Import vs local fabrication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FabricationAssumptions {
    /// Local cost as a fraction of landed import cost, low end
    pub local_low_fraction: f64,
    /// Local cost as a fraction of landed import cost, high end
    pub local_high_fraction: f64,
    /// Local currency per unit of foreign currency
    #[serde(deserialize_with = "merge_exchange_rates")]
    pub exchange_rates: BTreeMap<String, f64>,
}

fn default_exchange_rates() -> BTreeMap<String, f64> {
    [("USD", 150.0), ("EUR", 160.0), ("GBP", 190.0), ("CNY", 21.0), ("INR", 1.8)]
        .into_iter()
        .map(|(code, rate)| (code.to_string(), rate))
        .collect()
}

/// Overlay the rates named in a file onto the built-in table.
fn merge_exchange_rates<'de, D>(deserializer: D) -> Result<BTreeMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let supplied = BTreeMap::<String, f64>::deserialize(deserializer)?;
    let mut rates = default_exchange_rates();
    rates.extend(supplied);
    Ok(rates)
}

impl Default for FabricationAssumptions {
    fn default() -> Self {
        FabricationAssumptions {
            local_low_fraction: 0.55,
            local_high_fraction: 0.70,
            exchange_rates: default_exchange_rates(),
        }
    }
}

impl FabricationAssumptions {
    /// Exchange rate for a currency code, `None` when none is configured
    pub fn exchange_rate(&self, currency: &str) -> Option<f64> {
        self.exchange_rates.get(currency).copied()
    }
}

/// UPS sizing and downtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpsAssumptions {
    /// Usable fraction of nameplate battery capacity
    pub battery_derate: f64,
    /// Recovery cost as a fraction of hourly revenue when none is given
    pub default_recovery_fraction: f64,
}

impl Default for UpsAssumptions {
    fn default() -> Self {
        UpsAssumptions {
            battery_derate: 0.85,
            default_recovery_fraction: 0.2,
        }
    }
}

/// Generator sizing and total cost of ownership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorAssumptions {
    /// kW to kVA power factor
    pub power_factor: f64,
    /// Purchase cost per kVA
    pub capital_cost_per_kva: f64,
    /// Diesel spend per kVA per day
    pub diesel_cost_per_kva_day: f64,
    /// Maintenance per kVA per year
    pub maintenance_per_kva_year: f64,
    /// Resale value as a fraction of capital cost at the end of the horizon
    pub resale_fraction: f64,
    /// Ownership horizon for the TCO figure
    pub tco_years: f64,
}

impl Default for GeneratorAssumptions {
    fn default() -> Self {
        GeneratorAssumptions {
            power_factor: 0.8,
            capital_cost_per_kva: 12_000.0,
            diesel_cost_per_kva_day: 8.0,
            maintenance_per_kva_year: 1_500.0,
            resale_fraction: 0.3,
            tco_years: 5.0,
        }
    }
}

/// Motor rewind vs replace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotorAssumptions {
    /// Reference efficiency of an induction motor
    pub induction_efficiency: f64,
    /// Reference efficiency of every other motor type
    pub other_efficiency: f64,
    /// Grid emission factor (kg CO₂ per kWh)
    pub carbon_kg_per_kwh: f64,
}

impl Default for MotorAssumptions {
    fn default() -> Self {
        MotorAssumptions {
            induction_efficiency: 0.92,
            other_efficiency: 0.95,
            carbon_kg_per_kwh: 0.5,
        }
    }
}

/// Air-conditioning cooling load and running cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoolingAssumptions {
    /// Margin applied to the computed heat load
    pub design_margin: f64,
    /// Largest single unit before the load is split (BTU/h)
    pub max_unit_btu: f64,
    pub hours_per_day: f64,
    pub days_per_month: f64,
    /// Electricity tariff (KES/kWh)
    pub electricity_rate: f64,
    /// Equipment price per BTU/h of rated capacity (KES)
    pub cost_per_btu: f64,
    /// Installation as a fraction of purchase cost
    pub installation_fraction: f64,
}

impl Default for CoolingAssumptions {
    fn default() -> Self {
        CoolingAssumptions {
            design_margin: 1.2,
            max_unit_btu: 24_000.0,
            hours_per_day: 10.0,
            days_per_month: 30.0,
            electricity_rate: 25.0,
            cost_per_btu: 6.0,
            installation_fraction: 0.15,
        }
    }
}

/// Shared economic comparison settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonAssumptions {
    /// Payback periods above this are reported at the cap
    pub max_payback_years: f64,
}

impl Default for ComparisonAssumptions {
    fn default() -> Self {
        ComparisonAssumptions {
            max_payback_years: 50.0,
        }
    }
}

impl Assumptions {
    /// Parse assumptions from TOML and validate them.
    pub fn from_toml_str(text: &str) -> CalcResult<Self> {
        let assumptions: Assumptions =
            toml::from_str(text).map_err(|e| CalcError::serialization(e.to_string()))?;
        assumptions.validate()?;
        Ok(assumptions)
    }

    /// Render as TOML (for `powercalc settings` and round trips).
    pub fn to_toml_string(&self) -> CalcResult<String> {
        toml::to_string_pretty(self).map_err(|e| CalcError::serialization(e.to_string()))
    }

    /// Check that every value is usable by the formulas.
    ///
    /// Divisors must be positive and fractions must lie in `[0, 1]`.
    pub fn validate(&self) -> CalcResult<()> {
        positive("water.amortization_years", self.water.amortization_years)?;
        positive("water.treatment_spread_years", self.water.treatment_spread_years)?;
        non_negative("water.shortage_multiplier", self.water.shortage_multiplier)?;

        positive("solar_pump.oversizing_factor", self.solar_pump.oversizing_factor)?;
        non_negative("solar_pump.solar_cost_per_kwp", self.solar_pump.solar_cost_per_kwp)?;
        non_negative("solar_pump.storage_cost_per_m3", self.solar_pump.storage_cost_per_m3)?;
        non_negative("solar_pump.controls_cost", self.solar_pump.controls_cost)?;

        fraction("fabrication.local_low_fraction", self.fabrication.local_low_fraction)?;
        fraction("fabrication.local_high_fraction", self.fabrication.local_high_fraction)?;
        if self.fabrication.local_low_fraction > self.fabrication.local_high_fraction {
            return Err(CalcError::invalid_settings(
                "fabrication.local_low_fraction must not exceed local_high_fraction",
            ));
        }
        for code in CURRENCIES {
            if !self.fabrication.exchange_rates.contains_key(code) {
                return Err(CalcError::invalid_settings(format!(
                    "fabrication.exchange_rates.{} is missing",
                    code
                )));
            }
        }
        for (code, rate) in &self.fabrication.exchange_rates {
            positive(&format!("fabrication.exchange_rates.{}", code), *rate)?;
        }

        positive("ups.battery_derate", self.ups.battery_derate)?;
        fraction("ups.battery_derate", self.ups.battery_derate)?;
        non_negative("ups.default_recovery_fraction", self.ups.default_recovery_fraction)?;

        positive("generator.power_factor", self.generator.power_factor)?;
        fraction("generator.power_factor", self.generator.power_factor)?;
        non_negative("generator.capital_cost_per_kva", self.generator.capital_cost_per_kva)?;
        non_negative("generator.diesel_cost_per_kva_day", self.generator.diesel_cost_per_kva_day)?;
        non_negative("generator.maintenance_per_kva_year", self.generator.maintenance_per_kva_year)?;
        fraction("generator.resale_fraction", self.generator.resale_fraction)?;
        positive("generator.tco_years", self.generator.tco_years)?;

        positive("motor.induction_efficiency", self.motor.induction_efficiency)?;
        positive("motor.other_efficiency", self.motor.other_efficiency)?;
        non_negative("motor.carbon_kg_per_kwh", self.motor.carbon_kg_per_kwh)?;

        positive("cooling.design_margin", self.cooling.design_margin)?;
        positive("cooling.max_unit_btu", self.cooling.max_unit_btu)?;
        non_negative("cooling.hours_per_day", self.cooling.hours_per_day)?;
        non_negative("cooling.days_per_month", self.cooling.days_per_month)?;
        non_negative("cooling.electricity_rate", self.cooling.electricity_rate)?;
        non_negative("cooling.cost_per_btu", self.cooling.cost_per_btu)?;
        non_negative("cooling.installation_fraction", self.cooling.installation_fraction)?;

        positive("comparison.max_payback_years", self.comparison.max_payback_years)?;
        Ok(())
    }
}

/// Load assumptions from a TOML file.
pub fn load_assumptions(path: &Path) -> CalcResult<Assumptions> {
    let text = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
    Assumptions::from_toml_str(&text)
}

fn positive(name: &str, value: f64) -> CalcResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CalcError::invalid_settings(format!("{} must be positive, got {}", name, value)))
    }
}

fn non_negative(name: &str, value: f64) -> CalcResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CalcError::invalid_settings(format!("{} must not be negative, got {}", name, value)))
    }
}

fn fraction(name: &str, value: f64) -> CalcResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(CalcError::invalid_settings(format!("{} must lie in [0, 1], got {}", name, value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Assumptions::default().validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let text = r#"
            [solar_pump]
            oversizing_factor = 1.25

            [fabrication.exchange_rates]
            USD = 129.5
        "#;
        let assumptions = Assumptions::from_toml_str(text).unwrap();
        assert_eq!(assumptions.solar_pump.oversizing_factor, 1.25);
        assert_eq!(assumptions.solar_pump.controls_cost, 150_000.0);
        assert_eq!(assumptions.fabrication.exchange_rate("USD"), Some(129.5));
        assert_eq!(assumptions.fabrication.exchange_rate("EUR"), Some(160.0));
        assert_eq!(assumptions.fabrication.exchange_rate("INR"), Some(1.8));
        assert_eq!(assumptions.water, WaterAssumptions::default());
    }

    #[test]
    fn test_extra_currency_joins_table() {
        let assumptions = Assumptions::from_toml_str("[fabrication.exchange_rates]\nZAR = 7.5\n").unwrap();
        assert_eq!(assumptions.fabrication.exchange_rate("ZAR"), Some(7.5));
        assert_eq!(assumptions.fabrication.exchange_rate("USD"), Some(150.0));
        assert_eq!(assumptions.fabrication.exchange_rate("XYZ"), None);
    }

    #[test]
    fn test_rejects_missing_currency_rate() {
        let mut assumptions = Assumptions::default();
        assumptions.fabrication.exchange_rates.remove("GBP");
        let err = assumptions.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_SETTINGS");
        assert!(err.to_string().contains("GBP"));
    }

    #[test]
    fn test_rejects_zero_rate() {
        assert!(Assumptions::from_toml_str("[fabrication.exchange_rates]\nEUR = 0.0\n").is_err());
    }

    #[test]
    fn test_cooling_section_overrides() {
        let assumptions = Assumptions::from_toml_str("[cooling]\nelectricity_rate = 30.0\n").unwrap();
        assert_eq!(assumptions.cooling.electricity_rate, 30.0);
        assert_eq!(assumptions.cooling.design_margin, 1.2);
        assert!(Assumptions::from_toml_str("[cooling]\nmax_unit_btu = 0.0\n").is_err());
    }

    #[test]
    fn test_rejects_zero_divisor() {
        let err = Assumptions::from_toml_str("[water]\namortization_years = 0.0\n").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_SETTINGS");
    }

    #[test]
    fn test_rejects_inverted_band() {
        let text = "[fabrication]\nlocal_low_fraction = 0.8\nlocal_high_fraction = 0.6\n";
        assert!(Assumptions::from_toml_str(text).is_err());
    }

    #[test]
    fn test_malformed_toml() {
        let err = Assumptions::from_toml_str("[water\n").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_toml_roundtrip() {
        let assumptions = Assumptions::default();
        let text = assumptions.to_toml_string().unwrap();
        assert!(text.contains("[water]"));
        let roundtrip = Assumptions::from_toml_str(&text).unwrap();
        assert_eq!(roundtrip, assumptions);
    }

    #[test]
    fn test_missing_file() {
        let err = load_assumptions(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }
}

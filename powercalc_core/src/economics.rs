//! # Economic Comparator
//!
//! Generic two-option comparison: "keep paying option A every year, or pay a
//! one-off switching cost and then pay option B every year instead?"
//!
//! Reused by every comparison-style domain (county water vs borehole, grid
//! bill vs solar, fine risk vs incinerator upkeep). Callers supply the two
//! annual costs and the switching cost.
//!
//! ## Rules
//!
//! - `annual_savings = max(0, A - B)`
//! - `payback_period_years = round(switching / annual_savings, 1)` when both
//!   are positive, otherwise `0`, which means *not viable*, not *zero years*
//! - `ten_year_savings = max(0, 10 × annual_savings - switching)`
//! - payback in months is rounded from the unrounded ratio, not from the
//!   rounded years
//!
//! ## Example
//!
//! ```rust
//! use powercalc_core::economics::compare_costs;
//!
//! let result = compare_costs(2_016_000.0, 150_000.0, 1_500_000.0);
//! assert_eq!(result.annual_savings, 1_866_000.0);
//! assert_eq!(result.payback_period_years, 0.8);
//! assert!(result.is_viable());
//! ```

use serde::{Deserialize, Serialize};

use crate::numeric::{non_negative, round_to};
use crate::outcome::Outcome;
use crate::units::MONTHS_PER_YEAR;

/// Horizon of the long-run savings figure
pub const SAVINGS_HORIZON_YEARS: u32 = 10;

/// Result of comparing two recurring costs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    /// Annual cost of the current option
    pub option_a_cost: f64,
    /// Annual cost of the alternative
    pub option_b_cost: f64,
    /// One-off cost of switching to the alternative
    pub switching_cost: f64,
    /// Yearly saving from switching (never negative)
    pub annual_savings: f64,
    /// Years to recover the switching cost; `0` when not viable
    pub payback_period_years: f64,
    /// Savings over ten years net of the switching cost (never negative)
    pub ten_year_savings: f64,
}

impl ComparisonResult {
    /// True when the switch pays back at all
    pub fn is_viable(&self) -> bool {
        self.payback_period_years > 0.0
    }

    /// Payback in whole months (0 when not viable)
    pub fn payback_months(&self) -> f64 {
        if self.switching_cost > 0.0 && self.annual_savings > 0.0 {
            (self.switching_cost / self.annual_savings * MONTHS_PER_YEAR).round()
        } else {
            0.0
        }
    }

    /// Net cumulative position at the end of each year `0..=years`.
    ///
    /// Starts at `-switching_cost` and gains `annual_savings` per year. This
    /// is the series a break-even chart draws.
    pub fn cumulative_savings(&self, switching_cost: f64, years: u32) -> Vec<f64> {
        (0..=years)
            .map(|year| self.annual_savings * f64::from(year) - switching_cost)
            .collect()
    }

    /// Append the comparison metrics to an outcome under the standard labels.
    pub fn append_to(&self, outcome: &mut Outcome) {
        outcome.push("Annual savings", self.annual_savings);
        outcome.push("Payback period (years)", self.payback_period_years);
        outcome.push("10-year savings", self.ten_year_savings);
    }
}

/// Compare two annual costs given a one-off switching cost.
pub fn compare_costs(option_a_cost: f64, option_b_cost: f64, switching_cost: f64) -> ComparisonResult {
    let option_a_cost = non_negative(option_a_cost);
    let option_b_cost = non_negative(option_b_cost);
    let switching_cost = non_negative(switching_cost);

    let annual_savings = non_negative(option_a_cost - option_b_cost);
    let payback_period_years = if switching_cost > 0.0 && annual_savings > 0.0 {
        round_to(switching_cost / annual_savings, 1)
    } else {
        0.0
    };
    let ten_year_savings = non_negative(annual_savings * f64::from(SAVINGS_HORIZON_YEARS) - switching_cost);

    ComparisonResult {
        option_a_cost,
        option_b_cost,
        switching_cost,
        annual_savings,
        payback_period_years,
        ten_year_savings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viable_switch() {
        let result = compare_costs(100_000.0, 40_000.0, 150_000.0);
        assert_eq!(result.annual_savings, 60_000.0);
        assert_eq!(result.payback_period_years, 2.5);
        assert_eq!(result.ten_year_savings, 450_000.0);
        assert!(result.is_viable());
        assert_eq!(result.payback_months(), 30.0);
    }

    #[test]
    fn test_alternative_not_cheaper() {
        let result = compare_costs(40_000.0, 100_000.0, 150_000.0);
        assert_eq!(result.annual_savings, 0.0);
        assert_eq!(result.payback_period_years, 0.0);
        assert_eq!(result.ten_year_savings, 0.0);
        assert!(!result.is_viable());

        let equal = compare_costs(50_000.0, 50_000.0, 10.0);
        assert_eq!(equal.annual_savings, 0.0);
        assert_eq!(equal.payback_period_years, 0.0);
    }

    #[test]
    fn test_free_switch_is_reported_not_viable() {
        // No switching cost: savings exist but there is nothing to pay back
        let result = compare_costs(10.0, 5.0, 0.0);
        assert_eq!(result.annual_savings, 5.0);
        assert_eq!(result.payback_period_years, 0.0);
        assert_eq!(result.ten_year_savings, 50.0);
    }

    #[test]
    fn test_ten_year_savings_never_negative() {
        let result = compare_costs(10_000.0, 9_000.0, 1_000_000.0);
        assert_eq!(result.ten_year_savings, 0.0);
        assert_eq!(result.payback_period_years, 1000.0);
    }

    #[test]
    fn test_payback_months_from_unrounded_ratio() {
        // 1M / 2.675M = 0.374 years: 4.49 months, while 0.4 years would give 5
        let result = compare_costs(2_975_000.0, 300_000.0, 1_000_000.0);
        assert_eq!(result.payback_period_years, 0.4);
        assert_eq!(result.payback_months(), 4.0);
        assert_eq!(result.switching_cost, 1_000_000.0);
    }

    #[test]
    fn test_payback_months_not_viable() {
        assert_eq!(compare_costs(100.0, 200.0, 400.0).payback_months(), 0.0);
        assert_eq!(compare_costs(200.0, 100.0, 0.0).payback_months(), 0.0);
    }

    #[test]
    fn test_cumulative_savings() {
        let result = compare_costs(300.0, 100.0, 400.0);
        assert_eq!(result.cumulative_savings(400.0, 3), vec![-400.0, -200.0, 0.0, 200.0]);
    }

    #[test]
    fn test_append_to_outcome() {
        let mut outcome = Outcome::new();
        compare_costs(300.0, 100.0, 400.0).append_to(&mut outcome);
        assert_eq!(outcome.number("Annual savings"), Some(200.0));
        assert_eq!(outcome.number("Payback period (years)"), Some(2.0));
        assert_eq!(outcome.number("10-year savings"), Some(1600.0));
    }

    #[test]
    fn test_json_keys() {
        let json = serde_json::to_value(compare_costs(2.0, 1.0, 1.0)).unwrap();
        assert!(json.get("optionACost").is_some());
        assert!(json.get("paybackPeriodYears").is_some());
        assert!(json.get("tenYearSavings").is_some());
    }
}

//! # Structural Formulas
//!
//! Beam sizing by bending only. Loads are line loads (kN/m), spans in
//! metres, moments in kN·m and material strength as a modulus in MPa.
//!
//! ## Sign Conventions
//!
//! - Loads: positive downward
//! - Moment: positive sagging; only the magnitude is used for sizing

use serde::{Deserialize, Serialize};

use crate::numeric::ratio_or_zero;

/// How the beam is supported at its ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportCondition {
    /// Pin + roller: M_max = wL²/8
    Simply,
    /// Fixed or continuous: M_max = wL²/12
    Fixed,
}

impl SupportCondition {
    /// Option strings accepted by the beam sizing form
    pub const OPTIONS: [&'static str; 2] = ["simply", "fixed"];

    /// Parse a form option; anything but `"simply"` is treated as fixed
    pub fn from_option(option: &str) -> Self {
        if option == "simply" {
            SupportCondition::Simply
        } else {
            SupportCondition::Fixed
        }
    }

    /// Denominator of the maximum moment coefficient wL²/k
    pub fn moment_divisor(&self) -> f64 {
        match self {
            SupportCondition::Simply => 8.0,
            SupportCondition::Fixed => 12.0,
        }
    }
}

/// Factored design line load w = (live + dead) × safety factor
#[inline]
pub fn design_load(live_load: f64, dead_load: f64, safety_factor: f64) -> f64 {
    (live_load + dead_load) * safety_factor
}

/// Maximum bending moment for a uniform load
///
/// ```text
/// simply supported: M = wL²/8
/// fixed/continuous: M = wL²/12
/// ```
#[inline]
pub fn bending_moment(load: f64, span: f64, support: SupportCondition) -> f64 {
    load * span.powi(2) / support.moment_divisor()
}

/// Required elastic section modulus Z = (M × 10⁶) / (E × 1000)
///
/// With M in kN·m and the material modulus in MPa this yields the figure the
/// standard-section tables are indexed by (cm³). Returns 0 for a
/// non-positive modulus.
#[inline]
pub fn required_section_modulus_cm3(moment_knm: f64, material_modulus_mpa: f64) -> f64 {
    ratio_or_zero(moment_knm * 1e6, material_modulus_mpa * 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_design_load() {
        assert_eq!(design_load(10.0, 5.0, 1.5), 22.5);
    }

    #[test]
    fn test_bending_moment() {
        // 22.5 kN/m over 6 m
        assert_eq!(bending_moment(22.5, 6.0, SupportCondition::Simply), 101.25);
        assert_eq!(bending_moment(22.5, 6.0, SupportCondition::Fixed), 67.5);
    }

    #[test]
    fn test_section_modulus() {
        // 101.25 kN·m in steel (200 000 MPa): 101.25e6 / 2e8 = 0.50625
        let z = required_section_modulus_cm3(101.25, 200_000.0);
        assert!((z - 0.50625).abs() < 1e-12);
        assert_eq!(required_section_modulus_cm3(10.0, 0.0), 0.0);
    }

    #[test]
    fn test_support_parsing() {
        assert_eq!(SupportCondition::from_option("simply"), SupportCondition::Simply);
        assert_eq!(SupportCondition::from_option("fixed"), SupportCondition::Fixed);
    }
}

//! # Hydraulic Formulas
//!
//! ## Notation
//!
//! - `ρ` = fluid density (kg/m³)
//! - `g` = gravitational acceleration (m/s²)
//! - `Q` = volumetric flow (m³/s)
//! - `H` = total dynamic head (m)
//! - `η` = pump/motor efficiency (0-1)

use crate::numeric::ratio_or_zero;
use crate::units::{SECONDS_PER_HOUR, STANDARD_GRAVITY, WATER_DENSITY};

/// Hydraulic power P_h = ρ g Q H (W)
#[inline]
pub fn hydraulic_power_w(density: f64, gravity: f64, flow_m3_s: f64, head_m: f64) -> f64 {
    density * gravity * flow_m3_s * head_m
}

/// Shaft (or electrical) power needed to deliver `hydraulic_power`
///
/// P = P_h / η, or 0 when `η <= 0`.
#[inline]
pub fn shaft_power(hydraulic_power: f64, efficiency: f64) -> f64 {
    ratio_or_zero(hydraulic_power, efficiency)
}

/// Hydraulic power (kW) to lift a daily water volume against a head
///
/// ```text
/// P = (V_day × 1000 × 9.81 × H) / (3600 × 1000)
/// ```
///
/// This is the rating the solar pumping sizing works from: the volume is
/// treated as if lifted within one pumping hour.
#[inline]
pub fn daily_pumping_power_kw(daily_volume_m3: f64, head_m: f64) -> f64 {
    (daily_volume_m3 * WATER_DENSITY * STANDARD_GRAVITY * head_m) / (SECONDS_PER_HOUR * 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hydraulic_power() {
        // 1000 kg/m³ × 9.81 × 0.01 m³/s × 20 m = 1962 W
        let ph = hydraulic_power_w(1000.0, 9.81, 0.01, 20.0);
        assert!((ph - 1962.0).abs() < 1e-9);
        assert!((shaft_power(ph, 0.75) - 2616.0).abs() < 1e-9);
    }

    #[test]
    fn test_shaft_power_zero_efficiency() {
        assert_eq!(shaft_power(1000.0, 0.0), 0.0);
    }

    #[test]
    fn test_daily_pumping_power() {
        // 10 m³ against 30 m: 10 × 1000 × 9.81 × 30 / 3.6e6 = 0.8175 kW
        assert!((daily_pumping_power_kw(10.0, 30.0) - 0.8175).abs() < 1e-9);
    }
}

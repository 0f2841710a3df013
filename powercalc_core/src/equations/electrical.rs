//! # Electrical Formulas
//!
//! ## Notation
//!
//! - `V` = voltage (V)
//! - `Ah` = battery capacity (amp-hours)
//! - `P` = real power (W or kW as noted)
//! - `S` = apparent power (VA)
//! - `pf` = power factor (0-1)
//! - `η` = efficiency (0-1)

use crate::numeric::{non_negative, ratio_or_zero};
use crate::units::SQRT_3;

/// Stored battery energy E = V × Ah (Wh)
#[inline]
pub fn battery_energy_wh(voltage: f64, capacity_ah: f64) -> f64 {
    voltage * capacity_ah
}

/// Apparent power S = P / pf
///
/// Returns 0 when `pf <= 0`.
#[inline]
pub fn apparent_power(real_power: f64, power_factor: f64) -> f64 {
    ratio_or_zero(real_power, power_factor)
}

/// Electrical input power P_in = P_out / η
#[inline]
pub fn input_power(output_power: f64, efficiency: f64) -> f64 {
    ratio_or_zero(output_power, efficiency)
}

/// Line current of a balanced three-phase load
///
/// ```text
/// I = (P_kW × 1000) / (√3 × V_line × pf)
/// ```
#[inline]
pub fn three_phase_current(power_kw: f64, line_voltage: f64, power_factor: f64) -> f64 {
    ratio_or_zero(power_kw * 1000.0, SQRT_3 * line_voltage * power_factor)
}

/// Reactive power a capacitor bank must supply to raise pf to `target_pf`
///
/// ```text
/// Q_c = P × (tan(acos pf₁) - tan(acos pf₂))
/// ```
///
/// Returns 0 when the present power factor already meets the target, or
/// when either power factor is outside `(0, 1]`.
pub fn capacitor_kvar(power_kw: f64, present_pf: f64, target_pf: f64) -> f64 {
    let in_range = |pf: f64| pf > 0.0 && pf <= 1.0;
    if !in_range(present_pf) || !in_range(target_pf) || present_pf >= target_pf {
        return 0.0;
    }
    let tan_present = present_pf.acos().tan();
    let tan_target = target_pf.acos().tan();
    non_negative(power_kw * (tan_present - tan_target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_battery_energy() {
        assert_eq!(battery_energy_wh(48.0, 100.0), 4800.0);
    }

    #[test]
    fn test_apparent_power() {
        assert!((apparent_power(500.0, 0.9) - 555.555).abs() < 0.01);
        assert_eq!(apparent_power(500.0, 0.0), 0.0);
    }

    #[test]
    fn test_three_phase_current() {
        // 10 kW at 415 V, pf 0.85: I = 10000 / (1.732 × 415 × 0.85) ≈ 16.37 A
        let i = three_phase_current(10.0, 415.0, 0.85);
        assert!((i - 16.37).abs() < 0.01);
        assert_eq!(three_phase_current(10.0, 0.0, 0.85), 0.0);
    }

    #[test]
    fn test_capacitor_kvar() {
        // 100 kW from pf 0.75 to 0.95: 100 × (0.8819 - 0.3287) ≈ 55.3 kVAR
        let q = capacitor_kvar(100.0, 0.75, 0.95);
        assert!((q - 55.3).abs() < 0.1);
        assert_eq!(capacitor_kvar(100.0, 0.96, 0.95), 0.0);
        assert_eq!(capacitor_kvar(100.0, 0.0, 0.95), 0.0);
    }
}

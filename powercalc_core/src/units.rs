//! # Units and Physical Constants
//!
//! Units in powercalc are a display concern: a [`FieldSpec`](crate::schema::FieldSpec)
//! carries a unit string for the form label, but every formula works on raw
//! `f64` values in the unit documented next to it. This module holds the few
//! conversions and constants the formulas share so that each one is written
//! down exactly once.
//!
//! ## Example
//!
//! ```rust
//! use powercalc_core::units::{hp_to_kw, percent_to_fraction};
//!
//! assert!((hp_to_kw(10.0) - 7.46).abs() < 1e-9);
//! assert_eq!(percent_to_fraction(25.0), 0.25);
//! ```

/// Standard gravity (m/s²) used by the fixed-gravity pump formulas
pub const STANDARD_GRAVITY: f64 = 9.81;

/// Density of water (kg/m³)
pub const WATER_DENSITY: f64 = 1000.0;

/// √3, the line-to-phase factor for balanced three-phase systems
pub const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Mechanical horsepower to kilowatts, as used by the motor calculators
pub const KW_PER_HP: f64 = 0.746;

/// Seconds per hour
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Months per year
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Convert a percentage (0-100) to a fraction (0-1)
#[inline]
pub fn percent_to_fraction(percent: f64) -> f64 {
    percent / 100.0
}

/// Convert a fraction (0-1) to a percentage (0-100)
#[inline]
pub fn fraction_to_percent(fraction: f64) -> f64 {
    fraction * 100.0
}

/// Convert horsepower to kilowatts
#[inline]
pub fn hp_to_kw(hp: f64) -> f64 {
    hp * KW_PER_HP
}

/// Convert minutes to hours
#[inline]
pub fn minutes_to_hours(minutes: f64) -> f64 {
    minutes / 60.0
}

/// Convert hours to minutes
#[inline]
pub fn hours_to_minutes(hours: f64) -> f64 {
    hours * 60.0
}

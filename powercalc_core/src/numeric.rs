//! # Numeric Primitives
//!
//! Coercion of raw form values into numbers, and the guards every formula
//! uses so that a degenerate-but-valid input produces a defined value
//! instead of `NaN` or an unexpected infinity.
//!
//! The rules:
//!
//! - A ratio with a denominator `<= 0` is `0`.
//! - Money and capacity outputs are clamped at `0`.
//! - Only a rate whose true value is infinite (MTBF with no failures)
//!   may return `f64::INFINITY`, and it does so explicitly.

/// Coerce a text value into a finite number.
///
/// Surrounding whitespace is ignored. Empty text, text that does not parse as
/// a plain decimal number, and non-finite results (`"inf"`, `"NaN"`) are all
/// `None`: the value is missing.
///
/// ```rust
/// use powercalc_core::numeric::coerce_text;
///
/// assert_eq!(coerce_text(" 12.5 "), Some(12.5));
/// assert_eq!(coerce_text(""), None);
/// assert_eq!(coerce_text("1,000"), None);
/// assert_eq!(coerce_text("inf"), None);
/// ```
pub fn coerce_text(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Accept a number only if it is finite.
#[inline]
pub fn coerce_number(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// `numerator / denominator`, or `0` when the denominator is not positive.
///
/// ```rust
/// use powercalc_core::numeric::ratio_or_zero;
///
/// assert_eq!(ratio_or_zero(3600.0, 0.0), 0.0);
/// assert_eq!(ratio_or_zero(3600.0, 60.0), 60.0);
/// ```
#[inline]
pub fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Reciprocal of a rate, infinite when the rate is zero.
///
/// Used for mean-time-between-failure style metrics where "no events
/// observed" really does mean an unbounded interval.
#[inline]
pub fn reciprocal_or_infinity(rate: f64) -> f64 {
    if rate > 0.0 {
        1.0 / rate
    } else {
        f64::INFINITY
    }
}

/// Clamp negative (and NaN) values to zero.
#[inline]
pub fn non_negative(value: f64) -> f64 {
    if value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Round to a fixed number of decimal places (half away from zero).
#[inline]
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Round up to a whole count, never below zero.
#[inline]
pub fn ceil_count(value: f64) -> f64 {
    non_negative(value).ceil()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_text() {
        assert_eq!(coerce_text("42"), Some(42.0));
        assert_eq!(coerce_text("-0.5"), Some(-0.5));
        assert_eq!(coerce_text("1e3"), Some(1000.0));
        assert_eq!(coerce_text("   "), None);
        assert_eq!(coerce_text("abc"), None);
        assert_eq!(coerce_text("KES 100"), None);
        assert_eq!(coerce_text("NaN"), None);
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number(1.5), Some(1.5));
        assert_eq!(coerce_number(f64::NAN), None);
        assert_eq!(coerce_number(f64::NEG_INFINITY), None);
    }

    #[test]
    fn test_ratio_or_zero() {
        assert_eq!(ratio_or_zero(10.0, 4.0), 2.5);
        assert_eq!(ratio_or_zero(10.0, -1.0), 0.0);
    }

    #[test]
    fn test_reciprocal_or_infinity() {
        assert_eq!(reciprocal_or_infinity(0.5), 2.0);
        assert!(reciprocal_or_infinity(0.0).is_infinite());
    }

    #[test]
    fn test_non_negative() {
        assert_eq!(non_negative(-3.0), 0.0);
        assert_eq!(non_negative(f64::NAN), 0.0);
        assert_eq!(non_negative(3.0), 3.0);
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round_to(0.8038, 1), 0.8);
        assert_eq!(round_to(2.25, 1), 2.3);
        assert_eq!(ceil_count(10.01), 11.0);
        assert_eq!(ceil_count(-2.0), 0.0);
    }
}

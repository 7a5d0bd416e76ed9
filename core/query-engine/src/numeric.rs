//! FILENAME: core/query-engine/src/numeric.rs
//! Output rounding and the zero-safe ratio rule.
//!
//! Sums are accumulated unrounded; rounding happens once, when a view record
//! is built. Ratios are always computed from unrounded operands.

/// Rounds to 2 decimals, ties to even on the scaled value. Never returns
/// `-0.0`.
pub fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0).round_ties_even() / 100.0;
    if rounded == 0.0 || !rounded.is_finite() {
        0.0
    } else {
        rounded
    }
}

/// `0` when the denominator is zero, else the quotient rounded to 2 decimals.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    round2(numerator / denominator)
}

/// Same as [`ratio`], scaled by 100 before rounding.
pub fn percent_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    round2(numerator / denominator * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(12.857142), 12.86);
        assert_eq!(round2(3.3333), 3.33);
        assert_eq!(round2(-383.031), -383.03);
        assert_eq!(round2(350.0), 350.0);
    }

    #[test]
    fn test_round2_ties_go_to_even() {
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(-0.125), -0.12);
    }

    #[test]
    fn test_round2_normalizes_negative_zero() {
        let value = round2(-0.001);
        assert_eq!(value, 0.0);
        assert!(value.is_sign_positive());
    }

    #[test]
    fn test_ratio_zero_denominator() {
        assert_eq!(ratio(10.0, 0.0), 0.0);
        assert_eq!(ratio(0.0, 0.0), 0.0);
        assert_eq!(percent_ratio(-5.0, 0.0), 0.0);
    }

    #[test]
    fn test_ratio_values() {
        assert_eq!(ratio(350.0, 2.0), 175.0);
        assert_eq!(percent_ratio(45.0, 350.0), 12.86);
        assert_eq!(percent_ratio(5.0, 150.0), 3.33);
        assert_eq!(percent_ratio(-10.0, 40.0), -25.0);
    }
}

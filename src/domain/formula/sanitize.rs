//! Input clamping shared by the formula functions.
//!
//! Form inputs arrive as arbitrary floats. These helpers coerce NaN,
//! infinities and out-of-range values to safe defaults.

/// NaN, infinite or negative values become 0.
pub fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Non-finite values become `default`; sign is preserved otherwise.
pub fn finite_or(value: f64, default: f64) -> f64 {
    if value.is_finite() { value } else { default }
}

/// Floor a count, falling back to `min` for NaN, negative or too-small input.
pub fn whole_count(value: f64, min: u32) -> u32 {
    if !value.is_finite() || value < min as f64 {
        return min;
    }
    if value >= u32::MAX as f64 {
        return u32::MAX;
    }
    value.floor() as u32
}

/// Convert a percentage (e.g. `6.5`) to a non-negative fraction (`0.065`).
pub fn pct_to_rate(pct: f64) -> f64 {
    non_negative(pct) / 100.0
}

/// Monthly periodic rate for an annual percentage.
pub fn monthly_rate(annual_pct: f64) -> f64 {
    pct_to_rate(annual_pct) / 12.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_negative_clamps() {
        assert_eq!(non_negative(5.0), 5.0);
        assert_eq!(non_negative(-5.0), 0.0);
        assert_eq!(non_negative(f64::NAN), 0.0);
        assert_eq!(non_negative(f64::INFINITY), 0.0);
    }

    #[test]
    fn finite_or_keeps_negative_values() {
        assert_eq!(finite_or(-3.0, 1.0), -3.0);
        assert_eq!(finite_or(f64::NAN, 1.0), 1.0);
        assert_eq!(finite_or(f64::NEG_INFINITY, 2.0), 2.0);
    }

    #[test]
    fn whole_count_floors_and_clamps() {
        assert_eq!(whole_count(12.9, 1), 12);
        assert_eq!(whole_count(0.0, 1), 1);
        assert_eq!(whole_count(-4.0, 0), 0);
        assert_eq!(whole_count(f64::NAN, 1), 1);
        assert_eq!(whole_count(1e20, 0), u32::MAX);
    }

    #[test]
    fn rates() {
        assert!((pct_to_rate(6.5) - 0.065).abs() < 1e-12);
        assert!((monthly_rate(12.0) - 0.01).abs() < 1e-12);
        assert_eq!(monthly_rate(-1.0), 0.0);
    }
}

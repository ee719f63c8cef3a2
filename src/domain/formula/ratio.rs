//! Division with an explicit result for zero denominators.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RatioOutcome {
    Value(f64),
    /// Nonzero numerator over a zero denominator.
    Infinite,
    /// Zero over zero, or an input that cannot produce a meaningful figure.
    Undefined,
}

impl RatioOutcome {
    pub fn value(&self) -> Option<f64> {
        match self {
            RatioOutcome::Value(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_finite(&self) -> bool {
        matches!(self, RatioOutcome::Value(_))
    }

    /// Apply `f` to a finite value, passing sentinels through. A result
    /// that leaves the finite range becomes the matching sentinel.
    pub fn map(self, f: impl FnOnce(f64) -> f64) -> RatioOutcome {
        match self {
            RatioOutcome::Value(v) => {
                let mapped = f(v);
                if mapped.is_finite() {
                    RatioOutcome::Value(mapped)
                } else if mapped.is_nan() {
                    RatioOutcome::Undefined
                } else {
                    RatioOutcome::Infinite
                }
            }
            other => other,
        }
    }
}

impl fmt::Display for RatioOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RatioOutcome::Value(v) => write!(f, "{:.2}", v),
            RatioOutcome::Infinite => write!(f, "infinite"),
            RatioOutcome::Undefined => write!(f, "undefined"),
        }
    }
}

pub fn safe_ratio(numerator: f64, denominator: f64) -> RatioOutcome {
    if !numerator.is_finite() || !denominator.is_finite() {
        return RatioOutcome::Undefined;
    }
    if denominator == 0.0 {
        if numerator == 0.0 {
            RatioOutcome::Undefined
        } else {
            RatioOutcome::Infinite
        }
    } else {
        let quotient = numerator / denominator;
        if quotient.is_finite() {
            RatioOutcome::Value(quotient)
        } else {
            RatioOutcome::Infinite
        }
    }
}

/// `safe_ratio` scaled to a percentage.
pub fn safe_percent(numerator: f64, denominator: f64) -> RatioOutcome {
    safe_ratio(numerator, denominator).map(|v| v * 100.0)
}

//! Per-period payroll tax estimate (US federal payroll taxes, flat withholding).
//!
//! Year-to-date wages decide how much of this period's pay is still under the
//! social security wage base, above the additional Medicare threshold, or
//! under the FUTA wage cap.

use super::sanitize::{non_negative, pct_to_rate};

pub const SOCIAL_SECURITY_RATE: f64 = 0.062;
pub const SOCIAL_SECURITY_WAGE_BASE: f64 = 168_600.0;
pub const MEDICARE_RATE: f64 = 0.0145;
pub const ADDITIONAL_MEDICARE_RATE: f64 = 0.009;
pub const ADDITIONAL_MEDICARE_THRESHOLD: f64 = 200_000.0;
pub const FUTA_RATE: f64 = 0.006;
pub const FUTA_WAGE_BASE: f64 = 7_000.0;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PayrollInputs {
    pub gross_pay: f64,
    /// Wages already paid this calendar year, excluding this period.
    pub year_to_date_wages: f64,
    pub federal_withholding_pct: f64,
    pub state_withholding_pct: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PayrollEstimate {
    pub gross_pay: f64,
    pub social_security: f64,
    pub medicare: f64,
    pub additional_medicare: f64,
    pub federal_withholding: f64,
    pub state_withholding: f64,
    pub total_employee_taxes: f64,
    pub net_pay: f64,
    pub employer_social_security: f64,
    pub employer_medicare: f64,
    pub employer_futa: f64,
    pub total_employer_taxes: f64,
}

/// Portion of `[ytd, ytd + gross)` that lies below `cap`.
fn taxable_below(cap: f64, ytd: f64, gross: f64) -> f64 {
    (cap - ytd).clamp(0.0, gross)
}

/// Portion of `[ytd, ytd + gross)` that lies above `threshold`.
fn taxable_above(threshold: f64, ytd: f64, gross: f64) -> f64 {
    (ytd + gross - threshold.max(ytd)).clamp(0.0, gross)
}

pub fn estimate_payroll(inputs: &PayrollInputs) -> PayrollEstimate {
    let gross = non_negative(inputs.gross_pay);
    let ytd = non_negative(inputs.year_to_date_wages);

    let ss_wages = taxable_below(SOCIAL_SECURITY_WAGE_BASE, ytd, gross);
    let social_security = ss_wages * SOCIAL_SECURITY_RATE;
    let medicare = gross * MEDICARE_RATE;
    let additional_medicare =
        taxable_above(ADDITIONAL_MEDICARE_THRESHOLD, ytd, gross) * ADDITIONAL_MEDICARE_RATE;
    let federal_withholding = gross * pct_to_rate(inputs.federal_withholding_pct);
    let state_withholding = gross * pct_to_rate(inputs.state_withholding_pct);

    let total_employee_taxes =
        social_security + medicare + additional_medicare + federal_withholding + state_withholding;

    let employer_social_security = social_security;
    let employer_medicare = medicare;
    let employer_futa = taxable_below(FUTA_WAGE_BASE, ytd, gross) * FUTA_RATE;

    PayrollEstimate {
        gross_pay: gross,
        social_security,
        medicare,
        additional_medicare,
        federal_withholding,
        state_withholding,
        total_employee_taxes,
        net_pay: gross - total_employee_taxes,
        employer_social_security,
        employer_medicare,
        employer_futa,
        total_employer_taxes: employer_social_security + employer_medicare + employer_futa,
    }
}

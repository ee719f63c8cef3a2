//! Loan payment and amortization.
//!
//! Fixed payment via the annuity formula `P·r / (1 − (1 + r)^−n)`, or `P / n`
//! when the rate is zero. The schedule applies each payment to interest first,
//! then principal, and the last period absorbs floating-point drift so the
//! closing balance is exactly zero.

use serde::Serialize;

use super::sanitize::{monthly_rate, non_negative, whole_count};

/// Longest term accepted, in months.
pub const MAX_TERM_MONTHS: u32 = 1200;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanTerms {
    pub principal: f64,
    pub annual_rate_pct: f64,
    pub term_months: u32,
}

impl LoanTerms {
    pub fn new(principal: f64, annual_rate_pct: f64, term_months: f64) -> Self {
        LoanTerms {
            principal: non_negative(principal),
            annual_rate_pct: non_negative(annual_rate_pct),
            term_months: whole_count(term_months, 1).min(MAX_TERM_MONTHS),
        }
    }

    fn sanitized(&self) -> (f64, f64, u32) {
        (
            non_negative(self.principal),
            monthly_rate(self.annual_rate_pct),
            self.term_months.clamp(1, MAX_TERM_MONTHS),
        )
    }
}

/// Payment per dollar borrowed for `months` periods at periodic rate `rate`.
pub fn payment_factor(rate: f64, months: u32) -> f64 {
    let n = months.max(1) as f64;
    if rate == 0.0 {
        1.0 / n
    } else {
        rate / (1.0 - (1.0 + rate).powf(-n))
    }
}

pub fn monthly_payment(terms: &LoanTerms) -> f64 {
    let (principal, rate, months) = terms.sanitized();
    if rate == 0.0 {
        return principal / months as f64;
    }
    principal * payment_factor(rate, months)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmortizationRow {
    pub period: u32,
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AmortizationSchedule {
    pub payment: f64,
    pub rows: Vec<AmortizationRow>,
    pub total_interest: f64,
    pub total_paid: f64,
}

pub fn amortization_schedule(terms: &LoanTerms) -> AmortizationSchedule {
    let (principal, rate, months) = terms.sanitized();
    let payment = monthly_payment(terms);

    let mut rows = Vec::with_capacity(months as usize);
    let mut balance = principal;
    let mut total_interest = 0.0;
    let mut total_paid = 0.0;

    for period in 1..=months {
        let interest = balance * rate;
        let mut principal_part = payment - interest;
        let mut this_payment = payment;

        if period == months || principal_part > balance {
            principal_part = balance;
            this_payment = interest + principal_part;
        }

        balance -= principal_part;
        if period == months || balance.abs() < 1e-9 {
            balance = 0.0;
        }

        total_interest += interest;
        total_paid += this_payment;
        rows.push(AmortizationRow {
            period,
            payment: this_payment,
            interest,
            principal: principal_part,
            balance,
        });

        if balance == 0.0 {
            break;
        }
    }

    AmortizationSchedule {
        payment,
        rows,
        total_interest,
        total_paid,
    }
}

/// How long a fixed payment takes to clear a balance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payoff {
    Months(u32),
    /// The payment does not cover the monthly interest.
    Never,
}

pub fn payoff_months(balance: f64, annual_rate_pct: f64, payment: f64) -> Payoff {
    let balance = non_negative(balance);
    let payment = non_negative(payment);
    let rate = monthly_rate(annual_rate_pct);

    if balance == 0.0 {
        return Payoff::Months(0);
    }
    if payment == 0.0 || payment <= balance * rate {
        return Payoff::Never;
    }
    if rate == 0.0 {
        return Payoff::Months(whole_count((balance / payment).ceil(), 0));
    }

    let n = -(1.0 - rate * balance / payment).ln() / (1.0 + rate).ln();
    // Round away tiny float excess before taking the ceiling.
    Payoff::Months(whole_count((n - 1e-9).ceil(), 1))
}

//! Closed-form finance formulas.
//!
//! Every function here is pure: inputs are sanitised first (see [`sanitize`])
//! and undefined results are reported through sentinels such as
//! [`ratio::RatioOutcome`] rather than errors.

pub mod sanitize;
pub mod ratio;
pub mod loan;
pub mod mortgage;
pub mod debt;
pub mod business_ratios;
pub mod profitability;
pub mod payroll;
pub mod cash_flow;
pub mod growth;

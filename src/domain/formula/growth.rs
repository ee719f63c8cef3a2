//! Compound growth, retirement, FIRE and savings-goal projections.
//!
//! Growth compounds monthly with contributions at the end of each month:
//! `FV = P(1+r)^n + C((1+r)^n − 1)/r`, or `P + C·n` when `r = 0`.

use super::ratio::{safe_ratio, RatioOutcome};
use super::sanitize::{monthly_rate, non_negative, pct_to_rate, whole_count};

pub const MAX_PROJECTION_YEARS: u32 = 100;

fn future_value(principal: f64, monthly_contribution: f64, rate: f64, months: u32) -> f64 {
    let n = months as f64;
    if rate == 0.0 {
        return principal + monthly_contribution * n;
    }
    let growth = (1.0 + rate).powf(n);
    principal * growth + monthly_contribution * (growth - 1.0) / rate
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GrowthInputs {
    pub principal: f64,
    pub monthly_contribution: f64,
    pub annual_rate_pct: f64,
    pub years: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct YearBalance {
    pub year: u32,
    pub balance: f64,
    pub contributions: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GrowthProjection {
    pub future_value: f64,
    pub total_contributions: f64,
    pub total_growth: f64,
    pub yearly: Vec<YearBalance>,
}

pub fn compound_growth(inputs: &GrowthInputs) -> GrowthProjection {
    let principal = non_negative(inputs.principal);
    let contribution = non_negative(inputs.monthly_contribution);
    let rate = monthly_rate(inputs.annual_rate_pct);
    let years = whole_count(inputs.years, 0).min(MAX_PROJECTION_YEARS);

    let yearly = (1..=years)
        .map(|year| YearBalance {
            year,
            balance: future_value(principal, contribution, rate, year * 12),
            contributions: principal + contribution * (year * 12) as f64,
        })
        .collect::<Vec<_>>();

    let future_value = future_value(principal, contribution, rate, years * 12);
    let total_contributions = principal + contribution * (years * 12) as f64;

    GrowthProjection {
        future_value,
        total_contributions,
        total_growth: future_value - total_contributions,
        yearly,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RetirementInputs {
    pub current_age: f64,
    pub retirement_age: f64,
    pub current_savings: f64,
    pub monthly_contribution: f64,
    pub annual_return_pct: f64,
    pub inflation_pct: f64,
    pub withdrawal_rate_pct: f64,
}

impl Default for RetirementInputs {
    fn default() -> Self {
        RetirementInputs {
            current_age: 30.0,
            retirement_age: 65.0,
            current_savings: 0.0,
            monthly_contribution: 0.0,
            annual_return_pct: 7.0,
            inflation_pct: 3.0,
            withdrawal_rate_pct: 4.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RetirementProjection {
    pub years_to_retirement: u32,
    pub nominal_balance: f64,
    /// Balance in today's money.
    pub real_balance: f64,
    pub annual_income_nominal: f64,
    pub annual_income_real: f64,
}

pub fn retirement_projection(inputs: &RetirementInputs) -> RetirementProjection {
    let current_age = whole_count(inputs.current_age, 0);
    let retirement_age = whole_count(inputs.retirement_age, 0);
    let years_to_retirement = retirement_age
        .saturating_sub(current_age)
        .min(MAX_PROJECTION_YEARS);

    let nominal_balance = future_value(
        non_negative(inputs.current_savings),
        non_negative(inputs.monthly_contribution),
        monthly_rate(inputs.annual_return_pct),
        years_to_retirement * 12,
    );
    let deflator = (1.0 + pct_to_rate(inputs.inflation_pct)).powi(years_to_retirement as i32);
    let real_balance = nominal_balance / deflator;
    let withdrawal = pct_to_rate(inputs.withdrawal_rate_pct);

    RetirementProjection {
        years_to_retirement,
        nominal_balance,
        real_balance,
        annual_income_nominal: nominal_balance * withdrawal,
        annual_income_real: real_balance * withdrawal,
    }
}

/// Portfolio size whose safe withdrawal covers annual expenses.
pub fn fire_number(annual_expenses: f64, withdrawal_rate_pct: f64) -> RatioOutcome {
    safe_ratio(non_negative(annual_expenses), pct_to_rate(withdrawal_rate_pct))
}

#[derive(Debug, Clone, PartialEq)]
pub struct FireInputs {
    pub current_savings: f64,
    pub annual_savings: f64,
    pub annual_expenses: f64,
    pub annual_return_pct: f64,
    pub withdrawal_rate_pct: f64,
}

impl Default for FireInputs {
    fn default() -> Self {
        FireInputs {
            current_savings: 0.0,
            annual_savings: 0.0,
            annual_expenses: 0.0,
            annual_return_pct: 7.0,
            withdrawal_rate_pct: 4.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FireProjection {
    pub fire_number: RatioOutcome,
    /// `None` when the target is not reached within the projection horizon.
    pub years: Option<u32>,
    pub balance_at_fire: Option<f64>,
}

pub fn years_to_fire(inputs: &FireInputs) -> FireProjection {
    let target = fire_number(inputs.annual_expenses, inputs.withdrawal_rate_pct);
    let Some(target_value) = target.value() else {
        return FireProjection {
            fire_number: target,
            years: None,
            balance_at_fire: None,
        };
    };

    let rate = pct_to_rate(inputs.annual_return_pct);
    let savings = non_negative(inputs.annual_savings);
    let mut balance = non_negative(inputs.current_savings);

    for year in 0..=MAX_PROJECTION_YEARS {
        if balance >= target_value {
            return FireProjection {
                fire_number: target,
                years: Some(year),
                balance_at_fire: Some(balance),
            };
        }
        balance = balance * (1.0 + rate) + savings;
    }

    FireProjection {
        fire_number: target,
        years: None,
        balance_at_fire: None,
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SavingsGoalInputs {
    pub target_amount: f64,
    pub current_savings: f64,
    pub annual_rate_pct: f64,
    pub months: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SavingsGoal {
    pub months: u32,
    pub required_monthly: f64,
    pub growth_of_current: f64,
}

pub fn savings_goal(inputs: &SavingsGoalInputs) -> SavingsGoal {
    let target = non_negative(inputs.target_amount);
    let current = non_negative(inputs.current_savings);
    let rate = monthly_rate(inputs.annual_rate_pct);
    let months = whole_count(inputs.months, 1).min(MAX_PROJECTION_YEARS * 12);

    let grown_current = future_value(current, 0.0, rate, months);
    let shortfall = target - grown_current;
    let required_monthly = if shortfall <= 0.0 {
        0.0
    } else if rate == 0.0 {
        shortfall / months as f64
    } else {
        shortfall * rate / ((1.0 + rate).powf(months as f64) - 1.0)
    };

    SavingsGoal {
        months,
        required_monthly,
        growth_of_current: grown_current - current,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmergencyFund {
    pub target: f64,
    pub shortfall: f64,
    pub months_covered: RatioOutcome,
}

pub fn emergency_fund(monthly_expenses: f64, months_of_coverage: f64, current_savings: f64) -> EmergencyFund {
    let expenses = non_negative(monthly_expenses);
    let current = non_negative(current_savings);
    let target = expenses * non_negative(months_of_coverage);
    EmergencyFund {
        target,
        shortfall: non_negative(target - current),
        months_covered: safe_ratio(current, expenses),
    }
}

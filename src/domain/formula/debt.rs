//! Multi-debt payoff simulation (snowball and avalanche) and debt-to-income.
//!
//! Each month interest accrues, every minimum is paid, and the rest of the
//! monthly budget goes to one target debt. The budget is the sum of the
//! original minimums plus the extra payment, so minimums freed by cleared
//! debts roll into the target.

use super::ratio::{safe_percent, RatioOutcome};
use super::sanitize::{monthly_rate, non_negative};

/// Safety cap on simulated months; hitting it means the payments cannot win.
pub const MAX_PAYOFF_MONTHS: u32 = 1000;

const BALANCE_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq)]
pub struct Debt {
    pub name: String,
    pub balance: f64,
    pub annual_rate_pct: f64,
    pub minimum_payment: f64,
}

impl Debt {
    pub fn new(name: impl Into<String>, balance: f64, annual_rate_pct: f64, minimum_payment: f64) -> Self {
        Debt {
            name: name.into(),
            balance: non_negative(balance),
            annual_rate_pct: non_negative(annual_rate_pct),
            minimum_payment: non_negative(minimum_payment),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayoffStrategy {
    /// Smallest remaining balance first.
    Snowball,
    /// Highest interest rate first.
    Avalanche,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DebtCleared {
    pub name: String,
    pub month: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PayoffPlan {
    pub strategy: PayoffStrategy,
    pub months: u32,
    pub total_interest: f64,
    pub total_paid: f64,
    pub payoff_order: Vec<DebtCleared>,
    /// False when the safety cap stopped the simulation.
    pub completed: bool,
}

struct Working {
    name: String,
    balance: f64,
    rate: f64,
    annual_rate_pct: f64,
    minimum: f64,
    cleared: bool,
}

fn pick_target(debts: &[Working], strategy: PayoffStrategy) -> Option<usize> {
    let open = debts.iter().enumerate().filter(|(_, d)| d.balance > BALANCE_EPSILON);
    match strategy {
        PayoffStrategy::Snowball => open
            .min_by(|(_, a), (_, b)| a.balance.total_cmp(&b.balance))
            .map(|(i, _)| i),
        PayoffStrategy::Avalanche => open
            .max_by(|(ia, a), (ib, b)| {
                a.annual_rate_pct
                    .total_cmp(&b.annual_rate_pct)
                    // earlier entry wins ties
                    .then(ib.cmp(ia))
            })
            .map(|(i, _)| i),
    }
}

pub fn simulate_payoff(debts: &[Debt], extra_payment: f64, strategy: PayoffStrategy) -> PayoffPlan {
    let mut working: Vec<Working> = debts
        .iter()
        .map(|d| Working {
            name: d.name.clone(),
            balance: non_negative(d.balance),
            rate: monthly_rate(d.annual_rate_pct),
            annual_rate_pct: non_negative(d.annual_rate_pct),
            minimum: non_negative(d.minimum_payment),
            cleared: false,
        })
        .collect();

    let budget: f64 = working.iter().map(|d| d.minimum).sum::<f64>() + non_negative(extra_payment);

    let mut payoff_order = Vec::new();
    let mut total_interest = 0.0;
    let mut total_paid = 0.0;
    let mut month = 0;

    for d in working.iter_mut() {
        if d.balance <= BALANCE_EPSILON {
            d.cleared = true;
            payoff_order.push(DebtCleared {
                name: d.name.clone(),
                month: 0,
            });
        }
    }

    while working.iter().any(|d| d.balance > BALANCE_EPSILON) {
        if month >= MAX_PAYOFF_MONTHS {
            log::warn!(
                "debt payoff stopped after {} months; payments do not outpace interest",
                MAX_PAYOFF_MONTHS
            );
            return PayoffPlan {
                strategy,
                months: month,
                total_interest,
                total_paid,
                payoff_order,
                completed: false,
            };
        }
        month += 1;

        for d in working.iter_mut().filter(|d| d.balance > BALANCE_EPSILON) {
            let interest = d.balance * d.rate;
            d.balance += interest;
            total_interest += interest;
        }

        let mut remaining = budget;
        for d in working.iter_mut().filter(|d| d.balance > BALANCE_EPSILON) {
            let pay = d.minimum.min(d.balance).min(remaining);
            d.balance -= pay;
            remaining -= pay;
            total_paid += pay;
        }

        while remaining > BALANCE_EPSILON {
            let Some(idx) = pick_target(&working, strategy) else {
                break;
            };
            let d = &mut working[idx];
            let pay = remaining.min(d.balance);
            d.balance -= pay;
            remaining -= pay;
            total_paid += pay;
            if d.balance <= BALANCE_EPSILON {
                d.balance = 0.0;
            }
        }

        for d in working.iter_mut().filter(|d| !d.cleared) {
            if d.balance <= BALANCE_EPSILON {
                d.balance = 0.0;
                d.cleared = true;
                payoff_order.push(DebtCleared {
                    name: d.name.clone(),
                    month,
                });
            }
        }
    }

    PayoffPlan {
        strategy,
        months: month,
        total_interest,
        total_paid,
        payoff_order,
        completed: true,
    }
}

pub fn debt_snowball(debts: &[Debt], extra_payment: f64) -> PayoffPlan {
    simulate_payoff(debts, extra_payment, PayoffStrategy::Snowball)
}

pub fn debt_avalanche(debts: &[Debt], extra_payment: f64) -> PayoffPlan {
    simulate_payoff(debts, extra_payment, PayoffStrategy::Avalanche)
}

/// Monthly debt payments as a percentage of gross monthly income.
pub fn debt_to_income(monthly_debt: f64, gross_monthly_income: f64) -> RatioOutcome {
    safe_percent(non_negative(monthly_debt), non_negative(gross_monthly_income))
}

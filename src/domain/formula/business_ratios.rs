//! Financial statement ratios.
//!
//! Each ratio is one guarded division; balance-sheet amounts are clamped to
//! non-negative, income figures keep their sign so losses show as negative
//! returns.

use super::ratio::{safe_percent, safe_ratio, RatioOutcome};
use super::sanitize::{finite_or, non_negative};

pub const DAYS_PER_YEAR: f64 = 365.0;

/// Debt service coverage: net operating income over total debt service.
pub fn dscr(net_operating_income: f64, total_debt_service: f64) -> RatioOutcome {
    safe_ratio(finite_or(net_operating_income, 0.0), non_negative(total_debt_service))
}

pub fn current_ratio(current_assets: f64, current_liabilities: f64) -> RatioOutcome {
    safe_ratio(non_negative(current_assets), non_negative(current_liabilities))
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuickRatioInputs {
    pub cash: f64,
    pub marketable_securities: f64,
    pub accounts_receivable: f64,
    pub current_liabilities: f64,
}

pub fn quick_ratio(inputs: &QuickRatioInputs) -> RatioOutcome {
    let quick_assets = non_negative(inputs.cash)
        + non_negative(inputs.marketable_securities)
        + non_negative(inputs.accounts_receivable);
    safe_ratio(quick_assets, non_negative(inputs.current_liabilities))
}

/// Return on assets, percent.
pub fn return_on_assets(net_income: f64, total_assets: f64) -> RatioOutcome {
    safe_percent(finite_or(net_income, 0.0), non_negative(total_assets))
}

/// Return on equity, percent.
pub fn return_on_equity(net_income: f64, shareholder_equity: f64) -> RatioOutcome {
    safe_percent(finite_or(net_income, 0.0), non_negative(shareholder_equity))
}

#[derive(Debug, Clone, PartialEq)]
pub struct Roi {
    pub net_gain: f64,
    pub roi_pct: RatioOutcome,
    /// Compound annual rate over the holding period, when one was given.
    pub annualized_pct: Option<RatioOutcome>,
}

pub fn return_on_investment(amount_invested: f64, amount_returned: f64, years: f64) -> Roi {
    let invested = non_negative(amount_invested);
    let returned = non_negative(amount_returned);
    let net_gain = returned - invested;
    let roi_pct = safe_percent(net_gain, invested);

    let years = non_negative(years);
    let annualized_pct = if years > 0.0 {
        Some(safe_ratio(returned, invested).map(|growth| (growth.powf(1.0 / years) - 1.0) * 100.0))
    } else {
        None
    };

    Roi {
        net_gain,
        roi_pct,
        annualized_pct,
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryTurnoverInputs {
    pub cost_of_goods_sold: f64,
    pub beginning_inventory: f64,
    pub ending_inventory: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryTurnover {
    pub average_inventory: f64,
    pub turnover: RatioOutcome,
    pub days_in_inventory: RatioOutcome,
}

pub fn inventory_turnover(inputs: &InventoryTurnoverInputs) -> InventoryTurnover {
    let average_inventory =
        (non_negative(inputs.beginning_inventory) + non_negative(inputs.ending_inventory)) / 2.0;
    let turnover = safe_ratio(non_negative(inputs.cost_of_goods_sold), average_inventory);
    let days_in_inventory = match turnover {
        RatioOutcome::Value(t) => safe_ratio(DAYS_PER_YEAR, t),
        RatioOutcome::Infinite => RatioOutcome::Value(0.0),
        RatioOutcome::Undefined => RatioOutcome::Undefined,
    };
    InventoryTurnover {
        average_inventory,
        turnover,
        days_in_inventory,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReceivablesTurnover {
    pub turnover: RatioOutcome,
    pub days_sales_outstanding: RatioOutcome,
}

pub fn receivables_turnover(net_credit_sales: f64, average_receivables: f64) -> ReceivablesTurnover {
    let turnover = safe_ratio(non_negative(net_credit_sales), non_negative(average_receivables));
    let days_sales_outstanding = match turnover {
        RatioOutcome::Value(t) => safe_ratio(DAYS_PER_YEAR, t),
        RatioOutcome::Infinite => RatioOutcome::Value(0.0),
        RatioOutcome::Undefined => RatioOutcome::Undefined,
    };
    ReceivablesTurnover {
        turnover,
        days_sales_outstanding,
    }
}

pub fn asset_turnover(revenue: f64, average_total_assets: f64) -> RatioOutcome {
    safe_ratio(non_negative(revenue), non_negative(average_total_assets))
}

pub fn debt_to_equity(total_liabilities: f64, shareholder_equity: f64) -> RatioOutcome {
    safe_ratio(non_negative(total_liabilities), non_negative(shareholder_equity))
}

pub fn working_capital(current_assets: f64, current_liabilities: f64) -> f64 {
    non_negative(current_assets) - non_negative(current_liabilities)
}

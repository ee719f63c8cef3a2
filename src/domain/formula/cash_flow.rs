//! Linear cash-flow forecast.
//!
//! Each item's monthly amount is prorated by the share of a 30-day month it is
//! active; the resulting net flow repeats unchanged every forecast month.

use super::sanitize::{finite_or, non_negative};

pub const DAYS_PER_MONTH: f64 = 30.0;
pub const MAX_FORECAST_MONTHS: u32 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowKind {
    Inflow,
    Outflow,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CashFlowItem {
    pub label: String,
    pub kind: FlowKind,
    pub monthly_amount: f64,
    /// Days of the month the item applies; clamped to `0..=30`.
    pub active_days: f64,
}

impl CashFlowItem {
    pub fn inflow(label: impl Into<String>, monthly_amount: f64, active_days: f64) -> Self {
        CashFlowItem {
            label: label.into(),
            kind: FlowKind::Inflow,
            monthly_amount,
            active_days,
        }
    }

    pub fn outflow(label: impl Into<String>, monthly_amount: f64, active_days: f64) -> Self {
        CashFlowItem {
            label: label.into(),
            kind: FlowKind::Outflow,
            monthly_amount,
            active_days,
        }
    }

    pub fn prorated(&self) -> f64 {
        let days = non_negative(self.active_days).min(DAYS_PER_MONTH);
        non_negative(self.monthly_amount) * days / DAYS_PER_MONTH
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CashFlowInputs {
    pub opening_balance: f64,
    pub months: u32,
    pub items: Vec<CashFlowItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastMonth {
    pub month: u32,
    pub opening: f64,
    pub inflows: f64,
    pub outflows: f64,
    pub closing: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CashFlowForecast {
    pub monthly_inflows: f64,
    pub monthly_outflows: f64,
    pub net_monthly: f64,
    pub rows: Vec<ForecastMonth>,
    pub closing_balance: f64,
    pub first_negative_month: Option<u32>,
}

pub fn forecast(inputs: &CashFlowInputs) -> CashFlowForecast {
    let (monthly_inflows, monthly_outflows) =
        inputs
            .items
            .iter()
            .fold((0.0, 0.0), |(inflow, outflow), item| match item.kind {
                FlowKind::Inflow => (inflow + item.prorated(), outflow),
                FlowKind::Outflow => (inflow, outflow + item.prorated()),
            });
    let net_monthly = monthly_inflows - monthly_outflows;

    let opening_balance = finite_or(inputs.opening_balance, 0.0);
    let months = inputs.months.min(MAX_FORECAST_MONTHS);
    let mut rows = Vec::with_capacity(months as usize);
    let mut first_negative_month = None;

    for month in 1..=months {
        let opening = opening_balance + net_monthly * (month - 1) as f64;
        let closing = opening_balance + net_monthly * month as f64;
        if closing < 0.0 && first_negative_month.is_none() {
            first_negative_month = Some(month);
        }
        rows.push(ForecastMonth {
            month,
            opening,
            inflows: monthly_inflows,
            outflows: monthly_outflows,
            closing,
        });
    }

    CashFlowForecast {
        monthly_inflows,
        monthly_outflows,
        net_monthly,
        closing_balance: rows.last().map(|r| r.closing).unwrap_or(opening_balance),
        rows,
        first_negative_month,
    }
}

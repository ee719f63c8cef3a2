//! Break-even, margins, markup and contribution margin.

use super::ratio::{safe_percent, RatioOutcome};
use super::sanitize::{finite_or, non_negative};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BreakEvenInputs {
    pub fixed_costs: f64,
    pub price_per_unit: f64,
    pub variable_cost_per_unit: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BreakEven {
    Units {
        units: f64,
        units_rounded_up: u64,
        revenue: f64,
        contribution_margin: f64,
    },
    /// Each unit sold loses money or breaks even, so fixed costs are never covered.
    NoBreakEven,
}

pub fn break_even(inputs: &BreakEvenInputs) -> BreakEven {
    let fixed = non_negative(inputs.fixed_costs);
    let price = non_negative(inputs.price_per_unit);
    let variable = non_negative(inputs.variable_cost_per_unit);

    let contribution_margin = price - variable;
    if contribution_margin <= 0.0 {
        return BreakEven::NoBreakEven;
    }

    let units = fixed / contribution_margin;
    BreakEven::Units {
        units,
        units_rounded_up: units.ceil() as u64,
        revenue: units * price,
        contribution_margin,
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfitInputs {
    pub revenue: f64,
    pub cost_of_goods_sold: f64,
    pub operating_expenses: f64,
    pub interest_and_taxes: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfitMargins {
    pub gross_profit: f64,
    pub gross_margin_pct: RatioOutcome,
    pub operating_profit: f64,
    pub operating_margin_pct: RatioOutcome,
    pub net_profit: f64,
    pub net_margin_pct: RatioOutcome,
}

pub fn profit_margins(inputs: &ProfitInputs) -> ProfitMargins {
    let revenue = non_negative(inputs.revenue);
    let gross_profit = revenue - non_negative(inputs.cost_of_goods_sold);
    let operating_profit = gross_profit - non_negative(inputs.operating_expenses);
    let net_profit = operating_profit - finite_or(inputs.interest_and_taxes, 0.0);

    ProfitMargins {
        gross_profit,
        gross_margin_pct: safe_percent(gross_profit, revenue),
        operating_profit,
        operating_margin_pct: safe_percent(operating_profit, revenue),
        net_profit,
        net_margin_pct: safe_percent(net_profit, revenue),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Markup {
    pub profit_per_unit: f64,
    /// Profit as a percentage of cost.
    pub markup_pct: RatioOutcome,
    /// Profit as a percentage of selling price.
    pub margin_pct: RatioOutcome,
}

pub fn markup(cost: f64, price: f64) -> Markup {
    let cost = non_negative(cost);
    let price = non_negative(price);
    let profit_per_unit = price - cost;
    Markup {
        profit_per_unit,
        markup_pct: safe_percent(profit_per_unit, cost),
        margin_pct: safe_percent(profit_per_unit, price),
    }
}

/// Selling price that earns `markup_pct` over cost.
pub fn price_for_markup(cost: f64, markup_pct: f64) -> f64 {
    non_negative(cost) * (1.0 + non_negative(markup_pct) / 100.0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContributionMargin {
    pub per_unit: f64,
    pub ratio_pct: RatioOutcome,
}

pub fn contribution_margin(price_per_unit: f64, variable_cost_per_unit: f64) -> ContributionMargin {
    let price = non_negative(price_per_unit);
    let per_unit = price - non_negative(variable_cost_per_unit);
    ContributionMargin {
        per_unit,
        ratio_pct: safe_percent(per_unit, price),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn break_even_units() {
        let result = break_even(&BreakEvenInputs {
            fixed_costs: 10_000.0,
            price_per_unit: 50.0,
            variable_cost_per_unit: 30.0,
        });
        match result {
            BreakEven::Units {
                units,
                units_rounded_up,
                revenue,
                contribution_margin,
            } => {
                assert!((units - 500.0).abs() < f64::EPSILON);
                assert_eq!(units_rounded_up, 500);
                assert!((revenue - 25_000.0).abs() < 1e-9);
                assert!((contribution_margin - 20.0).abs() < f64::EPSILON);
            }
            BreakEven::NoBreakEven => panic!("expected a break-even point"),
        }
    }

    #[test]
    fn break_even_rounds_partial_units_up() {
        let result = break_even(&BreakEvenInputs {
            fixed_costs: 1_000.0,
            price_per_unit: 10.0,
            variable_cost_per_unit: 7.0,
        });
        assert!(matches!(result, BreakEven::Units { units_rounded_up: 334, .. }));
    }

    #[test]
    fn no_break_even_when_price_not_above_cost() {
        let equal = BreakEvenInputs {
            fixed_costs: 1_000.0,
            price_per_unit: 20.0,
            variable_cost_per_unit: 20.0,
        };
        assert_eq!(break_even(&equal), BreakEven::NoBreakEven);

        let losing = BreakEvenInputs {
            variable_cost_per_unit: 25.0,
            ..equal
        };
        assert_eq!(break_even(&losing), BreakEven::NoBreakEven);
    }

    #[test]
    fn margins() {
        let result = profit_margins(&ProfitInputs {
            revenue: 1_000.0,
            cost_of_goods_sold: 400.0,
            operating_expenses: 300.0,
            interest_and_taxes: 100.0,
        });
        assert!((result.gross_profit - 600.0).abs() < f64::EPSILON);
        assert_eq!(result.gross_margin_pct, RatioOutcome::Value(60.0));
        assert_eq!(result.operating_margin_pct, RatioOutcome::Value(30.0));
        assert_eq!(result.net_margin_pct, RatioOutcome::Value(20.0));
    }

    #[test]
    fn margins_without_revenue() {
        let result = profit_margins(&ProfitInputs {
            operating_expenses: 50.0,
            ..ProfitInputs::default()
        });
        assert_eq!(result.gross_margin_pct, RatioOutcome::Undefined);
        assert_eq!(result.operating_margin_pct, RatioOutcome::Infinite);
    }

    #[test]
    fn markup_vs_margin() {
        let result = markup(80.0, 100.0);
        assert!((result.profit_per_unit - 20.0).abs() < f64::EPSILON);
        assert_eq!(result.markup_pct, RatioOutcome::Value(25.0));
        assert_eq!(result.margin_pct, RatioOutcome::Value(20.0));
        assert!((price_for_markup(80.0, 25.0) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn contribution() {
        let result = contribution_margin(40.0, 30.0);
        assert!((result.per_unit - 10.0).abs() < f64::EPSILON);
        assert_eq!(result.ratio_pct, RatioOutcome::Value(25.0));
    }
}

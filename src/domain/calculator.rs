//! Calculator registry.
//!
//! Maps each calculator name to its field contract and evaluates it by
//! reading the calculator's config section into the formula's input struct.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::FincalcError;
use crate::domain::form::{number, parse_debts, text, FieldSpec, FormInputs};
use crate::domain::formula::business_ratios::{self, InventoryTurnoverInputs, QuickRatioInputs};
use crate::domain::formula::cash_flow::{self, CashFlowInputs, CashFlowItem};
use crate::domain::formula::debt::{self, PayoffPlan, PayoffStrategy};
use crate::domain::formula::growth::{
    self, FireInputs, GrowthInputs, RetirementInputs, SavingsGoalInputs,
};
use crate::domain::formula::loan::{self, LoanTerms, Payoff};
use crate::domain::formula::mortgage::{self, AffordabilityInputs, MortgageInputs};
use crate::domain::formula::payroll::{self, PayrollInputs};
use crate::domain::formula::profitability::{self, BreakEven, BreakEvenInputs, ProfitInputs};
use crate::domain::formula::sanitize::whole_count;
use crate::domain::report::{CalculationReport, Figure};
use crate::ports::config_port::ConfigPort;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Calculator {
    LoanPayment,
    Amortization,
    LoanPayoff,
    MortgagePayment,
    MortgageAffordability,
    DebtSnowball,
    DebtAvalanche,
    DebtToIncome,
    Dscr,
    CurrentRatio,
    QuickRatio,
    ReturnOnAssets,
    ReturnOnEquity,
    ReturnOnInvestment,
    InventoryTurnover,
    ReceivablesTurnover,
    AssetTurnover,
    DebtToEquity,
    WorkingCapital,
    BreakEven,
    ProfitMargin,
    Markup,
    ContributionMargin,
    PayrollTax,
    CashFlowForecast,
    CompoundGrowth,
    RetirementProjection,
    FireNumber,
    YearsToFire,
    SavingsGoal,
    EmergencyFund,
}

const LOAN_FIELDS: &[FieldSpec] = &[
    number("principal", "Loan amount", 0.0),
    number("annual_rate", "Annual interest rate (%)", 0.0),
    number("term_months", "Term (months)", 360.0),
];

const LOAN_PAYOFF_FIELDS: &[FieldSpec] = &[
    number("balance", "Current balance", 0.0),
    number("annual_rate", "Annual interest rate (%)", 0.0),
    number("monthly_payment", "Monthly payment", 0.0),
];

const MORTGAGE_FIELDS: &[FieldSpec] = &[
    number("home_price", "Home price", 0.0),
    number("down_payment", "Down payment", 0.0),
    number("annual_rate", "Annual interest rate (%)", 0.0),
    number("term_years", "Term (years)", 30.0),
    number("property_tax_rate", "Property tax (% of price per year)", 0.0),
    number("annual_insurance", "Homeowners insurance per year", 0.0),
    number("monthly_hoa", "HOA dues per month", 0.0),
    number("pmi_rate", "PMI (% of loan per year)", 0.0),
];

const AFFORDABILITY_FIELDS: &[FieldSpec] = &[
    number("annual_income", "Gross annual income", 0.0),
    number("monthly_debts", "Other monthly debt payments", 0.0),
    number("down_payment", "Down payment", 0.0),
    number("annual_rate", "Annual interest rate (%)", 0.0),
    number("term_years", "Term (years)", 30.0),
    number("front_end_ratio", "Housing cost cap (% of income)", 28.0),
    number("back_end_ratio", "Total debt cap (% of income)", 36.0),
    number("property_tax_rate", "Property tax (% of price per year)", 0.0),
    number("annual_insurance", "Homeowners insurance per year", 0.0),
];

const DEBT_PAYOFF_FIELDS: &[FieldSpec] = &[
    text("debts", "Debts (name:balance:rate:minimum; ...)", ""),
    number("extra_payment", "Extra monthly payment", 0.0),
];

const DTI_FIELDS: &[FieldSpec] = &[
    number("monthly_debt", "Monthly debt payments", 0.0),
    number("gross_monthly_income", "Gross monthly income", 0.0),
];

const DSCR_FIELDS: &[FieldSpec] = &[
    number("net_operating_income", "Net operating income", 0.0),
    number("total_debt_service", "Total debt service", 0.0),
];

const CURRENT_RATIO_FIELDS: &[FieldSpec] = &[
    number("current_assets", "Current assets", 0.0),
    number("current_liabilities", "Current liabilities", 0.0),
];

const QUICK_RATIO_FIELDS: &[FieldSpec] = &[
    number("cash", "Cash and equivalents", 0.0),
    number("marketable_securities", "Marketable securities", 0.0),
    number("accounts_receivable", "Accounts receivable", 0.0),
    number("current_liabilities", "Current liabilities", 0.0),
];

const ROA_FIELDS: &[FieldSpec] = &[
    number("net_income", "Net income", 0.0),
    number("total_assets", "Total assets", 0.0),
];

const ROE_FIELDS: &[FieldSpec] = &[
    number("net_income", "Net income", 0.0),
    number("shareholder_equity", "Shareholder equity", 0.0),
];

const ROI_FIELDS: &[FieldSpec] = &[
    number("amount_invested", "Amount invested", 0.0),
    number("amount_returned", "Amount returned", 0.0),
    number("years", "Holding period (years)", 0.0),
];

const INVENTORY_FIELDS: &[FieldSpec] = &[
    number("cost_of_goods_sold", "Cost of goods sold", 0.0),
    number("beginning_inventory", "Beginning inventory", 0.0),
    number("ending_inventory", "Ending inventory", 0.0),
];

const RECEIVABLES_FIELDS: &[FieldSpec] = &[
    number("net_credit_sales", "Net credit sales", 0.0),
    number("average_receivables", "Average accounts receivable", 0.0),
];

const ASSET_TURNOVER_FIELDS: &[FieldSpec] = &[
    number("revenue", "Revenue", 0.0),
    number("average_total_assets", "Average total assets", 0.0),
];

const DEBT_TO_EQUITY_FIELDS: &[FieldSpec] = &[
    number("total_liabilities", "Total liabilities", 0.0),
    number("shareholder_equity", "Shareholder equity", 0.0),
];

const BREAK_EVEN_FIELDS: &[FieldSpec] = &[
    number("fixed_costs", "Fixed costs", 0.0),
    number("price_per_unit", "Price per unit", 0.0),
    number("variable_cost_per_unit", "Variable cost per unit", 0.0),
];

const PROFIT_MARGIN_FIELDS: &[FieldSpec] = &[
    number("revenue", "Revenue", 0.0),
    number("cost_of_goods_sold", "Cost of goods sold", 0.0),
    number("operating_expenses", "Operating expenses", 0.0),
    number("interest_and_taxes", "Interest and taxes", 0.0),
];

const MARKUP_FIELDS: &[FieldSpec] = &[
    number("cost", "Unit cost", 0.0),
    number("price", "Selling price", 0.0),
    number("target_markup", "Target markup (%)", 0.0),
];

const CONTRIBUTION_FIELDS: &[FieldSpec] = &[
    number("price_per_unit", "Price per unit", 0.0),
    number("variable_cost_per_unit", "Variable cost per unit", 0.0),
];

const PAYROLL_FIELDS: &[FieldSpec] = &[
    number("gross_pay", "Gross pay this period", 0.0),
    number("year_to_date_wages", "Wages paid earlier this year", 0.0),
    number("federal_withholding", "Federal withholding (%)", 0.0),
    number("state_withholding", "State withholding (%)", 0.0),
];

const CASH_FLOW_FIELDS: &[FieldSpec] = &[
    number("opening_balance", "Opening balance", 0.0),
    number("months", "Months to forecast", 12.0),
    number("monthly_income", "Monthly income", 0.0),
    number("income_days", "Days income is received (of 30)", 30.0),
    number("monthly_expenses", "Monthly expenses", 0.0),
    number("expense_days", "Days expenses apply (of 30)", 30.0),
];

const GROWTH_FIELDS: &[FieldSpec] = &[
    number("principal", "Starting balance", 0.0),
    number("monthly_contribution", "Monthly contribution", 0.0),
    number("annual_rate", "Annual return (%)", 0.0),
    number("years", "Years", 10.0),
];

const RETIREMENT_FIELDS: &[FieldSpec] = &[
    number("current_age", "Current age", 30.0),
    number("retirement_age", "Retirement age", 65.0),
    number("current_savings", "Current savings", 0.0),
    number("monthly_contribution", "Monthly contribution", 0.0),
    number("annual_return", "Annual return (%)", 7.0),
    number("inflation", "Inflation (%)", 3.0),
    number("withdrawal_rate", "Withdrawal rate (%)", 4.0),
];

const FIRE_NUMBER_FIELDS: &[FieldSpec] = &[
    number("annual_expenses", "Annual expenses", 0.0),
    number("withdrawal_rate", "Withdrawal rate (%)", 4.0),
];

const YEARS_TO_FIRE_FIELDS: &[FieldSpec] = &[
    number("current_savings", "Current savings", 0.0),
    number("annual_savings", "Annual savings", 0.0),
    number("annual_expenses", "Annual expenses", 0.0),
    number("annual_return", "Annual return (%)", 7.0),
    number("withdrawal_rate", "Withdrawal rate (%)", 4.0),
];

const SAVINGS_GOAL_FIELDS: &[FieldSpec] = &[
    number("target_amount", "Target amount", 0.0),
    number("current_savings", "Current savings", 0.0),
    number("annual_rate", "Annual interest rate (%)", 0.0),
    number("months", "Months to goal", 12.0),
];

const EMERGENCY_FUND_FIELDS: &[FieldSpec] = &[
    number("monthly_expenses", "Monthly expenses", 0.0),
    number("months_of_coverage", "Months of coverage", 6.0),
    number("current_savings", "Current savings", 0.0),
];

impl Calculator {
    pub const ALL: [Calculator; 31] = [
        Calculator::LoanPayment,
        Calculator::Amortization,
        Calculator::LoanPayoff,
        Calculator::MortgagePayment,
        Calculator::MortgageAffordability,
        Calculator::DebtSnowball,
        Calculator::DebtAvalanche,
        Calculator::DebtToIncome,
        Calculator::Dscr,
        Calculator::CurrentRatio,
        Calculator::QuickRatio,
        Calculator::ReturnOnAssets,
        Calculator::ReturnOnEquity,
        Calculator::ReturnOnInvestment,
        Calculator::InventoryTurnover,
        Calculator::ReceivablesTurnover,
        Calculator::AssetTurnover,
        Calculator::DebtToEquity,
        Calculator::WorkingCapital,
        Calculator::BreakEven,
        Calculator::ProfitMargin,
        Calculator::Markup,
        Calculator::ContributionMargin,
        Calculator::PayrollTax,
        Calculator::CashFlowForecast,
        Calculator::CompoundGrowth,
        Calculator::RetirementProjection,
        Calculator::FireNumber,
        Calculator::YearsToFire,
        Calculator::SavingsGoal,
        Calculator::EmergencyFund,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Calculator::LoanPayment => "loan_payment",
            Calculator::Amortization => "amortization",
            Calculator::LoanPayoff => "loan_payoff",
            Calculator::MortgagePayment => "mortgage_payment",
            Calculator::MortgageAffordability => "mortgage_affordability",
            Calculator::DebtSnowball => "debt_snowball",
            Calculator::DebtAvalanche => "debt_avalanche",
            Calculator::DebtToIncome => "debt_to_income",
            Calculator::Dscr => "dscr",
            Calculator::CurrentRatio => "current_ratio",
            Calculator::QuickRatio => "quick_ratio",
            Calculator::ReturnOnAssets => "roa",
            Calculator::ReturnOnEquity => "roe",
            Calculator::ReturnOnInvestment => "roi",
            Calculator::InventoryTurnover => "inventory_turnover",
            Calculator::ReceivablesTurnover => "receivables_turnover",
            Calculator::AssetTurnover => "asset_turnover",
            Calculator::DebtToEquity => "debt_to_equity",
            Calculator::WorkingCapital => "working_capital",
            Calculator::BreakEven => "break_even",
            Calculator::ProfitMargin => "profit_margin",
            Calculator::Markup => "markup",
            Calculator::ContributionMargin => "contribution_margin",
            Calculator::PayrollTax => "payroll_tax",
            Calculator::CashFlowForecast => "cash_flow_forecast",
            Calculator::CompoundGrowth => "compound_growth",
            Calculator::RetirementProjection => "retirement_projection",
            Calculator::FireNumber => "fire_number",
            Calculator::YearsToFire => "years_to_fire",
            Calculator::SavingsGoal => "savings_goal",
            Calculator::EmergencyFund => "emergency_fund",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Calculator::LoanPayment => "Loan Payment",
            Calculator::Amortization => "Loan Amortization Schedule",
            Calculator::LoanPayoff => "Loan Payoff Time",
            Calculator::MortgagePayment => "Mortgage Payment (PITI)",
            Calculator::MortgageAffordability => "Mortgage Affordability",
            Calculator::DebtSnowball => "Debt Snowball",
            Calculator::DebtAvalanche => "Debt Avalanche",
            Calculator::DebtToIncome => "Debt-to-Income Ratio",
            Calculator::Dscr => "Debt Service Coverage Ratio",
            Calculator::CurrentRatio => "Current Ratio",
            Calculator::QuickRatio => "Quick Ratio",
            Calculator::ReturnOnAssets => "Return on Assets",
            Calculator::ReturnOnEquity => "Return on Equity",
            Calculator::ReturnOnInvestment => "Return on Investment",
            Calculator::InventoryTurnover => "Inventory Turnover",
            Calculator::ReceivablesTurnover => "Receivables Turnover",
            Calculator::AssetTurnover => "Asset Turnover",
            Calculator::DebtToEquity => "Debt-to-Equity Ratio",
            Calculator::WorkingCapital => "Working Capital",
            Calculator::BreakEven => "Break-Even Point",
            Calculator::ProfitMargin => "Profit Margin",
            Calculator::Markup => "Markup and Margin",
            Calculator::ContributionMargin => "Contribution Margin",
            Calculator::PayrollTax => "Payroll Tax Estimate",
            Calculator::CashFlowForecast => "Cash Flow Forecast",
            Calculator::CompoundGrowth => "Compound Growth",
            Calculator::RetirementProjection => "Retirement Projection",
            Calculator::FireNumber => "FIRE Number",
            Calculator::YearsToFire => "Years to Financial Independence",
            Calculator::SavingsGoal => "Savings Goal",
            Calculator::EmergencyFund => "Emergency Fund",
        }
    }

    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            Calculator::LoanPayment | Calculator::Amortization => LOAN_FIELDS,
            Calculator::LoanPayoff => LOAN_PAYOFF_FIELDS,
            Calculator::MortgagePayment => MORTGAGE_FIELDS,
            Calculator::MortgageAffordability => AFFORDABILITY_FIELDS,
            Calculator::DebtSnowball | Calculator::DebtAvalanche => DEBT_PAYOFF_FIELDS,
            Calculator::DebtToIncome => DTI_FIELDS,
            Calculator::Dscr => DSCR_FIELDS,
            Calculator::CurrentRatio | Calculator::WorkingCapital => CURRENT_RATIO_FIELDS,
            Calculator::QuickRatio => QUICK_RATIO_FIELDS,
            Calculator::ReturnOnAssets => ROA_FIELDS,
            Calculator::ReturnOnEquity => ROE_FIELDS,
            Calculator::ReturnOnInvestment => ROI_FIELDS,
            Calculator::InventoryTurnover => INVENTORY_FIELDS,
            Calculator::ReceivablesTurnover => RECEIVABLES_FIELDS,
            Calculator::AssetTurnover => ASSET_TURNOVER_FIELDS,
            Calculator::DebtToEquity => DEBT_TO_EQUITY_FIELDS,
            Calculator::BreakEven => BREAK_EVEN_FIELDS,
            Calculator::ProfitMargin => PROFIT_MARGIN_FIELDS,
            Calculator::Markup => MARKUP_FIELDS,
            Calculator::ContributionMargin => CONTRIBUTION_FIELDS,
            Calculator::PayrollTax => PAYROLL_FIELDS,
            Calculator::CashFlowForecast => CASH_FLOW_FIELDS,
            Calculator::CompoundGrowth => GROWTH_FIELDS,
            Calculator::RetirementProjection => RETIREMENT_FIELDS,
            Calculator::FireNumber => FIRE_NUMBER_FIELDS,
            Calculator::YearsToFire => YEARS_TO_FIRE_FIELDS,
            Calculator::SavingsGoal => SAVINGS_GOAL_FIELDS,
            Calculator::EmergencyFund => EMERGENCY_FUND_FIELDS,
        }
    }

    pub fn from_name(name: &str) -> Result<Calculator, FincalcError> {
        let wanted = name.trim().to_lowercase().replace('-', "_");
        Calculator::ALL
            .into_iter()
            .find(|c| c.name() == wanted)
            .ok_or_else(|| FincalcError::UnknownCalculator {
                name: name.to_string(),
            })
    }

    /// Evaluate using the inputs in the config section named after this calculator.
    pub fn evaluate(self, config: &dyn ConfigPort) -> Result<CalculationReport, FincalcError> {
        let form = FormInputs::new(config, self.name(), self.fields());
        for key in form.unknown_keys() {
            log::warn!("[{}] ignoring unknown field {}", form.section(), key);
        }
        let report = CalculationReport::new(self.name(), self.title());

        let report = match self {
            Calculator::LoanPayment => {
                let terms = loan_terms(&form);
                let schedule = loan::amortization_schedule(&terms);
                report
                    .line("Monthly payment", Figure::Money(schedule.payment))
                    .line("Number of payments", Figure::Months(terms.term_months))
                    .line("Total interest", Figure::Money(schedule.total_interest))
                    .line("Total paid", Figure::Money(schedule.total_paid))
            }
            Calculator::Amortization => {
                let terms = loan_terms(&form);
                let schedule = loan::amortization_schedule(&terms);
                let mut report = report
                    .line("Monthly payment", Figure::Money(schedule.payment))
                    .line("Payments", Figure::Months(schedule.rows.len() as u32))
                    .line("Total interest", Figure::Money(schedule.total_interest))
                    .line("Total paid", Figure::Money(schedule.total_paid));
                if let Some(first) = schedule.rows.first() {
                    report = report
                        .line("First payment interest", Figure::Money(first.interest))
                        .line("First payment principal", Figure::Money(first.principal));
                }
                report.schedule = Some(schedule);
                report
            }
            Calculator::LoanPayoff => {
                let payoff = loan::payoff_months(
                    form.number("balance"),
                    form.number("annual_rate"),
                    form.number("monthly_payment"),
                );
                match payoff {
                    Payoff::Months(n) => report
                        .line("Months to payoff", Figure::Months(n))
                        .line("Years to payoff", Figure::Number(n as f64 / 12.0)),
                    Payoff::Never => report.line(
                        "Months to payoff",
                        Figure::Text("never: payment does not cover monthly interest".into()),
                    ),
                }
            }
            Calculator::MortgagePayment => {
                let p = mortgage::estimate_mortgage_payment(&MortgageInputs {
                    home_price: form.number("home_price"),
                    down_payment: form.number("down_payment"),
                    annual_rate_pct: form.number("annual_rate"),
                    term_years: form.number("term_years"),
                    property_tax_rate_pct: form.number("property_tax_rate"),
                    annual_insurance: form.number("annual_insurance"),
                    monthly_hoa: form.number("monthly_hoa"),
                    pmi_rate_pct: form.number("pmi_rate"),
                });
                report
                    .line("Loan amount", Figure::Money(p.loan_amount))
                    .line("Principal & interest", Figure::Money(p.principal_and_interest))
                    .line("Property tax", Figure::Money(p.property_tax))
                    .line("Insurance", Figure::Money(p.insurance))
                    .line("PMI", Figure::Money(p.pmi))
                    .line("HOA", Figure::Money(p.hoa))
                    .line("Total monthly payment", Figure::Money(p.total_monthly))
            }
            Calculator::MortgageAffordability => {
                let a = mortgage::affordability(&AffordabilityInputs {
                    annual_income: form.number("annual_income"),
                    monthly_debts: form.number("monthly_debts"),
                    down_payment: form.number("down_payment"),
                    annual_rate_pct: form.number("annual_rate"),
                    term_years: form.number("term_years"),
                    front_end_ratio_pct: form.number("front_end_ratio"),
                    back_end_ratio_pct: form.number("back_end_ratio"),
                    property_tax_rate_pct: form.number("property_tax_rate"),
                    annual_insurance: form.number("annual_insurance"),
                });
                report
                    .line("Max monthly housing payment", Figure::Money(a.max_monthly_payment))
                    .line("Max loan amount", Figure::Money(a.max_loan_amount))
                    .line("Max home price", Figure::Money(a.max_home_price))
            }
            Calculator::DebtSnowball | Calculator::DebtAvalanche => {
                let debts = parse_debts(&form.text("debts")).map_err(|e| form.invalid("debts", e))?;
                let strategy = if self == Calculator::DebtSnowball {
                    PayoffStrategy::Snowball
                } else {
                    PayoffStrategy::Avalanche
                };
                let plan = debt::simulate_payoff(&debts, form.number("extra_payment"), strategy);
                payoff_report(report, &plan)
            }
            Calculator::DebtToIncome => report.line(
                "Debt-to-income",
                Figure::PercentRatio(debt::debt_to_income(
                    form.number("monthly_debt"),
                    form.number("gross_monthly_income"),
                )),
            ),
            Calculator::Dscr => report.line(
                "DSCR",
                Figure::Ratio(business_ratios::dscr(
                    form.number("net_operating_income"),
                    form.number("total_debt_service"),
                )),
            ),
            Calculator::CurrentRatio => report.line(
                "Current ratio",
                Figure::Ratio(business_ratios::current_ratio(
                    form.number("current_assets"),
                    form.number("current_liabilities"),
                )),
            ),
            Calculator::QuickRatio => report.line(
                "Quick ratio",
                Figure::Ratio(business_ratios::quick_ratio(&QuickRatioInputs {
                    cash: form.number("cash"),
                    marketable_securities: form.number("marketable_securities"),
                    accounts_receivable: form.number("accounts_receivable"),
                    current_liabilities: form.number("current_liabilities"),
                })),
            ),
            Calculator::ReturnOnAssets => report.line(
                "Return on assets",
                Figure::PercentRatio(business_ratios::return_on_assets(
                    form.number("net_income"),
                    form.number("total_assets"),
                )),
            ),
            Calculator::ReturnOnEquity => report.line(
                "Return on equity",
                Figure::PercentRatio(business_ratios::return_on_equity(
                    form.number("net_income"),
                    form.number("shareholder_equity"),
                )),
            ),
            Calculator::ReturnOnInvestment => {
                let roi = business_ratios::return_on_investment(
                    form.number("amount_invested"),
                    form.number("amount_returned"),
                    form.number("years"),
                );
                let report = report
                    .line("Net gain", Figure::Money(roi.net_gain))
                    .line("ROI", Figure::PercentRatio(roi.roi_pct));
                match roi.annualized_pct {
                    Some(annual) => report.line("Annualized ROI", Figure::PercentRatio(annual)),
                    None => report,
                }
            }
            Calculator::InventoryTurnover => {
                let t = business_ratios::inventory_turnover(&InventoryTurnoverInputs {
                    cost_of_goods_sold: form.number("cost_of_goods_sold"),
                    beginning_inventory: form.number("beginning_inventory"),
                    ending_inventory: form.number("ending_inventory"),
                });
                report
                    .line("Average inventory", Figure::Money(t.average_inventory))
                    .line("Inventory turnover", Figure::Ratio(t.turnover))
                    .line("Days in inventory", Figure::Ratio(t.days_in_inventory))
            }
            Calculator::ReceivablesTurnover => {
                let t = business_ratios::receivables_turnover(
                    form.number("net_credit_sales"),
                    form.number("average_receivables"),
                );
                report
                    .line("Receivables turnover", Figure::Ratio(t.turnover))
                    .line("Days sales outstanding", Figure::Ratio(t.days_sales_outstanding))
            }
            Calculator::AssetTurnover => report.line(
                "Asset turnover",
                Figure::Ratio(business_ratios::asset_turnover(
                    form.number("revenue"),
                    form.number("average_total_assets"),
                )),
            ),
            Calculator::DebtToEquity => report.line(
                "Debt-to-equity",
                Figure::Ratio(business_ratios::debt_to_equity(
                    form.number("total_liabilities"),
                    form.number("shareholder_equity"),
                )),
            ),
            Calculator::WorkingCapital => report.line(
                "Working capital",
                Figure::Money(business_ratios::working_capital(
                    form.number("current_assets"),
                    form.number("current_liabilities"),
                )),
            ),
            Calculator::BreakEven => {
                let result = profitability::break_even(&BreakEvenInputs {
                    fixed_costs: form.number("fixed_costs"),
                    price_per_unit: form.number("price_per_unit"),
                    variable_cost_per_unit: form.number("variable_cost_per_unit"),
                });
                match result {
                    BreakEven::Units {
                        units,
                        units_rounded_up,
                        revenue,
                        contribution_margin,
                    } => report
                        .line("Contribution margin per unit", Figure::Money(contribution_margin))
                        .line("Break-even units", Figure::Number(units))
                        .line("Units to sell", Figure::Count(units_rounded_up))
                        .line("Break-even revenue", Figure::Money(revenue)),
                    BreakEven::NoBreakEven => report.line(
                        "Break-even units",
                        Figure::Text(
                            "no break-even: price does not exceed variable cost per unit".into(),
                        ),
                    ),
                }
            }
            Calculator::ProfitMargin => {
                let m = profitability::profit_margins(&ProfitInputs {
                    revenue: form.number("revenue"),
                    cost_of_goods_sold: form.number("cost_of_goods_sold"),
                    operating_expenses: form.number("operating_expenses"),
                    interest_and_taxes: form.number("interest_and_taxes"),
                });
                report
                    .line("Gross profit", Figure::Money(m.gross_profit))
                    .line("Gross margin", Figure::PercentRatio(m.gross_margin_pct))
                    .line("Operating profit", Figure::Money(m.operating_profit))
                    .line("Operating margin", Figure::PercentRatio(m.operating_margin_pct))
                    .line("Net profit", Figure::Money(m.net_profit))
                    .line("Net margin", Figure::PercentRatio(m.net_margin_pct))
            }
            Calculator::Markup => {
                let cost = form.number("cost");
                let target = form.number("target_markup");
                let m = profitability::markup(cost, form.number("price"));
                let report = report
                    .line("Profit per unit", Figure::Money(m.profit_per_unit))
                    .line("Markup", Figure::PercentRatio(m.markup_pct))
                    .line("Margin", Figure::PercentRatio(m.margin_pct));
                if target > 0.0 {
                    report.line(
                        "Price at target markup",
                        Figure::Money(profitability::price_for_markup(cost, target)),
                    )
                } else {
                    report
                }
            }
            Calculator::ContributionMargin => {
                let c = profitability::contribution_margin(
                    form.number("price_per_unit"),
                    form.number("variable_cost_per_unit"),
                );
                report
                    .line("Contribution margin per unit", Figure::Money(c.per_unit))
                    .line("Contribution margin ratio", Figure::PercentRatio(c.ratio_pct))
            }
            Calculator::PayrollTax => {
                let p = payroll::estimate_payroll(&PayrollInputs {
                    gross_pay: form.number("gross_pay"),
                    year_to_date_wages: form.number("year_to_date_wages"),
                    federal_withholding_pct: form.number("federal_withholding"),
                    state_withholding_pct: form.number("state_withholding"),
                });
                report
                    .line("Gross pay", Figure::Money(p.gross_pay))
                    .line("Social security", Figure::Money(p.social_security))
                    .line("Medicare", Figure::Money(p.medicare))
                    .line("Additional Medicare", Figure::Money(p.additional_medicare))
                    .line("Federal withholding", Figure::Money(p.federal_withholding))
                    .line("State withholding", Figure::Money(p.state_withholding))
                    .line("Total employee taxes", Figure::Money(p.total_employee_taxes))
                    .line("Net pay", Figure::Money(p.net_pay))
                    .line("Employer taxes", Figure::Money(p.total_employer_taxes))
            }
            Calculator::CashFlowForecast => {
                let f = cash_flow::forecast(&CashFlowInputs {
                    opening_balance: form.number("opening_balance"),
                    months: whole_count(form.number("months"), 0),
                    items: vec![
                        CashFlowItem::inflow(
                            "income",
                            form.number("monthly_income"),
                            form.number("income_days"),
                        ),
                        CashFlowItem::outflow(
                            "expenses",
                            form.number("monthly_expenses"),
                            form.number("expense_days"),
                        ),
                    ],
                });
                let report = report
                    .line("Monthly inflows", Figure::Money(f.monthly_inflows))
                    .line("Monthly outflows", Figure::Money(f.monthly_outflows))
                    .line("Net monthly cash flow", Figure::Money(f.net_monthly))
                    .line("Closing balance", Figure::Money(f.closing_balance));
                match f.first_negative_month {
                    Some(m) => report.line("Balance turns negative in", Figure::Months(m)),
                    None => report,
                }
            }
            Calculator::CompoundGrowth => {
                let g = growth::compound_growth(&GrowthInputs {
                    principal: form.number("principal"),
                    monthly_contribution: form.number("monthly_contribution"),
                    annual_rate_pct: form.number("annual_rate"),
                    years: form.number("years"),
                });
                let report = report
                    .line("Future value", Figure::Money(g.future_value))
                    .line("Total contributions", Figure::Money(g.total_contributions))
                    .line("Total growth", Figure::Money(g.total_growth));
                g.yearly.iter().fold(report, |report, y| {
                    report.line(&format!("Year {} balance", y.year), Figure::Money(y.balance))
                })
            }
            Calculator::RetirementProjection => {
                let r = growth::retirement_projection(&RetirementInputs {
                    current_age: form.number("current_age"),
                    retirement_age: form.number("retirement_age"),
                    current_savings: form.number("current_savings"),
                    monthly_contribution: form.number("monthly_contribution"),
                    annual_return_pct: form.number("annual_return"),
                    inflation_pct: form.number("inflation"),
                    withdrawal_rate_pct: form.number("withdrawal_rate"),
                });
                report
                    .line("Years to retirement", Figure::Years(r.years_to_retirement))
                    .line("Balance at retirement", Figure::Money(r.nominal_balance))
                    .line("In today's money", Figure::Money(r.real_balance))
                    .line("Annual income", Figure::Money(r.annual_income_nominal))
                    .line("Annual income (today's money)", Figure::Money(r.annual_income_real))
            }
            Calculator::FireNumber => report.line(
                "FIRE number",
                Figure::MoneyRatio(growth::fire_number(
                    form.number("annual_expenses"),
                    form.number("withdrawal_rate"),
                )),
            ),
            Calculator::YearsToFire => {
                let f = growth::years_to_fire(&FireInputs {
                    current_savings: form.number("current_savings"),
                    annual_savings: form.number("annual_savings"),
                    annual_expenses: form.number("annual_expenses"),
                    annual_return_pct: form.number("annual_return"),
                    withdrawal_rate_pct: form.number("withdrawal_rate"),
                });
                let report = report.line("FIRE number", Figure::MoneyRatio(f.fire_number));
                match (f.years, f.balance_at_fire) {
                    (Some(years), Some(balance)) => report
                        .line("Years to FIRE", Figure::Years(years))
                        .line("Balance at FIRE", Figure::Money(balance)),
                    _ => report.line(
                        "Years to FIRE",
                        Figure::Text(format!(
                            "not reached within {} years",
                            growth::MAX_PROJECTION_YEARS
                        )),
                    ),
                }
            }
            Calculator::SavingsGoal => {
                let g = growth::savings_goal(&SavingsGoalInputs {
                    target_amount: form.number("target_amount"),
                    current_savings: form.number("current_savings"),
                    annual_rate_pct: form.number("annual_rate"),
                    months: form.number("months"),
                });
                report
                    .line("Required monthly contribution", Figure::Money(g.required_monthly))
                    .line("Months", Figure::Months(g.months))
                    .line("Interest on current savings", Figure::Money(g.growth_of_current))
            }
            Calculator::EmergencyFund => {
                let e = growth::emergency_fund(
                    form.number("monthly_expenses"),
                    form.number("months_of_coverage"),
                    form.number("current_savings"),
                );
                report
                    .line("Target fund", Figure::Money(e.target))
                    .line("Shortfall", Figure::Money(e.shortfall))
                    .line("Months currently covered", Figure::Ratio(e.months_covered))
            }
        };

        Ok(report)
    }
}

fn loan_terms(form: &FormInputs<'_>) -> LoanTerms {
    LoanTerms::new(
        form.number("principal"),
        form.number("annual_rate"),
        form.number("term_months"),
    )
}

fn payoff_report(report: CalculationReport, plan: &PayoffPlan) -> CalculationReport {
    let mut report = if plan.completed {
        report.line("Months to debt-free", Figure::Months(plan.months))
    } else {
        report.line(
            "Months to debt-free",
            Figure::Text(format!(
                "not paid off within {} months: payments too small",
                debt::MAX_PAYOFF_MONTHS
            )),
        )
    };
    report = report
        .line("Total interest", Figure::Money(plan.total_interest))
        .line("Total paid", Figure::Money(plan.total_paid));
    for cleared in &plan.payoff_order {
        report = report.line(&format!("{} paid off", cleared.name), Figure::Months(cleared.month));
    }
    report
}

impl fmt::Display for Calculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Calculator {
    type Err = FincalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Calculator::from_name(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;
    use crate::domain::formula::ratio::RatioOutcome;
    use std::collections::HashSet;

    fn eval(calculator: Calculator, ini: &str) -> CalculationReport {
        let config = FileConfigAdapter::from_string(ini).unwrap();
        calculator.evaluate(&config).unwrap()
    }

    #[test]
    fn names_are_unique_and_resolvable() {
        let mut seen = HashSet::new();
        for calc in Calculator::ALL {
            assert!(seen.insert(calc.name()), "duplicate name {}", calc.name());
            assert_eq!(Calculator::from_name(calc.name()).unwrap(), calc);
            assert!(!calc.fields().is_empty());
        }
    }

    #[test]
    fn lookup_accepts_dashes_and_case() {
        assert_eq!("Break-Even".parse::<Calculator>().unwrap(), Calculator::BreakEven);
        assert!(matches!(
            Calculator::from_name("lottery"),
            Err(FincalcError::UnknownCalculator { .. })
        ));
    }

    #[test]
    fn every_calculator_evaluates_with_defaults() {
        let config = FileConfigAdapter::from_string("").unwrap();
        for calc in Calculator::ALL {
            let report = calc.evaluate(&config).unwrap();
            assert_eq!(report.calculator, calc.name());
            assert!(!report.lines.is_empty());
        }
    }

    #[test]
    fn loan_payment_from_form() {
        let report = eval(
            Calculator::LoanPayment,
            "[loan_payment]\nprincipal = 12000\nannual_rate = 0\nterm_months = 24\n",
        );
        assert_eq!(report.get("Monthly payment"), Some(&Figure::Money(500.0)));
    }

    #[test]
    fn amortization_attaches_schedule() {
        let report = eval(
            Calculator::Amortization,
            "[amortization]\nprincipal = 10000\nannual_rate = 5\nterm_months = 12\n",
        );
        let schedule = report.schedule.unwrap();
        assert_eq!(schedule.rows.len(), 12);
        assert_eq!(schedule.rows[11].balance, 0.0);
    }

    #[test]
    fn break_even_sentinel_is_rendered() {
        let report = eval(
            Calculator::BreakEven,
            "[break_even]\nfixed_costs = 1000\nprice_per_unit = 5\nvariable_cost_per_unit = 8\n",
        );
        match report.get("Break-even units") {
            Some(Figure::Text(t)) => assert!(t.starts_with("no break-even")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn markup_prices_a_target() {
        let report = eval(
            Calculator::Markup,
            "[markup]\ncost = 80\nprice = 90\ntarget_markup = 25\n",
        );
        match report.get("Price at target markup") {
            Some(Figure::Money(p)) => assert!((p - 100.0).abs() < 1e-9),
            other => panic!("unexpected {:?}", other),
        }

        let report = eval(Calculator::Markup, "[markup]\ncost = 80\nprice = 90\n");
        assert_eq!(report.get("Price at target markup"), None);
    }

    #[test]
    fn compound_growth_lists_each_year() {
        let report = eval(
            Calculator::CompoundGrowth,
            "[compound_growth]\nprincipal = 1000\nannual_rate = 0\nyears = 3\n",
        );
        assert_eq!(report.get("Year 1 balance"), Some(&Figure::Money(1000.0)));
        assert_eq!(report.get("Year 3 balance"), report.get("Future value"));
        assert_eq!(report.get("Year 4 balance"), None);
    }

    #[test]
    fn dscr_division_by_zero() {
        let report = eval(Calculator::Dscr, "[dscr]\nnet_operating_income = 5000\n");
        assert_eq!(report.get("DSCR"), Some(&Figure::Ratio(RatioOutcome::Infinite)));
    }

    #[test]
    fn snowball_reads_debt_list() {
        let report = eval(
            Calculator::DebtSnowball,
            "[debt_snowball]\ndebts = Store:600:24:30; Visa:2500:19.99:75\nextra_payment = 100\n",
        );
        assert!(matches!(report.get("Months to debt-free"), Some(Figure::Months(_))));
        assert!(report.get("Store paid off").is_some());
        assert!(report.get("Visa paid off").is_some());
    }

    #[test]
    fn malformed_debt_list_is_a_field_error() {
        let config =
            FileConfigAdapter::from_string("[debt_avalanche]\ndebts = Visa:2500\n").unwrap();
        let err = Calculator::DebtAvalanche.evaluate(&config).unwrap_err();
        assert!(matches!(err, FincalcError::FieldInvalid { ref field, .. } if field == "debts"));
    }

    #[test]
    fn negative_inputs_are_clamped() {
        let report = eval(
            Calculator::EmergencyFund,
            "[emergency_fund]\nmonthly_expenses = -100\nmonths_of_coverage = 6\n",
        );
        assert_eq!(report.get("Target fund"), Some(&Figure::Money(0.0)));
        assert_eq!(
            report.get("Months currently covered"),
            Some(&Figure::Ratio(RatioOutcome::Undefined))
        );
    }
}

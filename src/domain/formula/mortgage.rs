//! Mortgage payment estimate (PITI) and affordability.

use super::loan::{monthly_payment, payment_factor, LoanTerms, MAX_TERM_MONTHS};
use super::sanitize::{monthly_rate, non_negative, pct_to_rate, whole_count};

/// Down payment share below which PMI is charged.
pub const PMI_THRESHOLD: f64 = 0.20;

#[derive(Debug, Clone, PartialEq)]
pub struct MortgageInputs {
    pub home_price: f64,
    pub down_payment: f64,
    pub annual_rate_pct: f64,
    pub term_years: f64,
    /// Annual property tax as a percentage of the home price.
    pub property_tax_rate_pct: f64,
    pub annual_insurance: f64,
    pub monthly_hoa: f64,
    /// Annual PMI as a percentage of the loan amount.
    pub pmi_rate_pct: f64,
}

impl Default for MortgageInputs {
    fn default() -> Self {
        MortgageInputs {
            home_price: 0.0,
            down_payment: 0.0,
            annual_rate_pct: 0.0,
            term_years: 30.0,
            property_tax_rate_pct: 0.0,
            annual_insurance: 0.0,
            monthly_hoa: 0.0,
            pmi_rate_pct: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MortgagePayment {
    pub loan_amount: f64,
    pub principal_and_interest: f64,
    pub property_tax: f64,
    pub insurance: f64,
    pub pmi: f64,
    pub hoa: f64,
    pub total_monthly: f64,
}

fn term_months(term_years: f64) -> u32 {
    whole_count(non_negative(term_years) * 12.0, 1).min(MAX_TERM_MONTHS)
}

pub fn estimate_mortgage_payment(inputs: &MortgageInputs) -> MortgagePayment {
    let price = non_negative(inputs.home_price);
    let down = non_negative(inputs.down_payment).min(price);
    let loan_amount = price - down;

    let terms = LoanTerms {
        principal: loan_amount,
        annual_rate_pct: non_negative(inputs.annual_rate_pct),
        term_months: term_months(inputs.term_years),
    };
    let principal_and_interest = monthly_payment(&terms);

    let property_tax = price * pct_to_rate(inputs.property_tax_rate_pct) / 12.0;
    let insurance = non_negative(inputs.annual_insurance) / 12.0;
    let hoa = non_negative(inputs.monthly_hoa);
    let pmi = if price > 0.0 && down / price < PMI_THRESHOLD {
        loan_amount * pct_to_rate(inputs.pmi_rate_pct) / 12.0
    } else {
        0.0
    };

    MortgagePayment {
        loan_amount,
        principal_and_interest,
        property_tax,
        insurance,
        pmi,
        hoa,
        total_monthly: principal_and_interest + property_tax + insurance + pmi + hoa,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AffordabilityInputs {
    pub annual_income: f64,
    pub monthly_debts: f64,
    pub down_payment: f64,
    pub annual_rate_pct: f64,
    pub term_years: f64,
    /// Housing cost cap as a share of gross monthly income.
    pub front_end_ratio_pct: f64,
    /// Housing plus other debts cap as a share of gross monthly income.
    pub back_end_ratio_pct: f64,
    pub property_tax_rate_pct: f64,
    pub annual_insurance: f64,
}

impl Default for AffordabilityInputs {
    fn default() -> Self {
        AffordabilityInputs {
            annual_income: 0.0,
            monthly_debts: 0.0,
            down_payment: 0.0,
            annual_rate_pct: 0.0,
            term_years: 30.0,
            front_end_ratio_pct: 28.0,
            back_end_ratio_pct: 36.0,
            property_tax_rate_pct: 0.0,
            annual_insurance: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Affordability {
    pub max_monthly_payment: f64,
    pub max_loan_amount: f64,
    pub max_home_price: f64,
}

/// Largest loan whose full monthly housing cost fits the income ratios.
///
/// The housing budget covers principal and interest, property tax on the whole
/// price and insurance, so the loan is solved from
/// `budget = loan·factor + (loan + down)·tax/12 + insurance/12`.
pub fn affordability(inputs: &AffordabilityInputs) -> Affordability {
    let monthly_income = non_negative(inputs.annual_income) / 12.0;
    let front = monthly_income * pct_to_rate(inputs.front_end_ratio_pct);
    let back = monthly_income * pct_to_rate(inputs.back_end_ratio_pct)
        - non_negative(inputs.monthly_debts);
    let max_monthly_payment = non_negative(front.min(back));

    let down = non_negative(inputs.down_payment);
    let factor = payment_factor(
        monthly_rate(inputs.annual_rate_pct),
        term_months(inputs.term_years),
    );
    let monthly_tax_rate = pct_to_rate(inputs.property_tax_rate_pct) / 12.0;
    let insurance = non_negative(inputs.annual_insurance) / 12.0;

    let available = max_monthly_payment - insurance - down * monthly_tax_rate;
    let max_loan_amount = non_negative(available / (factor + monthly_tax_rate));

    Affordability {
        max_monthly_payment,
        max_loan_amount,
        max_home_price: max_loan_amount + down,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_mortgage() -> MortgageInputs {
        MortgageInputs {
            home_price: 400_000.0,
            down_payment: 80_000.0,
            annual_rate_pct: 6.0,
            term_years: 30.0,
            property_tax_rate_pct: 1.2,
            annual_insurance: 1_200.0,
            monthly_hoa: 50.0,
            pmi_rate_pct: 0.5,
        }
    }

    #[test]
    fn piti_components() {
        let payment = estimate_mortgage_payment(&sample_mortgage());
        assert!((payment.loan_amount - 320_000.0).abs() < f64::EPSILON);
        assert!((payment.principal_and_interest - 1918.56).abs() < 0.01);
        assert!((payment.property_tax - 400.0).abs() < 1e-9);
        assert!((payment.insurance - 100.0).abs() < 1e-9);
        assert_eq!(payment.pmi, 0.0);
        assert!((payment.hoa - 50.0).abs() < f64::EPSILON);
        let sum = payment.principal_and_interest + 400.0 + 100.0 + 50.0;
        assert!((payment.total_monthly - sum).abs() < 1e-9);
    }

    #[test]
    fn pmi_applies_below_twenty_percent_down() {
        let inputs = MortgageInputs {
            down_payment: 20_000.0,
            ..sample_mortgage()
        };
        let payment = estimate_mortgage_payment(&inputs);
        assert!((payment.pmi - 380_000.0 * 0.005 / 12.0).abs() < 1e-9);
    }

    #[test]
    fn down_payment_above_price_is_capped() {
        let inputs = MortgageInputs {
            down_payment: 500_000.0,
            ..sample_mortgage()
        };
        let payment = estimate_mortgage_payment(&inputs);
        assert_eq!(payment.loan_amount, 0.0);
        assert_eq!(payment.principal_and_interest, 0.0);
    }

    #[test]
    fn affordability_uses_tighter_ratio() {
        let inputs = AffordabilityInputs {
            annual_income: 120_000.0,
            monthly_debts: 1_000.0,
            annual_rate_pct: 0.0,
            term_years: 30.0,
            ..AffordabilityInputs::default()
        };
        let result = affordability(&inputs);
        // front: 10_000 * 0.28 = 2_800; back: 10_000 * 0.36 - 1_000 = 2_600
        assert!((result.max_monthly_payment - 2_600.0).abs() < 1e-9);
        assert!((result.max_loan_amount - 2_600.0 * 360.0).abs() < 1e-6);
    }

    #[test]
    fn affordability_round_trips_through_payment_estimate() {
        let inputs = AffordabilityInputs {
            annual_income: 150_000.0,
            monthly_debts: 500.0,
            down_payment: 60_000.0,
            annual_rate_pct: 6.5,
            term_years: 30.0,
            property_tax_rate_pct: 1.0,
            annual_insurance: 1_500.0,
            ..AffordabilityInputs::default()
        };
        let result = affordability(&inputs);
        let estimate = estimate_mortgage_payment(&MortgageInputs {
            home_price: result.max_home_price,
            down_payment: 60_000.0,
            annual_rate_pct: 6.5,
            term_years: 30.0,
            property_tax_rate_pct: 1.0,
            annual_insurance: 1_500.0,
            monthly_hoa: 0.0,
            pmi_rate_pct: 0.0,
        });
        assert!((estimate.total_monthly - result.max_monthly_payment).abs() < 1e-6);
    }

    #[test]
    fn debts_exceeding_budget_afford_nothing() {
        let inputs = AffordabilityInputs {
            annual_income: 36_000.0,
            monthly_debts: 2_000.0,
            annual_rate_pct: 5.0,
            ..AffordabilityInputs::default()
        };
        let result = affordability(&inputs);
        assert_eq!(result.max_monthly_payment, 0.0);
        assert_eq!(result.max_loan_amount, 0.0);
    }
}

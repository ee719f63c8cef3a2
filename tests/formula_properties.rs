//! Property tests for the formula library.

use approx::assert_relative_eq;
use fincalc::domain::formula::debt::{debt_avalanche, debt_snowball, Debt, MAX_PAYOFF_MONTHS};
use fincalc::domain::formula::loan::{amortization_schedule, monthly_payment, LoanTerms};
use fincalc::domain::formula::profitability::{break_even, BreakEven, BreakEvenInputs};
use fincalc::domain::formula::ratio::{safe_percent, safe_ratio, RatioOutcome};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn amortization_clears_the_principal(
        principal in 1_000.0f64..1_000_000.0,
        rate in 0.0f64..25.0,
        months in 1u32..=480,
    ) {
        let terms = LoanTerms::new(principal, rate, months as f64);
        let schedule = amortization_schedule(&terms);

        let last = schedule.rows.last().unwrap();
        prop_assert_eq!(last.balance, 0.0);
        let repaid: f64 = schedule.rows.iter().map(|r| r.principal).sum();
        assert_relative_eq!(repaid, principal, max_relative = 1e-9);
        assert_relative_eq!(
            schedule.total_paid,
            principal + schedule.total_interest,
            max_relative = 1e-9
        );
    }

    #[test]
    fn zero_rate_payment_is_exact_division(
        principal in 0.0f64..1_000_000.0,
        months in 1u32..=1200,
    ) {
        let terms = LoanTerms::new(principal, 0.0, months as f64);
        prop_assert_eq!(monthly_payment(&terms), principal / months as f64);
    }

    #[test]
    fn no_break_even_when_price_does_not_cover_variable_cost(
        fixed in 0.0f64..1e7,
        price in 0.0f64..1_000.0,
        surcharge in 0.0f64..1_000.0,
    ) {
        let result = break_even(&BreakEvenInputs {
            fixed_costs: fixed,
            price_per_unit: price,
            variable_cost_per_unit: price + surcharge,
        });
        prop_assert_eq!(result, BreakEven::NoBreakEven);
    }

    #[test]
    fn payoff_terminates_when_minimums_cover_interest(
        accounts in prop::collection::vec((100.0f64..20_000.0, 0.0f64..30.0), 1..6),
    ) {
        let debts: Vec<Debt> = accounts
            .iter()
            .enumerate()
            .map(|(i, &(balance, rate))| {
                // interest plus 2% of the balance each month
                let minimum = balance * rate / 1200.0 + balance * 0.02 + 1.0;
                Debt::new(format!("debt{i}"), balance, rate, minimum)
            })
            .collect();

        for plan in [debt_snowball(&debts, 0.0), debt_avalanche(&debts, 0.0)] {
            prop_assert!(plan.completed);
            prop_assert!(plan.months < MAX_PAYOFF_MONTHS);
            prop_assert_eq!(plan.payoff_order.len(), debts.len());
        }
    }

    #[test]
    fn safe_ratio_values_are_finite(numerator in any::<f64>(), denominator in any::<f64>()) {
        match safe_ratio(numerator, denominator) {
            RatioOutcome::Value(v) => prop_assert!(v.is_finite()),
            RatioOutcome::Infinite | RatioOutcome::Undefined => {}
        }
        match safe_percent(numerator, denominator) {
            RatioOutcome::Value(v) => prop_assert!(v.is_finite()),
            RatioOutcome::Infinite | RatioOutcome::Undefined => {}
        }
    }
}

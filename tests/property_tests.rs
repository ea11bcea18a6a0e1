/// Property-based tests using proptest
/// Invariants that should hold across the validated input domain
use proptest::prelude::*;
use rust_decimal::Decimal;
use vehicle_financing_rs::{
    compute_lease_payment, compute_loan_payment, CalculationType, FinancingCalculator,
    FinancingRequest, Money, Rate,
};

fn money(cents: i64) -> Money {
    Money::from_cents(cents)
}

// Property: zero APR splits the principal evenly with no interest
proptest! {
    #[test]
    fn zero_apr_has_no_interest(cents in 1i64..10_000_000, term in 1u32..=84) {
        let principal = money(cents);
        let quote = compute_loan_payment(principal, Rate::ZERO, term).unwrap();

        prop_assert_eq!(quote.monthly_payment, (principal / Decimal::from(term)).round_cents());
        prop_assert_eq!(quote.total_interest, Money::ZERO);
        prop_assert_eq!(quote.total_payments, principal);
    }

    #[test]
    fn loan_totals_follow_rounded_payment(
        cents in 100_000i64..10_000_000,
        apr_tenths in 1u32..=500,
        term in 12u32..=84
    ) {
        let principal = money(cents);
        let apr = Rate::from_percent(Decimal::new(apr_tenths as i64, 1));
        let quote = compute_loan_payment(principal, apr, term).unwrap();

        prop_assert_eq!(
            quote.total_payments,
            (quote.monthly_payment * Decimal::from(term)).round_cents()
        );
        prop_assert_eq!(quote.total_interest, quote.total_payments - principal);
        prop_assert!(quote.total_interest >= Money::ZERO);
    }

    #[test]
    fn any_valid_apr_quotes_without_error(
        cents in 1i64..10_000_000,
        mantissa in 0i64..i64::MAX,
        scale in 0u32..=28,
        term in 12u32..=84
    ) {
        // every representable APR in [0, 50), from whole percents down to 1e-28
        let apr_percent = Decimal::new(mantissa, scale) % Decimal::from(50);
        let principal = money(cents);
        let quote = compute_loan_payment(principal, Rate::from_percent(apr_percent), term).unwrap();

        let even_split = (principal / Decimal::from(term)).round_cents();
        prop_assert!(quote.monthly_payment >= even_split - money(1));
        prop_assert_eq!(quote.total_interest, quote.total_payments - principal);
    }

    #[test]
    fn residual_value_is_exact_percentage(
        price_cents in 1i64..20_000_000,
        residual in 20u32..=80
    ) {
        let price = money(price_cents);
        let residual_percent = Decimal::from(residual);
        let quote = compute_lease_payment(
            price,
            residual_percent,
            Decimal::new(15, 4),
            36,
            Money::ZERO,
        )
        .unwrap();

        prop_assert_eq!(
            quote.residual_value,
            Money::from_decimal(price.as_decimal() * residual_percent / Decimal::ONE_HUNDRED)
                .round_cents()
        );
    }

    #[test]
    fn higher_apr_costs_more(cents in 500_000i64..10_000_000, term in 12u32..=84) {
        let principal = money(cents);
        let payments: Vec<Money> = ["2.9", "3.9", "4.9", "5.9", "6.9", "7.9"]
            .iter()
            .map(|apr| {
                let apr = Rate::from_percent(apr.parse::<Decimal>().unwrap());
                compute_loan_payment(principal, apr, term).unwrap().monthly_payment
            })
            .collect();

        prop_assert!(payments.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn comparison_picks_first_minimum(
        price in 5_000i64..150_000,
        down in 0i64..5_000
    ) {
        let request = FinancingRequest {
            vehicle_price: Decimal::from(price),
            down_payment: Some(Decimal::from(down)),
            calculation_type: CalculationType::Both,
            ..Default::default()
        };
        let result = FinancingCalculator::new().compute(&request).unwrap();
        let comparison = result.comparison.clone().unwrap();

        let first_min_loan = result
            .loan_options
            .iter()
            .min_by_key(|o| o.monthly_payment)
            .unwrap();
        let first_min_lease = result
            .lease_options
            .iter()
            .min_by_key(|o| o.monthly_payment)
            .unwrap();

        prop_assert_eq!(&comparison.best_loan, first_min_loan);
        prop_assert_eq!(&comparison.best_lease, first_min_lease);
        prop_assert_eq!(result, FinancingCalculator::new().compute(&request).unwrap());
    }
}

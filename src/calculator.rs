use crate::config::FinancingTerms;
use crate::decimal::{Money, Rate};
use crate::errors::{OrOverflow, Result};
use crate::payments::{compute_lease_payment, compute_loan_payment};
use crate::request::FinancingRequest;
use crate::result::{
    Comparison, FinancingResult, FinancingSummary, PaymentBreakdown, TaxesAndFees,
    VehicleDetails,
};
use crate::types::{CalculationType, LeaseOption, LoanOption};

pub const LOAN_RECOMMENDATION: &str =
    "Loan offers the lower monthly payment and builds equity in the vehicle";
pub const LEASE_RECOMMENDATION: &str =
    "Lease offers the lower monthly payment; weigh mileage limits and ownership goals";

/// disclosure notes attached to every quote
pub const PAYMENT_DISCLOSURES: [&str; 4] = [
    "All payments are estimates and subject to credit approval",
    "Tax, title, and registration fees vary by jurisdiction",
    "Lease payments exclude excess mileage and wear-and-tear charges",
    "Lease equivalent APR is approximated as money factor x 2400",
];

/// stateless loan and lease quoting
#[derive(Debug, Clone, Copy, Default)]
pub struct FinancingCalculator;

impl FinancingCalculator {
    pub fn new() -> Self {
        Self
    }

    /// validate a request and compute the full quote
    pub fn compute(&self, request: &FinancingRequest) -> Result<FinancingResult> {
        request.validate()?;
        let terms = FinancingTerms::resolve(request);

        let sales_tax_amount = terms
            .vehicle_price
            .checked_percentage(terms.sales_tax_rate)
            .or_overflow("sales tax")?
            .round_cents();
        let total_fees = terms.fees.total().or_overflow("fees")?.round_cents();
        let total_taxes_fees = sales_tax_amount
            .checked_add(total_fees)
            .or_overflow("taxes and fees")?
            .round_cents();
        let total_additional_costs = terms
            .products
            .total()
            .or_overflow("additional products")?
            .round_cents();

        let gross_amount =
            Money::checked_sum([terms.vehicle_price, total_taxes_fees, total_additional_costs])
                .or_overflow("gross amount")?
                .round_cents();
        let total_down_trade = terms
            .down_payment
            .checked_add(terms.trade_in_value)
            .or_overflow("down payment and trade-in")?
            .round_cents();
        let net_amount_to_finance = gross_amount
            .checked_sub(terms.down_payment)
            .and_then(|net| net.checked_sub(terms.trade_in_value))
            .or_overflow("amount to finance")?
            .round_cents();

        let loan_options = if terms.calculation_type.includes_loan() {
            self.loan_options(&terms, net_amount_to_finance)?
        } else {
            Vec::new()
        };

        let lease_options = if terms.calculation_type.includes_lease() {
            self.lease_options(&terms, total_taxes_fees)?
        } else {
            Vec::new()
        };

        let comparison = match terms.calculation_type {
            CalculationType::Both => compare(&loan_options, &lease_options)?,
            _ => None,
        };

        let first_payment = match terms.calculation_type {
            CalculationType::Lease => lease_options.first().map(|o| o.monthly_payment),
            _ => loan_options.first().map(|o| o.monthly_payment),
        }
        .unwrap_or(Money::ZERO);

        let cash_due_at_signing =
            Money::checked_sum([terms.down_payment, total_fees, terms.products.extended_warranty])
                .or_overflow("cash due at signing")?
                .round_cents();

        let payment_breakdown = PaymentBreakdown {
            cash_due_at_signing,
            first_payment,
            disclosures: PAYMENT_DISCLOSURES.iter().map(|s| s.to_string()).collect(),
        };

        tracing::debug!(
            calculation_type = ?terms.calculation_type,
            %net_amount_to_finance,
            loan_options = loan_options.len(),
            lease_options = lease_options.len(),
            "computed financing quote"
        );

        Ok(FinancingResult {
            vehicle_details: VehicleDetails {
                vehicle_price: terms.vehicle_price,
                down_payment: terms.down_payment,
                trade_in_value: terms.trade_in_value,
                net_trade_position: terms
                    .trade_in_value
                    .checked_sub(terms.down_payment)
                    .or_overflow("net trade position")?
                    .round_cents(),
            },
            taxes_and_fees: TaxesAndFees {
                sales_tax_rate: terms.sales_tax_rate,
                sales_tax_amount,
                fees: terms.fees,
                additional_products: terms.products,
                total_taxes_fees,
                total_additional_costs,
            },
            financing_summary: FinancingSummary {
                gross_amount,
                total_down_trade,
                net_amount_to_finance,
            },
            loan_options,
            lease_options,
            comparison,
            payment_breakdown,
        })
    }

    fn loan_options(&self, terms: &FinancingTerms, principal: Money) -> Result<Vec<LoanOption>> {
        terms
            .loan
            .combinations()
            .map(|(apr, term_months)| -> Result<LoanOption> {
                let quote = compute_loan_payment(principal, Rate::from_percent(apr), term_months)?;
                let total_cost =
                    Money::checked_sum([quote.total_payments, terms.down_payment, terms.trade_in_value])
                        .or_overflow("loan total cost")?
                        .round_cents();
                Ok(LoanOption {
                    apr,
                    term_months,
                    monthly_payment: quote.monthly_payment,
                    total_payments: quote.total_payments,
                    total_interest: quote.total_interest,
                    total_cost,
                })
            })
            .collect()
    }

    fn lease_options(
        &self,
        terms: &FinancingTerms,
        total_taxes_fees: Money,
    ) -> Result<Vec<LeaseOption>> {
        terms
            .lease
            .combinations()
            .map(|(term_months, residual_percent, money_factor)| -> Result<LeaseOption> {
                let quote = compute_lease_payment(
                    terms.vehicle_price,
                    residual_percent,
                    money_factor,
                    term_months,
                    terms.down_payment,
                )?;
                let equivalent_apr = Rate::from_money_factor(money_factor)
                    .as_percentage()
                    .round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero);

                Ok(LeaseOption {
                    term_months,
                    residual_percent,
                    money_factor,
                    equivalent_apr,
                    monthly_payment: quote.monthly_payment,
                    total_payments: quote.total_payments,
                    residual_value: quote.residual_value,
                    depreciation: quote.depreciation,
                    miles_per_year: terms.lease.miles_per_year,
                    total_cost_with_fees: quote
                        .total_payments
                        .checked_add(total_taxes_fees)
                        .or_overflow("lease total cost")?
                        .round_cents(),
                })
            })
            .collect()
    }
}

/// first entry with the lowest monthly payment
fn cheapest<T>(options: &[T], monthly: impl Fn(&T) -> Money) -> Option<&T> {
    options.iter().fold(None, |best, option| match best {
        Some(current) if monthly(current) <= monthly(option) => Some(current),
        _ => Some(option),
    })
}

fn compare(loans: &[LoanOption], leases: &[LeaseOption]) -> Result<Option<Comparison>> {
    let (Some(best_loan), Some(best_lease)) = (
        cheapest(loans, |o| o.monthly_payment),
        cheapest(leases, |o| o.monthly_payment),
    ) else {
        return Ok(None);
    };

    let recommendation = if best_loan.monthly_payment < best_lease.monthly_payment {
        LOAN_RECOMMENDATION
    } else {
        LEASE_RECOMMENDATION
    };

    Ok(Some(Comparison {
        best_loan: best_loan.clone(),
        best_lease: best_lease.clone(),
        monthly_difference: best_loan
            .monthly_payment
            .checked_sub(best_lease.monthly_payment)
            .or_overflow("monthly difference")?
            .round_cents(),
        total_cost_difference: best_loan
            .total_cost
            .checked_sub(best_lease.total_cost_with_fees)
            .or_overflow("total cost difference")?
            .round_cents(),
        recommendation: recommendation.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FinancingError;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn scenario_request() -> FinancingRequest {
        FinancingRequest {
            vehicle_price: dec!(30000),
            down_payment: Some(dec!(3000)),
            trade_in_value: Some(dec!(0)),
            sales_tax_rate: Some(dec!(8.25)),
            loan_apr: Some(dec!(5.9)),
            loan_term_months: Some(dec!(60)),
            calculation_type: CalculationType::Loan,
            ..Default::default()
        }
    }

    #[test]
    fn test_single_loan_scenario() {
        let result = FinancingCalculator::new().compute(&scenario_request()).unwrap();

        assert_eq!(result.taxes_and_fees.sales_tax_amount, Money::from_major(2_475));
        assert_eq!(result.taxes_and_fees.total_taxes_fees, Money::from_major(2_882));
        assert_eq!(result.financing_summary.gross_amount, Money::from_major(32_882));
        assert_eq!(result.financing_summary.total_down_trade, Money::from_major(3_000));
        assert_eq!(result.financing_summary.net_amount_to_finance, Money::from_major(29_882));
        assert_eq!(result.vehicle_details.net_trade_position, Money::from_major(-3_000));

        assert_eq!(result.loan_options.len(), 1);
        assert!(result.lease_options.is_empty());
        assert!(result.comparison.is_none());

        let loan = &result.loan_options[0];
        assert_eq!(loan.apr, dec!(5.9));
        assert_eq!(loan.term_months, 60);
        assert_eq!(loan.monthly_payment, Money::from_cents(57_631));
        assert_eq!(loan.total_cost, loan.total_payments + Money::from_major(3_000));

        // 3,000 down + 407 fees
        assert_eq!(result.payment_breakdown.cash_due_at_signing, Money::from_major(3_407));
        assert_eq!(result.payment_breakdown.first_payment, loan.monthly_payment);
        assert_eq!(result.payment_breakdown.disclosures.len(), PAYMENT_DISCLOSURES.len());
    }

    #[test]
    fn test_both_with_defaults_fills_every_matrix() {
        let request = FinancingRequest::for_price(dec!(35000));
        let result = FinancingCalculator::new().compute(&request).unwrap();

        assert_eq!(result.loan_options.len(), 30);
        assert_eq!(result.lease_options.len(), 48);

        let comparison = result.comparison.expect("comparison present for both");
        let min_loan = result.loan_options.iter().map(|o| o.monthly_payment).min().unwrap();
        let min_lease = result.lease_options.iter().map(|o| o.monthly_payment).min().unwrap();
        assert_eq!(comparison.best_loan.monthly_payment, min_loan);
        assert_eq!(comparison.best_lease.monthly_payment, min_lease);
        assert_eq!(comparison.monthly_difference, min_loan - min_lease);
        assert_eq!(
            comparison.total_cost_difference,
            comparison.best_loan.total_cost - comparison.best_lease.total_cost_with_fees
        );
    }

    #[test]
    fn test_loan_matrix_order_and_monotonic_apr() {
        let request = FinancingRequest {
            vehicle_price: dec!(28000),
            calculation_type: CalculationType::Loan,
            ..Default::default()
        };
        let result = FinancingCalculator::new().compute(&request).unwrap();

        assert_eq!(result.loan_options[0].apr, dec!(2.9));
        assert_eq!(result.loan_options[0].term_months, 36);
        assert_eq!(result.loan_options[4].term_months, 84);
        assert_eq!(result.loan_options[5].apr, dec!(3.9));

        for term_idx in 0..5 {
            let payments: Vec<_> = result
                .loan_options
                .iter()
                .skip(term_idx)
                .step_by(5)
                .map(|o| o.monthly_payment)
                .collect();
            assert!(payments.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_lease_only_uses_lease_first_payment() {
        let request = FinancingRequest {
            vehicle_price: dec!(30000),
            lease_term_months: Some(dec!(36)),
            lease_residual_percent: Some(dec!(60)),
            lease_money_factor: Some(dec!(0.00125)),
            lease_miles_per_year: Some(dec!(10000)),
            calculation_type: CalculationType::Lease,
            ..Default::default()
        };
        let result = FinancingCalculator::new().compute(&request).unwrap();

        assert!(result.loan_options.is_empty());
        let lease = &result.lease_options[0];
        assert_eq!(result.lease_options.len(), 1);
        assert_eq!(lease.equivalent_apr, dec!(3));
        assert_eq!(lease.miles_per_year, 10_000);
        assert_eq!(lease.monthly_payment, Money::from_cents(39_333));
        // 2,475 tax + 407 fees
        assert_eq!(
            lease.total_cost_with_fees,
            lease.total_payments + Money::from_major(2_882)
        );
        assert_eq!(result.payment_breakdown.first_payment, lease.monthly_payment);
    }

    #[test]
    fn test_additional_products_flow_into_totals() {
        let request = FinancingRequest {
            vehicle_price: dec!(20000),
            sales_tax_rate: Some(dec!(0)),
            title_fee: Some(dec!(0)),
            registration_fee: Some(dec!(0)),
            documentation_fee: Some(dec!(0)),
            extended_warranty: Some(dec!(1500)),
            gap_insurance: Some(dec!(600)),
            service_contract: Some(dec!(900)),
            trade_in_value: Some(dec!(5000)),
            calculation_type: CalculationType::Loan,
            loan_apr: Some(dec!(0)),
            loan_term_months: Some(dec!(60)),
            ..Default::default()
        };
        let result = FinancingCalculator::new().compute(&request).unwrap();

        assert_eq!(result.taxes_and_fees.total_additional_costs, Money::from_major(3_000));
        assert_eq!(result.financing_summary.gross_amount, Money::from_major(23_000));
        assert_eq!(result.financing_summary.net_amount_to_finance, Money::from_major(18_000));
        assert_eq!(result.loan_options[0].monthly_payment, Money::from_major(300));
        assert_eq!(result.loan_options[0].total_interest, Money::ZERO);
        assert_eq!(result.loan_options[0].total_cost, Money::from_major(23_000));
        assert_eq!(result.payment_breakdown.cash_due_at_signing, Money::from_major(1_500));
    }

    #[test]
    fn test_invalid_request_not_computed() {
        let err = FinancingCalculator::new()
            .compute(&FinancingRequest::for_price(dec!(-100)))
            .unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("vehiclePrice"));
    }

    #[test]
    fn test_vanishing_apr_quotes_cleanly() {
        let request = FinancingRequest {
            vehicle_price: dec!(30000),
            loan_apr: Some(Decimal::new(4, 26)),
            calculation_type: CalculationType::Loan,
            ..Default::default()
        };
        assert!(request.validate().is_ok());

        let result = FinancingCalculator::new().compute(&request).unwrap();
        assert_eq!(result.loan_options.len(), 5);
        // 32,882 financed over 36 months, no interest
        assert_eq!(result.loan_options[0].monthly_payment, Money::from_cents(91_339));
        assert!(result.loan_options.iter().all(|o| o.total_interest == Money::ZERO));
    }

    #[test]
    fn test_overflowing_price_is_calculation_error() {
        let request = FinancingRequest::for_price(Decimal::from_i128_with_scale(10i128.pow(28), 0));
        assert!(request.validate().is_ok());

        let err = FinancingCalculator::new().compute(&request).unwrap_err();
        assert!(matches!(err, FinancingError::CalculationError { .. }));
        assert!(err.to_string().contains("overflow"));
    }

    #[test]
    fn test_cheapest_keeps_first_on_tie() {
        let options = [(1, 300), (2, 250), (3, 250), (4, 400)];
        let best = cheapest(&options, |o| Money::from_major(o.1)).unwrap();
        assert_eq!(best.0, 2);
        assert!(cheapest(&[] as &[(u8, i64)], |o| Money::from_major(o.1)).is_none());
    }

    #[test]
    fn test_recommendation_favours_lease_on_equal_payment() {
        let loan = LoanOption {
            apr: dec!(0),
            term_months: 36,
            monthly_payment: Money::from_major(400),
            total_payments: Money::from_major(14_400),
            total_interest: Money::ZERO,
            total_cost: Money::from_major(14_400),
        };
        let lease = LeaseOption {
            term_months: 36,
            residual_percent: dec!(50),
            money_factor: dec!(0.001),
            equivalent_apr: dec!(2.4),
            monthly_payment: Money::from_major(400),
            total_payments: Money::from_major(14_400),
            residual_value: Money::from_major(10_000),
            depreciation: Money::from_major(10_000),
            miles_per_year: 12_000,
            total_cost_with_fees: Money::from_major(15_000),
        };

        let comparison = compare(&[loan], &[lease]).unwrap().unwrap();
        assert_eq!(comparison.recommendation, LEASE_RECOMMENDATION);
        assert_eq!(comparison.monthly_difference, Money::ZERO);
        assert_eq!(comparison.total_cost_difference, Money::from_major(-600));
    }

    #[test]
    fn test_compute_is_deterministic() {
        let calculator = FinancingCalculator::new();
        let request = FinancingRequest {
            vehicle_price: dec!(41999.99),
            down_payment: Some(dec!(2500)),
            trade_in_value: Some(dec!(7300.5)),
            ..Default::default()
        };
        assert_eq!(
            calculator.compute(&request).unwrap(),
            calculator.compute(&request).unwrap()
        );
    }
}

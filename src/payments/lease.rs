use rust_decimal::Decimal;

use crate::decimal::Money;
use crate::errors::{FinancingError, OrOverflow, Result};
use crate::types::LeaseQuote;

/// quote a closed-end lease
///
/// monthly = depreciation / term + (price + residual) * money factor.
/// Depreciation is not floored: a residual plus down payment above the price
/// yields a negative depreciation and a reduced payment.
pub fn compute_lease_payment(
    vehicle_price: Money,
    residual_percent: Decimal,
    money_factor: Decimal,
    term_months: u32,
    down_payment: Money,
) -> Result<LeaseQuote> {
    if term_months == 0 {
        return Err(FinancingError::InvalidTerm { term_months });
    }

    let term = Decimal::from(term_months);
    let residual_value = vehicle_price
        .checked_percentage(residual_percent)
        .or_overflow("lease residual value")?;
    let depreciation = vehicle_price
        .checked_sub(residual_value)
        .and_then(|d| d.checked_sub(down_payment))
        .or_overflow("lease depreciation")?;

    let depreciation_payment = depreciation.checked_div(term).or_overflow("lease depreciation")?;
    // rent charge
    let finance_payment = vehicle_price
        .checked_add(residual_value)
        .and_then(|base| base.checked_mul(money_factor))
        .or_overflow("lease rent charge")?;
    let monthly_payment = depreciation_payment
        .checked_add(finance_payment)
        .or_overflow("lease payment")?
        .round_cents();
    let total_payments = monthly_payment
        .checked_mul(term)
        .and_then(|paid| paid.checked_add(down_payment))
        .or_overflow("lease total payments")?
        .round_cents();

    if depreciation.is_negative() {
        tracing::warn!(
            %vehicle_price,
            %residual_value,
            %down_payment,
            "lease depreciation is negative"
        );
    }

    Ok(LeaseQuote {
        monthly_payment,
        total_payments,
        residual_value: residual_value.round_cents(),
        depreciation: depreciation.round_cents(),
    })
}

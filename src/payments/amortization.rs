use chrono::{DateTime, Months, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{FinancingError, OrOverflow, Result};
use crate::types::LoanQuote;

/// quote an amortizing loan
///
/// The monthly payment is rounded to cents first; total payments and total
/// interest are derived from the rounded payment. At 0% APR the principal is
/// split evenly and no interest accrues.
pub fn compute_loan_payment(principal: Money, apr: Rate, term_months: u32) -> Result<LoanQuote> {
    if term_months == 0 {
        return Err(FinancingError::InvalidTerm { term_months });
    }

    let term = Decimal::from(term_months);

    // an APR this small can vanish when divided down to a monthly rate
    if apr.monthly_rate().is_zero() {
        return Ok(LoanQuote {
            monthly_payment: principal.checked_div(term).or_overflow("loan payment")?.round_cents(),
            total_payments: principal.round_cents(),
            total_interest: Money::ZERO,
        });
    }

    let monthly_payment = level_payment(principal, apr, term_months)?.round_cents();
    let total_payments = monthly_payment
        .checked_mul(term)
        .or_overflow("loan total payments")?
        .round_cents();
    let total_interest = total_payments
        .checked_sub(principal)
        .or_overflow("loan total interest")?
        .round_cents();

    Ok(LoanQuote {
        monthly_payment,
        total_payments,
        total_interest,
    })
}

/// unrounded level payment: P * r * (1 + r)^n / ((1 + r)^n - 1)
fn level_payment(principal: Money, apr: Rate, months: u32) -> Result<Money> {
    let r = apr.monthly_rate().as_decimal();

    let mut compound = Decimal::ONE;
    let base = Decimal::ONE + r;
    for _ in 0..months {
        compound = compound
            .checked_mul(base)
            .ok_or_else(|| FinancingError::CalculationError {
                message: format!("compound factor overflow at {apr} over {months} months"),
            })?;
    }

    // r / ((1 + r)^n - 1) first, so tiny rates keep their precision
    let ratio = r
        .checked_div(compound - Decimal::ONE)
        .ok_or_else(|| FinancingError::CalculationError {
            message: format!("degenerate compound factor at {apr} over {months} months"),
        })?;

    principal
        .as_decimal()
        .checked_mul(ratio)
        .and_then(|v| v.checked_mul(compound))
        .map(Money::from_decimal)
        .or_overflow("loan payment")
}

/// scheduled payment in amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledPayment {
    pub payment_number: u32,
    pub payment_date: DateTime<Utc>,
    pub beginning_balance: Money,
    pub payment_amount: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub ending_balance: Money,
    pub cumulative_interest: Money,
    pub cumulative_principal: Money,
}

/// equal-installment amortization schedule for one loan option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationSchedule {
    pub principal: Money,
    /// percent, e.g. 5.9
    pub apr: Decimal,
    pub term_months: u32,
    pub start_date: DateTime<Utc>,
    pub monthly_payment: Money,
    pub payments: Vec<ScheduledPayment>,
    pub total_interest: Money,
    pub total_payments: Money,
}

impl AmortizationSchedule {
    /// generate payment schedule
    pub fn generate(
        principal: Money,
        apr: Rate,
        term_months: u32,
        start_date: DateTime<Utc>,
    ) -> Result<Self> {
        let quote = compute_loan_payment(principal, apr, term_months)?;
        let monthly_rate = apr.monthly_rate().as_decimal();
        let principal = principal.round_cents();

        let mut payments = Vec::with_capacity(term_months as usize);
        let mut balance = principal;
        let mut cumulative_interest = Money::ZERO;
        let mut cumulative_principal = Money::ZERO;

        for i in 1..=term_months {
            let payment_date = add_months(start_date, i)?;
            let interest_portion = (balance * monthly_rate).round_cents();

            // last payment absorbs rounding drift
            let principal_portion = if i == term_months {
                balance
            } else {
                (quote.monthly_payment - interest_portion).min(balance)
            };
            let payment_amount = principal_portion + interest_portion;
            let ending_balance = balance - principal_portion;

            cumulative_interest += interest_portion;
            cumulative_principal += principal_portion;

            payments.push(ScheduledPayment {
                payment_number: i,
                payment_date,
                beginning_balance: balance,
                payment_amount,
                principal_portion,
                interest_portion,
                ending_balance,
                cumulative_interest,
                cumulative_principal,
            });

            balance = ending_balance;
        }

        let total_payments = payments.iter().map(|p| p.payment_amount).sum();

        tracing::debug!(
            %principal,
            %apr,
            term_months,
            monthly_payment = %quote.monthly_payment,
            "generated amortization schedule"
        );

        Ok(Self {
            principal,
            apr: apr.as_percentage().normalize(),
            term_months,
            start_date,
            monthly_payment: quote.monthly_payment,
            payments,
            total_interest: cumulative_interest,
            total_payments,
        })
    }

    /// get payment for specific period
    pub fn get_payment(&self, payment_number: u32) -> Option<&ScheduledPayment> {
        payment_number
            .checked_sub(1)
            .and_then(|idx| self.payments.get(idx as usize))
    }

    /// remaining balance after the given payment
    pub fn balance_after_payment(&self, payment_number: u32) -> Money {
        self.get_payment(payment_number)
            .map(|p| p.ending_balance)
            .unwrap_or(self.principal)
    }
}

/// add calendar months, clamping to the last day of shorter months
fn add_months(date: DateTime<Utc>, months: u32) -> Result<DateTime<Utc>> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| FinancingError::CalculationError {
            message: format!("payment date out of range: {date} + {months} months"),
        })
}

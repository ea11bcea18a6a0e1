use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;

/// which option matrices a quote should include
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CalculationType {
    Loan,
    Lease,
    #[default]
    Both,
}

impl CalculationType {
    pub fn includes_loan(&self) -> bool {
        matches!(self, CalculationType::Loan | CalculationType::Both)
    }

    pub fn includes_lease(&self) -> bool {
        matches!(self, CalculationType::Lease | CalculationType::Both)
    }
}

/// payment figures for a single amortizing loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanQuote {
    pub monthly_payment: Money,
    pub total_payments: Money,
    pub total_interest: Money,
}

/// payment figures for a single lease
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaseQuote {
    pub monthly_payment: Money,
    pub total_payments: Money,
    pub residual_value: Money,
    /// not floored, negative when residual plus down exceeds price
    pub depreciation: Money,
}

/// one row of the loan option matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanOption {
    /// percent, e.g. 5.9
    pub apr: Decimal,
    pub term_months: u32,
    pub monthly_payment: Money,
    pub total_payments: Money,
    pub total_interest: Money,
    pub total_cost: Money,
}

/// one row of the lease option matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaseOption {
    pub term_months: u32,
    pub residual_percent: Decimal,
    pub money_factor: Decimal,
    /// money factor x 2400; an industry approximation, not an exact APR
    pub equivalent_apr: Decimal,
    pub monthly_payment: Money,
    pub total_payments: Money,
    pub residual_value: Money,
    pub depreciation: Money,
    pub miles_per_year: u32,
    pub total_cost_with_fees: Money,
}

/// credit tiers used by the reference rate table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreditTier {
    Excellent,
    Good,
    Fair,
    Poor,
}

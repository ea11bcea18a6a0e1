//! serializable views of a computed financing quote
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{AdditionalProducts, FixedFees};
use crate::decimal::Money;
use crate::types::{LeaseOption, LoanOption};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancingResult {
    pub vehicle_details: VehicleDetails,
    pub taxes_and_fees: TaxesAndFees,
    pub financing_summary: FinancingSummary,
    pub loan_options: Vec<LoanOption>,
    pub lease_options: Vec<LeaseOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<Comparison>,
    pub payment_breakdown: PaymentBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDetails {
    pub vehicle_price: Money,
    pub down_payment: Money,
    pub trade_in_value: Money,
    /// trade-in minus down payment
    pub net_trade_position: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxesAndFees {
    pub sales_tax_rate: Decimal,
    pub sales_tax_amount: Money,
    pub fees: FixedFees,
    pub additional_products: AdditionalProducts,
    /// sales tax plus fixed fees
    pub total_taxes_fees: Money,
    pub total_additional_costs: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancingSummary {
    pub gross_amount: Money,
    pub total_down_trade: Money,
    pub net_amount_to_finance: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub best_loan: LoanOption,
    pub best_lease: LeaseOption,
    pub monthly_difference: Money,
    pub total_cost_difference: Money,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentBreakdown {
    pub cash_due_at_signing: Money,
    pub first_payment: Money,
    pub disclosures: Vec<String>,
}

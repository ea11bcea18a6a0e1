use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calculator::PAYMENT_DISCLOSURES;
use crate::types::CreditTier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl RateRange {
    pub fn contains(&self, value: Decimal) -> bool {
        value >= self.min && value <= self.max
    }
}

/// indicative market rates for one credit tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketRate {
    pub tier: CreditTier,
    pub min_score: u16,
    /// APR percent
    pub loan_apr_range: RateRange,
    pub lease_money_factor_range: RateRange,
}

/// standard fees for a jurisdiction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeSchedule {
    pub jurisdiction: String,
    pub sales_tax_rate: Decimal,
    pub title_fee: Decimal,
    pub registration_fee: Decimal,
    pub documentation_fee_cap: Option<Decimal>,
}

/// static reference data served alongside the calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceData {
    pub market_rates: Vec<MarketRate>,
    pub fee_schedules: Vec<FeeSchedule>,
    pub disclosures: Vec<String>,
}

impl ReferenceData {
    pub fn current() -> Self {
        Self {
            market_rates: vec![
                MarketRate {
                    tier: CreditTier::Excellent,
                    min_score: 750,
                    loan_apr_range: RateRange { min: dec!(2.9), max: dec!(4.9) },
                    lease_money_factor_range: RateRange { min: dec!(0.00100), max: dec!(0.00150) },
                },
                MarketRate {
                    tier: CreditTier::Good,
                    min_score: 700,
                    loan_apr_range: RateRange { min: dec!(4.9), max: dec!(6.9) },
                    lease_money_factor_range: RateRange { min: dec!(0.00150), max: dec!(0.00200) },
                },
                MarketRate {
                    tier: CreditTier::Fair,
                    min_score: 650,
                    loan_apr_range: RateRange { min: dec!(6.9), max: dec!(9.9) },
                    lease_money_factor_range: RateRange { min: dec!(0.00200), max: dec!(0.00275) },
                },
                MarketRate {
                    tier: CreditTier::Poor,
                    min_score: 0,
                    loan_apr_range: RateRange { min: dec!(9.9), max: dec!(18.9) },
                    lease_money_factor_range: RateRange { min: dec!(0.00275), max: dec!(0.00400) },
                },
            ],
            fee_schedules: vec![
                FeeSchedule {
                    jurisdiction: "TX".to_string(),
                    sales_tax_rate: dec!(6.25),
                    title_fee: dec!(33),
                    registration_fee: dec!(75),
                    documentation_fee_cap: None,
                },
                FeeSchedule {
                    jurisdiction: "CA".to_string(),
                    sales_tax_rate: dec!(7.25),
                    title_fee: dec!(23),
                    registration_fee: dec!(65),
                    documentation_fee_cap: Some(dec!(85)),
                },
                FeeSchedule {
                    jurisdiction: "FL".to_string(),
                    sales_tax_rate: dec!(6.0),
                    title_fee: dec!(77.25),
                    registration_fee: dec!(225),
                    documentation_fee_cap: None,
                },
                FeeSchedule {
                    jurisdiction: "NY".to_string(),
                    sales_tax_rate: dec!(4.0),
                    title_fee: dec!(50),
                    registration_fee: dec!(140),
                    documentation_fee_cap: Some(dec!(175)),
                },
            ],
            disclosures: PAYMENT_DISCLOSURES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// tier for a credit score
    pub fn tier_for_score(&self, score: u16) -> Option<&MarketRate> {
        self.market_rates.iter().find(|rate| score >= rate.min_score)
    }

    pub fn fee_schedule(&self, jurisdiction: &str) -> Option<&FeeSchedule> {
        self.fee_schedules
            .iter()
            .find(|s| s.jurisdiction.eq_ignore_ascii_case(jurisdiction))
    }
}

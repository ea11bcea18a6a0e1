use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::request::FinancingRequest;
use crate::types::CalculationType;

/// APR sweep (percent) used when no loan APR is requested
pub const DEFAULT_LOAN_APRS: [Decimal; 6] =
    [dec!(2.9), dec!(3.9), dec!(4.9), dec!(5.9), dec!(6.9), dec!(7.9)];

/// loan term sweep used when no loan term is requested
pub const DEFAULT_LOAN_TERMS: [u32; 5] = [36, 48, 60, 72, 84];

/// lease term sweep used when no lease term is requested
pub const DEFAULT_LEASE_TERMS: [u32; 3] = [24, 36, 48];

/// residual percent sweep used when no residual is requested
pub const DEFAULT_RESIDUAL_PERCENTS: [Decimal; 4] = [dec!(50), dec!(55), dec!(60), dec!(65)];

/// money factor sweep used when no money factor is requested
pub const DEFAULT_MONEY_FACTORS: [Decimal; 4] =
    [dec!(0.00125), dec!(0.00150), dec!(0.00175), dec!(0.00200)];

pub const DEFAULT_MILES_PER_YEAR: u32 = 12_000;

/// default fixed fees and tax rate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeeDefaults {
    pub sales_tax_rate: Decimal,
    pub title_fee: Decimal,
    pub registration_fee: Decimal,
    pub documentation_fee: Decimal,
    pub dealer_prep_fee: Decimal,
}

pub const FEE_DEFAULTS: FeeDefaults = FeeDefaults {
    sales_tax_rate: dec!(8.25),
    title_fee: dec!(33),
    registration_fee: dec!(75),
    documentation_fee: dec!(299),
    dealer_prep_fee: dec!(0),
};

/// fixed fees charged on every deal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedFees {
    pub title: Money,
    pub registration: Money,
    pub documentation: Money,
    pub dealer_prep: Money,
}

impl FixedFees {
    /// None if the fees overflow
    pub fn total(&self) -> Option<Money> {
        Money::checked_sum([self.title, self.registration, self.documentation, self.dealer_prep])
    }
}

/// optional products sold with the vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalProducts {
    pub extended_warranty: Money,
    pub gap_insurance: Money,
    pub service_contract: Money,
}

impl AdditionalProducts {
    /// None if the products overflow
    pub fn total(&self) -> Option<Money> {
        Money::checked_sum([self.extended_warranty, self.gap_insurance, self.service_contract])
    }
}

/// loan sweep: APR-major, term-minor
#[derive(Debug, Clone, PartialEq)]
pub struct LoanSweep {
    pub aprs: Vec<Decimal>,
    pub terms: Vec<u32>,
}

impl LoanSweep {
    pub fn combinations(&self) -> impl Iterator<Item = (Decimal, u32)> + '_ {
        self.aprs
            .iter()
            .flat_map(move |&apr| self.terms.iter().map(move |&term| (apr, term)))
    }
}

/// lease sweep: term-major, residual-mid, money-factor-minor
#[derive(Debug, Clone, PartialEq)]
pub struct LeaseSweep {
    pub terms: Vec<u32>,
    pub residual_percents: Vec<Decimal>,
    pub money_factors: Vec<Decimal>,
    pub miles_per_year: u32,
}

impl LeaseSweep {
    pub fn combinations(&self) -> impl Iterator<Item = (u32, Decimal, Decimal)> + '_ {
        self.terms.iter().flat_map(move |&term| {
            self.residual_percents.iter().flat_map(move |&residual| {
                self.money_factors.iter().map(move |&mf| (term, residual, mf))
            })
        })
    }
}

/// request with every default resolved once
#[derive(Debug, Clone, PartialEq)]
pub struct FinancingTerms {
    pub vehicle_price: Money,
    pub down_payment: Money,
    pub trade_in_value: Money,
    pub sales_tax_rate: Decimal,
    pub fees: FixedFees,
    pub products: AdditionalProducts,
    pub loan: LoanSweep,
    pub lease: LeaseSweep,
    pub calculation_type: CalculationType,
}

fn money_or(value: Option<Decimal>, default: Decimal) -> Money {
    Money::from_decimal(value.unwrap_or(default))
}

fn single_or<T: Copy>(value: Option<T>, defaults: &[T]) -> Vec<T> {
    match value {
        Some(v) => vec![v],
        None => defaults.to_vec(),
    }
}

/// whole-number field as u32; validation has already rejected anything else
fn whole(value: Option<Decimal>) -> Option<u32> {
    value.and_then(|v| v.to_u32())
}

impl FinancingTerms {
    /// resolve defaults for a request; assumes the request was validated
    pub fn resolve(request: &FinancingRequest) -> Self {
        Self {
            vehicle_price: Money::from_decimal(request.vehicle_price),
            down_payment: money_or(request.down_payment, Decimal::ZERO),
            trade_in_value: money_or(request.trade_in_value, Decimal::ZERO),
            sales_tax_rate: request.sales_tax_rate.unwrap_or(FEE_DEFAULTS.sales_tax_rate),
            fees: FixedFees {
                title: money_or(request.title_fee, FEE_DEFAULTS.title_fee),
                registration: money_or(request.registration_fee, FEE_DEFAULTS.registration_fee),
                documentation: money_or(request.documentation_fee, FEE_DEFAULTS.documentation_fee),
                dealer_prep: money_or(request.dealer_prep_fee, FEE_DEFAULTS.dealer_prep_fee),
            },
            products: AdditionalProducts {
                extended_warranty: money_or(request.extended_warranty, Decimal::ZERO),
                gap_insurance: money_or(request.gap_insurance, Decimal::ZERO),
                service_contract: money_or(request.service_contract, Decimal::ZERO),
            },
            loan: LoanSweep {
                aprs: single_or(request.loan_apr, &DEFAULT_LOAN_APRS),
                terms: single_or(whole(request.loan_term_months), &DEFAULT_LOAN_TERMS),
            },
            lease: LeaseSweep {
                terms: single_or(whole(request.lease_term_months), &DEFAULT_LEASE_TERMS),
                residual_percents: single_or(
                    request.lease_residual_percent,
                    &DEFAULT_RESIDUAL_PERCENTS,
                ),
                money_factors: single_or(request.lease_money_factor, &DEFAULT_MONEY_FACTORS),
                miles_per_year: whole(request.lease_miles_per_year)
                    .unwrap_or(DEFAULT_MILES_PER_YEAR),
            },
            calculation_type: request.calculation_type,
        }
    }
}

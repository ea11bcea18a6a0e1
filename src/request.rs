use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::errors::{FieldViolation, FinancingError, Result};
use crate::types::CalculationType;

/// financing quote request as received from the desk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FinancingRequest {
    pub vehicle_price: Decimal,
    #[serde(default)]
    pub down_payment: Option<Decimal>,
    #[serde(default)]
    pub trade_in_value: Option<Decimal>,

    #[serde(default)]
    pub loan_apr: Option<Decimal>,
    #[serde(default)]
    pub loan_term_months: Option<Decimal>,

    #[serde(default)]
    pub lease_term_months: Option<Decimal>,
    #[serde(default)]
    pub lease_residual_percent: Option<Decimal>,
    #[serde(default)]
    pub lease_money_factor: Option<Decimal>,
    #[serde(default)]
    pub lease_miles_per_year: Option<Decimal>,

    #[serde(default)]
    pub sales_tax_rate: Option<Decimal>,
    #[serde(default)]
    pub title_fee: Option<Decimal>,
    #[serde(default)]
    pub registration_fee: Option<Decimal>,
    #[serde(default)]
    pub documentation_fee: Option<Decimal>,
    #[serde(default)]
    pub dealer_prep_fee: Option<Decimal>,

    #[serde(default)]
    pub extended_warranty: Option<Decimal>,
    #[serde(default)]
    pub gap_insurance: Option<Decimal>,
    #[serde(default)]
    pub service_contract: Option<Decimal>,

    #[serde(default)]
    pub calculation_type: CalculationType,
}

/// request for a month-by-month loan schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub principal: Decimal,
    pub apr: Decimal,
    pub term_months: Decimal,
    #[serde(default)]
    pub start_date: Option<chrono::DateTime<chrono::Utc>>,
}

/// collects every violation instead of stopping at the first
#[derive(Debug, Default)]
struct Violations(Vec<FieldViolation>);

impl Violations {
    fn non_negative(&mut self, field: &str, value: Option<Decimal>) {
        if let Some(v) = value {
            if v.is_sign_negative() && !v.is_zero() {
                self.0
                    .push(FieldViolation::new(field, "must be greater than or equal to 0"));
            }
        }
    }

    fn within(&mut self, field: &str, value: Option<Decimal>, min: Decimal, max: Decimal) {
        if let Some(v) = value {
            if v < min {
                self.0.push(FieldViolation::new(
                    field,
                    format!("must be greater than or equal to {}", min.normalize()),
                ));
            } else if v > max {
                self.0.push(FieldViolation::new(
                    field,
                    format!("must be less than or equal to {}", max.normalize()),
                ));
            }
        }
    }

    /// counts such as months or miles; bounds first, then integrality
    fn whole_within(&mut self, field: &str, value: Option<Decimal>, min: u32, max: u32) {
        let before = self.0.len();
        self.within(field, value, Decimal::from(min), Decimal::from(max));
        if let Some(v) = value {
            if self.0.len() == before && !v.fract().is_zero() {
                self.0.push(FieldViolation::new(field, "must be a whole number"));
            }
        }
    }

    fn into_result(self) -> Result<()> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(FinancingError::Validation { violations: self.0 })
        }
    }
}

impl FinancingRequest {
    /// request with only a vehicle price; everything else defaults
    pub fn for_price(vehicle_price: Decimal) -> Self {
        Self {
            vehicle_price,
            ..Default::default()
        }
    }

    /// check every field against its declared bounds
    pub fn validate(&self) -> Result<()> {
        let mut v = Violations::default();

        v.non_negative("vehiclePrice", Some(self.vehicle_price));
        v.non_negative("downPayment", self.down_payment);
        v.non_negative("tradeInValue", self.trade_in_value);

        v.within("loanApr", self.loan_apr, dec!(0), dec!(50));
        v.whole_within("loanTermMonths", self.loan_term_months, 12, 84);

        v.whole_within("leaseTermMonths", self.lease_term_months, 12, 60);
        v.within("leaseResidualPercent", self.lease_residual_percent, dec!(20), dec!(80));
        v.within("leaseMoneyFactor", self.lease_money_factor, dec!(0), dec!(1));
        v.whole_within("leaseMilesPerYear", self.lease_miles_per_year, 5_000, 25_000);

        v.within("salesTaxRate", self.sales_tax_rate, dec!(0), dec!(15));
        v.non_negative("titleFee", self.title_fee);
        v.non_negative("registrationFee", self.registration_fee);
        v.non_negative("documentationFee", self.documentation_fee);
        v.non_negative("dealerPrepFee", self.dealer_prep_fee);

        v.non_negative("extendedWarranty", self.extended_warranty);
        v.non_negative("gapInsurance", self.gap_insurance);
        v.non_negative("serviceContract", self.service_contract);

        v.into_result()
    }
}

impl ScheduleRequest {
    pub fn validate(&self) -> Result<()> {
        let mut v = Violations::default();
        v.non_negative("principal", Some(self.principal));
        v.within("apr", Some(self.apr), dec!(0), dec!(50));
        v.whole_within("termMonths", Some(self.term_months), 1, 84);
        v.into_result()
    }

    /// term as a month count; 0 when the term is not a valid count
    pub fn term(&self) -> u32 {
        self.term_months.to_u32().unwrap_or(0)
    }
}

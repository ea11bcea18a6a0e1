use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Sub};
use std::str::FromStr;

/// internal working precision for intermediate money values
const WORKING_DP: u32 = 8;

/// Money type carrying 8 decimal places internally, rounded to cents on output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// create from decimal
    pub fn from_decimal(d: Decimal) -> Self {
        Money(d.round_dp(WORKING_DP))
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> Result<Self, rust_decimal::Error> {
        Ok(Money(Decimal::from_str(s)?.round_dp(WORKING_DP)))
    }

    /// create from whole dollars
    pub fn from_major(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }

    /// create from cents
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// round to cents, half-up (midpoint away from zero)
    pub fn round_cents(&self) -> Self {
        Money(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    pub fn min(self, other: Self) -> Self {
        Money(self.0.min(other.0))
    }

    /// calculate percentage (e.g., 8.25% of $30,000)
    pub fn percentage(&self, percent: Decimal) -> Self {
        Money((self.0 * percent / Decimal::ONE_HUNDRED).round_dp(WORKING_DP))
    }

    /// percentage, or None on overflow
    pub fn checked_percentage(&self, percent: Decimal) -> Option<Self> {
        let product = self.0.checked_mul(percent)?;
        Some(Money(product.checked_div(Decimal::ONE_HUNDRED)?.round_dp(WORKING_DP)))
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        Some(Money(self.0.checked_add(other.0)?.round_dp(WORKING_DP)))
    }

    pub fn checked_sub(self, other: Money) -> Option<Money> {
        Some(Money(self.0.checked_sub(other.0)?.round_dp(WORKING_DP)))
    }

    pub fn checked_mul(self, factor: Decimal) -> Option<Money> {
        Some(Money(self.0.checked_mul(factor)?.round_dp(WORKING_DP)))
    }

    /// None on overflow or a zero divisor
    pub fn checked_div(self, divisor: Decimal) -> Option<Money> {
        Some(Money(self.0.checked_div(divisor)?.round_dp(WORKING_DP)))
    }

    /// sum that stops at the first overflow
    pub fn checked_sum(amounts: impl IntoIterator<Item = Money>) -> Option<Money> {
        amounts
            .into_iter()
            .try_fold(Money::ZERO, |acc, amount| acc.checked_add(amount))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::from_str_exact(s)
    }
}

impl From<Decimal> for Money {
    fn from(d: Decimal) -> Self {
        Money::from_decimal(d)
    }
}

impl From<u32> for Money {
    fn from(i: u32) -> Self {
        Money::from_major(i as i64)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money((self.0 + other.0).round_dp(WORKING_DP))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        self.0 = (self.0 + other.0).round_dp(WORKING_DP);
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money((self.0 - other.0).round_dp(WORKING_DP))
    }
}

impl Mul<Decimal> for Money {
    type Output = Money;

    fn mul(self, other: Decimal) -> Money {
        Money((self.0 * other).round_dp(WORKING_DP))
    }
}

impl Div<Decimal> for Money {
    type Output = Money;

    fn div(self, other: Decimal) -> Money {
        Money((self.0 / other).round_dp(WORKING_DP))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, x| acc + x)
    }
}

/// rate type for interest rates, stored as a fraction (0.059 for 5.9%)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Rate(Decimal);

impl Rate {
    pub const ZERO: Rate = Rate(Decimal::ZERO);

    /// create from decimal fraction (e.g., 0.05 for 5%)
    pub fn from_decimal(d: Decimal) -> Self {
        Rate(d)
    }

    /// create from a percentage figure (e.g., 5.9 for 5.9%)
    pub fn from_percent(p: Decimal) -> Self {
        Rate(p / Decimal::ONE_HUNDRED)
    }

    /// approximate APR implied by a lease money factor (mf x 2400)
    pub fn from_money_factor(money_factor: Decimal) -> Self {
        Rate::from_percent(money_factor * Decimal::from(2400))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn as_percentage(&self) -> Decimal {
        self.0 * Decimal::ONE_HUNDRED
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// monthly rate from annual rate
    pub fn monthly_rate(&self) -> Rate {
        Rate(self.0 / Decimal::from(12))
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage().normalize())
    }
}

impl From<Decimal> for Rate {
    fn from(d: Decimal) -> Self {
        Rate::from_decimal(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_precision() {
        let m = Money::from_str_exact("100.123456789").unwrap();
        assert_eq!(m.to_string(), "100.12345679"); // rounded to 8 places
    }

    #[test]
    fn test_round_cents_is_half_up() {
        assert_eq!(Money::from_decimal(dec!(2.345)).round_cents(), Money::from_cents(235));
        assert_eq!(Money::from_decimal(dec!(2.355)).round_cents(), Money::from_cents(236));
        assert_eq!(Money::from_decimal(dec!(2.344)).round_cents(), Money::from_cents(234));
    }

    #[test]
    fn test_percentage() {
        let price = Money::from_major(30_000);
        assert_eq!(price.percentage(dec!(8.25)), Money::from_major(2_475));
    }

    #[test]
    fn test_rate_conversions() {
        let apr = Rate::from_percent(dec!(6));
        assert_eq!(apr.as_decimal(), dec!(0.06));
        assert_eq!(apr.monthly_rate().as_decimal(), dec!(0.005));
        assert_eq!(apr.to_string(), "6%");

        let lease = Rate::from_money_factor(dec!(0.00125));
        assert_eq!(lease.as_percentage(), dec!(3.0));
    }

    #[test]
    fn test_checked_arithmetic() {
        let max = Money::from_decimal(Decimal::MAX);

        assert_eq!(max.checked_add(Money::from_major(1)), None);
        assert_eq!(max.checked_mul(dec!(2)), None);
        assert_eq!(max.checked_percentage(dec!(8.25)), None);
        assert_eq!(Money::from_major(1).checked_div(Decimal::ZERO), None);
        assert_eq!(Money::checked_sum([max, Money::from_major(1)]), None);

        assert_eq!(
            Money::from_major(30_000).checked_percentage(dec!(8.25)),
            Some(Money::from_major(2_475))
        );
        assert_eq!(
            Money::checked_sum([33u32, 75, 299].map(Money::from)),
            Some(Money::from_major(407))
        );
        assert_eq!(
            Money::from_major(100).checked_sub(Money::from_major(250)),
            Some(Money::from_major(-150))
        );
    }

    #[test]
    fn test_money_sum() {
        let total: Money = [33u32, 75, 299, 0].into_iter().map(Money::from).sum();
        assert_eq!(total, Money::from_major(407));
    }
}

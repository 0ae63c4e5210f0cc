//! Money type with decimal precision and currency.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal` for arbitrary precision.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents a monetary amount with currency.
///
/// Uses `Decimal` internally to avoid floating-point precision errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// The amount in major currency units.
    pub amount: Decimal,
    /// ISO 4217 currency code (e.g., "ETB", "USD").
    pub currency: Currency,
}

/// ISO 4217 currency codes supported by the system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Ethiopian Birr
    #[default]
    Etb,
    /// US Dollar
    Usd,
    /// Euro
    Eur,
}

impl Money {
    /// Creates a new Money instance.
    #[must_use]
    pub const fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Creates a zero amount in the specified currency.
    #[must_use]
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is strictly below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    /// Returns true if the amount is strictly above zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// Adds a signed delta in the same currency.
    ///
    /// Returns `None` on decimal overflow.
    #[must_use]
    pub fn checked_add(&self, delta: Decimal) -> Option<Self> {
        self.amount
            .checked_add(delta)
            .map(|amount| Self::new(amount, self.currency))
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Etb => write!(f, "ETB"),
            Self::Usd => write!(f, "USD"),
            Self::Eur => write!(f, "EUR"),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ETB" => Ok(Self::Etb),
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            _ => Err(format!("Unknown currency: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    #[test]
    fn test_money_new() {
        let amount = dec!(100.00);
        let money = Money::new(amount, Currency::Etb);
        assert_eq!(money.amount, amount);
        assert_eq!(money.currency, Currency::Etb);
    }

    #[test]
    fn test_money_zero() {
        let money = Money::zero(Currency::Usd);
        assert!(money.is_zero());
        assert!(!money.is_negative());
        assert!(!money.is_positive());
    }

    #[test]
    fn test_money_sign() {
        assert!(Money::new(dec!(-0.01), Currency::Etb).is_negative());
        assert!(Money::new(dec!(0.01), Currency::Etb).is_positive());
        assert!(!Money::new(dec!(-0), Currency::Etb).is_negative());
    }

    #[test]
    fn test_money_checked_add() {
        let balance = Money::new(dec!(1000), Currency::Etb);
        assert_eq!(
            balance.checked_add(dec!(200)),
            Some(Money::new(dec!(1200), Currency::Etb))
        );
        assert_eq!(
            balance.checked_add(dec!(-2000)),
            Some(Money::new(dec!(-1000), Currency::Etb))
        );
        assert_eq!(
            Money::new(Decimal::MAX, Currency::Etb).checked_add(Decimal::ONE),
            None
        );
    }

    #[test]
    fn test_money_display() {
        assert_eq!(
            Money::new(dec!(1500), Currency::Etb).to_string(),
            "1500 ETB"
        );
    }

    #[test]
    fn test_currency_from_str() {
        assert_eq!(Currency::from_str("ETB").unwrap(), Currency::Etb);
        assert_eq!(Currency::from_str("etb").unwrap(), Currency::Etb);
        assert_eq!(Currency::from_str("USD").unwrap(), Currency::Usd);
        assert_eq!(Currency::from_str("EUR").unwrap(), Currency::Eur);
        assert!(Currency::from_str("XXX").is_err());
        assert!(Currency::from_str("").is_err());
    }

    #[test]
    fn test_money_serializes_amount_as_string() {
        let json = serde_json::to_value(Money::new(dec!(1000), Currency::Etb)).unwrap();
        assert_eq!(json["amount"], "1000");
        assert_eq!(json["currency"], "ETB");
    }
}

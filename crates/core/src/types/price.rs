//! Type-safe price representation using decimal arithmetic.
//!
//! Menu prices and order costs go through [`Price`] so money never touches
//! floating point. Pronto stores operate in a single currency, so the type
//! carries no currency dimension.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error constructing a [`Price`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceError {
    #[error("price must not be negative (got {0})")]
    Negative(Decimal),
}

/// A non-negative amount of money in the currency's standard unit
/// (e.g. dollars, not cents).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price, rejecting negative amounts.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `amount` units at this unit price.
    #[must_use]
    pub fn line_total(&self, amount: u32) -> Self {
        Self(self.0 * Decimal::from(amount))
    }
}

impl std::ops::Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl From<u32> for Price {
    fn from(amount: u32) -> Self {
        Self(Decimal::from(amount))
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl std::iter::Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, p| acc + p)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_amount_rejected() {
        let err = Price::new(Decimal::from(-1)).unwrap_err();
        assert_eq!(err, PriceError::Negative(Decimal::from(-1)));
    }

    #[test]
    fn test_zero_is_valid() {
        assert_eq!(Price::new(Decimal::ZERO).unwrap(), Price::ZERO);
    }

    #[test]
    fn test_line_total() {
        let unit = Price::from(100u32);
        assert_eq!(unit.line_total(3), Price::from(300u32));
    }

    #[test]
    fn test_sum() {
        let total: Price = [Price::from(200u32), Price::from(200u32)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from(400u32));
    }

    #[test]
    fn test_display_two_decimal_places() {
        assert_eq!(Price::from(10u32).to_string(), "10.00");
    }
}

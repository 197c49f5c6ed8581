//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are stored as floating point numbers in the database and travel as
//! JSON numbers. Cart arithmetic converts them to [`Decimal`] first so that
//! `10.50 * 2 + 5.00` is exactly `26.00`.

use core::fmt;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from price conversion and arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PriceError {
    /// The stored float is outside the decimal range.
    #[error("price {0} cannot be represented")]
    OutOfRange(f64),

    /// A subtotal or total exceeded the decimal range.
    #[error("price arithmetic overflowed")]
    Overflow,
}

/// A price in soles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price {
    amount: Decimal,
}

impl Price {
    /// Currency symbol used when formatting prices.
    pub const SYMBOL: &'static str = "S/";

    /// A price of zero.
    pub const ZERO: Self = Self {
        amount: Decimal::ZERO,
    };

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self { amount }
    }

    /// Convert a stored floating point price.
    ///
    /// Goes through the shortest decimal representation of the float so that
    /// `10.1` becomes `10.1` rather than its binary expansion. Missing and
    /// non-finite values are treated as zero.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::OutOfRange`] for finite values [`Decimal`]
    /// cannot hold.
    pub fn from_f64(value: Option<f64>) -> Result<Self, PriceError> {
        match value.filter(|v| v.is_finite()) {
            None => Ok(Self::ZERO),
            Some(v) => Decimal::from_str(&v.to_string())
                .map(Self::new)
                .map_err(|_| PriceError::OutOfRange(v)),
        }
    }

    /// Format a stored float for display.
    ///
    /// Values outside the decimal range are printed from the float itself.
    #[must_use]
    pub fn display_f64(value: Option<f64>) -> String {
        match Self::from_f64(value) {
            Ok(price) => price.display(),
            Err(_) => format!("{} {:.2}", Self::SYMBOL, value.unwrap_or_default()),
        }
    }

    /// Sum of two prices.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Overflow`] if the result exceeds the decimal range.
    pub fn checked_add(self, rhs: Self) -> Result<Self, PriceError> {
        self.amount
            .checked_add(rhs.amount)
            .map(Self::new)
            .ok_or(PriceError::Overflow)
    }

    /// Price times a quantity.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Overflow`] if the result exceeds the decimal range.
    pub fn checked_mul(self, quantity: u32) -> Result<Self, PriceError> {
        self.amount
            .checked_mul(Decimal::from(quantity))
            .map(Self::new)
            .ok_or(PriceError::Overflow)
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// Format for display with two decimals, e.g. `S/ 10.50`.
    #[must_use]
    pub fn display(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self
            .amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        write!(f, "{} {rounded:.2}", Self::SYMBOL)
    }
}

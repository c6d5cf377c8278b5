//! A validated monetary amount for transactions.

use std::fmt::Display;

use rust_decimal::{Decimal, dec};
use serde::{Deserialize, Serialize};

use crate::Error;

/// The exclusive upper bound for transaction amounts.
pub const MAX_AMOUNT: Decimal = dec!(10000000);

/// A validated transaction amount.
///
/// Amounts are strictly positive, less than [MAX_AMOUNT] and carry at most
/// two decimal places. The inner value is normalized to exactly two decimal
/// places so that equal amounts compare and display identically.
///
/// Amounts use decimal arithmetic rather than floating point so that sums
/// over many transactions stay exact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Hash)]
pub struct Amount(Decimal);

impl Amount {
    /// Create an amount.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::InvalidAmount] if `value` is not
    /// strictly positive, is not less than [MAX_AMOUNT], or has more than two
    /// decimal places.
    pub fn new(value: Decimal) -> Result<Self, Error> {
        let value = value.normalize();

        if value <= Decimal::ZERO || value >= MAX_AMOUNT || value.scale() > 2 {
            return Err(Error::InvalidAmount(value.to_string()));
        }

        let mut value = value;
        value.rescale(2);

        Ok(Self(value))
    }

    /// Create an amount without validation.
    ///
    /// The caller should ensure that the value satisfies the invariants
    /// listed on [Amount::new].
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`,
    /// because if the invariant is violated it will cause incorrect behaviour
    /// but not affect memory safety.
    pub fn new_unchecked(value: Decimal) -> Self {
        let mut value = value;
        value.rescale(2);

        Self(value)
    }

    /// The inner decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

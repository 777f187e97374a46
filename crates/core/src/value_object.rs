//! Value objects: immutable, compared by value.

use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Non-negative monetary amount (unit prices, unit costs).
///
/// There is a single implicit currency; amounts keep the precision they were
/// entered with and are only rounded for display.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Build an amount, rejecting negative values.
    pub fn new(amount: Decimal) -> DomainResult<Self> {
        if amount < Decimal::ZERO {
            return Err(DomainError::invalid_argument(format!(
                "amount cannot be negative (got {amount})"
            )));
        }
        Ok(Self(amount.normalize()))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Extended amount for `quantity` units.
    ///
    /// Fails with `InvalidArgument` when the product does not fit in a `Decimal`.
    pub fn times(self, quantity: i64) -> DomainResult<Decimal> {
        self.0.checked_mul(Decimal::from(quantity)).ok_or_else(|| {
            DomainError::invalid_argument(format!("amount {self} x {quantity} is out of range"))
        })
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Money {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s.trim())
            .map_err(|e| DomainError::invalid_argument(format!("amount '{}': {}", s.trim(), e)))?;
        Self::new(amount)
    }
}

impl TryFrom<Decimal> for Money {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

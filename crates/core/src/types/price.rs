//! Type-safe price representation using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Currency code for all storefront amounts.
///
/// The store trades in a single currency; multi-currency support is out of
/// scope, so the code is a constant rather than a field on every price.
pub const CURRENCY: &str = "EGP";

/// A monetary amount in the store currency.
///
/// Wraps [`Decimal`] so money never travels as a float. Serializes
/// transparently (`"300.00"` in persisted JSON, numeric catalog values
/// deserialize losslessly).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// The zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Wire form with two decimal places and no currency, e.g. `300.00`.
    #[must_use]
    pub fn wire(&self) -> String {
        format!("{:.2}", self.0)
    }

    /// Display form with currency, e.g. `300.00 EGP`.
    #[must_use]
    pub fn display(&self) -> String {
        format!("{:.2} {CURRENCY}", self.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {CURRENCY}", self.0)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

//! Sale price in Chilean pesos.
//!
//! NexusHub trades in a single currency (CLP, a zero-decimal currency), so
//! the price type carries no currency code. A [`Price`] is always strictly
//! positive: a zero or negative asking price blocks the save upstream, and
//! constructing one here is impossible.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is zero or negative.
    #[error("price must be greater than zero")]
    NotPositive,
    /// The amount is implausibly large.
    #[error("price must be at most {max} CLP")]
    TooLarge {
        /// Maximum allowed amount.
        max: Decimal,
    },
}

/// A strictly positive asking price in CLP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}

impl Price {
    /// Upper bound for a single card's asking price (one hundred million CLP).
    pub const MAX_CLP: i64 = 100_000_000;

    /// Create a `Price` from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::NotPositive`] for zero or negative amounts and
    /// [`PriceError::TooLarge`] for amounts above [`Self::MAX_CLP`].
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount <= Decimal::ZERO {
            return Err(PriceError::NotPositive);
        }
        let max = Decimal::from(Self::MAX_CLP);
        if amount > max {
            return Err(PriceError::TooLarge { max });
        }
        Ok(Self(amount))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Format for display with es-CL digit grouping, e.g. `50000` -> `"50.000"`.
    ///
    /// CLP has no minor unit, so any fractional part is truncated.
    #[must_use]
    pub fn format_clp(&self) -> String {
        format_clp(self.0)
    }
}

/// Format a non-negative CLP amount with es-CL digit grouping.
///
/// Shared by [`Price`] and by computed sums (selection totals) that are not
/// themselves prices.
#[must_use]
pub fn format_clp(amount: Decimal) -> String {
    group_thousands(&amount.trunc().to_string())
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Insert `.` separators every three digits, counting from the right.
fn group_thousands(digits: &str) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let mut out = String::with_capacity(chars.len() + chars.len() / 3);
    for (i, c) in chars.iter().enumerate() {
        let remaining = chars.len() - i;
        if i > 0 && remaining % 3 == 0 {
            out.push('.');
        }
        out.push(*c);
    }
    out
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Price {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <Decimal as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <Decimal as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Price {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let amount = <Decimal as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(amount))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Price {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <Decimal as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_price() {
        let price = Price::new(Decimal::from(50_000)).unwrap();
        assert_eq!(price.amount(), Decimal::from(50_000));
    }

    #[test]
    fn test_zero_rejected() {
        assert_eq!(Price::new(Decimal::ZERO), Err(PriceError::NotPositive));
    }

    #[test]
    fn test_negative_rejected() {
        assert_eq!(
            Price::new(Decimal::from(-100)),
            Err(PriceError::NotPositive)
        );
    }

    #[test]
    fn test_too_large_rejected() {
        assert!(matches!(
            Price::new(Decimal::from(Price::MAX_CLP + 1)),
            Err(PriceError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_format_clp_grouping() {
        let price = Price::new(Decimal::from(50_000)).unwrap();
        assert_eq!(price.format_clp(), "50.000");

        let price = Price::new(Decimal::from(1_250_000)).unwrap();
        assert_eq!(price.format_clp(), "1.250.000");

        let price = Price::new(Decimal::from(999)).unwrap();
        assert_eq!(price.format_clp(), "999");
    }

    #[test]
    fn test_format_clp_truncates_fraction() {
        let price = Price::new(Decimal::new(49_999_5, 1)).unwrap(); // 49999.5
        assert_eq!(price.format_clp(), "49.999");
    }
}

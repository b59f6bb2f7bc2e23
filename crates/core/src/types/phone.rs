//! Seller contact phone numbers.
//!
//! Numbers are stored digit-only, exactly as the seller typed them minus
//! formatting. The default country code is *not* baked in at storage time;
//! it is applied when a dialable wa.me target is composed, so a seller who
//! later fixes their number does not end up with a double prefix.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when normalizing a phone number.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// Fewer than the minimum number of digits remain after stripping.
    #[error("phone number must have at least {min} digits")]
    TooShort {
        /// Minimum number of digits.
        min: usize,
    },
    /// More digits than any real number carries.
    #[error("phone number must have at most {max} digits")]
    TooLong {
        /// Maximum number of digits.
        max: usize,
    },
}

/// A digit-only phone number.
///
/// ## Examples
///
/// ```
/// use nexus_hub_core::PhoneNumber;
///
/// let phone = PhoneNumber::parse("+56 9 1234 5678").unwrap();
/// assert_eq!(phone.as_str(), "56912345678");
///
/// // Numbers without a country code are stored as-is...
/// let local = PhoneNumber::parse("91234567").unwrap();
/// assert_eq!(local.as_str(), "91234567");
///
/// // ...and only prefixed when a dialable target is needed.
/// assert_eq!(local.dialable("56"), "5691234567");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Minimum number of digits for a usable number.
    pub const MIN_DIGITS: usize = 8;

    /// Maximum number of digits (ITU-T E.164 limit).
    pub const MAX_DIGITS: usize = 15;

    /// Normalize a raw phone string to its digits.
    ///
    /// Strips every non-digit character (`+`, spaces, dashes, parentheses).
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 8 or more than 15 digits remain.
    pub fn parse(raw: &str) -> Result<Self, PhoneError> {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        if digits.len() < Self::MIN_DIGITS {
            return Err(PhoneError::TooShort {
                min: Self::MIN_DIGITS,
            });
        }
        if digits.len() > Self::MAX_DIGITS {
            return Err(PhoneError::TooLong {
                max: Self::MAX_DIGITS,
            });
        }
        Ok(Self(digits))
    }

    /// Returns the stored digits.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns a dialable number, applying `country_code` when the stored
    /// digits do not already carry it.
    ///
    /// A number is considered internationally prefixed when it starts with
    /// the country code and is long enough to hold a subscriber number
    /// behind it.
    #[must_use]
    pub fn dialable(&self, country_code: &str) -> String {
        if self.0.starts_with(country_code) && self.0.len() >= country_code.len() + Self::MIN_DIGITS
        {
            self.0.clone()
        } else {
            format!("{country_code}{}", self.0)
        }
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PhoneNumber {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for PhoneNumber {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for PhoneNumber {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for PhoneNumber {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

//! Shop domain type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`ShopDomain`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum ShopDomainError {
    /// The input string is empty.
    #[error("shop domain cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("shop domain must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character outside `[a-z0-9.-]`.
    #[error("shop domain contains invalid character '{0}'")]
    InvalidCharacter(char),
    /// The input has no dot-separated labels (e.g. bare `myshop`).
    #[error("shop domain must be a fully qualified domain")]
    NotQualified,
}

/// A shop's myshopify domain - the tenant identifier for the embedded app.
///
/// ## Constraints
///
/// - Length: 1-254 characters
/// - Lowercase letters, digits, `-` and `.` only (input is lowercased)
/// - Must contain at least one dot (e.g. `my-shop.myshopify.com`)
///
/// ## Examples
///
/// ```
/// use printmint_core::ShopDomain;
///
/// assert!(ShopDomain::parse("my-shop.myshopify.com").is_ok());
/// assert!(ShopDomain::parse("My-Shop.MyShopify.com").is_ok()); // lowercased
///
/// assert!(ShopDomain::parse("").is_err());         // empty
/// assert!(ShopDomain::parse("myshop").is_err());   // not qualified
/// assert!(ShopDomain::parse("shop space").is_err()); // invalid character
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ShopDomain(String);

impl ShopDomain {
    /// Maximum length of a shop domain (DNS name limit).
    pub const MAX_LENGTH: usize = 254;

    /// Parse a `ShopDomain` from a string.
    ///
    /// The input is lowercased; a leading `https://` scheme and trailing `/`
    /// are stripped so the `dest` claim of a session token parses directly.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, too long, contains characters
    /// outside `[a-z0-9.-]`, or has no dot-separated labels.
    pub fn parse(s: &str) -> Result<Self, ShopDomainError> {
        let s = s
            .strip_prefix("https://")
            .unwrap_or(s)
            .trim_end_matches('/')
            .to_lowercase();

        if s.is_empty() {
            return Err(ShopDomainError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(ShopDomainError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if let Some(c) = s
            .chars()
            .find(|c| !c.is_ascii_lowercase() && !c.is_ascii_digit() && *c != '-' && *c != '.')
        {
            return Err(ShopDomainError::InvalidCharacter(c));
        }

        if !s.contains('.') {
            return Err(ShopDomainError::NotQualified);
        }

        Ok(Self(s))
    }

    /// Get the domain as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShopDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ShopDomain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for ShopDomain {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for ShopDomain {
    fn decode(
        value: sqlx::postgres::PgValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for ShopDomain {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_domain() {
        let shop = ShopDomain::parse("my-shop.myshopify.com").expect("parse");
        assert_eq!(shop.as_str(), "my-shop.myshopify.com");
    }

    #[test]
    fn test_parse_lowercases() {
        let shop = ShopDomain::parse("My-Shop.MyShopify.com").expect("parse");
        assert_eq!(shop.as_str(), "my-shop.myshopify.com");
    }

    #[test]
    fn test_parse_strips_scheme_and_slash() {
        let shop = ShopDomain::parse("https://my-shop.myshopify.com/").expect("parse");
        assert_eq!(shop.as_str(), "my-shop.myshopify.com");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(matches!(ShopDomain::parse(""), Err(ShopDomainError::Empty)));
    }

    #[test]
    fn test_parse_rejects_unqualified() {
        assert!(matches!(
            ShopDomain::parse("myshop"),
            Err(ShopDomainError::NotQualified)
        ));
    }

    #[test]
    fn test_parse_rejects_invalid_characters() {
        assert!(matches!(
            ShopDomain::parse("my shop.myshopify.com"),
            Err(ShopDomainError::InvalidCharacter(' '))
        ));
        assert!(ShopDomain::parse("shop_1.myshopify.com").is_err());
    }

    #[test]
    fn test_parse_rejects_too_long() {
        let long = format!("{}.myshopify.com", "a".repeat(300));
        assert!(matches!(
            ShopDomain::parse(&long),
            Err(ShopDomainError::TooLong { .. })
        ));
    }

    #[test]
    fn test_serde_transparent() {
        let shop = ShopDomain::parse("my-shop.myshopify.com").expect("parse");
        let json = serde_json::to_string(&shop).expect("serialize");
        assert_eq!(json, "\"my-shop.myshopify.com\"");
    }
}

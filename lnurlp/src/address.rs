//! Lightning Address parsing (LUD-16).
//!
//! A Lightning Address looks like an email address: `name@domain`. The parser
//! only requires a non-empty local part and domain around an `@`; it does not
//! enforce the LUD-16 character set, since services in the wild accept more.

use std::fmt;
use std::str::FromStr;

/// Characters that would let a domain escape the authority component of the
/// discovery URL.
const FORBIDDEN_DOMAIN_CHARS: &[char] = &['/', '?', '#', '\\'];

/// How addresses containing more than one `@` are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Split on `@`, use the first segment as the local part and the second
    /// as the domain. Any further segments are dropped.
    #[default]
    Lenient,
    /// Reject addresses that do not contain exactly one `@`.
    Strict,
}

/// Reasons an address cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    /// No address was supplied, or it was the empty string.
    #[error("address is empty")]
    Empty,
    /// The address has no `@` separator.
    #[error("address has no '@' separator")]
    MissingSeparator,
    /// Strict parsing found more than one `@`.
    #[error("address contains {0} '@' separators")]
    MultipleSeparators(usize),
    /// Nothing before the `@`.
    #[error("address has an empty name")]
    EmptyLocalPart,
    /// Nothing after the `@`.
    #[error("address has an empty domain")]
    EmptyDomain,
    /// The domain cannot form the authority of a discovery URL.
    #[error("address domain '{0}' is not a valid host")]
    InvalidDomain(String),
}

/// A parsed Lightning Address.
///
/// # Example
///
/// ```rust
/// use lnurlp::LightningAddress;
///
/// let address: LightningAddress = "alice@pay.example".parse().unwrap();
/// assert_eq!(address.local_part(), "alice");
/// assert_eq!(address.domain(), "pay.example");
/// assert_eq!(address.to_string(), "alice@pay.example");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LightningAddress {
    local_part: String,
    domain: String,
}

impl LightningAddress {
    /// Creates an address from its two parts.
    ///
    /// # Errors
    ///
    /// Returns [`AddressError`] if either part is empty or the domain holds
    /// characters that cannot appear in a URL authority.
    pub fn new(
        local_part: impl Into<String>,
        domain: impl Into<String>,
    ) -> Result<Self, AddressError> {
        let local_part = local_part.into();
        let domain = domain.into();
        if local_part.is_empty() {
            return Err(AddressError::EmptyLocalPart);
        }
        if domain.is_empty() {
            return Err(AddressError::EmptyDomain);
        }
        if domain.contains(FORBIDDEN_DOMAIN_CHARS) || domain.contains(char::is_whitespace) {
            return Err(AddressError::InvalidDomain(domain));
        }
        Ok(Self { local_part, domain })
    }

    /// Parses an address in [`ParseMode::Lenient`] mode.
    ///
    /// # Errors
    ///
    /// Returns [`AddressError`] if the string is empty, has no `@`, or has an
    /// empty name or domain.
    pub fn parse(raw: &str) -> Result<Self, AddressError> {
        Self::parse_with(raw, ParseMode::Lenient)
    }

    /// Parses an address, rejecting anything with more than one `@`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::parse`], plus [`AddressError::MultipleSeparators`].
    pub fn parse_strict(raw: &str) -> Result<Self, AddressError> {
        Self::parse_with(raw, ParseMode::Strict)
    }

    /// Parses an address that may be absent.
    ///
    /// # Errors
    ///
    /// Returns [`AddressError::Empty`] for `None`, otherwise as [`Self::parse_with`].
    pub fn parse_optional(raw: Option<&str>, mode: ParseMode) -> Result<Self, AddressError> {
        Self::parse_with(raw.ok_or(AddressError::Empty)?, mode)
    }

    /// Parses an address with an explicit [`ParseMode`].
    ///
    /// # Errors
    ///
    /// See [`AddressError`].
    pub fn parse_with(raw: &str, mode: ParseMode) -> Result<Self, AddressError> {
        if raw.is_empty() {
            return Err(AddressError::Empty);
        }
        let separators = raw.matches('@').count();
        if separators == 0 {
            return Err(AddressError::MissingSeparator);
        }
        if mode == ParseMode::Strict && separators > 1 {
            return Err(AddressError::MultipleSeparators(separators));
        }

        let mut segments = raw.split('@');
        let local_part = segments.next().unwrap_or_default();
        let domain = segments.next().unwrap_or_default();
        Self::new(local_part, domain)
    }

    /// Returns the part before the `@`.
    #[must_use]
    pub fn local_part(&self) -> &str {
        &self.local_part
    }

    /// Returns the part after the `@`.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }
}

impl fmt::Display for LightningAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.local_part, self.domain)
    }
}

impl FromStr for LightningAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_separator_roundtrips() {
        for raw in [
            "alice@pay.example",
            "a.b-c_d@sub.domain.example",
            "satoshi@127.0.0.1:8080",
            "ÜNI@example.org",
        ] {
            let address = LightningAddress::parse(raw).unwrap();
            assert_eq!(
                format!("{}@{}", address.local_part(), address.domain()),
                raw
            );
            assert_eq!(address.to_string(), raw);
        }
    }

    #[test]
    fn test_missing_separator() {
        assert_eq!(
            LightningAddress::parse("alice.pay.example"),
            Err(AddressError::MissingSeparator)
        );
    }

    #[test]
    fn test_empty_and_absent() {
        assert_eq!(LightningAddress::parse(""), Err(AddressError::Empty));
        assert_eq!(
            LightningAddress::parse_optional(None, ParseMode::Lenient),
            Err(AddressError::Empty)
        );
    }

    #[test]
    fn test_empty_parts() {
        assert_eq!(
            LightningAddress::parse("@pay.example"),
            Err(AddressError::EmptyLocalPart)
        );
        assert_eq!(
            LightningAddress::parse("alice@"),
            Err(AddressError::EmptyDomain)
        );
    }

    #[test]
    fn test_lenient_drops_extra_segments() {
        let address = LightningAddress::parse("alice@pay.example@evil.example").unwrap();
        assert_eq!(address.local_part(), "alice");
        assert_eq!(address.domain(), "pay.example");
    }

    #[test]
    fn test_strict_rejects_extra_segments() {
        assert_eq!(
            LightningAddress::parse_strict("alice@pay.example@evil.example"),
            Err(AddressError::MultipleSeparators(2))
        );
        assert!(LightningAddress::parse_strict("alice@pay.example").is_ok());
    }

    #[test]
    fn test_domain_cannot_inject_path() {
        assert!(matches!(
            LightningAddress::parse("alice@evil.example/steal?"),
            Err(AddressError::InvalidDomain(_))
        ));
        assert!(matches!(
            LightningAddress::parse("alice@pay example"),
            Err(AddressError::InvalidDomain(_))
        ));
    }

    #[test]
    fn test_input_is_not_trimmed() {
        let address = LightningAddress::parse(" alice@pay.example").unwrap();
        assert_eq!(address.local_part(), " alice");
    }
}

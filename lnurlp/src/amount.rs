//! Satoshi amounts.
//!
//! LNURL-pay callbacks take the amount in millisatoshis. [`AmountSats`] only
//! holds positive values no larger than the total bitcoin supply, so the
//! millisatoshi conversion cannot overflow.

use std::fmt;
use std::str::FromStr;

/// Millisatoshis per satoshi.
pub const MSAT_PER_SAT: u64 = 1_000;

/// Upper bound on satoshi amounts: 21 000 000 BTC.
pub const MAX_SATS: u64 = 21_000_000 * 100_000_000;

/// Reasons a value is not a valid [`AmountSats`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    /// Zero or negative.
    #[error("amount must be a positive number of satoshis")]
    NotPositive,
    /// Larger than [`MAX_SATS`].
    #[error("amount of {0} sat exceeds the bitcoin supply")]
    TooLarge(u64),
    /// Not an integer.
    #[error("invalid amount '{0}': expected a whole number of satoshis")]
    Invalid(String),
}

/// A positive amount of satoshis.
///
/// # Example
///
/// ```rust
/// use lnurlp::AmountSats;
///
/// let amount = AmountSats::new(100).unwrap();
/// assert_eq!(amount.to_msat(), 100_000);
/// assert!(AmountSats::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AmountSats(u64);

impl AmountSats {
    /// Creates an amount.
    ///
    /// # Errors
    ///
    /// Returns [`AmountError::NotPositive`] for zero and
    /// [`AmountError::TooLarge`] above [`MAX_SATS`].
    pub const fn new(sats: u64) -> Result<Self, AmountError> {
        if sats == 0 {
            Err(AmountError::NotPositive)
        } else if sats > MAX_SATS {
            Err(AmountError::TooLarge(sats))
        } else {
            Ok(Self(sats))
        }
    }

    /// Returns the amount in satoshis.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns the amount in millisatoshis.
    #[must_use]
    pub const fn to_msat(self) -> u64 {
        self.0 * MSAT_PER_SAT
    }
}

impl fmt::Display for AmountSats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u64> for AmountSats {
    type Error = AmountError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i64> for AmountSats {
    type Error = AmountError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        let sats = u64::try_from(value).map_err(|_| AmountError::NotPositive)?;
        Self::new(sats)
    }
}

impl FromStr for AmountSats {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(digits) = trimmed.strip_prefix('-')
            && !digits.is_empty()
            && digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(AmountError::NotPositive);
        }
        let sats = trimmed
            .parse::<u64>()
            .map_err(|_| AmountError::Invalid(s.to_owned()))?;
        Self::new(sats)
    }
}

impl From<AmountSats> for u64 {
    fn from(amount: AmountSats) -> Self {
        amount.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_msat_conversion() {
        assert_eq!(AmountSats::new(1).unwrap().to_msat(), 1_000);
        assert_eq!(AmountSats::new(100).unwrap().to_msat(), 100_000);
        assert_eq!(
            AmountSats::new(MAX_SATS).unwrap().to_msat(),
            2_100_000_000_000_000_000
        );
    }

    #[test]
    fn test_rejects_non_positive() {
        assert_eq!(AmountSats::new(0), Err(AmountError::NotPositive));
        assert_eq!(AmountSats::try_from(-5_i64), Err(AmountError::NotPositive));
        assert_eq!("0".parse::<AmountSats>(), Err(AmountError::NotPositive));
        assert_eq!("-10".parse::<AmountSats>(), Err(AmountError::NotPositive));
    }

    #[test]
    fn test_rejects_above_supply() {
        assert_eq!(
            AmountSats::new(MAX_SATS + 1),
            Err(AmountError::TooLarge(MAX_SATS + 1))
        );
    }

    #[test]
    fn test_rejects_non_numeric() {
        assert!(matches!("ten".parse::<AmountSats>(), Err(AmountError::Invalid(_))));
        assert!(matches!("1.5".parse::<AmountSats>(), Err(AmountError::Invalid(_))));
        assert!(matches!("".parse::<AmountSats>(), Err(AmountError::Invalid(_))));
    }

    #[test]
    fn test_parses_with_whitespace() {
        assert_eq!(" 21 ".parse::<AmountSats>().unwrap().get(), 21);
    }
}

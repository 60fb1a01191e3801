//! Resolver configuration.

use serde::{Deserialize, Serialize};

use crate::address::ParseMode;

/// Behaviour switches for [`Resolver`](crate::Resolver).
///
/// # Example
///
/// ```rust
/// use lnurlp::ResolverConfig;
///
/// let config = ResolverConfig {
///     strict_addresses: true,
///     ..ResolverConfig::default()
/// };
/// assert_eq!(config.discovery_scheme(), "https");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Build discovery URLs with `http://` instead of `https://`.
    ///
    /// Only meant for local development servers and tests.
    pub allow_insecure_http: bool,

    /// Refuse to call the callback when the amount lies outside the
    /// advertised `minSendable..=maxSendable` range.
    pub enforce_sendable_range: bool,

    /// Reject addresses with more than one `@` instead of dropping the
    /// extra segments.
    pub strict_addresses: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            allow_insecure_http: false,
            enforce_sendable_range: true,
            strict_addresses: false,
        }
    }
}

impl ResolverConfig {
    /// Returns the URL scheme used for discovery requests.
    #[must_use]
    pub const fn discovery_scheme(&self) -> &'static str {
        if self.allow_insecure_http {
            "http"
        } else {
            "https"
        }
    }

    /// Returns the address parsing mode.
    #[must_use]
    pub const fn parse_mode(&self) -> ParseMode {
        if self.strict_addresses {
            ParseMode::Strict
        } else {
            ParseMode::Lenient
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ResolverConfig::default();
        assert_eq!(config.discovery_scheme(), "https");
        assert_eq!(config.parse_mode(), ParseMode::Lenient);
        assert!(config.enforce_sendable_range);
    }

    #[test]
    fn test_partial_deserialize_keeps_defaults() {
        let config: ResolverConfig =
            serde_json::from_str(r#"{"allow_insecure_http": true}"#).unwrap();
        assert_eq!(config.discovery_scheme(), "http");
        assert!(config.enforce_sendable_range);
        assert!(!config.strict_addresses);
    }
}

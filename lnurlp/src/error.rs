//! Error types for Lightning Address resolution.
//!
//! Every failure surfaces to the caller as one [`ResolveError`]. Its
//! [`Display`](std::fmt::Display) output is the human-readable message, and
//! [`ResolveError::kind`] lets collaborators tell network failures apart from
//! protocol failures.

use std::fmt;
use std::sync::Arc;

use crate::address::AddressError;
use crate::transport::TransportError;

/// Message for any malformed or missing address.
pub const INVALID_ADDRESS: &str = "Invalid Lightning Address";
/// Message when the discovery document cannot be fetched.
pub const METADATA_FETCH_FAILED: &str = "Could not fetch LNURL metadata";
/// Default message for `status: "ERROR"` discovery documents without a reason.
pub const METADATA_ERROR: &str = "LNURL error";
/// Message when the discovery document has no callback.
pub const MISSING_CALLBACK: &str = "No LNURL callback found";
/// Message when the callback is not a valid URL.
pub const INVALID_CALLBACK: &str = "Invalid LNURL callback URL";
/// Message when the discovery body is not a JSON document of the expected shape.
pub const INVALID_METADATA: &str = "Invalid LNURL metadata response";
/// Message when the discovery document is tagged as another LNURL flow.
pub const NOT_PAY_REQUEST: &str = "LNURL service is not a payRequest";
/// Message when the invoice cannot be fetched.
pub const INVOICE_FETCH_FAILED: &str = "Could not fetch invoice";
/// Default message for `status: "ERROR"` invoice responses without a reason.
pub const INVOICE_ERROR: &str = "Invoice error";
/// Message when the callback response has no `pr`.
pub const MISSING_INVOICE: &str = "No invoice received from server";
/// Message when the callback body is not a JSON document of the expected shape.
pub const INVALID_INVOICE: &str = "Invalid LNURL invoice response";
/// Message when an attempt stopped without producing an outcome.
pub const RESOLUTION_ABORTED: &str = "Invoice resolution stopped unexpectedly";

/// Coarse classification of a [`ResolveError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Local input problem; no request was made.
    InvalidAddress,
    /// Transport failure or non-2xx status.
    Network,
    /// The service answered but signalled failure or omitted a required field.
    Protocol,
}

impl ErrorKind {
    /// Stable lowercase identifier, suitable for log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidAddress => "invalid_address",
            Self::Network => "network",
            Self::Protocol => "protocol",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Underlying cause of a [`ResolveError::Network`].
#[derive(Debug, thiserror::Error)]
pub enum NetworkCause {
    /// The request never produced a response.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The service answered with a non-2xx status.
    #[error("unexpected HTTP status {0}")]
    Status(u16),
}

/// A failed resolution attempt.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ResolveError {
    /// Malformed or missing address; no network call was made.
    #[error("{message}")]
    InvalidAddress {
        /// Human-readable message.
        message: String,
        /// What was wrong with the address.
        #[source]
        source: AddressError,
    },

    /// Transport failure or non-2xx HTTP status at either stage.
    #[error("{message}")]
    Network {
        /// Human-readable message.
        message: String,
        /// Transport error or offending status.
        #[source]
        source: Option<Arc<NetworkCause>>,
    },

    /// The service signalled failure or its response is unusable.
    #[error("{message}")]
    Protocol {
        /// Human-readable message, usually the service's `reason`.
        message: String,
    },
}

impl ResolveError {
    /// Creates an invalid-address error with the standard message.
    #[must_use]
    pub fn invalid_address(source: AddressError) -> Self {
        Self::InvalidAddress {
            message: INVALID_ADDRESS.to_owned(),
            source,
        }
    }

    /// Creates a network error.
    #[must_use]
    pub fn network(message: impl Into<String>, cause: NetworkCause) -> Self {
        Self::Network {
            message: message.into(),
            source: Some(Arc::new(cause)),
        }
    }

    /// Creates a protocol error.
    #[must_use]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Creates a protocol error from a service `reason`, falling back to
    /// `default` when the reason is absent or empty.
    #[must_use]
    pub fn service_reason(reason: Option<String>, default: &str) -> Self {
        let message = reason
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| default.to_owned());
        Self::protocol(message)
    }

    /// Returns the error classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidAddress { .. } => ErrorKind::InvalidAddress,
            Self::Network { .. } => ErrorKind::Network,
            Self::Protocol { .. } => ErrorKind::Protocol,
        }
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidAddress { message, .. }
            | Self::Network { message, .. }
            | Self::Protocol { message } => message,
        }
    }

    /// Returns `true` for failures a caller could reasonably try again.
    ///
    /// Nothing in this crate retries; the flag is informational.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_display_is_message_verbatim() {
        let err = ResolveError::protocol("service down");
        assert_eq!(err.to_string(), "service down");
        assert_eq!(err.message(), "service down");
        assert_eq!(err.kind(), ErrorKind::Protocol);
    }

    #[test]
    fn test_invalid_address_keeps_source() {
        let err = ResolveError::invalid_address(AddressError::MissingSeparator);
        assert_eq!(err.to_string(), INVALID_ADDRESS);
        assert_eq!(err.kind(), ErrorKind::InvalidAddress);
        assert_eq!(
            err.source().map(ToString::to_string).as_deref(),
            Some("address has no '@' separator")
        );
    }

    #[test]
    fn test_network_source_chain() {
        let err = ResolveError::network(METADATA_FETCH_FAILED, NetworkCause::Status(503));
        assert_eq!(err.to_string(), METADATA_FETCH_FAILED);
        assert!(err.is_retryable());
        assert_eq!(
            err.source().map(ToString::to_string).as_deref(),
            Some("unexpected HTTP status 503")
        );
    }

    #[test]
    fn test_service_reason_fallback() {
        assert_eq!(
            ResolveError::service_reason(Some("amount too low".into()), INVOICE_ERROR).to_string(),
            "amount too low"
        );
        assert_eq!(
            ResolveError::service_reason(Some(String::new()), INVOICE_ERROR).to_string(),
            INVOICE_ERROR
        );
        assert_eq!(
            ResolveError::service_reason(None, METADATA_ERROR).to_string(),
            METADATA_ERROR
        );
    }

    #[test]
    fn test_kind_identifiers() {
        assert_eq!(ErrorKind::InvalidAddress.to_string(), "invalid_address");
        assert_eq!(ErrorKind::Network.as_str(), "network");
        assert!(!ResolveError::protocol("x").is_retryable());
    }
}

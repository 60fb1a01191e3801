//! Terminal result of a resolution attempt.

use std::fmt;

use lnurlp_proto::LIGHTNING_URI_SCHEME;

use crate::error::{ErrorKind, ResolveError};

/// A resolved `lightning:<bolt11>` URI.
///
/// The invoice itself is not decoded or verified.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedInvoice {
    uri: String,
}

impl ResolvedInvoice {
    /// Wraps a raw bolt11 payment request.
    #[must_use]
    pub fn from_payment_request(pr: &str) -> Self {
        Self {
            uri: format!("{LIGHTNING_URI_SCHEME}{pr}"),
        }
    }

    /// Returns the full `lightning:` URI.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.uri
    }

    /// Returns the bolt11 payment request without the URI scheme.
    #[must_use]
    pub fn payment_request(&self) -> &str {
        &self.uri[LIGHTNING_URI_SCHEME.len()..]
    }

    /// Consumes the invoice and returns the URI.
    #[must_use]
    pub fn into_uri(self) -> String {
        self.uri
    }
}

impl fmt::Display for ResolvedInvoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)
    }
}

impl AsRef<str> for ResolvedInvoice {
    fn as_ref(&self) -> &str {
        &self.uri
    }
}

/// Exactly one of a resolved invoice or a classified error.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// The invoice was resolved.
    Resolved(ResolvedInvoice),
    /// Resolution failed.
    Failed(ResolveError),
}

impl Outcome {
    /// Returns `true` for [`Outcome::Resolved`].
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// Returns the invoice, if resolved.
    #[must_use]
    pub const fn invoice(&self) -> Option<&ResolvedInvoice> {
        match self {
            Self::Resolved(invoice) => Some(invoice),
            Self::Failed(_) => None,
        }
    }

    /// Returns the error, if failed.
    #[must_use]
    pub const fn error(&self) -> Option<&ResolveError> {
        match self {
            Self::Resolved(_) => None,
            Self::Failed(error) => Some(error),
        }
    }

    /// Returns the error classification, if failed.
    #[must_use]
    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error().map(ResolveError::kind)
    }

    /// Returns the text a renderer shows: the invoice URI or the error message.
    #[must_use]
    pub fn display_text(&self) -> &str {
        match self {
            Self::Resolved(invoice) => invoice.as_str(),
            Self::Failed(error) => error.message(),
        }
    }

    /// Converts into a `Result`.
    ///
    /// # Errors
    ///
    /// Returns the [`ResolveError`] of a failed outcome.
    pub fn into_result(self) -> Result<ResolvedInvoice, ResolveError> {
        self.into()
    }
}

impl From<Result<ResolvedInvoice, ResolveError>> for Outcome {
    fn from(result: Result<ResolvedInvoice, ResolveError>) -> Self {
        match result {
            Ok(invoice) => Self::Resolved(invoice),
            Err(error) => Self::Failed(error),
        }
    }
}

impl From<Outcome> for Result<ResolvedInvoice, ResolveError> {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Resolved(invoice) => Ok(invoice),
            Outcome::Failed(error) => Err(error),
        }
    }
}

//! Async transport seam for LNURL requests.
//!
//! The resolver only ever issues plain `GET` requests and needs the status
//! code plus the raw body. Interpreting both is the resolver's job, so
//! implementations stay thin: the `lnurlp-http` crate wraps `reqwest`, tests
//! use an in-memory route table.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use url::Url;

/// A boxed, sendable future.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A boxed, sendable error.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Raw response returned by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body bytes.
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Creates a response.
    #[must_use]
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns `true` for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Errors a transport can report. None of them carry a response.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// A connection to the service could not be established.
    #[error("connection failed: {0}")]
    Connect(#[source] BoxError),

    /// The request failed for another reason (TLS, redirect loop, ...).
    #[error("request failed: {0}")]
    Request(#[source] BoxError),

    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    Body(#[source] BoxError),

    /// The response body exceeded the configured limit.
    #[error("response body exceeds {limit} bytes")]
    BodyTooLarge {
        /// Maximum accepted body size.
        limit: usize,
    },
}

/// Issues `GET` requests on behalf of the resolver.
///
/// Implementations must not follow LNURL semantics themselves: a non-2xx
/// status is a successful transport call and is returned as a
/// [`TransportResponse`].
pub trait LnurlTransport: Send + Sync {
    /// Performs `GET url`.
    fn get<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, Result<TransportResponse, TransportError>>;
}

impl<T: LnurlTransport + ?Sized> LnurlTransport for Arc<T> {
    fn get<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, Result<TransportResponse, TransportError>> {
        (**self).get(url)
    }
}

impl<T: LnurlTransport + ?Sized> LnurlTransport for Box<T> {
    fn get<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, Result<TransportResponse, TransportError>> {
        (**self).get(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        assert!(TransportResponse::new(200, "").is_success());
        assert!(TransportResponse::new(204, "").is_success());
        assert!(!TransportResponse::new(199, "").is_success());
        assert!(!TransportResponse::new(301, "").is_success());
        assert!(!TransportResponse::new(404, "").is_success());
        assert!(!TransportResponse::new(500, "").is_success());
    }
}

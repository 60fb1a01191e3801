//! Error types for building an [`HttpTransport`](crate::HttpTransport).

/// Errors that can occur while constructing the transport.
#[derive(Debug, thiserror::Error)]
pub enum HttpTransportError {
    /// The underlying `reqwest` client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The configured `User-Agent` is not a valid header value.
    #[error("invalid user agent: {0}")]
    UserAgent(#[source] reqwest::header::InvalidHeaderValue),
}

//! [`LnurlTransport`] over `reqwest`.

use std::fmt::Display;
use std::time::Duration;

use lnurlp::transport::BoxFuture;
use lnurlp::{LnurlTransport, Resolver, TransportError, TransportResponse};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use url::Url;

#[cfg(feature = "telemetry")]
use tracing::{Span, instrument};

use crate::constants::{
    ACCEPT_JSON, DEFAULT_MAX_BODY_BYTES, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, MAX_REDIRECTS,
};
use crate::error::HttpTransportError;

/// Configuration for [`HttpTransport`].
#[derive(Clone)]
pub struct HttpTransportConfig {
    /// Per-request timeout.
    pub timeout: Duration,

    /// `User-Agent` header value.
    pub user_agent: String,

    /// Extra headers sent with every request.
    pub headers: HeaderMap,

    /// Largest accepted response body, in bytes.
    pub max_body_bytes: usize,

    /// Optional pre-configured reqwest client. If `None`, a new client is
    /// created with a bounded redirect policy.
    pub http_client: Option<reqwest::Client>,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            headers: HeaderMap::new(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            http_client: None,
        }
    }
}

impl HttpTransportConfig {
    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the `User-Agent`.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Attaches extra headers to all requests.
    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Sets the response size limit.
    #[must_use]
    pub const fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    /// Sets a pre-configured reqwest client.
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl std::fmt::Debug for HttpTransportConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransportConfig")
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("headers", &self.headers.len())
            .field("max_body_bytes", &self.max_body_bytes)
            .field("has_http_client", &self.http_client.is_some())
            .finish()
    }
}

/// HTTP transport for LNURL requests.
///
/// Non-2xx responses are returned as-is; classifying them is the resolver's
/// job.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    headers: HeaderMap,
    timeout: Duration,
    max_body_bytes: usize,
}

impl HttpTransport {
    /// Creates a transport from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpTransportError`] if the user agent is not a valid header
    /// value or the client cannot be built.
    pub fn new(config: HttpTransportConfig) -> Result<Self, HttpTransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_JSON));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).map_err(HttpTransportError::UserAgent)?,
        );
        headers.extend(config.headers);

        let client = match config.http_client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
                .build()
                .map_err(HttpTransportError::Client)?,
        };

        Ok(Self {
            client,
            headers,
            timeout: config.timeout,
            max_body_bytes: config.max_body_bytes,
        })
    }

    /// Creates a [`Resolver`] over a new transport with default resolver settings.
    ///
    /// # Errors
    ///
    /// See [`Self::new`].
    pub fn resolver(config: HttpTransportConfig) -> Result<Resolver<Self>, HttpTransportError> {
        Self::new(config).map(Resolver::new)
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the headers sent with every request.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "lnurlp.http.get",
            skip_all,
            fields(
                url = %url,
                http.status_code = tracing::field::Empty,
                otel.status_code = tracing::field::Empty,
                error.message = tracing::field::Empty,
            )
        )
    )]
    async fn fetch(&self, url: &Url) -> Result<TransportResponse, TransportError> {
        let result = self.fetch_inner(url).await;
        record_result_on_span(&result);
        result
    }

    async fn fetch_inner(&self, url: &Url) -> Result<TransportResponse, TransportError> {
        let mut response = self
            .client
            .get(url.clone())
            .headers(self.headers.clone())
            .timeout(self.timeout)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status().as_u16();
        let limit = self.max_body_bytes;
        let declared_limit = u64::try_from(limit).unwrap_or(u64::MAX);
        if response
            .content_length()
            .is_some_and(|len| len > declared_limit)
        {
            return Err(TransportError::BodyTooLarge { limit });
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(map_body_error)? {
            if body.len() + chunk.len() > limit {
                return Err(TransportError::BodyTooLarge { limit });
            }
            body.extend_from_slice(&chunk);
        }

        Ok(TransportResponse::new(status, body))
    }
}

impl LnurlTransport for HttpTransport {
    fn get<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, Result<TransportResponse, TransportError>> {
        Box::pin(self.fetch(url))
    }
}

fn map_send_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connect(Box::new(err))
    } else {
        TransportError::Request(Box::new(err))
    }
}

fn map_body_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Body(Box::new(err))
    }
}

/// Records the outcome of a request on a tracing span, including status and errors.
#[cfg(feature = "telemetry")]
fn record_result_on_span<E: Display>(result: &Result<TransportResponse, E>) {
    let span = Span::current();
    match result {
        Ok(response) => {
            span.record("http.status_code", response.status);
            span.record("otel.status_code", "OK");
        }
        Err(err) => {
            span.record("otel.status_code", "ERROR");
            span.record("error.message", tracing::field::display(err));
            tracing::event!(tracing::Level::WARN, error = %err, "LNURL request failed");
        }
    }
}

/// Records the outcome of a request on a tracing span, including status and errors.
/// Noop if telemetry feature is off.
#[cfg(not(feature = "telemetry"))]
fn record_result_on_span<E: Display>(_result: &Result<TransportResponse, E>) {}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn url(server: &MockServer, p: &str) -> Url {
        format!("{}{p}", server.uri()).parse().unwrap()
    }

    #[tokio::test]
    async fn test_returns_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/x"))
            .and(header("accept", "application/json"))
            .and(header("user-agent", DEFAULT_USER_AGENT))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"ok\":1}"))
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::new(HttpTransportConfig::default()).unwrap();
        let response = transport.get(&url(&server, "/x")).await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, b"{\"ok\":1}");
    }

    #[tokio::test]
    async fn test_non_success_status_is_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(HttpTransportConfig::default()).unwrap();
        let response = transport.get(&url(&server, "/x")).await.unwrap();
        assert_eq!(response.status, 503);
        assert!(!response.is_success());
    }

    #[tokio::test]
    async fn test_custom_headers_sent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("x-api-key", "secret"))
            .and(header("user-agent", "wallet/2"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", HeaderValue::from_static("secret"));
        let config = HttpTransportConfig::default()
            .with_headers(headers)
            .with_user_agent("wallet/2");
        let transport = HttpTransport::new(config).unwrap();
        assert_eq!(transport.get(&url(&server, "/")).await.unwrap().status, 200);
    }

    #[tokio::test]
    async fn test_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let config = HttpTransportConfig::default().with_timeout(Duration::from_millis(50));
        let transport = HttpTransport::new(config).unwrap();
        let err = transport.get(&url(&server, "/slow")).await.unwrap_err();
        assert!(matches!(err, TransportError::Timeout), "{err:?}");
    }

    #[tokio::test]
    async fn test_body_size_limit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("x".repeat(100)))
            .mount(&server)
            .await;

        let config = HttpTransportConfig::default().with_max_body_bytes(16);
        let transport = HttpTransport::new(config).unwrap();
        let err = transport.get(&url(&server, "/big")).await.unwrap_err();
        assert!(matches!(err, TransportError::BodyTooLarge { limit: 16 }));
    }

    #[test]
    fn test_invalid_user_agent() {
        let config = HttpTransportConfig::default().with_user_agent("bad\nagent");
        assert!(matches!(
            HttpTransport::new(config),
            Err(HttpTransportError::UserAgent(_))
        ));
    }
}

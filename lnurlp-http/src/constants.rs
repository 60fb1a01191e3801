//! Transport defaults.

use std::time::Duration;

/// Per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum number of redirects followed per request.
pub const MAX_REDIRECTS: usize = 10;

/// Largest accepted response body (1 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// `User-Agent` sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("lnurlp/", env!("CARGO_PKG_VERSION"));

/// `Accept` header value for LNURL endpoints.
pub const ACCEPT_JSON: &str = "application/json";

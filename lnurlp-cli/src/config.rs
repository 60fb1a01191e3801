//! CLI configuration file.
//!
//! Loads settings from a TOML file with support for environment variable
//! expansion in string values. Variables use `$VAR` or `${VAR}` syntax.
//!
//! # Example Configuration
//!
//! ```toml
//! timeout_secs = 10
//! user_agent = "my-wallet/1.0"
//! max_body_bytes = 1048576
//!
//! [headers]
//! x-api-key = "$LNURLP_API_KEY"
//!
//! [resolver]
//! allow_insecure_http = false
//! enforce_sendable_range = true
//! strict_addresses = false
//! ```
//!
//! # Environment Variables
//!
//! - `LNURLP_CONFIG` - Path to configuration file (default: `lnurlp.toml`)
//! - Header values referenced by `$VAR` in the config file

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use lnurlp::ResolverConfig;
use lnurlp_http::HttpTransportConfig;
use lnurlp_http::constants::{DEFAULT_MAX_BODY_BYTES, DEFAULT_TIMEOUT};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};

/// Default configuration file name.
pub const DEFAULT_CONFIG_PATH: &str = "lnurlp.toml";

/// Errors raised while loading [`CliConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// Offending path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for [`CliConfig`].
    #[error("invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// A `[headers]` entry is not a valid HTTP header.
    #[error("invalid header '{0}'")]
    Header(String),
}

/// Top-level CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// `User-Agent` override.
    pub user_agent: Option<String>,

    /// Largest accepted response body, in bytes.
    pub max_body_bytes: usize,

    /// Extra headers sent with every request.
    pub headers: BTreeMap<String, String>,

    /// Resolver behaviour.
    pub resolver: ResolverConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            user_agent: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            headers: BTreeMap::new(),
            resolver: ResolverConfig::default(),
        }
    }
}

impl CliConfig {
    /// Loads configuration from `path`.
    ///
    /// A missing file yields the defaults. `$VAR` / `${VAR}` references are
    /// expanded from the process environment before parsing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Self::from_toml(&expand_env_vars(&content, |name| std::env::var(name).ok()))
    }

    /// Parses configuration from a TOML string without env expansion.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] on invalid input.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Builds the HTTP transport configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Header`] if a header name or value is invalid.
    pub fn transport_config(&self) -> Result<HttpTransportConfig, ConfigError> {
        let mut headers = HeaderMap::new();
        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ConfigError::Header(name.clone()))?;
            let header_value =
                HeaderValue::from_str(value).map_err(|_| ConfigError::Header(name.clone()))?;
            headers.insert(header_name, header_value);
        }

        let mut config = HttpTransportConfig::default()
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_max_body_bytes(self.max_body_bytes)
            .with_headers(headers);
        if let Some(user_agent) = &self.user_agent {
            config = config.with_user_agent(user_agent);
        }
        Ok(config)
    }
}

/// Expands `$VAR` and `${VAR}` references using `lookup`.
///
/// Unresolved references, and a `$` not followed by a name, are kept verbatim.
pub fn expand_env_vars(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        let (name, consumed) = if let Some(braced) = after.strip_prefix('{') {
            match braced.find('}') {
                Some(end) => (&braced[..end], end + 2),
                None => ("", 0),
            }
        } else {
            let end = after
                .find(|c: char| !c.is_ascii_alphanumeric() && c != '_')
                .unwrap_or(after.len());
            (&after[..end], end)
        };

        let reference = &rest[pos..=pos + consumed];
        match lookup(name) {
            Some(value) if !name.is_empty() => out.push_str(&value),
            _ => out.push_str(reference),
        }
        rest = &rest[pos + 1 + consumed..];
    }

    out.push_str(rest);
    out
}

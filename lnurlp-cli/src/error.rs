//! CLI error types.

use lnurlp::ResolveError;
use lnurlp_http::HttpTransportError;

use crate::config::ConfigError;

/// Anything that makes the `lnurlp` binary exit with a failure.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The HTTP transport could not be built.
    #[error(transparent)]
    Transport(#[from] HttpTransportError),

    /// Resolution failed.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Interrupted by Ctrl-C.
    #[error("interrupted")]
    Interrupted,
}

impl CliError {
    /// Stable identifier for JSON output.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Transport(_) => "transport",
            Self::Resolve(error) => error.kind().as_str(),
            Self::Interrupted => "interrupted",
        }
    }
}

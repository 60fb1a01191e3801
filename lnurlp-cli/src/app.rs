//! Wiring between arguments, configuration and the resolver.

use lnurlp::{ResolvedInvoice, ResolveObserver, TracingObserver};
use lnurlp_http::{HttpResolver, HttpTransport};
use serde::Serialize;

use crate::cli::Cli;
use crate::config::CliConfig;
use crate::error::CliError;

/// Loads the configuration named by `cli` and applies its overrides.
///
/// # Errors
///
/// Returns [`CliError::Config`] if the file cannot be loaded.
pub fn load_config(cli: &Cli) -> Result<CliConfig, CliError> {
    let mut config = CliConfig::load_from(&cli.config)?;
    cli.apply(&mut config);
    Ok(config)
}

/// Builds an HTTP-backed resolver reporting to `observer`.
///
/// # Errors
///
/// Returns [`CliError`] if headers or the HTTP client are invalid.
pub fn build_resolver(
    config: &CliConfig,
    observer: impl ResolveObserver + 'static,
) -> Result<HttpResolver, CliError> {
    let transport = HttpTransport::new(config.transport_config()?)?;
    Ok(HttpResolver::new(transport)
        .with_config(config.resolver)
        .with_observer(observer))
}

/// Resolves the invoice described by `cli`.
///
/// # Errors
///
/// Returns [`CliError`] on configuration or resolution failure.
pub async fn execute(cli: &Cli) -> Result<ResolvedInvoice, CliError> {
    let config = load_config(cli)?;
    tracing::debug!(
        config = %cli.config.display(),
        timeout_secs = config.timeout_secs,
        insecure_http = config.resolver.allow_insecure_http,
        "Loaded configuration"
    );

    let resolver = build_resolver(&config, TracingObserver)?;
    let invoice = resolver
        .resolve(Some(&cli.address), cli.amount_sats, cli.comment.as_deref())
        .await?;
    Ok(invoice)
}

/// JSON rendering of a run.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Report {
    /// Resolved invoice.
    Ok {
        /// `lightning:` URI.
        invoice: String,
    },
    /// Failure.
    Error {
        /// Error classification.
        kind: &'static str,
        /// Human-readable message.
        message: String,
    },
}

impl Report {
    /// Builds a report from a run result.
    #[must_use]
    pub fn from_result(result: &Result<ResolvedInvoice, CliError>) -> Self {
        match result {
            Ok(invoice) => Self::Ok {
                invoice: invoice.to_string(),
            },
            Err(error) => Self::Error {
                kind: error.kind(),
                message: error.to_string(),
            },
        }
    }
}

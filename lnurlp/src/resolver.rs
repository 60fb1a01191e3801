//! The LNURL-pay resolution pipeline.
//!
//! [`Resolver::resolve`] runs the three stages strictly in sequence:
//!
//! 1. [`Resolver::parse_address`] - local, no I/O
//! 2. [`Resolver::fetch_metadata`] - `GET /.well-known/lnurlp/<name>`
//! 3. [`Resolver::request_invoice`] - `GET <callback>?amount=<msat>[&comment=..]`
//!
//! The first error stops the pipeline and is returned unchanged. A resolver
//! holds no per-attempt state, so identical inputs against identical
//! responses always produce identical results.

use std::fmt;
use std::sync::Arc;

use lnurlp_proto::{InvoiceResponse, PayRequest};
use url::Url;

#[cfg(feature = "telemetry")]
use tracing::instrument;

use crate::address::{AddressError, LightningAddress};
use crate::amount::AmountSats;
use crate::config::ResolverConfig;
use crate::endpoint::{InvoiceRequestParams, discovery_url};
use crate::error::{
    INVALID_CALLBACK, INVALID_INVOICE, INVALID_METADATA, INVOICE_ERROR, INVOICE_FETCH_FAILED,
    METADATA_ERROR, METADATA_FETCH_FAILED, MISSING_CALLBACK, MISSING_INVOICE, NOT_PAY_REQUEST,
    NetworkCause, ResolveError,
};
use crate::hooks::{NoopObserver, ResolveContext, ResolveObserver};
use crate::outcome::{Outcome, ResolvedInvoice};
use crate::transport::LnurlTransport;

/// Validated discovery document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceMetadata {
    /// Invoice callback.
    pub callback: Url,
    /// Comment length limit; `None` when comments are not accepted.
    pub comment_allowed: Option<u64>,
    /// Advertised `(minSendable, maxSendable)` in millisatoshis.
    pub sendable_msat: Option<(u64, u64)>,
    /// `text/plain` description from the `metadata` field.
    pub description: Option<String>,
}

impl ServiceMetadata {
    /// Validates a decoded discovery document.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Protocol`] when the service reported an error,
    /// is not a pay service, or has no usable callback.
    pub fn from_pay_request(pay: PayRequest) -> Result<Self, ResolveError> {
        if pay.is_error() {
            return Err(ResolveError::service_reason(pay.reason, METADATA_ERROR));
        }
        if !pay.is_pay_request() {
            return Err(ResolveError::protocol(NOT_PAY_REQUEST));
        }
        let callback = pay
            .require_callback()
            .map_err(|_| ResolveError::protocol(MISSING_CALLBACK))?;
        let callback = Url::parse(callback).map_err(|_| ResolveError::protocol(INVALID_CALLBACK))?;

        Ok(Self {
            callback,
            comment_allowed: pay.comment_allowed(),
            sendable_msat: pay.sendable_range(),
            description: pay.description(),
        })
    }
}

/// Resolves Lightning Addresses into invoices over an [`LnurlTransport`].
///
/// # Example
///
/// ```no_run
/// # async fn example<T: lnurlp::LnurlTransport>(transport: T) {
/// use lnurlp::{AmountSats, Resolver};
///
/// let resolver = Resolver::new(transport);
/// let amount = AmountSats::new(100).unwrap();
/// match resolver.resolve(Some("alice@pay.example"), amount, Some("thanks")).await {
///     Ok(invoice) => println!("{invoice}"),
///     Err(error) => eprintln!("{error}"),
/// }
/// # }
/// ```
pub struct Resolver<T> {
    transport: T,
    config: ResolverConfig,
    observer: Arc<dyn ResolveObserver>,
}

impl<T> fmt::Debug for Resolver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("config", &self.config)
            .field("observer", &self.observer)
            .finish_non_exhaustive()
    }
}

impl<T: LnurlTransport> Resolver<T> {
    /// Creates a resolver with the default configuration and no observer.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            config: ResolverConfig::default(),
            observer: Arc::new(NoopObserver),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub const fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Installs an observer.
    #[must_use]
    pub fn with_observer(mut self, observer: impl ResolveObserver + 'static) -> Self {
        self.observer = Arc::new(observer);
        self
    }

    /// Installs a shared observer.
    #[must_use]
    pub fn with_shared_observer(mut self, observer: Arc<dyn ResolveObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Returns the configuration.
    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Returns the transport.
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Parses an address according to the configured [`ParseMode`](crate::address::ParseMode).
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::InvalidAddress`] for missing or malformed input.
    pub fn parse_address(&self, raw: Option<&str>) -> Result<LightningAddress, ResolveError> {
        LightningAddress::parse_optional(raw, self.config.parse_mode())
            .map_err(ResolveError::invalid_address)
    }

    /// Fetches and validates the discovery document for `address`.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::InvalidAddress`] if no discovery URL can be built
    /// - [`ResolveError::Network`] on transport failure or non-2xx status
    /// - [`ResolveError::Protocol`] if the document is unusable
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "lnurlp.fetch_metadata", skip_all, fields(%address), err)
    )]
    pub async fn fetch_metadata(
        &self,
        address: &LightningAddress,
    ) -> Result<ServiceMetadata, ResolveError> {
        let url = discovery_url(address, self.config.discovery_scheme()).map_err(|_| {
            ResolveError::invalid_address(AddressError::InvalidDomain(address.domain().to_owned()))
        })?;
        let body = self.get_ok(&url, METADATA_FETCH_FAILED).await?;
        let pay =
            PayRequest::from_slice(&body).map_err(|_| ResolveError::protocol(INVALID_METADATA))?;
        let metadata = ServiceMetadata::from_pay_request(pay)?;
        self.observer.on_metadata(address, &metadata);
        Ok(metadata)
    }

    /// Requests an invoice from the service's callback.
    ///
    /// Returns the raw bolt11 payment request.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::Protocol`] if the amount is outside the advertised
    ///   range (when enforced), or the response is unusable
    /// - [`ResolveError::Network`] on transport failure or non-2xx status
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "lnurlp.request_invoice",
            skip_all,
            fields(callback = %metadata.callback, amount_sats = amount.get()),
            err
        )
    )]
    pub async fn request_invoice(
        &self,
        metadata: &ServiceMetadata,
        amount: AmountSats,
        comment: Option<&str>,
    ) -> Result<String, ResolveError> {
        let params = InvoiceRequestParams::new(amount, comment, metadata.comment_allowed);
        if self.config.enforce_sendable_range
            && let Some((min, max)) = metadata.sendable_msat
            && !(min..=max).contains(&params.amount_msat)
        {
            return Err(ResolveError::protocol(format!(
                "Amount {} msat is outside the sendable range {min}-{max} msat",
                params.amount_msat
            )));
        }

        let url = params.callback_url(&metadata.callback);
        let body = self.get_ok(&url, INVOICE_FETCH_FAILED).await?;
        let invoice =
            InvoiceResponse::from_slice(&body).map_err(|_| ResolveError::protocol(INVALID_INVOICE))?;
        if invoice.is_error() {
            return Err(ResolveError::service_reason(invoice.reason, INVOICE_ERROR));
        }
        let pr = invoice
            .require_pr()
            .map_err(|_| ResolveError::protocol(MISSING_INVOICE))?;
        Ok(pr.to_owned())
    }

    /// Runs the full pipeline and returns the `lightning:` URI.
    ///
    /// The observer sees `on_start` followed by exactly one of
    /// `on_resolved` / `on_failed`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ResolveError`] raised by any stage.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "lnurlp.resolve", skip_all, fields(amount_sats = amount.get()))
    )]
    pub async fn resolve(
        &self,
        address: Option<&str>,
        amount: AmountSats,
        comment: Option<&str>,
    ) -> Result<ResolvedInvoice, ResolveError> {
        let ctx = ResolveContext {
            address,
            amount,
            comment,
        };
        self.observer.on_start(&ctx);

        let result = self.run(address, amount, comment).await;
        match &result {
            Ok(invoice) => self.observer.on_resolved(&ctx, invoice),
            Err(error) => self.observer.on_failed(&ctx, error),
        }
        result
    }

    /// Same as [`Self::resolve`], folded into an [`Outcome`].
    pub async fn resolve_outcome(
        &self,
        address: Option<&str>,
        amount: AmountSats,
        comment: Option<&str>,
    ) -> Outcome {
        self.resolve(address, amount, comment).await.into()
    }

    async fn run(
        &self,
        address: Option<&str>,
        amount: AmountSats,
        comment: Option<&str>,
    ) -> Result<ResolvedInvoice, ResolveError> {
        let address = self.parse_address(address)?;
        let metadata = self.fetch_metadata(&address).await?;
        let pr = self.request_invoice(&metadata, amount, comment).await?;
        Ok(ResolvedInvoice::from_payment_request(&pr))
    }

    /// Issues `GET url` and returns the body of a 2xx response.
    async fn get_ok(&self, url: &Url, failure: &'static str) -> Result<Vec<u8>, ResolveError> {
        let response = self
            .transport
            .get(url)
            .await
            .map_err(|e| ResolveError::network(failure, NetworkCause::Transport(e)))?;
        if !response.is_success() {
            return Err(ResolveError::network(
                failure,
                NetworkCause::Status(response.status),
            ));
        }
        Ok(response.body)
    }
}

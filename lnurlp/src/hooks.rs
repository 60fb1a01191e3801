//! Observers for the resolution lifecycle.
//!
//! The resolver never logs on its own. Diagnostics are delivered to an
//! injected [`ResolveObserver`] at four points:
//!
//! - **start**: a resolution attempt begins
//! - **metadata**: the discovery document was fetched and validated
//! - **resolved**: the attempt produced an invoice
//! - **failed**: the attempt produced an error
//!
//! Exactly one of `on_resolved` / `on_failed` runs per attempt. Observers
//! only observe: they cannot change the outcome.

use std::fmt::Debug;

use crate::address::LightningAddress;
use crate::amount::AmountSats;
use crate::error::ResolveError;
use crate::outcome::ResolvedInvoice;
use crate::resolver::ServiceMetadata;

/// Inputs of one resolution attempt, as seen by observers.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    /// Raw address as supplied by the caller.
    pub address: Option<&'a str>,
    /// Requested amount.
    pub amount: AmountSats,
    /// Payer comment as supplied, before truncation.
    pub comment: Option<&'a str>,
}

/// Lifecycle callbacks for [`Resolver`](crate::Resolver).
///
/// All methods default to no-ops; implement only what you need.
pub trait ResolveObserver: Send + Sync + Debug {
    /// Called when an attempt begins.
    fn on_start(&self, _ctx: &ResolveContext<'_>) {}

    /// Called once the discovery document has been validated.
    fn on_metadata(&self, _address: &LightningAddress, _metadata: &ServiceMetadata) {}

    /// Called when the attempt resolved an invoice.
    fn on_resolved(&self, _ctx: &ResolveContext<'_>, _invoice: &ResolvedInvoice) {}

    /// Called when the attempt failed.
    fn on_failed(&self, _ctx: &ResolveContext<'_>, _error: &ResolveError) {}
}

/// Observer that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ResolveObserver for NoopObserver {}

/// Observer that reports through `tracing`.
///
/// Failures are logged at `ERROR` with the error kind and message, successes
/// at `INFO`, intermediate steps at `DEBUG`.
#[cfg(feature = "telemetry")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

#[cfg(feature = "telemetry")]
impl ResolveObserver for TracingObserver {
    fn on_start(&self, ctx: &ResolveContext<'_>) {
        tracing::debug!(
            address = ctx.address.unwrap_or_default(),
            amount_sats = ctx.amount.get(),
            has_comment = ctx.comment.is_some_and(|c| !c.is_empty()),
            "lnurlp.resolve.start"
        );
    }

    fn on_metadata(&self, address: &LightningAddress, metadata: &ServiceMetadata) {
        tracing::debug!(
            %address,
            callback = %metadata.callback,
            comment_allowed = metadata.comment_allowed,
            "lnurlp.resolve.metadata"
        );
    }

    fn on_resolved(&self, ctx: &ResolveContext<'_>, invoice: &ResolvedInvoice) {
        tracing::info!(
            address = ctx.address.unwrap_or_default(),
            amount_sats = ctx.amount.get(),
            invoice_len = invoice.payment_request().len(),
            "lnurlp.resolve.resolved"
        );
    }

    fn on_failed(&self, ctx: &ResolveContext<'_>, error: &ResolveError) {
        tracing::error!(
            address = ctx.address.unwrap_or_default(),
            kind = %error.kind(),
            error = %error,
            "Error fetching invoice"
        );
    }
}

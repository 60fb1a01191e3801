#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Lightning Address resolution for the LNURL-pay protocol.
//!
//! Turns a human-readable Lightning Address (`name@domain`, LUD-16) into a
//! payable `lightning:<bolt11>` URI by running the LNURL-pay flow (LUD-06)
//! with the optional payer comment extension (LUD-12):
//!
//! 1. parse the address ([`address`])
//! 2. fetch the discovery document from `/.well-known/lnurlp/<name>`
//! 3. call the advertised callback with `amount` (and `comment`)
//! 4. classify the result into exactly one [`Outcome`]
//!
//! Network I/O goes through the [`LnurlTransport`] trait so the pipeline can
//! be driven by any HTTP client. The `lnurlp-http` crate provides a `reqwest`
//! implementation.
//!
//! # Modules
//!
//! - [`address`] - Lightning Address parsing
//! - [`amount`] - Satoshi amounts and millisatoshi conversion
//! - [`attempt`] - Snapshot keys and staleness tracking for resolution attempts
//! - [`config`] - Resolver configuration
//! - [`endpoint`] - Discovery and callback URL construction
//! - [`error`] - Error taxonomy surfaced to callers
//! - [`hooks`] - Injected observers for logging and diagnostics
//! - [`outcome`] - Terminal result of a resolution attempt
//! - [`resolver`] - The resolution pipeline
//! - [`session`] - Collaborator-facing driver that discards stale results
//! - [`transport`] - Async transport seam
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing instrumentation and [`hooks::TracingObserver`]

pub mod address;
pub mod amount;
pub mod attempt;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod hooks;
pub mod outcome;
pub mod resolver;
pub mod session;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use address::{AddressError, LightningAddress, ParseMode};
pub use amount::{AmountError, AmountSats};
pub use attempt::{AttemptKey, AttemptTicket, AttemptTracker};
pub use config::ResolverConfig;
pub use error::{ErrorKind, ResolveError};
#[cfg(feature = "telemetry")]
pub use hooks::TracingObserver;
pub use hooks::{NoopObserver, ResolveContext, ResolveObserver};
pub use outcome::{Outcome, ResolvedInvoice};
pub use resolver::{Resolver, ServiceMetadata};
pub use session::{InvoiceSession, SessionState};
pub use transport::{LnurlTransport, TransportError, TransportResponse};

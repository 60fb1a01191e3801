//! Wire format types for the LNURL-pay protocol.
//!
//! This crate defines the serialization-level data structures exchanged with
//! an LNURL-pay service while resolving a Lightning Address. It has minimal
//! dependencies (only `serde` and `serde_json`) and is shared by the resolver
//! core and the HTTP transport.
//!
//! # Modules
//!
//! - [`pay`] - Discovery document returned by `/.well-known/lnurlp/<name>` (LUD-06, LUD-12, LUD-16)
//! - [`invoice`] - Callback response carrying the bolt11 payment request
//! - [`helpers`] - Lenient number decoding and `metadata` string parsing

pub mod helpers;
pub mod invoice;
pub mod pay;

use serde::{Deserialize, Serialize};

pub use invoice::InvoiceResponse;
pub use pay::PayRequest;

/// Tag value a discovery document carries for LNURL-pay services.
pub const PAY_REQUEST_TAG: &str = "payRequest";

/// Well-known discovery path prefix for Lightning Addresses (LUD-16).
pub const WELL_KNOWN_LNURLP_PATH: &str = "/.well-known/lnurlp/";

/// URI scheme prepended to bolt11 payment requests for wallets and QR codes.
pub const LIGHTNING_URI_SCHEME: &str = "lightning:";

/// The `status` field shared by every LNURL response document.
///
/// Services signal failure with `{"status": "ERROR", "reason": "..."}`.
/// Any value other than `"OK"` or `"ERROR"` decodes to [`LnurlStatus::Unknown`]
/// so that an unexpected status never fails the whole document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LnurlStatus {
    /// `"OK"`
    #[serde(rename = "OK")]
    Ok,
    /// `"ERROR"`
    #[serde(rename = "ERROR")]
    Error,
    /// Any other value.
    #[serde(other)]
    Unknown,
}

/// Errors that can occur when decoding LNURL protocol documents.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// A required field is missing from the JSON data.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// JSON deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

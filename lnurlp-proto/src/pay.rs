//! LNURL-pay discovery document.
//!
//! Returned by `GET https://<domain>/.well-known/lnurlp/<name>` (LUD-16) or
//! by decoding a bech32 `lnurl` (LUD-06). Only `callback` is required for an
//! invoice request; every other field is optional on the wire.

use serde::{Deserialize, Serialize};

use crate::helpers::{lenient, lenient_u64, text_plain_description};
use crate::{LnurlStatus, PAY_REQUEST_TAG, ProtocolError};

/// Service metadata describing how to request an invoice.
///
/// # Example
///
/// ```rust
/// use lnurlp_proto::PayRequest;
///
/// let body = br#"{"tag":"payRequest","callback":"https://pay.example/cb","commentAllowed":20}"#;
/// let pay = PayRequest::from_slice(body).unwrap();
/// assert_eq!(pay.callback.as_deref(), Some("https://pay.example/cb"));
/// assert_eq!(pay.comment_allowed(), Some(20));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayRequest {
    /// Response status. Absent on most successful responses.
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<LnurlStatus>,

    /// Human-readable failure reason, set alongside `status: "ERROR"`.
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub reason: Option<String>,

    /// LNURL tag, `"payRequest"` for pay services.
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub tag: Option<String>,

    /// URL the invoice request is sent to.
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub callback: Option<String>,

    /// Maximum comment length accepted by the callback (LUD-12).
    #[serde(
        default,
        deserialize_with = "lenient_u64",
        skip_serializing_if = "Option::is_none"
    )]
    pub comment_allowed: Option<u64>,

    /// Minimum amount in millisatoshis.
    #[serde(
        default,
        deserialize_with = "lenient_u64",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_sendable: Option<u64>,

    /// Maximum amount in millisatoshis.
    #[serde(
        default,
        deserialize_with = "lenient_u64",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_sendable: Option<u64>,

    /// Stringified JSON array of `[mime, content]` pairs.
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub metadata: Option<String>,
}

impl PayRequest {
    /// Decodes a discovery document from raw JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Json`] if the body is not a JSON object of
    /// the expected shape.
    pub fn from_slice(body: &[u8]) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Returns `true` if the service reported `status: "ERROR"`.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.status == Some(LnurlStatus::Error)
    }

    /// Returns `true` if the tag is absent or `"payRequest"`.
    #[must_use]
    pub fn is_pay_request(&self) -> bool {
        self.tag.as_deref().is_none_or(|tag| tag == PAY_REQUEST_TAG)
    }

    /// Returns the callback if it is present and non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::MissingField`] when no usable callback exists.
    pub fn require_callback(&self) -> Result<&str, ProtocolError> {
        self.callback
            .as_deref()
            .filter(|cb| !cb.is_empty())
            .ok_or(ProtocolError::MissingField("callback"))
    }

    /// Returns the comment length limit if the service accepts comments.
    ///
    /// A limit of zero means comments are not supported and yields `None`.
    #[must_use]
    pub fn comment_allowed(&self) -> Option<u64> {
        self.comment_allowed.filter(|&n| n > 0)
    }

    /// Returns the `(min, max)` sendable range in millisatoshis when both
    /// bounds are advertised.
    #[must_use]
    pub fn sendable_range(&self) -> Option<(u64, u64)> {
        Some((self.min_sendable?, self.max_sendable?))
    }

    /// Returns the `text/plain` entry of [`Self::metadata`], if any.
    #[must_use]
    pub fn description(&self) -> Option<String> {
        self.metadata.as_deref().and_then(text_plain_description)
    }
}

//! LNURL-pay callback response.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::helpers::lenient;
use crate::{LnurlStatus, ProtocolError};

/// Response returned by `GET <callback>?amount=<msat>`.
///
/// `pr` is the bolt11 payment request. `routes` is deprecated by LUD-06 but
/// still sent (usually empty) by many services.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceResponse {
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

    /// Bolt11 payment request.
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub pr: Option<String>,

    /// Deprecated route hints.
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub routes: Option<Vec<Value>>,

    /// LUD-09 success action, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_action: Option<Value>,
}

impl InvoiceResponse {
    /// Decodes a callback response from raw JSON bytes.
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

    /// Returns the payment request if it is present and non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::MissingField`] when `pr` is absent or empty.
    pub fn require_pr(&self) -> Result<&str, ProtocolError> {
        self.pr
            .as_deref()
            .filter(|pr| !pr.is_empty())
            .ok_or(ProtocolError::MissingField("pr"))
    }
}

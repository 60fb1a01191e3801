//! Discovery and callback URL construction.

use lnurlp_proto::WELL_KNOWN_LNURLP_PATH;
use url::Url;

use crate::address::LightningAddress;
use crate::amount::AmountSats;

/// Builds `<scheme>://<domain>/.well-known/lnurlp/<name>`.
///
/// The local part is percent-encoded as a single path component.
///
/// # Errors
///
/// Returns [`url::ParseError`] if the domain is not a valid host.
pub fn discovery_url(address: &LightningAddress, scheme: &str) -> Result<Url, url::ParseError> {
    let name = urlencoding::encode(address.local_part());
    Url::parse(&format!(
        "{scheme}://{}{WELL_KNOWN_LNURLP_PATH}{name}",
        address.domain()
    ))
}

/// Returns at most `max_chars` leading characters of `comment`.
#[must_use]
pub fn truncate_comment(comment: &str, max_chars: u64) -> &str {
    let max_chars = usize::try_from(max_chars).unwrap_or(usize::MAX);
    comment
        .char_indices()
        .nth(max_chars)
        .map_or(comment, |(end, _)| &comment[..end])
}

/// Query parameters for the invoice callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceRequestParams {
    /// Amount in millisatoshis.
    pub amount_msat: u64,
    /// Comment, already truncated to the service's limit.
    pub comment: Option<String>,
}

impl InvoiceRequestParams {
    /// Builds the parameters for an amount and an optional comment.
    ///
    /// The comment is kept only when the service accepts comments
    /// (`comment_allowed > 0`) and the comment is non-empty; it is then
    /// truncated to `comment_allowed` characters.
    #[must_use]
    pub fn new(amount: AmountSats, comment: Option<&str>, comment_allowed: Option<u64>) -> Self {
        let comment = match (comment, comment_allowed) {
            (Some(text), Some(limit)) if limit > 0 && !text.is_empty() => {
                Some(truncate_comment(text, limit).to_owned())
            }
            _ => None,
        };
        Self {
            amount_msat: amount.to_msat(),
            comment,
        }
    }

    /// Appends `amount` (and `comment`) to a copy of `callback`.
    ///
    /// Query parameters already present on the callback are preserved.
    #[must_use]
    pub fn callback_url(&self, callback: &Url) -> Url {
        let mut url = callback.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("amount", &self.amount_msat.to_string());
            if let Some(comment) = &self.comment {
                query.append_pair("comment", comment);
            }
        }
        url
    }
}

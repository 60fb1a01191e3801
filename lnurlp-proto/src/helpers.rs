//! Utility functions for LNURL protocol documents.
//!
//! LNURL services are untrusted third parties and disagree on number
//! encodings, so optional fields are decoded leniently: a value of the wrong
//! type is treated as absent instead of failing the whole document.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::ProtocolError;

/// Deserializes an optional field, decoding a mistyped value as `None`.
///
/// # Errors
///
/// Only fails if the underlying deserializer cannot produce a JSON value.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Deserializes an optional non-negative integer, tolerating odd encodings.
///
/// - integers `>= 0` decode as-is
/// - positive floats are truncated towards zero (`20.9` → `20`)
/// - numeric strings (`"255"`) are parsed
/// - negatives, `null`, and anything else decode as `None`
///
/// # Errors
///
/// Only fails if the underlying deserializer cannot produce a JSON value.
pub fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_as_u64))
}

/// Converts a JSON value into a non-negative integer if it represents one.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn value_as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            let f = n.as_f64()?;
            (f.is_finite() && f >= 0.0).then(|| f.trunc() as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}

/// Parses the LUD-06 `metadata` field.
///
/// The field is a JSON *string* containing an array of `[mime, content]`
/// pairs, e.g. `"[[\"text/plain\",\"Pay alice\"]]"`. Entries that are not
/// two-element string arrays are skipped.
///
/// # Errors
///
/// Returns [`ProtocolError::Json`] if the string is not a JSON array.
pub fn parse_metadata(metadata: &str) -> Result<Vec<(String, String)>, ProtocolError> {
    let entries: Vec<Value> = serde_json::from_str(metadata)?;
    Ok(entries
        .into_iter()
        .filter_map(|entry| match entry {
            Value::Array(pair) if pair.len() == 2 => {
                let mime = pair[0].as_str()?.to_owned();
                let content = pair[1].as_str()?.to_owned();
                Some((mime, content))
            }
            _ => None,
        })
        .collect())
}

/// Returns the `text/plain` description from a LUD-06 `metadata` string.
#[must_use]
pub fn text_plain_description(metadata: &str) -> Option<String> {
    parse_metadata(metadata)
        .ok()?
        .into_iter()
        .find(|(mime, _)| mime == "text/plain")
        .map(|(_, content)| content)
}

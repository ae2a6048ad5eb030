//! Wire id patterns.

use std::borrow::Cow;

use chrono::{DateTime, TimeZone, Utc};

use crate::app::ApiParseError;
use crate::domain::{Category, Item, Subscription};
use crate::sync::wire::NumberOrString;

/// `feed/<id>` to `<id>`.
pub fn subscription_id(wire_id: &str) -> Result<&str, ApiParseError> {
    wire_id
        .strip_prefix(Subscription::ADDRESS_PREFIX)
        .ok_or_else(|| malformed("subscription", wire_id))
}

/// `user/-/label/<label>` to `<label>`.
pub fn category_label(wire_id: &str) -> Result<&str, ApiParseError> {
    wire_id
        .strip_prefix(Category::ID_PREFIX)
        .ok_or_else(|| malformed("category", wire_id))
}

/// `tag:google.com,2005:reader/item/<id>` to `<id>`.
pub fn item_id(wire_id: &str) -> Result<&str, ApiParseError> {
    wire_id
        .strip_prefix(Item::ID_PREFIX)
        .ok_or_else(|| malformed("item", wire_id))
}

/// Item refs may use the long form, the short form, or the signed decimal
/// form that content responses render as 16 hex digits.
pub fn ref_id(wire_id: &str) -> Cow<'_, str> {
    if let Some(short) = wire_id.strip_prefix(Item::ID_PREFIX) {
        return Cow::Borrowed(short);
    }
    match decimal(wire_id) {
        Some(value) => Cow::Owned(format!("{:016x}", value)),
        None => Cow::Borrowed(wire_id),
    }
}

/// The form an id is sent in to the content endpoint.
///
/// Bare hex ids can be all digits, so they go out in the long form to keep
/// servers from reading them as decimal.
pub fn content_request_id(id: &str) -> Cow<'_, str> {
    if id.len() == 16 && id.bytes().all(|b| b.is_ascii_hexdigit()) {
        Cow::Owned(format!("{}{}", Item::ID_PREFIX, id))
    } else {
        Cow::Borrowed(id)
    }
}

fn decimal(id: &str) -> Option<u64> {
    let digits = id.strip_prefix('-').unwrap_or(id);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    id.parse::<i64>()
        .map(|value| value as u64)
        .or_else(|_| id.parse::<u64>())
        .ok()
}

/// Label tags name categories; everything else (`user/-/state/...`) is a state marker.
pub fn is_label(tag: &str) -> bool {
    tag.starts_with(Category::ID_PREFIX)
}

pub fn millis(
    field: &'static str,
    value: &NumberOrString,
) -> Result<DateTime<Utc>, ApiParseError> {
    value
        .as_i64()
        .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
        .ok_or_else(|| ApiParseError::InvalidTimestamp {
            field,
            value: value.to_string(),
        })
}

fn malformed(kind: &'static str, id: &str) -> ApiParseError {
    ApiParseError::MalformedId {
        kind,
        id: id.to_string(),
    }
}

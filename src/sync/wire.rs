//! JSON shapes of the reader API responses.

use serde::Deserialize;

use crate::app::ApiParseError;

#[derive(Debug, Deserialize)]
pub struct SubscriptionList {
    pub subscriptions: Vec<WireSubscription>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireSubscription {
    pub id: String,
    pub title: String,
    pub url: String,
    pub html_url: String,
    pub icon_url: String,
    pub categories: Vec<WireTag>,
}

#[derive(Debug, Deserialize)]
pub struct TagList {
    pub tags: Vec<WireTag>,
}

#[derive(Debug, Deserialize)]
pub struct WireTag {
    pub id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRefs {
    pub item_refs: Vec<WireItemRef>,
    #[serde(default)]
    pub continuation: Option<NumberOrString>,
}

#[derive(Debug, Deserialize)]
pub struct WireItemRef {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct ItemContents {
    pub items: Vec<WireItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireItem {
    pub id: String,
    pub title: String,
    pub canonical: Vec<WireLink>,
    pub alternate: Vec<WireLink>,
    pub published: NumberOrString,
    pub updated: NumberOrString,
    pub crawl_time_msec: NumberOrString,
    pub summary: WireSummary,
    pub author: String,
    pub categories: Vec<String>,
    pub origin: WireOrigin,
}

#[derive(Debug, Deserialize)]
pub struct WireLink {
    pub href: String,
}

#[derive(Debug, Deserialize)]
pub struct WireSummary {
    pub content: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireOrigin {
    pub stream_id: String,
}

/// Integers that some services quote and others don't.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumberOrString {
    Number(i64),
    String(String),
}

impl NumberOrString {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::String(s) => s.trim().parse().ok(),
        }
    }

    pub fn continuation(&self) -> Result<i64, ApiParseError> {
        self.as_i64()
            .ok_or_else(|| ApiParseError::InvalidContinuation(self.to_string()))
    }
}

impl std::fmt::Display for NumberOrString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::String(s) => write!(f, "{}", s),
        }
    }
}

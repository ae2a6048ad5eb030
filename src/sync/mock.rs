//! Scripted transport for engine tests.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};
use url::Url;

use crate::app::{Result, TributaryError};
use crate::domain::Item;
use crate::fetcher::Transport;

type Responder = Box<dyn Fn(&Url) -> Option<Result<String>> + Send + Sync>;

/// Answers each request with the first responder that claims it and records
/// every URL. Unclaimed requests fail with a 404.
#[derive(Default)]
pub struct MockTransport {
    responders: Vec<Responder>,
    requests: Mutex<Vec<Url>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on<F>(mut self, responder: F) -> Self
    where
        F: Fn(&Url) -> Option<Result<String>> + Send + Sync + 'static,
    {
        self.responders.push(Box::new(responder));
        self
    }

    /// Answer `path_suffix` requests with a fixed JSON body.
    pub fn on_path(self, path_suffix: &'static str, body: Value) -> Self {
        self.on(move |url| url.path().ends_with(path_suffix).then(|| Ok(body.to_string())))
    }

    pub fn requests(&self) -> Vec<Url> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, path_suffix: &str) -> usize {
        self.requests()
            .iter()
            .filter(|url| url.path().ends_with(path_suffix))
            .count()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get_json(&self, url: &Url) -> Result<String> {
        self.requests.lock().unwrap().push(url.clone());
        self.responders
            .iter()
            .find_map(|responder| responder(url))
            .unwrap_or_else(|| {
                Err(TributaryError::HttpStatus {
                    status: 404,
                    body: url.to_string(),
                })
            })
    }
}

/// All values of query parameter `key`.
pub fn param(url: &Url, key: &str) -> Vec<String> {
    url.query_pairs()
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
        .collect()
}

pub fn is_unread_only(url: &Url) -> bool {
    !param(url, "xt").is_empty()
}

pub fn subscription_json(id: &str, title: &str, labels: &[&str]) -> Value {
    json!({
        "id": format!("feed/{}", id),
        "title": title,
        "url": format!("https://{}.example.com/rss", id),
        "htmlUrl": format!("https://{}.example.com/", id),
        "iconUrl": format!("https://{}.example.com/favicon.ico", id),
        "categories": labels
            .iter()
            .map(|l| json!({ "id": format!("user/-/label/{}", l), "label": l }))
            .collect::<Vec<_>>(),
    })
}

pub fn item_json(id: &str, subscription_id: &str, categories: &[&str]) -> Value {
    json!({
        "id": format!("tag:google.com,2005:reader/item/{}", id),
        "title": format!("Title {}", id),
        "canonical": [{ "href": format!("https://example.com/{}", id) }],
        "alternate": [{ "href": format!("https://example.com/{}?alt", id), "type": "text/html" }],
        "published": "1700000000000",
        "updated": "1700000001000",
        "crawlTimeMsec": "1700000002000",
        "summary": { "direction": "ltr", "content": format!("<p>Summary {}</p>", id) },
        "author": "Jane",
        "categories": categories,
        "origin": { "streamId": format!("feed/{}", subscription_id), "title": "Example" },
    })
}

pub fn item_refs_json(ids: &[&str], continuation: Option<i64>) -> Value {
    let mut body = json!({
        "itemRefs": ids.iter().map(|id| json!({ "id": id })).collect::<Vec<_>>(),
    });
    if let Some(c) = continuation {
        body["continuation"] = json!(c);
    }
    body
}

/// Content responder that returns one item from `subscription_id` per requested id.
pub fn contents_for(subscription_id: &'static str) -> impl Fn(&Url) -> Option<Result<String>> {
    move |url| {
        url.path().ends_with("/stream/items/contents").then(|| {
            let items: Vec<Value> = param(url, "i")
                .iter()
                .map(|id| id.strip_prefix(Item::ID_PREFIX).unwrap_or(id))
                .map(|id| item_json(id, subscription_id, &[]))
                .collect();
            Ok(json!({ "items": items }).to_string())
        })
    }
}

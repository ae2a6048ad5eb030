use chrono::{DateTime, Utc};
use url::Url;

use crate::app::Result;

const API_PATH: &str = "/reader/api/0";

/// Stream whose items are excluded to list only unread items.
pub const READ_STATE: &str = "user/-/state/com.google/read";

/// URL builder for the reader API of one service.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    pub fn new(base_url: &str) -> Result<Self> {
        let base = base_url.trim_end_matches('/').to_string();
        Url::parse(&base)?;
        Ok(Self { base })
    }

    pub fn subscription_list(&self) -> Result<Url> {
        self.endpoint("/subscription/list")
    }

    pub fn tag_list(&self) -> Result<Url> {
        self.endpoint("/tag/list")
    }

    pub fn item_ids(
        &self,
        feed_address: &str,
        unread_only: bool,
        limit: u32,
        older_than: Option<DateTime<Utc>>,
        continuation: Option<i64>,
    ) -> Result<Url> {
        let mut url = self.endpoint("/stream/items/ids")?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("s", feed_address);
            if unread_only {
                query.append_pair("xt", READ_STATE);
            }
            query.append_pair("n", &limit.to_string());
            query.append_pair("r", "d");
            if let Some(older_than) = older_than {
                query.append_pair("ot", &older_than.timestamp_millis().to_string());
            }
            if let Some(code) = continuation {
                query.append_pair("c", &code.to_string());
            }
        }
        Ok(url)
    }

    pub fn item_contents<I>(&self, ids: I) -> Result<Url>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.endpoint("/stream/items/contents")?;
        url.query_pairs_mut()
            .extend_pairs(ids.into_iter().map(|id| ("i", id)));
        Ok(url)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}{}", self.base, API_PATH, path))?;
        url.query_pairs_mut().append_pair("output", "json");
        Ok(url)
    }
}

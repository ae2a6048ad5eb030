use serde::{Deserialize, Serialize};

/// A Google Reader compatible sync service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReaderService {
    pub base_url: String,
    pub title: Option<String>,
}

impl ReaderService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.base_url)
    }
}

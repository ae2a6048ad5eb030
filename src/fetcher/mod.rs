pub mod http_fetcher;

use async_trait::async_trait;
use url::Url;

use crate::app::Result;

pub use http_fetcher::HttpTransport;

/// An authenticated requester for the reader API.
///
/// Implementations return the response body of a 2xx answer, fail with
/// [`TributaryError::HttpStatus`](crate::app::TributaryError::HttpStatus) on any
/// other status, and with a transport error when the server cannot be reached.
/// Timeouts and credentials are the implementation's business.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get_json(&self, url: &Url) -> Result<String>;
}

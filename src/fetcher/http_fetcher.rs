use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use url::Url;

use crate::app::{Result, TributaryError};
use crate::fetcher::Transport;

const AUTHORIZATION_PREFIX: &str = "GoogleLogin auth=";

pub struct HttpTransport {
    client: Client,
    auth_token: Option<String>,
}

impl HttpTransport {
    pub fn new(timeout: Duration, user_agent: &str, auth_token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client, auth_token })
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        if let Some(token) = &self.auth_token {
            let value = HeaderValue::from_str(&format!("{}{}", AUTHORIZATION_PREFIX, token))
                .map_err(|_| {
                    TributaryError::Config("auth token is not a valid header value".into())
                })?;
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_json(&self, url: &Url) -> Result<String> {
        let response = self
            .client
            .get(url.as_str())
            .headers(self.headers()?)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TributaryError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transport(token: Option<&str>) -> HttpTransport {
        HttpTransport::new(
            Duration::from_secs(5),
            "tributary/test",
            token.map(String::from),
        )
        .unwrap()
    }

    fn endpoint(server: &MockServer, suffix: &str) -> Url {
        Url::parse(&format!("{}{}", server.uri(), suffix)).unwrap()
    }

    #[test]
    fn test_authorization_header() {
        let headers = transport(Some("secret")).headers().unwrap();
        assert_eq!(headers[AUTHORIZATION], "GoogleLogin auth=secret");
    }

    #[test]
    fn test_no_token_no_header() {
        assert!(transport(None).headers().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_token_rejected() {
        assert!(matches!(
            transport(Some("bad\ntoken")).headers(),
            Err(TributaryError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_success_returns_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reader/api/0/tag/list"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"tags":[]}"#))
            .mount(&mock_server)
            .await;

        let body = transport(None)
            .get_json(&endpoint(&mock_server, "/reader/api/0/tag/list?output=json"))
            .await
            .unwrap();

        assert_eq!(body, r#"{"tags":[]}"#);
    }

    #[tokio::test]
    async fn test_authorization_header_sent() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("authorization", "GoogleLogin auth=secret"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let body = transport(Some("secret"))
            .get_json(&endpoint(&mock_server, "/reader/api/0/subscription/list"))
            .await
            .unwrap();

        assert_eq!(body, "{}");
    }

    #[tokio::test]
    async fn test_http_401() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
            .mount(&mock_server)
            .await;

        let err = transport(Some("expired"))
            .get_json(&endpoint(&mock_server, "/reader/api/0/tag/list"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            TributaryError::HttpStatus { status: 401, ref body } if body == "Unauthorized"
        ));
        assert!(err.is_auth_failure());
    }

    #[tokio::test]
    async fn test_http_500() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("backend down"))
            .mount(&mock_server)
            .await;

        let err = transport(None)
            .get_json(&endpoint(&mock_server, "/reader/api/0/tag/list"))
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(500));
        assert!(!err.is_auth_failure());
        assert!(matches!(
            err,
            TributaryError::HttpStatus { ref body, .. } if body == "backend down"
        ));
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        let mock_server = MockServer::start().await;
        let url = endpoint(&mock_server, "/reader/api/0/tag/list");
        drop(mock_server);

        let err = transport(None).get_json(&url).await.unwrap_err();

        assert!(matches!(err, TributaryError::Transport(_)));
        assert_eq!(err.status(), None);
    }
}

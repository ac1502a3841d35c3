//! HTTP seam between the GitHub client and the network.
//!
//! The client only issues GETs through [`HttpTransport`]; unit tests swap in
//! an in-memory transport that replays scripted responses per URL.

use async_trait::async_trait;
use thiserror::Error;

/// Header pairs in the order they were sent or received.
pub type HttpHeaders = Vec<(String, String)>;

/// An outgoing GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: HttpHeaders,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HttpHeaders::new(),
        }
    }

    /// Append a header.
    #[must_use]
    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }
}

/// A fully buffered response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HttpHeaders,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// First value of `name`, ignoring ASCII case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        header_get(&self.headers, name)
    }

    /// 2xx, including GitHub's 202 "statistics pending".
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failures below the HTTP layer: nothing came back to classify.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("connection failed: {0}")]
    Transport(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("no scripted response for GET {url}")]
    NoMockResponse { url: String },
}

#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, request: HttpRequest) -> Result<HttpResponse, HttpError>;
}

/// First value of `name` in `headers`, ignoring ASCII case.
#[must_use]
pub fn header_get<'a>(headers: &'a HttpHeaders, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find_map(|(k, v)| k.eq_ignore_ascii_case(name).then_some(v.as_str()))
}

#[cfg(feature = "github")]
pub mod reqwest_transport {
    use std::time::Duration;

    use super::*;

    /// Transport backed by a shared `reqwest::Client` with a fixed deadline
    /// on every request.
    #[derive(Clone)]
    pub struct ReqwestTransport {
        client: reqwest::Client,
    }

    impl ReqwestTransport {
        pub fn with_timeout(timeout: Duration) -> Result<Self, HttpError> {
            reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .map(|client| Self { client })
                .map_err(|e| HttpError::Transport(e.to_string()))
        }
    }

    fn classify(e: reqwest::Error) -> HttpError {
        if e.is_timeout() {
            HttpError::Timeout(e.to_string())
        } else {
            HttpError::Transport(e.to_string())
        }
    }

    #[async_trait]
    impl HttpTransport for ReqwestTransport {
        async fn get(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
            let response = request
                .headers
                .iter()
                .fold(self.client.get(&request.url), |req, (k, v)| {
                    req.header(k.as_str(), v.as_str())
                })
                .send()
                .await
                .map_err(classify)?;

            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|v| (name.as_str().to_string(), v.to_string()))
                })
                .collect();
            let body = response.bytes().await.map_err(classify)?.to_vec();

            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        }
    }
}

#[cfg(test)]
pub(crate) use mock::MockTransport;


#[cfg(test)]
mod tests {
    use super::*;

    const COMMITS: &str = "https://api.test/repos/o/r/commits?per_page=100&page=1";

    fn ok(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: vec![("X-RateLimit-Remaining".to_string(), "4999".to_string())],
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_request_builder_keeps_header_order() {
        let request = HttpRequest::get(COMMITS)
            .header("Accept", "application/vnd.github+json")
            .header("Authorization", "Bearer t");

        assert_eq!(request.url, COMMITS);
        assert_eq!(request.headers[0].0, "Accept");
        assert_eq!(header_get(&request.headers, "authorization"), Some("Bearer t"));
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let response = ok("[]");
        assert_eq!(response.header("x-ratelimit-remaining"), Some("4999"));
        assert_eq!(response.header("X-RATELIMIT-REMAINING"), Some("4999"));
        assert_eq!(response.header("link"), None);
    }

    #[test]
    fn test_success_range_includes_accepted() {
        let mut response = ok("");
        for (status, success) in [(200, true), (202, true), (204, true), (304, false), (403, false)] {
            response.status = status;
            assert_eq!(response.is_success(), success, "status {status}");
        }
    }

    #[tokio::test]
    async fn test_mock_replays_in_order_and_records_requests() {
        let transport = MockTransport::new();
        transport.push_response(COMMITS, ok("[1]"));
        transport.push_error(COMMITS, HttpError::Timeout("slow".to_string()));

        let request = HttpRequest::get(COMMITS);
        let first = transport.get(request.clone()).await.expect("scripted");
        assert_eq!(first.body, b"[1]");

        let second = transport.get(request.clone()).await;
        assert!(matches!(second, Err(HttpError::Timeout(_))));

        let third = transport.get(request).await;
        assert!(matches!(third, Err(HttpError::NoMockResponse { ref url }) if url == COMMITS));

        assert_eq!(transport.requests().len(), 3);
    }

    #[test]
    #[cfg(feature = "github")]
    fn test_reqwest_transport_builds_with_timeout() {
        assert!(
            reqwest_transport::ReqwestTransport::with_timeout(std::time::Duration::from_secs(1))
                .is_ok()
        );
    }

    #[tokio::test]
    #[cfg(feature = "github")]
    async fn test_reqwest_transport_rejects_invalid_url() {
        let transport =
            reqwest_transport::ReqwestTransport::with_timeout(std::time::Duration::from_secs(1))
                .expect("client");
        let err = transport
            .get(HttpRequest::get("not a url"))
            .await
            .expect_err("invalid url");
        assert!(matches!(err, HttpError::Transport(_)));
    }
}

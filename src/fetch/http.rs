// src/fetch/http.rs
// =============================================================================
// Fetches documents over HTTP.
//
// Key functionality:
// - One GET request per URL, the whole body read as text
// - Non-2xx responses count as failures (a 404 page is not a chapter)
// - reqwest errors are sorted into FetchError variants
//
// Rust concepts:
// - async/await: For concurrent network I/O
// - Traits: HttpFetcher implements the Fetch trait from mod.rs
// =============================================================================

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::Fetch;
use crate::error::FetchError;

/// Fetcher backed by a shared reqwest client.
///
/// Client is reference counted internally, so cloning an HttpFetcher (or
/// sharing it behind an Arc) reuses one connection pool for every task.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(concat!("wordrank/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| categorize_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // A timeout while streaming the body is still a timeout.
        response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout { url: url.to_string() }
            } else {
                FetchError::Body {
                    url: url.to_string(),
                    reason: e.to_string(),
                }
            }
        })
    }
}

// Sorts a reqwest send error into one of our failure kinds
fn categorize_error(url: &str, error: reqwest::Error) -> FetchError {
    let url = url.to_string();

    if error.is_timeout() {
        FetchError::Timeout { url }
    } else if error.is_connect() {
        FetchError::Connect {
            url,
            reason: error.to_string(),
        }
    } else if error.is_redirect() {
        FetchError::Other {
            url,
            reason: "too many redirects".to_string(),
        }
    } else {
        FetchError::Other {
            url,
            reason: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ch01.md"))
            .respond_with(ResponseTemplate::new(200).set_body_string("The Cat sat."))
            .mount(&server)
            .await;

        let body = fetcher()
            .fetch(&format!("{}/ch01.md", server.uri()))
            .await
            .unwrap();
        assert_eq!(body, "The Cat sat.");
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing.md"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let url = format!("{}/missing.md", server.uri());
        let err = fetcher().fetch(&url).await.unwrap_err();
        assert_eq!(err, FetchError::Status { url, status: 404 });
    }

    #[tokio::test]
    async fn test_slow_server_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("late")
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(Duration::from_millis(200)).unwrap();
        let url = format!("{}/slow.md", server.uri());
        let err = fetcher.fetch(&url).await.unwrap_err();
        assert_eq!(err, FetchError::Timeout { url });
    }

    #[tokio::test]
    async fn test_unreachable_host_is_error() {
        // Port 9 (discard) on localhost is not listening in test environments.
        let url = "http://127.0.0.1:9/ch01.md";
        let err = fetcher().fetch(url).await.unwrap_err();
        assert_eq!(err.url(), url);
    }
}

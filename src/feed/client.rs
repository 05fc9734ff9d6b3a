//! Fetch client for the posts endpoint
//!
//! One GET per page: `<base>?_page=<page>&_limit=<limit>`. No retry, no
//! caching. Failures of any kind come back as a `FetchError`; the controller
//! treats all of them the same way.

use super::model::{decode_page, Post};
use futures::future::{BoxFuture, FutureExt};
use std::fmt;
use std::time::Duration;

/// Public JSONPlaceholder posts collection
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com/posts";

/// Errors that can occur while fetching a page
#[derive(Debug)]
pub enum FetchError {
    /// Connection, TLS, timeout or body transfer failure
    Transport(String),
    /// Server answered with a non-success status
    Status { status: u16, message: String },
    /// Body was not a JSON array
    Decode(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(msg) => write!(f, "Request failed: {}", msg),
            Self::Status { status, message } => {
                write!(f, "HTTP {}: {}", status, message)
            }
            Self::Decode(msg) => write!(f, "Invalid response: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

/// Anything that can produce pages of posts
///
/// The returned future is `'static` so it can be handed to `tokio::spawn`
/// without borrowing the source.
pub trait PostSource: Send + Sync {
    /// Short label for logs and the title bar
    fn name(&self) -> &str;

    /// Fetch one page of posts
    fn fetch_posts(&self, page: u32, limit: u32) -> BoxFuture<'static, Result<Vec<Post>, FetchError>>;
}

/// Build the request URL for a page
///
/// Appends with `&` when the base already carries a query string.
pub fn page_url(base_url: &str, page: u32, limit: u32) -> String {
    let separator = if base_url.contains('?') { '&' } else { '?' };
    format!("{}{}_page={}&_limit={}", base_url, separator, page, limit)
}

/// `PostSource` backed by a REST endpoint
#[derive(Clone)]
pub struct HttpPostSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPostSource {
    /// Create a source for `base_url` with a per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = base_url.into();
        tracing::debug!("HTTP post source ready: {}", base_url);

        Ok(Self { client, base_url })
    }
}

impl PostSource for HttpPostSource {
    fn name(&self) -> &str {
        &self.base_url
    }

    fn fetch_posts(&self, page: u32, limit: u32) -> BoxFuture<'static, Result<Vec<Post>, FetchError>> {
        let client = self.client.clone();
        let url = page_url(&self.base_url, page, limit);

        async move {
            tracing::debug!("GET {}", url);

            let response = client
                .get(&url)
                .send()
                .await
                .map_err(|e| FetchError::Transport(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                return Err(FetchError::Status {
                    status: status.as_u16(),
                    message,
                });
            }

            let body: serde_json::Value = response
                .json()
                .await
                .map_err(|e| FetchError::Decode(e.to_string()))?;

            let decoded = decode_page(body)?;
            if decoded.rejected > 0 {
                tracing::warn!(
                    "Dropped {} malformed post(s) from page {} (missing title/body)",
                    decoded.rejected,
                    page
                );
            }

            Ok(decoded.posts)
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DemoConfig;
    use crate::demo::DemoServer;
    use axum::{http::StatusCode, routing::get, Router};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/posts", addr)
    }

    fn source(url: &str) -> HttpPostSource {
        HttpPostSource::new(url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn page_url_appends_pagination_query() {
        assert_eq!(
            page_url("https://example.test/posts", 1, 10),
            "https://example.test/posts?_page=1&_limit=10"
        );
        assert_eq!(
            page_url("https://example.test/posts?userId=2", 3, 5),
            "https://example.test/posts?userId=2&_page=3&_limit=5"
        );
    }

    #[tokio::test]
    async fn fetches_pages_from_demo_server() {
        let server = DemoServer::start(&DemoConfig {
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            total_posts: 25,
            latency_ms: 0,
        })
        .await
        .unwrap();
        let source = source(&server.posts_url());

        let first = source.fetch_posts(1, 10).await.unwrap();
        assert_eq!(first.len(), 10);
        assert_eq!(first[0].id, Some(1));

        let last = source.fetch_posts(3, 10).await.unwrap();
        assert_eq!(last.len(), 5);
        assert_eq!(last[4].id, Some(25));

        let past_end = source.fetch_posts(4, 10).await.unwrap();
        assert!(past_end.is_empty());

        server.shutdown().await;
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let url = serve(Router::new().route(
            "/posts",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down for maintenance") }),
        ))
        .await;

        let err = source(&url).fetch_posts(1, 10).await.unwrap_err();
        match err {
            FetchError::Status { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "down for maintenance");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn non_json_body_is_a_decode_error() {
        let url = serve(Router::new().route("/posts", get(|| async { "<html>nope</html>" }))).await;

        let err = source(&url).fetch_posts(1, 10).await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn malformed_entries_are_dropped() {
        let url = serve(Router::new().route(
            "/posts",
            get(|| async {
                axum::Json(serde_json::json!([
                    {"title": "kept", "body": "yes"},
                    {"title": "missing body"},
                ]))
            }),
        ))
        .await;

        let posts = source(&url).fetch_posts(1, 10).await.unwrap();
        assert_eq!(posts, vec![Post::new("kept", "yes")]);
    }

    #[tokio::test]
    async fn connection_refused_is_a_transport_error() {
        // Bind then drop to get a port nothing listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = source(&format!("http://{}/posts", addr))
            .fetch_posts(1, 10)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }
}

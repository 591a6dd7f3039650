//! # HTTP Retrieval Utilities
//!
//! This module provides a text-oriented API client wrapper around `reqwest`.
//! Unlike a JSON-first client, it hands the raw body text back to the caller
//! together with the status code and content-type hint, because tabular data
//! feeds may answer in either CSV or JSON and the decision of how to decode
//! the body belongs to the feed-specific layer.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use thiserror::Error;

/// A standardized container for text API responses.
///
/// This struct wraps the raw body text along with metadata about the
/// HTTP transaction, such as the status code and content-type hint.
#[derive(Debug, Clone)]
pub struct TextResponse {
    /// The numeric HTTP status code.
    pub status: u16,
    /// The value of the `Content-Type` header, if the server sent one.
    pub content_type: Option<String>,
    /// The response body, decoded as text.
    pub body: String,
}

impl TextResponse {
    /// Indicates if the status code was below the 4xx range.
    pub fn is_success(&self) -> bool {
        self.status < 400
    }
}

/// Errors raised while issuing a single GET request.
///
/// Both variants describe transport-level trouble; callers treat them
/// uniformly when deciding whether to retry.
#[derive(Debug, Error)]
pub enum RetrieveError {
    /// The request path could not be joined onto the base URL.
    #[error("invalid request path '{path}': {source}")]
    Path {
        /// The offending path segment.
        path: String,
        /// The underlying URL parse error.
        source: url::ParseError,
    },
    /// The request failed at the network level (DNS, connect, timeout, ...).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// A flexible HTTP client for text-bodied GET endpoints.
///
/// Built on top of `reqwest`, it handles base URLs, query-string encoding,
/// and per-attempt timeouts. Retry behavior is deliberately left to callers,
/// which own the policy for their particular feed.
pub struct ApiClient {
    /// The underlying reqwest client, configured with a per-request timeout.
    inner: reqwest::Client,
    /// The base URL to which all relative paths are joined.
    base_url: Url,
}

impl ApiClient {
    /// Creates a new `ApiClient` instance.
    ///
    /// # Arguments
    /// * `base_url` - The absolute base URL for the API (e.g., "https://dataminer2.pjm.com/feed/").
    /// * `timeout` - The per-request timeout applied to every GET issued through this client.
    ///
    /// # Panics
    /// Panics if the `base_url` is not a valid absolute URL.
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        // Parse the base URL to ensure it is valid and absolute
        let url = Url::parse(base_url).expect("Invalid Base URL (must be absolute)");

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to construct HTTP client");

        Self {
            inner: client,
            base_url: url,
        }
    }

    /// The base URL this client joins request paths onto.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Performs a GET request and captures the response as text.
    ///
    /// The query parameters are URL-encoded in the order given. A non-2xx
    /// status is NOT an error at this layer; the status code travels back in
    /// the `TextResponse` so the caller can apply its own retry rules.
    ///
    /// # Errors
    /// Returns a `RetrieveError` if URL joining or network execution fails.
    pub async fn get_text(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<TextResponse, RetrieveError> {
        // 1. Construct the full absolute URL
        let full_url = self.base_url.join(path).map_err(|source| RetrieveError::Path {
            path: path.to_string(),
            source,
        })?;

        // 2. Attach the query string and execute
        let response = self.inner.get(full_url).query(query).send().await?;

        // 3. Capture response metadata before consuming the body
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);
        let body = response.text().await?;

        Ok(TextResponse {
            status,
            content_type,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;
    use axum::Router;

    async fn spawn_test_server(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("listener should bind");
        let address = listener.local_addr().expect("local addr should exist");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("server should run");
        });
        format!("http://{address}/")
    }

    #[tokio::test]
    async fn get_text_captures_status_content_type_and_body() {
        let app = Router::new().route(
            "/echo",
            get(|| async {
                (
                    [(axum::http::header::CONTENT_TYPE, "text/csv")],
                    "a,b\n1,2\n".to_string(),
                )
            }),
        );
        let base = spawn_test_server(app).await;

        let client = ApiClient::new(&base, Duration::from_secs(5));
        let response = client
            .get_text("echo", &[])
            .await
            .expect("request should succeed");

        assert_eq!(response.status, 200);
        assert!(response.is_success());
        assert_eq!(response.content_type.as_deref(), Some("text/csv"));
        assert_eq!(response.body, "a,b\n1,2\n");
    }

    #[tokio::test]
    async fn get_text_reports_error_statuses_without_failing() {
        let app = Router::new().route(
            "/missing",
            get(|| async { (axum::http::StatusCode::NOT_FOUND, "gone".to_string()) }),
        );
        let base = spawn_test_server(app).await;

        let client = ApiClient::new(&base, Duration::from_secs(5));
        let response = client
            .get_text("missing", &[])
            .await
            .expect("transport should not error on 404");

        assert_eq!(response.status, 404);
        assert!(!response.is_success());
    }

    #[tokio::test]
    async fn get_text_surfaces_connect_failures() {
        // Port 1 on localhost is essentially guaranteed to refuse connections.
        let client = ApiClient::new("http://127.0.0.1:1/", Duration::from_secs(1));
        let result = client.get_text("feed", &[]).await;
        assert!(matches!(result, Err(RetrieveError::Request(_))));
    }
}

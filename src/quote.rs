use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

pub const DEFAULT_QUOTE_API_URL: &str = "https://dummyjson.com/quotes/random";

#[derive(Debug, Deserialize)]
pub struct QuoteResponse {
    pub id: u64,
    pub quote: String,
    pub author: String,
}

#[derive(Debug)]
pub enum QuoteError {
    Request(reqwest::Error),
    Status(StatusCode),
    Decode(reqwest::Error),
}

impl fmt::Display for QuoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteError::Request(err) => write!(f, "quote request failed: {err}"),
            QuoteError::Status(status) => write!(f, "quote endpoint answered {status}"),
            QuoteError::Decode(err) => write!(f, "quote body was not understood: {err}"),
        }
    }
}

impl std::error::Error for QuoteError {}

/// Client for the random quote endpoint. Cheap to clone.
#[derive(Debug, Clone)]
pub struct QuoteClient {
    http: Client,
    url: String,
}

impl QuoteClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// One GET, no retry. Only the quote text is kept.
    pub async fn fetch_random_quote(&self) -> Result<String, QuoteError> {
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(QuoteError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(QuoteError::Status(status));
        }

        let body: QuoteResponse = response.json().await.map_err(QuoteError::Decode)?;
        Ok(body.quote)
    }

    pub async fn panel(&self) -> QuotePanel {
        QuotePanel::from_result(self.fetch_random_quote().await)
    }
}

impl Default for QuoteClient {
    fn default() -> Self {
        Self::new(DEFAULT_QUOTE_API_URL)
    }
}

/// What the quote panel shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum QuotePanel {
    Loading,
    Loaded { text: String },
    Error,
}

impl QuotePanel {
    pub fn from_result(result: Result<String, QuoteError>) -> Self {
        match result {
            Ok(text) => QuotePanel::Loaded { text },
            Err(err) => {
                warn!("{err}");
                QuotePanel::Error
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::StatusCode as HttpStatus, routing::get};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/quotes/random")
    }

    fn unused_url() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        format!("http://127.0.0.1:{port}/quotes/random")
    }

    #[tokio::test]
    async fn extracts_quote_text() {
        let router = Router::new().route(
            "/quotes/random",
            get(|| async {
                Json(serde_json::json!({
                    "id": 7,
                    "quote": "Well begun is half done.",
                    "author": "Aristotle"
                }))
            }),
        );
        let client = QuoteClient::new(serve(router).await);

        assert_eq!(
            client.panel().await,
            QuotePanel::Loaded {
                text: "Well begun is half done.".to_string()
            }
        );
    }

    #[tokio::test]
    async fn server_errors_become_error_state() {
        let router = Router::new().route(
            "/quotes/random",
            get(|| async { (HttpStatus::SERVICE_UNAVAILABLE, "busy") }),
        );
        let client = QuoteClient::new(serve(router).await);

        let err = client.fetch_random_quote().await.unwrap_err();
        assert!(matches!(err, QuoteError::Status(status) if status.as_u16() == 503));
        assert_eq!(client.panel().await, QuotePanel::Error);
    }

    #[tokio::test]
    async fn unexpected_body_becomes_error_state() {
        let router = Router::new().route("/quotes/random", get(|| async { "<html>nope</html>" }));
        let client = QuoteClient::new(serve(router).await);

        assert!(matches!(
            client.fetch_random_quote().await,
            Err(QuoteError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn network_failure_becomes_error_state() {
        let client = QuoteClient::new(unused_url());
        assert!(matches!(
            client.fetch_random_quote().await,
            Err(QuoteError::Request(_))
        ));
        assert_eq!(client.panel().await, QuotePanel::Error);
    }

    #[test]
    fn panel_serializes_with_state_tag() {
        let loaded = serde_json::to_value(QuotePanel::Loaded {
            text: "hi".to_string(),
        })
        .unwrap();
        assert_eq!(loaded, serde_json::json!({ "state": "loaded", "text": "hi" }));
        assert_eq!(
            serde_json::to_value(QuotePanel::Error).unwrap(),
            serde_json::json!({ "state": "error" })
        );
        assert_eq!(QuoteClient::default().url(), DEFAULT_QUOTE_API_URL);
    }
}

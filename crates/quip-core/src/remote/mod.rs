//! Remote quote feed client.
//!
//! The feed is a mock post endpoint: GET returns a JSON array of objects with
//! at least `title` and `userId`; POST of `{title, body, userId}` simulates
//! uploading one pending quote.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Quote;

/// Default feed endpoint.
pub const DEFAULT_REMOTE_URL: &str = "https://jsonplaceholder.typicode.com/posts";

/// Maximum number of records consumed per fetch.
pub const FETCH_LIMIT: usize = 20;

/// `userId` attached to uploaded quotes.
const UPLOAD_USER_ID: i64 = 1;

const HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Invalid remote configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Remote HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Remote API error: {0}")]
    Api(String),
    #[error("Invalid remote payload: {0}")]
    InvalidPayload(String),
}

pub type RemoteResult<T> = Result<T, RemoteError>;

/// Seam between the sync engine and the feed; tests inject an in-memory fake.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Fetch the current remote snapshot, mapped to quotes.
    async fn fetch(&self) -> RemoteResult<Vec<Quote>>;

    /// Upload one pending quote; a non-success status fails that record only.
    async fn push(&self, quote: &Quote) -> RemoteResult<()>;
}

/// reqwest-backed feed client.
#[derive(Clone)]
pub struct HttpRemote {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpRemote {
    pub fn new(endpoint: impl Into<String>) -> RemoteResult<Self> {
        let endpoint = normalize_endpoint(endpoint.into())?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;
        Ok(Self { endpoint, client })
    }

    /// The normalized endpoint this client talks to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RemoteSource for HttpRemote {
    async fn fetch(&self) -> RemoteResult<Vec<Quote>> {
        let response = self
            .client
            .get(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Api(parse_api_error(status, &body)));
        }

        let body = response.text().await?;
        let posts: Vec<RemotePost> = serde_json::from_str(&body)
            .map_err(|error| RemoteError::InvalidPayload(error.to_string()))?;

        Ok(posts
            .into_iter()
            .take(FETCH_LIMIT)
            .map(quote_from_post)
            .collect())
    }

    async fn push(&self, quote: &Quote) -> RemoteResult<()> {
        let body = UploadBody {
            title: &quote.text,
            body: &quote.category,
            user_id: UPLOAD_USER_ID,
        };

        let response = self.client.post(&self.endpoint).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Api(parse_api_error(status, &body)));
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct RemotePost {
    title: String,
    #[serde(rename = "userId")]
    user_id: i64,
}

#[derive(Debug, Serialize)]
struct UploadBody<'a> {
    title: &'a str,
    body: &'a str,
    #[serde(rename = "userId")]
    user_id: i64,
}

fn quote_from_post(post: RemotePost) -> Quote {
    Quote::from_remote(post.title, format!("remote-{}", post.user_id))
}

#[derive(Debug, Deserialize)]
struct RemoteErrorBody {
    error: Option<String>,
    message: Option<String>,
}

fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<RemoteErrorBody>(body) {
        if let Some(message) = payload.message.or(payload.error) {
            return format!("{} ({})", message.trim(), status.as_u16());
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{} ({})", trimmed, status.as_u16())
    }
}

fn normalize_endpoint(raw: String) -> RemoteResult<String> {
    let endpoint = raw.trim();
    if endpoint.is_empty() {
        return Err(RemoteError::InvalidConfiguration(
            "endpoint must not be empty".to_string(),
        ));
    }
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        Ok(endpoint.trim_end_matches('/').to_string())
    } else {
        Err(RemoteError::InvalidConfiguration(
            "endpoint must include http:// or https://".to_string(),
        ))
    }
}

use std::time::Duration;

use press_core::{Comment, NewComment};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

const COMMENTS_PATH: &str = "rest/v1/comments";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("invalid comment store url: {0}")]
    InvalidUrl(String),
    #[error("invalid credential header: {0}")]
    InvalidCredential(String),
    #[error("{0}")]
    Network(String),
    /// Non-2xx answer; carries the store's own message when it sent one.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("unexpected comment payload: {0}")]
    Decode(String),
}

#[async_trait::async_trait]
pub trait CommentStore: Send + Sync {
    /// Comments of one article, newest first.
    async fn list(&self, article_id: &str) -> Result<Vec<Comment>, StoreError>;
    async fn insert(&self, comment: &NewComment) -> Result<(), StoreError>;
}

/// Comment table behind a PostgREST-style REST endpoint, authenticated with
/// the project's anonymous key.
#[derive(Debug, Clone)]
pub struct RestCommentStore {
    base: Url,
    client: reqwest::Client,
}

impl RestCommentStore {
    pub fn new(base_url: &str, anon_key: &str) -> Result<Self, StoreError> {
        let mut base =
            Url::parse(base_url).map_err(|err| StoreError::InvalidUrl(err.to_string()))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(anon_key)
            .map_err(|err| StoreError::InvalidCredential(err.to_string()))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {anon_key}"))
            .map_err(|err| StoreError::InvalidCredential(err.to_string()))?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|err| StoreError::Network(err.to_string()))?;
        Ok(Self { base, client })
    }

    fn table_url(&self) -> Result<Url, StoreError> {
        self.base
            .join(COMMENTS_PATH)
            .map_err(|err| StoreError::InvalidUrl(err.to_string()))
    }
}

#[async_trait::async_trait]
impl CommentStore for RestCommentStore {
    async fn list(&self, article_id: &str) -> Result<Vec<Comment>, StoreError> {
        let mut url = self.table_url()?;
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("article_id", &format!("eq.{article_id}"))
            .append_pair("order", "created_at.desc");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| StoreError::Network(err.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| StoreError::Network(err.to_string()))?;
        if !status.is_success() {
            return Err(rejected(status.as_u16(), &body));
        }
        serde_json::from_str(&body).map_err(|err| StoreError::Decode(err.to_string()))
    }

    async fn insert(&self, comment: &NewComment) -> Result<(), StoreError> {
        let payload =
            serde_json::to_string(&[comment]).map_err(|err| StoreError::Decode(err.to_string()))?;
        let response = self
            .client
            .post(self.table_url()?)
            .header(CONTENT_TYPE, "application/json")
            .header("Prefer", "return=minimal")
            .body(payload)
            .send()
            .await
            .map_err(|err| StoreError::Network(err.to_string()))?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(rejected(status.as_u16(), &body))
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn rejected(status: u16, body: &str) -> StoreError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|parsed| parsed.message)
        .ok()
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                format!("HTTP {status}")
            } else {
                trimmed.to_string()
            }
        });
    StoreError::Rejected { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_message_is_preferred_over_status() {
        assert_eq!(
            rejected(401, r#"{"code":"42501","message":"permission denied"}"#).to_string(),
            "permission denied"
        );
        assert_eq!(rejected(502, "").to_string(), "HTTP 502");
        assert_eq!(rejected(500, "oops\n").to_string(), "oops");
    }

    #[test]
    fn base_path_is_kept_when_joining() {
        let store = RestCommentStore::new("https://db.example/project", "anon").unwrap();
        assert_eq!(
            store.table_url().unwrap().as_str(),
            "https://db.example/project/rest/v1/comments"
        );
    }
}

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use futures_util::StreamExt;
use press_core::Post;
use press_logging::press_debug;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    Url(String),
    File(PathBuf),
}

impl FeedSource {
    /// `http(s)://` arguments are URLs, everything else a file path.
    pub fn parse(arg: &str) -> Self {
        if arg.starts_with("http://") || arg.starts_with("https://") {
            FeedSource::Url(arg.to_string())
        } else {
            FeedSource::File(PathBuf::from(arg))
        }
    }
}

impl fmt::Display for FeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedSource::Url(url) => f.write_str(url),
            FeedSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Error)]
pub enum FeedLoadError {
    #[error("invalid feed url: {0}")]
    InvalidUrl(String),
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP {0}")]
    HttpStatus(u16),
    #[error("feed larger than {max_bytes} bytes")]
    TooLarge { max_bytes: u64 },
    #[error("cannot read feed file: {0}")]
    Io(#[from] io::Error),
    #[error("feed is not a valid post list: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Loads the JSON feed from a URL or a local file.
#[derive(Debug, Clone)]
pub struct FeedLoader {
    settings: FetchSettings,
    client: reqwest::Client,
}

impl FeedLoader {
    pub fn new(settings: FetchSettings) -> Result<Self, FeedLoadError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FeedLoadError::Network(err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub async fn load(&self, source: &FeedSource) -> Result<Vec<Post>, FeedLoadError> {
        let bytes = match source {
            FeedSource::Url(url) => self.fetch(url).await?,
            FeedSource::File(path) => tokio::fs::read(path).await?,
        };
        let posts: Vec<Post> = serde_json::from_slice(&bytes)?;
        press_debug!("Loaded {} posts from {}", posts.len(), source);
        Ok(posts)
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FeedLoadError> {
        let parsed =
            reqwest::Url::parse(url).map_err(|err| FeedLoadError::InvalidUrl(err.to_string()))?;
        let response = self
            .client
            .get(parsed)
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedLoadError::HttpStatus(status.as_u16()));
        }
        let max_bytes = self.settings.max_bytes;
        if response.content_length().is_some_and(|len| len > max_bytes) {
            return Err(FeedLoadError::TooLarge { max_bytes });
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            if bytes.len() as u64 + chunk.len() as u64 > max_bytes {
                return Err(FeedLoadError::TooLarge { max_bytes });
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FeedLoadError {
    if err.is_timeout() {
        FeedLoadError::Timeout(err.to_string())
    } else {
        FeedLoadError::Network(err.to_string())
    }
}

use async_trait::async_trait;
use casualcast_data::{FeedError, FeedSnapshot};
use std::time::Duration;

use crate::config::FeedConfig;

#[derive(Debug, thiserror::Error)]
pub(crate) enum FetchError {
    #[error("could not fetch the feed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("could not read the feed: {0}")]
    Feed(#[from] FeedError),
}

/// Somewhere a fresh snapshot of the feed can be taken from.
#[async_trait]
pub(crate) trait FeedSource: Send + Sync {
    async fn fetch(&self) -> Result<FeedSnapshot, FetchError>;
}

/// Fetches the feed over HTTP. Never retries.
#[derive(Debug)]
pub(crate) struct HttpFeed {
    client: reqwest::Client,
    url: String,
}

impl HttpFeed {
    pub(crate) fn new(url: &str, timeout: Duration, user_agent: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            url: url.to_owned(),
        })
    }

    pub(crate) fn from_config(config: &FeedConfig) -> Result<Self, FetchError> {
        Self::new(&config.url, config.timeout(), &config.user_agent)
    }

    async fn download(&self) -> Result<bytes::Bytes, FetchError> {
        let response = self
            .client
            .get(self.url.as_str())
            .send()
            .await?
            .error_for_status()?;
        Ok(response.bytes().await?)
    }
}

#[async_trait]
impl FeedSource for HttpFeed {
    async fn fetch(&self) -> Result<FeedSnapshot, FetchError> {
        tracing::info!("fetching {}", self.url);
        let feed = self.download().await?;
        let snapshot = FeedSnapshot::parse(&feed[..])?;
        tracing::info!("{} items in feed", snapshot.len());
        Ok(snapshot)
    }
}

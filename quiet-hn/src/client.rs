use crate::types::{FetchConfig, HnApi, ItemRecord, Result, StoryId};
use anyhow::{Context, anyhow};
use async_trait::async_trait;
use backoff::{backoff::Backoff, exponential::ExponentialBackoff};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use url::Url;

/// `HnApi` backed by the Hacker News Firebase endpoints.
#[derive(Debug, Clone)]
pub struct HnClient {
    client: Client,
    base_url: Url,
    config: FetchConfig,
}

impl HnClient {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .build()?;

        // Url::join drops the last path segment unless the base ends in '/'
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)?;

        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> anyhow::Result<T> {
        let url = self
            .base_url
            .join(path)
            .with_context(|| format!("failed to build URL for {}", path))?;

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("request to {} failed", url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            ));
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("failed to decode body from {}", url))
    }

    async fn fetch_top_story_ids(&self) -> anyhow::Result<Vec<StoryId>> {
        self.get_json("topstories.json")
            .await
            .context("failed to load top stories")
    }
}

#[async_trait]
impl HnApi for HnClient {
    async fn top_story_ids(&self) -> anyhow::Result<Vec<StoryId>> {
        let start_time = Instant::now();
        let delay = Duration::from_millis(self.config.retry_delay_ms);
        let mut backoff: ExponentialBackoff<backoff::SystemClock> = ExponentialBackoff {
            current_interval: delay,
            initial_interval: delay,
            max_interval: delay * 8,
            multiplier: 2.0,
            max_elapsed_time: None,
            ..Default::default()
        };

        let mut attempt = 0;
        loop {
            match self.fetch_top_story_ids().await {
                Ok(ids) => {
                    debug!(
                        "Fetched {} top story ids in {:?}",
                        ids.len(),
                        start_time.elapsed()
                    );
                    return Ok(ids);
                }
                Err(e) if attempt < self.config.max_retries => {
                    attempt += 1;
                    let wait = backoff.next_backoff().unwrap_or(delay);
                    warn!(
                        "Attempt {} to fetch top stories failed: {:#}, retrying in {:?}",
                        attempt, e, wait
                    );
                    tokio::time::sleep(wait).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn item(&self, id: StoryId) -> anyhow::Result<ItemRecord> {
        // Unknown ids come back as a literal `null`
        let item: Option<ItemRecord> = self
            .get_json(&format!("item/{}.json", id))
            .await
            .with_context(|| format!("failed to load item {}", id))?;

        item.ok_or_else(|| anyhow!("item {} not found", id))
    }
}

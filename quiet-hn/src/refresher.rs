use crate::cache::StoryCache;
use crate::orchestrator::Orchestrator;
use crate::types::{HnApi, QuietHnError, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Background producer that keeps a `StoryCache` up to date.
pub struct StoryRefresher {
    api: Arc<dyn HnApi>,
    orchestrator: Orchestrator,
    cache: Arc<StoryCache>,
    num_stories: usize,
    interval: Duration,
}

impl StoryRefresher {
    pub fn new(
        api: Arc<dyn HnApi>,
        orchestrator: Orchestrator,
        cache: Arc<StoryCache>,
        num_stories: usize,
        interval: Duration,
    ) -> Self {
        Self {
            api,
            orchestrator,
            cache,
            num_stories,
            interval,
        }
    }

    /// Refresh every `interval` until `shutdown` fires.
    pub async fn run(self, shutdown: CancellationToken) {
        info!(
            "Starting top stories refresher (every {:?}, {} stories)",
            self.interval, self.num_stories
        );

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = self.refresh_once() => {}
            }

            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        info!("Top stories refresher stopped");
    }

    /// Run one refresh cycle and publish its outcome to the cache.
    pub async fn refresh_once(&self) -> Result<usize> {
        let ids = match self.api.top_story_ids().await {
            Ok(ids) => ids,
            Err(e) => {
                let e = QuietHnError::RankingFetch(e);
                error!("Refresh failed, keeping previous stories: {}", e);
                self.cache.record_failure(&e).await;
                return Err(e);
            }
        };

        let stories = self.orchestrator.fetch_top(&ids, self.num_stories).await;
        let count = stories.len();
        self.cache.publish(stories).await;

        info!("Refreshed top stories cache with {} stories", count);
        Ok(count)
    }
}

use crate::cache::{CacheSnapshot, StoryCache};
use crate::orchestrator::Orchestrator;
use crate::types::{HnApi, PageData, PageRenderer, QuietHnError, Result, Story};
use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use backoff::{backoff::Backoff, exponential::ExponentialBackoff};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info};

/// Longest a request waits for the first background refresh.
pub const DEFAULT_WARMUP_TIMEOUT: Duration = Duration::from_secs(30);

/// Where a request gets its stories from.
pub enum StorySource {
    /// Fetch on every request.
    Live {
        api: Arc<dyn HnApi>,
        orchestrator: Orchestrator,
    },
    /// Read what the background refresher last published.
    Cached {
        cache: Arc<StoryCache>,
        warmup_timeout: Duration,
    },
}

impl StorySource {
    pub fn live(api: Arc<dyn HnApi>, orchestrator: Orchestrator) -> Self {
        StorySource::Live { api, orchestrator }
    }

    pub fn cached(cache: Arc<StoryCache>) -> Self {
        StorySource::Cached {
            cache,
            warmup_timeout: DEFAULT_WARMUP_TIMEOUT,
        }
    }

    pub fn with_warmup_timeout(self, timeout: Duration) -> Self {
        match self {
            StorySource::Cached { cache, .. } => StorySource::Cached {
                cache,
                warmup_timeout: timeout,
            },
            live => live,
        }
    }

    /// Stories for one page plus, in cached mode, when they were fetched.
    pub async fn load(&self, num_stories: usize) -> Result<(Vec<Story>, Option<DateTime<Utc>>)> {
        match self {
            StorySource::Live { api, orchestrator } => {
                let ids = api
                    .top_story_ids()
                    .await
                    .map_err(QuietHnError::RankingFetch)?;
                let stories = orchestrator.fetch_top(&ids, num_stories).await;
                Ok((stories, None))
            }
            StorySource::Cached {
                cache,
                warmup_timeout,
            } => {
                let snapshot = wait_for_snapshot(cache, *warmup_timeout).await?;
                if snapshot.is_unusable() {
                    return Err(QuietHnError::CacheUnavailable(
                        snapshot.last_error.unwrap_or_default(),
                    ));
                }

                let mut stories = snapshot.stories;
                stories.truncate(num_stories);
                Ok((stories, snapshot.refreshed_at))
            }
        }
    }
}

/// Poll the cache until the refresher has finished its first cycle.
async fn wait_for_snapshot(cache: &StoryCache, timeout: Duration) -> Result<CacheSnapshot> {
    let mut backoff: ExponentialBackoff<backoff::SystemClock> = ExponentialBackoff {
        current_interval: Duration::from_millis(10),
        initial_interval: Duration::from_millis(10),
        max_interval: Duration::from_millis(100),
        multiplier: 2.0,
        max_elapsed_time: Some(timeout),
        ..Default::default()
    };
    let start_time = Instant::now();

    loop {
        let snapshot = cache.read_snapshot().await;
        if snapshot.initialized {
            return Ok(snapshot);
        }

        match backoff.next_backoff() {
            Some(delay) => tokio::time::sleep(delay).await,
            None => {
                return Err(QuietHnError::CacheWarmup {
                    waited_ms: start_time.elapsed().as_millis() as u64,
                });
            }
        }
    }
}

/// Shared state for the page handler.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<StorySource>,
    pub renderer: Arc<dyn PageRenderer>,
    pub num_stories: usize,
}

/// Handler for GET /
pub async fn top_stories_handler(State(state): State<AppState>) -> Response {
    let start = Instant::now();

    let (stories, refreshed_at) = match state.source.load(state.num_stories).await {
        Ok(loaded) => loaded,
        Err(e) => {
            error!("Failed to load top stories: {}", e);
            return e.into_response();
        }
    };

    let page = PageData {
        stories,
        elapsed: start.elapsed(),
        refreshed_at,
    };

    match state.renderer.render(&page) {
        Ok(body) => {
            info!(
                "Served {} stories in {:?}",
                page.stories.len(),
                page.elapsed
            );
            Html(body).into_response()
        }
        Err(e) => {
            let e = QuietHnError::Render(e);
            error!("{}", e);
            e.into_response()
        }
    }
}

/// Handler for GET /health
pub async fn health_handler() -> &'static str {
    "OK"
}

use crate::types::Story;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

/// Point-in-time copy of the cache handed to request handlers.
#[derive(Debug, Clone, Default)]
pub struct CacheSnapshot {
    pub stories: Vec<Story>,
    /// True once at least one refresh attempt has finished, successful or not.
    pub initialized: bool,
    pub last_error: Option<String>,
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl CacheSnapshot {
    /// Errored with nothing stale to fall back on.
    pub fn is_unusable(&self) -> bool {
        self.last_error.is_some() && self.stories.is_empty()
    }
}

/// Latest top stories shared between the refresher and request handlers.
///
/// Only the refresher writes; every write replaces all fields under one
/// exclusive lock, so readers never see new stories next to an old error.
#[derive(Debug, Default)]
pub struct StoryCache {
    inner: RwLock<CacheSnapshot>,
}

impl StoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn read_snapshot(&self) -> CacheSnapshot {
        self.inner.read().await.clone()
    }

    pub async fn publish(&self, stories: Vec<Story>) {
        let mut snapshot = self.inner.write().await;
        snapshot.stories = stories;
        snapshot.last_error = None;
        snapshot.refreshed_at = Some(Utc::now());
        snapshot.initialized = true;
    }

    /// Record a failed refresh. Previously published stories stay in place.
    pub async fn record_failure(&self, error: impl ToString) {
        let mut snapshot = self.inner.write().await;
        snapshot.last_error = Some(error.to_string());
        snapshot.initialized = true;
    }
}

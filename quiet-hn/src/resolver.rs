use crate::hn_utils;
use crate::types::{HnApi, ItemRecord, Resolution, Story, StoryId};
use std::sync::Arc;
use tracing::debug;

/// Fetches single items and decides whether they are displayable stories.
#[derive(Clone)]
pub struct ItemResolver {
    api: Arc<dyn HnApi>,
}

impl ItemResolver {
    pub fn new(api: Arc<dyn HnApi>) -> Self {
        Self { api }
    }

    /// Fetch `id` once and classify it. Failures are final for this cycle.
    pub async fn resolve(&self, id: StoryId) -> Resolution {
        match self.api.item(id).await {
            Ok(item) => classify(item),
            Err(e) => {
                debug!("Failed to fetch item {}: {:#}", id, e);
                Resolution::Failed(e)
            }
        }
    }
}

/// Only link stories are kept; jobs, polls, comments and text posts are not.
pub fn is_story_link(item: &ItemRecord) -> bool {
    item.kind == "story" && item.url.as_deref().is_some_and(|url| !url.is_empty())
}

/// Wrap an item with its display host. Does not check the item kind.
pub fn to_story(item: ItemRecord) -> Story {
    let host = item
        .url
        .as_deref()
        .map(hn_utils::url::display_host)
        .unwrap_or_default();

    Story { item, host }
}

pub fn classify(item: ItemRecord) -> Resolution {
    if !is_story_link(&item) {
        debug!("Skipping item {} of type {:?}", item.id, item.kind);
        return Resolution::NotAStory;
    }

    Resolution::Story(to_story(item))
}

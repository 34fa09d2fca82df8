use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Identifier of an item in the Hacker News item graph.
pub type StoryId = u64;

/// Raw item as returned by `item/{id}.json`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: StoryId,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub by: Option<String>,
    #[serde(default)]
    pub time: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub score: Option<i64>,
    #[serde(default)]
    pub descendants: Option<i64>,
    #[serde(default)]
    pub kids: Vec<StoryId>,
    #[serde(default)]
    pub dead: bool,
    #[serde(default)]
    pub deleted: bool,
}

/// An item that passed classification, ready for display.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Story {
    pub item: ItemRecord,
    /// Hostname of the story URL without a leading `www.`; empty when the
    /// URL could not be parsed.
    pub host: String,
}

impl Story {
    pub fn id(&self) -> StoryId {
        self.item.id
    }

    pub fn title(&self) -> &str {
        self.item.title.as_deref().unwrap_or("")
    }

    pub fn url(&self) -> &str {
        self.item.url.as_deref().unwrap_or("")
    }
}

/// Everything the renderer needs to produce one page.
#[derive(Clone, Debug)]
pub struct PageData {
    pub stories: Vec<Story>,
    pub elapsed: Duration,
    /// Set in cached mode to the time of the last successful refresh.
    pub refreshed_at: Option<DateTime<Utc>>,
}

// Object style note:
// Implementations of these traits are shared between request handlers and
// the background refresher, so they must be usable behind an `Arc` from many
// tasks at once.

/// The remote item-graph API.
#[async_trait]
pub trait HnApi: Send + Sync {
    /// Current top stories, best first.
    async fn top_story_ids(&self) -> Result<Vec<StoryId>>;

    /// Fetch a single item by id.
    async fn item(&self, id: StoryId) -> Result<ItemRecord>;
}

/// Turns page data into a response body.
pub trait PageRenderer: Send + Sync {
    fn render(&self, page: &PageData) -> Result<String>;
}

#![allow(dead_code)]

use anyhow::anyhow;
use async_trait::async_trait;
use quiet_hn::{HnApi, ItemRecord, ItemResolver, Orchestrator, StoryId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub fn story(id: StoryId, url: &str) -> ItemRecord {
    ItemRecord {
        id,
        kind: "story".to_string(),
        title: Some(format!("Story {}", id)),
        url: Some(url.to_string()),
        by: Some("pg".to_string()),
        score: Some(100),
        ..Default::default()
    }
}

pub fn comment(id: StoryId) -> ItemRecord {
    ItemRecord {
        id,
        kind: "comment".to_string(),
        text: Some("nice".to_string()),
        ..Default::default()
    }
}

/// How a scripted item answers.
#[derive(Clone)]
enum Reply {
    Item(ItemRecord),
    Fail,
}

#[derive(Clone)]
struct Scripted {
    reply: Reply,
    /// `None` never answers.
    delay: Option<Duration>,
}

/// Scripted `HnApi` that records how many item requests overlap.
#[derive(Default)]
pub struct MockHnApi {
    ranking: Mutex<Option<Vec<StoryId>>>,
    items: Mutex<HashMap<StoryId, Scripted>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    item_calls: AtomicUsize,
    ranking_calls: AtomicUsize,
}

impl MockHnApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ranking(self, ids: Vec<StoryId>) -> Self {
        self.set_ranking(ids);
        self
    }

    pub fn with_item(self, item: ItemRecord, delay: Duration) -> Self {
        self.script(item.id, Reply::Item(item), Some(delay));
        self
    }

    pub fn with_failure(self, id: StoryId, delay: Duration) -> Self {
        self.script(id, Reply::Fail, Some(delay));
        self
    }

    /// Item whose request never completes.
    pub fn with_hung_item(self, item: ItemRecord) -> Self {
        self.script(item.id, Reply::Item(item), None);
        self
    }

    fn script(&self, id: StoryId, reply: Reply, delay: Option<Duration>) {
        self.items
            .lock()
            .unwrap()
            .insert(id, Scripted { reply, delay });
    }

    pub fn set_ranking(&self, ids: Vec<StoryId>) {
        *self.ranking.lock().unwrap() = Some(ids);
    }

    pub fn fail_ranking(&self) {
        *self.ranking.lock().unwrap() = None;
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn item_calls(&self) -> usize {
        self.item_calls.load(Ordering::SeqCst)
    }

    pub fn ranking_calls(&self) -> usize {
        self.ranking_calls.load(Ordering::SeqCst)
    }
}

struct InFlightGuard<'a>(&'a AtomicUsize);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl HnApi for MockHnApi {
    async fn top_story_ids(&self) -> anyhow::Result<Vec<StoryId>> {
        self.ranking_calls.fetch_add(1, Ordering::SeqCst);
        self.ranking
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| anyhow!("top stories unavailable"))
    }

    async fn item(&self, id: StoryId) -> anyhow::Result<ItemRecord> {
        self.item_calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let _guard = InFlightGuard(&self.in_flight);

        let scripted = self.items.lock().unwrap().get(&id).cloned();
        let Some(scripted) = scripted else {
            return Err(anyhow!("item {} not scripted", id));
        };

        match scripted.delay {
            Some(delay) if !delay.is_zero() => tokio::time::sleep(delay).await,
            Some(_) => tokio::task::yield_now().await,
            None => std::future::pending::<()>().await,
        }

        match scripted.reply {
            Reply::Item(item) => Ok(item),
            Reply::Fail => Err(anyhow!("item {} failed", id)),
        }
    }
}

pub fn orchestrator(api: &Arc<MockHnApi>, max_concurrency: usize) -> Orchestrator {
    let api: Arc<dyn HnApi> = api.clone();
    Orchestrator::new(ItemResolver::new(api), max_concurrency).unwrap()
}

pub fn ids(stories: &[quiet_hn::Story]) -> Vec<StoryId> {
    stories.iter().map(|story| story.id()).collect()
}

use crate::resolver::ItemResolver;
use crate::types::{QuietHnError, RankedStory, Resolution, Result, Story, StoryId};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, Semaphore};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Resolves ranking ids with bounded parallelism and returns the first
/// `target` valid stories in ranking order.
///
/// Every resolution runs as its own task holding one semaphore permit, so at
/// most `max_concurrency` item requests are in flight. Finished stories are
/// delivered over a channel; the control loop waits on either the next
/// delivery or the next free permit and never spins.
///
/// Once the target is met (or the ranking is exhausted) a cancellation token
/// is tripped. Outstanding tasks drop their network call, and a task that
/// finishes at the same moment lets cancellation win over delivery, so no
/// task is ever left waiting on a receiver that is gone.
#[derive(Clone)]
pub struct Orchestrator {
    resolver: ItemResolver,
    max_concurrency: usize,
}

impl Orchestrator {
    pub fn new(resolver: ItemResolver, max_concurrency: usize) -> Result<Self> {
        if max_concurrency == 0 {
            return Err(QuietHnError::InvalidConfig(
                "max concurrency must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            resolver,
            max_concurrency,
        })
    }

    pub async fn fetch_top(&self, ids: &[StoryId], target: usize) -> Vec<Story> {
        if target == 0 {
            return Vec::new();
        }

        let start_time = Instant::now();
        let permits = Arc::new(Semaphore::new(self.max_concurrency));
        let cancel = CancellationToken::new();
        let (story_tx, mut story_rx) = mpsc::channel::<RankedStory>(self.max_concurrency);

        // Dropped once the cursor is exhausted so `recv` can observe the end
        let mut story_tx = Some(story_tx);
        let mut cursor = ids.iter().copied().enumerate().peekable();
        let mut accepted: Vec<RankedStory> = Vec::with_capacity(target.min(ids.len()));
        let mut launched = 0usize;

        while accepted.len() < target {
            if cursor.peek().is_none() {
                story_tx = None;
            }

            tokio::select! {
                biased;

                Some(ranked) = story_rx.recv() => {
                    accepted.push(ranked);
                }

                permit = permits.clone().acquire_owned(), if story_tx.is_some() => {
                    let (Ok(permit), Some((rank, id)), Some(tx)) = (permit, cursor.next(), story_tx.as_ref()) else {
                        break;
                    };
                    launched += 1;

                    let resolver = self.resolver.clone();
                    let tx = tx.clone();
                    let cancel = cancel.clone();
                    tokio::spawn(async move {
                        let _permit = permit;

                        let resolution = tokio::select! {
                            biased;
                            _ = cancel.cancelled() => return,
                            resolution = resolver.resolve(id) => resolution,
                        };

                        let Resolution::Story(story) = resolution else {
                            return;
                        };

                        tokio::select! {
                            _ = cancel.cancelled() => {
                                debug!("Discarding story {} delivered after stop", id);
                            }
                            _ = tx.send(RankedStory { rank, story }) => {}
                        }
                    });
                }

                else => break,
            }
        }

        cancel.cancel();

        accepted.sort_by_key(|ranked| ranked.rank);

        info!(
            "Collected {}/{} stories from {} of {} ids in {:?}",
            accepted.len(),
            target,
            launched,
            ids.len(),
            start_time.elapsed()
        );

        accepted.into_iter().map(|ranked| ranked.story).collect()
    }
}

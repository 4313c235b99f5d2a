// src/pipeline/coordinator.rs
// =============================================================================
// Fetches every document concurrently and counts their words.
//
// How it works:
// 1. Create an Aggregator and a CompletionBarrier expecting N tasks
// 2. Spawn one task per URL onto a JoinSet. Each task:
//    - holds a CompletionGuard (reports completion when it ends, any way)
//    - waits for a semaphore permit if concurrency is bounded
//    - fetches, tokenizes, merges into the Aggregator
//    - or records its FetchError and contributes nothing
// 3. Wait on the barrier (optionally under a deadline, optionally bailing
//    out early on the first failure in strict mode)
// 4. Snapshot the table and rank it
//
// The JoinSet owns every task. If we return early (deadline, strict abort)
// or the caller drops our future, the JoinSet is dropped and aborts whatever
// is still running, which closes their connections.
// =============================================================================

use dashmap::DashMap;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Notify, Semaphore};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use super::barrier::CompletionBarrier;
use crate::aggregate::{Aggregator, FrequencyTable};
use crate::error::{FetchError, PipelineError};
use crate::fetch::Fetch;
use crate::rank::{self, RankedEntry, DEFAULT_MAX_WORD_LEN};
use crate::text;

/// Knobs for a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Maximum fetches in flight at once. 0 means one task per URL, no cap.
    pub concurrency: usize,
    /// Give up (and cancel outstanding fetches) after this long.
    pub deadline: Option<Duration>,
    /// Abort the whole run on the first failed fetch instead of skipping it.
    pub strict: bool,
    /// Length filter handed to the ranker.
    pub max_word_len: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            concurrency: 16,
            deadline: None,
            strict: false,
            max_word_len: DEFAULT_MAX_WORD_LEN,
        }
    }
}

/// Everything a finished run produced.
#[derive(Debug)]
pub struct RunReport {
    pub table: FrequencyTable,
    pub ranked: Vec<RankedEntry>,
    /// Failed fetches, in the order their URLs were given.
    pub failures: Vec<FetchError>,
    pub dispatched: usize,
    pub succeeded: usize,
    pub tokens: u64,
}

impl RunReport {
    pub fn is_degraded(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Fans document fetches out over tokio tasks and fans the words back in.
pub struct Coordinator {
    fetcher: Arc<dyn Fetch>,
    settings: PipelineSettings,
}

impl Coordinator {
    pub fn new(fetcher: Arc<dyn Fetch>, settings: PipelineSettings) -> Self {
        Self { fetcher, settings }
    }

    /// Runs the pipeline over `urls` and returns the ranked result.
    ///
    /// Individual fetch failures end up in `RunReport::failures` unless
    /// strict mode is on.
    pub async fn run(&self, urls: Vec<String>) -> Result<RunReport, PipelineError> {
        let expected = urls.len();
        let aggregator = Arc::new(Aggregator::new());
        let barrier = Arc::new(CompletionBarrier::new(expected));
        let failures: Arc<DashMap<usize, FetchError>> = Arc::new(DashMap::new());
        let first_failure = Arc::new(Notify::new());
        let permits = match self.settings.concurrency {
            0 => None,
            // Semaphore::new panics above MAX_PERMITS; that many is no cap anyway.
            n => Some(Arc::new(Semaphore::new(n.min(Semaphore::MAX_PERMITS)))),
        };

        info!(documents = expected, concurrency = self.settings.concurrency, "dispatching fetch tasks");

        let mut tasks = JoinSet::new();
        for (index, url) in urls.into_iter().enumerate() {
            // Taken before spawning so the task counts even if it never
            // gets to run.
            let guard = barrier.guard();
            let fetcher = Arc::clone(&self.fetcher);
            let aggregator = Arc::clone(&aggregator);
            let failures = Arc::clone(&failures);
            let first_failure = Arc::clone(&first_failure);
            let permits = permits.clone();

            tasks.spawn(async move {
                let _guard = guard;
                let _permit = match permits {
                    // Only fails if the semaphore is closed, which we never do.
                    Some(sem) => sem.acquire_owned().await.ok(),
                    None => None,
                };

                debug!(%url, "fetching");
                let outcome = AssertUnwindSafe(fetch_tokens(fetcher.as_ref(), &url))
                    .catch_unwind()
                    .await
                    .unwrap_or_else(|_| {
                        Err(FetchError::Other {
                            url: url.clone(),
                            reason: "fetch task panicked".to_string(),
                        })
                    });

                match outcome {
                    Ok(batch) => {
                        debug!(%url, tokens = batch.len(), "merging");
                        aggregator.merge(batch);
                    }
                    Err(err) => {
                        warn!(url = err.url(), error = %err, "fetch failed, document skipped");
                        failures.insert(index, err);
                        first_failure.notify_one();
                    }
                }
            });
        }

        self.wait_for_tasks(&barrier, &failures, &first_failure).await?;
        debug_assert_eq!(barrier.releases(), 1);

        // Every task has arrived; reap them so none outlives the run.
        while tasks.join_next().await.is_some() {}

        let table = aggregator.snapshot()?;
        let failures = ordered_failures(&failures);
        let succeeded = aggregator.batches_merged() as usize;
        let tokens = aggregator.tokens_merged();
        debug_assert_eq!(succeeded + failures.len(), expected);

        info!(
            succeeded,
            failed = failures.len(),
            distinct_words = table.len(),
            tokens,
            "aggregation complete"
        );

        let ranked = rank::rank(&table, self.settings.max_word_len);
        Ok(RunReport {
            table,
            ranked,
            failures,
            dispatched: expected,
            succeeded,
            tokens,
        })
    }

    // Blocks until the barrier releases, the deadline passes, or (strict
    // mode) the first fetch fails.
    async fn wait_for_tasks(
        &self,
        barrier: &CompletionBarrier,
        failures: &DashMap<usize, FetchError>,
        first_failure: &Notify,
    ) -> Result<(), PipelineError> {
        let strict = self.settings.strict;
        let all_done = async {
            tokio::select! {
                _ = barrier.wait() => {}
                _ = first_failure.notified(), if strict => {}
            }
        };

        if let Some(deadline) = self.settings.deadline {
            if tokio::time::timeout(deadline, all_done).await.is_err() {
                return Err(PipelineError::DeadlineExceeded {
                    completed: barrier.completed(),
                    expected: barrier.expected(),
                });
            }
        } else {
            all_done.await;
        }

        if strict && !failures.is_empty() {
            let mut ordered = ordered_failures(failures);
            let failed = ordered.len();
            return Err(PipelineError::StrictAbort {
                first: ordered.remove(0),
                failed,
            });
        }

        Ok(())
    }
}

async fn fetch_tokens(fetcher: &dyn Fetch, url: &str) -> Result<Vec<String>, FetchError> {
    let body = fetcher.fetch(url).await?;
    Ok(text::tokenize(&body))
}

fn ordered_failures(failures: &DashMap<usize, FetchError>) -> Vec<FetchError> {
    let mut indexed: Vec<(usize, FetchError)> = failures
        .iter()
        .map(|entry| (*entry.key(), entry.value().clone()))
        .collect();
    indexed.sort_by_key(|(index, _)| *index);
    indexed.into_iter().map(|(_, err)| err).collect()
}

// src/aggregate/table.rs
// =============================================================================
// Concurrency-safe word counting.
//
// The table is a DashMap: a hash map split into shards, each behind its own
// RwLock. `entry()` holds the shard's write lock for the whole
// lookup-then-increment, so two tasks bumping the same word can never both
// read the old value and lose an update. Tasks touching different shards
// don't contend at all.
//
// Alongside the map we keep a running total of merged tokens. Once every
// producer is done, the sum of all counts must equal that total; snapshot()
// checks it.
// =============================================================================

use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::PipelineError;

/// Word -> occurrence count, produced once aggregation is complete.
pub type FrequencyTable = HashMap<String, u64>;

/// Accumulates token batches from any number of concurrent producers.
///
/// Share it behind an `Arc`; all methods take `&self`.
#[derive(Debug, Default)]
pub struct Aggregator {
    counts: DashMap<String, u64>,
    tokens_merged: AtomicU64,
    batches_merged: AtomicU64,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds every token of `batch` to the table, one increment per token.
    ///
    /// Safe to call from many tasks at once, in any order.
    pub fn merge(&self, batch: Vec<String>) {
        let len = batch.len() as u64;
        for word in batch {
            *self.counts.entry(word).or_insert(0) += 1;
        }
        // Counted after the increments so a quiescent reader never sees a
        // total larger than what the map holds.
        self.tokens_merged.fetch_add(len, Ordering::AcqRel);
        self.batches_merged.fetch_add(1, Ordering::AcqRel);
    }

    pub fn tokens_merged(&self) -> u64 {
        self.tokens_merged.load(Ordering::Acquire)
    }

    pub fn batches_merged(&self) -> u64 {
        self.batches_merged.load(Ordering::Acquire)
    }

    /// Copies the table out.
    ///
    /// Only meaningful once no `merge` can still be running; the coordinator
    /// calls it after its completion barrier has released.
    pub fn snapshot(&self) -> Result<FrequencyTable, PipelineError> {
        let table: FrequencyTable = self
            .counts
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect();

        let counted: u64 = table.values().sum();
        let merged = self.tokens_merged();
        if counted != merged {
            return Err(PipelineError::AggregationInvariant { merged, counted });
        }

        Ok(table)
    }
}

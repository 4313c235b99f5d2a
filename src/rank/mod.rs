// src/rank/mod.rs
// =============================================================================
// Turns the finished frequency table into an ordered word list.
//
// Order: highest count first; equal counts sorted alphabetically so the same
// input always produces the same file, run after run.
//
// Tokens longer than the length limit are dropped. They are almost always
// glued-together junk (URLs with their punctuation stripped, code
// identifiers run together), not real words worth ranking.
// =============================================================================

use serde::Serialize;
use std::cmp::Ordering;

use crate::aggregate::FrequencyTable;

/// Words longer than this many characters are left out by default.
pub const DEFAULT_MAX_WORD_LEN: usize = 15;

/// One row of the final ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    pub word: String,
    pub count: u64,
}

impl RankedEntry {
    pub fn new(word: impl Into<String>, count: u64) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

/// True when `word` passes the length filter. Length is counted in
/// characters, so "größe" is 5 long, not 7.
pub fn within_limit(word: &str, max_word_len: usize) -> bool {
    word.chars().count() <= max_word_len
}

/// Ranks `table`, leaving out words longer than `max_word_len`.
pub fn rank(table: &FrequencyTable, max_word_len: usize) -> Vec<RankedEntry> {
    let mut entries: Vec<RankedEntry> = table
        .iter()
        .filter(|(word, _)| within_limit(word, max_word_len))
        .map(|(word, &count)| RankedEntry::new(word.as_str(), count))
        .collect();

    entries.sort_unstable_by(compare);
    entries
}

// Count descending, then word ascending. Words are unique keys, so this is
// a total order and an unstable sort is fine.
fn compare(a: &RankedEntry, b: &RankedEntry) -> Ordering {
    b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word))
}

// src/error.rs
// =============================================================================
// Error types shared by the whole pipeline.
//
// Three layers of failure:
// - DiscoveryError: we could not get the list of documents. Fatal.
// - FetchError: one document could not be downloaded. Recoverable, the
//   document just contributes zero words.
// - PipelineError: what the coordinator itself can fail with.
//
// The binary (main.rs) wraps everything in anyhow::Error, the modules below
// it return these typed errors so callers can match on them.
// =============================================================================

use thiserror::Error;

/// The listing page could not be turned into a list of document URLs.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("cannot derive a raw content URL from '{0}' (expected https://github.com/<owner>/<repo>/tree/<branch>/<path>)")]
    InvalidListingUrl(String),

    #[error("request for listing page failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("listing page {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("listing page has no embedded JSON payload with a file tree")]
    MissingPayload,

    #[error("embedded payload has an unexpected shape: {0}")]
    Shape(String),

    #[error("embedded payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single document could not be fetched.
///
/// Variants mirror the ways a request can go wrong; every variant keeps the
/// URL so a failure list can be printed without extra bookkeeping.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("{url}: request timed out")]
    Timeout { url: String },

    #[error("{url}: connection failed: {reason}")]
    Connect { url: String, reason: String },

    #[error("{url}: HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("{url}: could not read response body: {reason}")]
    Body { url: String, reason: String },

    #[error("{url}: {reason}")]
    Other { url: String, reason: String },
}

impl FetchError {
    pub fn url(&self) -> &str {
        match self {
            FetchError::Timeout { url }
            | FetchError::Connect { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Body { url, .. }
            | FetchError::Other { url, .. } => url,
        }
    }
}

/// Failures of a whole run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Only produced when strict mode is on.
    #[error("aborted after {failed} failed fetch(es), first: {first}")]
    StrictAbort { first: FetchError, failed: usize },

    #[error("deadline exceeded with {completed} of {expected} fetch task(s) completed")]
    DeadlineExceeded { completed: usize, expected: usize },

    /// Sum of counts in the table differs from the number of merged tokens.
    /// Can't happen while every write goes through `Aggregator::merge`.
    #[error("frequency table holds {counted} occurrences but {merged} tokens were merged")]
    AggregationInvariant { merged: u64, counted: u64 },
}

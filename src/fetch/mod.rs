// src/fetch/mod.rs
// =============================================================================
// This module downloads document contents.
//
// Submodules:
// - http: the real fetcher, one GET per URL with reqwest
//
// The coordinator only depends on the `Fetch` trait, which is what lets the
// pipeline tests swap in a scripted fetcher (fixed texts, forced failures,
// random delays) instead of a network.
// =============================================================================

mod http;

use async_trait::async_trait;

use crate::error::FetchError;

pub use http::HttpFetcher;

/// Retrieves the full text of one document.
///
/// Implementations must be cheap to share across tasks (`Send + Sync`); the
/// coordinator holds one behind an `Arc` and calls it from every task.
/// No retries: a failed call is the final word for that URL.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

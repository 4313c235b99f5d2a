// src/github/mod.rs
// =============================================================================
// This module finds the documents to download in a GitHub directory.
//
// Currently implements:
// - Turning a "tree" URL into its raw.githubusercontent.com base URL
// - Reading the file list out of the JSON GitHub embeds in the tree page
// - Filtering file names by prefix (e.g. only "ch" chapter files)
//
// Rust concepts:
// - Modules: Organizing related functionality
// - Public API: What other parts of the app can use
// =============================================================================

mod discover;

pub use discover::{discover_documents, raw_base_from_listing};

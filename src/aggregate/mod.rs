// src/aggregate/mod.rs
// =============================================================================
// The shared word -> count table that every fetch task writes into.
//
// Submodules:
// - table: the Aggregator (concurrent writes) and FrequencyTable (the
//   plain map handed out once writing is over)
// =============================================================================

mod table;

pub use table::{Aggregator, FrequencyTable};

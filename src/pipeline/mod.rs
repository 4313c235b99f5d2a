// src/pipeline/mod.rs
// =============================================================================
// The fan-out/fan-in core.
//
// Submodules:
// - barrier: counts task completions and wakes the waiter after the Nth
// - coordinator: spawns one fetch+tokenize task per URL, feeds the
//   Aggregator, waits on the barrier and hands the table to the ranker
// =============================================================================

mod barrier;
mod coordinator;

pub use coordinator::{Coordinator, PipelineSettings, RunReport};

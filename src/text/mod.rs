// src/text/mod.rs
// =============================================================================
// Text normalization: raw document text in, word tokens out.
//
// Pure functions only, nothing here touches the network or shared state,
// so fetch tasks can call it from any thread.
// =============================================================================

mod tokenize;

pub use tokenize::tokenize;

// src/output/mod.rs
// =============================================================================
// Where the ranked words go.
//
// Submodules:
// - word_list: the space-separated word list file
// - display: JSON and terminal table output for humans and scripts
// =============================================================================

mod display;
mod word_list;

pub use display::{print_json, print_summary, print_table};
pub use word_list::write_word_list;

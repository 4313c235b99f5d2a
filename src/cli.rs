// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Everything has a default, so running `wordrank` with no arguments ranks
// the words of the Rust book's chapters and writes word_list.txt.
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Derive macros: Automatically generate code for our types
// - Option<T>: for flags that may be absent
// =============================================================================

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::pipeline::PipelineSettings;
use crate::rank::DEFAULT_MAX_WORD_LEN;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "wordrank",
    version = "0.1.0",
    about = "Rank the words used across the files of a GitHub directory",
    long_about = "wordrank lists a GitHub directory, downloads every matching file concurrently \
                  and writes the words of all of them ordered from most to least frequent."
)]
pub struct Cli {
    /// GitHub directory page listing the documents
    #[arg(long, default_value = "https://github.com/rust-lang/book/tree/main/src")]
    pub listing_url: String,

    /// Base URL the file names are appended to
    ///
    /// Defaults to the raw.githubusercontent.com equivalent of --listing-url
    #[arg(long)]
    pub raw_base_url: Option<String>,

    /// Only fetch files whose name starts with this prefix
    #[arg(long, default_value = "ch")]
    pub prefix: String,

    /// Where to write the word list
    #[arg(short, long, default_value = "word_list.txt")]
    pub output: PathBuf,

    /// Leave out words longer than this many characters
    #[arg(long, default_value_t = DEFAULT_MAX_WORD_LEN)]
    pub max_word_len: usize,

    /// Maximum number of downloads in flight (0 = no limit)
    #[arg(long, default_value_t = 16)]
    pub concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Cancel everything still running after this many seconds
    #[arg(long)]
    pub deadline_secs: Option<u64>,

    /// Fail the whole run if any single document can't be fetched
    #[arg(long)]
    pub strict: bool,

    /// Print the ranking as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Number of rows in the table
    #[arg(long, default_value_t = 20)]
    pub top: usize,
}

impl Cli {
    /// Progress lines and the table go to stdout only when it isn't
    /// carrying JSON.
    pub fn progress_enabled(&self) -> bool {
        !self.json
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            concurrency: self.concurrency,
            deadline: self.deadline_secs.map(Duration::from_secs),
            strict: self.strict,
            max_word_len: self.max_word_len,
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. default_value vs default_value_t?
//    - default_value takes a string that clap parses like user input
//    - default_value_t takes a typed Rust value (needs Display for --help)
//
// 2. Why Option<u64> for deadline_secs?
//    - There is no sensible "infinite" number to use as a default
//    - None means the flag was not given: no deadline at all
//
// 3. What is PathBuf?
//    - An owned file system path, like String is to &str
// -----------------------------------------------------------------------------

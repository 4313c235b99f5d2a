// src/output/word_list.rs
// =============================================================================
// Writes the ranked words to a file.
//
// Format: every word that passes the length filter, in rank order, each one
// followed by a single space. Counts are not written. Words over the limit
// are skipped entirely, never cut short.
//
// Example (limit 15):
//   [("the", 9), ("incomprehensibilities", 4), ("rust", 2)]
//   -> "the rust "
// =============================================================================

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::rank::{within_limit, RankedEntry};

/// Creates (or truncates) `path` and writes the word list into it.
///
/// Returns how many words were written.
pub fn write_word_list(
    path: &Path,
    ranked: &[RankedEntry],
    max_word_len: usize,
) -> io::Result<usize> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let written = write_words(&mut writer, ranked, max_word_len)?;
    // flush() surfaces write errors that BufWriter's Drop would swallow
    writer.flush()?;
    Ok(written)
}

/// Writes the word list to any writer.
pub fn write_words<W: Write>(
    out: &mut W,
    ranked: &[RankedEntry],
    max_word_len: usize,
) -> io::Result<usize> {
    let mut written = 0;
    for entry in ranked {
        if !within_limit(&entry.word, max_word_len) {
            continue;
        }
        out.write_all(entry.word.as_bytes())?;
        out.write_all(b" ")?;
        written += 1;
    }
    Ok(written)
}

// src/text/tokenize.rs
// =============================================================================
// Splits a document into normalized word tokens.
//
// Rules, in this order:
// 1. Remove punctuation. ASCII punctuation ([[:punct:]], which also covers
//    symbols like `$` `+` `|`) and every Unicode punctuation character
//    (\p{P}, so curly quotes, em dashes, CJK full stops...).
// 2. Lowercase everything (Unicode-aware).
// 3. Split on runs of whitespace, dropping empty pieces.
//
// Removing punctuation *before* splitting means "don't" becomes "dont" and
// "foo—bar" becomes "foobar". That matches how the word list has always been
// built, and the ranking filters out the long glued tokens later.
// =============================================================================

use once_cell::sync::Lazy;
use regex::Regex;

// Compiled once per process; Regex is Sync so every fetch task shares it.
static PUNCTUATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[[:punct:]\p{P}]").expect("punctuation pattern is valid")
});

/// Normalizes `text` into its sequence of word tokens.
///
/// Empty or punctuation-only input yields an empty Vec.
pub fn tokenize(text: &str) -> Vec<String> {
    let stripped = PUNCTUATION.replace_all(text, "");
    stripped
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_sentence() {
        assert_eq!(tokenize("The Cat sat."), vec!["the", "cat", "sat"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t ").is_empty());
        assert!(tokenize("... !!! ???").is_empty());
    }

    #[test]
    fn test_punctuation_removed_before_split() {
        assert_eq!(tokenize("don't stop-me"), vec!["dont", "stopme"]);
        assert_eq!(tokenize("`Vec<T>`"), vec!["vect"]);
    }

    #[test]
    fn test_unicode_punctuation_and_case() {
        // Curly quotes, em dash and the inverted question mark are all \p{P}.
        assert_eq!(
            tokenize("“Größe” — ¿QUÉ?"),
            vec!["größe", "qué"]
        );
    }

    #[test]
    fn test_whitespace_runs() {
        assert_eq!(tokenize("a  b\n\nc\t d"), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_tokenize_is_idempotent_after_rejoin() {
        let text = "Ownership, borrowing & lifetimes: Rust's *core* ideas!\n\n## Chapter 4";
        let once = tokenize(text);
        let twice = tokenize(&once.join(" "));
        assert_eq!(once, twice);
    }
}

//! Word tokenization shared by documents and reference corpora.
//!
//! A token is a lowercase run of ASCII letters, at least `min_length`
//! characters long. Digits, punctuation and non-ASCII letters never appear in
//! a token; a word-run containing any of them is dropped whole rather than
//! trimmed, so `abc123` and `café` yield nothing.
//!
//! The same [`Tokenizer`] value must be used on both sides of a comparison.
//! [`crate::corpus::ReferenceCorpus`] records the tokenizer it was built with
//! and [`crate::analysis::analyze_keyness`] reuses it for the document.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Maximal runs of letters, combining marks and digits.
static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{Alphabetic}\p{M}\p{Nd}]+").expect("valid regex"));

/// Same as [`WORD_PATTERN`], but straight and curly apostrophes join the run.
static WORD_WITH_APOSTROPHES_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{Alphabetic}\p{M}\p{Nd}'’]+").expect("valid regex"));

/// Default minimum token length.
pub const DEFAULT_MIN_LENGTH: usize = 3;

/// Tokenization rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tokenizer {
    min_length: usize,
    keep_apostrophes: bool,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            keep_apostrophes: false,
        }
    }
}

impl Tokenizer {
    /// Create a tokenizer with the default rules (min length 3, no apostrophes).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum token length in characters. Values below 1 become 1.
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length.max(1);
        self
    }

    /// Keep apostrophes inside words (`don't`) instead of splitting on them.
    pub const fn with_apostrophes(mut self, keep: bool) -> Self {
        self.keep_apostrophes = keep;
        self
    }

    /// Minimum token length in characters.
    pub const fn min_length(&self) -> usize {
        self.min_length
    }

    /// Whether apostrophes are retained inside tokens.
    pub const fn keeps_apostrophes(&self) -> bool {
        self.keep_apostrophes
    }

    /// Split `text` into tokens, preserving their order of appearance.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let pattern = if self.keep_apostrophes {
            &*WORD_WITH_APOSTROPHES_PATTERN
        } else {
            &*WORD_PATTERN
        };

        pattern
            .find_iter(text)
            .filter_map(|m| self.normalize(m.as_str()))
            .collect()
    }

    /// Tokenize a stream of raw words, e.g. from a corpus provider.
    ///
    /// Each raw word goes through [`Tokenizer::tokenize`], so a corpus word
    /// like `"cat's"` is treated exactly as it would be inside a document.
    pub fn tokenize_words<I, S>(&self, words: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        words
            .into_iter()
            .flat_map(|w| self.tokenize(w.as_ref()))
            .collect()
    }

    fn normalize(&self, run: &str) -> Option<String> {
        let lowered = run.to_lowercase();
        let word = if self.keep_apostrophes {
            lowered.replace('’', "'").trim_matches('\'').to_string()
        } else {
            lowered
        };

        let valid = word
            .chars()
            .all(|c| c.is_ascii_lowercase() || (self.keep_apostrophes && c == '\''));
        // ASCII-only at this point, so byte length is char length.
        (valid && word.len() >= self.min_length).then_some(word)
    }
}

/// Tokenize `text` with the default rules.
pub fn tokenize(text: &str) -> Vec<String> {
    Tokenizer::default().tokenize(text)
}

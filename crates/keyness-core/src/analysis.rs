//! Keyness analysis of a document against a reference corpus.
//!
//! Runs the whole pipeline: tokenize the document with the corpus's own
//! tokenizer, count it, select candidates, score them, and package the
//! result with the corpus metadata.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::candidates::{DEFAULT_TOP_N, select_from_ranking};
use crate::corpus::{CorpusInfo, CorpusRegistry, ReferenceCorpus};
use crate::error::KeynessResult;
use crate::frequency::build_frequencies;
use crate::scorer::{KeywordEntry, SortMode, score};

/// Tunable knobs of one analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeynessOptions {
    /// Number of top corpus words tested in addition to the document's words.
    pub top_n: usize,
    /// Result ordering.
    pub sort: SortMode,
}

impl Default for KeynessOptions {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            sort: SortMode::default(),
        }
    }
}

/// Result of a keyness analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct KeynessReport {
    /// Document tokens, repeats included.
    pub total_words: u64,
    /// Distinct document tokens.
    pub unique_words: usize,
    /// Number of entries in `keywords`.
    pub significant_keywords: usize,
    /// Number of candidate words that went through the significance test.
    pub candidates_tested: usize,
    /// Ordering applied to `keywords`.
    pub sort: SortMode,
    /// The reference corpus compared against.
    pub corpus: CorpusInfo,
    /// Significant keywords, ordered by `sort`.
    pub keywords: Vec<KeywordEntry>,
}

impl KeynessReport {
    /// Keywords the document uses more than the corpus does.
    pub fn over_represented(&self) -> impl Iterator<Item = &KeywordEntry> {
        self.keywords.iter().filter(|k| k.is_over_represented())
    }

    /// Keywords the document uses less than the corpus does.
    pub fn under_represented(&self) -> impl Iterator<Item = &KeywordEntry> {
        self.keywords.iter().filter(|k| k.effect_size < 0.0)
    }

    /// JSON Schema of the serialized report.
    pub fn output_schema() -> serde_json::Value {
        schemars::schema_for!(KeynessReport).to_value()
    }
}

/// Compare `text` against a prepared reference corpus.
///
/// An empty document is not an error: the corpus's top words are still
/// tested, and with nothing to compare they come out insignificant.
#[tracing::instrument(skip(text, corpus), fields(text_len = text.len(), corpus = %corpus.id()))]
pub fn analyze_keyness(
    text: &str,
    corpus: &ReferenceCorpus,
    options: &KeynessOptions,
) -> KeynessReport {
    let tokens = corpus.tokenizer().tokenize(text);
    let doc = build_frequencies(&tokens);
    let reference = corpus.distribution();

    let corpus_top = corpus.top_words(options.top_n).iter().map(String::as_str);
    let candidates = select_from_ranking(&doc, corpus_top);
    let keywords = score(&candidates, &doc, reference, options.sort);

    tracing::debug!(
        total_words = doc.total(),
        candidates = candidates.len(),
        significant = keywords.len(),
        "keyness analysis complete"
    );

    KeynessReport {
        total_words: doc.total(),
        unique_words: doc.unique(),
        significant_keywords: keywords.len(),
        candidates_tested: candidates.len(),
        sort: options.sort,
        corpus: corpus.info(),
        keywords,
    }
}

/// Resolve `corpus_name` in `registry` and compare `text` against it.
///
/// The name is validated before the document is touched, so an unknown
/// corpus fails fast with [`crate::KeynessError::UnknownCorpus`].
pub fn analyze_with_registry(
    text: &str,
    corpus_name: &str,
    registry: &CorpusRegistry,
    options: &KeynessOptions,
) -> KeynessResult<KeynessReport> {
    let corpus = registry.get_by_name(corpus_name)?;
    Ok(analyze_keyness(text, &corpus, options))
}

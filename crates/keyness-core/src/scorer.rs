//! Keyness scoring of candidate words.

use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::frequency::FrequencyDistribution;
use crate::stats::{self, Significance, SMOOTHING};

/// How keyness results are ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum SortMode {
    /// Effect size ascending: most under-represented first, most
    /// over-represented last.
    #[default]
    Effect,
    /// Absolute effect size descending: most surprising first, regardless of
    /// direction.
    Magnitude,
}

impl SortMode {
    /// Mode name as used in configuration and on the command line.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Effect => "effect",
            Self::Magnitude => "magnitude",
        }
    }
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One significant keyword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct KeywordEntry {
    /// The token.
    pub word: String,
    /// Cohen's h, 4 decimal places. Positive means over-represented in the
    /// document, negative means under-represented.
    pub effect_size: f64,
    /// Log-likelihood statistic G², 4 decimal places.
    pub ll_score: f64,
    /// Significance tier of `ll_score`.
    pub significance: Significance,
    /// Occurrences in the document.
    pub user_freq: u64,
    /// Corpus occurrences scaled to the document's size, 2 decimal places.
    pub corpus_freq: f64,
}

impl KeywordEntry {
    /// Whether the document uses the word more than the corpus does.
    pub fn is_over_represented(&self) -> bool {
        self.effect_size > 0.0
    }
}

/// Score every candidate and return the significant ones, ordered by `sort`.
///
/// Counts are smoothed by [`SMOOTHING`] before the G² test and the effect
/// size, so words missing from the document can still come out significant.
/// Candidates observed in neither distribution carry no information and are
/// not scored.
#[tracing::instrument(skip_all, fields(candidates = candidates.len(), sort = %sort))]
pub fn score(
    candidates: &BTreeSet<String>,
    doc: &FrequencyDistribution,
    corpus: &FrequencyDistribution,
    sort: SortMode,
) -> Vec<KeywordEntry> {
    let doc_total = doc.total();
    let corpus_total = corpus.total();

    let mut entries: Vec<KeywordEntry> = candidates
        .iter()
        .filter_map(|word| score_word(word, doc, corpus))
        .collect();

    sort_entries(&mut entries, sort);

    tracing::debug!(
        doc_total,
        corpus_total,
        significant = entries.len(),
        "scored candidates"
    );
    entries
}

fn score_word(
    word: &str,
    doc: &FrequencyDistribution,
    corpus: &FrequencyDistribution,
) -> Option<KeywordEntry> {
    let user_freq = doc.count(word);
    let corpus_count = corpus.count(word);
    if user_freq == 0 && corpus_count == 0 {
        return None;
    }

    let a = user_freq as f64 + SMOOTHING;
    let b = corpus_count as f64 + SMOOTHING;

    let ll = stats::log_likelihood(a, b, doc.total(), corpus.total());
    let significance = Significance::from_statistic(ll)?;

    let effect = stats::cohens_h(
        stats::proportion(a, doc.total()),
        stats::proportion(b, corpus.total()),
    );
    let corpus_freq = if corpus.total() == 0 {
        0.0
    } else {
        corpus_count as f64 / corpus.total() as f64 * doc.total() as f64
    };

    Some(KeywordEntry {
        word: word.to_string(),
        effect_size: stats::round_to(effect, 4),
        ll_score: stats::round_to(ll, 4),
        significance,
        user_freq,
        corpus_freq: stats::round_to(corpus_freq, 2),
    })
}

/// Order entries by `sort`, breaking ties by word.
pub fn sort_entries(entries: &mut [KeywordEntry], sort: SortMode) {
    let by_word = |a: &KeywordEntry, b: &KeywordEntry| a.word.cmp(&b.word);
    match sort {
        SortMode::Effect => entries.sort_by(|a, b| {
            a.effect_size
                .total_cmp(&b.effect_size)
                .then_with(|| by_word(a, b))
        }),
        SortMode::Magnitude => entries.sort_by(|a, b| {
            b.effect_size
                .abs()
                .total_cmp(&a.effect_size.abs())
                .then_with(|| by_word(a, b))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidates::select_candidates;
    use crate::stats::CRITICAL_P05;

    fn dist(text: &str) -> FrequencyDistribution {
        FrequencyDistribution::from_tokens(text.split_whitespace())
    }

    /// 10,000 tokens: "the" 600 times, "cat" once, the rest spread over
    /// 100 filler words.
    fn reference() -> FrequencyDistribution {
        let mut tokens: Vec<String> = Vec::new();
        tokens.extend(std::iter::repeat_n("the".to_string(), 600));
        tokens.push("cat".to_string());
        for i in 0..9399 {
            tokens.push(format!("filler{}", i % 100));
        }
        FrequencyDistribution::from_tokens(&tokens)
    }

    fn entry(word: &str, effect_size: f64) -> KeywordEntry {
        KeywordEntry {
            word: word.to_string(),
            effect_size,
            ll_score: 10.0,
            significance: Significance::Medium,
            user_freq: 1,
            corpus_freq: 1.0,
        }
    }

    #[test]
    fn over_represented_word_is_significant() {
        let doc = dist("the cat sat the mat the cat ran");
        let corpus = reference();
        let candidates = select_candidates(&doc, &corpus, 10);
        let entries = score(&candidates, &doc, &corpus, SortMode::Effect);

        let cat = entries.iter().find(|e| e.word == "cat").expect("cat is key");
        assert!(cat.is_over_represented());
        assert_eq!(cat.user_freq, 2);
        assert_eq!(cat.significance, Significance::High);
        assert!((cat.ll_score - 31.2454).abs() < 1e-3, "ll {}", cat.ll_score);
        assert_eq!(cat.corpus_freq, 0.0);
    }

    #[test]
    fn every_entry_clears_the_gate() {
        let doc = dist("the cat sat the mat the cat ran");
        let corpus = reference();
        let candidates = select_candidates(&doc, &corpus, 500);
        for e in score(&candidates, &doc, &corpus, SortMode::Effect) {
            assert!(e.ll_score >= CRITICAL_P05, "{} scored {}", e.word, e.ll_score);
        }
    }

    #[test]
    fn missing_frequent_word_is_under_represented() {
        // 1,500 document tokens, none of them "the".
        let doc_tokens: Vec<String> = (0..1500).map(|i| format!("filler{}", i % 100)).collect();
        let doc = FrequencyDistribution::from_tokens(&doc_tokens);
        let corpus = reference();
        let candidates = select_candidates(&doc, &corpus, 500);
        let entries = score(&candidates, &doc, &corpus, SortMode::Effect);

        let the = entries.iter().find(|e| e.word == "the").expect("the is key");
        assert_eq!(the.user_freq, 0);
        assert!(the.effect_size < 0.0);
        assert_eq!(the.significance, Significance::High);
        assert_eq!(the.corpus_freq, 90.0);
        // Most under-represented sorts first.
        assert_eq!(entries[0].word, "the");
    }

    #[test]
    fn short_document_cannot_show_absence() {
        let doc_tokens: Vec<String> = (0..20).map(|i| format!("filler{i}")).collect();
        let doc = FrequencyDistribution::from_tokens(&doc_tokens);
        let corpus = reference();
        let candidates = select_candidates(&doc, &corpus, 500);
        let entries = score(&candidates, &doc, &corpus, SortMode::Effect);
        assert!(entries.iter().all(|e| e.word != "the"));
    }

    #[test]
    fn proportional_document_has_no_keywords() {
        let doc = dist(&"alpha beta gamma delta ".repeat(25));
        let corpus = dist(&"alpha beta gamma delta ".repeat(2500));
        let candidates = select_candidates(&doc, &corpus, 500);
        assert!(score(&candidates, &doc, &corpus, SortMode::Effect).is_empty());
    }

    #[test]
    fn empty_document_scores_nothing() {
        let doc = dist("");
        let corpus = reference();
        let candidates = select_candidates(&doc, &corpus, 500);
        assert!(!candidates.is_empty());
        assert!(score(&candidates, &doc, &corpus, SortMode::Effect).is_empty());
    }

    #[test]
    fn empty_corpus_scores_nothing() {
        let doc = dist("the cat sat");
        let corpus = dist("");
        let candidates = select_candidates(&doc, &corpus, 500);
        assert!(score(&candidates, &doc, &corpus, SortMode::Effect).is_empty());
    }

    #[test]
    fn unseen_candidates_are_skipped() {
        let doc = dist("the cat sat the mat the cat ran");
        let corpus = reference();
        let candidates: BTreeSet<String> = ["unicorn".to_string()].into_iter().collect();
        assert!(score(&candidates, &doc, &corpus, SortMode::Effect).is_empty());
    }

    #[test]
    fn effect_sort_is_ascending() {
        let mut entries = vec![entry("b", 0.5), entry("a", -0.7), entry("c", 0.1)];
        sort_entries(&mut entries, SortMode::Effect);
        let words: Vec<_> = entries.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["a", "c", "b"]);
    }

    #[test]
    fn magnitude_sort_is_descending_absolute() {
        let mut entries = vec![entry("b", 0.5), entry("a", -0.7), entry("c", 0.1)];
        sort_entries(&mut entries, SortMode::Magnitude);
        let words: Vec<_> = entries.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["a", "b", "c"]);
    }

    #[test]
    fn ties_break_by_word() {
        let mut entries = vec![entry("zeta", 0.3), entry("alpha", -0.3), entry("beta", 0.3)];
        sort_entries(&mut entries, SortMode::Magnitude);
        let words: Vec<_> = entries.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["alpha", "beta", "zeta"]);
    }

    #[test]
    fn sort_mode_names() {
        assert_eq!(SortMode::default(), SortMode::Effect);
        assert_eq!(serde_json::to_string(&SortMode::Magnitude).unwrap(), "\"magnitude\"");
    }
}

//! Candidate word selection.
//!
//! Only candidates are scored. Document words are needed to find what the
//! document over-uses; the most frequent corpus words are needed to find what
//! it under-uses, including words the document never contains at all.
//! Without the corpus half, a short document could never report a missing
//! word, no matter how common that word is in the reference corpus.

use std::collections::BTreeSet;

use crate::frequency::FrequencyDistribution;

/// Default number of top corpus words admitted as candidates.
pub const DEFAULT_TOP_N: usize = 500;

/// Union of every distinct document token and the `top_n` most frequent
/// corpus tokens (count descending, ties by token).
///
/// The set is ordered, so iterating it is deterministic. Ranks the whole
/// corpus vocabulary; when the same corpus is reused, rank it once and call
/// [`select_from_ranking`] instead.
pub fn select_candidates(
    doc: &FrequencyDistribution,
    corpus: &FrequencyDistribution,
    top_n: usize,
) -> BTreeSet<String> {
    let top = corpus.most_common(top_n);
    select_from_ranking(doc, top.iter().map(|&(token, _)| token))
}

/// Union of every distinct document token and an already ranked slice of
/// top corpus tokens.
#[tracing::instrument(skip_all, fields(doc_unique = doc.unique()))]
pub fn select_from_ranking<'a, I>(doc: &FrequencyDistribution, corpus_top: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut candidates: BTreeSet<String> = doc.tokens().map(str::to_string).collect();
    let from_doc = candidates.len();

    candidates.extend(corpus_top.into_iter().map(str::to_string));

    tracing::debug!(
        from_doc,
        from_corpus_only = candidates.len() - from_doc,
        "selected candidates"
    );
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dist(text: &str) -> FrequencyDistribution {
        FrequencyDistribution::from_tokens(text.split_whitespace())
    }

    #[test]
    fn includes_all_document_words() {
        let doc = dist("zebra quokka zebra");
        let corpus = dist("the the the and and was");
        let candidates = select_candidates(&doc, &corpus, 1);
        assert!(candidates.contains("zebra"));
        assert!(candidates.contains("quokka"));
        assert!(candidates.contains("the"));
        assert!(!candidates.contains("and"));
        assert_eq!(candidates.len(), 3);
    }

    #[test]
    fn admits_top_corpus_words_absent_from_document() {
        let doc = dist("");
        let corpus = dist("the the the and and was");
        let candidates = select_candidates(&doc, &corpus, 2);
        assert_eq!(
            candidates.into_iter().collect::<Vec<_>>(),
            vec!["and".to_string(), "the".to_string()]
        );
    }

    #[test]
    fn zero_top_n_admits_document_words_only() {
        let doc = dist("cat sat");
        let corpus = dist("the the and");
        let candidates = select_candidates(&doc, &corpus, 0);
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn overlapping_words_are_not_duplicated() {
        let doc = dist("the cat");
        let corpus = dist("the the cat dog");
        let candidates = select_candidates(&doc, &corpus, 2);
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn ties_at_cutoff_break_lexically() {
        let doc = dist("");
        let corpus = dist("pear fig apple kiwi");
        let candidates = select_candidates(&doc, &corpus, 2);
        assert!(candidates.contains("apple"));
        assert!(candidates.contains("fig"));
    }

    #[test]
    fn top_n_larger_than_vocabulary() {
        let doc = dist("cat");
        let corpus = dist("the and was");
        assert_eq!(select_candidates(&doc, &corpus, DEFAULT_TOP_N).len(), 4);
    }

    #[test]
    fn ranking_matches_full_selection() {
        let doc = dist("zebra the");
        let corpus = dist("the the the and and was fig");
        let ranking: Vec<&str> = corpus.most_common(2).into_iter().map(|(t, _)| t).collect();
        assert_eq!(
            select_from_ranking(&doc, ranking),
            select_candidates(&doc, &corpus, 2)
        );
    }
}

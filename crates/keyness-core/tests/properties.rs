//! Property-based tests using proptest

use std::collections::BTreeSet;

use keyness_core::candidates::select_candidates;
use keyness_core::frequency::FrequencyDistribution;
use keyness_core::scorer::score;
use keyness_core::stats::{self, CRITICAL_P05, SMOOTHING};
use keyness_core::*;
use proptest::prelude::*;

const VOCAB: &[&str] = &[
    "the", "and", "cat", "dog", "bird", "tree", "river", "stone", "house", "light", "music",
    "paper", "window", "garden", "engine", "market", "winter", "summer", "silver", "signal",
];

fn words(max: usize) -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(prop::sample::select(VOCAB), 0..max)
}

fn corpus_from(words: &[&str]) -> ReferenceCorpus {
    let owned: Vec<String> = words.iter().map(ToString::to_string).collect();
    ReferenceCorpus::from_words(CorpusId::Brown, Tokenizer::default(), &owned)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_every_keyword_clears_the_gate(doc in words(300), reference in words(3000)) {
        let corpus = corpus_from(&reference);
        let report = analyze_keyness(&doc.join(" "), &corpus, &KeynessOptions::default());
        for keyword in &report.keywords {
            prop_assert!(keyword.ll_score >= CRITICAL_P05, "{} scored {}", keyword.word, keyword.ll_score);
        }
        prop_assert_eq!(report.significant_keywords, report.keywords.len());
    }

    #[test]
    fn test_effect_sign_matches_smoothed_proportions(doc in words(300), reference in words(3000)) {
        let corpus = corpus_from(&reference);
        let report = analyze_keyness(&doc.join(" "), &corpus, &KeynessOptions::default());
        let doc_dist = FrequencyDistribution::from_tokens(&doc);
        let corpus_dist = corpus.distribution();

        for keyword in &report.keywords {
            let p1 = stats::proportion(doc_dist.count(&keyword.word) as f64 + SMOOTHING, doc_dist.total());
            let p2 = stats::proportion(corpus_dist.count(&keyword.word) as f64 + SMOOTHING, corpus_dist.total());
            if keyword.effect_size > 0.0 {
                prop_assert!(p1 > p2, "{}: effect {} but {} <= {}", keyword.word, keyword.effect_size, p1, p2);
            } else if keyword.effect_size < 0.0 {
                prop_assert!(p1 < p2, "{}: effect {} but {} >= {}", keyword.word, keyword.effect_size, p1, p2);
            }
        }
    }

    #[test]
    fn test_candidates_cover_document_and_top_n(
        doc in words(200),
        reference in words(2000),
        top_n in 0usize..25,
    ) {
        let doc_dist = FrequencyDistribution::from_tokens(&doc);
        let corpus_dist = FrequencyDistribution::from_tokens(&reference);
        let candidates = select_candidates(&doc_dist, &corpus_dist, top_n);

        let mut expected: BTreeSet<String> = doc.iter().map(ToString::to_string).collect();
        expected.extend(corpus_dist.most_common(top_n).into_iter().map(|(w, _)| w.to_string()));
        prop_assert_eq!(candidates, expected);
    }

    #[test]
    fn test_scoring_is_deterministic(doc in words(200), reference in words(2000)) {
        let doc_dist = FrequencyDistribution::from_tokens(&doc);
        let corpus_dist = FrequencyDistribution::from_tokens(&reference);
        let candidates = select_candidates(&doc_dist, &corpus_dist, 10);
        let first = score(&candidates, &doc_dist, &corpus_dist, SortMode::Magnitude);
        let second = score(&candidates, &doc_dist, &corpus_dist, SortMode::Magnitude);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_report_counts_match_document(doc in words(300)) {
        let corpus = corpus_from(&VOCAB.repeat(20));
        let report = analyze_keyness(&doc.join(" "), &corpus, &KeynessOptions::default());
        let distinct: BTreeSet<&str> = doc.iter().copied().collect();
        prop_assert_eq!(report.total_words, doc.len() as u64);
        prop_assert_eq!(report.unique_words, distinct.len());
    }

    #[test]
    fn test_cohens_h_is_bounded(p1 in -1.0f64..2.0, p2 in -1.0f64..2.0) {
        let h = stats::cohens_h(p1, p2);
        prop_assert!(h.abs() <= std::f64::consts::PI + 1e-12);
        prop_assert!((h + stats::cohens_h(p2, p1)).abs() < 1e-12);
    }

    #[test]
    fn test_g_squared_is_finite_and_non_negative(
        a in 0u64..500,
        b in 0u64..5000,
        doc_total in 0u64..1000,
        corpus_total in 0u64..100_000,
    ) {
        let ll = stats::log_likelihood(a as f64 + SMOOTHING, b as f64 + SMOOTHING, doc_total, corpus_total);
        prop_assert!(ll.is_finite());
        prop_assert!(ll >= 0.0);
    }
}

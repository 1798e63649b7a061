//! Token frequency distributions.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Occurrence counts for each distinct token, plus the total token count.
///
/// Built once from a token stream and never modified afterwards; `total`
/// always equals the sum of all counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyDistribution {
    counts: HashMap<String, u64>,
    total: u64,
}

impl FrequencyDistribution {
    /// Count the occurrences of each token.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counts: HashMap<String, u64> = HashMap::new();
        let mut total = 0;
        for token in tokens {
            let token = token.as_ref();
            // Avoid allocating for tokens we've already seen.
            if let Some(count) = counts.get_mut(token) {
                *count += 1;
            } else {
                counts.insert(token.to_string(), 1);
            }
            total += 1;
        }
        Self { counts, total }
    }

    /// Occurrences of `token`, or 0 when absent.
    pub fn count(&self, token: &str) -> u64 {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Total number of tokens, repeats included.
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct tokens.
    pub fn unique(&self) -> usize {
        self.counts.len()
    }

    /// Whether no tokens were counted.
    pub const fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Iterate over the distinct tokens, in no particular order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// The `n` most frequent tokens, by count descending then token ascending.
    pub fn most_common(&self, n: usize) -> Vec<(&str, u64)> {
        let mut ranked: Vec<(&str, u64)> = self
            .counts
            .iter()
            .map(|(token, &count)| (token.as_str(), count))
            .collect();
        ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(n);
        ranked
    }
}

/// Build the frequency distribution of a token sequence.
#[tracing::instrument(skip_all, fields(tokens = tokens.len()))]
pub fn build_frequencies(tokens: &[String]) -> FrequencyDistribution {
    let dist = FrequencyDistribution::from_tokens(tokens);
    tracing::debug!(total = dist.total(), unique = dist.unique(), "built frequencies");
    dist
}

//! Reference corpora: identifiers, metadata, word sources and caching.
//!
//! A [`CorpusRegistry`] maps each [`CorpusId`] to a [`TokenProvider`]. The
//! first request for a corpus tokenizes and counts its words into a
//! [`ReferenceCorpus`]; later requests reuse the prepared distribution.
//!
//! ```
//! use keyness_core::corpus::{CorpusId, CorpusRegistry, StaticTokenProvider};
//! use keyness_core::Tokenizer;
//!
//! let registry = CorpusRegistry::new(Tokenizer::default())
//!     .with_provider(CorpusId::Brown, StaticTokenProvider::from_text("the cat and the dog"));
//! let corpus = registry.get(CorpusId::Brown).unwrap();
//! assert_eq!(corpus.distribution().total(), 5);
//! ```

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use camino::{Utf8Path, Utf8PathBuf};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{KeynessError, KeynessResult};
use crate::frequency::FrequencyDistribution;
use crate::tokenizer::Tokenizer;

/// Supported reference corpora.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum CorpusId {
    /// Brown Corpus.
    #[default]
    Brown,
    /// Project Gutenberg selection.
    Gutenberg,
    /// Reuters newswire.
    Reuters,
    /// U.S. presidential inaugural addresses.
    Inaugural,
}

impl CorpusId {
    /// Every supported corpus, in listing order.
    pub const ALL: [Self; 4] = [Self::Brown, Self::Gutenberg, Self::Reuters, Self::Inaugural];

    /// Identifier as used in configuration and on the command line.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Brown => "brown",
            Self::Gutenberg => "gutenberg",
            Self::Reuters => "reuters",
            Self::Inaugural => "inaugural",
        }
    }

    /// Human-readable name.
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Brown => "Brown Corpus",
            Self::Gutenberg => "Project Gutenberg",
            Self::Reuters => "Reuters Corpus",
            Self::Inaugural => "Inaugural Addresses Corpus",
        }
    }

    /// Short description for listings.
    pub const fn summary(&self) -> &'static str {
        match self {
            Self::Brown => "Balanced American English",
            Self::Gutenberg => "Classic literature",
            Self::Reuters => "News articles",
            Self::Inaugural => "Presidential speeches",
        }
    }

    /// Full description for reports.
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Brown => "Balanced corpus of American English across multiple genres",
            Self::Gutenberg => "Classic literature from 19th and early 20th century",
            Self::Reuters => "Newswire articles from Reuters",
            Self::Inaugural => "U.S. Presidential inaugural addresses",
        }
    }

    fn available() -> String {
        Self::ALL
            .iter()
            .map(Self::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for CorpusId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CorpusId {
    type Err = KeynessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == wanted)
            .ok_or_else(|| KeynessError::UnknownCorpus {
                name: s.to_string(),
                available: Self::available(),
            })
    }
}

/// A source of raw corpus words.
///
/// Must return the same words every time it is asked; order is irrelevant.
pub trait TokenProvider: Send + Sync {
    /// All raw words of the corpus, before tokenization.
    fn words(&self) -> KeynessResult<Vec<String>>;
}

/// Words held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenProvider {
    words: Vec<String>,
}

impl StaticTokenProvider {
    /// Provider over an explicit word list.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Provider over the whitespace-separated words of `text`.
    pub fn from_text(text: &str) -> Self {
        Self::new(text.split_whitespace())
    }
}

impl TokenProvider for StaticTokenProvider {
    fn words(&self) -> KeynessResult<Vec<String>> {
        Ok(self.words.clone())
    }
}

/// Words read from a UTF-8 text file, split on whitespace.
#[derive(Debug, Clone)]
pub struct FileTokenProvider {
    path: Utf8PathBuf,
}

impl FileTokenProvider {
    /// Provider reading `path` each time words are requested.
    pub fn new<P: AsRef<Utf8Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the corpus file.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl TokenProvider for FileTokenProvider {
    #[tracing::instrument(skip(self), fields(path = %self.path))]
    fn words(&self) -> KeynessResult<Vec<String>> {
        let text = std::fs::read_to_string(self.path.as_std_path()).map_err(|source| {
            KeynessError::CorpusRead {
                path: self.path.clone(),
                source,
            }
        })?;
        Ok(text.split_whitespace().map(str::to_string).collect())
    }
}

/// Metadata snapshot of a reference corpus, as reported alongside results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CorpusInfo {
    /// Corpus identifier.
    pub name: CorpusId,
    /// Human-readable name.
    pub display_name: String,
    /// Full description.
    pub description: String,
    /// Token count after tokenization.
    pub total_words: u64,
}

/// A tokenized, counted reference corpus.
#[derive(Debug, Clone)]
pub struct ReferenceCorpus {
    id: CorpusId,
    tokenizer: Tokenizer,
    distribution: FrequencyDistribution,
    ranking: Vec<String>,
}

impl ReferenceCorpus {
    /// Tokenize `words` with `tokenizer` and count them.
    #[tracing::instrument(skip(words), fields(raw_words = words.len()))]
    pub fn from_words(id: CorpusId, tokenizer: Tokenizer, words: &[String]) -> Self {
        let tokens = tokenizer.tokenize_words(words);
        let distribution = FrequencyDistribution::from_tokens(&tokens);
        let ranking = distribution
            .most_common(distribution.unique())
            .into_iter()
            .map(|(token, _)| token.to_string())
            .collect();
        tracing::info!(
            corpus = id.as_str(),
            total = distribution.total(),
            unique = distribution.unique(),
            "prepared reference corpus"
        );
        Self {
            id,
            tokenizer,
            distribution,
            ranking,
        }
    }

    /// Read all words from `provider` and prepare them.
    pub fn load(
        id: CorpusId,
        tokenizer: Tokenizer,
        provider: &dyn TokenProvider,
    ) -> KeynessResult<Self> {
        let words = provider.words()?;
        Ok(Self::from_words(id, tokenizer, &words))
    }

    /// Corpus identifier.
    pub const fn id(&self) -> CorpusId {
        self.id
    }

    /// The tokenizer the corpus was built with. Documents compared against
    /// this corpus must be tokenized with it.
    pub const fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Token counts.
    pub const fn distribution(&self) -> &FrequencyDistribution {
        &self.distribution
    }

    /// The `n` most frequent tokens, ranked once when the corpus was
    /// prepared. Same order as [`FrequencyDistribution::most_common`].
    pub fn top_words(&self, n: usize) -> &[String] {
        &self.ranking[..n.min(self.ranking.len())]
    }

    /// Metadata snapshot for reports.
    pub fn info(&self) -> CorpusInfo {
        CorpusInfo {
            name: self.id,
            display_name: self.id.display_name().to_string(),
            description: self.id.description().to_string(),
            total_words: self.distribution.total(),
        }
    }
}

struct RegistryEntry {
    provider: Box<dyn TokenProvider>,
    prepared: OnceLock<Arc<ReferenceCorpus>>,
}

/// Corpus providers plus a lazily filled cache of prepared corpora.
///
/// Construct once and share; a corpus is read and counted at most once per
/// registry, even when [`CorpusRegistry::get`] is called from many threads
/// (a race may prepare it twice, but only one result is kept).
pub struct CorpusRegistry {
    tokenizer: Tokenizer,
    entries: HashMap<CorpusId, RegistryEntry>,
}

impl std::fmt::Debug for CorpusRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut configured: Vec<_> = self.entries.keys().collect();
        configured.sort();
        f.debug_struct("CorpusRegistry")
            .field("tokenizer", &self.tokenizer)
            .field("configured", &configured)
            .finish()
    }
}

impl CorpusRegistry {
    /// Empty registry whose corpora will be tokenized with `tokenizer`.
    pub fn new(tokenizer: Tokenizer) -> Self {
        Self {
            tokenizer,
            entries: HashMap::new(),
        }
    }

    /// Register (or replace) the word source for `id`.
    pub fn with_provider<P: TokenProvider + 'static>(mut self, id: CorpusId, provider: P) -> Self {
        self.entries.insert(
            id,
            RegistryEntry {
                provider: Box::new(provider),
                prepared: OnceLock::new(),
            },
        );
        self
    }

    /// Tokenizer applied to every corpus in this registry.
    pub const fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Whether a provider is registered for `id`.
    pub fn is_configured(&self, id: CorpusId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Whether `id` has already been prepared.
    pub fn is_loaded(&self, id: CorpusId) -> bool {
        self.entries
            .get(&id)
            .is_some_and(|entry| entry.prepared.get().is_some())
    }

    /// The prepared corpus for `id`, loading it on first use.
    pub fn get(&self, id: CorpusId) -> KeynessResult<Arc<ReferenceCorpus>> {
        let entry = self
            .entries
            .get(&id)
            .ok_or(KeynessError::CorpusNotConfigured(id))?;

        if let Some(corpus) = entry.prepared.get() {
            tracing::debug!(corpus = id.as_str(), "reference corpus cache hit");
            return Ok(Arc::clone(corpus));
        }

        let corpus = Arc::new(ReferenceCorpus::load(
            id,
            self.tokenizer,
            entry.provider.as_ref(),
        )?);
        Ok(Arc::clone(entry.prepared.get_or_init(|| corpus)))
    }

    /// Parse `name` and return its prepared corpus.
    ///
    /// Unknown names fail before any corpus is read.
    pub fn get_by_name(&self, name: &str) -> KeynessResult<Arc<ReferenceCorpus>> {
        self.get(name.parse()?)
    }
}

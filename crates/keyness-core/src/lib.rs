//! Core library for keyness.
//!
//! Finds the words that make a document distinctive when compared with a
//! reference corpus. Candidates are scored with a log-likelihood test and
//! sized with Cohen's h, and only statistically significant words are kept.
//!
//! # Modules
//!
//! - [`tokenizer`] - Word extraction and normalization
//! - [`frequency`] - Token frequency distributions
//! - [`candidates`] - Which words get tested
//! - [`stats`] - Log-likelihood, effect size and significance tiers
//! - [`scorer`] - Scoring and ordering of candidates
//! - [`corpus`] - Reference corpora and their registry
//! - [`analysis`] - The end-to-end analysis
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use keyness_core::{CorpusId, KeynessOptions, ReferenceCorpus, Tokenizer, analyze_keyness};
//!
//! let words: Vec<String> = "the dog ran and the dog sat and the bird sang"
//!     .split_whitespace()
//!     .map(str::to_string)
//!     .collect();
//! let corpus = ReferenceCorpus::from_words(CorpusId::Brown, Tokenizer::default(), &words);
//!
//! let report = analyze_keyness("The cat sat.", &corpus, &KeynessOptions::default());
//! assert_eq!(report.total_words, 3);
//! for keyword in &report.keywords {
//!     println!("{} {}", keyword.word, keyword.significance);
//! }
//! ```
#![deny(unsafe_code)]

pub mod analysis;
pub mod candidates;
pub mod config;
pub mod corpus;
pub mod error;
pub mod frequency;
pub mod scorer;
pub mod stats;
pub mod tokenizer;

pub use analysis::{KeynessOptions, KeynessReport, analyze_keyness, analyze_with_registry};
pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use corpus::{
    CorpusId, CorpusInfo, CorpusRegistry, FileTokenProvider, ReferenceCorpus, StaticTokenProvider,
    TokenProvider,
};
pub use error::{ConfigError, ConfigResult, KeynessError, KeynessResult};
pub use frequency::FrequencyDistribution;
pub use scorer::{KeywordEntry, SortMode};
pub use stats::Significance;
pub use tokenizer::Tokenizer;

/// Default maximum input document size: 5 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;

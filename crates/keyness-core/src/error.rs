//! Error types for keyness-core.

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::corpus::CorpusId;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while resolving a reference corpus.
///
/// Scoring itself never fails: degenerate inputs produce an empty report.
#[derive(Error, Debug)]
pub enum KeynessError {
    /// The corpus identifier is not one of the supported corpora.
    #[error("unknown corpus: {name}. Use: {available}")]
    UnknownCorpus {
        /// The identifier that was requested.
        name: String,
        /// Comma-separated list of supported identifiers.
        available: String,
    },

    /// The corpus is supported but no token provider was registered for it.
    #[error("corpus '{0}' is not configured; add a path for it under [corpora]")]
    CorpusNotConfigured(CorpusId),

    /// The corpus word source could not be read.
    #[error("failed to read corpus file {path}")]
    CorpusRead {
        /// Path of the corpus file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using [`KeynessError`].
pub type KeynessResult<T> = Result<T, KeynessError>;

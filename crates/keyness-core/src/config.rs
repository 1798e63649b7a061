//! Configuration loading and discovery.
//!
//! Sources, lowest precedence first:
//! 1. Built-in defaults
//! 2. User config: `~/.config/keyness/config.<ext>`
//! 3. Project config: `.keyness.<ext>` then `keyness.<ext>`, in the closest
//!    directory (walking up from the search root) that has any
//! 4. Explicit files added with [`ConfigLoader::with_file`]
//! 5. Environment variables prefixed `KEYNESS_` (e.g. `KEYNESS_TOP_N=1000`)
//!
//! Where `<ext>` is one of `toml`, `yaml`, `yml`, `json`. Files found in the
//! same directory are all merged, later extensions overriding earlier ones.
//!
//! # Example
//! ```no_run
//! use camino::Utf8PathBuf;
//! use keyness_core::config::ConfigLoader;
//!
//! let cwd = Utf8PathBuf::try_from(std::env::current_dir().unwrap()).unwrap();
//! let (config, _sources) = ConfigLoader::new()
//!     .with_project_search(&cwd)
//!     .load()
//!     .unwrap();
//! let registry = config.corpus_registry(&cwd);
//! ```

use std::collections::BTreeMap;

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::analysis::KeynessOptions;
use crate::candidates::DEFAULT_TOP_N;
use crate::corpus::{CorpusId, CorpusRegistry, FileTokenProvider};
use crate::error::{ConfigError, ConfigResult};
use crate::scorer::SortMode;
use crate::tokenizer::{DEFAULT_MIN_LENGTH, Tokenizer};

/// The configuration for keyness.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Log level for the application (e.g., "debug", "info", "warn", "error").
    pub log_level: LogLevel,
    /// Directory for JSONL log files (falls back to platform defaults if unset).
    pub log_dir: Option<Utf8PathBuf>,
    /// Maximum input document size in bytes. Omit for the default (5 MiB).
    pub max_input_bytes: Option<usize>,
    /// Disable the input size limit entirely.
    pub disable_input_limit: bool,
    /// Number of most frequent corpus words tested alongside document words.
    pub top_n: usize,
    /// Result ordering.
    pub sort: SortMode,
    /// Minimum token length in characters.
    pub min_token_length: usize,
    /// Keep apostrophes inside tokens (`don't`).
    pub keep_apostrophes: bool,
    /// Corpus used when none is named on the command line.
    pub default_corpus: CorpusId,
    /// Plain-text word source for each corpus. Relative paths resolve
    /// against the working directory.
    pub corpora: BTreeMap<CorpusId, Utf8PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            log_dir: None,
            max_input_bytes: None,
            disable_input_limit: false,
            top_n: DEFAULT_TOP_N,
            sort: SortMode::default(),
            min_token_length: DEFAULT_MIN_LENGTH,
            keep_apostrophes: false,
            default_corpus: CorpusId::default(),
            corpora: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Tokenizer described by this configuration.
    pub fn tokenizer(&self) -> Tokenizer {
        Tokenizer::new()
            .with_min_length(self.min_token_length)
            .with_apostrophes(self.keep_apostrophes)
    }

    /// Analysis options described by this configuration.
    pub const fn keyness_options(&self) -> KeynessOptions {
        KeynessOptions {
            top_n: self.top_n,
            sort: self.sort,
        }
    }

    /// Effective input size limit, or `None` when disabled.
    pub fn input_limit(&self) -> Option<usize> {
        if self.disable_input_limit {
            None
        } else {
            Some(self.max_input_bytes.unwrap_or(crate::DEFAULT_MAX_INPUT_BYTES))
        }
    }

    /// Path configured for `id`, resolved against `base` when relative.
    pub fn corpus_path(&self, id: CorpusId, base: &Utf8Path) -> Option<Utf8PathBuf> {
        self.corpora.get(&id).map(|path| {
            if path.is_relative() {
                base.join(path)
            } else {
                path.clone()
            }
        })
    }

    /// Registry with a file provider for every configured corpus.
    ///
    /// Nothing is read until a corpus is first requested.
    pub fn corpus_registry(&self, base: &Utf8Path) -> CorpusRegistry {
        CorpusId::ALL
            .into_iter()
            .filter_map(|id| self.corpus_path(id, base).map(|path| (id, path)))
            .fold(CorpusRegistry::new(self.tokenizer()), |registry, (id, path)| {
                registry.with_provider(id, FileTokenProvider::new(path))
            })
    }
}

/// Log level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Verbose output for debugging and development.
    Debug,
    /// Standard operational information (default).
    #[default]
    Info,
    /// Warnings about potential issues.
    Warn,
    /// Errors that indicate failures.
    Error,
}

impl LogLevel {
    /// Returns the log level as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Which configuration files were loaded.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigSources {
    /// Project config files, ordered low→high precedence.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub project_files: Vec<Utf8PathBuf>,
    /// User config file from the XDG config directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_file: Option<Utf8PathBuf>,
    /// Explicit config files (e.g. from `--config`).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigSources {
    /// The highest-precedence config file that was loaded.
    pub fn primary_file(&self) -> Option<&Utf8Path> {
        self.explicit_files
            .last()
            .map(Utf8PathBuf::as_path)
            .or_else(|| self.project_files.last().map(Utf8PathBuf::as_path))
            .or(self.user_file.as_deref())
    }
}

/// Supported configuration file extensions, lowest precedence first.
const CONFIG_EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

/// Application name for XDG lookup, config file names and the env prefix.
const APP_NAME: &str = "keyness";

/// Builder for loading configuration from multiple sources.
#[derive(Debug)]
pub struct ConfigLoader {
    project_search_root: Option<Utf8PathBuf>,
    include_user_config: bool,
    /// Stop walking up at a directory containing this file or directory.
    boundary_marker: Option<String>,
    explicit_files: Vec<Utf8PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Loader with user config enabled and a `.git` boundary.
    pub fn new() -> Self {
        Self {
            project_search_root: None,
            include_user_config: true,
            boundary_marker: Some(".git".to_string()),
            explicit_files: Vec::new(),
        }
    }

    /// Walk up from `path` looking for project config files.
    pub fn with_project_search<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.project_search_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Whether to include `~/.config/keyness/config.<ext>`.
    pub const fn with_user_config(mut self, include: bool) -> Self {
        self.include_user_config = include;
        self
    }

    /// Stop the upward search at a directory containing `marker`.
    pub fn with_boundary_marker<S: Into<String>>(mut self, marker: S) -> Self {
        self.boundary_marker = Some(marker.into());
        self
    }

    /// Search all the way to the filesystem root.
    pub fn without_boundary_marker(mut self) -> Self {
        self.boundary_marker = None;
        self
    }

    /// Add an explicit config file; later files take precedence.
    pub fn with_file<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.explicit_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Load and merge all sources.
    #[tracing::instrument(skip(self), fields(search_root = ?self.project_search_root))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        tracing::debug!("loading configuration");
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let mut sources = ConfigSources::default();

        if self.include_user_config
            && let Some(user_config) = find_user_config()
        {
            figment = merge_file(figment, &user_config);
            sources.user_file = Some(user_config);
        }

        if let Some(ref root) = self.project_search_root {
            let project_configs = self.find_project_configs(root);
            for pc in &project_configs {
                figment = merge_file(figment, pc);
            }
            sources.project_files = project_configs;
        }

        for file in &self.explicit_files {
            figment = merge_file(figment, file);
        }
        sources.explicit_files = self.explicit_files;

        // KEYNESS_TOP_N=1000, KEYNESS_DEFAULT_CORPUS=reuters, etc.
        figment = figment.merge(Env::prefixed("KEYNESS_").lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;
        tracing::info!(
            log_level = config.log_level.as_str(),
            top_n = config.top_n,
            corpora = config.corpora.len(),
            "configuration loaded"
        );
        Ok((config, sources))
    }

    /// Config files from the closest directory that has any, ordered
    /// low→high precedence: dotfiles before regular files.
    fn find_project_configs(&self, start: &Utf8Path) -> Vec<Utf8PathBuf> {
        let mut current = Some(start.to_path_buf());

        while let Some(dir) = current {
            let found: Vec<Utf8PathBuf> = [format!(".{APP_NAME}"), APP_NAME.to_string()]
                .iter()
                .flat_map(|stem| {
                    CONFIG_EXTENSIONS
                        .iter()
                        .map(move |ext| format!("{stem}.{ext}"))
                })
                .map(|name| dir.join(name))
                .filter(|path| path.is_file())
                .collect();

            if !found.is_empty() {
                return found;
            }

            // Checked after the config files so a config next to the marker is found.
            if let Some(ref marker) = self.boundary_marker
                && dir.join(marker).exists()
                && dir != start
            {
                break;
            }

            current = dir.parent().map(Utf8Path::to_path_buf);
        }

        Vec::new()
    }
}

fn find_user_config() -> Option<Utf8PathBuf> {
    let config_dir = user_config_dir()?;
    CONFIG_EXTENSIONS
        .iter()
        .map(|ext| config_dir.join(format!("config.{ext}")))
        .find(|path| path.is_file())
}

/// Merge a config file into the figment, detecting format from extension.
fn merge_file(figment: Figment, path: &Utf8Path) -> Figment {
    match path.extension() {
        Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path.as_str())),
        Some("json") => figment.merge(Json::file_exact(path.as_str())),
        _ => figment.merge(Toml::file_exact(path.as_str())),
    }
}

/// User config directory (`~/.config/keyness/` on Linux).
pub fn user_config_dir() -> Option<Utf8PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("", "", APP_NAME)?;
    Utf8PathBuf::from_path_buf(proj_dirs.config_dir().to_path_buf()).ok()
}

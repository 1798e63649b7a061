//! Logging setup: human-readable events on stderr, optional JSONL file.
//!
//! File logging is enabled by `KEYNESS_LOG_PATH` (exact file), or by
//! `KEYNESS_LOG_DIR` / the `log_dir` config key (daily-rotated
//! `keyness.<date>.jsonl` files). Without either, only stderr is used.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

const LOG_PATH_ENV: &str = "KEYNESS_LOG_PATH";
const LOG_DIR_ENV: &str = "KEYNESS_LOG_DIR";
const LOG_FILE_PREFIX: &str = "keyness";
const LOG_FILE_SUFFIX: &str = "jsonl";

/// Where JSONL logs go, if anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogTarget {
    /// Stderr only.
    #[default]
    None,
    /// A single file, never rotated.
    File(PathBuf),
    /// Daily-rotated files in a directory.
    Directory(PathBuf),
}

#[derive(Debug, Clone, Default)]
pub struct ObservabilityConfig {
    pub target: LogTarget,
}

impl ObservabilityConfig {
    /// Resolve the log target from the environment, falling back to the
    /// configured directory.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        let env_path = |name: &str| {
            std::env::var_os(name)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        };
        Self::resolve(env_path(LOG_PATH_ENV), env_path(LOG_DIR_ENV), config_log_dir)
    }

    fn resolve(
        log_path: Option<PathBuf>,
        log_dir: Option<PathBuf>,
        config_log_dir: Option<PathBuf>,
    ) -> Self {
        let target = match (log_path, log_dir.or(config_log_dir)) {
            (Some(path), _) => LogTarget::File(path),
            (None, Some(dir)) => LogTarget::Directory(dir),
            (None, None) => LogTarget::None,
        };
        Self { target }
    }
}

/// Build a filter from `RUST_LOG`, or else from the CLI flags and `default_level`.
pub fn env_filter(quiet: bool, verbose: u8, default_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => default_level,
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    EnvFilter::new(level)
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop; hold it for the life
/// of the process.
pub fn init_observability(
    config: &ObservabilityConfig,
    stderr_filter: EnvFilter,
    file_filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_filter(stderr_filter);

    let (file_layer, guard) = match file_appender(&config.target)? {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false)
                .with_current_span(true)
                .with_span_list(false)
                .with_filter(file_filter);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    Ok(guard)
}

fn file_appender(target: &LogTarget) -> anyhow::Result<Option<RollingFileAppender>> {
    let (dir, prefix, rotation) = match target {
        LogTarget::None => return Ok(None),
        LogTarget::File(path) => {
            let dir = path.parent().unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .with_context(|| format!("invalid log file path: {}", path.display()))?;
            (dir.to_path_buf(), name.to_string(), Rotation::NEVER)
        }
        LogTarget::Directory(dir) => (dir.clone(), LOG_FILE_PREFIX.to_string(), Rotation::DAILY),
    };

    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;

    let mut builder = RollingFileAppender::builder()
        .rotation(rotation.clone())
        .filename_prefix(prefix);
    if rotation != Rotation::NEVER {
        builder = builder.filename_suffix(LOG_FILE_SUFFIX);
    }
    let appender = builder
        .build(&dir)
        .with_context(|| format!("failed to open log file in {}", dir.display()))?;
    Ok(Some(appender))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_wins() {
        let config = ObservabilityConfig::resolve(
            Some(PathBuf::from("/tmp/k.jsonl")),
            Some(PathBuf::from("/var/log")),
            Some(PathBuf::from("/etc")),
        );
        assert_eq!(config.target, LogTarget::File(PathBuf::from("/tmp/k.jsonl")));
    }

    #[test]
    fn env_dir_beats_config_dir() {
        let config = ObservabilityConfig::resolve(
            None,
            Some(PathBuf::from("/var/log")),
            Some(PathBuf::from("/etc")),
        );
        assert_eq!(config.target, LogTarget::Directory(PathBuf::from("/var/log")));

        let config = ObservabilityConfig::resolve(None, None, Some(PathBuf::from("/etc")));
        assert_eq!(config.target, LogTarget::Directory(PathBuf::from("/etc")));
    }

    #[test]
    fn no_target_means_stderr_only() {
        let config = ObservabilityConfig::resolve(None, None, None);
        assert_eq!(config.target, LogTarget::None);
        assert!(file_appender(&config.target).unwrap().is_none());
    }

    #[test]
    fn directory_target_is_created() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dir = tmp.path().join("logs");
        assert!(file_appender(&LogTarget::Directory(dir.clone())).unwrap().is_some());
        assert!(dir.is_dir());
    }
}

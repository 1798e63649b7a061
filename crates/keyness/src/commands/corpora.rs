//! Corpora command: list the supported reference corpora.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use keyness_core::{Config, CorpusId};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

/// Arguments for the `corpora` subcommand.
#[derive(Args, Debug, Default)]
pub struct CorporaArgs {}

#[derive(Debug, Serialize)]
struct CorpusListing {
    name: CorpusId,
    display_name: &'static str,
    summary: &'static str,
    default: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<Utf8PathBuf>,
}

fn listings(config: &Config, cwd: &Utf8Path) -> Vec<CorpusListing> {
    CorpusId::ALL
        .into_iter()
        .map(|id| CorpusListing {
            name: id,
            display_name: id.display_name(),
            summary: id.summary(),
            default: id == config.default_corpus,
            path: config.corpus_path(id, cwd),
        })
        .collect()
}

/// Print every supported corpus and its configured word source.
#[instrument(name = "cmd_corpora", skip_all)]
pub fn cmd_corpora(
    _args: CorporaArgs,
    global_json: bool,
    config: &Config,
    cwd: &Utf8Path,
) -> anyhow::Result<()> {
    let corpora = listings(config, cwd);
    debug!(configured = config.corpora.len(), "executing corpora command");

    if global_json {
        println!("{}", serde_json::to_string_pretty(&corpora)?);
        return Ok(());
    }

    for corpus in &corpora {
        let marker = if corpus.default { " (default)" } else { "" };
        println!(
            "{}{}  {}",
            corpus.name.as_str().bold(),
            marker.dimmed(),
            corpus.display_name.cyan()
        );
        println!("  {}", corpus.summary);
        match corpus.path {
            Some(ref path) => println!("  {}: {}", "Source".dimmed(), path),
            None => println!("  {}: {}", "Source".dimmed(), "not configured".yellow()),
        }
    }
    Ok(())
}

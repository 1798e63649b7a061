//! Analyze command: keyness of a document against a reference corpus.

use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use keyness_core::{
    Config, CorpusId, CorpusRegistry, KeynessOptions, KeynessReport, KeywordEntry,
    ReferenceCorpus, SortMode, analyze_keyness,
};

use super::read_input_file;

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// File to analyze.
    pub file: Utf8PathBuf,

    /// Reference corpus (brown, gutenberg, reuters, inaugural).
    #[arg(long, value_name = "ID")]
    pub corpus: Option<String>,

    /// Number of most frequent corpus words to test.
    #[arg(long, value_name = "N")]
    pub top_n: Option<usize>,

    /// Result ordering.
    #[arg(long, value_enum)]
    pub sort: Option<SortMode>,

    /// Show at most K keywords in text output.
    #[arg(long, value_name = "K")]
    pub limit: Option<usize>,
}

impl AnalyzeArgs {
    /// Command-line values layered over the configured defaults.
    fn options(&self, config: &Config) -> KeynessOptions {
        let defaults = config.keyness_options();
        KeynessOptions {
            top_n: self.top_n.unwrap_or(defaults.top_n),
            sort: self.sort.unwrap_or(defaults.sort),
        }
    }

    fn corpus_id(&self, config: &Config) -> anyhow::Result<CorpusId> {
        match self.corpus {
            Some(ref name) => Ok(name.parse()?),
            None => Ok(config.default_corpus),
        }
    }
}

/// Run keyness analysis on a file.
#[instrument(name = "cmd_analyze", skip_all, fields(file = %args.file))]
pub fn cmd_analyze(
    args: AnalyzeArgs,
    global_json: bool,
    quiet: bool,
    config: &Config,
    registry: &CorpusRegistry,
) -> anyhow::Result<()> {
    let corpus_id = args.corpus_id(config)?;
    let options = args.options(config);
    debug!(corpus = %corpus_id, top_n = options.top_n, sort = %options.sort, "executing analyze command");

    let content = read_input_file(&args.file, config.input_limit())?;

    let corpus = prepare_corpus(registry, corpus_id, !global_json && !quiet)
        .with_context(|| format!("failed to load the {corpus_id} corpus"))?;
    let report = analyze_keyness(&content, &corpus, &options);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&args.file, &report, args.limit);
    Ok(())
}

/// Fetch a corpus from the registry, with a spinner on interactive stderr
/// while it is read for the first time.
fn prepare_corpus(
    registry: &CorpusRegistry,
    id: CorpusId,
    show_progress: bool,
) -> keyness_core::KeynessResult<Arc<ReferenceCorpus>> {
    if !show_progress || registry.is_loaded(id) || !std::io::stderr().is_terminal() {
        return registry.get(id);
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Preparing {}", id.display_name()));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let result = registry.get(id);
    spinner.finish_and_clear();
    result
}

fn print_report(file: &Utf8Path, report: &KeynessReport, limit: Option<usize>) {
    println!(
        "{} vs {} ({} words)",
        file.bold(),
        report.corpus.display_name.cyan(),
        report.corpus.total_words
    );
    println!(
        "  {} tokens, {} unique, {} significant of {} tested (sorted by {})",
        report.total_words,
        report.unique_words,
        report.significant_keywords,
        report.candidates_tested,
        report.sort,
    );

    if report.keywords.is_empty() {
        println!("\n  {}", "No significant keywords.".dimmed());
        return;
    }

    let shown = limit.unwrap_or(report.keywords.len());
    let width = report
        .keywords
        .iter()
        .take(shown)
        .map(|k| k.word.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    println!();
    println!(
        "  {:<width$}  {:>8}  {:>10}  {:<3}  {:>6}  {:>9}",
        "word".dimmed(),
        "effect".dimmed(),
        "ll".dimmed(),
        "sig".dimmed(),
        "doc".dimmed(),
        "expected".dimmed(),
    );
    for keyword in report.keywords.iter().take(shown) {
        print_keyword(keyword, width);
    }

    let hidden = report.keywords.len().saturating_sub(shown);
    if hidden > 0 {
        println!("  {}", format!("... {hidden} more (use --json for all)").dimmed());
    }
}

fn print_keyword(keyword: &KeywordEntry, width: usize) {
    let word = format!("{:<width$}", keyword.word);
    let word = if keyword.is_over_represented() {
        word.green().to_string()
    } else {
        word.red().to_string()
    };
    println!(
        "  {}  {:>8.4}  {:>10.2}  {:<3}  {:>6}  {:>9.2}",
        word,
        keyword.effect_size,
        keyword.ll_score,
        keyword.significance.yellow(),
        keyword.user_freq,
        keyword.corpus_freq,
    );
}

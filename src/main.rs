use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{prelude::*, EnvFilter};

use lecture_digest::notes::{load_document, note_stem, parse_extensions, scan_notes};
use lecture_digest::pipeline::observer::NoopObserver;
use lecture_digest::{DigestError, DigestPipeline, Language, MarkdownWriter, SummaryConfig, SummaryType};

/// Rule-based keyword, sentence and topic digests for lecture notes
#[derive(Parser, Debug)]
#[command(name = "lecture-digest")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory containing the notes
    #[arg(long, value_name = "DIR")]
    notes: PathBuf,

    /// Directory the digests are written to
    #[arg(long, value_name = "DIR")]
    out: PathBuf,

    /// Summary type: keywords, sentences or mixed
    #[arg(long = "type", value_name = "TYPE")]
    summary_type: Option<SummaryType>,

    /// Comma-separated file extensions to scan
    #[arg(long, default_value = ".txt,.md")]
    ext: String,

    /// Language of the notes
    #[arg(long, value_parser = ["ko", "en"])]
    lang: Option<String>,

    /// Seed for keyword tie-breaking
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum number of keywords
    #[arg(long)]
    max_keywords: Option<usize>,

    /// Chunk size in characters
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Number of summary sentences
    #[arg(long)]
    summary_sentences: Option<usize>,

    /// JSON config file; command-line flags override its values
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Also write each digest as JSON
    #[arg(long)]
    json: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Defaults, then the config file, then explicit flags.
    fn summary_config(&self) -> Result<SummaryConfig> {
        let mut config = match &self.config {
            Some(path) => SummaryConfig::from_file(path)?,
            None => SummaryConfig::default(),
        };
        if let Some(summary_type) = self.summary_type {
            config = config.with_summary_type(summary_type);
        }
        if let Some(lang) = &self.lang {
            config = config.with_language(Language::from(lang.clone()));
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(max_keywords) = self.max_keywords {
            config = config.with_max_keywords(max_keywords);
        }
        if let Some(chunk_size) = self.chunk_size {
            config = config.with_chunk_size(chunk_size);
        }
        if let Some(summary_sentences) = self.summary_sentences {
            config = config.with_summary_sentences(summary_sentences);
        }
        Ok(config)
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(0) => {
            tracing::error!("no notes were digested");
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Digest every note; returns how many succeeded.
fn run(cli: &Cli) -> Result<usize> {
    let config = cli.summary_config()?;
    let report = config.validate()?;
    for warning in report.warnings() {
        tracing::warn!("{warning}");
    }

    tracing::info!(
        notes = %cli.notes.display(),
        out = %cli.out.display(),
        summary_type = %config.summary_type,
        language = %config.language,
        "starting digest"
    );

    let extensions = parse_extensions(&cli.ext);
    let files = scan_notes(&cli.notes, &extensions)?;
    if files.is_empty() {
        return Err(DigestError::NoNotesFound {
            dir: cli.notes.clone(),
            extensions: extensions.join(", "),
        }
        .into());
    }
    tracing::info!(count = files.len(), "found notes");

    let pipeline = DigestPipeline::new(&config);
    let writer = MarkdownWriter::new(&cli.out);
    let mut succeeded = 0;

    for path in &files {
        match digest_file(path, &pipeline, &writer, cli.json) {
            Ok(written) => {
                succeeded += 1;
                tracing::info!(path = %written.display(), "digest written");
            }
            Err(err) => tracing::error!(file = %path.display(), "{err:#}"),
        }
    }

    tracing::info!(
        succeeded,
        total = files.len(),
        out = %cli.out.display(),
        "done"
    );
    Ok(succeeded)
}

fn digest_file(
    path: &Path,
    pipeline: &DigestPipeline,
    writer: &MarkdownWriter,
    json: bool,
) -> Result<PathBuf> {
    let document = load_document(path, pipeline.config().language)?;
    if document.is_empty() {
        tracing::warn!(file = %path.display(), "note is empty");
    }

    let result = pipeline.run(&document, &mut NoopObserver);
    let stats = &result.statistics;
    tracing::info!(
        file = %path.display(),
        sentences = stats.sentence_count,
        words = stats.word_count,
        chars = stats.char_count,
        ratio = %stats.compression_percent(),
        "digested"
    );

    let stem = note_stem(path);
    let written = writer.write(&stem, &result)?;

    if json {
        let json_path = writer.out_dir().join(format!("{stem}_summary.json"));
        let body = serde_json::to_string_pretty(&result).context("serializing digest")?;
        std::fs::write(&json_path, body)
            .with_context(|| format!("writing {}", json_path.display()))?;
    }
    Ok(written)
}

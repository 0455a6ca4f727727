use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use seqops::analysis::{AnalysisOutput, AnalysisRequest};
use seqops::config::Settings;
use seqops::history::History;
use seqops::io::{fasta, table};

#[derive(Parser)]
#[command(name = "seqops", about = "Pairwise alignment, variant calling and ORF detection for DNA sequences")]
struct Cli {
    /// JSON settings file (scoring, length limit, history database)
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    /// SQLite database recording each analysis
    #[arg(long = "history", global = true)]
    history: Option<PathBuf>,

    /// Longest sequence accepted
    #[arg(long = "max-length", global = true)]
    max_length: Option<usize>,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value = "json", global = true)]
    format: Format,

    /// Log debug events
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Tsv,
}

#[derive(Subcommand)]
enum Command {
    /// Globally align a sample sequence to a reference
    Align {
        #[command(flatten)]
        pair: PairArgs,

        /// Score for identical symbols
        #[arg(long = "match", allow_hyphen_values = true)]
        match_score: Option<i32>,

        /// Score for different symbols
        #[arg(long = "mismatch", allow_hyphen_values = true)]
        mismatch_score: Option<i32>,

        /// Score for a symbol against a gap
        #[arg(long = "gap", allow_hyphen_values = true)]
        gap_score: Option<i32>,
    },
    /// Call substitutions, insertions and deletions of a sample against a reference
    Variants {
        #[command(flatten)]
        pair: PairArgs,
    },
    /// Find open reading frames on both strands
    Orfs {
        #[command(flatten)]
        input: SeqArgs,
    },
    /// Run a JSON request body read from a file, or stdin if absent
    Request {
        path: Option<PathBuf>,
    },
    /// Summarize the analysis history
    History {
        #[arg(value_enum, default_value = "entries")]
        view: HistoryView,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum HistoryView {
    /// All analyses, newest first
    Entries,
    /// Number of analyses per type
    Types,
    /// Number of analyses per date and type
    Daily,
}

#[derive(Args)]
struct PairArgs {
    /// Reference sequence, or record id when --reference-fasta is given
    reference: Option<String>,

    /// Sample sequence, or record id when --sample-fasta is given
    sample: Option<String>,

    /// FASTA file holding the reference
    #[arg(long = "reference-fasta")]
    reference_fasta: Option<PathBuf>,

    /// FASTA file holding the sample
    #[arg(long = "sample-fasta")]
    sample_fasta: Option<PathBuf>,
}

#[derive(Args)]
struct SeqArgs {
    /// Input sequence, or record id when --fasta is given
    sequence: Option<String>,

    /// FASTA file holding the input
    #[arg(long = "fasta")]
    fasta: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut settings = match cli.config {
        Some(ref path) => Settings::from_file(path)
            .with_context(|| format!("failed to load settings: {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(max_length) = cli.max_length {
        settings.max_sequence_length = max_length;
    }
    if cli.history.is_some() {
        settings.history = cli.history.clone();
    }

    let request = match cli.command {
        Command::Align { ref pair, match_score, mismatch_score, gap_score } => {
            if let Some(x) = match_score {
                settings.scoring.match_score = x;
            }
            if let Some(x) = mismatch_score {
                settings.scoring.mismatch_score = x;
            }
            if let Some(x) = gap_score {
                settings.scoring.gap_score = x;
            }
            let (reference_sequence, sample_sequence) = read_pair(pair)?;
            AnalysisRequest::SequenceAlignment { reference_sequence, sample_sequence }
        },
        Command::Variants { ref pair } => {
            let (reference_sequence, sample_sequence) = read_pair(pair)?;
            AnalysisRequest::VariantDetection { reference_sequence, sample_sequence }
        },
        Command::Orfs { ref input } => {
            let input_sequence = read_sequence(input.sequence.as_deref(), input.fasta.as_ref(), "input")?;
            AnalysisRequest::OrfDetection { input_sequence }
        },
        Command::Request { ref path } => read_request(path.as_ref())?,
        Command::History { view } => {
            let path = settings.history.as_ref()
                .context("no history database given; use --history or the settings file")?;
            let history = History::open(path)
                .with_context(|| format!("failed to open history: {}", path.display()))?;
            return print_history(&history, view, cli.format);
        },
    };

    settings.validate()?;
    debug!(?settings, "effective settings");

    let output = request.execute(&settings.scoring, settings.max_sequence_length)?;

    if let Some(ref path) = settings.history {
        let history = History::open(path)
            .with_context(|| format!("failed to open history: {}", path.display()))?;
        history.record(&request)?;
    }

    print_output(&output, cli.format)?;
    info!(analysis = %request.analysis_type(), "done");
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_pair(pair: &PairArgs) -> Result<(String, String)> {
    let reference = read_sequence(pair.reference.as_deref(), pair.reference_fasta.as_ref(), "reference")?;
    let sample = read_sequence(pair.sample.as_deref(), pair.sample_fasta.as_ref(), "sample")?;
    Ok((reference, sample))
}

/// Literal sequence, or a record (by id, else the first) from a FASTA file.
fn read_sequence(arg: Option<&str>, fasta_path: Option<&PathBuf>, name: &str) -> Result<String> {
    match fasta_path {
        Some(path) => {
            let reader = fasta::Reader::from_file(path)
                .with_context(|| format!("failed to open {} FASTA: {}", name, path.display()))?;
            let record = reader.read_sequence(arg)
                .with_context(|| format!("failed to read {} from {}", name, path.display()))?;
            debug!(name, id = %record.id, length = record.seq.len(), "read sequence");
            Ok(record.seq)
        },
        None => arg.map(|s| s.to_owned())
            .with_context(|| format!("missing {} sequence", name)),
    }
}

fn read_request(path: Option<&PathBuf>) -> Result<AnalysisRequest> {
    let body = match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read request: {}", path.display()))?,
        None => {
            let mut body = String::new();
            io::stdin().read_to_string(&mut body).context("failed to read request from stdin")?;
            body
        },
    };
    let request = serde_json::from_str(&body).context("failed to parse request body")?;
    Ok(request)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

fn print_output(output: &AnalysisOutput, format: Format) -> Result<()> {
    if format == Format::Json {
        return print_json(output);
    }

    let stdout = io::stdout();
    let mut writer = table::Writer::new(stdout.lock());
    match *output {
        AnalysisOutput::Alignment(ref alignment) => writer.write_alignment(alignment)?,
        AnalysisOutput::Variants(ref call) => writer.write_variants(call)?,
        AnalysisOutput::Orfs(ref orfs) => writer.write_orfs(orfs)?,
    }
    Ok(())
}

fn print_history(history: &History, view: HistoryView, format: Format) -> Result<()> {
    let stdout = io::stdout();
    match (view, format) {
        (HistoryView::Entries, Format::Json) => print_json(&history.entries()?),
        (HistoryView::Types, Format::Json) => print_json(&history.counts_by_type()?),
        (HistoryView::Daily, Format::Json) => print_json(&history.counts_by_date()?),
        (HistoryView::Entries, Format::Tsv) => {
            table::Writer::new(stdout.lock()).write_entries(&history.entries()?)?;
            Ok(())
        },
        (HistoryView::Types, Format::Tsv) => {
            table::Writer::new(stdout.lock()).write_type_counts(&history.counts_by_type()?)?;
            Ok(())
        },
        (HistoryView::Daily, Format::Tsv) => {
            table::Writer::new(stdout.lock()).write_daily_counts(&history.counts_by_date()?)?;
            Ok(())
        },
    }
}

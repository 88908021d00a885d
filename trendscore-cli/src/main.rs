//! TrendScore CLI: analyze price sheets, classify scores, generate demo data.
//!
//! Commands:
//! - `analyze`: load a price sheet, run every indicator, print the scores
//! - `signal`: print the recommendation band for a raw score
//! - `synthetic`: write a seeded synthetic price sheet that `analyze` can read
//!
//! Reports go to stdout (or `--output`); logs go to stderr, filtered by `RUST_LOG`.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;
use trendscore_core::{get_signal_text, Score};
use trendscore_runner::runner::run_analysis;
use trendscore_runner::{
    export_enriched_csv, export_json, export_price_sheet_csv, generate_synthetic_series,
    render_markdown, render_text, save_artifacts, synthetic_company_name, OutputFormat,
    RunnerConfig,
};

#[derive(Parser)]
#[command(
    name = "trendscore",
    about = "TrendScore CLI: technical indicators and buy/sell scores for daily price sheets"
)]
struct Cli {
    /// Emit logs as JSON lines.
    #[arg(long, global = true, default_value_t = false)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a price sheet and print the scores.
    Analyze {
        /// Path to the price-sheet CSV.
        #[arg(long)]
        input: PathBuf,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format: text, json, csv, markdown. Overrides the config.
        #[arg(long)]
        format: Option<OutputFormat>,

        /// Write the report here instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Also save the full artifact bundle under this directory. Overrides the config.
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Sheet has no symbol/company preface.
        #[arg(long, default_value_t = false)]
        no_metadata: bool,

        /// Print signal labels in Thai.
        #[arg(long, default_value_t = false)]
        thai_labels: bool,
    },
    /// Print the recommendation band for a score.
    Signal {
        /// Raw score. Values outside 0-100 are clamped.
        #[arg(allow_hyphen_values = true)]
        score: i32,

        /// Print the Thai label as well.
        #[arg(long, default_value_t = false)]
        thai_labels: bool,
    },
    /// Write a seeded synthetic price sheet.
    Synthetic {
        /// Symbol written into the sheet preface.
        #[arg(long, default_value = "DEMO")]
        symbol: String,

        /// Number of weekday bars.
        #[arg(long, default_value_t = 250)]
        days: usize,

        /// RNG seed.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// First date (YYYY-MM-DD).
        #[arg(long, default_value = "2024-01-02")]
        start: String,

        /// Write the sheet here instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    match cli.command {
        Commands::Analyze {
            input,
            config,
            format,
            output,
            output_dir,
            no_metadata,
            thai_labels,
        } => run_analyze_cmd(
            &input,
            config.as_deref(),
            format,
            output.as_deref(),
            output_dir,
            no_metadata,
            thai_labels,
        ),
        Commands::Signal { score, thai_labels } => run_signal_cmd(score, thai_labels),
        Commands::Synthetic {
            symbol,
            days,
            seed,
            start,
            output,
        } => run_synthetic_cmd(&symbol, days, seed, &start, output.as_deref()),
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn run_analyze_cmd(
    input: &Path,
    config_path: Option<&Path>,
    format: Option<OutputFormat>,
    output: Option<&Path>,
    output_dir: Option<PathBuf>,
    no_metadata: bool,
    thai_labels: bool,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => RunnerConfig::from_file(path)?,
        None => RunnerConfig::default(),
    };
    if let Some(format) = format {
        config.output.format = format;
    }
    if output_dir.is_some() {
        config.output.directory = output_dir;
    }
    if no_metadata {
        config.input.has_metadata = false;
    }

    let run = run_analysis(input, &config)
        .with_context(|| format!("failed to analyze {}", input.display()))?;

    let rendered = match config.output.format {
        OutputFormat::Text => render_text(&run.report, thai_labels),
        OutputFormat::Json => export_json(&run.report)?,
        OutputFormat::Csv => export_enriched_csv(&run.analysis)?,
        OutputFormat::Markdown => render_markdown(&run.report),
    };
    emit(&rendered, output)?;

    if let Some(dir) = &config.output.directory {
        let run_dir = save_artifacts(&run.report, &run.analysis, dir)?;
        info!(path = %run_dir.display(), "artifacts saved");
    }

    Ok(())
}

fn run_signal_cmd(score: i32, thai_labels: bool) -> Result<()> {
    let clamped = Score::clamped(score);
    if thai_labels {
        println!(
            "{clamped} {} ({})",
            get_signal_text(score),
            clamped.signal().thai_label()
        );
    } else {
        println!("{clamped} {}", get_signal_text(score));
    }
    Ok(())
}

fn run_synthetic_cmd(
    symbol: &str,
    days: usize,
    seed: u64,
    start: &str,
    output: Option<&Path>,
) -> Result<()> {
    let start = NaiveDate::parse_from_str(start, "%Y-%m-%d")
        .with_context(|| format!("invalid --start '{start}' (expected YYYY-MM-DD)"))?;
    let series = generate_synthetic_series(symbol, start, days, seed);
    let sheet = export_price_sheet_csv(symbol, &synthetic_company_name(symbol), &series)?;
    emit(&sheet, output)?;
    info!(symbol, days, seed, "synthetic sheet written");
    Ok(())
}

fn emit(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            print!("{content}");
            Ok(())
        }
    }
}

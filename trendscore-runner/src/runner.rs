//! Analysis runner: wires together loading, the engine, and reporting.
//!
//! Two entry points:
//! - `run_analysis()`: loads a price sheet from disk, then analyzes. Used by the CLI.
//! - `run_analysis_from_sheet()`: takes an already-loaded sheet. Used for synthetic data.

use std::path::Path;

use thiserror::Error;
use tracing::info;
use trendscore_core::{analyze, Analysis, EngineError};

use crate::config::{ConfigError, RunnerConfig};
use crate::data_loader::{load_price_sheet, LoadError, PriceSheet};
use crate::report::AnalysisReport;

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("data error: {0}")]
    Data(#[from] LoadError),
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
}

/// Everything one run produces.
#[derive(Debug, Clone)]
pub struct AnalysisRun {
    pub sheet: PriceSheet,
    pub analysis: Analysis,
    pub report: AnalysisReport,
}

/// Load `path` per `config.input` and analyze it with `config.params`.
pub fn run_analysis(path: &Path, config: &RunnerConfig) -> Result<AnalysisRun, RunError> {
    config.validate()?;
    let sheet = load_price_sheet(path, &config.input)?;
    run_analysis_from_sheet(sheet, config, false)
}

/// Analyze a pre-loaded sheet. No I/O.
pub fn run_analysis_from_sheet(
    sheet: PriceSheet,
    config: &RunnerConfig,
    synthetic: bool,
) -> Result<AnalysisRun, RunError> {
    let analysis = analyze(&sheet.series, &config.params)?;
    let report = AnalysisReport::build(&sheet, &analysis, synthetic);
    info!(
        symbol = %report.symbol,
        dataset_hash = %report.dataset_hash,
        params_hash = %config.params_hash(),
        "analysis run complete"
    );
    Ok(AnalysisRun {
        sheet,
        analysis,
        report,
    })
}

//! TrendScore Runner: price-sheet loading, configuration, reports, exports.
//!
//! This crate builds on `trendscore-core` to provide:
//! - TOML configuration for parameters, input parsing, and output
//! - Loading of the exchange's historical price sheet (Thai or ISO dates)
//! - Seeded synthetic price sheets
//! - Schema-versioned analysis reports with a dataset hash
//! - JSON, enriched CSV, Markdown, and text output

pub mod config;
pub mod data_loader;
pub mod export;
pub mod report;
pub mod runner;
pub mod synthetic;
pub mod thai_date;

pub use config::{ConfigError, DateFormat, InputConfig, OutputConfig, OutputFormat, RunnerConfig};
pub use data_loader::{load_price_sheet, parse_price_sheet, LoadError, PriceSheet, SkipReason, SkippedRow};
pub use export::{
    export_enriched_csv, export_json, export_price_sheet_csv, import_json, load_artifacts,
    render_markdown, render_text, save_artifacts,
};
pub use report::{dataset_hash, AnalysisReport, QuoteSnapshot, ScoreLine, SCHEMA_VERSION};
pub use runner::{run_analysis, run_analysis_from_sheet, AnalysisRun, RunError};
pub use synthetic::{generate_synthetic_series, synthetic_company_name};
pub use thai_date::{format_thai_date, parse_thai_date, ThaiDateError};

//! Runner configuration loaded from TOML.
//!
//! ```toml
//! [params]
//! rsi_period = 14
//! ma_windows = [5, 10, 20]
//!
//! [input]
//! date_format = "thai"
//! has_metadata = true
//!
//! [output]
//! format = "markdown"
//! directory = "reports"
//! ```
//!
//! Every section and field is optional; missing values take their defaults.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use trendscore_core::AnalysisParams;

/// Errors from loading or validating a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// How the date column of a price sheet is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFormat {
    /// ISO first, Thai abbreviated-month form as fallback.
    #[default]
    Auto,
    /// `YYYY-MM-DD`.
    Iso,
    /// `D <Thai month> <Buddhist year>`.
    Thai,
}

/// Report rendering for the `analyze` command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Markdown => "markdown",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            other => Err(format!(
                "unknown output format '{other}' (expected text, json, csv or markdown)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub date_format: DateFormat,
    /// Sheet starts with symbol, company name, and one spare row before the header.
    pub has_metadata: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            date_format: DateFormat::Auto,
            has_metadata: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// When set, the full artifact bundle is also written under this directory.
    pub directory: Option<PathBuf>,
}

/// Top-level runner configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub params: AnalysisParams,
    pub input: InputConfig,
    pub output: OutputConfig,
}

impl RunnerConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: RunnerConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.params
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Deterministic content hash of the analysis parameters.
    pub fn params_hash(&self) -> String {
        let json = serde_json::to_string(&self.params).unwrap_or_default();
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_toml_is_default() {
        let config = RunnerConfig::from_toml_str("").unwrap();
        assert_eq!(config, RunnerConfig::default());
        assert_eq!(config.params.ma_windows, vec![5, 10, 20]);
        assert!(config.input.has_metadata);
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn full_toml_parses() {
        let config = RunnerConfig::from_toml_str(
            r#"
            [params]
            macd_short = 8
            rsi_period = 7
            ma_windows = [10, 50]

            [input]
            date_format = "thai"
            has_metadata = false

            [output]
            format = "markdown"
            directory = "reports"
            "#,
        )
        .unwrap();
        assert_eq!(config.params.macd_short, 8);
        assert_eq!(config.params.macd_long, 26);
        assert_eq!(config.params.rsi_period, 7);
        assert_eq!(config.params.ma_windows, vec![10, 50]);
        assert_eq!(config.input.date_format, DateFormat::Thai);
        assert!(!config.input.has_metadata);
        assert_eq!(config.output.format, OutputFormat::Markdown);
        assert_eq!(config.output.directory, Some(PathBuf::from("reports")));
    }

    #[test]
    fn invalid_params_rejected() {
        let err = RunnerConfig::from_toml_str("[params]\nmacd_short = 30\nmacd_long = 10\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_toml_rejected() {
        let err = RunnerConfig::from_toml_str("[params\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn unknown_format_rejected() {
        let err = RunnerConfig::from_toml_str("[output]\nformat = \"pdf\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn from_file_reads_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[params]\nrsi_period = 21").unwrap();
        let config = RunnerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.params.rsi_period, 21);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = RunnerConfig::from_file(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("here.toml"));
    }

    #[test]
    fn output_format_from_str() {
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("pdf".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn params_hash_tracks_params() {
        let a = RunnerConfig::default();
        let mut b = a.clone();
        assert_eq!(a.params_hash(), b.params_hash());
        b.params.rsi_period = 9;
        assert_ne!(a.params_hash(), b.params_hash());
    }
}

//! Price-sheet loading for the runner.
//!
//! Reads the CSV export of the exchange's historical-price spreadsheet:
//! 1. Optional metadata preface: symbol, company name, one spare row
//! 2. A header row
//! 3. Data rows with 12 columns in `PriceBar` field order
//!
//! Rows with a blank date cell or a repeated header are skipped. Rows with an
//! unparseable date, high, low or close are dropped and logged; other columns
//! may be blank or `-` and come through as NaN. Every skipped row is
//! reported back with its line number so callers can surface data quality.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use trendscore_core::domain::{PriceBar, PriceSeries};

use crate::config::{DateFormat, InputConfig};
use crate::thai_date::parse_thai_date;

/// Marker the exchange prints in every header row ("date").
pub const HEADER_DATE_MARKER: &str = "วันที่";

/// Number of columns in a data row.
pub const SHEET_COLUMNS: usize = 12;

/// Rows before the header when the metadata preface is present.
const METADATA_ROWS: usize = 3;

/// Errors from the data loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("price sheet has no header row")]
    MissingHeader,
}

/// Why a data row did not become a bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    BlankDate,
    RepeatedHeader,
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedRow {
    /// 1-based line in the source file.
    pub line: u64,
    pub reason: SkipReason,
}

/// A loaded sheet: identity from the preface plus the cleaned series.
#[derive(Debug, Clone)]
pub struct PriceSheet {
    pub symbol: String,
    pub company_name: Option<String>,
    pub series: PriceSeries,
    pub skipped_rows: Vec<SkippedRow>,
}

/// Load a price sheet from disk. Without a metadata preface the file stem
/// becomes the symbol.
pub fn load_price_sheet(path: &Path, input: &InputConfig) -> Result<PriceSheet, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let fallback = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_uppercase())
        .unwrap_or_default();
    let sheet = parse_price_sheet(file, input, &fallback)?;
    info!(
        path = %path.display(),
        symbol = %sheet.symbol,
        bars = sheet.series.len(),
        skipped = sheet.skipped_rows.len(),
        "price sheet loaded"
    );
    Ok(sheet)
}

/// Parse a price sheet from any reader.
pub fn parse_price_sheet<R: Read>(
    reader: R,
    input: &InputConfig,
    fallback_symbol: &str,
) -> Result<PriceSheet, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = csv_reader.records();

    let mut symbol = fallback_symbol.to_string();
    let mut company_name = None;
    if input.has_metadata {
        for row in 0..METADATA_ROWS {
            let Some(record) = records.next().transpose()? else {
                return Err(LoadError::MissingHeader);
            };
            let first = record.get(0).unwrap_or("").to_string();
            match row {
                0 if !first.is_empty() => symbol = first,
                1 if !first.is_empty() => company_name = Some(first),
                _ => {}
            }
        }
    }

    let header = records.next().transpose()?.ok_or(LoadError::MissingHeader)?;
    let header_date = header.get(0).unwrap_or("").to_string();
    debug!(columns = header.len(), header_date = %header_date, "price sheet header");

    let mut bars = Vec::new();
    let mut skipped_rows = Vec::new();
    for record in records {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let date_cell = record.get(0).unwrap_or("");

        if date_cell.is_empty() {
            skipped_rows.push(SkippedRow {
                line,
                reason: SkipReason::BlankDate,
            });
            continue;
        }
        if date_cell.contains(HEADER_DATE_MARKER) || date_cell == header_date {
            skipped_rows.push(SkippedRow {
                line,
                reason: SkipReason::RepeatedHeader,
            });
            continue;
        }

        match parse_row(&record, input.date_format) {
            Ok(bar) => {
                if !bar.is_sane() {
                    warn!(line, date = %bar.date, "bar fails low <= open/close <= high");
                }
                bars.push(bar);
            }
            Err(reason) => {
                warn!(line, %reason, "dropping malformed row");
                skipped_rows.push(SkippedRow {
                    line,
                    reason: SkipReason::Malformed(reason),
                });
            }
        }
    }

    let parsed = bars.len();
    let series = PriceSeries::new(bars);
    if series.len() < parsed {
        warn!(
            duplicates = parsed - series.len(),
            "duplicate dates collapsed, first occurrence kept"
        );
    }

    Ok(PriceSheet {
        symbol,
        company_name,
        series,
        skipped_rows,
    })
}

/// Parse a date cell per the configured format.
pub fn parse_date(cell: &str, format: DateFormat) -> Result<NaiveDate, String> {
    let iso = || NaiveDate::parse_from_str(cell, "%Y-%m-%d");
    match format {
        DateFormat::Iso => iso().map_err(|e| format!("date '{cell}': {e}")),
        DateFormat::Thai => parse_thai_date(cell).map_err(|e| format!("date '{cell}': {e}")),
        DateFormat::Auto => iso()
            .or_else(|_| parse_thai_date(cell))
            .map_err(|e| format!("date '{cell}': {e}")),
    }
}

/// Placeholder the exchange prints for a missing figure.
const MISSING_CELL: &str = "-";

/// Numeric cell the engines read: thousands separators allowed, must be finite.
fn parse_number(record: &csv::StringRecord, index: usize, column: &str) -> Result<f64, String> {
    let cell = record.get(index).unwrap_or("");
    let cleaned = cell.replace(',', "");
    let value: f64 = cleaned
        .trim()
        .parse()
        .map_err(|_| format!("{column} '{cell}' is not a number"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("{column} '{cell}' is not finite"))
    }
}

/// Informational cell: blank or `-` is NaN, anything else must parse.
fn parse_optional(record: &csv::StringRecord, index: usize, column: &str) -> Result<f64, String> {
    let cell = record.get(index).unwrap_or("");
    if cell.is_empty() || cell == MISSING_CELL {
        return Ok(f64::NAN);
    }
    cell.replace(',', "")
        .trim()
        .parse()
        .map_err(|_| format!("{column} '{cell}' is not a number"))
}

/// Date, high, low and close are required; a gap elsewhere keeps the bar.
fn parse_row(record: &csv::StringRecord, format: DateFormat) -> Result<PriceBar, String> {
    if record.len() < SHEET_COLUMNS {
        return Err(format!(
            "expected {SHEET_COLUMNS} columns, found {}",
            record.len()
        ));
    }
    let date = parse_date(record.get(0).unwrap_or(""), format)?;
    Ok(PriceBar {
        date,
        open: parse_optional(record, 1, "open")?,
        high: parse_number(record, 2, "high")?,
        low: parse_number(record, 3, "low")?,
        avg: parse_optional(record, 4, "avg")?,
        close: parse_number(record, 5, "close")?,
        change: parse_optional(record, 6, "change")?,
        change_pct: parse_optional(record, 7, "change_pct")?,
        volume: parse_optional(record, 8, "volume")?,
        value: parse_optional(record, 9, "value")?,
        market_index: parse_optional(record, 10, "market_index")?,
        market_change_pct: parse_optional(record, 11, "market_change_pct")?,
    })
}

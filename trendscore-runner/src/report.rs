//! Serializable analysis report: everything the renderers and exports need.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use trendscore_core::domain::PriceSeries;
use trendscore_core::indicators::{Regime, TrendFit};
use trendscore_core::scoring::{LatestReadings, MovingAverageReading};
use trendscore_core::{Analysis, AnalysisParams, Score, Signal};

use crate::data_loader::{PriceSheet, SkippedRow};

/// Current schema version for persisted reports.
pub const SCHEMA_VERSION: u32 = 1;

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Latest-bar market snapshot. Figures the sheet left blank are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSnapshot {
    pub date: NaiveDate,
    pub close: f64,
    pub change: Option<f64>,
    pub change_pct: Option<f64>,
    pub volume: Option<f64>,
    pub value: Option<f64>,
    pub low: f64,
    pub high: f64,
}

fn finite(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}

/// One score with its classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreLine {
    pub name: String,
    pub score: Score,
    pub signal: Signal,
    pub label: String,
    pub thai_label: String,
}

impl ScoreLine {
    fn new(name: &str, score: Score) -> Self {
        let signal = score.signal();
        Self {
            name: name.to_string(),
            score,
            signal,
            label: signal.text().to_string(),
            thai_label: signal.thai_label().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub symbol: String,
    pub company_name: Option<String>,
    /// BLAKE3 over the canonical bar bytes.
    pub dataset_hash: String,
    pub synthetic: bool,
    pub bar_count: usize,
    pub warmup_bars: usize,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub params: AnalysisParams,
    pub quote: Option<QuoteSnapshot>,
    pub trend: Option<TrendFit>,
    pub readings: Option<LatestReadings>,
    pub sar_regime: Option<Regime>,
    pub moving_averages: Vec<MovingAverageReading>,
    pub scores: Vec<ScoreLine>,
    #[serde(default)]
    pub skipped_rows: Vec<SkippedRow>,
}

impl AnalysisReport {
    pub fn build(sheet: &PriceSheet, analysis: &Analysis, synthetic: bool) -> Self {
        let series = &sheet.series;
        let (start_date, end_date) = series.date_range().unzip();
        let quote = series.latest().map(|bar| QuoteSnapshot {
            date: bar.date,
            close: bar.close,
            change: finite(bar.change),
            change_pct: finite(bar.change_pct),
            volume: finite(bar.volume),
            value: finite(bar.value),
            low: bar.low,
            high: bar.high,
        });

        let scores = vec![
            ScoreLine::new("technical", analysis.scores.technical),
            ScoreLine::new("moving_average", analysis.scores.moving_average),
            ScoreLine::new("summary", analysis.scores.summary),
        ];

        Self {
            schema_version: SCHEMA_VERSION,
            symbol: sheet.symbol.clone(),
            company_name: sheet.company_name.clone(),
            dataset_hash: dataset_hash(&sheet.symbol, series),
            synthetic,
            bar_count: series.len(),
            warmup_bars: analysis.warmup,
            start_date,
            end_date,
            params: analysis.params.clone(),
            quote,
            trend: analysis.trend,
            readings: analysis.latest,
            sar_regime: analysis.sar_points.last().map(|p| p.regime),
            moving_averages: analysis.moving_averages.clone(),
            scores,
            skipped_rows: sheet.skipped_rows.clone(),
        }
    }

    pub fn score(&self, name: &str) -> Option<&ScoreLine> {
        self.scores.iter().find(|s| s.name == name)
    }

    pub fn summary(&self) -> Option<&ScoreLine> {
        self.score("summary")
    }
}

/// Deterministic BLAKE3 hash over the symbol and every bar field in date order.
pub fn dataset_hash(symbol: &str, series: &PriceSeries) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(symbol.as_bytes());
    for bar in series.bars() {
        hasher.update(bar.date.to_string().as_bytes());
        for v in [
            bar.open,
            bar.high,
            bar.low,
            bar.avg,
            bar.close,
            bar.change,
            bar.change_pct,
            bar.volume,
            bar.value,
            bar.market_index,
            bar.market_change_pct,
        ] {
            hasher.update(&v.to_le_bytes());
        }
    }
    hasher.finalize().to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic::generate_synthetic_series;
    use trendscore_core::analyze;

    fn sheet(days: usize) -> PriceSheet {
        PriceSheet {
            symbol: "TEST".into(),
            company_name: Some("Test Co".into()),
            series: generate_synthetic_series(
                "TEST",
                NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                days,
                42,
            ),
            skipped_rows: Vec::new(),
        }
    }

    #[test]
    fn build_captures_latest_bar() {
        let sheet = sheet(60);
        let analysis = analyze(&sheet.series, &AnalysisParams::default()).unwrap();
        let report = AnalysisReport::build(&sheet, &analysis, true);

        let last = sheet.series.latest().unwrap();
        let quote = report.quote.as_ref().unwrap();
        assert_eq!(quote.date, last.date);
        assert_eq!(quote.close, last.close);
        assert_eq!(report.bar_count, 60);
        assert_eq!(report.end_date, Some(last.date));
        assert_eq!(report.scores.len(), 3);
        assert_eq!(report.summary().unwrap().score, analysis.scores.summary);
        assert_eq!(
            report.summary().unwrap().label,
            analysis.scores.summary_signal().text()
        );
        assert!(report.trend.is_some());
        assert!(report.sar_regime.is_some());
    }

    #[test]
    fn empty_sheet_builds_neutral_report() {
        let sheet = sheet(0);
        let analysis = analyze(&sheet.series, &AnalysisParams::default()).unwrap();
        let report = AnalysisReport::build(&sheet, &analysis, false);
        assert!(report.quote.is_none());
        assert!(report.start_date.is_none());
        assert_eq!(report.summary().unwrap().signal, Signal::Hold);
        assert_eq!(report.summary().unwrap().thai_label, "ถือหุ้นไว้");
    }

    #[test]
    fn dataset_hash_is_deterministic_and_sensitive() {
        let a = sheet(20);
        let b = sheet(20);
        assert_eq!(dataset_hash("TEST", &a.series), dataset_hash("TEST", &b.series));
        assert_ne!(dataset_hash("TEST", &a.series), dataset_hash("OTHER", &a.series));
        let shorter = sheet(19);
        assert_ne!(
            dataset_hash("TEST", &a.series),
            dataset_hash("TEST", &shorter.series)
        );
    }
}

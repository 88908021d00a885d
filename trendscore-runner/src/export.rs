//! Reporting and export: JSON, CSV, Markdown, and plain-text output.
//!
//! - **JSON**: full round-trip serialization of `AnalysisReport` with schema versioning
//! - **CSV**: the merged table (base columns plus every derived column) and the
//!   exchange-style price sheet that `load_price_sheet` reads back
//! - **Markdown**: human-readable report
//! - **Text**: terminal summary
//!
//! Persisted reports carry a `schema_version`. Newer versions are rejected on load.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use trendscore_core::domain::PriceSeries;
use trendscore_core::Analysis;

use crate::data_loader::SkipReason;
use crate::report::{AnalysisReport, SCHEMA_VERSION};
use crate::thai_date::format_thai_date;

/// Base columns of the enriched CSV, in `PriceBar` field order.
pub const BASE_COLUMNS: [&str; 12] = [
    "date",
    "open",
    "high",
    "low",
    "avg",
    "close",
    "change",
    "change_pct",
    "volume",
    "value",
    "market_index",
    "market_change_pct",
];

/// Header row of the exchange's price sheet.
pub const SHEET_HEADER: [&str; 12] = [
    "วันที่",
    "ราคาเปิด",
    "ราคาสูงสุด",
    "ราคาต่ำสุด",
    "ราคาเฉลี่ย",
    "ราคาปิด",
    "เปลี่ยนแปลง",
    "%เปลี่ยนแปลง",
    "ปริมาณ(พันหุ้น)",
    "มูลค่า(ล้านบาท)",
    "SET Index",
    "SET เปลี่ยนแปลง(%)",
];

// ─── JSON export ────────────────────────────────────────────────────

pub fn export_json(report: &AnalysisReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize AnalysisReport to JSON")
}

/// Deserialize an `AnalysisReport`, rejecting newer schema versions.
pub fn import_json(json: &str) -> Result<AnalysisReport> {
    let report: AnalysisReport =
        serde_json::from_str(json).context("failed to deserialize AnalysisReport from JSON")?;
    if report.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            report.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(report)
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Export the merged table: base columns, every derived column in merge
/// order, then the SAR regime. Gaps are empty cells.
pub fn export_enriched_csv(analysis: &Analysis) -> Result<String> {
    let table = &analysis.table;
    let derived: Vec<&str> = table.column_names().collect();

    let mut wtr = csv::Writer::from_writer(vec![]);
    let mut header: Vec<&str> = BASE_COLUMNS.to_vec();
    header.extend(&derived);
    header.push("sar_regime");
    wtr.write_record(&header)?;

    for (i, bar) in table.rows().iter().enumerate() {
        let mut record = vec![
            bar.date.to_string(),
            base_cell(bar.open),
            base_cell(bar.high),
            base_cell(bar.low),
            base_cell(bar.avg),
            base_cell(bar.close),
            base_cell(bar.change),
            base_cell(bar.change_pct),
            base_cell(bar.volume),
            base_cell(bar.value),
            base_cell(bar.market_index),
            base_cell(bar.market_change_pct),
        ];
        for name in &derived {
            record.push(
                table
                    .value(i, name)
                    .map(|v| format!("{v:.6}"))
                    .unwrap_or_default(),
            );
        }
        record.push(
            analysis
                .sar_points
                .get(i)
                .map(|p| p.regime.as_str().to_string())
                .unwrap_or_default(),
        );
        wtr.write_record(&record)?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Write a series as an exchange-style sheet: metadata preface, Thai header,
/// newest bar first, Thai dates, `-` for missing figures.
pub fn export_price_sheet_csv(
    symbol: &str,
    company_name: &str,
    series: &PriceSeries,
) -> Result<String> {
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(vec![]);
    wtr.write_record([symbol])?;
    wtr.write_record([company_name])?;
    wtr.write_record(["ข้อมูลราคาย้อนหลัง"])?;
    wtr.write_record(SHEET_HEADER)?;

    for bar in series.bars().iter().rev() {
        wtr.write_record([
            format_thai_date(bar.date),
            sheet_cell(bar.open),
            sheet_cell(bar.high),
            sheet_cell(bar.low),
            sheet_cell(bar.avg),
            sheet_cell(bar.close),
            sheet_cell(bar.change),
            sheet_cell(bar.change_pct),
            sheet_cell(bar.volume),
            sheet_cell(bar.value),
            sheet_cell(bar.market_index),
            sheet_cell(bar.market_change_pct),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Save the full artifact set for one analysis.
///
/// Creates `{symbol}_{timestamp}/` under `output_dir` containing
/// `report.json`, `enriched.csv`, and `report.md`. Returns the directory.
pub fn save_artifacts(
    report: &AnalysisReport,
    analysis: &Analysis,
    output_dir: &Path,
) -> Result<PathBuf> {
    let dirname = format!(
        "{}_{}",
        report.symbol,
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    );
    let run_dir = output_dir.join(dirname);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create artifact dir: {}", run_dir.display()))?;

    std::fs::write(run_dir.join("report.json"), export_json(report)?)?;
    std::fs::write(run_dir.join("enriched.csv"), export_enriched_csv(analysis)?)?;
    std::fs::write(run_dir.join("report.md"), render_markdown(report))?;

    Ok(run_dir)
}

/// Load `report.json` from an artifact directory.
pub fn load_artifacts(dir: &Path) -> Result<AnalysisReport> {
    let path = dir.join("report.json");
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    import_json(&json)
}

// ─── Markdown report ────────────────────────────────────────────────

pub fn render_markdown(report: &AnalysisReport) -> String {
    let mut md = String::with_capacity(2048);

    md.push_str(&format!("# Analysis Report: {}\n\n", report.symbol));

    md.push_str("## Metadata\n\n");
    md.push_str("| Field | Value |\n");
    md.push_str("| --- | --- |\n");
    md.push_str(&format!("| Symbol | {} |\n", report.symbol));
    if let Some(company) = &report.company_name {
        md.push_str(&format!("| Company | {company} |\n"));
    }
    if let (Some(start), Some(end)) = (report.start_date, report.end_date) {
        md.push_str(&format!("| Period | {start} to {end} |\n"));
    }
    md.push_str(&format!(
        "| Bars | {} ({} warmup) |\n",
        report.bar_count, report.warmup_bars
    ));
    md.push_str(&format!("| Dataset Hash | {} |\n", report.dataset_hash));
    if report.synthetic {
        md.push_str("| Data | **SYNTHETIC** |\n");
    }
    md.push('\n');

    if let Some(q) = &report.quote {
        md.push_str("## Latest Quote\n\n");
        md.push_str("| Field | Value |\n");
        md.push_str("| --- | --- |\n");
        md.push_str(&format!("| Date | {} |\n", q.date));
        md.push_str(&format!("| Close | {:.2} |\n", q.close));
        md.push_str(&format!(
            "| Change | {} ({}%) |\n",
            signed(q.change),
            signed(q.change_pct)
        ));
        md.push_str(&format!("| Range | {:.2} - {:.2} |\n", q.low, q.high));
        md.push_str(&format!("| Volume (thousand shares) | {} |\n", fixed2(q.volume)));
        md.push_str(&format!("| Value (million) | {} |\n", fixed2(q.value)));
        md.push('\n');
    }

    md.push_str("## Indicators\n\n");
    md.push_str("| Indicator | Value |\n");
    md.push_str("| --- | --- |\n");
    match &report.trend {
        Some(t) => md.push_str(&format!("| Trend Slope (per day) | {:.6} |\n", t.slope)),
        None => md.push_str("| Trend Slope (per day) | n/a |\n"),
    }
    if let Some(r) = &report.readings {
        md.push_str(&format!("| MACD | {} |\n", opt(r.macd)));
        md.push_str(&format!("| MACD Signal | {} |\n", opt(r.macd_signal)));
        md.push_str(&format!(
            "| RSI ({}) | {} |\n",
            report.params.rsi_period,
            opt(r.rsi)
        ));
        md.push_str(&format!("| Parabolic SAR | {} |\n", opt(r.sar)));
    }
    if let Some(regime) = report.sar_regime {
        md.push_str(&format!("| SAR Regime | {} |\n", regime.as_str()));
    }
    for ma in &report.moving_averages {
        md.push_str(&format!("| SMA {} | {} |\n", ma.window, opt(ma.value)));
    }
    md.push('\n');

    md.push_str("## Scores\n\n");
    md.push_str("| Score | Value | Signal | สัญญาณ |\n");
    md.push_str("| --- | --- | --- | --- |\n");
    for s in &report.scores {
        md.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            title(&s.name),
            s.score,
            s.label,
            s.thai_label
        ));
    }
    md.push('\n');

    if !report.skipped_rows.is_empty() {
        md.push_str("## Data Quality\n\n");
        for row in &report.skipped_rows {
            md.push_str(&format!("- line {}: {}\n", row.line, describe(&row.reason)));
        }
        md.push('\n');
    }

    md
}

// ─── Text report ────────────────────────────────────────────────────

/// Terminal summary. `thai` switches signal labels to the Thai wording.
pub fn render_text(report: &AnalysisReport, thai: bool) -> String {
    let mut out = String::with_capacity(512);

    match &report.company_name {
        Some(company) => out.push_str(&format!("{} ({})\n", report.symbol, company)),
        None => out.push_str(&format!("{}\n", report.symbol)),
    }
    if report.synthetic {
        out.push_str("(synthetic data)\n");
    }

    match &report.quote {
        Some(q) => {
            out.push_str(&format!(
                "{}  close {:.2}  change {} ({}%)  range {:.2}-{:.2}\n",
                q.date,
                q.close,
                signed(q.change),
                signed(q.change_pct),
                q.low,
                q.high
            ));
            out.push_str(&format!(
                "volume {}  value {}\n",
                q.volume.map_or_else(|| "n/a".into(), |v| format!("{v:.2}k")),
                q.value.map_or_else(|| "n/a".into(), |v| format!("{v:.2}m"))
            ));
        }
        None => out.push_str("no price data\n"),
    }

    if let Some(t) = &report.trend {
        out.push_str(&format!("trend slope {:+.6}/day\n", t.slope));
    }
    if let Some(r) = &report.readings {
        out.push_str(&format!(
            "macd {}  signal {}  rsi {}  sar {}\n",
            opt(r.macd),
            opt(r.macd_signal),
            opt(r.rsi),
            opt(r.sar)
        ));
    }

    out.push('\n');
    for s in &report.scores {
        let label = if thai { &s.thai_label } else { &s.label };
        out.push_str(&format!("{:<16} {:>3}  {}\n", title(&s.name), s.score, label));
    }
    if !report.skipped_rows.is_empty() {
        out.push_str(&format!("\n{} row(s) skipped\n", report.skipped_rows.len()));
    }

    out
}

// ─── Helpers ────────────────────────────────────────────────────────

/// Enriched-CSV base cell; non-finite is an empty cell.
fn base_cell(v: f64) -> String {
    if v.is_finite() {
        v.to_string()
    } else {
        String::new()
    }
}

/// Price-sheet cell; non-finite is the exchange's `-`.
fn sheet_cell(v: f64) -> String {
    if v.is_finite() {
        format!("{v:.2}")
    } else {
        "-".to_string()
    }
}

fn fixed2(v: Option<f64>) -> String {
    v.map(|x| format!("{x:.2}")).unwrap_or_else(|| "n/a".into())
}

fn signed(v: Option<f64>) -> String {
    v.map(|x| format!("{x:+.2}")).unwrap_or_else(|| "n/a".into())
}

fn opt(v: Option<f64>) -> String {
    v.map(|x| format!("{x:.4}")).unwrap_or_else(|| "n/a".into())
}

fn title(name: &str) -> String {
    match name {
        "technical" => "Technical".into(),
        "moving_average" => "Moving Average".into(),
        "summary" => "Summary".into(),
        other => other.to_string(),
    }
}

fn describe(reason: &SkipReason) -> String {
    match reason {
        SkipReason::BlankDate => "blank date".into(),
        SkipReason::RepeatedHeader => "repeated header".into(),
        SkipReason::Malformed(detail) => format!("malformed ({detail})"),
    }
}

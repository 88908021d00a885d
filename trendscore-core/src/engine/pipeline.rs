//! End-to-end analysis: engines → merge → score → classify.
//!
//! The trend fit, the SAR fold, and the column indicators (MACD lines, RSI,
//! SMAs) only read the shared series, so they run concurrently. The merge
//! waits for all of them; scoring reads the merged table's last row.

use super::merge::{merge_by_date, MergedTable};
use super::precompute::{compute_warmup, precompute_indicators};
use crate::components::indicator::{DerivedSeries, Indicator};
use crate::domain::PriceSeries;
use crate::error::EngineError;
use crate::indicators::{fit_trend, Macd, ParabolicSar, Rsi, SarPoint, Sma, TrendFit};
use crate::params::AnalysisParams;
use crate::scoring::{
    moving_average_score, summary_score, technical_score, LatestReadings,
    MovingAverageReading, Score, Signal,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const TREND_COLUMN: &str = "trend";
pub const MACD_COLUMN: &str = "macd";
pub const MACD_SIGNAL_COLUMN: &str = "macd_signal";
pub const MACD_HIST_COLUMN: &str = "macd_hist";
pub const SAR_COLUMN: &str = "sar";

/// The three bounded scores for the latest bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub technical: Score,
    pub moving_average: Score,
    pub summary: Score,
}

impl ScoreCard {
    pub fn technical_signal(&self) -> Signal {
        self.technical.signal()
    }

    pub fn moving_average_signal(&self) -> Signal {
        self.moving_average.signal()
    }

    pub fn summary_signal(&self) -> Signal {
        self.summary.signal()
    }
}

/// Everything the presentation layer renders.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub params: AnalysisParams,
    /// Base rows with every derived column merged on by date.
    pub table: MergedTable,
    /// `None` when the series is too short to fit a line.
    pub trend: Option<TrendFit>,
    /// Per-bar stop, regime, and reversal flag.
    pub sar_points: Vec<SarPoint>,
    /// Readings the technical score used. `None` for an empty series.
    pub latest: Option<LatestReadings>,
    pub moving_averages: Vec<MovingAverageReading>,
    pub scores: ScoreCard,
    /// Longest warm-up across the windowed indicators.
    pub warmup: usize,
}

impl Analysis {
    pub fn rsi_column(&self) -> String {
        Self::rsi_column_for(self.params.rsi_period)
    }

    pub fn rsi_column_for(period: usize) -> String {
        format!("rsi_{period}")
    }

    pub fn sma_column(window: usize) -> String {
        format!("sma_{window}")
    }
}

/// Run the full pipeline over an already-sorted series.
///
/// Fails only on invalid parameters. Short histories produce gaps and
/// neutral score contributions, never errors.
pub fn analyze(series: &PriceSeries, params: &AnalysisParams) -> Result<Analysis, EngineError> {
    params.validate()?;
    let bars = series.bars();

    let mut indicators: Vec<Box<dyn Indicator>> = vec![Box::new(Rsi::new(params.rsi_period))];
    indicators.extend(
        params
            .ma_windows
            .iter()
            .map(|&w| Box::new(Sma::new(w)) as Box<dyn Indicator>),
    );
    let warmup = compute_warmup(&indicators);
    let macd = Macd::line(params.macd_short, params.macd_long, params.macd_signal);
    let sar = ParabolicSar::new(params.af_step, params.af_max);

    let ((columns, macd_out), (sar_points, trend)) = rayon::join(
        || {
            rayon::join(
                || precompute_indicators(bars, &indicators),
                || macd.compute_all(bars),
            )
        },
        || rayon::join(|| sar.compute_points(bars), || fit_trend(bars)),
    );

    let trend = match trend {
        Ok(fit) => Some(fit),
        Err(e) => {
            debug!(error = %e, "trend skipped");
            None
        }
    };

    let mut derived: Vec<DerivedSeries> = Vec::with_capacity(columns.len() + 5);
    if let Some(fit) = trend {
        derived.push(DerivedSeries::new(
            TREND_COLUMN,
            bars.iter()
                .map(|b| {
                    let v = fit.value_at(b.date);
                    (b.date, v.is_finite().then_some(v))
                })
                .collect(),
        ));
    }
    derived.push(DerivedSeries::from_values(MACD_COLUMN, bars, &macd_out.macd));
    derived.push(DerivedSeries::from_values(MACD_SIGNAL_COLUMN, bars, &macd_out.signal));
    derived.push(DerivedSeries::from_values(MACD_HIST_COLUMN, bars, &macd_out.histogram));
    derived.extend(columns);
    derived.push(DerivedSeries::new(
        SAR_COLUMN,
        bars.iter()
            .zip(&sar_points)
            .map(|(b, p)| (b.date, p.sar.is_finite().then_some(p.sar)))
            .collect(),
    ));

    let table = merge_by_date(series, &derived);

    let rsi_column = Analysis::rsi_column_for(params.rsi_period);
    let latest = series.latest().map(|bar| LatestReadings {
        close: bar.close,
        macd: table.latest(MACD_COLUMN),
        macd_signal: table.latest(MACD_SIGNAL_COLUMN),
        rsi: table.latest(&rsi_column),
        sar: table.latest(SAR_COLUMN),
    });

    let moving_averages: Vec<MovingAverageReading> = params
        .ma_windows
        .iter()
        .map(|&window| MovingAverageReading {
            window,
            value: table.latest(&Analysis::sma_column(window)),
        })
        .collect();

    let scores = match &latest {
        Some(readings) => {
            let technical = technical_score(readings);
            let moving_average = moving_average_score(readings.close, &moving_averages);
            ScoreCard {
                technical,
                moving_average,
                summary: summary_score(technical, moving_average),
            }
        }
        None => {
            let neutral = Score::clamped(crate::scoring::NEUTRAL);
            ScoreCard {
                technical: neutral,
                moving_average: neutral,
                summary: neutral,
            }
        }
    };

    info!(
        bars = bars.len(),
        technical = scores.technical.value(),
        moving_average = scores.moving_average.value(),
        summary = scores.summary.value(),
        signal = scores.summary_signal().text(),
        "analysis complete"
    );

    Ok(Analysis {
        params: params.clone(),
        table,
        trend,
        sar_points,
        latest,
        moving_averages,
        scores,
        warmup,
    })
}

//! End-to-end pipeline tests: series in, merged table and scores out.

use chrono::NaiveDate;
use trendscore_core::domain::{PriceBar, PriceSeries};
use trendscore_core::engine::pipeline::{MACD_COLUMN, MACD_SIGNAL_COLUMN, SAR_COLUMN, TREND_COLUMN};
use trendscore_core::indicators::Regime;
use trendscore_core::{analyze, get_signal_text, AnalysisParams, Signal};

fn linear_series(n: usize, start: f64, end: f64) -> PriceSeries {
    let base = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let step = (end - start) / (n - 1) as f64;
    let bars = (0..n)
        .map(|i| {
            let close = start + i as f64 * step;
            PriceBar::from_hlc(base + chrono::Duration::days(i as i64), close + 1.0, close - 1.0, close)
        })
        .collect();
    PriceSeries::new(bars)
}

#[test]
fn steady_uptrend_reads_bullish() {
    let series = linear_series(30, 100.0, 130.0);
    let analysis = analyze(&series, &AnalysisParams::default()).unwrap();

    assert!(analysis.sar_points.iter().all(|p| p.regime == Regime::Rising));
    assert!(analysis.sar_points.iter().all(|p| !p.reversal));

    let last = analysis.table.len() - 1;
    let close = analysis.table.rows()[last].close;
    let sar = analysis.table.value(last, SAR_COLUMN).unwrap();
    assert!(close > sar, "close {close} should sit above SAR {sar}");

    let trend = analysis.trend.unwrap();
    assert!(trend.slope > 0.0);
    assert!((trend.slope - 30.0 / 29.0).abs() < 1e-9);

    assert!(analysis.table.latest(MACD_COLUMN) > analysis.table.latest(MACD_SIGNAL_COLUMN));
    assert!(analysis.scores.technical.value() >= 50);
    assert_eq!(analysis.scores.technical.value(), 65);
    assert_eq!(analysis.scores.moving_average.value(), 80);
    assert_eq!(analysis.scores.summary.value(), 72);
    assert_eq!(analysis.scores.summary_signal(), Signal::Buy);
}

#[test]
fn steady_downtrend_reads_bearish() {
    let series = linear_series(30, 130.0, 100.0);
    let analysis = analyze(&series, &AnalysisParams::default()).unwrap();

    // Seeded rising, so the first falling bar flips the stop.
    assert!(analysis.sar_points[1].reversal);
    assert!(analysis.sar_points[1..].iter().all(|p| p.regime == Regime::Falling));
    assert!(analysis.trend.unwrap().slope < 0.0);

    let latest = analysis.latest.unwrap();
    assert!(latest.macd.unwrap() < latest.macd_signal.unwrap());
    assert_eq!(latest.rsi, Some(0.0));

    // -15 MACD, +10 oversold RSI, -10 below SAR
    assert_eq!(analysis.scores.technical.value(), 35);
    assert_eq!(analysis.scores.moving_average.value(), 20);
    assert_eq!(analysis.scores.summary.value(), 27);
    assert_eq!(get_signal_text(analysis.scores.summary.value() as i32), "sell");
}

#[test]
fn trend_column_follows_fit() {
    let series = linear_series(10, 50.0, 59.0);
    let analysis = analyze(&series, &AnalysisParams::default()).unwrap();
    let trend = analysis.trend.unwrap();
    let column = analysis.table.column(TREND_COLUMN).unwrap();
    for (bar, value) in analysis.table.rows().iter().zip(column) {
        let v = value.unwrap();
        assert!((v - trend.value_at(bar.date)).abs() < 1e-9);
        assert!((v - bar.close).abs() < 1e-6, "exact line should fit exactly");
    }
}

#[test]
fn unsorted_duplicate_input_is_normalized() {
    let d = |day| NaiveDate::from_ymd_opt(2024, 5, day).unwrap();
    let bars = vec![
        PriceBar::from_hlc(d(3), 12.0, 10.0, 11.0),
        PriceBar::from_hlc(d(1), 11.0, 9.0, 10.0),
        PriceBar::from_hlc(d(2), 13.0, 11.0, 12.0),
        PriceBar::from_hlc(d(2), 99.0, 1.0, 50.0),
    ];
    let series = PriceSeries::new(bars);
    let analysis = analyze(&series, &AnalysisParams::default()).unwrap();
    let dates: Vec<NaiveDate> = analysis.table.rows().iter().map(|b| b.date).collect();
    assert_eq!(dates, vec![d(1), d(2), d(3)]);
    assert_eq!(analysis.table.rows()[1].close, 12.0);
}

#[test]
fn short_history_leaves_gaps_not_errors() {
    let series = linear_series(8, 10.0, 17.0);
    let analysis = analyze(&series, &AnalysisParams::default()).unwrap();
    // sma_10 and sma_20 never defined, rsi_14 never defined
    assert!(analysis.table.column("sma_20").unwrap().iter().all(Option::is_none));
    assert!(analysis.table.column("rsi_14").unwrap().iter().all(Option::is_none));
    assert!(analysis.latest.unwrap().rsi.is_none());
    let defined: Vec<_> = analysis.moving_averages.iter().filter(|r| r.value.is_some()).collect();
    assert_eq!(defined.len(), 1);
    assert_eq!(defined[0].window, 5);
}

#[test]
fn custom_params_rename_columns() {
    let params = AnalysisParams {
        rsi_period: 7,
        ma_windows: vec![3, 8],
        ..Default::default()
    };
    let series = linear_series(20, 10.0, 30.0);
    let analysis = analyze(&series, &params).unwrap();
    let names: Vec<&str> = analysis.table.column_names().collect();
    assert!(names.contains(&"rsi_7"));
    assert!(names.contains(&"sma_3"));
    assert!(names.contains(&"sma_8"));
    assert!(!names.contains(&"sma_20"));
}

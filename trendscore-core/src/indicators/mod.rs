//! Concrete indicator implementations.
//!
//! Every engine column implements the `Indicator` trait from
//! `components::indicator`. They are computed once over the whole series and
//! merged back onto the base table by date.
//!
//! MACD exposes its three lines as separate named instances, keeping the
//! single-series `Indicator` trait unchanged.

pub mod ema;
pub mod macd;
pub mod parabolic_sar;
pub mod rsi;
pub mod sma;
pub mod trend;

pub use ema::Ema;
pub use macd::{Macd, MacdLine, MacdOutput};
pub use parabolic_sar::{ParabolicSar, Regime, SarPoint};
pub use rsi::Rsi;
pub use sma::Sma;
pub use trend::{fit_trend, TrendFit};

/// Create synthetic bars from close prices for testing.
///
/// Dates are consecutive calendar days from 2024-01-02. open = prev_close
/// (or close for first bar), high = max(open,close) + 1.0,
/// low = min(open,close) - 1.0.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<crate::domain::PriceBar> {
    use crate::domain::PriceBar;
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            let high = open.max(close) + 1.0;
            let low = open.min(close) - 1.0;
            PriceBar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high,
                low,
                avg: (high + low) / 2.0,
                close,
                change: close - open,
                change_pct: 0.0,
                volume: 1000.0,
                value: 0.0,
                market_index: 0.0,
                market_change_pct: 0.0,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;

//! Linear price trend: ordinary least squares of close against calendar time.
//!
//! x = proleptic Gregorian ordinal of the bar date (0001-01-01 = 1), so gaps
//! for weekends and holidays are real distance on the time axis.
//! Fit: close ≈ slope * x + intercept, closed form on mean-centred x.
//! No regularization, no outlier rejection.

use crate::domain::PriceBar;
use crate::error::EngineError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Fitted trend line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendFit {
    /// Price change per calendar day.
    pub slope: f64,
    /// Fitted price at ordinal 0.
    pub intercept: f64,
}

impl TrendFit {
    /// Evaluate the fitted line at a date.
    pub fn value_at(&self, date: NaiveDate) -> f64 {
        self.slope * ordinal(date) + self.intercept
    }
}

fn ordinal(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

/// Fit the trend line. Needs at least two distinct dates.
pub fn fit_trend(bars: &[PriceBar]) -> Result<TrendFit, EngineError> {
    let n = bars.len();
    if n < 2 {
        return Err(EngineError::InsufficientData {
            engine: "trend",
            required: 2,
            available: n,
        });
    }

    let xs: Vec<f64> = bars.iter().map(|b| ordinal(b.date)).collect();
    let mean_x = xs.iter().sum::<f64>() / n as f64;
    let mean_y = bars.iter().map(|b| b.close).sum::<f64>() / n as f64;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (x, bar) in xs.iter().zip(bars) {
        let dx = x - mean_x;
        sxx += dx * dx;
        sxy += dx * (bar.close - mean_y);
    }

    if sxx == 0.0 {
        // Every bar on the same date: no time axis to regress on.
        return Err(EngineError::InsufficientData {
            engine: "trend",
            required: 2,
            available: 1,
        });
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    if !slope.is_finite() || !intercept.is_finite() {
        // A NaN close poisons the sums.
        return Err(EngineError::NonFiniteInput { engine: "trend" });
    }
    Ok(TrendFit { slope, intercept })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars};

    #[test]
    fn trend_exact_line() {
        // make_bars spaces dates one calendar day apart
        let bars = make_bars(&[10.0, 12.0, 14.0, 16.0]);
        let fit = fit_trend(&bars).unwrap();
        assert_approx(fit.slope, 2.0, 1e-9);
        assert_approx(fit.value_at(bars[0].date), 10.0, 1e-6);
        assert_approx(fit.value_at(bars[3].date), 16.0, 1e-6);
    }

    #[test]
    fn trend_uses_calendar_gaps() {
        let d = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
        // Friday → Monday is three days; price rises 1 per calendar day.
        let bars = vec![
            PriceBar::from_hlc(d("2025-01-02"), 11.0, 9.0, 10.0),
            PriceBar::from_hlc(d("2025-01-03"), 12.0, 10.0, 11.0),
            PriceBar::from_hlc(d("2025-01-06"), 15.0, 13.0, 14.0),
        ];
        let fit = fit_trend(&bars).unwrap();
        assert_approx(fit.slope, 1.0, 1e-9);
    }

    #[test]
    fn trend_flat_series_has_zero_slope() {
        let bars = make_bars(&[5.0; 10]);
        let fit = fit_trend(&bars).unwrap();
        assert_approx(fit.slope, 0.0, 1e-12);
    }

    #[test]
    fn trend_needs_two_bars() {
        let bars = make_bars(&[5.0]);
        assert_eq!(
            fit_trend(&bars),
            Err(EngineError::InsufficientData {
                engine: "trend",
                required: 2,
                available: 1,
            })
        );
        assert!(fit_trend(&[]).is_err());
    }

    #[test]
    fn trend_rejects_nan_close() {
        let mut bars = make_bars(&[10.0, 11.0, 12.0, 13.0, 14.0]);
        bars[2].close = f64::NAN;
        assert_eq!(
            fit_trend(&bars),
            Err(EngineError::NonFiniteInput { engine: "trend" })
        );
    }
}

//! Relative Strength Index (RSI).
//!
//! Simple (rolling-mean) averages of gains and losses over `period` bars.
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! The first bar has no predecessor and counts as a zero change, so the
//! first full window ends at index period-1.
//! Lookback: period - 1.
//!
//! Zero-loss policy: when avg_loss == 0 the ratio is unbounded, and RSI is
//! defined as 100 (no downside in the window). This includes a perfectly
//! flat window. The result is never infinite or NaN for finite input.

use super::sma::sma_of_series;
use crate::components::indicator::Indicator;
use crate::domain::PriceBar;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            name: format!("rsi_{period}"),
        }
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, bars: &[PriceBar]) -> Vec<f64> {
        let n = bars.len();
        let mut gains = vec![0.0; n];
        let mut losses = vec![0.0; n];

        for i in 1..n {
            let delta = bars[i].close - bars[i - 1].close;
            if delta.is_nan() {
                gains[i] = f64::NAN;
                losses[i] = f64::NAN;
            } else if delta > 0.0 {
                gains[i] = delta;
            } else {
                losses[i] = -delta;
            }
        }

        let avg_gain = sma_of_series(&gains, self.period);
        let avg_loss = sma_of_series(&losses, self.period);

        avg_gain
            .iter()
            .zip(&avg_loss)
            .map(|(&g, &l)| compute_rsi(g, l))
            .collect()
    }
}

fn compute_rsi(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_gain.is_nan() || avg_loss.is_nan() {
        f64::NAN
    } else if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

//! Moving Average Convergence/Divergence (MACD).
//!
//! Three lines (separate Indicator instances, like the bands of a channel):
//! - Macd: EMA(close, short) - EMA(close, long)
//! - Signal: EMA(macd, signal)
//! - Histogram: macd - signal
//!
//! All EMAs are self-seeded, so every bar has a value.
//! Lookback: 0.

use super::ema::ema_of_series;
use crate::components::indicator::Indicator;
use crate::domain::PriceBar;

/// Which MACD line to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacdLine {
    Macd,
    Signal,
    Histogram,
}

/// All three MACD lines for one series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MacdOutput {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct Macd {
    short: usize,
    long: usize,
    signal: usize,
    line: MacdLine,
    name: String,
}

impl Macd {
    fn with_line(short: usize, long: usize, signal: usize, line: MacdLine) -> Self {
        assert!(short >= 1 && long >= 1 && signal >= 1, "MACD spans must be >= 1");
        let name = match line {
            MacdLine::Macd => "macd".to_string(),
            MacdLine::Signal => "macd_signal".to_string(),
            MacdLine::Histogram => "macd_hist".to_string(),
        };
        Self {
            short,
            long,
            signal,
            line,
            name,
        }
    }

    pub fn line(short: usize, long: usize, signal: usize) -> Self {
        Self::with_line(short, long, signal, MacdLine::Macd)
    }

    pub fn signal(short: usize, long: usize, signal: usize) -> Self {
        Self::with_line(short, long, signal, MacdLine::Signal)
    }

    pub fn histogram(short: usize, long: usize, signal: usize) -> Self {
        Self::with_line(short, long, signal, MacdLine::Histogram)
    }

    /// Standard 12/26/9 MACD line.
    pub fn default_params() -> Self {
        Self::line(12, 26, 9)
    }

    /// Compute every line in one pass over the closes.
    pub fn compute_all(&self, bars: &[PriceBar]) -> MacdOutput {
        macd_of_series(
            &bars.iter().map(|b| b.close).collect::<Vec<_>>(),
            self.short,
            self.long,
            self.signal,
        )
    }
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, bars: &[PriceBar]) -> Vec<f64> {
        let out = self.compute_all(bars);
        match self.line {
            MacdLine::Macd => out.macd,
            MacdLine::Signal => out.signal,
            MacdLine::Histogram => out.histogram,
        }
    }
}

/// MACD of a raw close series.
pub fn macd_of_series(closes: &[f64], short: usize, long: usize, signal: usize) -> MacdOutput {
    let fast = ema_of_series(closes, short);
    let slow = ema_of_series(closes, long);
    let macd: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
    let signal = ema_of_series(&macd, signal);
    let histogram = macd.iter().zip(&signal).map(|(m, s)| m - s).collect();
    MacdOutput {
        macd,
        signal,
        histogram,
    }
}

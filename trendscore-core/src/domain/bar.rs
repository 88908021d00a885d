//! PriceBar: one trading day of exchange data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily record for a single listed equity.
///
/// Column order follows the exchange's historical price sheet. `volume` is in
/// thousands of shares, `value` in millions of the listing currency.
///
/// `low <= open, close, avg <= high` is assumed but never enforced. A malformed
/// bar is passed through to every engine unchanged; rejecting it is the
/// ingestor's job (see [`PriceBar::is_sane`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub avg: f64,
    pub close: f64,
    pub change: f64,
    pub change_pct: f64,
    pub volume: f64,
    pub value: f64,
    pub market_index: f64,
    pub market_change_pct: f64,
}

impl PriceBar {
    /// Bar with only the fields the indicator engines read. Everything else is zero.
    pub fn from_hlc(date: NaiveDate, high: f64, low: f64, close: f64) -> Self {
        Self {
            date,
            open: close,
            high,
            low,
            avg: (high + low) / 2.0,
            close,
            change: 0.0,
            change_pct: 0.0,
            volume: 0.0,
            value: 0.0,
            market_index: 0.0,
            market_change_pct: 0.0,
        }
    }

    /// Returns true if any price field the engines read is non-finite.
    pub fn is_void(&self) -> bool {
        !(self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite())
    }

    /// Basic price sanity: finite, positive, and `low <= open, close <= high`.
    pub fn is_sane(&self) -> bool {
        if self.is_void() {
            return false;
        }
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.close > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bar() -> PriceBar {
        PriceBar {
            date: NaiveDate::from_ymd_opt(2025, 1, 3).unwrap(),
            open: 280.0,
            high: 284.0,
            low: 278.0,
            avg: 281.2,
            close: 283.0,
            change: 3.0,
            change_pct: 1.07,
            volume: 5_420.5,
            value: 1_524.3,
            market_index: 1_391.2,
            market_change_pct: 0.4,
        }
    }

    #[test]
    fn bar_is_sane() {
        assert!(sample_bar().is_sane());
    }

    #[test]
    fn bar_detects_void() {
        let mut bar = sample_bar();
        bar.close = f64::NAN;
        assert!(bar.is_void());
        assert!(!bar.is_sane());
    }

    #[test]
    fn bar_detects_inverted_high_low() {
        let mut bar = sample_bar();
        bar.high = 270.0;
        assert!(!bar.is_void());
        assert!(!bar.is_sane());
    }

    #[test]
    fn from_hlc_fills_engine_fields() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();
        let bar = PriceBar::from_hlc(date, 11.0, 9.0, 10.5);
        assert_eq!(bar.high, 11.0);
        assert_eq!(bar.low, 9.0);
        assert_eq!(bar.close, 10.5);
        assert_eq!(bar.avg, 10.0);
        assert!(bar.is_sane());
    }

    #[test]
    fn bar_serialization_roundtrip() {
        let bar = sample_bar();
        let json = serde_json::to_string(&bar).unwrap();
        let deser: PriceBar = serde_json::from_str(&json).unwrap();
        assert_eq!(bar, deser);
    }
}

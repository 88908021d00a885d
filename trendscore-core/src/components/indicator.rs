//! Indicator trait and date-keyed derived series.
//!
//! Indicators are pure functions: bar history in, numeric series out.
//! They are computed once over the whole series and then merged back onto
//! the base table by date.

use crate::domain::PriceBar;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Trait for indicators.
///
/// Indicators take a full bar series and produce a numeric output series of
/// the same length. The first `lookback()` values are `f64::NAN` (warm-up).
///
/// # Look-ahead guard
/// No value at bar t may depend on bar t+1 or later. Every indicator must
/// give identical output for a truncated series and the matching prefix of
/// the full series.
pub trait Indicator: Send + Sync {
    /// Column name (e.g., "sma_20", "rsi_14").
    fn name(&self) -> &str;

    /// Number of leading bars with no defined value.
    fn lookback(&self) -> usize;

    /// Compute the indicator for the entire bar series.
    ///
    /// Returns a `Vec<f64>` of the same length as `bars`.
    fn compute(&self, bars: &[PriceBar]) -> Vec<f64>;

    /// Compute and key the output by bar date.
    fn derive(&self, bars: &[PriceBar]) -> DerivedSeries {
        DerivedSeries::from_values(self.name(), bars, &self.compute(bars))
    }
}

/// One engine output column, keyed by date.
///
/// Points are in the same order as the bars they were computed from. A
/// warm-up or otherwise undefined reading is `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedSeries {
    pub name: String,
    pub points: Vec<(NaiveDate, Option<f64>)>,
}

impl DerivedSeries {
    pub fn new(name: impl Into<String>, points: Vec<(NaiveDate, Option<f64>)>) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }

    /// Pair raw values with bar dates. Non-finite values become `None`.
    pub fn from_values(name: impl Into<String>, bars: &[PriceBar], values: &[f64]) -> Self {
        debug_assert_eq!(bars.len(), values.len());
        let points = bars
            .iter()
            .zip(values)
            .map(|(bar, &v)| (bar.date, v.is_finite().then_some(v)))
            .collect();
        Self::new(name, points)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of dates with a defined value.
    pub fn defined_count(&self) -> usize {
        self.points.iter().filter(|(_, v)| v.is_some()).count()
    }

    /// Value on the last date, if defined.
    pub fn latest(&self) -> Option<f64> {
        self.points.last().and_then(|(_, v)| *v)
    }
}

//! PriceSeries: the canonical, date-ordered input to every engine.

use super::bar::PriceBar;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Ordered, date-unique sequence of bars.
///
/// Construction sorts ascending by date (stable) and keeps the first bar seen
/// for each date. Engines assume forward chronological order, so there is no
/// way to build a `PriceSeries` that violates it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<PriceBar>", into = "Vec<PriceBar>")]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn new(mut bars: Vec<PriceBar>) -> Self {
        bars.sort_by_key(|b| b.date);
        bars.dedup_by_key(|b| b.date);
        Self { bars }
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Most recent bar, the one every score is computed from.
    pub fn latest(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// First and last date, if any.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.bars.first(), self.bars.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date)),
            _ => None,
        }
    }
}

impl From<Vec<PriceBar>> for PriceSeries {
    fn from(bars: Vec<PriceBar>) -> Self {
        Self::new(bars)
    }
}

impl From<PriceSeries> for Vec<PriceBar> {
    fn from(series: PriceSeries) -> Self {
        series.bars
    }
}

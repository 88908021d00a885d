//! Indicator precomputation.
//!
//! Every column is computed once over the whole series before merging.
//! Indicators only read the shared bar slice, so they run in parallel.

use crate::components::indicator::{DerivedSeries, Indicator};
use crate::domain::PriceBar;
use rayon::prelude::*;
use tracing::debug;

/// Compute every indicator over `bars`, preserving the input order of `indicators`.
pub fn precompute_indicators(
    bars: &[PriceBar],
    indicators: &[Box<dyn Indicator>],
) -> Vec<DerivedSeries> {
    indicators
        .par_iter()
        .map(|indicator| {
            let series = indicator.derive(bars);
            debug_assert_eq!(
                series.len(),
                bars.len(),
                "indicator '{}' produced {} values for {} bars",
                indicator.name(),
                series.len(),
                bars.len(),
            );
            debug!(
                indicator = indicator.name(),
                bars = bars.len(),
                defined = series.defined_count(),
                "indicator computed"
            );
            series
        })
        .collect()
}

/// Longest warm-up across a set of indicators.
pub fn compute_warmup(indicators: &[Box<dyn Indicator>]) -> usize {
    indicators.iter().map(|i| i.lookback()).max().unwrap_or(0)
}

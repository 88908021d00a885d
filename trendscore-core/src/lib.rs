//! TrendScore Core: indicator computation and signal-scoring engine.
//!
//! This crate turns an already-loaded daily price history into derived
//! analytic series and a bounded buy/sell score:
//! - Domain types (price bars, date-ordered series)
//! - Indicators: linear trend, MACD, RSI, Parabolic SAR, SMA
//! - Left-join merge of derived series onto the base table by date
//! - Technical, moving-average, and summary scores in [0, 100]
//! - Five-band signal classifier
//!
//! Everything is synchronous and pure. The only parallelism is
//! `engine::analyze` running independent indicators on rayon.

pub mod components;
pub mod domain;
pub mod engine;
pub mod error;
pub mod indicators;
pub mod params;
pub mod scoring;

pub use domain::{PriceBar, PriceSeries};
pub use engine::{analyze, Analysis, ScoreCard};
pub use error::EngineError;
pub use params::AnalysisParams;
pub use scoring::{get_signal_text, Score, Signal};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: engine types can cross thread boundaries.
    ///
    /// Indicators run on rayon workers and the CLI may hand results to
    /// another thread; a non-Send field breaks the build here first.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::PriceBar>();
        require_sync::<domain::PriceBar>();
        require_send::<domain::PriceSeries>();
        require_sync::<domain::PriceSeries>();

        require_send::<components::DerivedSeries>();
        require_sync::<components::DerivedSeries>();
        require_send::<engine::MergedTable>();
        require_sync::<engine::MergedTable>();
        require_send::<engine::Analysis>();
        require_sync::<engine::Analysis>();

        require_send::<indicators::ParabolicSar>();
        require_sync::<indicators::ParabolicSar>();
        require_send::<indicators::Macd>();
        require_sync::<indicators::Macd>();
        require_send::<indicators::TrendFit>();
        require_sync::<indicators::TrendFit>();

        require_send::<params::AnalysisParams>();
        require_sync::<params::AnalysisParams>();
        require_send::<error::EngineError>();
        require_sync::<error::EngineError>();
    }

    /// Architecture contract: scoring reads readings, never bar history.
    ///
    /// `technical_score` takes only the latest readings, so no score can
    /// depend on anything but the most recent row.
    #[test]
    fn technical_score_sees_only_latest_readings() {
        fn _check(readings: &scoring::LatestReadings) -> Score {
            scoring::technical_score(readings)
        }
    }
}

//! Synthetic price sheets for demos, tests, and benchmarks.
//!
//! Seeded random walk over weekdays. The RNG seed mixes the symbol and the
//! caller's seed through BLAKE3, so the same inputs always give the same bars
//! and different symbols diverge.

use chrono::{Datelike, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;
use trendscore_core::domain::{PriceBar, PriceSeries};

const START_PRICE: f64 = 100.0;
const START_INDEX: f64 = 1400.0;

/// Company-name placeholder written into synthetic sheets.
pub fn synthetic_company_name(symbol: &str) -> String {
    format!("{symbol} (synthetic)")
}

fn rng_for(symbol: &str, seed: u64) -> StdRng {
    let mut hasher = blake3::Hasher::new();
    hasher.update(symbol.as_bytes());
    hasher.update(&seed.to_le_bytes());
    StdRng::from_seed(*hasher.finalize().as_bytes())
}

fn next_weekday(mut date: NaiveDate) -> NaiveDate {
    while matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
        date += chrono::Duration::days(1);
    }
    date
}

/// Generate `days` weekday bars starting on or after `start`.
pub fn generate_synthetic_series(symbol: &str, start: NaiveDate, days: usize, seed: u64) -> PriceSeries {
    let mut rng = rng_for(symbol, seed);
    let mut bars = Vec::with_capacity(days);
    let mut price = START_PRICE;
    let mut index = START_INDEX;
    let mut date = next_weekday(start);

    for _ in 0..days {
        let daily_return: f64 = rng.gen_range(-0.03..0.03);
        let open = price;
        let close = price * (1.0 + daily_return);
        let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.01));
        let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.01));
        let avg = (high + low) / 2.0;
        let volume: f64 = rng.gen_range(500.0..5_000.0);

        let index_return: f64 = rng.gen_range(-0.015..0.015);
        index *= 1.0 + index_return;

        bars.push(PriceBar {
            date,
            open,
            high,
            low,
            avg,
            close,
            change: close - price,
            change_pct: daily_return * 100.0,
            volume,
            // thousand shares × price → million currency units
            value: volume * avg / 1_000.0,
            market_index: index,
            market_change_pct: index_return * 100.0,
        });

        price = close;
        date = next_weekday(date + chrono::Duration::days(1));
    }

    debug!(symbol, days, seed, "synthetic series generated");
    PriceSeries::new(bars)
}

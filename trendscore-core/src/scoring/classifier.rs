//! Score → recommendation bands.
//!
//! Half-open bands, lower bound inclusive:
//! [0,20) liquidate immediately, [20,40) sell, [40,60) hold,
//! [60,80) buy, [80,100] buy immediately.

use super::Score;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete recommendation, ordered from most bearish to most bullish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    LiquidateImmediately,
    Sell,
    Hold,
    Buy,
    BuyImmediately,
}

impl Signal {
    pub const ALL: [Signal; 5] = [
        Signal::LiquidateImmediately,
        Signal::Sell,
        Signal::Hold,
        Signal::Buy,
        Signal::BuyImmediately,
    ];

    pub fn from_score(score: Score) -> Self {
        match score.value() {
            0..=19 => Signal::LiquidateImmediately,
            20..=39 => Signal::Sell,
            40..=59 => Signal::Hold,
            60..=79 => Signal::Buy,
            _ => Signal::BuyImmediately,
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            Signal::LiquidateImmediately => "liquidate immediately",
            Signal::Sell => "sell",
            Signal::Hold => "hold",
            Signal::Buy => "buy",
            Signal::BuyImmediately => "buy immediately",
        }
    }

    /// Label used on the exchange's Thai-language dashboards.
    pub fn thai_label(self) -> &'static str {
        match self {
            Signal::LiquidateImmediately => "เท",
            Signal::Sell => "ขาย",
            Signal::Hold => "ถือหุ้นไว้",
            Signal::Buy => "ซื้อ",
            Signal::BuyImmediately => "ซื้อทันที",
        }
    }

    /// Inclusive score range covered by this band.
    pub fn band(self) -> (u8, u8) {
        match self {
            Signal::LiquidateImmediately => (0, 19),
            Signal::Sell => (20, 39),
            Signal::Hold => (40, 59),
            Signal::Buy => (60, 79),
            Signal::BuyImmediately => (80, 100),
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Text recommendation for a raw score. Out-of-range input is clamped first.
pub fn get_signal_text(score: i32) -> &'static str {
    Signal::from_score(Score::clamped(score)).text()
}

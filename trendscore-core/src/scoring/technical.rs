//! Technical score from the latest MACD, RSI, and SAR readings.
//!
//! Start at 50.
//! - MACD and signal both defined: +15 if MACD > signal, else -15.
//! - RSI defined: -10 above 70 (overbought), +10 below 30 (oversold).
//! - SAR defined: +10 if close > SAR, else -10.
//! Clamp to [0, 100].

use super::{Score, NEUTRAL};
use serde::{Deserialize, Serialize};

const MACD_STEP: i32 = 15;
const RSI_STEP: i32 = 10;
const SAR_STEP: i32 = 10;

pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const RSI_OVERSOLD: f64 = 30.0;

/// Indicator values attached to the most recent bar.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LatestReadings {
    pub close: f64,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub rsi: Option<f64>,
    pub sar: Option<f64>,
}

pub fn technical_score(latest: &LatestReadings) -> Score {
    let mut score = NEUTRAL;

    if let (Some(macd), Some(signal)) = (latest.macd, latest.macd_signal) {
        score += if macd > signal { MACD_STEP } else { -MACD_STEP };
    }

    if let Some(rsi) = latest.rsi {
        if rsi > RSI_OVERBOUGHT {
            score -= RSI_STEP;
        } else if rsi < RSI_OVERSOLD {
            score += RSI_STEP;
        }
    }

    if let Some(sar) = latest.sar {
        score += if latest.close > sar { SAR_STEP } else { -SAR_STEP };
    }

    Score::clamped(score)
}

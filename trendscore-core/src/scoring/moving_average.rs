//! Moving-average score: latest close against SMAs at several windows.
//!
//! Start at 50; per window +10 if close > SMA, otherwise -10. A window whose
//! SMA is undefined on the latest bar (not enough history) is skipped.

use super::{Score, NEUTRAL};
use serde::{Deserialize, Serialize};

const STEP: i32 = 10;

/// Latest SMA reading for one window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovingAverageReading {
    pub window: usize,
    pub value: Option<f64>,
}

pub fn moving_average_score(close: f64, readings: &[MovingAverageReading]) -> Score {
    let raw = readings
        .iter()
        .filter_map(|r| r.value)
        .fold(NEUTRAL, |score, sma| {
            if close > sma {
                score + STEP
            } else {
                score - STEP
            }
        });
    Score::clamped(raw)
}

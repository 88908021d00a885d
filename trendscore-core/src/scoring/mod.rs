//! Signal scoring: bounded scores from the latest bar and their textual bands.
//!
//! Each score starts neutral at 50, moves by fixed steps per indicator
//! reading, and is clamped to [0, 100]. Missing readings contribute nothing.

pub mod classifier;
pub mod moving_average;
pub mod technical;

pub use classifier::{get_signal_text, Signal};
pub use moving_average::{moving_average_score, MovingAverageReading};
pub use technical::{technical_score, LatestReadings};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Neutral starting point for every score.
pub const NEUTRAL: i32 = 50;

/// Integer score in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Score(u8);

impl Score {
    pub const MIN: Score = Score(0);
    pub const MAX: Score = Score(100);

    /// Clamp an unbounded tally into range.
    pub fn clamped(raw: i32) -> Self {
        Score(raw.clamp(0, 100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn signal(self) -> Signal {
        Signal::from_score(self)
    }
}

impl TryFrom<u8> for Score {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value <= 100 {
            Ok(Score(value))
        } else {
            Err(format!("score {value} is outside 0..=100"))
        }
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Summary score: integer floor of the mean of the technical and moving-average scores.
pub fn summary_score(technical: Score, moving_average: Score) -> Score {
    Score(((technical.0 as u16 + moving_average.0 as u16) / 2) as u8)
}

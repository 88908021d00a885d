//! Indicator parameters supplied by the presentation layer.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// Every tunable the engines read. Missing fields deserialize to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisParams {
    pub macd_short: usize,
    pub macd_long: usize,
    pub macd_signal: usize,
    pub rsi_period: usize,
    pub af_step: f64,
    pub af_max: f64,
    pub ma_windows: Vec<usize>,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            macd_short: 12,
            macd_long: 26,
            macd_signal: 9,
            rsi_period: 14,
            af_step: 0.02,
            af_max: 0.2,
            ma_windows: vec![5, 10, 20],
        }
    }
}

impl AnalysisParams {
    pub fn validate(&self) -> Result<(), EngineError> {
        let positive = [
            ("macd_short", self.macd_short),
            ("macd_long", self.macd_long),
            ("macd_signal", self.macd_signal),
            ("rsi_period", self.rsi_period),
        ];
        for (name, value) in positive {
            if value == 0 {
                return Err(invalid(name, "must be >= 1"));
            }
        }
        if self.macd_short >= self.macd_long {
            return Err(invalid(
                "macd_short",
                format!("must be < macd_long ({})", self.macd_long),
            ));
        }
        if !(self.af_step.is_finite() && self.af_step > 0.0) {
            return Err(invalid("af_step", "must be a positive number"));
        }
        if !(self.af_max.is_finite() && self.af_max >= self.af_step) {
            return Err(invalid(
                "af_max",
                format!("must be >= af_step ({})", self.af_step),
            ));
        }
        if self.ma_windows.is_empty() {
            return Err(invalid("ma_windows", "needs at least one window"));
        }
        if self.ma_windows.contains(&0) {
            return Err(invalid("ma_windows", "windows must be >= 1"));
        }
        Ok(())
    }
}

fn invalid(name: &'static str, reason: impl Into<String>) -> EngineError {
    EngineError::InvalidParameter {
        name,
        reason: reason.into(),
    }
}

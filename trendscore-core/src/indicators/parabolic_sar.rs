//! Parabolic SAR: Wilder's stop-and-reverse with an acceleration factor.
//!
//! Inherently sequential: each bar's stop and regime depend on every prior
//! bar. The state machine has two regimes (rising, falling), an extreme
//! point (EP), and an acceleration factor (AF). `step` is the transition
//! function and `compute` is a left fold of it over the bars.
//!
//! Seed: SAR[0] = low[0], rising, EP = high[0], AF = af_step.
//! Parameters: af_step (default 0.02), af_max (default 0.20).
//! Lookback: 0. Every bar has a value.

use crate::components::indicator::Indicator;
use crate::domain::PriceBar;
use serde::{Deserialize, Serialize};

/// Directional regime of the stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    /// Bullish: stop trails below price, EP is the highest high.
    Rising,
    /// Bearish: stop trails above price, EP is the lowest low.
    Falling,
}

impl Regime {
    pub fn as_str(self) -> &'static str {
        match self {
            Regime::Rising => "rising",
            Regime::Falling => "falling",
        }
    }
}

/// One output row of the fold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SarPoint {
    pub sar: f64,
    pub regime: Regime,
    /// True when this bar flipped the regime.
    pub reversal: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct SarState {
    regime: Regime,
    sar: f64,
    extreme_point: f64,
    acceleration_factor: f64,
}

#[derive(Debug, Clone)]
pub struct ParabolicSar {
    af_step: f64,
    af_max: f64,
    name: String,
}

impl ParabolicSar {
    pub fn new(af_step: f64, af_max: f64) -> Self {
        assert!(af_step > 0.0, "AF step must be > 0");
        assert!(af_max >= af_step, "AF max must be >= AF step");
        Self {
            af_step,
            af_max,
            name: "sar".to_string(),
        }
    }

    /// Default parameters: 0.02, 0.20
    pub fn default_params() -> Self {
        Self::new(0.02, 0.20)
    }

    fn seed(&self, bar: &PriceBar) -> SarState {
        SarState {
            regime: Regime::Rising,
            sar: bar.low,
            extreme_point: bar.high,
            acceleration_factor: self.af_step,
        }
    }

    /// Transition: advance the state machine by one bar.
    fn step(&self, state: SarState, bar: &PriceBar) -> (SarState, SarPoint) {
        let candidate =
            state.sar + state.acceleration_factor * (state.extreme_point - state.sar);

        let mut next = state;
        let reversal = match state.regime {
            Regime::Rising if bar.low < candidate => {
                next.regime = Regime::Falling;
                next.sar = state.extreme_point;
                next.extreme_point = bar.low;
                next.acceleration_factor = self.af_step;
                true
            }
            Regime::Falling if bar.high > candidate => {
                next.regime = Regime::Rising;
                next.sar = state.extreme_point;
                next.extreme_point = bar.high;
                next.acceleration_factor = self.af_step;
                true
            }
            _ => {
                next.sar = candidate;
                false
            }
        };

        // A new extreme in the settled regime's direction accelerates the stop.
        let new_extreme = match next.regime {
            Regime::Rising => bar.high > next.extreme_point,
            Regime::Falling => bar.low < next.extreme_point,
        };
        if new_extreme {
            next.extreme_point = match next.regime {
                Regime::Rising => bar.high,
                Regime::Falling => bar.low,
            };
            next.acceleration_factor = (next.acceleration_factor + self.af_step).min(self.af_max);
        }

        let point = SarPoint {
            sar: next.sar,
            regime: next.regime,
            reversal,
        };
        (next, point)
    }

    /// Run the full fold, returning stop, regime, and reversal flag per bar.
    pub fn compute_points(&self, bars: &[PriceBar]) -> Vec<SarPoint> {
        let Some(first) = bars.first() else {
            return Vec::new();
        };

        let seed = self.seed(first);
        let mut points = Vec::with_capacity(bars.len());
        points.push(SarPoint {
            sar: seed.sar,
            regime: seed.regime,
            reversal: false,
        });

        bars[1..].iter().fold(seed, |state, bar| {
            let (next, point) = self.step(state, bar);
            points.push(point);
            next
        });

        points
    }
}

impl Default for ParabolicSar {
    fn default() -> Self {
        Self::default_params()
    }
}

impl Indicator for ParabolicSar {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, bars: &[PriceBar]) -> Vec<f64> {
        self.compute_points(bars).iter().map(|p| p.sar).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};
    use chrono::NaiveDate;

    fn make_hlc_bars(data: &[(f64, f64, f64)]) -> Vec<PriceBar> {
        let base_date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        data.iter()
            .enumerate()
            .map(|(i, &(high, low, close))| {
                PriceBar::from_hlc(base_date + chrono::Duration::days(i as i64), high, low, close)
            })
            .collect()
    }

    #[test]
    fn psar_empty_input() {
        assert!(ParabolicSar::default_params().compute(&[]).is_empty());
    }

    #[test]
    fn psar_single_bar_is_low() {
        let bars = make_hlc_bars(&[(105.0, 95.0, 102.0)]);
        let result = ParabolicSar::default_params().compute(&bars);
        assert_eq!(result, vec![95.0]);
    }

    #[test]
    fn psar_known_values() {
        // seed: sar 9, ep 11, af 0.02
        // bar1: candidate 9 + 0.02*(11-9) = 9.04, low 10 >= 9.04 → sar 9.04
        //       high 12 > 11 → ep 12, af 0.04
        // bar2: candidate 9.04 + 0.04*(12-9.04) = 9.1584
        let bars = make_hlc_bars(&[(11.0, 9.0, 10.0), (12.0, 10.0, 11.0), (13.0, 11.0, 12.0)]);
        let points = ParabolicSar::default_params().compute_points(&bars);
        assert_approx(points[0].sar, 9.0, DEFAULT_EPSILON);
        assert_approx(points[1].sar, 9.04, DEFAULT_EPSILON);
        assert_approx(points[2].sar, 9.1584, DEFAULT_EPSILON);
        assert!(points.iter().all(|p| p.regime == Regime::Rising));
    }

    #[test]
    fn psar_reversal_sets_prior_extreme() {
        // bar1 low 5 breaks below candidate 9.04 → falling, sar = prior ep 11
        let bars = make_hlc_bars(&[(11.0, 9.0, 10.0), (10.0, 5.0, 6.0)]);
        let points = ParabolicSar::default_params().compute_points(&bars);
        assert_eq!(points[1].regime, Regime::Falling);
        assert!(points[1].reversal);
        assert_approx(points[1].sar, 11.0, DEFAULT_EPSILON);
    }

    #[test]
    fn psar_reversal_back_to_rising() {
        let data = [
            (11.0, 9.0, 10.0),
            (10.0, 5.0, 6.0),  // reverse to falling, sar 11, ep 5
            (6.0, 4.0, 4.5),   // candidate 11 + 0.02*(5-11) = 10.88; new low → ep 4, af 0.04
            (20.0, 15.0, 19.0), // high 20 > candidate → rising, sar = ep 4
        ];
        let bars = make_hlc_bars(&data);
        let points = ParabolicSar::default_params().compute_points(&bars);
        assert_eq!(points[2].regime, Regime::Falling);
        assert_approx(points[2].sar, 10.88, DEFAULT_EPSILON);
        assert_eq!(points[3].regime, Regime::Rising);
        assert!(points[3].reversal);
        assert_approx(points[3].sar, 4.0, DEFAULT_EPSILON);
    }

    #[test]
    fn psar_uptrend_below_price() {
        let data: Vec<_> = (0..20)
            .map(|i| {
                let c = 100.0 + i as f64 * 2.0;
                (c + 1.0, c - 1.0, c)
            })
            .collect();
        let bars = make_hlc_bars(&data);
        let points = ParabolicSar::default_params().compute_points(&bars);
        for (i, p) in points.iter().enumerate().skip(1) {
            assert_eq!(p.regime, Regime::Rising, "bar {i}");
            assert!(p.sar < bars[i].low, "SAR {} not below low at bar {i}", p.sar);
        }
    }

    #[test]
    fn psar_downtrend_flips_and_stays_above() {
        let data: Vec<_> = (0..20)
            .map(|i| {
                let c = 200.0 - i as f64 * 3.0;
                (c + 1.0, c - 2.0, c - 1.5)
            })
            .collect();
        let bars = make_hlc_bars(&data);
        let points = ParabolicSar::default_params().compute_points(&bars);
        let last = points.last().unwrap();
        assert_eq!(last.regime, Regime::Falling);
        assert!(last.sar > bars.last().unwrap().high);
    }

    #[test]
    fn psar_af_caps_at_max() {
        // With af_max = 0.04 the stop closes the gap to EP by at most 4% per bar.
        let data: Vec<_> = (0..30)
            .map(|i| {
                let c = 100.0 + i as f64;
                (c + 1.0, c - 0.5, c + 0.8)
            })
            .collect();
        let bars = make_hlc_bars(&data);
        let psar = ParabolicSar::new(0.02, 0.04);
        let points = psar.compute_points(&bars);
        for i in 2..points.len() {
            let prev = points[i - 1].sar;
            let ep_prev = bars[i - 1].high;
            let af = (points[i].sar - prev) / (ep_prev - prev);
            assert!(af <= 0.04 + 1e-12, "af {af} exceeded cap at bar {i}");
        }
    }

    #[test]
    fn psar_lookback_and_name() {
        let psar = ParabolicSar::default_params();
        assert_eq!(psar.lookback(), 0);
        assert_eq!(psar.name(), "sar");
    }
}

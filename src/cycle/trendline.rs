//! Instantaneous Trendline
//!
//! Averages the raw price over the current dominant-cycle window and feeds
//! the average through a 4-tap FIR, producing a trendline that adapts its
//! effective length to the measured cycle.

use crate::common::{check_lookback, zeros};
use crate::cycle::engine::{CycleEngine, DEEP_LOOKBACK, DEEP_WARMUP};
use crate::error::Result;

/// The three lagged trendline taps behind the 4/3/2/1-weighted FIR.
#[derive(Default)]
pub(crate) struct TrendTaps {
    trend1: f64,
    trend2: f64,
    trend3: f64,
}

impl TrendTaps {
    /// Apply the FIR to this step's window average and shift the taps.
    pub(crate) fn filter(&mut self, average: f64) -> f64 {
        let line = (4.0 * average + 3.0 * self.trend1 + 2.0 * self.trend2 + self.trend3) / 10.0;
        self.trend3 = self.trend2;
        self.trend2 = self.trend1;
        self.trend1 = average;
        line
    }
}

/// Mean of the `window` raw samples ending at `end`, accumulated walking
/// backward and clamped so the walk never reads before index 0. A zero
/// window yields 0.0.
pub(crate) fn window_average(values: &[f64], end: usize, window: usize) -> f64 {
    if window == 0 {
        return 0.0;
    }
    let mut sum = 0.0;
    let mut idx = end;
    for _ in 0..window {
        sum += values[idx];
        if idx == 0 {
            break;
        }
        idx -= 1;
    }
    sum / window as f64
}

/// Instantaneous Trendline
///
/// Cycle-adaptive trendline of the price series. The first 63 output
/// positions are the 0.0 warm-up sentinel.
///
/// # Arguments
/// * `values` - Price series (typically close or HL2)
///
/// # Errors
/// `InvalidInput` if fewer than 63 samples are supplied.
pub fn instantaneous_trendline(values: &[f64]) -> Result<Vec<f64>> {
    check_lookback("instantaneous_trendline", values.len(), DEEP_LOOKBACK)?;
    let mut out = zeros("instantaneous_trendline", values.len())?;

    let mut engine = CycleEngine::new(values, DEEP_WARMUP);
    let mut taps = TrendTaps::default();

    while let Some(step) = engine.step() {
        let window = (engine.cycle.smooth_period + 0.5) as usize;
        let average = window_average(values, step.index, window);
        let line = taps.filter(average);
        if step.index >= DEEP_LOOKBACK {
            out[step.index] = line;
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IndicatorError;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    #[test]
    fn test_window_average() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(window_average(&values, 4, 3), 4.0);
        assert_eq!(window_average(&values, 4, 5), 3.0);
        // Clamped at index 0: only two samples available.
        assert_eq!(window_average(&values, 1, 5), 3.0 / 5.0);
        assert_eq!(window_average(&values, 4, 0), 0.0);
    }

    #[test]
    fn test_trend_taps_fir() {
        let mut taps = TrendTaps::default();
        assert!(approx_eq(taps.filter(10.0), 4.0, 1e-12));
        assert!(approx_eq(taps.filter(10.0), 7.0, 1e-12));
        assert!(approx_eq(taps.filter(10.0), 9.0, 1e-12));
        assert!(approx_eq(taps.filter(10.0), 10.0, 1e-12));
        // Steady state: the FIR passes a constant through unchanged.
        assert!(approx_eq(taps.filter(10.0), 10.0, 1e-12));
    }

    #[test]
    fn test_trendline_tracks_level() {
        let values: Vec<f64> = (0..250)
            .map(|x| 100.0 + (x as f64 * 0.45).sin() * 2.0)
            .collect();
        let result = instantaneous_trendline(&values).unwrap();
        for i in 0..63 {
            assert_eq!(result[i], 0.0);
        }
        // The trendline smooths an oscillation around 100 back to its level.
        for i in 100..250 {
            assert!(
                result[i] > 95.0 && result[i] < 105.0,
                "index {}: {}",
                i,
                result[i]
            );
        }
    }

    #[test]
    fn test_trendline_rejects_short_input() {
        let values = vec![1.0; 62];
        let err = instantaneous_trendline(&values).unwrap_err();
        assert!(matches!(err, IndicatorError::InvalidInput { .. }));
    }
}

//! Dominant Cycle Period

use crate::common::{check_lookback, zeros};
use crate::cycle::engine::{CycleEngine, CYCLE_LOOKBACK, CYCLE_WARMUP};
use crate::error::Result;

/// Dominant Cycle Period
///
/// The smoothed dominant-cycle period of the price series, in bars,
/// estimated by the homodyne discriminator and held inside the 6..50 band
/// by the stabilizer. The first 32 output positions are the 0.0 warm-up
/// sentinel.
///
/// # Arguments
/// * `values` - Price series (typically close or HL2)
///
/// # Returns
/// Vector of the same length as the input.
///
/// # Errors
/// `InvalidInput` if fewer than 32 samples are supplied.
pub fn dominant_cycle_period(values: &[f64]) -> Result<Vec<f64>> {
    check_lookback("dominant_cycle_period", values.len(), CYCLE_LOOKBACK)?;
    let mut out = zeros("dominant_cycle_period", values.len())?;

    let mut engine = CycleEngine::new(values, CYCLE_WARMUP);
    while let Some(step) = engine.step() {
        if step.index >= CYCLE_LOOKBACK {
            out[step.index] = engine.cycle.smooth_period;
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IndicatorError;

    #[test]
    fn test_period_lookback_sentinel() {
        let values: Vec<f64> = (0..100).map(|x| 50.0 + (x as f64 * 0.3).sin() * 10.0).collect();
        let result = dominant_cycle_period(&values).unwrap();
        assert_eq!(result.len(), 100);
        for i in 0..32 {
            assert_eq!(result[i], 0.0);
        }
        for i in 32..100 {
            assert!(result[i] > 0.0 && result[i] <= 50.0, "index {}: {}", i, result[i]);
        }
    }

    #[test]
    fn test_period_settles_into_band() {
        let values: Vec<f64> = (0..300).map(|x| 100.0 + (x as f64 * 0.35).sin() * 8.0).collect();
        let result = dominant_cycle_period(&values).unwrap();
        for i in 100..300 {
            assert!(
                result[i] >= 5.9 && result[i] <= 50.0,
                "index {}: {}",
                i,
                result[i]
            );
        }
    }

    #[test]
    fn test_period_exact_length_input() {
        // 32 samples is accepted; the whole output stays at the sentinel
        // because the first valid index equals the input length.
        let values = vec![10.0; 32];
        let result = dominant_cycle_period(&values).unwrap();
        assert!(result.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_period_rejects_short_input() {
        let values = vec![10.0; 31];
        let err = dominant_cycle_period(&values).unwrap_err();
        assert_eq!(
            err,
            IndicatorError::InvalidInput {
                indicator: "dominant_cycle_period",
                required: 32,
                actual: 31,
            }
        );
    }
}

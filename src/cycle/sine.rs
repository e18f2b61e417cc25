//! Sine Wave
//!
//! Sine of the dominant cycle phase plus a 45-degree leading copy. The
//! crossings of the two lines anticipate cycle turns; in a trend the pair
//! goes flat and stops crossing.

use crate::common::{check_lookback, zeros, DEG_TO_RAD};
use crate::cycle::engine::{CycleEngine, DEEP_LOOKBACK, DEEP_WARMUP};
use crate::cycle::phase::{PhaseState, SmoothedPriceRing};
use crate::error::Result;

/// Paired sine-wave output.
#[derive(Debug, Clone, PartialEq)]
pub struct SineWaveOutput {
    /// sin(dominant cycle phase)
    pub sine: Vec<f64>,
    /// sin(dominant cycle phase + 45 degrees)
    pub lead_sine: Vec<f64>,
}

/// Sine Wave
///
/// Emits `sin(phase)` and `sin(phase + 45°)` of the dominant cycle. The
/// first 63 positions of both sequences are the 0.0 warm-up sentinel.
///
/// # Arguments
/// * `values` - Price series (typically close or HL2)
///
/// # Errors
/// `InvalidInput` if fewer than 63 samples are supplied.
pub fn sine_wave(values: &[f64]) -> Result<SineWaveOutput> {
    check_lookback("sine_wave", values.len(), DEEP_LOOKBACK)?;
    let mut sine = zeros("sine_wave", values.len())?;
    let mut lead_sine = zeros("sine_wave", values.len())?;

    let mut engine = CycleEngine::new(values, DEEP_WARMUP);
    let mut ring = SmoothedPriceRing::default();
    let mut phase = PhaseState::default();

    while let Some(step) = engine.step() {
        ring.store(step.smoothed);
        let dc_phase = phase.update(&ring, engine.cycle.smooth_period);
        if step.index >= DEEP_LOOKBACK {
            sine[step.index] = (dc_phase * DEG_TO_RAD).sin();
            lead_sine[step.index] = ((dc_phase + 45.0) * DEG_TO_RAD).sin();
        }
        ring.rotate();
    }

    Ok(SineWaveOutput { sine, lead_sine })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IndicatorError;

    #[test]
    fn test_sine_wave_lookback_and_range() {
        let values: Vec<f64> = (0..200)
            .map(|x| 50.0 + (x as f64 * 2.0 * std::f64::consts::PI / 20.0).sin() * 5.0)
            .collect();
        let result = sine_wave(&values).unwrap();
        assert_eq!(result.sine.len(), 200);
        assert_eq!(result.lead_sine.len(), 200);
        for i in 0..63 {
            assert_eq!(result.sine[i], 0.0);
            assert_eq!(result.lead_sine[i], 0.0);
        }
        for i in 63..200 {
            assert!(result.sine[i] >= -1.0 && result.sine[i] <= 1.0);
            assert!(result.lead_sine[i] >= -1.0 && result.lead_sine[i] <= 1.0);
        }
    }

    #[test]
    fn test_lead_sine_is_shifted_copy() {
        // Both lines come from the same phase angle, so
        // lead = sin(phase + 45°) must equal sine*cos45 + cos(phase)*sin45,
        // which bounds |lead - sine*cos45| by |sin45|.
        let values: Vec<f64> = (0..150)
            .map(|x| 20.0 + (x as f64 * 0.5).sin() * 2.0 + (x as f64 * 0.1).cos())
            .collect();
        let result = sine_wave(&values).unwrap();
        let cos45 = (45.0_f64 * DEG_TO_RAD).cos();
        let sin45 = (45.0_f64 * DEG_TO_RAD).sin();
        for i in 63..150 {
            let residual = result.lead_sine[i] - result.sine[i] * cos45;
            assert!(
                residual.abs() <= sin45 + 1e-12,
                "index {}: residual {}",
                i,
                residual
            );
        }
    }

    #[test]
    fn test_sine_wave_rejects_short_input() {
        let values = vec![1.0; 62];
        let err = sine_wave(&values).unwrap_err();
        assert_eq!(
            err,
            IndicatorError::InvalidInput {
                indicator: "sine_wave",
                required: 63,
                actual: 62,
            }
        );
    }
}

//! Phasor Components
//!
//! Exposes the Hilbert filter's in-phase and quadrature components as two
//! parallel sequences, with no discriminator post-processing. Useful for
//! plotting the rotating phasor directly or for building custom cycle
//! measures on top of the raw components.

use crate::common::{check_lookback, zeros};
use crate::cycle::engine::{CycleEngine, CYCLE_LOOKBACK, CYCLE_WARMUP};
use crate::error::Result;

/// Paired phasor output.
#[derive(Debug, Clone, PartialEq)]
pub struct PhasorOutput {
    /// In-phase component (detrender delayed three parity steps).
    pub in_phase: Vec<f64>,
    /// Quadrature component.
    pub quadrature: Vec<f64>,
}

/// Phasor Components
///
/// The first 32 positions of both sequences are the 0.0 warm-up sentinel.
///
/// # Arguments
/// * `values` - Price series (typically close or HL2)
///
/// # Errors
/// `InvalidInput` if fewer than 32 samples are supplied.
pub fn phasor(values: &[f64]) -> Result<PhasorOutput> {
    check_lookback("phasor", values.len(), CYCLE_LOOKBACK)?;
    let mut in_phase = zeros("phasor", values.len())?;
    let mut quadrature = zeros("phasor", values.len())?;

    let mut engine = CycleEngine::new(values, CYCLE_WARMUP);
    while let Some(step) = engine.step() {
        if step.index >= CYCLE_LOOKBACK {
            in_phase[step.index] = step.taps.i1;
            quadrature[step.index] = step.taps.q1;
        }
    }

    Ok(PhasorOutput {
        in_phase,
        quadrature,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IndicatorError;

    #[test]
    fn test_phasor_lookback_sentinel() {
        let values: Vec<f64> = (0..90).map(|x| 25.0 + (x as f64 * 0.5).sin() * 2.0).collect();
        let result = phasor(&values).unwrap();
        assert_eq!(result.in_phase.len(), 90);
        assert_eq!(result.quadrature.len(), 90);
        for i in 0..32 {
            assert_eq!(result.in_phase[i], 0.0);
            assert_eq!(result.quadrature[i], 0.0);
        }
        for i in 32..90 {
            assert!(result.in_phase[i].is_finite());
            assert!(result.quadrature[i].is_finite());
        }
    }

    #[test]
    fn test_phasor_components_oscillate_around_zero() {
        // Both components are band-passed, so a stationary cycle produces
        // sign changes in each of them.
        let values: Vec<f64> = (0..300)
            .map(|x| 70.0 + (x as f64 * 2.0 * std::f64::consts::PI / 18.0).sin() * 5.0)
            .collect();
        let result = phasor(&values).unwrap();
        let tail_i = &result.in_phase[100..];
        let tail_q = &result.quadrature[100..];
        assert!(tail_i.iter().any(|&x| x > 0.0) && tail_i.iter().any(|&x| x < 0.0));
        assert!(tail_q.iter().any(|&x| x > 0.0) && tail_q.iter().any(|&x| x < 0.0));
    }

    #[test]
    fn test_phasor_rejects_short_input() {
        let values = vec![1.0; 5];
        let err = phasor(&values).unwrap_err();
        assert!(matches!(err, IndicatorError::InvalidInput { .. }));
    }
}

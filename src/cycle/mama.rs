//! MESA Adaptive Moving Average (MAMA/FAMA)
//!
//! A coupled pair of exponential averages whose smoothing constant is
//! re-derived every bar from the rate of change of the instantaneous phase:
//! fast when the phase whips around, slow when it drifts.

use crate::common::{check_lookback, zeros, RAD_TO_DEG};
use crate::cycle::engine::{CycleEngine, CYCLE_LOOKBACK, CYCLE_WARMUP};
use crate::error::Result;

/// Paired adaptive-average output.
#[derive(Debug, Clone, PartialEq)]
pub struct MamaOutput {
    /// The adaptive average itself.
    pub mama: Vec<f64>,
    /// The following average (half the smoothing constant).
    pub fama: Vec<f64>,
}

/// MESA Adaptive Moving Average
///
/// Per bar, the instantaneous phase is `atan(q1 / i1)` in degrees (zero
/// when the in-phase component is zero). The backward phase difference,
/// floored at 1, divides `fast_limit` to produce the smoothing constant,
/// floored at `slow_limit`:
///
/// mama = alpha * price + (1 - alpha) * mama
/// fama = 0.5 * alpha * mama + (1 - 0.5 * alpha) * fama
///
/// The limits are used as supplied; callers are expected to keep
/// `0 < slow_limit <= fast_limit <= 1`. The first 32 positions of both
/// sequences are the 0.0 warm-up sentinel.
///
/// # Arguments
/// * `values` - Price series (typically close or HL2)
/// * `fast_limit` - Upper bound on the smoothing constant (commonly 0.5)
/// * `slow_limit` - Lower bound on the smoothing constant (commonly 0.05)
///
/// # Errors
/// `InvalidInput` if fewer than 32 samples are supplied.
pub fn mama(values: &[f64], fast_limit: f64, slow_limit: f64) -> Result<MamaOutput> {
    check_lookback("mama", values.len(), CYCLE_LOOKBACK)?;
    let mut mama_out = zeros("mama", values.len())?;
    let mut fama_out = zeros("mama", values.len())?;

    let mut engine = CycleEngine::new(values, CYCLE_WARMUP);
    let mut prev_phase = 0.0;
    let mut mama = 0.0;
    let mut fama = 0.0;

    while let Some(step) = engine.step() {
        let phase = if step.taps.i1 != 0.0 {
            (step.taps.q1 / step.taps.i1).atan() * RAD_TO_DEG
        } else {
            0.0
        };
        let mut delta = prev_phase - phase;
        prev_phase = phase;
        if delta < 1.0 {
            delta = 1.0;
        }
        let alpha = if delta > 1.0 {
            let ratio = fast_limit / delta;
            if ratio < slow_limit {
                slow_limit
            } else {
                ratio
            }
        } else {
            fast_limit
        };

        mama = alpha * step.price + (1.0 - alpha) * mama;
        let half = 0.5 * alpha;
        fama = half * mama + (1.0 - half) * fama;

        if step.index >= CYCLE_LOOKBACK {
            mama_out[step.index] = mama;
            fama_out[step.index] = fama;
        }
    }

    Ok(MamaOutput {
        mama: mama_out,
        fama: fama_out,
    })
}

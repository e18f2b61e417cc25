//! Dominant Cycle Phase
//!
//! Correlates the smoothed price against one synthetic reference cycle to
//! extract the phase angle of the dominant cycle, in degrees. Shared by the
//! sine-wave and trend-mode indicators, which add their own tails on top.

use crate::common::{check_lookback, zeros, RAD_TO_DEG};
use crate::cycle::engine::{CycleEngine, CYCLE_LOOKBACK, CYCLE_WARMUP};
use crate::error::Result;

/// Capacity of the smoothed-price history ring.
const RING_SIZE: usize = 50;

const TWO_PI: f64 = 2.0 * std::f64::consts::PI;

/// Fixed-capacity circular buffer of smoothed prices.
///
/// Stores at the current slot without advancing; `rotate()` moves the slot
/// at the end of each step, so within a step the walk starts from today's
/// value and runs backward through history. Slots wrap modulo 50 and start
/// at zero, which keeps correlation windows deterministic before the ring
/// has filled.
pub(crate) struct SmoothedPriceRing {
    buf: [f64; RING_SIZE],
    idx: usize,
}

impl Default for SmoothedPriceRing {
    fn default() -> Self {
        SmoothedPriceRing {
            buf: [0.0; RING_SIZE],
            idx: 0,
        }
    }
}

impl SmoothedPriceRing {
    /// Store this step's smoothed price at the current slot.
    pub(crate) fn store(&mut self, value: f64) {
        self.buf[self.idx] = value;
    }

    /// The value stored for the current step.
    pub(crate) fn latest(&self) -> f64 {
        self.buf[self.idx]
    }

    /// Correlate the last `window` samples against one cycle of a synthetic
    /// sine/cosine pair, walking backward from the current slot. Returns
    /// (real part, imaginary part).
    pub(crate) fn correlate(&self, window: usize) -> (f64, f64) {
        let mut real_part = 0.0;
        let mut imag_part = 0.0;
        let mut idx = self.idx;
        for k in 0..window {
            let theta = k as f64 * TWO_PI / window as f64;
            let value = self.buf[idx];
            real_part += theta.sin() * value;
            imag_part += theta.cos() * value;
            idx = if idx == 0 { RING_SIZE - 1 } else { idx - 1 };
        }
        (real_part, imag_part)
    }

    /// Advance to the next slot.
    pub(crate) fn rotate(&mut self) {
        self.idx = (self.idx + 1) % RING_SIZE;
    }
}

/// Running dominant-cycle-phase estimate, in degrees.
///
/// The angle persists across steps: when a correlation window degenerates
/// (zero imaginary part) the previous angle is adjusted rather than
/// recomputed.
#[derive(Default)]
pub(crate) struct PhaseState {
    dc_phase: f64,
}

impl PhaseState {
    pub(crate) fn value(&self) -> f64 {
        self.dc_phase
    }

    /// Derive this step's phase from the ring and the smoothed period.
    ///
    /// The correlation window is `floor(smooth_period + 0.5)` samples. The
    /// raw arctangent is corrected by +90 degrees, by one bar of smoothing
    /// lag (360/smooth_period), by +180 degrees in the lower half-plane,
    /// and wrapped down past 315 degrees. `smooth_period` is never zero
    /// here because the upstream period clamp keeps it positive.
    pub(crate) fn update(&mut self, ring: &SmoothedPriceRing, smooth_period: f64) -> f64 {
        let window = (smooth_period + 0.5) as usize;
        let (real_part, imag_part) = ring.correlate(window);

        if imag_part.abs() > 0.0 {
            self.dc_phase = (real_part / imag_part).atan() * RAD_TO_DEG;
        } else if imag_part.abs() <= 0.01 {
            if real_part < 0.0 {
                self.dc_phase -= 90.0;
            } else if real_part > 0.0 {
                self.dc_phase += 90.0;
            }
        }
        self.dc_phase += 90.0;
        self.dc_phase += 360.0 / smooth_period;
        if imag_part < 0.0 {
            self.dc_phase += 180.0;
        }
        if self.dc_phase > 315.0 {
            self.dc_phase -= 360.0;
        }
        self.dc_phase
    }
}

/// Dominant Cycle Phase
///
/// Phase angle (degrees) of the dominant price cycle, re-estimated every
/// sample. The first 32 output positions are the 0.0 warm-up sentinel.
///
/// # Arguments
/// * `values` - Price series (typically close or HL2)
///
/// # Errors
/// `InvalidInput` if fewer than 32 samples are supplied.
pub fn dominant_cycle_phase(values: &[f64]) -> Result<Vec<f64>> {
    check_lookback("dominant_cycle_phase", values.len(), CYCLE_LOOKBACK)?;
    let mut out = zeros("dominant_cycle_phase", values.len())?;

    let mut engine = CycleEngine::new(values, CYCLE_WARMUP);
    let mut ring = SmoothedPriceRing::default();
    let mut phase = PhaseState::default();

    while let Some(step) = engine.step() {
        ring.store(step.smoothed);
        let dc_phase = phase.update(&ring, engine.cycle.smooth_period);
        if step.index >= CYCLE_LOOKBACK {
            out[step.index] = dc_phase;
        }
        ring.rotate();
    }

    Ok(out)
}

//! Shared recursive filter pipeline for the Hilbert Transform family.
//!
//! Every consumer in this module tree (dominant cycle period/phase, phasor,
//! sine wave, trend mode, trendline, MAMA) drives the same four-stage
//! pipeline, one sample at a time:
//!
//! 1. 4-tap weighted smoothing of the raw price
//! 2. Hilbert approximation filter with separate state per sample parity
//! 3. Homodyne discriminator (raw dominant-cycle period estimate)
//! 4. Period stabilizer (ratio clamp, band clamp, exponential blend)
//!
//! The pipeline is a first-order recurrence (second-order through the parity
//! split), so steps cannot be reordered or parallelized within one call.
//! Each call owns all of its state; nothing persists across calls.

/// Filter coefficients of the Hilbert approximation (Ehlers).
const A: f64 = 0.0962;
const B: f64 = 0.5769;

/// Absolute band the dominant-cycle period is clamped to.
pub(crate) const MIN_PERIOD: f64 = 6.0;
pub(crate) const MAX_PERIOD: f64 = 50.0;

/// Lookback of the period/phase/phasor/MAMA consumers.
pub(crate) const CYCLE_LOOKBACK: usize = 32;
/// Lookback of the sine/trend-mode/trendline consumers (deeper taps).
pub(crate) const DEEP_LOOKBACK: usize = 63;

/// Smoother-only warm-up iterations before the filter starts, per family.
pub(crate) const CYCLE_WARMUP: usize = 9;
pub(crate) const DEEP_WARMUP: usize = 34;

/// Weighted moving sum of the last 4 raw samples (weights 4,3,2,1, /10),
/// maintained with running `sub`/`sum` accumulators and a trailing value so
/// each step costs a handful of additions instead of a window walk.
struct PriceSmoother {
    sub: f64,
    sum: f64,
    trailing: f64,
    trailing_idx: usize,
}

impl PriceSmoother {
    /// Seed the accumulators from the first three samples.
    fn prime(values: &[f64]) -> Self {
        PriceSmoother {
            sub: values[0] + values[1] + values[2],
            sum: values[0] + 2.0 * values[1] + 3.0 * values[2],
            trailing: 0.0,
            trailing_idx: 0,
        }
    }

    /// Fold in the next raw sample and return the smoothed value.
    fn advance(&mut self, values: &[f64], price: f64) -> f64 {
        self.sub += price;
        self.sub -= self.trailing;
        self.sum += price * 4.0;
        self.trailing = values[self.trailing_idx];
        self.trailing_idx += 1;
        let smoothed = self.sum * 0.1;
        self.sum -= self.sub;
        smoothed
    }
}

/// One component of the Hilbert approximation filter: a 3-slot delay line
/// plus the decayed previous-output/previous-input scalar pair.
#[derive(Clone, Copy, Default)]
struct FilterComponent {
    buf: [f64; 3],
    prev: f64,
    prev_input: f64,
}

impl FilterComponent {
    /// Advance the component recurrence: negate the value stored three
    /// parity steps back, add the newly weighted input, swap in the decayed
    /// previous input, then scale by the period-adaptive gain.
    fn advance(&mut self, idx: usize, input: f64, gain: f64) -> f64 {
        let weighted = A * input;
        let mut out = -self.buf[idx];
        self.buf[idx] = weighted;
        out += weighted;
        out -= self.prev;
        self.prev = B * self.prev_input;
        out += self.prev;
        self.prev_input = input;
        out * gain
    }
}

/// Per-parity filter state: the four cascaded components.
#[derive(Clone, Copy, Default)]
struct ParityFilterState {
    detrender: FilterComponent,
    q1: FilterComponent,
    j_i: FilterComponent,
    j_q: FilterComponent,
}

/// Delayed in-phase registers for one parity, fed by the opposite branch.
#[derive(Clone, Copy, Default)]
struct InPhaseDelay {
    prev2: f64,
    prev3: f64,
}

/// The filter's per-step outputs consumed downstream.
#[derive(Clone, Copy)]
pub(crate) struct FilterTaps {
    /// In-phase component (the detrender delayed three parity steps).
    pub(crate) i1: f64,
    /// Quadrature component.
    pub(crate) q1: f64,
    /// In-phase advanced 90 degrees.
    pub(crate) j_i: f64,
    /// Quadrature advanced 90 degrees.
    pub(crate) j_q: f64,
}

/// Hilbert approximation filter with separate even/odd state.
///
/// The two parities never share a delay line: each maintains its own 3-slot
/// buffers, producing a period-2 interleaved recurrence. The shared slot
/// index advances only on even samples; the odd branch reuses it. That
/// asymmetry comes from the original Ehlers formulation (the two chains
/// interleave at half the sample rate) and is reproduced as-is.
#[derive(Default)]
struct HilbertFilter {
    parity: [ParityFilterState; 2],
    i1_delay: [InPhaseDelay; 2],
    idx: usize,
}

impl HilbertFilter {
    fn step(&mut self, sample_index: usize, smoothed: f64, gain: f64) -> FilterTaps {
        let parity = sample_index % 2;
        let idx = self.idx;
        let i1 = self.i1_delay[parity].prev3;
        let state = &mut self.parity[parity];
        let detrender = state.detrender.advance(idx, smoothed, gain);
        let q1 = state.q1.advance(idx, detrender, gain);
        let j_i = state.j_i.advance(idx, i1, gain);
        let j_q = state.j_q.advance(idx, q1, gain);
        if parity == 0 {
            self.idx = (idx + 1) % 3;
        }
        let other = parity ^ 1;
        self.i1_delay[other].prev3 = self.i1_delay[other].prev2;
        self.i1_delay[other].prev2 = detrender;
        FilterTaps { i1, q1, j_i, j_q }
    }
}

/// Homodyne discriminator and period stabilizer.
///
/// Identical across every consumer; this is the shared cycle heartbeat.
#[derive(Default)]
pub(crate) struct CycleState {
    /// Stabilized dominant-cycle period.
    pub(crate) period: f64,
    /// 0.33/0.67 exponential blend of the stabilized period.
    pub(crate) smooth_period: f64,
    re: f64,
    im: f64,
    prev_i2: f64,
    prev_q2: f64,
}

impl CycleState {
    /// Fold one step of filter taps into the period estimate.
    pub(crate) fn update(&mut self, taps: &FilterTaps) {
        let q2 = 0.2 * (taps.q1 + taps.j_i) + 0.8 * self.prev_q2;
        let i2 = 0.2 * (taps.i1 - taps.j_q) + 0.8 * self.prev_i2;

        self.re = 0.2 * (i2 * self.prev_i2 + q2 * self.prev_q2) + 0.8 * self.re;
        self.im = 0.2 * (i2 * self.prev_q2 - q2 * self.prev_i2) + 0.8 * self.im;
        self.prev_q2 = q2;
        self.prev_i2 = i2;

        // Raw period from the discriminator angle; retained when either
        // accumulator is zero.
        let prev = self.period;
        if self.im != 0.0 && self.re != 0.0 {
            self.period = 360.0 / ((self.im / self.re).atan() * crate::common::RAD_TO_DEG);
        }
        let upper = 1.5 * prev;
        if self.period > upper {
            self.period = upper;
        }
        let lower = 0.67 * prev;
        if self.period < lower {
            self.period = lower;
        }
        if self.period < MIN_PERIOD {
            self.period = MIN_PERIOD;
        } else if self.period > MAX_PERIOD {
            self.period = MAX_PERIOD;
        }
        self.period = 0.2 * self.period + 0.8 * prev;
        self.smooth_period = 0.33 * self.period + 0.67 * self.smooth_period;
    }
}

/// Everything a consumer needs from one engine step.
pub(crate) struct EngineStep {
    /// Index of the sample just consumed.
    pub(crate) index: usize,
    /// The raw sample.
    pub(crate) price: f64,
    /// The 4-tap smoothed sample.
    pub(crate) smoothed: f64,
    /// Filter outputs for this step.
    pub(crate) taps: FilterTaps,
}

/// The shared pipeline driver.
///
/// Construction primes the smoother on the first three samples and runs the
/// smoother-only warm-up; afterwards `step()` consumes one sample at a time,
/// advancing the filter and the period estimate together. Consumers read
/// `cycle` for the current period/smooth-period and add their own tail.
pub(crate) struct CycleEngine<'a> {
    values: &'a [f64],
    today: usize,
    smoother: PriceSmoother,
    filter: HilbertFilter,
    pub(crate) cycle: CycleState,
}

impl<'a> CycleEngine<'a> {
    /// Callers must have validated `values.len()` against the consumer's
    /// lookback; the warm-up consumes `3 + warmup` samples.
    pub(crate) fn new(values: &'a [f64], warmup: usize) -> Self {
        let mut smoother = PriceSmoother::prime(values);
        let mut today = 3;
        for _ in 0..warmup {
            smoother.advance(values, values[today]);
            today += 1;
        }
        CycleEngine {
            values,
            today,
            smoother,
            filter: HilbertFilter::default(),
            cycle: CycleState::default(),
        }
    }

    /// Advance the pipeline by one sample, or `None` once the input is
    /// exhausted.
    pub(crate) fn step(&mut self) -> Option<EngineStep> {
        if self.today >= self.values.len() {
            return None;
        }
        let index = self.today;
        // Gain adapts to the period estimated on the previous step.
        let gain = 0.075 * self.cycle.period + 0.54;
        let price = self.values[index];
        let smoothed = self.smoother.advance(self.values, price);
        let taps = self.filter.step(index, smoothed, gain);
        self.cycle.update(&taps);
        self.today += 1;
        Some(EngineStep {
            index,
            price,
            smoothed,
            taps,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    #[test]
    fn test_smoother_matches_direct_weighted_sum() {
        let values: Vec<f64> = (1..=30).map(|x| (x as f64 * 0.37).sin() * 20.0 + 100.0).collect();
        let mut smoother = PriceSmoother::prime(&values);
        for t in 3..values.len() {
            let smoothed = smoother.advance(&values, values[t]);
            let direct =
                (4.0 * values[t] + 3.0 * values[t - 1] + 2.0 * values[t - 2] + values[t - 3])
                    / 10.0;
            assert!(
                approx_eq(smoothed, direct, 1e-9),
                "index {}: {} vs {}",
                t,
                smoothed,
                direct
            );
        }
    }

    #[test]
    fn test_filter_component_recurrence() {
        // In steady state the component equals
        // a*u[t] + b*u[t-1] - b*u[t-2] - a*u[t-3] (parity-step time).
        let inputs: Vec<f64> = (0..20).map(|x| (x as f64 * 0.9).cos() * 5.0).collect();
        let mut component = FilterComponent::default();
        let mut idx = 0;
        for (t, &u) in inputs.iter().enumerate() {
            let out = component.advance(idx, u, 1.0);
            idx = (idx + 1) % 3;
            if t >= 3 {
                let direct = A * u + B * inputs[t - 1] - B * inputs[t - 2] - A * inputs[t - 3];
                assert!(
                    approx_eq(out, direct, 1e-12),
                    "step {}: {} vs {}",
                    t,
                    out,
                    direct
                );
            }
        }
    }

    #[test]
    fn test_cycle_state_first_update_from_rest() {
        // All-zero taps leave the discriminator silent: the raw period is
        // retained at 0, band-clamped to 6, then blended 0.2/0.8 with 0.
        let mut cycle = CycleState::default();
        let taps = FilterTaps {
            i1: 0.0,
            q1: 0.0,
            j_i: 0.0,
            j_q: 0.0,
        };
        cycle.update(&taps);
        assert!(approx_eq(cycle.period, 1.2, 1e-12));
        assert!(approx_eq(cycle.smooth_period, 0.33 * 1.2, 1e-12));
    }

    #[test]
    fn test_cycle_state_stays_in_band() {
        let mut cycle = CycleState::default();
        let mut x = 0.7;
        for i in 0..500 {
            // Pseudo-random but deterministic tap excitation.
            x = (x * 997.0 + i as f64 * 0.61).sin();
            let taps = FilterTaps {
                i1: x * 0.8,
                q1: -x * 1.3,
                j_i: x * 0.2,
                j_q: x * 0.4,
            };
            cycle.update(&taps);
            assert!(cycle.period > 0.0 && cycle.period <= MAX_PERIOD);
            assert!(cycle.smooth_period > 0.0 && cycle.smooth_period <= MAX_PERIOD);
        }
        // After the blends converge the period settles inside the band.
        assert!(cycle.period >= MIN_PERIOD * 0.99);
    }

    #[test]
    fn test_engine_consumes_every_sample_once() {
        let values: Vec<f64> = (0..80).map(|x| 50.0 + (x as f64 * 0.25).sin() * 4.0).collect();
        let mut engine = CycleEngine::new(&values, CYCLE_WARMUP);
        let mut expected = 3 + CYCLE_WARMUP;
        while let Some(step) = engine.step() {
            assert_eq!(step.index, expected);
            assert!(step.smoothed.is_finite());
            assert!(step.taps.q1.is_finite());
            expected += 1;
        }
        assert_eq!(expected, values.len());
    }
}

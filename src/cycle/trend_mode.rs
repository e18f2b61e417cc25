//! Trend Mode
//!
//! Binary classifier: 1.0 when the market is trending, 0.0 when it is
//! cycling. Combines the sine-wave crossings, the time spent since the last
//! crossing, the phase advance rate, and the deviation of price from the
//! adaptive trendline, in that order; the deviation rule wins.

use crate::common::{check_lookback, zeros, DEG_TO_RAD};
use crate::cycle::engine::{CycleEngine, DEEP_LOOKBACK, DEEP_WARMUP};
use crate::cycle::phase::{PhaseState, SmoothedPriceRing};
use crate::cycle::trendline::{window_average, TrendTaps};
use crate::error::Result;

/// Trend Mode
///
/// Classifies every sample as trending (1.0) or cycling (0.0). The first 63
/// output positions are the 0.0 warm-up sentinel.
///
/// The per-step decision starts from "trending" and applies four rules in
/// fixed order:
/// 1. a sine/lead-sine crossover resets the trend-age counter and forces
///    cycle mode;
/// 2. fewer than half a cycle since the last crossover forces cycle mode;
/// 3. a phase advance between 0.67 and 1.5 cycle-widths per bar forces
///    cycle mode;
/// 4. price at least 1.5% away from the trendline forces trend mode,
///    overriding the first three rules.
///
/// # Arguments
/// * `values` - Price series (typically close or HL2)
///
/// # Errors
/// `InvalidInput` if fewer than 63 samples are supplied.
pub fn trend_mode(values: &[f64]) -> Result<Vec<f64>> {
    check_lookback("trend_mode", values.len(), DEEP_LOOKBACK)?;
    let mut out = zeros("trend_mode", values.len())?;

    let mut engine = CycleEngine::new(values, DEEP_WARMUP);
    let mut ring = SmoothedPriceRing::default();
    let mut phase = PhaseState::default();
    let mut taps = TrendTaps::default();

    let mut sine = 0.0;
    let mut lead_sine = 0.0;
    let mut days_in_trend = 0u32;

    while let Some(step) = engine.step() {
        ring.store(step.smoothed);
        let smooth_period = engine.cycle.smooth_period;

        let prev_dc_phase = phase.value();
        let dc_phase = phase.update(&ring, smooth_period);

        let prev_sine = sine;
        let prev_lead_sine = lead_sine;
        sine = (dc_phase * DEG_TO_RAD).sin();
        lead_sine = ((dc_phase + 45.0) * DEG_TO_RAD).sin();

        let window = (smooth_period + 0.5) as usize;
        let average = window_average(values, step.index, window);
        let line = taps.filter(average);

        let mut trending = 1.0;

        if (sine > lead_sine && prev_sine <= prev_lead_sine)
            || (sine < lead_sine && prev_sine >= prev_lead_sine)
        {
            days_in_trend = 0;
            trending = 0.0;
        }
        days_in_trend += 1;
        if f64::from(days_in_trend) < 0.5 * smooth_period {
            trending = 0.0;
        }

        let delta_phase = dc_phase - prev_dc_phase;
        if smooth_period != 0.0
            && delta_phase > 0.67 * 360.0 / smooth_period
            && delta_phase < 1.5 * 360.0 / smooth_period
        {
            trending = 0.0;
        }

        let smoothed = ring.latest();
        if line != 0.0 && ((smoothed - line) / line).abs() >= 0.015 {
            trending = 1.0;
        }

        if step.index >= DEEP_LOOKBACK {
            out[step.index] = trending;
        }
        ring.rotate();
    }

    Ok(out)
}

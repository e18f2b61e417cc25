//! Cycle-adaptive signal decomposition (Hilbert Transform family)
//!
//! Seven indicators built on one shared recursive filter pipeline:
//! - `dominant_cycle_period`: dominant cycle length, in bars
//! - `dominant_cycle_phase`: phase angle of the dominant cycle, in degrees
//! - `phasor`: raw in-phase/quadrature components
//! - `sine_wave`: sine of the cycle phase plus a 45-degree lead
//! - `trend_mode`: trending (1.0) vs cycling (0.0) classifier
//! - `instantaneous_trendline`: cycle-adaptive trendline
//! - `mama`: self-tuning moving average pair (MAMA/FAMA)
//!
//! The period/phase/phasor/MAMA group becomes valid at index 32; the
//! sine/trend-mode/trendline group needs deeper taps and becomes valid at
//! index 63. Earlier positions hold the 0.0 sentinel.

pub(crate) mod engine;
mod mama;
mod period;
mod phase;
mod phasor;
mod sine;
mod trend_mode;
mod trendline;

pub use mama::{mama, MamaOutput};
pub use period::dominant_cycle_period;
pub use phase::dominant_cycle_phase;
pub use phasor::{phasor, PhasorOutput};
pub use sine::{sine_wave, SineWaveOutput};
pub use trend_mode::trend_mode;
pub use trendline::instantaneous_trendline;

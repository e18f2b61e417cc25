//! # Cycle Indicators
//!
//! Cycle-adaptive signal decomposition for financial time series.
//!
//! ## Features
//! - Hilbert Transform indicator family sharing one recursive filter pipeline
//! - Dominant cycle period/phase, phasor, sine wave, trend mode, trendline,
//!   and the self-tuning MAMA/FAMA average pair
//! - Typed errors; zero-filled warm-up sentinel matching reference vectors
//! - Compiles to native and WASM
//!
//! ## Example
//! ```
//! use cycle_indicators::{dominant_cycle_period, mama};
//!
//! let prices: Vec<f64> = (0..80)
//!     .map(|x| 50.0 + (x as f64 * 0.3).sin() * 5.0)
//!     .collect();
//!
//! let period = dominant_cycle_period(&prices).unwrap();
//! assert_eq!(period.len(), prices.len());
//! assert_eq!(period[0], 0.0); // warm-up sentinel
//! assert!(period[32] > 0.0);
//!
//! let adaptive = mama(&prices, 0.5, 0.05).unwrap();
//! assert_eq!(adaptive.mama.len(), prices.len());
//! ```

mod common;

pub mod cycle;
pub mod error;
pub mod table;

// Re-export the indicator surface at crate root
pub use cycle::{
    dominant_cycle_period, dominant_cycle_phase, instantaneous_trendline, mama, phasor,
    sine_wave, trend_mode, MamaOutput, PhasorOutput, SineWaveOutput,
};
pub use error::IndicatorError;
pub use table::PriceTable;

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

/// WASM bindings for browser/Node.js use
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub struct Indicators;

#[cfg(feature = "wasm")]
#[wasm_bindgen]
impl Indicators {
    #[wasm_bindgen]
    pub fn dominant_cycle_period(values: &[f64]) -> Result<Vec<f64>, JsValue> {
        cycle::dominant_cycle_period(values).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen]
    pub fn dominant_cycle_phase(values: &[f64]) -> Result<Vec<f64>, JsValue> {
        cycle::dominant_cycle_phase(values).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen]
    pub fn sine_wave(values: &[f64]) -> Result<Vec<f64>, JsValue> {
        cycle::sine_wave(values)
            .map(|out| out.sine)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen]
    pub fn lead_sine_wave(values: &[f64]) -> Result<Vec<f64>, JsValue> {
        cycle::sine_wave(values)
            .map(|out| out.lead_sine)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen]
    pub fn trend_mode(values: &[f64]) -> Result<Vec<f64>, JsValue> {
        cycle::trend_mode(values).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen]
    pub fn instantaneous_trendline(values: &[f64]) -> Result<Vec<f64>, JsValue> {
        cycle::instantaneous_trendline(values).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen]
    pub fn mama_line(values: &[f64], fast_limit: f64, slow_limit: f64) -> Result<Vec<f64>, JsValue> {
        cycle::mama(values, fast_limit, slow_limit)
            .map(|out| out.mama)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen]
    pub fn fama_line(values: &[f64], fast_limit: f64, slow_limit: f64) -> Result<Vec<f64>, JsValue> {
        cycle::mama(values, fast_limit, slow_limit)
            .map(|out| out.fama)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen]
    pub fn phasor_in_phase(values: &[f64]) -> Result<Vec<f64>, JsValue> {
        cycle::phasor(values)
            .map(|out| out.in_phase)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen]
    pub fn phasor_quadrature(values: &[f64]) -> Result<Vec<f64>, JsValue> {
        cycle::phasor(values)
            .map(|out| out.quadrature)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

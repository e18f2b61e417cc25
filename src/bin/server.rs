//! Cycle indicator server - serves the Hilbert Transform family over HTTP
//!
//! Run: cargo run --release --bin server
//! Test: curl -X POST http://localhost:3030/dominant_cycle_period -H "Content-Type: application/json" -d '{"values":[...at least 32 samples...]}'

use axum::http::StatusCode;
use axum::{routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

#[derive(Deserialize)]
struct SeriesRequest {
    values: Vec<f64>,
}

#[derive(Deserialize)]
struct MamaRequest {
    values: Vec<f64>,
    fast_limit: f64,
    slow_limit: f64,
}

#[derive(Serialize)]
struct SeriesResponse {
    result: Vec<f64>,
}

#[derive(Serialize)]
struct SineResponse {
    sine: Vec<f64>,
    lead_sine: Vec<f64>,
}

#[derive(Serialize)]
struct MamaResponse {
    mama: Vec<f64>,
    fama: Vec<f64>,
}

#[derive(Serialize)]
struct PhasorResponse {
    in_phase: Vec<f64>,
    quadrature: Vec<f64>,
}

type Rejection = (StatusCode, String);

fn reject(e: cycle_indicators::IndicatorError) -> Rejection {
    (StatusCode::BAD_REQUEST, e.to_string())
}

async fn dominant_cycle_period(
    Json(req): Json<SeriesRequest>,
) -> Result<Json<SeriesResponse>, Rejection> {
    let result = cycle_indicators::dominant_cycle_period(&req.values).map_err(reject)?;
    Ok(Json(SeriesResponse { result }))
}

async fn dominant_cycle_phase(
    Json(req): Json<SeriesRequest>,
) -> Result<Json<SeriesResponse>, Rejection> {
    let result = cycle_indicators::dominant_cycle_phase(&req.values).map_err(reject)?;
    Ok(Json(SeriesResponse { result }))
}

async fn sine_wave(Json(req): Json<SeriesRequest>) -> Result<Json<SineResponse>, Rejection> {
    let out = cycle_indicators::sine_wave(&req.values).map_err(reject)?;
    Ok(Json(SineResponse {
        sine: out.sine,
        lead_sine: out.lead_sine,
    }))
}

async fn trendline(Json(req): Json<SeriesRequest>) -> Result<Json<SeriesResponse>, Rejection> {
    let result = cycle_indicators::instantaneous_trendline(&req.values).map_err(reject)?;
    Ok(Json(SeriesResponse { result }))
}

async fn trend_mode(Json(req): Json<SeriesRequest>) -> Result<Json<SeriesResponse>, Rejection> {
    let result = cycle_indicators::trend_mode(&req.values).map_err(reject)?;
    Ok(Json(SeriesResponse { result }))
}

async fn mama(Json(req): Json<MamaRequest>) -> Result<Json<MamaResponse>, Rejection> {
    let out =
        cycle_indicators::mama(&req.values, req.fast_limit, req.slow_limit).map_err(reject)?;
    Ok(Json(MamaResponse {
        mama: out.mama,
        fama: out.fama,
    }))
}

async fn phasor(Json(req): Json<SeriesRequest>) -> Result<Json<PhasorResponse>, Rejection> {
    let out = cycle_indicators::phasor(&req.values).map_err(reject)?;
    Ok(Json(PhasorResponse {
        in_phase: out.in_phase,
        quadrature: out.quadrature,
    }))
}

// Batch endpoint - compute the whole family in one call
#[derive(Deserialize)]
struct BatchRequest {
    values: Vec<f64>,
    fast_limit: Option<f64>,
    slow_limit: Option<f64>,
}

#[derive(Serialize)]
struct BatchResponse {
    dominant_cycle_period: Vec<f64>,
    dominant_cycle_phase: Vec<f64>,
    sine: Vec<f64>,
    lead_sine: Vec<f64>,
    trendline: Vec<f64>,
    trend_mode: Vec<f64>,
    mama: Vec<f64>,
    fama: Vec<f64>,
    in_phase: Vec<f64>,
    quadrature: Vec<f64>,
}

async fn batch(Json(req): Json<BatchRequest>) -> Result<Json<BatchResponse>, Rejection> {
    let values = &req.values;
    let fast = req.fast_limit.unwrap_or(0.5);
    let slow = req.slow_limit.unwrap_or(0.05);

    let sine_out = cycle_indicators::sine_wave(values).map_err(reject)?;
    let mama_out = cycle_indicators::mama(values, fast, slow).map_err(reject)?;
    let phasor_out = cycle_indicators::phasor(values).map_err(reject)?;

    Ok(Json(BatchResponse {
        dominant_cycle_period: cycle_indicators::dominant_cycle_period(values).map_err(reject)?,
        dominant_cycle_phase: cycle_indicators::dominant_cycle_phase(values).map_err(reject)?,
        sine: sine_out.sine,
        lead_sine: sine_out.lead_sine,
        trendline: cycle_indicators::instantaneous_trendline(values).map_err(reject)?,
        trend_mode: cycle_indicators::trend_mode(values).map_err(reject)?,
        mama: mama_out.mama,
        fama: mama_out.fama,
        in_phase: phasor_out.in_phase,
        quadrature: phasor_out.quadrature,
    }))
}

#[tokio::main]
async fn main() {
    let app = Router::new()
        .route("/dominant_cycle_period", post(dominant_cycle_period))
        .route("/dominant_cycle_phase", post(dominant_cycle_phase))
        .route("/sine_wave", post(sine_wave))
        .route("/trendline", post(trendline))
        .route("/trend_mode", post(trend_mode))
        .route("/mama", post(mama))
        .route("/phasor", post(phasor))
        // Batch - the whole family in one call
        .route("/batch", post(batch));

    let addr = SocketAddr::from(([127, 0, 0, 1], 3030));
    println!("Cycle indicator server running on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

//! CLI tool for computing cycle indicators
//! Usage: indicators <function> [fast_limit slow_limit] < input.json > output.json
//!        indicators <function> [fast_limit slow_limit] --parquet <file> <column>

use std::fs::File;
use std::io::{self, Read, Write};

use arrow::array::{Array, Float64Array};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

fn read_parquet_column(path: &str, name: &str) -> Vec<f64> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Failed to open {}: {}", path, e);
            std::process::exit(1);
        }
    };

    let builder = match ParquetRecordBatchReaderBuilder::try_new(file) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Failed to read {}: {}", path, e);
            std::process::exit(1);
        }
    };

    let reader = match builder.build() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Failed to build reader for {}: {}", path, e);
            std::process::exit(1);
        }
    };

    let mut result = Vec::new();
    for batch in reader.flatten() {
        if let Some(col) = batch.column_by_name(name) {
            if let Some(arr) = col.as_any().downcast_ref::<Float64Array>() {
                for i in 0..arr.len() {
                    result.push(if arr.is_null(i) { f64::NAN } else { arr.value(i) });
                }
            }
        }
    }
    result
}

fn serialize_series(result: Result<Vec<f64>, cycle_indicators::IndicatorError>) -> String {
    match result {
        Ok(values) => serde_json::to_string(&values).expect("Failed to serialize"),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: indicators <function> [fast_limit slow_limit] [--parquet <file> <column>]");
        eprintln!("Functions: dominant_cycle_period, dominant_cycle_phase, sine_wave,");
        eprintln!("           trendline, trend_mode, mama, phasor");
        eprintln!("Input: JSON array of numbers on stdin, or a parquet column");
        eprintln!("Output: JSON on stdout (arrays; objects for paired outputs)");
        std::process::exit(1);
    }

    let func = &args[1];

    let values: Vec<f64> = if let Some(pos) = args.iter().position(|a| a == "--parquet") {
        let path = args.get(pos + 1).unwrap_or_else(|| {
            eprintln!("--parquet requires <file> <column>");
            std::process::exit(1);
        });
        let column = args.get(pos + 2).unwrap_or_else(|| {
            eprintln!("--parquet requires <file> <column>");
            std::process::exit(1);
        });
        read_parquet_column(path, column)
    } else {
        let mut input = String::new();
        io::stdin().read_to_string(&mut input).expect("Failed to read stdin");
        serde_json::from_str(&input).expect("Invalid JSON array")
    };

    let output = match func.as_str() {
        "dominant_cycle_period" => serialize_series(cycle_indicators::dominant_cycle_period(&values)),
        "dominant_cycle_phase" => serialize_series(cycle_indicators::dominant_cycle_phase(&values)),
        "trendline" => serialize_series(cycle_indicators::instantaneous_trendline(&values)),
        "trend_mode" => serialize_series(cycle_indicators::trend_mode(&values)),
        "sine_wave" => match cycle_indicators::sine_wave(&values) {
            Ok(out) => serde_json::json!({
                "sine": out.sine,
                "lead_sine": out.lead_sine,
            })
            .to_string(),
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        },
        "mama" => {
            let fast: f64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(0.5);
            let slow: f64 = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(0.05);
            match cycle_indicators::mama(&values, fast, slow) {
                Ok(out) => serde_json::json!({
                    "mama": out.mama,
                    "fama": out.fama,
                })
                .to_string(),
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(1);
                }
            }
        }
        "phasor" => match cycle_indicators::phasor(&values) {
            Ok(out) => serde_json::json!({
                "in_phase": out.in_phase,
                "quadrature": out.quadrature,
            })
            .to_string(),
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        },
        _ => {
            eprintln!("Unknown function: {}", func);
            std::process::exit(1);
        }
    };

    io::stdout().write_all(output.as_bytes()).expect("Failed to write stdout");
}

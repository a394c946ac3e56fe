//! Dropout Prediction Core - Demo Entry Point
//!
//! Reads one student record (or a `{"students": [...]}` batch envelope)
//! as JSON from a file argument or stdin, runs the prediction pipeline,
//! and prints the result as JSON. The real transport layer uses the
//! library API directly; this binary exists for smoke-testing artifacts
//! from the command line.

use std::io::Read;
use std::process::ExitCode;

use serde_json::{json, Value};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!(
        "Dropout prediction core v{} starting...",
        dropout_core::constants::APP_VERSION
    );

    if dropout_core::ensure_artifacts_loaded() {
        log::info!("All artifacts loaded");
    } else {
        log::warn!("One or more artifacts missing - predictions will be unavailable");
    }

    let input = match read_input() {
        Ok(input) => input,
        Err(e) => {
            log::error!("Failed to read input: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let payload: Value = match serde_json::from_str(&input) {
        Ok(payload) => payload,
        Err(e) => {
            log::error!("Input is not valid JSON: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let output = match payload.get("students").and_then(Value::as_array) {
        Some(students) => match dropout_core::predict_batch(students) {
            Ok(batch) => json!({"success": true, "result": batch}),
            Err(e) => error_json(&e),
        },
        None => match dropout_core::predict_single(&payload) {
            Ok(prediction) => json!({"success": true, "result": prediction}),
            Err(e) => error_json(&e),
        },
    };

    match serde_json::to_string_pretty(&output) {
        Ok(rendered) => {
            println!("{}", rendered);
            if output["success"].as_bool().unwrap_or(false) {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            log::error!("Failed to render result: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn read_input() -> Result<String, std::io::Error> {
    match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn error_json(error: &dropout_core::PredictError) -> Value {
    json!({
        "success": false,
        "error": {
            "kind": error.kind(),
            "message": error.message(),
        }
    })
}

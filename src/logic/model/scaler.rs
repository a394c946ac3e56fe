//! Numeric Feature Scaler
//!
//! Standardization parameters fit offline on the training distribution.
//! At inference time the scaler only transforms; it never refits.

use serde::{Deserialize, Serialize};

use crate::logic::errors::PredictError;
use crate::logic::features::NUMERIC_FEATURE_COUNT;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scaler {
    /// Per-feature mean, training-time.
    pub mean: Vec<f64>,
    /// Per-feature standard deviation, training-time.
    pub scale: Vec<f64>,
}

impl Scaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Self {
        Self { mean, scale }
    }

    /// Identity transform; useful as a stand-in when testing downstream
    /// stages.
    pub fn identity() -> Self {
        Self {
            mean: vec![0.0; NUMERIC_FEATURE_COUNT],
            scale: vec![1.0; NUMERIC_FEATURE_COUNT],
        }
    }

    /// Load from a JSON side file: `{"mean": [..], "scale": [..]}`.
    pub fn from_json_file(path: &str) -> Result<Self, PredictError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PredictError::ArtifactUnavailable(format!("Failed to read scaler {}: {}", path, e))
        })?;

        let scaler: Scaler = serde_json::from_str(&content).map_err(|e| {
            PredictError::ArtifactUnavailable(format!("Failed to parse scaler {}: {}", path, e))
        })?;

        if scaler.mean.len() != NUMERIC_FEATURE_COUNT || scaler.scale.len() != NUMERIC_FEATURE_COUNT
        {
            return Err(PredictError::Configuration(format!(
                "Scaler expects {} features, got mean={} scale={}",
                NUMERIC_FEATURE_COUNT,
                scaler.mean.len(),
                scaler.scale.len()
            )));
        }

        Ok(scaler)
    }

    /// Standardize one history step: (x - mean) / scale per feature.
    pub fn transform(&self, step: [f64; NUMERIC_FEATURE_COUNT]) -> [f32; NUMERIC_FEATURE_COUNT] {
        let mut scaled = [0.0f32; NUMERIC_FEATURE_COUNT];
        for i in 0..NUMERIC_FEATURE_COUNT {
            let mean = self.mean.get(i).copied().unwrap_or(0.0);
            let scale = self.scale.get(i).copied().unwrap_or(1.0).max(1e-8);
            scaled[i] = ((step[i] - mean) / scale) as f32;
        }
        scaled
    }
}

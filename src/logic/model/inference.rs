//! Inference Adapter - ONNX Runtime Integration
//!
//! Thin wrapper around the trained network. The graph is an opaque
//! black box produced offline: three parallel branches (dual-kernel
//! Conv1D over the numeric window, embedding + dual-kernel Conv1D over
//! the token window, a dense projection of the static vector) fused
//! through a dense layer into a single sigmoid output. The adapter
//! invokes it once per record and returns the raw scalar untouched -
//! calibration happens downstream.

use ndarray::{Array2, Array3};
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;

use crate::logic::errors::PredictError;
use crate::logic::features::{FeatureSet, NUMERIC_FEATURE_COUNT, STATIC_FEATURE_COUNT, WINDOW_LEN};

/// Graph input names, fixed at export time.
pub const NUMERIC_INPUT: &str = "numerical_input";
pub const TEXT_INPUT: &str = "text_input";
pub const STATIC_INPUT: &str = "static_input";

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug)]
pub struct InferenceError(pub String);

impl std::fmt::Display for InferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "InferenceError: {}", self.0)
    }
}

impl std::error::Error for InferenceError {}

// ============================================================================
// NETWORK TRAIT
// ============================================================================

/// Seam between feature construction and the trained model: anything
/// that maps a feature set to a raw dropout probability. Lets the
/// calibration logic be exercised with a stub returning controlled
/// values, independent of the trained weights.
pub trait Network: Send + Sync {
    fn infer(&self, features: &FeatureSet) -> Result<f32, InferenceError>;
}

// ============================================================================
// TENSOR PACKING
// ============================================================================

/// Pack a feature set into the three batched input tensors:
/// (1, 15, 2) f32, (1, 15) i64, (1, 7) f32.
pub fn pack_tensors(
    features: &FeatureSet,
) -> Result<(Array3<f32>, Array2<i64>, Array2<f32>), InferenceError> {
    let mut numeric_data = Vec::with_capacity(WINDOW_LEN * NUMERIC_FEATURE_COUNT);
    for step in &features.numeric_history {
        numeric_data.extend_from_slice(step);
    }
    let numeric = Array3::from_shape_vec((1, WINDOW_LEN, NUMERIC_FEATURE_COUNT), numeric_data)
        .map_err(|e| InferenceError(format!("Failed to shape numeric history: {}", e)))?;

    let text = Array2::from_shape_vec((1, WINDOW_LEN), features.text_history.to_vec())
        .map_err(|e| InferenceError(format!("Failed to shape text history: {}", e)))?;

    let stat = Array2::from_shape_vec((1, STATIC_FEATURE_COUNT), features.static_features.to_vec())
        .map_err(|e| InferenceError(format!("Failed to shape static vector: {}", e)))?;

    Ok((numeric, text, stat))
}

// ============================================================================
// ONNX IMPLEMENTATION
// ============================================================================

/// The trained network behind an ONNX Runtime session.
///
/// `Session::run` needs `&mut self`, so the session sits behind a
/// mutex; everything else about the artifact is read-only after load.
pub struct OnnxNetwork {
    session: Mutex<Session>,
    output_name: String,
    model_path: String,
}

impl std::fmt::Debug for OnnxNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxNetwork")
            .field("model_path", &self.model_path)
            .field("output_name", &self.output_name)
            .finish()
    }
}

impl OnnxNetwork {
    /// Load the graph and check its interface against the feature
    /// shapes. A graph whose inputs do not match is version skew
    /// between artifact and pipeline - fatal, not a per-record error.
    pub fn load(model_path: &str) -> Result<Self, PredictError> {
        log::info!("Loading ONNX model from: {}", model_path);

        if !std::path::Path::new(model_path).exists() {
            return Err(PredictError::ArtifactUnavailable(format!(
                "Model not found: {}",
                model_path
            )));
        }

        let session = Session::builder()
            .map_err(|e| {
                PredictError::ArtifactUnavailable(format!("Failed to create session builder: {}", e))
            })?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| {
                PredictError::ArtifactUnavailable(format!("Failed to set optimization: {}", e))
            })?
            .commit_from_file(model_path)
            .map_err(|e| {
                PredictError::ArtifactUnavailable(format!("Failed to load model: {}", e))
            })?;

        let input_names: Vec<String> = session.inputs().iter().map(|i| i.name().to_string()).collect();
        for expected in [NUMERIC_INPUT, TEXT_INPUT, STATIC_INPUT] {
            if !input_names.iter().any(|name| name == expected) {
                return Err(PredictError::Configuration(format!(
                    "Model graph is missing input '{}' (found: {:?})",
                    expected, input_names
                )));
            }
        }
        if input_names.len() != 3 {
            return Err(PredictError::Configuration(format!(
                "Model graph must take exactly 3 inputs, found {:?}",
                input_names
            )));
        }

        if session.outputs().len() != 1 {
            return Err(PredictError::Configuration(format!(
                "Model graph must produce exactly 1 output, found {}",
                session.outputs().len()
            )));
        }
        let output_name = session
            .outputs()
            .first()
            .map(|o| o.name().to_string())
            .ok_or_else(|| PredictError::Configuration("Model graph has no output".to_string()))?;

        log::info!("ONNX model loaded successfully");

        Ok(Self {
            session: Mutex::new(session),
            output_name,
            model_path: model_path.to_string(),
        })
    }

    pub fn model_path(&self) -> &str {
        &self.model_path
    }
}

impl Network for OnnxNetwork {
    fn infer(&self, features: &FeatureSet) -> Result<f32, InferenceError> {
        let (numeric, text, stat) = pack_tensors(features)?;

        let numeric_tensor = Value::from_array(numeric)
            .map_err(|e| InferenceError(format!("Failed to create numeric tensor: {}", e)))?;
        let text_tensor = Value::from_array(text)
            .map_err(|e| InferenceError(format!("Failed to create text tensor: {}", e)))?;
        let static_tensor = Value::from_array(stat)
            .map_err(|e| InferenceError(format!("Failed to create static tensor: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![
                NUMERIC_INPUT => numeric_tensor,
                TEXT_INPUT => text_tensor,
                STATIC_INPUT => static_tensor
            ])
            .map_err(|e| InferenceError(format!("Inference failed: {}", e)))?;

        let output = outputs
            .get(&self.output_name)
            .ok_or_else(|| InferenceError("No output from model".to_string()))?;

        let output_tensor = output
            .try_extract_tensor::<f32>()
            .map_err(|e| InferenceError(format!("Failed to extract output: {}", e)))?;

        // (shape, data) tuple; the graph produces one sigmoid scalar.
        let data = output_tensor.1;
        data.first()
            .copied()
            .ok_or_else(|| InferenceError("Model returned an empty tensor".to_string()))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_features() -> FeatureSet {
        FeatureSet {
            static_features: [20.0, 1.0, 0.0, 0.0, 1.0, 6.0, 4.0],
            numeric_history: [[0.5, -0.25]; WINDOW_LEN],
            text_history: [3; WINDOW_LEN],
        }
    }

    #[test]
    fn test_pack_tensors_shapes() {
        let (numeric, text, stat) = pack_tensors(&sample_features()).unwrap();

        assert_eq!(numeric.shape(), &[1, WINDOW_LEN, NUMERIC_FEATURE_COUNT]);
        assert_eq!(text.shape(), &[1, WINDOW_LEN]);
        assert_eq!(stat.shape(), &[1, STATIC_FEATURE_COUNT]);
    }

    #[test]
    fn test_pack_tensors_values() {
        let (numeric, text, stat) = pack_tensors(&sample_features()).unwrap();

        assert_eq!(numeric[[0, 0, 0]], 0.5);
        assert_eq!(numeric[[0, 14, 1]], -0.25);
        assert_eq!(text[[0, 7]], 3);
        assert_eq!(stat[[0, 5]], 6.0);
    }

    #[test]
    fn test_load_missing_model_is_unavailable() {
        let err = OnnxNetwork::load("/nonexistent/model.onnx").unwrap_err();
        assert_eq!(err.kind(), "artifact_unavailable");
    }
}

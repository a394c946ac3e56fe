//! Prediction Pipeline - Single & Batch Orchestration
//!
//! Runs one record through validate → build features → infer →
//! calibrate, and repeats that per record for batches while isolating
//! failures. Each run is a pure, synchronous computation over its own
//! inputs; the artifact store is the only shared resource.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::constants;
use crate::logic::errors::PredictError;
use crate::logic::features::{build_features, WINDOW_LEN};
use crate::logic::model::{artifacts, Network, OnnxNetwork, Scaler, Tokenizer, TrainingMetadata};
use crate::logic::record::{raw_student_id, StudentRecord};
use crate::logic::risk::{calibrate, explanations, risk_level, RiskBreakdown, RiskLevel};
use crate::logic::validate::validate_record;

// ============================================================================
// STAGES
// ============================================================================

/// Per-record pipeline states. `Rejected` is terminal from `Received`
/// (validation failure); `Failed` is terminal from any later state.
/// No retries: a failure is final for that record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Received,
    Validated,
    FeatureBuilt,
    Inferred,
    Calibrated,
    Completed,
    Rejected,
    Failed,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Received => "received",
            Stage::Validated => "validated",
            Stage::FeatureBuilt => "feature_built",
            Stage::Inferred => "inferred",
            Stage::Calibrated => "calibrated",
            Stage::Completed => "completed",
            Stage::Rejected => "rejected",
            Stage::Failed => "failed",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// RESULTS
// ============================================================================

/// One calibrated prediction. Immutable once produced; returned to the
/// caller, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    /// Final blended probability, rounded to 4 decimals.
    pub dropout_probability: f64,
    pub risk_level: RiskLevel,
    pub explanations: Vec<String>,
    pub model: String,
    pub breakdown: RiskBreakdown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchError {
    pub index: usize,
    pub student_id: String,
    pub stage: Stage,
    pub error: String,
}

/// Batch output: successes in input order, failures reported separately
/// under the same indexing. `total` counts successes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    pub predictions: Vec<PredictionResult>,
    pub errors: Vec<BatchError>,
    pub total: usize,
}

/// Per-artifact presence snapshot for the health endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactStatus {
    pub model_loaded: bool,
    pub tokenizer_loaded: bool,
    pub scaler_loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaded_at: Option<DateTime<Utc>>,
    pub timestamp: DateTime<Utc>,
}

/// Model metadata for the info endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub model_name: &'static str,
    pub branches: Vec<&'static str>,
    pub fusion: &'static str,
    pub input_window: String,
    pub model_loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub training: Option<TrainingMetadata>,
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Load any missing artifacts; true when network, tokenizer, and scaler
/// are all present afterwards.
pub fn ensure_artifacts_loaded() -> bool {
    artifacts::ensure_loaded()
}

/// Predict dropout risk for a single student record.
pub fn predict_single(record: &Value) -> Result<PredictionResult, PredictError> {
    let (network, tokenizer, scaler) = resolve_artifacts()?;
    run_record(network.as_ref(), &tokenizer, &scaler, record)
}

/// Predict dropout risk for a list of records. A failing record is
/// recorded against its index and never aborts the rest of the batch;
/// only missing artifacts (or an empty input) abort up front.
pub fn predict_batch(records: &[Value]) -> Result<BatchResult, PredictError> {
    if records.is_empty() {
        return Err(PredictError::Validation(vec![
            "'students' must be a non-empty array".to_string(),
        ]));
    }

    let (network, tokenizer, scaler) = resolve_artifacts()?;
    Ok(run_batch(network.as_ref(), &tokenizer, &scaler, records))
}

/// Artifact presence snapshot.
pub fn artifact_status() -> ArtifactStatus {
    ArtifactStatus {
        model_loaded: artifacts::is_network_loaded(),
        tokenizer_loaded: artifacts::is_tokenizer_loaded(),
        scaler_loaded: artifacts::is_scaler_loaded(),
        loaded_at: artifacts::loaded_at(),
        timestamp: Utc::now(),
    }
}

/// Architecture summary and training metadata.
pub fn model_info() -> ModelInfo {
    ModelInfo {
        model_name: constants::MODEL_NAME,
        branches: vec![
            "Numerical (Conv1D multiscale: kernel 3 + kernel 5)",
            "Textual (Embedding → Conv1D multiscale: kernel 3 + kernel 5)",
            "Static (Dense 16)",
        ],
        fusion: "Concatenation → Dense 64 → Dropout 0.5 → Sigmoid",
        input_window: format!("{} weeks", WINDOW_LEN),
        model_loaded: artifacts::is_network_loaded(),
        training: artifacts::metadata(),
    }
}

// ============================================================================
// PIPELINE INTERNALS
// ============================================================================

fn resolve_artifacts() -> Result<(Arc<OnnxNetwork>, Arc<Tokenizer>, Arc<Scaler>), PredictError> {
    if !artifacts::ensure_loaded() {
        return Err(PredictError::ArtifactUnavailable(
            "Model, tokenizer, or scaler not loaded. Train and export the artifacts first."
                .to_string(),
        ));
    }

    match (artifacts::network(), artifacts::tokenizer(), artifacts::scaler()) {
        (Some(network), Some(tokenizer), Some(scaler)) => Ok((network, tokenizer, scaler)),
        _ => Err(PredictError::ArtifactUnavailable(
            "Artifacts were unloaded during the request".to_string(),
        )),
    }
}

/// Validate and predict one raw record: Received → Validated →
/// FeatureBuilt → Inferred → Calibrated → Completed.
fn run_record(
    network: &dyn Network,
    tokenizer: &Tokenizer,
    scaler: &Scaler,
    record: &Value,
) -> Result<PredictionResult, PredictError> {
    // Received → Validated | Rejected
    let violations = validate_record(record);
    if !violations.is_empty() {
        return Err(PredictError::Validation(violations));
    }

    let student = StudentRecord::from_raw(record);

    // Validated → FeatureBuilt
    let features = build_features(&student, scaler, tokenizer);

    // FeatureBuilt → Inferred
    let raw_probability = network.infer(&features).map_err(|e| PredictError::Record {
        stage: Stage::Inferred,
        message: e.to_string(),
    })? as f64;

    // Inferred → Calibrated
    let breakdown = calibrate(raw_probability, &student);
    let risk = risk_level(breakdown.final_probability);
    let notes = explanations(&student);

    log::debug!(
        "Prediction completed: id={:?} raw={:.4} heuristic={:.4} final={:.4} tier={}",
        student.id,
        breakdown.raw_probability,
        breakdown.heuristic_risk,
        breakdown.final_probability,
        risk
    );

    // Calibrated → Completed
    Ok(PredictionResult {
        student_id: student.id.clone(),
        dropout_probability: round4(breakdown.final_probability),
        risk_level: risk,
        explanations: notes,
        model: constants::MODEL_NAME.to_string(),
        breakdown,
    })
}

fn run_batch(
    network: &dyn Network,
    tokenizer: &Tokenizer,
    scaler: &Scaler,
    records: &[Value],
) -> BatchResult {
    let mut predictions = Vec::with_capacity(records.len());
    let mut errors = Vec::new();

    for (index, record) in records.iter().enumerate() {
        let student_id = resolve_student_id(record, index);
        match run_record(network, tokenizer, scaler, record) {
            Ok(mut result) => {
                result.student_id = Some(student_id);
                predictions.push(result);
            }
            Err(e) => {
                log::warn!("Batch record {} ({}) failed: {}", index, student_id, e);
                errors.push(BatchError {
                    index,
                    student_id,
                    stage: e.failure_stage(),
                    error: e.message(),
                });
            }
        }
    }

    let total = predictions.len();
    BatchResult {
        predictions,
        errors,
        total,
    }
}

/// Identifier resolution: explicit `id`, then `student_id`, then a
/// synthesized `student_{index}`.
fn resolve_student_id(record: &Value, index: usize) -> String {
    raw_student_id(record).unwrap_or_else(|| format!("student_{}", index))
}

/// Round half away from zero to 4 decimals.
fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::model::InferenceError;
    use serde_json::json;
    use std::collections::HashMap;

    /// Controlled-output stand-in for the trained network.
    struct StubNetwork(f32);

    impl Network for StubNetwork {
        fn infer(&self, _features: &crate::logic::features::FeatureSet) -> Result<f32, InferenceError> {
            Ok(self.0)
        }
    }

    struct FailingNetwork;

    impl Network for FailingNetwork {
        fn infer(&self, _features: &crate::logic::features::FeatureSet) -> Result<f32, InferenceError> {
            Err(InferenceError("session exploded".to_string()))
        }
    }

    fn test_tokenizer() -> Tokenizer {
        let words = [
            ("<OOV>", 1),
            ("struggling", 2),
            ("with", 3),
            ("concepts", 4),
            ("regular", 5),
            ("attendance", 6),
            ("active", 7),
            ("participation", 8),
        ];
        let word_index: HashMap<String, i64> =
            words.iter().map(|(w, i)| (w.to_string(), *i)).collect();
        Tokenizer::new(word_index, Some("<OOV>".to_string()))
    }

    fn strong_student() -> Value {
        json!({
            "attendance": 95, "avgGrade": 90, "debtor": 0, "tuitionUpToDate": 1,
            "coursesEnrolled": 6, "coursesPassed": 6
        })
    }

    fn weak_student() -> Value {
        json!({
            "attendance": 30, "avgGrade": 25, "debtor": 1, "tuitionUpToDate": 0,
            "coursesEnrolled": 6, "coursesPassed": 0
        })
    }

    #[test]
    fn test_strong_student_is_low_risk() {
        let network = StubNetwork(0.1);
        let result = run_record(&network, &test_tokenizer(), &Scaler::identity(), &strong_student())
            .unwrap();

        // Zero heuristic: final = 0.3 × raw.
        assert_eq!(result.breakdown.heuristic_risk, 0.0);
        assert_eq!(result.dropout_probability, 0.03);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert_eq!(result.model, constants::MODEL_NAME);
    }

    #[test]
    fn test_weak_student_is_critical() {
        let network = StubNetwork(0.9);
        let result =
            run_record(&network, &test_tokenizer(), &Scaler::identity(), &weak_student()).unwrap();

        assert!(result.dropout_probability >= 0.7);
        assert_eq!(result.risk_level, RiskLevel::Critical);
        // All four warnings on top of the three baseline notes.
        assert_eq!(result.explanations.len(), 7);
    }

    #[test]
    fn test_prediction_is_deterministic() {
        let network = StubNetwork(0.42);
        let tokenizer = test_tokenizer();
        let scaler = Scaler::new(vec![70.0, 60.0], vec![12.5, 18.0]);
        let record = json!({
            "attendance": 61.5, "avgGrade": 47.25, "debtor": 1, "tuitionUpToDate": 1,
            "coursesEnrolled": 7, "coursesPassed": 3
        });

        let a = run_record(&network, &tokenizer, &scaler, &record).unwrap();
        let b = run_record(&network, &tokenizer, &scaler, &record).unwrap();

        assert_eq!(a.dropout_probability, b.dropout_probability);
        assert_eq!(a.risk_level, b.risk_level);
        assert_eq!(a.explanations, b.explanations);
    }

    #[test]
    fn test_validation_rejects_before_inference() {
        // A failing network proves inference is never reached.
        let network = FailingNetwork;
        let record = json!({
            "attendance": 150, "avgGrade": 70,
            "coursesEnrolled": 6, "coursesPassed": 5
        });

        let err = run_record(&network, &test_tokenizer(), &Scaler::identity(), &record).unwrap_err();
        match err {
            PredictError::Validation(violations) => {
                assert!(violations[0].contains("attendance"));
            }
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn test_inference_failure_reports_stage() {
        let err = run_record(
            &FailingNetwork,
            &test_tokenizer(),
            &Scaler::identity(),
            &strong_student(),
        )
        .unwrap_err();

        assert_eq!(err.failure_stage(), Stage::Inferred);
        assert!(err.message().contains("session exploded"));
    }

    #[test]
    fn test_batch_isolates_failures() {
        let network = StubNetwork(0.2);
        let records = vec![
            strong_student(),
            json!({"attendance": "broken", "avgGrade": 70, "coursesEnrolled": 6, "coursesPassed": 5}),
            weak_student(),
        ];

        let result = run_batch(&network, &test_tokenizer(), &Scaler::identity(), &records);

        assert_eq!(result.total, 2);
        assert_eq!(result.predictions.len(), 2);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].index, 1);
        assert_eq!(result.errors[0].stage, Stage::Rejected);
        assert!(result.errors[0].error.contains("attendance"));
    }

    #[test]
    fn test_batch_preserves_order_and_ids() {
        let network = StubNetwork(0.2);
        let mut first = strong_student();
        first["id"] = json!("alpha");
        let mut second = weak_student();
        second["student_id"] = json!("beta");
        let third = strong_student(); // no id → synthesized

        let result = run_batch(
            &network,
            &test_tokenizer(),
            &Scaler::identity(),
            &[first, second, third],
        );

        assert_eq!(result.total, 3);
        assert_eq!(result.predictions[0].student_id.as_deref(), Some("alpha"));
        assert_eq!(result.predictions[1].student_id.as_deref(), Some("beta"));
        assert_eq!(result.predictions[2].student_id.as_deref(), Some("student_2"));
    }

    #[test]
    fn test_batch_of_failing_network_keeps_indexing() {
        let records = vec![strong_student(), strong_student()];
        let result = run_batch(&FailingNetwork, &test_tokenizer(), &Scaler::identity(), &records);

        assert_eq!(result.total, 0);
        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.errors[0].index, 0);
        assert_eq!(result.errors[1].index, 1);
        assert_eq!(result.errors[0].student_id, "student_0");
        assert_eq!(result.errors[0].stage, Stage::Inferred);
    }

    #[test]
    fn test_predict_batch_rejects_empty_input() {
        let err = predict_batch(&[]).unwrap_err();
        assert_eq!(err.kind(), "validation_error");
    }

    #[test]
    fn test_round4() {
        assert_eq!(round4(0.123_456), 0.1235);
        assert_eq!(round4(0.1), 0.1);
        assert_eq!(round4(0.000_04), 0.0);
        assert_eq!(round4(0.999_99), 1.0);
    }

    #[test]
    fn test_model_info_shape() {
        let info = model_info();
        assert_eq!(info.model_name, constants::MODEL_NAME);
        assert_eq!(info.branches.len(), 3);
        assert_eq!(info.input_window, "15 weeks");
    }
}

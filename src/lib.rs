//! Dropout Prediction Core
//!
//! Estimates a student's probability of dropping out from academic,
//! attendance, and socioeconomic signals, and returns a calibrated
//! 4-tier risk level plus human-readable explanations.
//!
//! The pipeline is: validate → build features → neural inference (ONNX)
//! → heuristic risk calibration. The transport layer (HTTP routing,
//! CORS, request logging) lives outside this crate and talks to it
//! through [`predict_single`], [`predict_batch`], and
//! [`ensure_artifacts_loaded`].

pub mod constants;
pub mod logic;

pub use logic::errors::{PredictError, PredictResult};
pub use logic::features::{FeatureSet, WINDOW_LEN};
pub use logic::pipeline::{
    artifact_status, ensure_artifacts_loaded, model_info, predict_batch, predict_single,
    ArtifactStatus, BatchError, BatchResult, ModelInfo, PredictionResult, Stage,
};
pub use logic::record::{Gender, StudentRecord};
pub use logic::risk::{feature_importance, FeatureImportance, RiskBreakdown, RiskLevel};

//! Error handling
//!
//! One public error enum for the whole pipeline. Every payload is
//! textual and structured (kind + message); nothing is silently
//! swallowed.

use crate::logic::pipeline::Stage;

pub type PredictResult<T> = Result<T, PredictError>;

#[derive(Debug, Clone)]
pub enum PredictError {
    /// One or more field-level violations. Recoverable; reported to the
    /// caller before any computation runs.
    Validation(Vec<String>),

    /// Network, tokenizer, or scaler missing after a load attempt.
    /// Service-unavailable condition; the core does not retry on its own.
    ArtifactUnavailable(String),

    /// Artifact/pipeline version skew (e.g. a graph whose inputs do not
    /// match the feature shapes). Fatal, not user-recoverable.
    Configuration(String),

    /// Unexpected failure for a single record after validation. Caught
    /// per-record in batch mode.
    Record { stage: Stage, message: String },
}

impl PredictError {
    /// Short machine-readable kind tag.
    pub fn kind(&self) -> &'static str {
        match self {
            PredictError::Validation(_) => "validation_error",
            PredictError::ArtifactUnavailable(_) => "artifact_unavailable",
            PredictError::Configuration(_) => "configuration_error",
            PredictError::Record { .. } => "record_prediction_error",
        }
    }

    /// Message body without the kind prefix.
    pub fn message(&self) -> String {
        match self {
            PredictError::Validation(violations) => violations.join("; "),
            PredictError::ArtifactUnavailable(msg) => msg.clone(),
            PredictError::Configuration(msg) => msg.clone(),
            PredictError::Record { message, .. } => message.clone(),
        }
    }

    /// The pipeline stage at which a record died.
    pub fn failure_stage(&self) -> Stage {
        match self {
            PredictError::Validation(_) => Stage::Rejected,
            PredictError::Record { stage, .. } => *stage,
            _ => Stage::Failed,
        }
    }
}

impl std::fmt::Display for PredictError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PredictError::Validation(violations) => {
                write!(f, "Validation failed: {}", violations.join("; "))
            }
            PredictError::ArtifactUnavailable(msg) => write!(f, "Artifacts unavailable: {}", msg),
            PredictError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            PredictError::Record { stage, message } => {
                write!(f, "Prediction failed at {}: {}", stage, message)
            }
        }
    }
}

impl std::error::Error for PredictError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tags() {
        let err = PredictError::Validation(vec!["attendance must be between 0 and 100".into()]);
        assert_eq!(err.kind(), "validation_error");
        assert!(err.to_string().contains("attendance"));

        let err = PredictError::ArtifactUnavailable("model not found".into());
        assert_eq!(err.kind(), "artifact_unavailable");
    }

    #[test]
    fn test_failure_stage() {
        let err = PredictError::Validation(vec!["bad".into()]);
        assert_eq!(err.failure_stage(), Stage::Rejected);

        let err = PredictError::Record {
            stage: Stage::Inferred,
            message: "boom".into(),
        };
        assert_eq!(err.failure_stage(), Stage::Inferred);
    }
}

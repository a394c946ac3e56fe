//! Central Configuration Constants
//!
//! Single source of truth for artifact locations and model identity.
//! To point the service at a different artifact set, only edit this file
//! or set the corresponding environment variables.

/// Stable model identifier returned with every prediction.
pub const MODEL_NAME: &str = "DMSW (Dual-Modal Multiscale Sliding Window)";

/// Default path of the trained network (ONNX export).
pub const DEFAULT_MODEL_PATH: &str = "artifacts/dmsw_model.onnx";

/// Default path of the text tokenization table.
pub const DEFAULT_TOKENIZER_PATH: &str = "artifacts/dmsw_tokenizer.json";

/// Default path of the numeric feature scaler.
pub const DEFAULT_SCALER_PATH: &str = "artifacts/dmsw_scaler.json";

/// Default path of the optional training metadata.
pub const DEFAULT_METADATA_PATH: &str = "artifacts/model_metadata.json";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get network path from environment or use default
pub fn get_model_path() -> String {
    std::env::var("DROPOUT_MODEL_PATH").unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_string())
}

/// Get tokenizer path from environment or use default
pub fn get_tokenizer_path() -> String {
    std::env::var("DROPOUT_TOKENIZER_PATH").unwrap_or_else(|_| DEFAULT_TOKENIZER_PATH.to_string())
}

/// Get scaler path from environment or use default
pub fn get_scaler_path() -> String {
    std::env::var("DROPOUT_SCALER_PATH").unwrap_or_else(|_| DEFAULT_SCALER_PATH.to_string())
}

/// Get training metadata path from environment or use default
pub fn get_metadata_path() -> String {
    std::env::var("DROPOUT_METADATA_PATH").unwrap_or_else(|_| DEFAULT_METADATA_PATH.to_string())
}

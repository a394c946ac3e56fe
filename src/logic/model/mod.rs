//! Model Module - Artifact Store & Neural Inference
//!
//! Everything the trained network needs at inference time:
//! - `scaler` - per-feature standardization learned offline
//! - `tokenizer` - phrase → token-id table learned offline
//! - `inference` - the ONNX session wrapper behind the `Network` trait
//! - `artifacts` - process-wide, load-once artifact store

pub mod artifacts;
pub mod inference;
pub mod scaler;
pub mod tokenizer;

pub use artifacts::TrainingMetadata;
pub use inference::{InferenceError, Network, OnnxNetwork};
pub use scaler::Scaler;
pub use tokenizer::Tokenizer;

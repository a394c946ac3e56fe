//! Artifact Store
//!
//! Process-wide handles to the three trained artifacts (network,
//! tokenizer, scaler) plus optional training metadata. Written once by
//! a mutex-guarded load step, read-only afterwards; readers clone an
//! `Arc` and never hold a lock across inference. Re-invoking the load
//! step is idempotent, so lazy first-use loading is safe under
//! concurrent first requests.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};

use crate::constants;
use crate::logic::model::{OnnxNetwork, Scaler, Tokenizer};

// ============================================================================
// STATE
// ============================================================================

static NETWORK: RwLock<Option<Arc<OnnxNetwork>>> = RwLock::new(None);
static TOKENIZER: RwLock<Option<Arc<Tokenizer>>> = RwLock::new(None);
static SCALER: RwLock<Option<Arc<Scaler>>> = RwLock::new(None);
static METADATA: RwLock<Option<TrainingMetadata>> = RwLock::new(None);
static LOADED_AT: RwLock<Option<DateTime<Utc>>> = RwLock::new(None);

/// Serializes the load step: single writer before many readers.
static LOAD_GUARD: Mutex<()> = Mutex::new(());

// ============================================================================
// TRAINING METADATA
// ============================================================================

/// Offline-training summary persisted next to the model. Every field is
/// optional; the pipeline works without the file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingMetadata {
    #[serde(default)]
    pub trained_at: Option<String>,
    #[serde(default)]
    pub total_students: Option<u64>,
    #[serde(default)]
    pub train_samples: Option<u64>,
    #[serde(default)]
    pub test_samples: Option<u64>,
    #[serde(default)]
    pub epochs_completed: Option<u64>,
    #[serde(default)]
    pub accuracy: Option<f64>,
    #[serde(default)]
    pub loss: Option<f64>,
    #[serde(default)]
    pub precision: Option<f64>,
    #[serde(default)]
    pub recall: Option<f64>,
    #[serde(default)]
    pub f1_score: Option<f64>,
}

impl TrainingMetadata {
    fn from_json_file(path: &str) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("read {}: {}", path, e))?;
        serde_json::from_str(&content).map_err(|e| format!("parse {}: {}", path, e))
    }
}

// ============================================================================
// LOADING
// ============================================================================

/// Load every artifact that is not already resident. Returns true when
/// network, tokenizer, and scaler are all present afterwards. Safe to
/// call from any number of threads; the actual load runs at most once
/// at a time and already-loaded artifacts are never reloaded.
pub fn ensure_loaded() -> bool {
    if is_loaded() {
        return true;
    }

    let _guard = LOAD_GUARD.lock();
    if is_loaded() {
        // Another caller finished the load while we waited.
        return true;
    }

    load_missing();
    is_loaded()
}

fn load_missing() {
    if NETWORK.read().is_none() {
        let path = constants::get_model_path();
        match OnnxNetwork::load(&path) {
            Ok(network) => *NETWORK.write() = Some(Arc::new(network)),
            Err(e) => log::warn!("Network load failed: {}", e),
        }
    }

    if TOKENIZER.read().is_none() {
        let path = constants::get_tokenizer_path();
        match Tokenizer::from_json_file(&path) {
            Ok(tokenizer) => {
                log::info!("Tokenizer loaded from {} ({} words)", path, tokenizer.vocab_size());
                *TOKENIZER.write() = Some(Arc::new(tokenizer));
            }
            Err(e) => log::warn!("Tokenizer load failed: {}", e),
        }
    }

    if SCALER.read().is_none() {
        let path = constants::get_scaler_path();
        match Scaler::from_json_file(&path) {
            Ok(scaler) => {
                log::info!("Scaler loaded from {}", path);
                *SCALER.write() = Some(Arc::new(scaler));
            }
            Err(e) => log::warn!("Scaler load failed: {}", e),
        }
    }

    // Metadata is informational only.
    if METADATA.read().is_none() {
        let path = constants::get_metadata_path();
        match TrainingMetadata::from_json_file(&path) {
            Ok(metadata) => {
                log::info!("Training metadata loaded from {}", path);
                *METADATA.write() = Some(metadata);
            }
            Err(e) => log::debug!("No training metadata: {}", e),
        }
    }

    if is_loaded() && LOADED_AT.read().is_none() {
        *LOADED_AT.write() = Some(Utc::now());
    }
}

// ============================================================================
// ACCESSORS
// ============================================================================

pub fn network() -> Option<Arc<OnnxNetwork>> {
    NETWORK.read().clone()
}

pub fn tokenizer() -> Option<Arc<Tokenizer>> {
    TOKENIZER.read().clone()
}

pub fn scaler() -> Option<Arc<Scaler>> {
    SCALER.read().clone()
}

pub fn metadata() -> Option<TrainingMetadata> {
    METADATA.read().clone()
}

pub fn loaded_at() -> Option<DateTime<Utc>> {
    *LOADED_AT.read()
}

/// True when all three required artifacts are resident.
pub fn is_loaded() -> bool {
    NETWORK.read().is_some() && TOKENIZER.read().is_some() && SCALER.read().is_some()
}

pub fn is_network_loaded() -> bool {
    NETWORK.read().is_some()
}

pub fn is_tokenizer_loaded() -> bool {
    TOKENIZER.read().is_some()
}

pub fn is_scaler_loaded() -> bool {
    SCALER.read().is_some()
}

/// Drop every resident artifact. The next `ensure_loaded` reloads from
/// disk; used when artifacts are retrained in place.
pub fn unload() {
    let _guard = LOAD_GUARD.lock();
    *NETWORK.write() = None;
    *TOKENIZER.write() = None;
    *SCALER.write() = None;
    *METADATA.write() = None;
    *LOADED_AT.write() = None;
    log::info!("Artifacts unloaded");
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_ensure_loaded_without_artifacts() {
        // No artifact files in the test working directory: the load
        // step must fail closed, repeatably and without panicking.
        unload();
        assert!(!ensure_loaded());
        assert!(!ensure_loaded());
        assert!(!is_loaded());
        assert!(loaded_at().is_none());
    }

    #[test]
    fn test_metadata_parsing_ignores_unknown_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model_metadata.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{"trained_at": "2025-11-02T10:00:00Z", "accuracy": 0.87,
                "f1_score": 0.84, "confusion_matrix": {{"TP": 10}}}}"#
        )
        .unwrap();

        let metadata = TrainingMetadata::from_json_file(path.to_str().unwrap()).unwrap();
        assert_eq!(metadata.accuracy, Some(0.87));
        assert_eq!(metadata.f1_score, Some(0.84));
        assert_eq!(metadata.trained_at.as_deref(), Some("2025-11-02T10:00:00Z"));
        assert_eq!(metadata.precision, None);
    }
}

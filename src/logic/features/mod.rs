//! Features Module - Deterministic Feature Construction
//!
//! Turns a validated [`StudentRecord`] into the three fixed-shape
//! tensors the network expects. No randomness and no dependence on
//! prior requests: the same record always produces the same features.

pub mod history;
pub mod static_vec;


pub use history::BehaviorBand;

use serde::{Deserialize, Serialize};

use crate::logic::model::{Scaler, Tokenizer};
use crate::logic::record::StudentRecord;

/// Sliding-window length: the number of trailing steps fed to the
/// time-series branches.
pub const WINDOW_LEN: usize = 15;

/// Static branch width: age, gender, scholarship, debtor,
/// tuition-up-to-date, courses enrolled, courses passed.
pub const STATIC_FEATURE_COUNT: usize = 7;

/// Numeric history width: (attendance, avg grade) per step.
pub const NUMERIC_FEATURE_COUNT: usize = 2;

/// The three tensors for one student, shaped exactly as the network
/// branches were built to accept. History length is always
/// [`WINDOW_LEN`]; no record is ever padded with another student's data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    pub static_features: [f32; STATIC_FEATURE_COUNT],
    pub numeric_history: [[f32; NUMERIC_FEATURE_COUNT]; WINDOW_LEN],
    pub text_history: [i64; WINDOW_LEN],
}

/// Build the full feature set for one validated record.
pub fn build_features(
    student: &StudentRecord,
    scaler: &Scaler,
    tokenizer: &Tokenizer,
) -> FeatureSet {
    FeatureSet {
        static_features: static_vec::static_vector(student),
        numeric_history: history::numeric_history(student, scaler),
        text_history: history::text_history(student, tokenizer),
    }
}

//! Risk Module - Calibration, Tiers & Explanations
//!
//! The network's raw output is known to underestimate risk for
//! low-attendance students, so it is blended with an explicit,
//! auditable heuristic rather than trusted alone.
//!
//! - `types` - data structures only
//! - `rules` - the calibration constants (weights, floors, tier table)
//! - `calibrate` - the blend itself
//! - `explain` - rule-based explanation strings
//! - `importance` - offline feature-importance rankings

pub mod calibrate;
pub mod explain;
pub mod importance;
pub mod rules;
pub mod types;

pub use calibrate::{calibrate, risk_level};
pub use explain::explanations;
pub use importance::{feature_importance, FeatureImportance, ImportanceEntry};
pub use types::{RiskBreakdown, RiskLevel};

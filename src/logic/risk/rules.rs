//! Calibration Rules
//!
//! The blend weights and the tier table form one calibration contract:
//! recalibrating one requires updating the other consistently.

/// Heuristic term weights.
pub const ATTENDANCE_WEIGHT: f64 = 0.35;
pub const GRADE_WEIGHT: f64 = 0.30;
pub const PASS_WEIGHT: f64 = 0.20;

/// Flat penalty per adverse socioeconomic flag (debtor, tuition overdue).
pub const SOCIO_PENALTY_STEP: f64 = 0.15;

/// Penalty floors: below these values the corresponding penalty ramps
/// up linearly to 1.
pub const ATTENDANCE_FLOOR: f64 = 60.0;
pub const GRADE_FLOOR: f64 = 50.0;
pub const PASS_RATE_FLOOR: f64 = 0.5;

/// Blend: the model is poorly calibrated, so the heuristic dominates.
pub const MODEL_WEIGHT: f64 = 0.3;
pub const HEURISTIC_WEIGHT: f64 = 0.7;

/// Tier thresholds on the final probability, closed on the lower bound,
/// evaluated high to low.
pub const CRITICAL_MIN: f64 = 0.70;
pub const HIGH_MIN: f64 = 0.50;
pub const MEDIUM_MIN: f64 = 0.30;

//! Input Validator
//!
//! Checks raw record shape and field ranges before any feature
//! construction. All rules are independent: every violation is
//! collected, none short-circuits, and nothing here panics - a value
//! that fails to coerce degrades to a below-range sentinel and fails
//! its range check like any other out-of-range input.

use serde_json::Value;

use crate::logic::coerce::{safe_float, safe_int};

/// Sentinel used for missing/malformed numeric fields; below every
/// accepted range so it always trips the corresponding check.
const INVALID: f64 = -1.0;

/// Validate one raw record. An empty list means the record is valid.
pub fn validate_record(data: &Value) -> Vec<String> {
    if !data.is_object() {
        return vec!["Request body must be a JSON object".to_string()];
    }

    let mut errors = Vec::new();

    let attendance = safe_float(data.get("attendance"), INVALID);
    if !(0.0..=100.0).contains(&attendance) {
        errors.push("attendance must be between 0 and 100".to_string());
    }

    let avg_grade = safe_float(data.get("avgGrade"), INVALID);
    if !(0.0..=100.0).contains(&avg_grade) {
        errors.push("avgGrade must be between 0 and 100".to_string());
    }

    let courses_enrolled = safe_int(data.get("coursesEnrolled"), INVALID as i64);
    if courses_enrolled < 0 {
        errors.push("coursesEnrolled must be a non-negative integer".to_string());
    }

    let courses_passed = safe_int(data.get("coursesPassed"), INVALID as i64);
    if courses_passed < 0 {
        errors.push("coursesPassed must be a non-negative integer".to_string());
    }

    // Cross-field rule, only meaningful when both counts are valid.
    if courses_enrolled >= 0 && courses_passed > courses_enrolled {
        errors.push("coursesPassed cannot exceed coursesEnrolled".to_string());
    }

    errors
}

//! Student Record
//!
//! Parsed form of one inbound student payload. Built once per request
//! from untyped JSON (after validation) and immutable afterwards.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::logic::coerce::{safe_float, safe_int, truthy};

/// Raw-field defaults: absent or unparseable values fall back to a
/// median-ish student profile rather than failing the request.
pub const DEFAULT_AGE: i64 = 20;
pub const DEFAULT_COURSE_COUNT: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    /// Model encoding: 1.0 for male, 0.0 otherwise.
    pub fn encode(&self) -> f32 {
        match self {
            Gender::Male => 1.0,
            Gender::Female => 0.0,
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: Option<String>,
    pub age: i64,
    pub gender: Gender,
    pub scholarship: bool,
    pub debtor: bool,
    pub tuition_up_to_date: bool,
    pub courses_enrolled: i64,
    pub courses_passed: i64,
    pub attendance: f64,
    pub avg_grade: f64,
}

impl StudentRecord {
    /// Parse a validated JSON object into a record.
    ///
    /// Field defaults: age 20, gender male, scholarship/debtor off,
    /// tuition up to date, 5 courses enrolled and passed. Attendance and
    /// grade are guaranteed in range by the validator, so their defaults
    /// here never survive a real request.
    pub fn from_raw(data: &Value) -> Self {
        let gender = match data.get("gender") {
            None => Gender::Male,
            Some(v) => {
                let raw = match v {
                    Value::String(s) => s.trim().to_string(),
                    other => other.to_string(),
                };
                if raw.eq_ignore_ascii_case("male") {
                    Gender::Male
                } else {
                    Gender::Female
                }
            }
        };

        Self {
            id: raw_student_id(data),
            age: safe_int(data.get("age"), DEFAULT_AGE),
            gender,
            scholarship: truthy(data.get("scholarship"), false),
            debtor: truthy(data.get("debtor"), false),
            tuition_up_to_date: truthy(data.get("tuitionUpToDate"), true),
            courses_enrolled: safe_int(data.get("coursesEnrolled"), DEFAULT_COURSE_COUNT),
            courses_passed: safe_int(data.get("coursesPassed"), DEFAULT_COURSE_COUNT),
            attendance: safe_float(data.get("attendance"), 0.0),
            avg_grade: safe_float(data.get("avgGrade"), 0.0),
        }
    }

    /// Pass rate with a guarded denominator, used by the calibrator.
    pub fn pass_rate(&self) -> f64 {
        self.courses_passed as f64 / self.courses_enrolled.max(1) as f64
    }
}

/// Resolve the caller-supplied identifier: explicit `id` first, then
/// `student_id`. Numbers are accepted and stringified.
pub fn raw_student_id(data: &Value) -> Option<String> {
    for key in ["id", "student_id"] {
        match data.get(key) {
            Some(Value::String(s)) if !s.is_empty() => return Some(s.clone()),
            Some(Value::Number(n)) => return Some(n.to_string()),
            _ => {}
        }
    }
    None
}

//! Risk Calibrator
//!
//! Blends the network's raw probability with the explicit heuristic
//! score and maps the result onto the 4-tier scale. Deterministic and
//! fully auditable: every term is reported in the breakdown.

use crate::logic::record::StudentRecord;

use super::rules::{
    ATTENDANCE_FLOOR, ATTENDANCE_WEIGHT, CRITICAL_MIN, GRADE_FLOOR, GRADE_WEIGHT,
    HEURISTIC_WEIGHT, HIGH_MIN, MEDIUM_MIN, MODEL_WEIGHT, PASS_RATE_FLOOR, PASS_WEIGHT,
    SOCIO_PENALTY_STEP,
};
use super::types::{RiskBreakdown, RiskLevel};

/// Linear ramp below `floor`: 0 at the floor, 1 at zero, clamped.
fn deficit_penalty(value: f64, floor: f64) -> f64 {
    if value < floor {
        ((floor - value) / floor).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Blend the raw model output with the heuristic risk score.
pub fn calibrate(raw_probability: f64, student: &StudentRecord) -> RiskBreakdown {
    let attendance_penalty = deficit_penalty(student.attendance, ATTENDANCE_FLOOR);
    let grade_penalty = deficit_penalty(student.avg_grade, GRADE_FLOOR);
    let pass_penalty = deficit_penalty(student.pass_rate(), PASS_RATE_FLOOR);

    let mut socio_penalty = 0.0;
    if student.debtor {
        socio_penalty += SOCIO_PENALTY_STEP;
    }
    if !student.tuition_up_to_date {
        socio_penalty += SOCIO_PENALTY_STEP;
    }
    let socio_penalty = socio_penalty.clamp(0.0, 1.0);

    let heuristic_risk = (attendance_penalty * ATTENDANCE_WEIGHT
        + grade_penalty * GRADE_WEIGHT
        + pass_penalty * PASS_WEIGHT
        + socio_penalty)
        .min(1.0);

    let final_probability =
        (raw_probability * MODEL_WEIGHT + heuristic_risk * HEURISTIC_WEIGHT).min(1.0);

    RiskBreakdown {
        attendance_penalty,
        grade_penalty,
        pass_penalty,
        socio_penalty,
        heuristic_risk,
        raw_probability,
        final_probability,
    }
}

/// Map a final probability to its tier. Closed lower bounds, evaluated
/// high to low.
pub fn risk_level(final_probability: f64) -> RiskLevel {
    if final_probability >= CRITICAL_MIN {
        RiskLevel::Critical
    } else if final_probability >= HIGH_MIN {
        RiskLevel::High
    } else if final_probability >= MEDIUM_MIN {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

// ============================================================================
// TESTS
// ============================================================================

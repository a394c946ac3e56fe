//! Static feature vector
//!
//! Non-time-varying attributes, encoded in the order the static branch
//! was trained on.

use crate::logic::record::StudentRecord;

use super::STATIC_FEATURE_COUNT;

fn encode_flag(flag: bool) -> f32 {
    if flag {
        1.0
    } else {
        0.0
    }
}

/// Order: [age, gender, scholarship, debtor, tuition_up_to_date,
/// courses_enrolled, courses_passed].
pub fn static_vector(student: &StudentRecord) -> [f32; STATIC_FEATURE_COUNT] {
    [
        student.age as f32,
        student.gender.encode(),
        encode_flag(student.scholarship),
        encode_flag(student.debtor),
        encode_flag(student.tuition_up_to_date),
        student.courses_enrolled as f32,
        student.courses_passed as f32,
    ]
}

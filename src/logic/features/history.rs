//! Sliding-window histories
//!
//! The model was trained on 15-step weekly sequences. At inference time
//! only the student's current state is known, so both histories hold
//! that state constant across the whole window. The window therefore
//! models "current state held over a trailing period", not a true
//! longitudinal history, and the output stays fully deterministic.

use crate::logic::model::{Scaler, Tokenizer};
use crate::logic::record::StudentRecord;

use super::{NUMERIC_FEATURE_COUNT, WINDOW_LEN};

/// Behavioral band derived from the average grade. Each band maps to a
/// fixed phrase from the training vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BehaviorBand {
    Low,
    Mid,
    High,
}

impl BehaviorBand {
    /// Grade < 50 is Low, > 80 is High, everything else Mid.
    pub fn from_grade(avg_grade: f64) -> Self {
        if avg_grade < 50.0 {
            BehaviorBand::Low
        } else if avg_grade > 80.0 {
            BehaviorBand::High
        } else {
            BehaviorBand::Mid
        }
    }

    /// The phrase the tokenizer was fit on for this band.
    pub fn phrase(&self) -> &'static str {
        match self {
            BehaviorBand::Low => "Struggling with concepts",
            BehaviorBand::Mid => "Regular attendance",
            BehaviorBand::High => "Active participation",
        }
    }
}

/// (attendance, avg_grade) held constant across the window, each step
/// standardized with the training-time scaler.
pub fn numeric_history(
    student: &StudentRecord,
    scaler: &Scaler,
) -> [[f32; NUMERIC_FEATURE_COUNT]; WINDOW_LEN] {
    let step = scaler.transform([student.attendance, student.avg_grade]);
    [step; WINDOW_LEN]
}

/// The band phrase's first vocabulary token repeated across the window
/// (0 when the phrase tokenizes to nothing).
pub fn text_history(student: &StudentRecord, tokenizer: &Tokenizer) -> [i64; WINDOW_LEN] {
    let band = BehaviorBand::from_grade(student.avg_grade);
    let token = tokenizer.first_token(band.phrase());
    [token; WINDOW_LEN]
}

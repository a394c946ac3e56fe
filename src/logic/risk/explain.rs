//! Explanation Engine
//!
//! Rule-based and cumulative: every prediction carries the baseline
//! notes, and each triggered risk factor appends its warning in a fixed
//! order (tuition, pass rate, attendance, grade).

use crate::logic::features::WINDOW_LEN;
use crate::logic::record::StudentRecord;

use super::rules::{ATTENDANCE_FLOOR, GRADE_FLOOR, PASS_RATE_FLOOR};

/// Build the explanation list for one student.
pub fn explanations(student: &StudentRecord) -> Vec<String> {
    let mut notes = vec![
        format!("Analysis based on {}-week behavioral trend.", WINDOW_LEN),
        format!(
            "Dual-modal analysis of grades ({}%) and attendance ({}%).",
            student.avg_grade, student.attendance
        ),
        "Static factors (Financial, Academic History) included.".to_string(),
    ];

    if !student.tuition_up_to_date {
        notes.push(
            "⚠️ Tuition fees not up to date — strongest socioeconomic risk factor.".to_string(),
        );
    }
    if (student.courses_passed as f64) < student.courses_enrolled as f64 * PASS_RATE_FLOOR {
        notes.push("⚠️ Low course pass rate — strong academic risk indicator.".to_string());
    }
    if student.attendance < ATTENDANCE_FLOOR {
        notes.push("⚠️ Low attendance (<60%) — correlated with higher dropout risk.".to_string());
    }
    if student.avg_grade < GRADE_FLOOR {
        notes.push("⚠️ Low average grade (<50%) — significant academic risk factor.".to_string());
    }

    notes
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn student(data: serde_json::Value) -> StudentRecord {
        StudentRecord::from_raw(&data)
    }

    #[test]
    fn test_baseline_notes_always_present() {
        let s = student(json!({
            "attendance": 95, "avgGrade": 90, "tuitionUpToDate": 1,
            "coursesEnrolled": 6, "coursesPassed": 6
        }));
        let notes = explanations(&s);

        assert_eq!(notes.len(), 3);
        assert!(notes[0].contains("15-week"));
        assert!(notes[1].contains("grades (90%)"));
        assert!(notes[1].contains("attendance (95%)"));
        assert!(notes[2].contains("Static factors"));
    }

    #[test]
    fn test_warnings_are_cumulative_and_ordered() {
        let s = student(json!({
            "attendance": 30, "avgGrade": 25, "debtor": 1,
            "tuitionUpToDate": 0, "coursesEnrolled": 6, "coursesPassed": 0
        }));
        let notes = explanations(&s);

        assert_eq!(notes.len(), 7);
        assert!(notes[3].contains("Tuition"));
        assert!(notes[4].contains("pass rate"));
        assert!(notes[5].contains("attendance"));
        assert!(notes[6].contains("grade"));
    }

    #[test]
    fn test_single_warning_emission() {
        let s = student(json!({
            "attendance": 45, "avgGrade": 70, "tuitionUpToDate": 1,
            "coursesEnrolled": 6, "coursesPassed": 6
        }));
        let notes = explanations(&s);

        assert_eq!(notes.len(), 4);
        assert!(notes[3].contains("Low attendance"));
    }

    #[test]
    fn test_pass_rate_warning_threshold() {
        // 3/6 is exactly half: not below, no warning.
        let s = student(json!({
            "attendance": 80, "avgGrade": 70, "tuitionUpToDate": 1,
            "coursesEnrolled": 6, "coursesPassed": 3
        }));
        assert_eq!(explanations(&s).len(), 3);

        // 2/6 is below half.
        let s = student(json!({
            "attendance": 80, "avgGrade": 70, "tuitionUpToDate": 1,
            "coursesEnrolled": 6, "coursesPassed": 2
        }));
        let notes = explanations(&s);
        assert_eq!(notes.len(), 4);
        assert!(notes[3].contains("pass rate"));
    }
}

//! Feature Importance
//!
//! Rankings from the offline model analysis, exposed so the transport
//! layer can serve them without touching the artifacts.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ImportanceEntry {
    pub feature: &'static str,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeatureImportance {
    pub academic: Vec<ImportanceEntry>,
    pub socioeconomic: Vec<ImportanceEntry>,
    pub insight: &'static str,
}

const ACADEMIC: [(&str, f64); 10] = [
    ("Courses Approved (2nd Semester)", 0.1833),
    ("Semester Grades (2nd Semester)", 0.1380),
    ("Courses Approved (1st Semester)", 0.1248),
    ("Admission Grade", 0.1184),
    ("Semester Grades (1st Semester)", 0.1075),
    ("Previous Qualification Grade", 0.0892),
    ("Attendance Rate", 0.0770),
    ("Curricular Units Enrolled (2nd Sem)", 0.0654),
    ("Curricular Units Enrolled (1st Sem)", 0.0543),
    ("Age at Enrollment", 0.0421),
];

const SOCIOECONOMIC: [(&str, f64); 11] = [
    ("Tuition Fees Up to Date", 0.3089),
    ("Course/Program", 0.1227),
    ("Scholarship Holder", 0.1218),
    ("Age at Enrollment", 0.1080),
    ("Mother's Occupation", 0.0570),
    ("Father's Occupation", 0.0498),
    ("Debtor Status", 0.0462),
    ("Mother's Qualification", 0.0415),
    ("Father's Qualification", 0.0380),
    ("Gender", 0.0310),
    ("Marital Status", 0.0271),
];

const INSIGHT: &str = "Tuition fee status is the #1 socioeconomic predictor (30.89%). \
    Course completion rates are the strongest academic predictor (18.33%).";

fn entries(table: &'static [(&'static str, f64)]) -> Vec<ImportanceEntry> {
    table
        .iter()
        .map(|&(feature, weight)| ImportanceEntry { feature, weight })
        .collect()
}

/// Importance rankings, sorted by weight descending within each group.
pub fn feature_importance() -> FeatureImportance {
    FeatureImportance {
        academic: entries(&ACADEMIC),
        socioeconomic: entries(&SOCIOECONOMIC),
        insight: INSIGHT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rankings_sorted_descending() {
        let importance = feature_importance();
        for group in [&importance.academic, &importance.socioeconomic] {
            for pair in group.windows(2) {
                assert!(pair[0].weight >= pair[1].weight);
            }
        }
    }

    #[test]
    fn test_headline_predictors() {
        let importance = feature_importance();
        assert_eq!(importance.socioeconomic[0].feature, "Tuition Fees Up to Date");
        assert_eq!(importance.academic[0].feature, "Courses Approved (2nd Semester)");
    }
}

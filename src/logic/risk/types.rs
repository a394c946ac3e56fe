//! Risk Types
//!
//! Data structures only; the scoring logic lives in `calibrate`.

use serde::{Deserialize, Serialize};

/// Risk tiers, ordered. The string forms are the stable public
/// vocabulary shared with every downstream consumer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
        }
    }

    pub fn severity_level(&self) -> u8 {
        match self {
            RiskLevel::Low => 0,
            RiskLevel::Medium => 1,
            RiskLevel::High => 2,
            RiskLevel::Critical => 3,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Breakdown of how the final probability was calculated. Every term is
/// already clamped; `final_probability` is the blended, unrounded value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RiskBreakdown {
    pub attendance_penalty: f64,
    pub grade_penalty: f64,
    pub pass_penalty: f64,
    pub socio_penalty: f64,
    pub heuristic_risk: f64,
    pub raw_probability: f64,
    pub final_probability: f64,
}

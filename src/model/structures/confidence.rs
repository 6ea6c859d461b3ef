use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::model::constants::{CONFIDENCE_HIGH_THRESHOLD, CONFIDENCE_MEDIUM_THRESHOLD};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum ConfidenceLabel {
    Low,
    Medium,
    High
}

impl ConfidenceLabel {
    pub fn from_score(score: u8) -> ConfidenceLabel {
        if score >= CONFIDENCE_HIGH_THRESHOLD {
            ConfidenceLabel::High
        } else if score >= CONFIDENCE_MEDIUM_THRESHOLD {
            ConfidenceLabel::Medium
        } else {
            ConfidenceLabel::Low
        }
    }
}

/// Per-signal contributions, kept so callers can explain a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceBreakdown {
    pub sample_size: i32,
    pub variance: i32,
    pub recency: i32,
    pub win_rate: i32,
    pub season_penalty: i32,
    pub shield: i32
}

impl ConfidenceBreakdown {
    pub fn total(&self) -> i32 {
        self.sample_size + self.variance + self.recency + self.win_rate + self.shield - self.season_penalty
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceScore {
    pub score: u8,
    pub label: ConfidenceLabel,
    pub breakdown: ConfidenceBreakdown
}

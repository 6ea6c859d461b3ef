use serde::{Deserialize, Serialize};
use strum_macros::{Display, IntoStaticStr};

/// Result of inverting one observed result. `None` marks an indeterminate inverse:
/// the implied expected score fell outside (0, 1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub implied_opponent_rating: Option<f64>,
    pub predicted_delta: Option<i32>
}

impl PredictionResult {
    pub fn indeterminate() -> PredictionResult {
        PredictionResult {
            implied_opponent_rating: None,
            predicted_delta: None
        }
    }

    pub fn is_indeterminate(&self) -> bool {
        self.predicted_delta.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, IntoStaticStr)]
pub enum SymmetryWarning {
    #[strum(serialize = "loss-mismatch")]
    #[serde(rename = "loss-mismatch")]
    LossMismatch,
    #[strum(serialize = "win-mismatch")]
    #[serde(rename = "win-mismatch")]
    WinMismatch
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymmetryReport {
    /// Loss delta predicted from the observed win
    pub predicted_loss: Option<i32>,
    /// Win delta predicted from the observed loss
    pub predicted_win: Option<i32>,
    pub warnings: Vec<SymmetryWarning>
}

impl SymmetryReport {
    pub fn is_consistent(&self) -> bool {
        self.warnings.is_empty()
    }
}

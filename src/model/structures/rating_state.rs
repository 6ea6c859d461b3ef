use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::model::structures::adjustment_kind::AdjustmentKind;

/// A running skill estimate. Callers own storage; the engine only returns new values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingState {
    pub rating: f64,
    /// Uncertainty of `rating`, never below 0.8
    pub deviation: f64,
    /// Rate of change, never below 0.04
    pub volatility: f64
}

/// One step of an estimate's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingAdjustment {
    pub adjustment_kind: AdjustmentKind,
    pub rating_before: f64,
    pub rating_after: f64,
    pub deviation_before: f64,
    pub deviation_after: f64,
    pub volatility_before: f64,
    pub volatility_after: f64,
    pub expected_delta: i32,
    pub surprise: f64,
    pub timestamp: Option<DateTime<FixedOffset>>
}

impl RatingAdjustment {
    pub fn rating_delta(&self) -> f64 {
        self.rating_after - self.rating_before
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingEstimate {
    pub state: RatingState,
    pub adjustments: Vec<RatingAdjustment>
}

impl RatingEstimate {
    /// Highest rating reached over the folded history
    pub fn peak_rating(&self) -> f64 {
        self.adjustments
            .iter()
            .map(|a| a.rating_after)
            .fold(self.state.rating, f64::max)
    }
}

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::model::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum MatchOutcome {
    Win,
    Loss,
    Draw
}

impl MatchOutcome {
    /// Outcome score used by the logistic formulas. Draws are not decisive.
    pub fn decisive_score(self) -> Option<f64> {
        match self {
            MatchOutcome::Win => Some(1.0),
            MatchOutcome::Loss => Some(0.0),
            MatchOutcome::Draw => None
        }
    }

    pub fn opposite(self) -> MatchOutcome {
        match self {
            MatchOutcome::Win => MatchOutcome::Loss,
            MatchOutcome::Loss => MatchOutcome::Win,
            MatchOutcome::Draw => MatchOutcome::Draw
        }
    }
}

/// One ranked match as seen by the player. A shielded loss displays `point_delta` 0
/// but still counts as a real loss internally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub outcome: MatchOutcome,
    pub point_delta: i32,
    #[serde(default)]
    pub shielded: bool,
    #[serde(default)]
    pub timestamp: Option<DateTime<FixedOffset>>
}

impl MatchRecord {
    pub fn new(outcome: MatchOutcome, point_delta: i32, shielded: bool) -> MatchRecord {
        MatchRecord {
            outcome,
            point_delta,
            shielded,
            timestamp: None
        }
    }

    pub fn win(point_delta: i32) -> MatchRecord {
        MatchRecord::new(MatchOutcome::Win, point_delta, false)
    }

    pub fn loss(point_delta: i32) -> MatchRecord {
        MatchRecord::new(MatchOutcome::Loss, point_delta, false)
    }

    pub fn shielded_loss() -> MatchRecord {
        MatchRecord::new(MatchOutcome::Loss, 0, true)
    }

    pub fn draw(point_delta: i32) -> MatchRecord {
        MatchRecord::new(MatchOutcome::Draw, point_delta, false)
    }

    pub fn at(mut self, timestamp: DateTime<FixedOffset>) -> MatchRecord {
        self.timestamp = Some(timestamp);
        self
    }

    /// Wins must gain points, losses must not, and only losses can be shielded.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.shielded && self.outcome != MatchOutcome::Loss {
            return Err(ValidationError::ShieldOnNonLoss(self.outcome));
        }

        let malformed = match self.outcome {
            MatchOutcome::Win => self.point_delta <= 0,
            MatchOutcome::Loss => self.point_delta > 0,
            MatchOutcome::Draw => false
        };

        if malformed {
            return Err(ValidationError::MalformedMatch {
                outcome: self.outcome,
                point_delta: self.point_delta
            });
        }

        Ok(())
    }

    /// The delta that counts for rating purposes
    pub fn effective_delta(&self, shielded_delta: i32) -> i32 {
        if self.shielded {
            shielded_delta
        } else {
            self.point_delta
        }
    }
}

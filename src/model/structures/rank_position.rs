use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::{
    constants::{MAX_DISPLAY_POINTS, MAX_LADDER_INDEX},
    error::ValidationError,
    structures::tier::{Rung, Tier}
};

/// A player's place on the ladder.
///
/// `display_points` is the 0..=99 progress within the rung, except on the terminal
/// Nightmare rung where it is an unbounded, non-negative point pool.
/// Use [`RankPosition::reported_points`] for anything shown to a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankPosition {
    pub ladder_index: u8,
    pub display_points: i32
}

impl RankPosition {
    pub fn new(ladder_index: u8, display_points: i32) -> Result<RankPosition, ValidationError> {
        if ladder_index > MAX_LADDER_INDEX {
            return Err(ValidationError::LadderIndexOutOfRange(ladder_index as i64));
        }

        let in_range = if ladder_index == MAX_LADDER_INDEX {
            display_points >= 0
        } else {
            (0..=MAX_DISPLAY_POINTS).contains(&display_points)
        };

        if !in_range {
            return Err(ValidationError::PointsOutOfRange {
                ladder_index,
                points: display_points
            });
        }

        Ok(RankPosition {
            ladder_index,
            display_points
        })
    }

    /// Builds a position from a label such as "Gold 2" plus its points.
    pub fn from_label(label: &str, display_points: i32) -> Result<RankPosition, ValidationError> {
        let rung: Rung = label.parse()?;
        RankPosition::new(rung.ladder_index(), display_points)
    }

    pub fn bottom() -> RankPosition {
        RankPosition {
            ladder_index: 0,
            display_points: 0
        }
    }

    pub fn rung(&self) -> Rung {
        // ladder_index is kept within 0..=20 by every constructor and ladder operation
        Rung::from_ladder_index(self.ladder_index.min(MAX_LADDER_INDEX)).unwrap_or(Rung {
            tier: Tier::Nightmare,
            division: 1
        })
    }

    pub fn tier(&self) -> Tier {
        self.rung().tier
    }

    pub fn is_terminal(&self) -> bool {
        self.ladder_index == MAX_LADDER_INDEX
    }

    /// Points clamped into 0..=99 for display
    pub fn reported_points(&self) -> i32 {
        self.display_points.clamp(0, MAX_DISPLAY_POINTS)
    }
}

impl fmt::Display for RankPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} pts)", self.rung(), self.display_points)
    }
}

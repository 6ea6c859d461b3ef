use serde::{Deserialize, Serialize};

use crate::model::{
    constants::{BASELINE_RATINGS, MAX_DISPLAY_POINTS, MAX_LADDER_INDEX, POINTS_PER_RUNG},
    structures::rank_position::RankPosition
};

/// Outcome of a single-hop ladder move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LadderMove {
    pub position: RankPosition,
    pub promoted: bool,
    pub demoted: bool
}

/// Outcome of a multi-rung carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifetimeMove {
    pub position: RankPosition,
    pub rungs_promoted: u32,
    pub rungs_demoted: u32
}

/// Flat baseline rating of a rung. Indices past the top read the top entry.
pub fn baseline_rating(ladder_index: u8) -> f64 {
    BASELINE_RATINGS[ladder_index.min(MAX_LADDER_INDEX) as usize] as f64
}

/// Expected rating for a position, interpolated between this rung's baseline and the next one's
/// by how far through the rung the player is.
pub fn interpolated_rating(ladder_index: u8, display_points: i32) -> f64 {
    let index = ladder_index.min(MAX_LADDER_INDEX);
    let next = (index + 1).min(MAX_LADDER_INDEX);
    let low = baseline_rating(index);
    let high = baseline_rating(next);
    let weight = (display_points as f64 / POINTS_PER_RUNG as f64).clamp(0.0, 1.0);

    low + (high - low) * weight
}

pub fn position_rating(position: &RankPosition) -> f64 {
    interpolated_rating(position.ladder_index, position.display_points)
}

/// # Single-hop advance
///
/// Applies one game's delta with at most one promotion or demotion.
/// - Crossing 100 moves up one rung with the remainder, capped at 99 below the top.
/// - Dropping below 0 moves down one rung, borrowing 100.
/// - Nightmare keeps an unbounded pool (saturating at `i32::MAX`) and never promotes.
/// - Bronze 1 floors at 0 points.
pub fn advance_one_step(position: RankPosition, delta: i32) -> LadderMove {
    let mut index = position.ladder_index.min(MAX_LADDER_INDEX);
    let mut points = position.display_points.saturating_add(delta);
    let mut promoted = false;
    let mut demoted = false;

    if points >= POINTS_PER_RUNG && index < MAX_LADDER_INDEX {
        points -= POINTS_PER_RUNG;
        index += 1;
        promoted = true;
    } else if points < 0 && index > 0 {
        points += POINTS_PER_RUNG;
        index -= 1;
        demoted = true;
    }

    let points = if index == MAX_LADDER_INDEX {
        points.max(0)
    } else {
        points.clamp(0, MAX_DISPLAY_POINTS)
    };

    LadderMove {
        position: RankPosition {
            ladder_index: index,
            display_points: points
        },
        promoted,
        demoted
    }
}

/// Points from the bottom of the ladder to this position
pub fn lifetime_total(position: &RankPosition) -> i64 {
    position.ladder_index as i64 * POINTS_PER_RUNG as i64 + position.display_points as i64
}

/// Inverse of [`lifetime_total`]. Totals past Emerald land in the Nightmare pool;
/// negative totals floor at Bronze 1 with 0 points.
pub fn from_lifetime_total(total: i64) -> RankPosition {
    if total <= 0 {
        return RankPosition::bottom();
    }

    let per_rung = POINTS_PER_RUNG as i64;
    let index = (total / per_rung).min(MAX_LADDER_INDEX as i64);
    let points = total - index * per_rung;

    RankPosition {
        ladder_index: index as u8,
        display_points: points.min(i32::MAX as i64) as i32
    }
}

/// # Multi-rung carry
///
/// Applies a delta of any size, carrying the remainder across every rung boundary it crosses.
///
/// Emerald to Nightmare is one-way for carries: anything that reaches Nightmare stays in its
/// unbounded pool. Coming back down only happens once that pool goes negative, borrowing 100
/// per rung like any other boundary.
pub fn carry_lifetime_delta(position: RankPosition, delta: i64) -> LifetimeMove {
    let per_rung = POINTS_PER_RUNG as i64;
    let mut index = position.ladder_index.min(MAX_LADDER_INDEX);
    let mut points = position.display_points as i64 + delta;
    let mut rungs_promoted = 0;
    let mut rungs_demoted = 0;

    while points >= per_rung && index < MAX_LADDER_INDEX {
        points -= per_rung;
        index += 1;
        rungs_promoted += 1;
    }

    while points < 0 && index > 0 {
        points += per_rung;
        index -= 1;
        rungs_demoted += 1;
    }

    LifetimeMove {
        position: RankPosition {
            ladder_index: index,
            display_points: points.clamp(0, i32::MAX as i64) as i32
        },
        rungs_promoted,
        rungs_demoted
    }
}

/// The signed point total separating two snapshots, however many rungs apart.
/// `carry_lifetime_delta(from, result)` lands on `to`.
pub fn reconstruct_lifetime_delta(from: &RankPosition, to: &RankPosition) -> i64 {
    lifetime_total(to) - lifetime_total(from)
}

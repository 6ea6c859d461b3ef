use tracing::debug;

use crate::{
    config::EngineConfig,
    model::{
        constants::{
            BASE_DRAW_DELTA, BASE_LOSS_DELTA, BASE_WIN_DELTA, BLENDED_SEASON_DEVIATION, DECISIVE_RATING_WEIGHT,
            DEFAULT_VOLATILITY, DEVIATION_DECAY, DEVIATION_FLOOR, DEVIATION_SURPRISE_WEIGHT, DIFFICULTY_MAX,
            DIFFICULTY_MIN, DIFFICULTY_PIVOT_RATING, DRAW_RATING_WEIGHT, KNOWN_PRIOR_VOLATILITY, MIN_LOSS_RATING_DROP,
            MIN_WIN_RATING_GAIN, NEW_SEASON_DEVIATION, RETURNING_DEVIATION, SURPRISE_SCALE, VOLATILITY_FLOOR,
            VOLATILITY_SURPRISE_WEIGHT
        },
        error::ValidationError,
        ladder::position_rating,
        structures::{
            adjustment_kind::AdjustmentKind,
            match_record::{MatchOutcome, MatchRecord},
            rank_position::RankPosition,
            rating_state::{RatingAdjustment, RatingEstimate, RatingState}
        }
    }
};

/// Harder ladders (lower ratings relative to the pivot) pay out more per game.
pub fn difficulty_multiplier(rating: f64) -> f64 {
    (DIFFICULTY_PIVOT_RATING / rating).clamp(DIFFICULTY_MIN, DIFFICULTY_MAX)
}

fn base_delta(outcome: MatchOutcome) -> f64 {
    match outcome {
        MatchOutcome::Win => BASE_WIN_DELTA,
        MatchOutcome::Loss => BASE_LOSS_DELTA,
        MatchOutcome::Draw => BASE_DRAW_DELTA
    }
}

/// The point delta a player at `rating` should see for `outcome`
pub fn expected_delta(outcome: MatchOutcome, rating: f64) -> i32 {
    (base_delta(outcome) * difficulty_multiplier(rating)).round() as i32
}

/// How far an observed delta strays from the expected one, in units of 20 points
pub fn surprise(effective_delta: i32, expected_delta: i32) -> f64 {
    (effective_delta - expected_delta).abs() as f64 / SURPRISE_SCALE
}

pub struct RatingEstimator {
    pub config: EngineConfig
}

impl Default for RatingEstimator {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl RatingEstimator {
    pub fn new(config: EngineConfig) -> RatingEstimator {
        RatingEstimator { config }
    }

    /// Seeds an estimate from the player's current rank.
    ///
    /// A new season widens the deviation. A known prior-season rating lowers volatility and,
    /// at a season reset, is averaged with the rank-derived rating.
    pub fn initialize(
        &self,
        position: &RankPosition,
        is_new_season: bool,
        previous_rating: Option<f64>
    ) -> RatingState {
        let rank_rating = position_rating(position);

        let volatility = match previous_rating {
            Some(_) => KNOWN_PRIOR_VOLATILITY,
            None => DEFAULT_VOLATILITY
        };

        match (is_new_season, previous_rating) {
            (true, Some(previous)) => RatingState {
                rating: (previous + rank_rating) / 2.0,
                deviation: BLENDED_SEASON_DEVIATION,
                volatility
            },
            (true, None) => RatingState {
                rating: rank_rating,
                deviation: NEW_SEASON_DEVIATION,
                volatility
            },
            (false, _) => RatingState {
                rating: rank_rating,
                deviation: RETURNING_DEVIATION,
                volatility
            }
        }
    }

    /// Folds one match into the estimate. Total over all numeric input; validation is the
    /// caller's job (see [`RatingEstimator::estimate_rating`]).
    pub fn fold(&self, state: &RatingState, record: &MatchRecord) -> RatingState {
        self.fold_with_adjustment(state, record).0
    }

    fn fold_with_adjustment(&self, state: &RatingState, record: &MatchRecord) -> (RatingState, RatingAdjustment) {
        let effective_delta = record.effective_delta(self.config.shielded_delta);
        let expected = expected_delta(record.outcome, state.rating);
        let surprise = surprise(effective_delta, expected);

        let rating_change = match record.outcome {
            MatchOutcome::Win => (record.point_delta as f64 * DECISIVE_RATING_WEIGHT).max(MIN_WIN_RATING_GAIN),
            MatchOutcome::Loss => (effective_delta as f64 * DECISIVE_RATING_WEIGHT).min(MIN_LOSS_RATING_DROP),
            MatchOutcome::Draw => record.point_delta as f64 * DRAW_RATING_WEIGHT
        };

        let next = RatingState {
            rating: state.rating + rating_change,
            deviation: (state.deviation - DEVIATION_DECAY + surprise * DEVIATION_SURPRISE_WEIGHT).max(DEVIATION_FLOOR),
            volatility: (state.volatility + surprise * VOLATILITY_SURPRISE_WEIGHT).max(VOLATILITY_FLOOR)
        };

        debug!(
            outcome = %record.outcome,
            effective_delta,
            expected,
            surprise,
            rating = next.rating,
            "Folded match into rating estimate"
        );

        let adjustment = RatingAdjustment {
            adjustment_kind: if record.shielded {
                AdjustmentKind::Shielded
            } else {
                AdjustmentKind::Match
            },
            rating_before: state.rating,
            rating_after: next.rating,
            deviation_before: state.deviation,
            deviation_after: next.deviation,
            volatility_before: state.volatility,
            volatility_after: next.volatility,
            expected_delta: expected,
            surprise,
            timestamp: record.timestamp
        };

        (next, adjustment)
    }

    /// # Rating estimation
    ///
    /// Seeds a state from the current rank and folds the match history into it in order.
    /// Every match is validated before anything is folded, so a malformed record anywhere
    /// in the history rejects the whole estimate.
    pub fn estimate_rating(
        &self,
        position: &RankPosition,
        is_new_season: bool,
        previous_rating: Option<f64>,
        history: &[MatchRecord]
    ) -> Result<RatingEstimate, ValidationError> {
        for record in history {
            record.validate()?;
        }

        let mut state = self.initialize(position, is_new_season, previous_rating);
        let mut adjustments = Vec::with_capacity(history.len() + 1);
        adjustments.push(RatingAdjustment {
            adjustment_kind: AdjustmentKind::Initial,
            rating_before: state.rating,
            rating_after: state.rating,
            deviation_before: state.deviation,
            deviation_after: state.deviation,
            volatility_before: state.volatility,
            volatility_after: state.volatility,
            expected_delta: 0,
            surprise: 0.0,
            timestamp: None
        });

        for record in history {
            let (next, adjustment) = self.fold_with_adjustment(&state, record);
            adjustments.push(adjustment);
            state = next;
        }

        Ok(RatingEstimate { state, adjustments })
    }
}

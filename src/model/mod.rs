//! # Rank ladder and rating engine
//!
//! Pure computations over explicit inputs. Nothing here performs I/O or holds state between
//! calls, so independent players or scenarios can be evaluated in parallel freely.
//!
//! Dependency order:
//! 1. [`ladder`]: rung table, baseline ratings and point carry arithmetic
//! 2. [`rating_estimator`]: running rating / deviation / volatility from match history
//! 3. [`counter_predictor`]: implied opponent rating and opposite-outcome delta
//! 4. [`progression_simulator`]: multi-game ladder trajectories
//! 5. [`confidence`]: trust heuristic over raw history

pub mod confidence;
pub mod constants;
pub mod counter_predictor;
pub mod error;
pub mod ladder;
pub mod progression_simulator;
pub mod rating_estimator;
pub mod structures;

pub use confidence::score_confidence;
pub use counter_predictor::{expected_score, implied_opponent_rating, CounterPredictor};
pub use error::ValidationError;
pub use ladder::{
    advance_one_step, carry_lifetime_delta, from_lifetime_total, interpolated_rating, lifetime_total,
    reconstruct_lifetime_delta
};
pub use progression_simulator::{BernoulliOutcomes, FixedOutcomes, OutcomeSource, ProgressionSimulator};
pub use rating_estimator::RatingEstimator;

use thiserror::Error;

use crate::model::structures::match_record::MatchOutcome;

/// Rejections raised at the engine boundary. Numeric saturation at the top and
/// bottom of the ladder is not an error and never produces one of these.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Unknown tier name: {0}")]
    UnknownTier(String),

    #[error("Malformed rank label: {0:?}")]
    MalformedRank(String),

    #[error("Tier {tier} has no division {division}")]
    InvalidDivision { tier: String, division: u8 },

    #[error("Ladder index {0} is outside 0..=20")]
    LadderIndexOutOfRange(i64),

    #[error("Display points {points} are out of range for ladder index {ladder_index}")]
    PointsOutOfRange { ladder_index: u8, points: i32 },

    #[error("Malformed match record: {outcome:?} with point delta {point_delta}")]
    MalformedMatch { outcome: MatchOutcome, point_delta: i32 },

    #[error("Only a loss can be shielded (got {0:?})")]
    ShieldOnNonLoss(MatchOutcome),

    #[error("Simulation game count {games} is outside 1..={max}")]
    GameCountOutOfRange { games: u32, max: u32 },

    #[error("Win rate {0} is outside [0, 1]")]
    WinRateOutOfRange(f64),

    #[error("Average win delta must be positive and average loss delta negative (got {win} / {loss})")]
    InvalidAverageDeltas { win: f64, loss: f64 },

    #[error("Counter prediction needs a win or a loss, not {0:?}")]
    NonDecisiveOutcome(MatchOutcome),

    #[error("K-factor must be positive (got {0})")]
    InvalidKFactor(f64),

    #[error("Projection needs at least one trial")]
    NoTrials,

    #[error("Invalid engine configuration: {field} = {value}")]
    InvalidConfig { field: &'static str, value: f64 }
}

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    config::EngineConfig,
    error::AppError,
    model::{
        confidence::score_confidence,
        constants::{BASE_LOSS_DELTA, BASE_WIN_DELTA},
        counter_predictor::CounterPredictor,
        progression_simulator::ProgressionSimulator,
        rating_estimator::RatingEstimator,
        structures::{
            confidence::ConfidenceScore,
            match_record::{MatchOutcome, MatchRecord},
            prediction::SymmetryReport,
            rank_position::RankPosition,
            rating_state::RatingEstimate,
            simulation::{ProjectionSummary, SimulationParams}
        }
    },
    provider::{CurrentRank, MatchHistoryProvider, RankProvider}
};

/// Observed per-outcome behaviour of a history
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryAverages {
    pub win_rate: f64,
    pub avg_win_delta: f64,
    pub avg_loss_delta: f64
}

/// Averages over decisive matches. Shielded losses count at `shielded_delta`.
/// Falls back to an even win rate and the base deltas when a side has no matches.
pub fn history_averages(history: &[MatchRecord], shielded_delta: i32) -> HistoryAverages {
    let wins: Vec<f64> = history
        .iter()
        .filter(|m| m.outcome == MatchOutcome::Win)
        .map(|m| m.point_delta as f64)
        .collect();
    let losses: Vec<f64> = history
        .iter()
        .filter(|m| m.outcome == MatchOutcome::Loss)
        .map(|m| m.effective_delta(shielded_delta) as f64)
        .collect();

    let decisive = wins.len() + losses.len();
    let mean = |values: &[f64], fallback: f64| {
        if values.is_empty() {
            fallback
        } else {
            values.iter().sum::<f64>() / values.len() as f64
        }
    };

    HistoryAverages {
        win_rate: if decisive == 0 {
            0.5
        } else {
            wins.len() as f64 / decisive as f64
        },
        avg_win_delta: mean(&wins, BASE_WIN_DELTA),
        // a history of zero-point losses still needs a negative average
        avg_loss_delta: mean(&losses, BASE_LOSS_DELTA).min(-1.0)
    }
}

pub fn simulation_params(rank: &CurrentRank, rating: f64, averages: &HistoryAverages, games: u32) -> SimulationParams {
    SimulationParams {
        rating,
        start: rank.position,
        win_rate: averages.win_rate,
        avg_win_delta: averages.avg_win_delta.max(1.0),
        avg_loss_delta: averages.avg_loss_delta,
        games
    }
}

/// Most recent unshielded win and loss deltas, if both exist
pub fn latest_decisive_deltas(history: &[MatchRecord]) -> Option<(i32, i32)> {
    let win = history.iter().rev().find(|m| m.outcome == MatchOutcome::Win)?;
    let loss = history
        .iter()
        .rev()
        .find(|m| m.outcome == MatchOutcome::Loss && !m.shielded)?;

    Some((win.point_delta, loss.point_delta))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerReport {
    pub player: String,
    pub rank: String,
    pub position: RankPosition,
    pub estimate: RatingEstimate,
    pub confidence: ConfidenceScore,
    pub averages: HistoryAverages,
    pub symmetry: Option<SymmetryReport>,
    pub projection: ProjectionSummary
}

pub struct ReportOptions {
    pub games: u32,
    pub trials: u32,
    pub seed: u64,
    pub show_progress: bool
}

/// Everything the engine can say about one player, from the collaborators' data
pub fn build_report<P: MatchHistoryProvider + RankProvider>(
    provider: &P,
    player: &str,
    config: &EngineConfig,
    options: &ReportOptions
) -> Result<PlayerReport, AppError> {
    let rank = provider.current_rank(player)?;
    let history = provider.match_history(player)?;
    info!("Building report for {} at {} over {} match(es)", player, rank.position, history.len());

    let estimate = RatingEstimator::new(*config).estimate_rating(
        &rank.position,
        rank.is_new_season,
        rank.previous_rating,
        &history
    )?;
    let confidence = score_confidence(&history, rank.is_new_season, config);
    let averages = history_averages(&history, config.shielded_delta);

    let symmetry = match latest_decisive_deltas(&history) {
        Some((win, loss)) => {
            Some(CounterPredictor::new(*config).check_symmetry(win, loss, estimate.state.rating, config.k_factor)?)
        }
        None => None
    };

    let params = simulation_params(&rank, estimate.state.rating, &averages, options.games);
    let projection = ProgressionSimulator::new(*config).project_progression(
        &params,
        options.trials,
        options.seed,
        options.show_progress
    )?;

    Ok(PlayerReport {
        player: player.to_string(),
        rank: rank.position.rung().to_string(),
        position: rank.position,
        estimate,
        confidence,
        averages,
        symmetry,
        projection
    })
}

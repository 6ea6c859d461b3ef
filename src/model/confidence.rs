use itertools::Itertools;

use crate::{
    config::EngineConfig,
    model::{
        constants::{
            SEASON_CONTEXT_PENALTY, SHIELD_BONUS, SPARSE_SAMPLE_CAP, SPARSE_SAMPLE_MATCHES, WIN_RATE_BAND_MIN_MATCHES
        },
        structures::{
            confidence::{ConfidenceBreakdown, ConfidenceLabel, ConfidenceScore},
            match_record::{MatchOutcome, MatchRecord}
        }
    }
};

fn sample_size_component(n: usize) -> i32 {
    match n {
        n if n >= 8 => 40,
        n if n >= 5 => 30,
        n if n >= 3 => 20,
        _ => 10
    }
}

/// Population variance of the absolute, shield-adjusted deltas. Empty samples have none.
pub fn delta_variance(history: &[MatchRecord], shielded_delta: i32) -> f64 {
    if history.is_empty() {
        return 0.0;
    }

    let values = history
        .iter()
        .map(|m| m.effective_delta(shielded_delta).abs() as f64)
        .collect_vec();
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;

    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n
}

fn win_rate_component(history: &[MatchRecord]) -> i32 {
    if history.len() < WIN_RATE_BAND_MIN_MATCHES {
        return 0;
    }

    let wins = history.iter().filter(|m| m.outcome == MatchOutcome::Win).count();
    let win_rate = wins as f64 / history.len() as f64;

    if (0.4..=0.7).contains(&win_rate) {
        15
    } else if (0.3..=0.8).contains(&win_rate) {
        10
    } else {
        5
    }
}

/// # Prediction confidence
///
/// A 0..=100 heuristic for how far a prediction built from `history` can be trusted.
/// Larger, steadier, more recent samples with a believable win rate score higher.
/// Samples of fewer than three matches never score above 40.
pub fn score_confidence(history: &[MatchRecord], is_new_season: bool, config: &EngineConfig) -> ConfidenceScore {
    let variance = delta_variance(history, config.shielded_delta);

    let breakdown = ConfidenceBreakdown {
        sample_size: sample_size_component(history.len()),
        variance: if variance < config.low_variance_threshold {
            30
        } else if variance < config.medium_variance_threshold {
            20
        } else {
            10
        },
        recency: if is_new_season { 10 } else { 15 },
        win_rate: win_rate_component(history),
        season_penalty: SEASON_CONTEXT_PENALTY,
        shield: if history.iter().any(|m| m.shielded) {
            SHIELD_BONUS
        } else {
            0
        }
    };

    let mut total = breakdown.total();
    if history.len() < SPARSE_SAMPLE_MATCHES {
        total = total.min(SPARSE_SAMPLE_CAP);
    }

    let score = total.clamp(0, 100) as u8;

    ConfidenceScore {
        score,
        label: ConfidenceLabel::from_score(score),
        breakdown
    }
}

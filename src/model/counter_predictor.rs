use tracing::warn;

use crate::{
    config::EngineConfig,
    model::{
        constants::LOGISTIC_SCALE,
        error::ValidationError,
        structures::{
            match_record::{MatchOutcome, MatchRecord},
            prediction::{PredictionResult, SymmetryReport, SymmetryWarning}
        }
    }
};

/// Logistic win probability of `a` against `b`. `expected_score(a, b) == 1 - expected_score(b, a)`.
pub fn expected_score(a: f64, b: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((b - a) / LOGISTIC_SCALE))
}

fn validate_k(k: f64) -> Result<(), ValidationError> {
    if !(k > 0.0 && k.is_finite()) {
        return Err(ValidationError::InvalidKFactor(k));
    }

    Ok(())
}

fn outcome_score(outcome: MatchOutcome) -> Result<f64, ValidationError> {
    outcome
        .decisive_score()
        .ok_or(ValidationError::NonDecisiveOutcome(outcome))
}

/// Inverts one observed result into the opponent rating that would have produced it.
///
/// Returns `None` (indeterminate) when the implied expected score is not strictly inside (0, 1).
pub fn implied_opponent_rating(
    player_rating: f64,
    observed_delta: f64,
    observed_outcome_score: f64,
    k: f64
) -> Option<f64> {
    let expected = observed_outcome_score - observed_delta / k;
    if !(expected > 0.0 && expected < 1.0) {
        return None;
    }

    Some(player_rating + LOGISTIC_SCALE * (1.0 / expected - 1.0).log10())
}

pub struct CounterPredictor {
    pub config: EngineConfig
}

impl Default for CounterPredictor {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl CounterPredictor {
    pub fn new(config: EngineConfig) -> CounterPredictor {
        CounterPredictor { config }
    }

    /// Predicts the delta of the opposite outcome against the same implied opponent.
    ///
    /// Errors on a Draw, a non-positive `k`, or an observation that breaks the match rules (a win
    /// that did not gain points, a loss that did). An impossible inverse is an indeterminate
    /// [`PredictionResult`], not an error.
    pub fn predict_counter_delta(
        &self,
        known_delta: i32,
        known_outcome: MatchOutcome,
        player_rating: f64,
        k: f64
    ) -> Result<PredictionResult, ValidationError> {
        validate_k(k)?;
        let known_score = outcome_score(known_outcome)?;
        let counter_score = outcome_score(known_outcome.opposite())?;
        MatchRecord::new(known_outcome, known_delta, false).validate()?;

        let opponent = match implied_opponent_rating(player_rating, known_delta as f64, known_score, k) {
            Some(opponent) => opponent,
            None => return Ok(PredictionResult::indeterminate())
        };

        let expected = expected_score(player_rating, opponent);
        let counter = (counter_score - expected) * k;

        Ok(PredictionResult {
            implied_opponent_rating: Some(opponent),
            predicted_delta: Some(counter.round() as i32)
        })
    }

    /// Same as [`CounterPredictor::predict_counter_delta`] with the configured k-factor
    pub fn predict_with_default_k(
        &self,
        known_delta: i32,
        known_outcome: MatchOutcome,
        player_rating: f64
    ) -> Result<PredictionResult, ValidationError> {
        self.predict_counter_delta(known_delta, known_outcome, player_rating, self.config.k_factor)
    }

    /// # Symmetry check
    ///
    /// Predicts the loss delta from the observed win and the win delta from the observed loss,
    /// flagging each side whose prediction is more than the configured tolerance away from
    /// what was observed. A flag points at noisy or unrepresentative input, not at a bug.
    pub fn check_symmetry(
        &self,
        win_delta: i32,
        loss_delta: i32,
        player_rating: f64,
        k: f64
    ) -> Result<SymmetryReport, ValidationError> {
        let predicted_loss = self
            .predict_counter_delta(win_delta, MatchOutcome::Win, player_rating, k)?
            .predicted_delta;
        let predicted_win = self
            .predict_counter_delta(loss_delta, MatchOutcome::Loss, player_rating, k)?
            .predicted_delta;

        let tolerance = self.config.symmetry_tolerance;
        let mut warnings = Vec::new();

        if let Some(predicted) = predicted_loss {
            if (predicted - loss_delta).abs() > tolerance {
                warnings.push(SymmetryWarning::LossMismatch);
            }
        }

        if let Some(predicted) = predicted_win {
            if (predicted - win_delta).abs() > tolerance {
                warnings.push(SymmetryWarning::WinMismatch);
            }
        }

        if !warnings.is_empty() {
            warn!(
                win_delta,
                loss_delta,
                ?predicted_loss,
                ?predicted_win,
                "Observed deltas are not mutually consistent"
            );
        }

        Ok(SymmetryReport {
            predicted_loss,
            predicted_win,
            warnings
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const K: f64 = 32.0;

    #[test]
    fn test_expected_score_even() {
        assert_abs_diff_eq!(expected_score(1500.0, 1500.0), 0.5);
    }

    #[test]
    fn test_expected_score_symmetric() {
        for (a, b) in [(1500.0, 1700.0), (2100.0, 900.0), (0.0, 2500.0)] {
            assert_abs_diff_eq!(expected_score(a, b), 1.0 - expected_score(b, a), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_expected_score_400_gap() {
        assert_abs_diff_eq!(expected_score(1900.0, 1500.0), 10.0 / 11.0, epsilon = 1e-12);
    }

    #[test]
    fn test_implied_opponent_even_match() {
        // A win worth k/2 means an even matchup
        let opponent = implied_opponent_rating(1800.0, 16.0, 1.0, K).unwrap();
        assert_abs_diff_eq!(opponent, 1800.0, epsilon = 1e-9);
    }

    #[test]
    fn test_implied_opponent_stronger_opponent() {
        // Bigger win than k/2 implies a stronger opponent
        let opponent = implied_opponent_rating(1800.0, 24.0, 1.0, K).unwrap();
        assert!(opponent > 1800.0);
        assert_abs_diff_eq!(expected_score(1800.0, opponent), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_implied_opponent_indeterminate() {
        assert_eq!(implied_opponent_rating(1800.0, 32.0, 1.0, K), None);
        assert_eq!(implied_opponent_rating(1800.0, 40.0, 1.0, K), None);
        assert_eq!(implied_opponent_rating(1800.0, 0.0, 1.0, K), None);
        assert_eq!(implied_opponent_rating(1800.0, 0.0, 0.0, K), None);
    }

    #[test]
    fn test_predict_loss_from_win() {
        let result = CounterPredictor::default()
            .predict_counter_delta(20, MatchOutcome::Win, 1800.0, K)
            .unwrap();

        assert_eq!(result.predicted_delta, Some(-12));
        assert!(result.implied_opponent_rating.is_some());
    }

    #[test]
    fn test_predict_win_from_loss() {
        let result = CounterPredictor::default()
            .predict_counter_delta(-12, MatchOutcome::Loss, 1800.0, K)
            .unwrap();

        assert_eq!(result.predicted_delta, Some(20));
    }

    #[test]
    fn test_predict_indeterminate_propagates() {
        let result = CounterPredictor::default()
            .predict_counter_delta(45, MatchOutcome::Win, 1800.0, K)
            .unwrap();

        assert!(result.is_indeterminate());
        assert_eq!(result, PredictionResult::indeterminate());
    }

    #[test]
    fn test_predict_rejects_draw() {
        assert_eq!(
            CounterPredictor::default().predict_counter_delta(2, MatchOutcome::Draw, 1800.0, K),
            Err(ValidationError::NonDecisiveOutcome(MatchOutcome::Draw))
        );
    }

    #[test]
    fn test_predict_rejects_bad_k() {
        assert!(CounterPredictor::default()
            .predict_counter_delta(20, MatchOutcome::Win, 1800.0, 0.0)
            .is_err());
        assert!(CounterPredictor::default()
            .predict_counter_delta(20, MatchOutcome::Win, 1800.0, f64::NAN)
            .is_err());
    }

    #[test]
    fn test_predict_rejects_malformed_observation() {
        let predictor = CounterPredictor::default();

        assert_eq!(
            predictor.predict_counter_delta(-3, MatchOutcome::Win, 1800.0, K),
            Err(ValidationError::MalformedMatch {
                outcome: MatchOutcome::Win,
                point_delta: -3
            })
        );
        assert!(predictor.predict_counter_delta(0, MatchOutcome::Win, 1800.0, K).is_err());
        assert_eq!(
            predictor.predict_counter_delta(4, MatchOutcome::Loss, 1800.0, K),
            Err(ValidationError::MalformedMatch {
                outcome: MatchOutcome::Loss,
                point_delta: 4
            })
        );
    }

    #[test]
    fn test_predict_zero_point_loss_is_indeterminate() {
        let result = CounterPredictor::default()
            .predict_counter_delta(0, MatchOutcome::Loss, 1800.0, K)
            .unwrap();

        assert!(result.is_indeterminate());
    }

    #[test]
    fn test_symmetry_rejects_swapped_signs() {
        assert!(matches!(
            CounterPredictor::default().check_symmetry(-3, 4, 1800.0, 27.0),
            Err(ValidationError::MalformedMatch { .. })
        ));
    }

    #[test]
    fn test_symmetry_consistent_data_never_warns() {
        let predictor = CounterPredictor::default();
        for rating in [600.0, 1500.0, 2300.0] {
            for win_delta in 1..32 {
                let loss_delta = predictor
                    .predict_counter_delta(win_delta, MatchOutcome::Win, rating, K)
                    .unwrap()
                    .predicted_delta
                    .unwrap();

                let report = predictor.check_symmetry(win_delta, loss_delta, rating, K).unwrap();
                assert!(report.is_consistent(), "win {} / loss {} warned", win_delta, loss_delta);
            }
        }
    }

    #[test]
    fn test_symmetry_flags_both_sides() {
        let report = CounterPredictor::default()
            .check_symmetry(20, -25, 1800.0, K)
            .unwrap();

        assert_eq!(report.predicted_loss, Some(-12));
        assert_eq!(report.predicted_win, Some(7));
        assert_eq!(
            report.warnings,
            vec![SymmetryWarning::LossMismatch, SymmetryWarning::WinMismatch]
        );
    }

    #[test]
    fn test_symmetry_within_tolerance() {
        let report = CounterPredictor::default()
            .check_symmetry(20, -15, 1800.0, K)
            .unwrap();

        assert!(report.is_consistent());
    }

    #[test]
    fn test_symmetry_skips_indeterminate_side() {
        let report = CounterPredictor::default()
            .check_symmetry(40, -12, 1800.0, K)
            .unwrap();

        assert_eq!(report.predicted_loss, None);
        assert_eq!(report.predicted_win, Some(20));
        assert_eq!(report.warnings, vec![SymmetryWarning::WinMismatch]);
    }
}
